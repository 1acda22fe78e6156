//! An in-memory radix tree (compressed trie) keyed by strings.
//!
//! Chains of single-child nodes are merged into one node holding a
//! multi-character fragment, so the node count grows with the number of keys
//! rather than with their total length. Besides exact lookups the tree answers
//! paginated prefix searches by descending to the node that covers the prefix
//! and enumerating only that subtree.
//!
//! ```rust
//! use radixtree::{Page, RadixTree};
//!
//! let mut tree = RadixTree::new();
//! tree.insert("romane", 1).unwrap();
//! tree.insert("romanus", 2).unwrap();
//! tree.insert("rubens", 3).unwrap();
//!
//! assert_eq!(tree.get("romanus"), Some(&2));
//! assert_eq!(tree.prefix_search("rom", Page::ALL), vec![&1, &2]);
//! assert_eq!(tree.prefix_search("r", Page::new(1, 1)), vec![&2]);
//! ```

mod iter;
mod lookup;
mod node;
mod page;
#[cfg(feature = "serde")]
mod serialize;

use std::collections::HashMap;
use std::fmt;

use ahash::RandomState;

pub use iter::Iter;
pub use lookup::{EmptyTree, PrefixLookup};
pub use page::Page;

use iter::Values;
use node::{Insertion, Node};

/// Errors returned by mutating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// The empty string cannot be used as a key.
  EmptyKey,
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::EmptyKey => write!(f, "the empty string cannot be used as a key"),
    }
  }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
  /// Every node, the root included.
  pub nodes: usize,
  /// Nodes without children.
  pub leaf_nodes: usize,
  /// Nodes holding a value.
  pub total_items: usize,
  /// Edges on the longest root-to-node path.
  pub max_depth: usize,
  pub max_children: usize,
}

/// A map from non-empty string keys to values, with prefix search.
///
/// Enumeration order (`iter`, `values`, `prefix_search`) is the order in which
/// children were attached. It matches lexicographic order of the keys' UTF-8
/// bytes when keys were inserted in that order, and is otherwise unspecified.
///
/// The tree is not synchronized; share it across threads behind a lock.
pub struct RadixTree<V> {
  root: Node<V>,
  len: usize,
}

impl<V> Default for RadixTree<V> {
  fn default() -> Self {
    Self {
      root: Node::root(),
      len: 0,
    }
  }
}

impl<V> RadixTree<V> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn contains_key<K: AsRef<str>>(&self, key: K) -> bool {
    self.get(key).is_some()
  }

  pub fn get<K: AsRef<str>>(&self, key: K) -> Option<&V> {
    self.root.find(key.as_ref())?.value.as_ref()
  }

  pub fn get_mut<K: AsRef<str>>(&mut self, key: K) -> Option<&mut V> {
    self.root.find_mut(key.as_ref())?.value.as_mut()
  }

  /// Stores `value` under `key`.
  ///
  /// Returns the value displaced by the call: `None` when `key` is new, the
  /// previous value when it was replaced, or `value` itself when the key
  /// already existed and `replace_if_exists` is false.
  pub fn put<K: AsRef<str>>(
    &mut self,
    key: K,
    value: V,
    replace_if_exists: bool,
  ) -> Result<Option<V>, Error> {
    let key = key.as_ref();
    if key.is_empty() {
      #[cfg(feature = "tracing")]
      tracing::debug!("rejected empty key");
      return Err(Error::EmptyKey);
    }

    let displaced = match self.root.insert(key, value, replace_if_exists) {
      Insertion::Created => {
        self.len += 1;
        None
      }
      Insertion::Replaced(previous) => Some(previous),
      Insertion::Kept(rejected) => Some(rejected),
    };
    Ok(displaced)
  }

  /// Inserts or overwrites, returning the previous value like `HashMap::insert`.
  pub fn insert<K: AsRef<str>>(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
    self.put(key, value, true)
  }

  /// Overwrites the value of an existing key. Never creates a key.
  pub fn replace<K: AsRef<str>>(&mut self, key: K, value: V) -> bool {
    match self.get_mut(key) {
      Some(slot) => {
        *slot = value;
        true
      }
      None => false,
    }
  }

  /// Removes `key`. The empty key is never stored, so removing it finds nothing.
  pub fn remove<K: AsRef<str>>(&mut self, key: K) -> Option<V> {
    let removed = self.root.remove(key.as_ref(), |_| true)?;
    self.len -= 1;
    Some(removed)
  }

  /// Removes `key` only if it currently maps to `value`.
  pub fn remove_value<K: AsRef<str>>(&mut self, key: K, value: &V) -> bool
  where
    V: PartialEq,
  {
    let removed = self
      .root
      .remove(key.as_ref(), |stored| stored == value)
      .is_some();
    if removed {
      self.len -= 1;
    }
    removed
  }

  pub fn clear(&mut self) {
    #[cfg(feature = "tracing")]
    tracing::debug!(len = self.len, "clear");

    self.root.reset_children();
    self.len = 0;
  }

  /// Values whose keys start with `prefix`, in enumeration order, windowed by `page`.
  ///
  /// An empty prefix matches every key.
  pub fn prefix_search(&self, prefix: &str, page: Page) -> Vec<&V> {
    if page.is_empty() || page.offset >= self.len {
      return Vec::new();
    }
    let Some((node, _)) = self.root.locate(prefix) else {
      return Vec::new();
    };
    page.apply(Values::new(node)).collect()
  }

  /// All values in enumeration order.
  pub fn values(&self) -> Vec<&V> {
    self.prefix_search("", Page::ALL)
  }

  /// Every key/value pair, keyed by the reconstructed key.
  pub fn entries(&self) -> HashMap<String, &V, RandomState> {
    let mut entries = HashMap::with_capacity_and_hasher(self.len, RandomState::new());
    entries.extend(self.iter());
    entries
  }

  /// Returns a lazy iterator over all pairs in enumeration order.
  pub fn iter(&self) -> Iter<'_, V> {
    Iter::new(&self.root, "")
  }

  /// Returns a lazy iterator over the pairs whose keys start with `prefix`.
  pub fn scan_prefix<K: AsRef<str>>(&self, prefix: K) -> Iter<'_, V> {
    let prefix = prefix.as_ref();
    match self.root.locate(prefix) {
      Some((node, depth)) => Iter::new(node, &prefix[..depth]),
      None => Iter::empty(),
    }
  }

  // --- DIAGNOSTICS ---

  pub fn stats(&self) -> TreeStats {
    let mut stats = TreeStats::default();
    self.root.collect_stats(&mut stats);
    stats
  }
}

impl<V> Drop for RadixTree<V> {
  fn drop(&mut self) {
    self.root.reset_children();
  }
}

impl<V> PrefixLookup<V> for RadixTree<V> {
  fn len(&self) -> usize {
    self.len
  }

  fn get(&self, key: &str) -> Option<&V> {
    RadixTree::get(self, key)
  }

  fn prefix_search(&self, prefix: &str, page: Page) -> Vec<&V> {
    RadixTree::prefix_search(self, prefix, page)
  }
}

// --- RUST TRAITS ---

// Copies pairs rather than nodes, so no part of the node graph is shared.
impl<V: Clone> Clone for RadixTree<V> {
  fn clone(&self) -> Self {
    self.iter().map(|(key, value)| (key, value.clone())).collect()
  }
}

impl<V: fmt::Debug> fmt::Debug for RadixTree<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("RadixTree ")?;
    f.debug_map().entries(self.iter()).finish()
  }
}

// Same pairs means equal, whatever order the children were attached in.
impl<V: PartialEq> PartialEq for RadixTree<V> {
  fn eq(&self, other: &Self) -> bool {
    self.len == other.len
      && self
        .iter()
        .all(|(key, value)| other.get(&key) == Some(value))
  }
}

impl<V: Eq> Eq for RadixTree<V> {}

/// Pairs with an empty key are skipped.
impl<K: AsRef<str>, V> FromIterator<(K, V)> for RadixTree<V> {
  fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
    let mut tree = RadixTree::new();
    tree.extend(iter);
    tree
  }
}

/// Pairs with an empty key are skipped.
impl<K: AsRef<str>, V> Extend<(K, V)> for RadixTree<V> {
  fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
    for (key, value) in iter {
      let _ = self.insert(key, value);
    }
  }
}

impl<'a, V> IntoIterator for &'a RadixTree<V> {
  type Item = (String, &'a V);
  type IntoIter = Iter<'a, V>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}
