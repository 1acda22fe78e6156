use crate::page::Page;

/// The read-only side of a prefix index.
///
/// Implemented by [`RadixTree`](crate::RadixTree) and by the stateless
/// [`EmptyTree`], so read paths can accept either.
pub trait PrefixLookup<V> {
  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn get(&self, key: &str) -> Option<&V>;

  fn contains_key(&self, key: &str) -> bool {
    self.get(key).is_some()
  }

  /// Values whose keys start with `prefix`, windowed by `page`.
  fn prefix_search(&self, prefix: &str, page: Page) -> Vec<&V>;

  fn values(&self) -> Vec<&V> {
    self.prefix_search("", Page::ALL)
  }
}

/// An index that never holds anything. Zero-sized; every instance is the same.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EmptyTree;

impl<V> PrefixLookup<V> for EmptyTree {
  fn len(&self) -> usize {
    0
  }

  fn get(&self, _key: &str) -> Option<&V> {
    None
  }

  fn prefix_search(&self, _prefix: &str, _page: Page) -> Vec<&V> {
    Vec::new()
  }
}
