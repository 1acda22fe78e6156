use std::iter::FusedIterator;

use crate::node::Node;

/// An iterator over `(key, value)` pairs of a subtree.
///
/// Pairs come out depth-first in children-list order, which is lexicographic
/// order whenever the keys were inserted in sorted order. The walk keeps its
/// own stack, so tree depth never turns into call depth.
pub struct Iter<'a, V> {
  // Pending nodes, each with the byte length of the path above it.
  stack: Vec<(&'a Node<V>, usize)>,
  // Path of the most recently visited node. Truncated back to the parent
  // path of whatever is popped next.
  key: String,
}

impl<'a, V> Iter<'a, V> {
  /// Starts at `node`, whose ancestors spell `path`.
  pub(crate) fn new(node: &'a Node<V>, path: &str) -> Self {
    Self {
      stack: vec![(node, path.len())],
      key: path.to_owned(),
    }
  }

  pub(crate) fn empty() -> Self {
    Self {
      stack: Vec::new(),
      key: String::new(),
    }
  }
}

impl<'a, V> Iterator for Iter<'a, V> {
  type Item = (String, &'a V);

  fn next(&mut self) -> Option<Self::Item> {
    while let Some((node, depth)) = self.stack.pop() {
      self.key.truncate(depth);
      self.key.push_str(&node.fragment);

      // Reversed so the first child is popped first.
      let path_len = self.key.len();
      self
        .stack
        .extend(node.children().iter().rev().map(|child| (child, path_len)));

      if let Some(value) = &node.value {
        return Some((self.key.clone(), value));
      }
    }
    None
  }
}

impl<V> FusedIterator for Iter<'_, V> {}

/// Like [`Iter`], but skips key reconstruction.
pub(crate) struct Values<'a, V> {
  stack: Vec<&'a Node<V>>,
}

impl<'a, V> Values<'a, V> {
  pub(crate) fn new(node: &'a Node<V>) -> Self {
    Self { stack: vec![node] }
  }
}

impl<'a, V> Iterator for Values<'a, V> {
  type Item = &'a V;

  fn next(&mut self) -> Option<Self::Item> {
    while let Some(node) = self.stack.pop() {
      self.stack.extend(node.children().iter().rev());
      if let Some(value) = &node.value {
        return Some(value);
      }
    }
    None
  }
}
