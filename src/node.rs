use crate::TreeStats;

/// A compressed-trie node.
///
/// `fragment` is the edge label consumed from the parent (empty only for the
/// root). Children stay unallocated until the first one is attached, which
/// keeps leaves to a fragment and an optional value.
pub(crate) struct Node<V> {
  pub(crate) fragment: String,
  pub(crate) value: Option<V>,
  children: Option<Vec<Node<V>>>,
}

/// Outcome of [`Node::insert`], used by the tree to keep its length in step.
pub(crate) enum Insertion<V> {
  /// The key did not hold a value before.
  Created,
  /// The key existed and its previous value was swapped out.
  Replaced(V),
  /// The key existed and replacement was not requested; the rejected value is handed back.
  Kept(V),
}

impl<V> Node<V> {
  pub(crate) fn root() -> Self {
    Self {
      fragment: String::new(),
      value: None,
      children: None,
    }
  }

  fn leaf(fragment: &str, value: V) -> Self {
    Self {
      fragment: fragment.to_owned(),
      value: Some(value),
      children: None,
    }
  }

  pub(crate) fn has_value(&self) -> bool {
    self.value.is_some()
  }

  pub(crate) fn has_children(&self) -> bool {
    self.children.is_some()
  }

  pub(crate) fn children(&self) -> &[Node<V>] {
    self.children.as_deref().unwrap_or_default()
  }

  fn children_mut(&mut self) -> &mut [Node<V>] {
    self.children.as_deref_mut().unwrap_or_default()
  }

  fn child_count(&self) -> usize {
    self.children().len()
  }

  fn first_char(&self) -> Option<char> {
    self.fragment.chars().next()
  }

  /// Sibling fragments never share a first character, so at most one child matches.
  fn child_index(&self, first: char) -> Option<usize> {
    self
      .children()
      .iter()
      .position(|child| child.first_char() == Some(first))
  }

  pub(crate) fn add_child(&mut self, child: Node<V>) {
    self.children.get_or_insert_with(Vec::new).push(child);
  }

  /// Drops every descendant and releases the child vector.
  ///
  /// Descendants are unlinked onto a heap stack first, so dropping a very deep
  /// subtree never recurses once per level.
  pub(crate) fn reset_children(&mut self) {
    let mut pending = self.children.take().unwrap_or_default();
    while let Some(mut node) = pending.pop() {
      if let Some(children) = node.children.take() {
        pending.extend(children);
      }
    }
  }

  /// Cuts the fragment at byte `at` (a char boundary). The tail, the value and
  /// the children move into a single new child.
  fn split(&mut self, at: usize) {
    #[cfg(feature = "tracing")]
    tracing::trace!(fragment = %self.fragment, at, "split node");

    let tail = Node {
      fragment: self.fragment[at..].to_owned(),
      value: self.value.take(),
      children: self.children.take(),
    };
    self.fragment.truncate(at);
    self.add_child(tail);
  }

  fn detach_child(&mut self, idx: usize) {
    if let Some(children) = self.children.as_mut() {
      children.remove(idx);
      if children.is_empty() {
        self.children = None;
      }
    }
  }

  /// Merges a value-less node with its only child.
  fn collapse(&mut self) {
    if self.has_value() || self.child_count() != 1 {
      return;
    }
    let Some(child) = self.children.take().and_then(|mut children| children.pop()) else {
      return;
    };

    #[cfg(feature = "tracing")]
    tracing::trace!(fragment = %self.fragment, child = %child.fragment, "collapse node");

    self.fragment.push_str(&child.fragment);
    self.value = child.value;
    self.children = child.children;
  }

  /// Stores `value` under `key`, relative to this node. `key` must not be empty.
  pub(crate) fn insert(&mut self, key: &str, value: V, replace: bool) -> Insertion<V> {
    let mut node = self;
    let mut rest = key;

    loop {
      let lcs = common_prefix_len(&node.fragment, rest);

      if lcs < node.fragment.len() {
        // The key leaves this fragment early (or ends inside it).
        node.split(lcs);
        if lcs == rest.len() {
          node.value = Some(value);
        } else {
          node.add_child(Node::leaf(&rest[lcs..], value));
        }
        return Insertion::Created;
      }

      rest = &rest[lcs..];
      let Some(first) = rest.chars().next() else {
        return match node.value.as_mut() {
          None => {
            node.value = Some(value);
            Insertion::Created
          }
          Some(slot) if replace => Insertion::Replaced(std::mem::replace(slot, value)),
          Some(_) => Insertion::Kept(value),
        };
      };

      match node.child_index(first) {
        Some(idx) => node = &mut node.children_mut()[idx],
        None => {
          node.add_child(Node::leaf(rest, value));
          return Insertion::Created;
        }
      }
    }
  }

  /// Prefix-root descent.
  ///
  /// Returns the first node whose path covers all of `query`, along with the
  /// byte length of the path above it. The query may end inside the returned
  /// node's fragment; every key below that node still starts with `query`.
  pub(crate) fn locate(&self, query: &str) -> Option<(&Node<V>, usize)> {
    let mut node = self;
    let mut depth = 0;

    loop {
      let rest = &query[depth..];
      let lcs = common_prefix_len(&node.fragment, rest);
      if lcs == rest.len() {
        return Some((node, depth));
      }
      if lcs < node.fragment.len() {
        return None;
      }

      depth += lcs;
      let first = query[depth..].chars().next()?;
      node = node
        .children()
        .iter()
        .find(|child| child.first_char() == Some(first))?;
    }
  }

  /// Exact lookup: the node whose path is exactly `key`.
  pub(crate) fn find(&self, key: &str) -> Option<&Node<V>> {
    let (node, depth) = self.locate(key)?;
    (depth + node.fragment.len() == key.len()).then_some(node)
  }

  pub(crate) fn find_mut(&mut self, key: &str) -> Option<&mut Node<V>> {
    let mut node = self;
    let mut rest = key;

    loop {
      let lcs = common_prefix_len(&node.fragment, rest);
      if lcs < node.fragment.len() {
        return None;
      }

      rest = &rest[lcs..];
      let Some(first) = rest.chars().next() else {
        return Some(node);
      };
      let idx = node.child_index(first)?;
      node = &mut node.children_mut()[idx];
    }
  }

  /// Removes the value stored exactly at `key` below this node (the root) if
  /// `accept` agrees, then restores compression around the emptied node.
  ///
  /// The parent is carried by the cursor only for the duration of the call.
  pub(crate) fn remove<F>(&mut self, key: &str, accept: F) -> Option<V>
  where
    F: FnOnce(&V) -> bool,
  {
    let mut parent = self;
    let mut parent_is_root = true;
    let mut rest = key;

    let idx = loop {
      let first = rest.chars().next()?;
      let idx = parent.child_index(first)?;
      let child = &parent.children()[idx];
      let lcs = common_prefix_len(&child.fragment, rest);
      if lcs < child.fragment.len() {
        return None;
      }
      if lcs == rest.len() {
        break idx;
      }

      rest = &rest[lcs..];
      parent = &mut parent.children_mut()[idx];
      parent_is_root = false;
    };

    let target = &mut parent.children_mut()[idx];
    if !target.value.as_ref().is_some_and(accept) {
      return None;
    }
    let removed = target.value.take();

    match target.child_count() {
      0 => {
        parent.detach_child(idx);
        if !parent_is_root {
          parent.collapse();
        }
      }
      1 => target.collapse(),
      _ => {}
    }

    removed
  }

  pub(crate) fn collect_stats(&self, stats: &mut TreeStats) {
    let mut stack = vec![(self, 0usize)];
    while let Some((node, depth)) = stack.pop() {
      stats.nodes += 1;
      if node.has_value() {
        stats.total_items += 1;
      }
      if !node.has_children() {
        stats.leaf_nodes += 1;
      }
      stats.max_depth = stats.max_depth.max(depth);
      stats.max_children = stats.max_children.max(node.child_count());
      stack.extend(node.children().iter().map(|child| (child, depth + 1)));
    }
  }
}

#[cfg(test)]
impl<V> Node<V> {
  /// Walks the tree below this root and panics on a broken structural
  /// invariant. Returns the number of stored values.
  pub(crate) fn assert_invariants(&self) -> usize {
    assert!(self.fragment.is_empty(), "root fragment must be empty");
    assert!(!self.has_value(), "root never holds a value");

    let mut values = 0;
    let mut stack = vec![(self, true)];
    while let Some((node, is_root)) = stack.pop() {
      if node.has_value() {
        values += 1;
      }
      if let Some(children) = &node.children {
        assert!(!children.is_empty(), "allocated child vector must not be empty");
      }
      if !is_root {
        assert!(!node.fragment.is_empty(), "non-root fragment must not be empty");
        assert!(
          node.has_value() || node.child_count() >= 2,
          "value-less node {:?} has {} child(ren)",
          node.fragment,
          node.child_count()
        );
      }

      let mut firsts: Vec<char> = node.children().iter().filter_map(Node::first_char).collect();
      firsts.sort_unstable();
      firsts.dedup();
      assert_eq!(firsts.len(), node.child_count(), "siblings share a first char");

      stack.extend(node.children().iter().map(|child| (child, false)));
    }
    values
  }
}

/// Byte length of the longest common prefix of `a` and `b`, measured in whole chars.
pub(crate) fn common_prefix_len(a: &str, b: &str) -> usize {
  a.char_indices()
    .zip(b.chars())
    .find(|((_, x), y)| x != y)
    .map_or(a.len().min(b.len()), |((idx, _), _)| idx)
}
