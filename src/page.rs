/// A window over an enumeration: skip `offset` values, then yield at most `limit`.
///
/// Windows past the end of the data truncate silently; they are never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page {
  pub offset: usize,
  pub limit: usize,
}

impl Page {
  /// Every value, from the first one.
  pub const ALL: Page = Page {
    offset: 0,
    limit: usize::MAX,
  };

  pub const fn new(offset: usize, limit: usize) -> Self {
    Self { offset, limit }
  }

  /// The first `limit` values.
  pub const fn first(limit: usize) -> Self {
    Self { offset: 0, limit }
  }

  /// Builds a page from signed inputs. A negative offset starts at zero and a
  /// limit of zero or less selects nothing.
  pub fn clamped(offset: i64, limit: i64) -> Self {
    Self {
      offset: non_negative(offset),
      limit: non_negative(limit),
    }
  }

  /// True when the page cannot select anything.
  pub fn is_empty(&self) -> bool {
    self.limit == 0
  }

  pub(crate) fn apply<I: Iterator>(self, iter: I) -> impl Iterator<Item = I::Item> {
    iter.skip(self.offset).take(self.limit)
  }
}

impl Default for Page {
  fn default() -> Self {
    Page::ALL
  }
}

fn non_negative(n: i64) -> usize {
  if n <= 0 {
    0
  } else {
    usize::try_from(n).unwrap_or(usize::MAX)
  }
}
