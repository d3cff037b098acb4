//! The capacity policy of a queue.
//!
//! A bounded queue never applies backpressure. Once it holds `limit` elements,
//! every further push evicts the oldest element first.

use core::fmt;
use std::num::NonZeroUsize;

use crate::error::BuildError;

/// Maximum number of elements a queue may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Capacity {
  /// At most this many elements are retained; the oldest is overwritten on overflow.
  Bounded(NonZeroUsize),
  /// No limit. Elements are never evicted.
  #[default]
  Unbounded,
}

impl Capacity {
  /// Creates a bounded capacity, rejecting zero.
  pub fn bounded(limit: usize) -> Result<Self, BuildError> {
    NonZeroUsize::new(limit)
      .map(Capacity::Bounded)
      .ok_or(BuildError::ZeroCapacity)
  }

  /// Returns the element limit, or `None` when unbounded.
  #[inline]
  pub fn limit(&self) -> Option<usize> {
    match self {
      Capacity::Bounded(n) => Some(n.get()),
      Capacity::Unbounded => None,
    }
  }

  #[inline]
  pub fn is_unbounded(&self) -> bool {
    matches!(self, Capacity::Unbounded)
  }

  /// True if a queue currently holding `len` elements must evict before the next insert.
  #[inline]
  pub(crate) fn is_reached(&self, len: usize) -> bool {
    match self {
      Capacity::Bounded(n) => len >= n.get(),
      Capacity::Unbounded => false,
    }
  }

  /// Initial allocation for the backing deque. Large bounds are not preallocated.
  pub(crate) fn initial_allocation(&self) -> usize {
    match self {
      Capacity::Bounded(n) => n.get().min(1024),
      Capacity::Unbounded => 32,
    }
  }
}

impl From<NonZeroUsize> for Capacity {
  fn from(limit: NonZeroUsize) -> Self {
    Capacity::Bounded(limit)
  }
}

impl TryFrom<usize> for Capacity {
  type Error = BuildError;

  fn try_from(limit: usize) -> Result<Self, Self::Error> {
    Capacity::bounded(limit)
  }
}

impl fmt::Display for Capacity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Capacity::Bounded(n) => write!(f, "{}", n),
      Capacity::Unbounded => write!(f, "unbounded"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zero_is_rejected() {
    assert_eq!(Capacity::bounded(0), Err(BuildError::ZeroCapacity));
    assert_eq!(Capacity::try_from(0usize), Err(BuildError::ZeroCapacity));
  }

  #[test]
  fn limit_and_reached() {
    let cap = Capacity::bounded(3).unwrap();
    assert_eq!(cap.limit(), Some(3));
    assert!(!cap.is_reached(2));
    assert!(cap.is_reached(3));

    let unbounded = Capacity::default();
    assert!(unbounded.is_unbounded());
    assert_eq!(unbounded.limit(), None);
    assert!(!unbounded.is_reached(usize::MAX));
  }

  #[test]
  fn display() {
    assert_eq!(Capacity::bounded(8).unwrap().to_string(), "8");
    assert_eq!(Capacity::Unbounded.to_string(), "unbounded");
  }
}
