// src/error.rs

use core::fmt;

/// Errors that can occur when constructing a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
  /// The queue was configured with a capacity of zero, which is not allowed
  /// for a bounded queue. Use `unbounded()` for a queue without a limit.
  ZeroCapacity,
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BuildError::ZeroCapacity => write!(f, "bounded queue capacity cannot be zero"),
    }
  }
}

impl std::error::Error for BuildError {}

/// Error returned by the blocking `pop` operation when it returns without an element.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PopError {
  /// The call was released by `wake_up_blocked`. No element was consumed.
  Cancelled,
  /// The queue is empty and has been closed, so it will never block again.
  Closed,
}
impl std::error::Error for PopError {}
impl fmt::Display for PopError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PopError::Cancelled => write!(f, "blocked pop was cancelled"),
      PopError::Closed => write!(f, "queue closed (empty and no longer blocking)"),
    }
  }
}

/// Error returned by `pop_timeout` operations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PopTimeoutError {
  /// The call was released by `wake_up_blocked`. No element was consumed.
  Cancelled,
  /// The queue is empty and has been closed.
  Closed,
  /// The timeout elapsed before an element became available.
  Timeout,
}

impl std::error::Error for PopTimeoutError {}
impl fmt::Display for PopTimeoutError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PopTimeoutError::Cancelled => write!(f, "blocked pop was cancelled"),
      PopTimeoutError::Closed => write!(f, "queue closed"),
      PopTimeoutError::Timeout => write!(f, "pop operation timed out"),
    }
  }
}

impl From<PopError> for PopTimeoutError {
  fn from(err: PopError) -> Self {
    match err {
      PopError::Cancelled => PopTimeoutError::Cancelled,
      PopError::Closed => PopTimeoutError::Closed,
    }
  }
}

/// Error returned when attempting to close an already closed queue.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CloseError;
impl std::error::Error for CloseError {}
impl fmt::Display for CloseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "queue is already closed")
  }
}
