use std::fmt;

use crate::capacity::Capacity;

/// Lifetime counters kept inside the queue's locked state.
///
/// Every mutation of the queue already happens under its mutex, so these are
/// plain integers rather than atomics.
#[derive(Debug, Default, Clone)]
pub(crate) struct Counters {
  pub(crate) pushed: u64,
  pub(crate) popped: u64,
  pub(crate) evicted: u64,
  pub(crate) cancelled: u64,
  pub(crate) cleared: u64,
}

impl Counters {
  pub(crate) fn snapshot(&self, len: usize, capacity: Capacity) -> QueueStats {
    QueueStats {
      pushed: self.pushed,
      popped: self.popped,
      evicted: self.evicted,
      cancelled: self.cancelled,
      cleared: self.cleared,
      len,
      capacity,
    }
  }
}

/// A point-in-time snapshot of a queue's activity.
///
/// Obtained from [`BlockingQueue::stats`](crate::BlockingQueue::stats). All
/// counters are taken under one lock acquisition and are consistent with each
/// other: `pushed == popped + evicted + cleared + len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
  /// Elements accepted by `push`.
  pub pushed: u64,
  /// Elements handed to consumers by any pop operation, including `pop_range`.
  pub popped: u64,
  /// Elements overwritten because the queue was at capacity.
  pub evicted: u64,
  /// Cancellations consumed by a blocking pop.
  pub cancelled: u64,
  /// Elements discarded by `clear`.
  pub cleared: u64,
  /// Elements held at the time of the snapshot.
  pub len: usize,
  /// The queue's configured capacity.
  pub capacity: Capacity,
}

impl fmt::Display for QueueStats {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Queue Stats:")?;
    writeln!(f, "  Length/Capacity: {}/{}", self.len, self.capacity)?;
    writeln!(f, "  Pushed: {}", self.pushed)?;
    writeln!(f, "  Popped: {}", self.popped)?;
    writeln!(f, "  Evicted: {}", self.evicted)?;
    writeln!(f, "  Cleared: {}", self.cleared)?;
    write!(f, "  Cancelled: {}", self.cancelled)
  }
}
