//! The blocking queue and its locked state.
//!
//! ### Design Principles:
//!
//! 1.  **One Mutex**: A `parking_lot::Mutex` guards the element buffer, the pending
//!     cancellation and the closed flag together. None of them is ever read or
//!     written on its own.
//! 2.  **Producers never wait**: when a bounded queue is full, `push` evicts the
//!     oldest element instead of blocking.
//! 3.  **Explicit wake reasons**: a blocked consumer is released by exactly one
//!     [`WakeReason`], evaluated under the lock with a fixed precedence:
//!     a pending cancellation beats available data, which beats the closed state.
//!     The data stays queued when a cancellation wins.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace};

use crate::builder::QueueBuilder;
use crate::capacity::Capacity;
use crate::error::{BuildError, CloseError, PopError, PopTimeoutError};
use crate::stats::{Counters, QueueStats};

/// Why a blocked consumer may stop waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WakeReason {
  /// `wake_up_blocked` was called and nobody has consumed it yet.
  CancelRequested,
  /// At least one element is queued.
  DataAvailable,
  /// The queue is empty and closed.
  Closed,
}

/// The state protected by the queue's mutex.
#[derive(Debug)]
pub(crate) struct QueueState<T> {
  pub(crate) elements: VecDeque<T>,
  pub(crate) cancel_pending: bool,
  pub(crate) closed: bool,
  pub(crate) counters: Counters,
}

impl<T> QueueState<T> {
  fn new(capacity: Capacity) -> Self {
    QueueState {
      elements: VecDeque::with_capacity(capacity.initial_allocation()),
      cancel_pending: false,
      closed: false,
      counters: Counters::default(),
    }
  }

  /// The reason a consumer would be released right now, if any.
  pub(crate) fn wake_reason(&self) -> Option<WakeReason> {
    if self.cancel_pending {
      Some(WakeReason::CancelRequested)
    } else if !self.elements.is_empty() {
      Some(WakeReason::DataAvailable)
    } else if self.closed {
      Some(WakeReason::Closed)
    } else {
      None
    }
  }

  /// Consumes the current wake reason. `None` means the caller has to wait.
  pub(crate) fn resolve(&mut self) -> Option<Result<T, PopError>> {
    match self.wake_reason()? {
      WakeReason::CancelRequested => {
        self.cancel_pending = false;
        self.counters.cancelled += 1;
        Some(Err(PopError::Cancelled))
      }
      WakeReason::DataAvailable => self.pop_front().map(Ok),
      WakeReason::Closed => Some(Err(PopError::Closed)),
    }
  }

  fn pop_front(&mut self) -> Option<T> {
    let item = self.elements.pop_front()?;
    self.counters.popped += 1;
    Some(item)
  }
}

/// A thread-safe FIFO queue whose consumers block until data arrives.
///
/// Producers never block. A bounded queue that is full drops its oldest
/// element to make room for the new one. A consumer blocked in [`pop`](Self::pop)
/// can be released without data through [`wake_up_blocked`](Self::wake_up_blocked),
/// and [`close`](Self::close) stops every consumer from blocking again.
///
/// Share it between threads with an `Arc` or scoped threads.
///
/// ```
/// use fibre_queue::{BlockingQueue, PopError};
///
/// let queue = BlockingQueue::bounded(2).unwrap();
/// for i in 0..10 {
///   queue.push(i);
/// }
/// assert_eq!(queue.pop(), Ok(8));
/// assert_eq!(queue.pop(), Ok(9));
///
/// queue.wake_up_blocked();
/// assert_eq!(queue.pop(), Err(PopError::Cancelled));
/// ```
pub struct BlockingQueue<T> {
  state: Mutex<QueueState<T>>,
  available: Condvar,
  capacity: Capacity,
  name: Option<String>,
}

impl<T> fmt::Debug for BlockingQueue<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = self.state.lock();
    f.debug_struct("BlockingQueue")
      .field("name", &self.name)
      .field("capacity", &self.capacity)
      .field("len", &state.elements.len())
      .field("cancel_pending", &state.cancel_pending)
      .field("closed", &state.closed)
      .finish()
  }
}

impl<T> Default for BlockingQueue<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> BlockingQueue<T> {
  /// Creates an unbounded queue.
  pub fn new() -> Self {
    Self::with_capacity(Capacity::Unbounded)
  }

  /// Creates an unbounded queue. Same as [`new`](Self::new).
  pub fn unbounded() -> Self {
    Self::new()
  }

  /// Creates a queue holding at most `capacity` elements.
  ///
  /// Returns [`BuildError::ZeroCapacity`] if `capacity` is zero.
  pub fn bounded(capacity: usize) -> Result<Self, BuildError> {
    Ok(Self::with_capacity(Capacity::bounded(capacity)?))
  }

  /// Creates a queue with the given capacity policy.
  pub fn with_capacity(capacity: Capacity) -> Self {
    Self::from_parts(capacity, None)
  }

  /// Returns a builder for configuring a new queue.
  pub fn builder() -> QueueBuilder<T> {
    QueueBuilder::new()
  }

  pub(crate) fn from_parts(capacity: Capacity, name: Option<String>) -> Self {
    debug!(queue = name.as_deref(), %capacity, "created blocking queue");
    BlockingQueue {
      state: Mutex::new(QueueState::new(capacity)),
      available: Condvar::new(),
      capacity,
      name,
    }
  }

  /// The diagnostic name given at build time, if any.
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  /// Returns the capacity policy fixed at construction.
  #[inline]
  pub fn capacity(&self) -> Capacity {
    self.capacity
  }

  /// Appends `value` at the back of the queue.
  ///
  /// If the queue is at capacity, the oldest element is evicted first. This
  /// never blocks and never fails. One blocked consumer, if any, is woken.
  pub fn push(&self, value: T) {
    let evicted = {
      let mut state = self.state.lock();
      let evicted = if self.capacity.is_reached(state.elements.len()) {
        state.counters.evicted += 1;
        state.elements.pop_front()
      } else {
        None
      };
      state.elements.push_back(value);
      state.counters.pushed += 1;
      evicted
    };
    // Wake outside lock.
    self.available.notify_one();

    if evicted.is_some() {
      trace!(queue = self.name(), capacity = %self.capacity, "evicted oldest element");
    }
  }

  /// Removes and returns the front element, blocking while the queue is empty.
  ///
  /// Returns [`PopError::Cancelled`] without consuming anything if a
  /// cancellation from [`wake_up_blocked`](Self::wake_up_blocked) is pending,
  /// even when elements are available. Returns [`PopError::Closed`] once the
  /// queue is closed and drained.
  pub fn pop(&self) -> Result<T, PopError> {
    let mut state = self.state.lock();
    loop {
      if let Some(outcome) = state.resolve() {
        drop(state);
        self.trace_outcome(&outcome);
        return outcome;
      }
      // Re-checked on every wake; spurious wakeups just loop.
      self.available.wait(&mut state);
    }
  }

  /// Like [`pop`](Self::pop), but gives up once `timeout` has elapsed.
  pub fn pop_timeout(&self, timeout: Duration) -> Result<T, PopTimeoutError> {
    let deadline = match Instant::now().checked_add(timeout) {
      Some(deadline) => deadline,
      None => return self.pop().map_err(Into::into),
    };

    let mut state = self.state.lock();
    loop {
      if let Some(outcome) = state.resolve() {
        drop(state);
        self.trace_outcome(&outcome);
        return outcome.map_err(Into::into);
      }
      if self.available.wait_until(&mut state, deadline).timed_out() {
        // A notification may have raced with the deadline.
        return match state.resolve() {
          Some(outcome) => {
            drop(state);
            self.trace_outcome(&outcome);
            outcome.map_err(Into::into)
          }
          None => Err(PopTimeoutError::Timeout),
        };
      }
    }
  }

  /// Removes and returns the front element without blocking.
  ///
  /// Ignores any pending cancellation, which stays pending.
  pub fn try_pop(&self) -> Option<T> {
    self.state.lock().pop_front()
  }

  /// Returns a copy of the front element without removing it.
  pub fn peek(&self) -> Option<T>
  where
    T: Clone,
  {
    self.state.lock().elements.front().cloned()
  }

  /// Applies `f` to the front element without removing it.
  ///
  /// The queue stays locked while `f` runs.
  pub fn peek_with<R, F>(&self, f: F) -> Option<R>
  where
    F: FnOnce(&T) -> R,
  {
    self.state.lock().elements.front().map(f)
  }

  /// Removes and returns up to `n` elements from the front, oldest first.
  ///
  /// Never blocks and never touches the cancellation signal. Returns fewer
  /// than `n` elements (possibly none) when the queue holds fewer.
  pub fn pop_range(&self, n: usize) -> Vec<T> {
    let mut state = self.state.lock();
    let take = n.min(state.elements.len());
    state.counters.popped += take as u64;
    state.elements.drain(..take).collect()
  }

  /// Number of elements currently queued.
  pub fn size(&self) -> usize {
    self.state.lock().elements.len()
  }

  /// Alias for [`size`](Self::size).
  #[inline]
  pub fn len(&self) -> usize {
    self.size()
  }

  pub fn is_empty(&self) -> bool {
    self.state.lock().elements.is_empty()
  }

  /// Drops every queued element.
  ///
  /// A pending cancellation is left untouched and blocked consumers are not
  /// woken.
  pub fn clear(&self) {
    let drained = {
      let mut state = self.state.lock();
      state.counters.cleared += state.elements.len() as u64;
      std::mem::take(&mut state.elements)
    };
    drop(drained);
  }

  /// Releases one blocked consumer without giving it an element.
  ///
  /// The signal is one-shot: exactly one `pop` (the one currently blocked, or
  /// the next one to be called) returns [`PopError::Cancelled`]. Calls made
  /// while a cancellation is still pending are absorbed into it.
  pub fn wake_up_blocked(&self) {
    {
      let mut state = self.state.lock();
      state.cancel_pending = true;
    }
    self.available.notify_one();
    trace!(queue = self.name(), "cancellation requested");
  }

  /// Closes the queue permanently.
  ///
  /// Every blocked consumer is woken. Remaining elements can still be popped,
  /// after which `pop` returns [`PopError::Closed`] instead of blocking.
  /// `push` keeps working. Returns [`CloseError`] if already closed.
  pub fn close(&self) -> Result<(), CloseError> {
    {
      let mut state = self.state.lock();
      if state.closed {
        return Err(CloseError);
      }
      state.closed = true;
    }
    let woken = self.available.notify_all();
    debug!(queue = self.name(), woken, "queue closed");
    Ok(())
  }

  pub fn is_closed(&self) -> bool {
    self.state.lock().closed
  }

  /// Returns a consistent snapshot of the queue's counters.
  pub fn stats(&self) -> QueueStats {
    let state = self.state.lock();
    state.counters.snapshot(state.elements.len(), self.capacity)
  }

  fn trace_outcome(&self, outcome: &Result<T, PopError>) {
    if let Err(err) = outcome {
      trace!(queue = self.name(), %err, "pop returned without an element");
    }
  }

  #[cfg(test)]
  pub(crate) fn with_state<R>(&self, f: impl FnOnce(&mut QueueState<T>) -> R) -> R {
    f(&mut self.state.lock())
  }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
