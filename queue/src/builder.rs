use core::fmt;
use std::marker::PhantomData;

use crate::capacity::Capacity;
use crate::error::BuildError;
use crate::queue::BlockingQueue;

/// Serializable queue settings, for applications that load their wiring from
/// configuration files.
///
/// A missing `capacity` means unbounded.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueConfig {
  pub capacity: Option<usize>,
  pub name: Option<String>,
}

/// A builder for creating `BlockingQueue` instances.
pub struct QueueBuilder<T> {
  capacity: Option<usize>,
  name: Option<String>,
  _value_marker: PhantomData<fn() -> T>,
}

// Manual Debug implementation so `T` needs no bounds.
impl<T> fmt::Debug for QueueBuilder<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("QueueBuilder")
      .field("capacity", &self.capacity)
      .field("name", &self.name)
      .finish()
  }
}

impl<T> Default for QueueBuilder<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> QueueBuilder<T> {
  /// Creates a builder for an unnamed, unbounded queue.
  pub fn new() -> Self {
    Self {
      capacity: None,
      name: None,
      _value_marker: PhantomData,
    }
  }

  /// Creates a builder pre-populated from a loaded configuration.
  #[cfg(feature = "serde")]
  pub fn from_config(config: &QueueConfig) -> Self {
    Self {
      capacity: config.capacity,
      name: config.name.clone(),
      _value_marker: PhantomData,
    }
  }

  /// Sets the maximum number of elements. Zero is rejected by `build`.
  pub fn capacity(mut self, capacity: usize) -> Self {
    self.capacity = Some(capacity);
    self
  }

  /// Removes any element limit.
  pub fn unbounded(mut self) -> Self {
    self.capacity = None;
    self
  }

  /// Names the queue. The name is attached to its log events.
  pub fn name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// Builds the queue.
  pub fn build(self) -> Result<BlockingQueue<T>, BuildError> {
    let capacity = match self.capacity {
      Some(limit) => Capacity::bounded(limit)?,
      None => Capacity::Unbounded,
    };
    Ok(BlockingQueue::from_parts(capacity, self.name))
  }
}
