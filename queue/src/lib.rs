//! A blocking FIFO queue for producer/consumer pipelines.
//!
//! Fibre Queue provides [`BlockingQueue`], a mutex-guarded queue where producers
//! never stall: a bounded queue that is full overwrites its oldest element
//! instead of applying backpressure. Consumers block in [`BlockingQueue::pop`]
//! until data arrives, and can be released without data either one at a time
//! ([`BlockingQueue::wake_up_blocked`]) or for good ([`BlockingQueue::close`]).

pub mod builder;
pub mod capacity;
pub mod error;
pub mod stats;

mod queue;

pub use builder::QueueBuilder;
#[cfg(feature = "serde")]
pub use builder::QueueConfig;
pub use capacity::Capacity;
pub use error::{BuildError, CloseError, PopError, PopTimeoutError};
pub use queue::BlockingQueue;
pub use stats::QueueStats;
