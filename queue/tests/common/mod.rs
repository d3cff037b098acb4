#![allow(dead_code)]

use std::time::Duration;

pub const SHORT_TIMEOUT: Duration = Duration::from_millis(100);
pub const LONG_TIMEOUT: Duration = Duration::from_secs(3);
pub const ITEMS_LOW: usize = 20;
pub const ITEMS_MEDIUM: usize = 200;
pub const ITEMS_HIGH: usize = 1000;

/// Installs a fmt subscriber once per test binary. Set `RUST_LOG=trace` to see queue events.
pub fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}
