// benches/queue_sync.rs

use bench_matrix::{criterion_runner::sync_suite::SyncBenchmarkSuite, AbstractCombination, MatrixCellValue};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::{
  sync::Arc,
  thread::{self, available_parallelism},
  time::{Duration, Instant},
};

use fibre_queue::{BlockingQueue, Capacity};

const ITEM_VALUE: u64 = 42;

// --- Config, State, Context ---
#[derive(Debug, Clone)]
struct QueueBenchConfig {
  capacity: Capacity,
  num_producers: usize,
  num_consumers: usize,
  total_items: usize,
}

#[derive(Default, Debug)]
struct BenchContext {
  actual_items_processed_total: usize,
}

#[derive(Clone)]
struct QueueBenchState;

// --- Extractor Function ---
fn extract_queue_config(combo: &AbstractCombination) -> Result<QueueBenchConfig, String> {
  // A capacity cell of 0 selects the unbounded queue.
  let capacity = match combo.get_u64(0)? as usize {
    0 => Capacity::Unbounded,
    n => Capacity::bounded(n).map_err(|e| e.to_string())?,
  };
  let num_producers = combo.get_u64(1)? as usize;
  let num_consumers = combo.get_u64(2)? as usize;
  let total_items = combo.get_u64(3)? as usize;

  if num_producers == 0 || num_consumers == 0 {
    return Err("Number of producers and consumers must be at least 1.".to_string());
  }

  Ok(QueueBenchConfig {
    capacity,
    num_producers,
    num_consumers,
    total_items,
  })
}

// --- Setup Function ---
fn setup_fn_queue_sync(_cfg: &QueueBenchConfig) -> Result<(BenchContext, QueueBenchState), String> {
  Ok((BenchContext::default(), QueueBenchState))
}

// --- Benchmark Logic ---
fn benchmark_logic_queue_sync(
  mut ctx: BenchContext,
  state: QueueBenchState,
  cfg: &QueueBenchConfig,
) -> (BenchContext, QueueBenchState, Duration) {
  let items_to_send_total = cfg.total_items;
  if items_to_send_total == 0 {
    return (ctx, state, Duration::from_nanos(0));
  }

  // Create a fresh queue for this iteration.
  let queue = Arc::new(BlockingQueue::with_capacity(cfg.capacity));

  let mut producer_handles = Vec::with_capacity(cfg.num_producers);
  let start_time = Instant::now();

  for p_idx in 0..cfg.num_producers {
    let queue = queue.clone();
    let items_this_producer = {
      let base = items_to_send_total / cfg.num_producers;
      let remainder = items_to_send_total % cfg.num_producers;
      base + if p_idx < remainder { 1 } else { 0 }
    };

    if items_this_producer > 0 {
      producer_handles.push(thread::spawn(move || {
        for _ in 0..items_this_producer {
          queue.push(ITEM_VALUE);
        }
      }));
    }
  }

  let mut consumer_handles = Vec::with_capacity(cfg.num_consumers);
  for _ in 0..cfg.num_consumers {
    let queue = queue.clone();
    consumer_handles.push(thread::spawn(move || {
      // Bounded queues may evict, so consumers run until close rather than counting.
      while queue.pop().is_ok() {}
    }));
  }

  for handle in producer_handles {
    handle.join().expect("queue producer thread panicked");
  }
  let _ = queue.close();

  for handle in consumer_handles {
    handle.join().expect("queue consumer thread panicked");
  }

  let duration = start_time.elapsed();
  ctx.actual_items_processed_total += items_to_send_total;
  (ctx, state, duration)
}

// --- Teardown Function ---
fn teardown_queue_sync(_ctx: BenchContext, _state: QueueBenchState, _cfg: &QueueBenchConfig) {}

// --- Main Benchmark Suite ---
fn queue_sync_benches(c: &mut Criterion) {
  let core_count = available_parallelism().map(|n| n.get() as u64).unwrap_or(4);
  let parameter_axes = vec![
    vec![
      // Axis 0: Capacity
      MatrixCellValue::Unsigned(0), // Unbounded
      MatrixCellValue::Unsigned(128),
      MatrixCellValue::Unsigned(4096),
    ],
    vec![
      // Axis 1: Num Producers
      MatrixCellValue::Unsigned(1),
      MatrixCellValue::Unsigned(4),
      MatrixCellValue::Unsigned(core_count),
    ],
    vec![
      // Axis 2: Num Consumers
      MatrixCellValue::Unsigned(1),
      MatrixCellValue::Unsigned(4),
    ],
    vec![
      // Axis 3: Total Items
      MatrixCellValue::Unsigned(100_000),
      MatrixCellValue::Unsigned(1_000_000),
    ],
  ];
  let parameter_names = vec!["Cap", "Prod", "Cons", "Items"]
    .into_iter()
    .map(String::from)
    .collect();

  SyncBenchmarkSuite::new(
    c,
    "BlockingQueueSync".to_string(),
    Some(parameter_names),
    parameter_axes,
    Box::new(extract_queue_config),
    setup_fn_queue_sync,
    benchmark_logic_queue_sync,
    teardown_queue_sync,
  )
  .throughput(|cfg: &QueueBenchConfig| Throughput::Elements(cfg.total_items as u64))
  .run();
}

criterion_group!(benches, queue_sync_benches);
criterion_main!(benches);
