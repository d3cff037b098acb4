// examples/pipeline.rs
use fibre_queue::{BlockingQueue, PopError};
use std::{
  sync::atomic::{AtomicUsize, Ordering},
  sync::Arc,
  thread,
  time::Duration,
};

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  println!("--- Overwriting queue: only the freshest readings survive ---");
  {
    let readings = BlockingQueue::builder()
      .capacity(3)
      .name("readings")
      .build()
      .expect("capacity is non-zero");
    for sample in 0..10u32 {
      readings.push(sample);
    }
    println!("Kept: {:?}", readings.pop_range(usize::MAX));
    println!("{}", readings.stats());
  }

  println!("\n--- Worker pool with cooperative wake-up ---");
  {
    let jobs = Arc::new(BlockingQueue::<String>::new());
    let processed = Arc::new(AtomicUsize::new(0));
    let num_workers = 3;

    let workers: Vec<_> = (0..num_workers)
      .map(|id| {
        let jobs = Arc::clone(&jobs);
        let processed = Arc::clone(&processed);
        thread::spawn(move || loop {
          match jobs.pop() {
            Ok(job) => {
              println!("[Worker {}] Processing: {}", id, job);
              processed.fetch_add(1, Ordering::Relaxed);
            }
            Err(PopError::Cancelled) => {
              println!("[Worker {}] Woken without a job, exiting.", id);
              break;
            }
            Err(PopError::Closed) => {
              println!("[Worker {}] Queue closed, exiting.", id);
              break;
            }
          }
        })
      })
      .collect();

    for j in 0..6 {
      jobs.push(format!("job-{}", j));
      thread::sleep(Duration::from_millis(5));
    }

    // Let the workers drain, then release one of them individually and the rest by closing.
    while !jobs.is_empty() {
      thread::sleep(Duration::from_millis(5));
    }
    jobs.wake_up_blocked();
    jobs.close().expect("closed once");

    for handle in workers {
      handle.join().unwrap();
    }
    println!("Processed {} jobs.", processed.load(Ordering::Relaxed));
  }
}
