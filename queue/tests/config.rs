use fibre_queue::{BlockingQueue, BuildError, Capacity, QueueBuilder, QueueConfig};

#[test]
fn builds_from_json_config() {
  let config: QueueConfig =
    serde_json::from_str(r#"{ "capacity": 16, "name": "telemetry" }"#).unwrap();
  let queue: BlockingQueue<u64> = QueueBuilder::from_config(&config).build().unwrap();

  assert_eq!(queue.capacity().limit(), Some(16));
  assert_eq!(queue.name(), Some("telemetry"));
}

#[test]
fn missing_capacity_means_unbounded() {
  let config: QueueConfig = serde_json::from_str("{}").unwrap();
  assert_eq!(config, QueueConfig::default());
  let queue: BlockingQueue<u64> = QueueBuilder::from_config(&config).build().unwrap();
  assert_eq!(queue.capacity(), Capacity::Unbounded);
}

#[test]
fn zero_capacity_in_config_is_rejected() {
  let config: QueueConfig = serde_json::from_str(r#"{ "capacity": 0 }"#).unwrap();
  let err = QueueBuilder::<u64>::from_config(&config).build().unwrap_err();
  assert_eq!(err, BuildError::ZeroCapacity);
}

#[test]
fn unknown_fields_are_rejected() {
  assert!(serde_json::from_str::<QueueConfig>(r#"{ "capacty": 4 }"#).is_err());
}

#[test]
fn capacity_serde_shape() {
  let bounded = Capacity::bounded(4).unwrap();
  assert_eq!(serde_json::to_string(&bounded).unwrap(), r#"{"bounded":4}"#);
  assert_eq!(serde_json::to_string(&Capacity::Unbounded).unwrap(), r#""unbounded""#);
  let back: Capacity = serde_json::from_str(r#"{"bounded":4}"#).unwrap();
  assert_eq!(back, bounded);
  assert!(serde_json::from_str::<Capacity>(r#"{"bounded":0}"#).is_err());
}
