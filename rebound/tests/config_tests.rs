// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rebound::{ContinuationMode, DemoConfig};
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = DemoConfig::default();

    assert_eq!(config.dispatcher_name, "dispatcher");
    assert_eq!(config.worker_name, "worker");
    assert_eq!(config.pending_delay, Duration::from_millis(1));
    assert_eq!(config.continuations, ContinuationMode::Tokio);
}

#[test]
fn test_builders_override_fields() {
    let config = DemoConfig::default()
        .with_dispatcher_name("ui")
        .with_worker_name("pool")
        .with_pending_delay(Duration::from_millis(30))
        .with_continuations(ContinuationMode::Inline);

    assert_eq!(
        config,
        DemoConfig {
            dispatcher_name: "ui".to_string(),
            worker_name: "pool".to_string(),
            pending_delay: Duration::from_millis(30),
            continuations: ContinuationMode::Inline,
        }
    );
}
