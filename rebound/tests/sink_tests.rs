// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rebound::{LogBuffer, Sink};
use rebound_core::{AffinityScheduler, ContextId, Dispatcher, SharedScheduler};
use rebound_stream::prelude::*;
use rebound_test_utils::test_error;
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(2);

fn origin() -> (Dispatcher, SharedScheduler) {
    let dispatcher = Dispatcher::spawn("origin").unwrap();
    let scheduler: SharedScheduler = Arc::new(dispatcher.clone());
    (dispatcher, scheduler)
}

#[test]
fn test_renders_one_block_per_element_on_origin() {
    // Arrange
    let (dispatcher, scheduler) = origin();
    let log = LogBuffer::new(dispatcher.context_id());
    let sink = Sink::new(log.clone());
    let trigger = Trigger::new("render");
    let _subscription = sink.attach(trigger.stream(), scheduler);

    // Act
    log.append("one");
    trigger.fire();
    assert!(sink.wait_for_blocks(1, WAIT));
    log.append("two");
    log.append("three");
    trigger.fire();

    // Assert
    assert!(sink.wait_for_blocks(2, WAIT));
    let blocks = sink.blocks();
    assert_eq!(blocks[0].lines.len(), 1);
    assert_eq!(blocks[1].lines.len(), 2);
    assert_eq!(
        sink.text(),
        format!(
            "ThreadId: {id}- one \nThreadId: {id}- two \nThreadId: {id}- three \n",
            id = ContextId::current()
        )
    );
    dispatcher.shutdown();
}

#[test]
fn test_empty_log_renders_empty_block() {
    // Arrange
    let (dispatcher, scheduler) = origin();
    let sink = Sink::new(LogBuffer::new(dispatcher.context_id()));

    // Act
    let _subscription = sink.attach(just(()), scheduler);

    // Assert
    assert!(sink.wait_for_blocks(1, WAIT));
    assert_eq!(sink.blocks()[0].text, "");
    dispatcher.shutdown();
}

#[test]
fn test_stream_error_is_recorded() {
    // Arrange
    let (dispatcher, scheduler) = origin();
    let sink = Sink::new(LogBuffer::new(dispatcher.context_id()));

    // Act
    let _subscription = sink.attach(fail::<()>(test_error("upstream")), scheduler);

    // Assert
    assert!(!sink.wait_for_blocks(1, WAIT));
    assert!(sink.failure().is_some_and(|error| error.is_asynchronous_failure()));
    assert_eq!(sink.block_count(), 0);
    dispatcher.shutdown();
}

#[test]
fn test_flush_on_wrong_origin_is_recorded() {
    // Arrange
    let (dispatcher, scheduler) = origin();
    let log = LogBuffer::new(ContextId::current());
    let sink = Sink::new(log.clone());
    log.append("kept");

    // Act
    let _subscription = sink.attach(just(()), scheduler);

    // Assert
    assert!(!sink.wait_for_blocks(1, WAIT));
    assert!(sink.failure().is_some());
    assert_eq!(log.len(), 1);
    dispatcher.shutdown();
}

#[test]
fn test_disposed_sink_stops_rendering() {
    // Arrange
    let (dispatcher, scheduler) = origin();
    let sink = Sink::new(LogBuffer::new(dispatcher.context_id()));
    let trigger = Trigger::new("render");
    let subscription = sink.attach(trigger.stream(), scheduler);

    // Act
    subscription.dispose();
    trigger.fire();

    // Assert
    assert!(!sink.wait_for_blocks(1, Duration::from_millis(50)));
    assert_eq!(trigger.subscriber_count(), 0);
    dispatcher.shutdown();
}

#[test]
fn test_reattach_clears_failure_and_renders_again() {
    // Arrange
    let (dispatcher, scheduler) = origin();
    let sink = Sink::new(LogBuffer::new(dispatcher.context_id()));
    let _failed = sink.attach(fail::<()>(test_error("upstream")), scheduler.clone());
    assert!(!sink.wait_for_blocks(1, WAIT));
    assert!(sink.failure().is_some());

    // Act
    let _subscription = sink.attach(just(()), scheduler);

    // Assert
    assert!(sink.wait_for_blocks(1, WAIT));
    assert!(sink.failure().is_none());
    dispatcher.shutdown();
}
