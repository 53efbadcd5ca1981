// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rebound::StartWork;
use rebound_core::{ContextId, Dispatcher, ReboundError};
use rebound_stream::prelude::*;
use rebound_test_utils::{test_error, Event, ManualWork, Recorder, TestError};
use std::error::Error;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_manual_work_settles_in_fifo_order() {
    // Arrange
    let work = ManualWork::new();
    let first = work.start_work(false);
    let second = work.start_work(false);

    // Act
    assert!(work.settle_next());

    // Assert
    assert!(first.is_settled());
    assert!(!second.is_settled());
    assert_eq!(work.pending_count(), 1);
    assert_eq!(work.settle_all(), 1);
    assert!(!work.settle_next());
    assert_eq!(work.started_count(), 2);
}

#[test]
fn test_manual_work_already_completed_never_queues() {
    let work = ManualWork::default();

    let done = work.start_work(true);

    assert!(done.is_settled());
    assert_eq!(work.pending_count(), 0);
    assert_eq!(work.started_count(), 1);
}

#[test]
fn test_manual_work_failure_reaches_stream() {
    // Arrange
    let work = ManualWork::new();
    let recorder = Recorder::<()>::new();
    recorder.subscribe_to(&work.start_work(false).to_stream(Reentry::Inline));

    // Act
    assert!(work.fail_next(test_error("nope")));

    // Assert
    let errors = recorder.errors();
    assert!(matches!(errors.as_slice(), [ReboundError::UserError(_)]));
    assert!(!work.fail_next(test_error("nothing left")));
}

#[test]
fn test_manual_work_with_continuations_resumes_there() {
    // Arrange
    let worker = Dispatcher::spawn("continuations").unwrap();
    let work = ManualWork::with_continuations(Arc::new(worker.clone()));
    let recorder = Recorder::new();
    recorder.subscribe_to(&work.start_work(false).to_stream(Reentry::Inline));

    // Act
    work.settle_next();

    // Assert
    assert!(recorder.wait_terminated(Duration::from_secs(2)));
    assert!(recorder
        .contexts()
        .iter()
        .all(|context| *context != ContextId::current()));
    worker.shutdown();
}

#[test]
fn test_recorder_waits_for_signals_from_other_threads() {
    // Arrange
    let recorder = Recorder::new();
    let trigger = Trigger::new("tick");
    recorder.subscribe_to(&trigger.stream());
    let remote = trigger.clone();

    // Act
    let fired_on = thread::spawn(move || {
        remote.fire();
        remote.complete();
        ContextId::current()
    })
    .join()
    .unwrap();

    // Assert
    assert!(recorder.wait_for(2, Duration::from_secs(1)));
    assert_eq!(recorder.values(), vec![()]);
    assert_eq!(recorder.terminal_count(), 1);
    assert!(recorder.is_terminated());
    assert_eq!(recorder.contexts(), vec![fired_on; 2]);
    assert!(matches!(recorder.events()[1].event, Event::Completed));
}

#[test]
fn test_recorder_wait_times_out() {
    let recorder = Recorder::<i32>::new();

    assert!(!recorder.wait_for(1, Duration::from_millis(20)));
    assert!(!recorder.wait_terminated(Duration::from_millis(20)));
    assert!(recorder.is_empty());
}

#[test]
fn test_test_error_is_shared_user_error() {
    let error = test_error("boom");

    assert_eq!(error.to_string(), "User error: test failure: boom");
    assert!(error.source().is_some());
    match error {
        ReboundError::UserError(inner) => {
            assert_eq!(inner.downcast_ref::<TestError>(), Some(&TestError("boom".to_string())));
        }
        other => panic!("expected a user error, got {other:?}"),
    }
}
