// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rebound_core::ReboundError;
use rebound_stream::prelude::*;
use rebound_test_utils::{test_error, Recorder};

#[test]
fn test_subject_emits_last_value_on_complete() {
    let subject = AsyncSubject::new();
    let recorder = Recorder::new();

    recorder.subscribe_to(&subject);
    subject.next(1);
    subject.next(2);
    assert!(recorder.is_empty());

    subject.complete();

    assert_eq!(recorder.values(), vec![2]);
    assert!(recorder.is_completed());
    assert!(subject.is_terminated());
}

#[test]
fn test_subject_replays_to_late_subscribers() {
    let subject = AsyncSubject::new();
    subject.next("value");
    subject.complete();

    let first = Recorder::new();
    let second = Recorder::new();
    first.subscribe_to(&subject);
    second.subscribe_to(&subject);

    assert_eq!(first.values(), vec!["value"]);
    assert_eq!(second.values(), vec!["value"]);
    assert_eq!(subject.subscriber_count(), 0);
}

#[test]
fn test_subject_completes_empty_without_value() {
    let subject = AsyncSubject::<u8>::new();
    let recorder = Recorder::new();

    recorder.subscribe_to(&subject);
    subject.complete();

    assert!(recorder.values().is_empty());
    assert!(recorder.is_completed());
}

#[test]
fn test_subject_error_replays_and_discards_value() {
    let subject = AsyncSubject::new();
    let early = Recorder::<i32>::new();
    early.subscribe_to(&subject);

    subject.next(1);
    subject.error(test_error("subject"));
    subject.next(2);
    subject.complete();

    let late = Recorder::<i32>::new();
    late.subscribe_to(&subject);

    for recorder in [&early, &late] {
        assert!(recorder.values().is_empty());
        assert_eq!(recorder.errors().len(), 1);
        assert_eq!(recorder.terminal_count(), 1);
    }
}

#[test]
fn test_subject_ignores_signals_after_termination() {
    let subject = AsyncSubject::new();
    subject.next(1);
    subject.complete();
    subject.next(5);
    subject.error(ReboundError::Abandoned);

    let recorder = Recorder::new();
    recorder.subscribe_to(&subject);

    assert_eq!(recorder.values(), vec![1]);
    assert!(recorder.is_completed());
}

#[test]
fn test_disposed_subscriber_is_removed() {
    let subject = AsyncSubject::new();
    let recorder = Recorder::new();

    let subscription = recorder.subscribe_to(&subject);
    assert_eq!(subject.subscriber_count(), 1);

    subscription.dispose();
    assert_eq!(subject.subscriber_count(), 0);

    subject.next(1);
    subject.complete();
    assert!(recorder.is_empty());
}
