// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rebound_stream::prelude::*;
use rebound_test_utils::Recorder;

#[test]
fn test_fire_invokes_every_subscriber() {
    let trigger = Trigger::new("button");
    let first = Recorder::new();
    let second = Recorder::new();

    first.subscribe_to(&trigger.stream());
    second.subscribe_to(&trigger.stream());

    assert_eq!(trigger.fire(), 2);
    assert_eq!(first.values().len(), 1);
    assert_eq!(second.values().len(), 1);
}

#[test]
fn test_fire_without_subscribers_is_noop() {
    let trigger = Trigger::new("button");
    assert_eq!(trigger.fire(), 0);
    assert_eq!(trigger.name(), "button");
}

#[test]
fn test_no_replay_for_late_subscribers() {
    let trigger = Trigger::new("button");
    trigger.fire();

    let recorder = Recorder::new();
    recorder.subscribe_to(&trigger.stream());

    assert!(recorder.is_empty());
}

#[test]
fn test_dispose_unregisters_subscriber() {
    let trigger = Trigger::new("button");
    let recorder = Recorder::new();

    let subscription = recorder.subscribe_to(&trigger.stream());
    assert_eq!(trigger.subscriber_count(), 1);

    subscription.dispose();
    assert_eq!(trigger.subscriber_count(), 0);
    assert_eq!(trigger.fire(), 0);
    assert!(recorder.is_empty());
}

#[test]
fn test_complete_ends_subscribers_and_rejects_new_ones() {
    let trigger = Trigger::new("button");
    let before = Recorder::new();
    before.subscribe_to(&trigger.stream());

    trigger.complete();
    let after = Recorder::new();
    after.subscribe_to(&trigger.stream());

    assert!(before.is_completed());
    assert!(after.is_completed());
    assert_eq!(trigger.fire(), 0);
}

#[test]
fn test_subscriber_can_dispose_itself_while_firing() {
    let trigger = Trigger::new("button");
    let recorder = Recorder::new();

    let subscription = recorder.subscribe_to(&trigger.stream().take(1));
    trigger.fire();

    assert!(subscription.is_disposed());
    assert_eq!(trigger.subscriber_count(), 0);
    assert_eq!(recorder.values().len(), 1);
}
