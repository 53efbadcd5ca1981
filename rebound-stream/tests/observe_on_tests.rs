// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rebound_core::{AffinityScheduler, Completable, Dispatcher, ReboundError, SharedScheduler};
use rebound_stream::prelude::*;
use rebound_test_utils::{test_error, Recorder};
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(2);

fn scheduler(dispatcher: &Dispatcher) -> SharedScheduler {
    Arc::new(dispatcher.clone())
}

#[test]
fn test_observe_on_delivers_every_signal_on_scheduler() {
    let origin = Dispatcher::spawn("origin").unwrap();
    let recorder = Recorder::new();

    recorder.subscribe_to(&just(1).observe_on(scheduler(&origin)));

    assert!(recorder.wait_for(2, WAIT));
    assert_eq!(recorder.values(), vec![1]);
    assert_eq!(recorder.contexts(), vec![origin.context_id(); 2]);
    origin.shutdown();
}

#[test]
fn test_observe_on_preserves_order() {
    let origin = Dispatcher::spawn("origin").unwrap();
    let ticks = Trigger::new("ticks");
    let recorder = Recorder::new();
    let counter = Arc::new(std::sync::atomic::AtomicUsize::new(0));

    let counter_clone = counter.clone();
    recorder.subscribe_to(
        &ticks
            .stream()
            .map(move |()| counter_clone.fetch_add(1, std::sync::atomic::Ordering::SeqCst))
            .observe_on(scheduler(&origin)),
    );
    for _ in 0..50 {
        ticks.fire();
    }
    ticks.complete();

    assert!(recorder.wait_terminated(WAIT));
    assert_eq!(recorder.values(), (0..50).collect::<Vec<_>>());
    origin.shutdown();
}

#[test]
fn test_observe_on_forwards_errors() {
    let origin = Dispatcher::spawn("origin").unwrap();
    let recorder = Recorder::<i32>::new();

    recorder.subscribe_to(&fail::<i32>(test_error("upstream")).observe_on(scheduler(&origin)));

    assert!(recorder.wait_terminated(WAIT));
    assert_eq!(recorder.errors().len(), 1);
    assert_eq!(recorder.contexts(), vec![origin.context_id()]);
    origin.shutdown();
}

#[test]
fn test_observe_on_moves_pending_completion_back_to_origin() {
    let origin = Dispatcher::spawn("origin").unwrap();
    let worker = Dispatcher::spawn("worker").unwrap();
    let (completer, completable) = Completable::pending_on(Arc::new(worker.clone()));
    let recorder = Recorder::new();

    recorder.subscribe_to(
        &completable
            .to_stream(Reentry::Inline)
            .observe_on(scheduler(&origin)),
    );
    completer.resolve("resumed");

    assert!(recorder.wait_for(2, WAIT));
    assert_eq!(recorder.contexts(), vec![origin.context_id(); 2]);
    worker.shutdown();
    origin.shutdown();
}

#[test]
fn test_observe_on_unavailable_scheduler_errors_inline() {
    let origin = Dispatcher::spawn("origin").unwrap();
    origin.shutdown();
    let recorder = Recorder::new();

    recorder.subscribe_to(&just(1).observe_on(scheduler(&origin)));

    assert!(recorder.values().is_empty());
    let errors = recorder.errors();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ReboundError::SchedulerUnavailable { .. }));
}

#[test]
fn test_observe_on_drops_signals_after_dispose() {
    let origin = Dispatcher::spawn("origin").unwrap();
    let ticks = Trigger::new("ticks");
    let recorder = Recorder::new();

    let gate = origin.clone();
    let subscription = recorder.subscribe_to(&ticks.stream().observe_on(scheduler(&origin)));

    // Hold the dispatcher busy so the posted signal is still queued when we dispose
    let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
    gate.post(Box::new(move || {
        let _ = release_rx.recv();
    }))
    .unwrap();
    ticks.fire();
    subscription.dispose();
    release_tx.send(()).unwrap();
    origin.invoke(|| ()).unwrap();

    assert!(recorder.is_empty());
    origin.shutdown();
}
