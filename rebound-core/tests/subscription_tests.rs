// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rebound_core::Subscription;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_new_subscription_not_disposed() {
    let subscription = Subscription::new();
    assert!(!subscription.is_disposed());
}

#[test]
fn test_dispose_is_idempotent_and_runs_teardown_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let subscription = Subscription::new();

    let calls_clone = calls.clone();
    subscription.add_teardown(move || {
        calls_clone.fetch_add(1, Ordering::SeqCst);
    });

    subscription.dispose();
    subscription.dispose();

    assert!(subscription.is_disposed());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_teardown_added_after_dispose_runs_immediately() {
    let calls = Arc::new(AtomicUsize::new(0));
    let subscription = Subscription::new();
    subscription.dispose();

    let calls_clone = calls.clone();
    subscription.add_teardown(move || {
        calls_clone.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_clones_share_state_but_separate_subscriptions_do_not() {
    let first = Subscription::new();
    let first_clone = first.clone();
    let second = Subscription::new();

    first_clone.dispose();

    assert!(first.is_disposed());
    assert!(!second.is_disposed());
}

#[tokio::test]
async fn test_disposed_resolves_immediately_if_already_disposed() {
    let subscription = Subscription::new();
    subscription.dispose();
    subscription.disposed().await;
}

#[tokio::test]
async fn test_disposed_waits_until_dispose() {
    let subscription = Subscription::new();
    let waiter = subscription.clone();

    let handle = tokio::spawn(async move {
        waiter.disposed().await;
        true
    });

    tokio::time::sleep(Duration::from_millis(10)).await;
    subscription.dispose();

    assert!(tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("waiter should wake")
        .expect("task should not panic"));
}

#[test]
fn test_child_disposed_with_parent() {
    let parent = Subscription::new();
    let child = parent.child();

    parent.dispose();

    assert!(child.is_disposed());
}

#[test]
fn test_child_dispose_leaves_parent_alive() {
    let parent = Subscription::new();
    let child = parent.child();
    let sibling = parent.child();

    child.dispose();

    assert!(!parent.is_disposed());
    assert!(!sibling.is_disposed());
}

#[test]
fn test_child_of_disposed_parent_starts_disposed() {
    let parent = Subscription::new();
    parent.dispose();

    assert!(parent.child().is_disposed());
}
