// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rebound_core::{ContextId, ReboundError, StreamItem};
use std::error::Error;
use std::io;
use std::sync::Arc;

#[test]
fn test_error_display() {
    let err = ReboundError::stream_error("processing failed");
    assert_eq!(err.to_string(), "Stream processing error: processing failed");

    let err = ReboundError::Abandoned;
    assert_eq!(err.to_string(), "Completable was abandoned before it settled");
}

#[test]
fn test_user_error_keeps_source() {
    let err = ReboundError::user_error(io::Error::other("disk on fire"));
    assert!(err.to_string().contains("disk on fire"));
    assert!(err.source().is_some());
}

#[test]
fn test_clone_shares_user_error() {
    let err = ReboundError::user_error(io::Error::other("boom"));
    let cloned = err.clone();

    match (&err, &cloned) {
        (ReboundError::UserError(a), ReboundError::UserError(b)) => assert!(Arc::ptr_eq(a, b)),
        _ => panic!("expected user errors"),
    }
}

#[test]
fn test_taxonomy_predicates() {
    let context_id = ContextId::current();

    assert!(ReboundError::stream_error("x").is_asynchronous_failure());
    assert!(ReboundError::user_error(io::Error::other("x")).is_asynchronous_failure());
    assert!(ReboundError::Abandoned.is_asynchronous_failure());
    assert!(!ReboundError::scheduler_unavailable(context_id).is_asynchronous_failure());

    assert!(ReboundError::scheduler_unavailable(context_id).is_scheduler_unavailable());
    assert!(!ReboundError::Abandoned.is_scheduler_unavailable());
}

#[test]
fn test_scheduler_unavailable_names_context() {
    let context_id = ContextId::current();
    let err = ReboundError::scheduler_unavailable(context_id);
    assert!(err.to_string().contains(&context_id.to_string()));
}

#[test]
fn test_stream_item_into_result() {
    let value: StreamItem<i32> = StreamItem::Value(42);
    assert_eq!(value.into_result().unwrap(), 42);

    let error: StreamItem<i32> = StreamItem::Error(ReboundError::Abandoned);
    assert!(matches!(error.into_result(), Err(ReboundError::Abandoned)));
}
