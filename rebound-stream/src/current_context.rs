// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Publish a completable's outcome from wherever it is observed.
//!
//! Settlement is checked on the calling context. Work that has already settled is published
//! right away, on the caller; pending work is waited for through the completable's
//! continuation scheduler and published from there. The outcome lands in an
//! [`AsyncSubject`], so every subscriber, however late, sees the same single result.

use crate::async_subject::AsyncSubject;
use rebound_core::{Completable, Result};

/// Convert `completable` into a replaying single-shot stream.
///
/// The wait starts immediately, not on subscription.
pub fn to_stream_current_context<T: Clone + Send + 'static>(
    completable: &Completable<T>,
) -> AsyncSubject<T> {
    let subject = AsyncSubject::new();

    match completable.peek() {
        Some(result) => publish(&subject, result),
        None => {
            let subject = subject.clone();
            completable.on_settled(move |result| publish(&subject, result));
        }
    }

    subject
}

fn publish<T: Clone + Send + 'static>(subject: &AsyncSubject<T>, result: Result<T>) {
    match result {
        Ok(value) => {
            subject.next(value);
            subject.complete();
        }
        Err(error) => subject.error(error),
    }
}
