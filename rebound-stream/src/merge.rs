// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Merge of several streams into one.
//!
//! Signals from all branches are funnelled through one serializer, so the downstream
//! observer never sees concurrent or re-entrant calls even when the branches emit from
//! different contexts. Ordering between branches is whatever the race produces.

use crate::event_stream::{BoxEventStream, EventStream, EventStreamExt};
use crate::observer::{BoxObserver, Observer};
use crate::serialized::Serialized;
use rebound_core::{ReboundError, Subscription};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Extension trait providing the [`merge`](Self::merge) operator.
pub trait MergeExt: EventStream + Sized {
    /// Interleave the elements of `self` and `other`.
    ///
    /// Completes when both have completed. The first error from either side terminates the
    /// merged stream and everything after it is ignored.
    fn merge<O>(self, other: O) -> Merge<Self::Item>
    where
        O: EventStream<Item = Self::Item>,
    {
        merge_all(vec![self.boxed(), other.boxed()])
    }
}

impl<S: EventStream> MergeExt for S {}

/// Interleave the elements of every stream in `sources`.
///
/// Completes once all sources have completed; an empty list completes immediately.
pub fn merge_all<T: Send + 'static>(sources: Vec<BoxEventStream<T>>) -> Merge<T> {
    Merge { sources }
}

/// Stream returned by [`merge_all`] and [`MergeExt::merge`].
pub struct Merge<T> {
    sources: Vec<BoxEventStream<T>>,
}

impl<T: Send + 'static> EventStream for Merge<T> {
    type Item = T;

    fn subscribe_with(&self, mut observer: BoxObserver<T>, subscription: Subscription) {
        if self.sources.is_empty() {
            observer.on_completed();
            return;
        }

        let serialized = Serialized::new(observer);
        let active = Arc::new(AtomicUsize::new(self.sources.len()));

        for source in &self.sources {
            if subscription.is_disposed() {
                return;
            }
            source.subscribe_with(
                Box::new(MergeObserver {
                    serialized: serialized.clone(),
                    active: active.clone(),
                }),
                subscription.child(),
            );
        }
    }
}

struct MergeObserver<T> {
    serialized: Serialized<T>,
    active: Arc<AtomicUsize>,
}

impl<T: Send + 'static> Observer<T> for MergeObserver<T> {
    fn on_next(&mut self, value: T) {
        self.serialized.next(value);
    }

    fn on_error(&mut self, error: ReboundError) {
        self.serialized.error(error);
    }

    fn on_completed(&mut self) {
        if self.active.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.serialized.complete();
        }
    }
}
