// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Map each element to an inner stream and flatten the results.

use crate::event_stream::EventStream;
use crate::observer::{BoxObserver, Observer};
use crate::serialized::Serialized;
use rebound_core::{ReboundError, Subscription};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Extension trait providing the [`flat_map`](Self::flat_map) operator.
pub trait FlatMapExt: EventStream + Sized {
    /// For every element, subscribe to the stream returned by `f` and forward its elements.
    ///
    /// Inner streams run concurrently; their elements are serialized in arrival order. The
    /// result completes once the source and every inner stream have completed. The first
    /// error from any of them terminates the result.
    ///
    /// Each inner stream gets a child of the outer subscription, so an inner stream that
    /// ends early does not affect the others.
    fn flat_map<R, F>(self, f: F) -> FlatMap<Self, F>
    where
        F: Fn(Self::Item) -> R + Send + Sync + 'static,
        R: EventStream,
    {
        FlatMap {
            source: self,
            f: Arc::new(f),
        }
    }
}

impl<S: EventStream> FlatMapExt for S {}

/// Stream returned by [`FlatMapExt::flat_map`].
pub struct FlatMap<S, F> {
    source: S,
    f: Arc<F>,
}

impl<S, F, R> EventStream for FlatMap<S, F>
where
    S: EventStream,
    F: Fn(S::Item) -> R + Send + Sync + 'static,
    R: EventStream,
{
    type Item = R::Item;

    fn subscribe_with(&self, observer: BoxObserver<R::Item>, subscription: Subscription) {
        let serialized = Serialized::new(observer);
        // The outer source counts as one active producer until it completes.
        let active = Arc::new(AtomicUsize::new(1));

        self.source.subscribe_with(
            Box::new(OuterObserver {
                f: self.f.clone(),
                serialized,
                active,
                subscription: subscription.clone(),
            }),
            subscription,
        );
    }
}

struct OuterObserver<T, F> {
    f: Arc<F>,
    serialized: Serialized<T>,
    active: Arc<AtomicUsize>,
    subscription: Subscription,
}

impl<V, T, F, R> Observer<V> for OuterObserver<T, F>
where
    T: Send + 'static,
    F: Fn(V) -> R + Send + Sync + 'static,
    R: EventStream<Item = T>,
{
    fn on_next(&mut self, value: V) {
        if self.subscription.is_disposed() {
            return;
        }
        let inner = (self.f)(value);
        self.active.fetch_add(1, Ordering::AcqRel);
        inner.subscribe_with(
            Box::new(InnerObserver {
                serialized: self.serialized.clone(),
                active: self.active.clone(),
            }),
            self.subscription.child(),
        );
    }

    fn on_error(&mut self, error: ReboundError) {
        self.serialized.error(error);
    }

    fn on_completed(&mut self) {
        complete_one(&self.active, &self.serialized);
    }
}

struct InnerObserver<T> {
    serialized: Serialized<T>,
    active: Arc<AtomicUsize>,
}

impl<T: Send + 'static> Observer<T> for InnerObserver<T> {
    fn on_next(&mut self, value: T) {
        self.serialized.next(value);
    }

    fn on_error(&mut self, error: ReboundError) {
        self.serialized.error(error);
    }

    fn on_completed(&mut self) {
        complete_one(&self.active, &self.serialized);
    }
}

fn complete_one<T: Send + 'static>(active: &AtomicUsize, serialized: &Serialized<T>) {
    if active.fetch_sub(1, Ordering::AcqRel) == 1 {
        serialized.complete();
    }
}
