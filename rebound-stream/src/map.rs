// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Element-wise transformation.

use crate::event_stream::EventStream;
use crate::observer::{BoxObserver, Observer};
use rebound_core::{ReboundError, Subscription};
use std::sync::Arc;

/// Extension trait providing the [`map`](Self::map) operator.
pub trait MapExt: EventStream + Sized {
    /// Apply `f` to every element, on the context the element arrives on.
    ///
    /// Errors and completion pass through unchanged.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Item) -> U + Send + Sync + 'static,
        U: Send + 'static,
    {
        Map {
            source: self,
            f: Arc::new(f),
        }
    }
}

impl<S: EventStream> MapExt for S {}

/// Stream returned by [`MapExt::map`].
pub struct Map<S, F> {
    source: S,
    f: Arc<F>,
}

impl<S, F, U> EventStream for Map<S, F>
where
    S: EventStream,
    F: Fn(S::Item) -> U + Send + Sync + 'static,
    U: Send + 'static,
{
    type Item = U;

    fn subscribe_with(&self, observer: BoxObserver<U>, subscription: Subscription) {
        self.source.subscribe_with(
            Box::new(MapObserver {
                downstream: observer,
                f: self.f.clone(),
            }),
            subscription,
        );
    }
}

struct MapObserver<U, F> {
    downstream: BoxObserver<U>,
    f: Arc<F>,
}

impl<T, U, F> Observer<T> for MapObserver<U, F>
where
    F: Fn(T) -> U + Send + Sync + 'static,
    U: Send + 'static,
{
    fn on_next(&mut self, value: T) {
        self.downstream.on_next((self.f)(value));
    }

    fn on_error(&mut self, error: ReboundError) {
        self.downstream.on_error(error);
    }

    fn on_completed(&mut self) {
        self.downstream.on_completed();
    }
}
