// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Side-effect operator for observing elements without modifying them.

use crate::event_stream::EventStream;
use crate::observer::{BoxObserver, Observer};
use rebound_core::{ReboundError, Subscription};
use std::sync::Arc;

/// Extension trait providing the [`tap`](Self::tap) operator.
pub trait TapExt: EventStream + Sized {
    /// Invoke `f` with a reference to every element, then pass the element on unchanged.
    ///
    /// `f` runs on the context the element arrives on, which makes `tap` the natural place
    /// to record where a step executed. Errors pass through without calling `f`.
    fn tap<F>(self, f: F) -> Tap<Self, F>
    where
        F: Fn(&Self::Item) + Send + Sync + 'static,
    {
        Tap {
            source: self,
            f: Arc::new(f),
        }
    }
}

impl<S: EventStream> TapExt for S {}

/// Stream returned by [`TapExt::tap`].
pub struct Tap<S, F> {
    source: S,
    f: Arc<F>,
}

impl<S, F> EventStream for Tap<S, F>
where
    S: EventStream,
    F: Fn(&S::Item) + Send + Sync + 'static,
{
    type Item = S::Item;

    fn subscribe_with(&self, observer: BoxObserver<S::Item>, subscription: Subscription) {
        self.source.subscribe_with(
            Box::new(TapObserver {
                downstream: observer,
                f: self.f.clone(),
            }),
            subscription,
        );
    }
}

struct TapObserver<T, F> {
    downstream: BoxObserver<T>,
    f: Arc<F>,
}

impl<T, F> Observer<T> for TapObserver<T, F>
where
    T: Send + 'static,
    F: Fn(&T) + Send + Sync + 'static,
{
    fn on_next(&mut self, value: T) {
        (self.f)(&value);
        self.downstream.on_next(value);
    }

    fn on_error(&mut self, error: ReboundError) {
        self.downstream.on_error(error);
    }

    fn on_completed(&mut self) {
        self.downstream.on_completed();
    }
}
