// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Limit a stream to its first elements.

use crate::event_stream::EventStream;
use crate::observer::{BoxObserver, Observer};
use rebound_core::{ReboundError, Subscription};

/// Extension trait providing the [`take`](Self::take) operator.
pub trait TakeExt: EventStream + Sized {
    /// Emit at most `count` elements, then complete and dispose the upstream subscription.
    ///
    /// `take(0)` completes immediately without subscribing upstream.
    fn take(self, count: usize) -> Take<Self> {
        Take {
            source: self,
            count,
        }
    }
}

impl<S: EventStream> TakeExt for S {}

/// Stream returned by [`TakeExt::take`].
pub struct Take<S> {
    source: S,
    count: usize,
}

impl<S: EventStream> EventStream for Take<S> {
    type Item = S::Item;

    fn subscribe_with(&self, mut observer: BoxObserver<S::Item>, subscription: Subscription) {
        if self.count == 0 {
            observer.on_completed();
            subscription.dispose();
            return;
        }

        self.source.subscribe_with(
            Box::new(TakeObserver {
                downstream: observer,
                remaining: self.count,
                subscription: subscription.clone(),
            }),
            subscription,
        );
    }
}

struct TakeObserver<T> {
    downstream: BoxObserver<T>,
    remaining: usize,
    subscription: Subscription,
}

impl<T: Send + 'static> Observer<T> for TakeObserver<T> {
    fn on_next(&mut self, value: T) {
        if self.remaining == 0 {
            return;
        }
        self.remaining -= 1;
        self.downstream.on_next(value);

        if self.remaining == 0 {
            self.downstream.on_completed();
            self.subscription.dispose();
        }
    }

    fn on_error(&mut self, error: ReboundError) {
        if self.remaining > 0 {
            self.remaining = 0;
            self.downstream.on_error(error);
        }
    }

    fn on_completed(&mut self) {
        if self.remaining > 0 {
            self.remaining = 0;
            self.downstream.on_completed();
        }
    }
}
