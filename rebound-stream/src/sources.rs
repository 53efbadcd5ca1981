// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Streams with a fixed outcome.

use crate::event_stream::EventStream;
use crate::observer::BoxObserver;
use core::marker::PhantomData;
use rebound_core::{ReboundError, Subscription};

/// Emit `value` and complete, synchronously on the subscribing context.
pub fn just<T: Clone + Send + Sync + 'static>(value: T) -> Just<T> {
    Just { value }
}

/// Fail with `error`, synchronously on the subscribing context.
pub fn fail<T: Send + 'static>(error: ReboundError) -> Fail<T> {
    Fail {
        error,
        _marker: PhantomData,
    }
}

/// Complete without emitting anything.
pub fn empty<T: Send + 'static>() -> Empty<T> {
    Empty {
        _marker: PhantomData,
    }
}

/// Stream returned by [`just`].
pub struct Just<T> {
    value: T,
}

impl<T: Clone + Send + Sync + 'static> EventStream for Just<T> {
    type Item = T;

    fn subscribe_with(&self, mut observer: BoxObserver<T>, subscription: Subscription) {
        if subscription.is_disposed() {
            return;
        }
        observer.on_next(self.value.clone());
        if !subscription.is_disposed() {
            observer.on_completed();
        }
    }
}

/// Stream returned by [`fail`].
pub struct Fail<T> {
    error: ReboundError,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + 'static> EventStream for Fail<T> {
    type Item = T;

    fn subscribe_with(&self, mut observer: BoxObserver<T>, subscription: Subscription) {
        if !subscription.is_disposed() {
            observer.on_error(self.error.clone());
        }
    }
}

/// Stream returned by [`empty`].
pub struct Empty<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + 'static> EventStream for Empty<T> {
    type Item = T;

    fn subscribe_with(&self, mut observer: BoxObserver<T>, subscription: Subscription) {
        if !subscription.is_disposed() {
            observer.on_completed();
        }
    }
}
