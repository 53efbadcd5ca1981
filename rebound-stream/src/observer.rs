// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Push-side consumers of event streams.

use parking_lot::Mutex;
use rebound_core::{ReboundError, Subscription};
use std::sync::Arc;

/// Receiver of the signals of one subscription.
///
/// A well-behaved source calls `on_next` any number of times followed by at most one of
/// `on_error` or `on_completed`, never concurrently.
pub trait Observer<T>: Send + 'static {
    /// A new element.
    fn on_next(&mut self, value: T);

    /// The sequence failed. Terminal.
    fn on_error(&mut self, error: ReboundError);

    /// The sequence finished. Terminal.
    fn on_completed(&mut self);
}

/// Type-erased observer.
pub type BoxObserver<T> = Box<dyn Observer<T>>;

/// An observer parked where a deferred callback can reach it, or cleared by a teardown.
pub(crate) type ObserverSlot<T> = Arc<Mutex<Option<BoxObserver<T>>>>;

pub(crate) fn slot<T: 'static>(observer: BoxObserver<T>) -> ObserverSlot<T> {
    Arc::new(Mutex::new(Some(observer)))
}

impl<T, O: Observer<T> + ?Sized> Observer<T> for Box<O> {
    fn on_next(&mut self, value: T) {
        (**self).on_next(value);
    }

    fn on_error(&mut self, error: ReboundError) {
        (**self).on_error(error);
    }

    fn on_completed(&mut self) {
        (**self).on_completed();
    }
}

/// Observer built from three closures.
pub struct FnObserver<N, E, C> {
    on_next: N,
    on_error: E,
    on_completed: C,
}

impl<N, E, C> FnObserver<N, E, C> {
    pub fn new(on_next: N, on_error: E, on_completed: C) -> Self {
        Self {
            on_next,
            on_error,
            on_completed,
        }
    }
}

impl<T, N, E, C> Observer<T> for FnObserver<N, E, C>
where
    N: FnMut(T) + Send + 'static,
    E: FnMut(ReboundError) + Send + 'static,
    C: FnMut() + Send + 'static,
{
    fn on_next(&mut self, value: T) {
        (self.on_next)(value);
    }

    fn on_error(&mut self, error: ReboundError) {
        (self.on_error)(error);
    }

    fn on_completed(&mut self) {
        (self.on_completed)();
    }
}

/// Terminal wrapper installed by [`subscribe`](crate::EventStreamExt::subscribe).
///
/// Enforces the signal grammar for the user's observer: nothing after a terminal signal and
/// nothing once the subscription is disposed. Disposes the subscription after delivering the
/// terminal signal.
pub(crate) struct SafeObserver<T> {
    inner: BoxObserver<T>,
    subscription: Subscription,
    done: bool,
}

impl<T> SafeObserver<T> {
    pub(crate) fn new(inner: BoxObserver<T>, subscription: Subscription) -> Self {
        Self {
            inner,
            subscription,
            done: false,
        }
    }

    fn is_closed(&self) -> bool {
        self.done || self.subscription.is_disposed()
    }
}

impl<T: 'static> Observer<T> for SafeObserver<T> {
    fn on_next(&mut self, value: T) {
        if self.is_closed() {
            return;
        }
        self.inner.on_next(value);
    }

    fn on_error(&mut self, error: ReboundError) {
        if self.is_closed() {
            debug!("Dropping error for closed subscriber: {}", error);
            return;
        }
        self.done = true;
        self.inner.on_error(error);
        self.subscription.dispose();
    }

    fn on_completed(&mut self) {
        if self.is_closed() {
            return;
        }
        self.done = true;
        self.inner.on_completed();
        self.subscription.dispose();
    }
}
