// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The push-based stream abstraction.
//!
//! An [`EventStream`] is a production rule: every subscription runs it afresh and receives
//! its own signals, except for hot sources such as [`Trigger`](crate::Trigger) and
//! [`AsyncSubject`](crate::AsyncSubject) that share one producer between subscribers.
//!
//! A single [`Subscription`] is threaded through the whole operator chain of one
//! subscription. Sources register their teardowns on it and check it before emitting.

use crate::observer::{BoxObserver, FnObserver, Observer, SafeObserver};
use rebound_core::{ReboundError, Subscription};
use std::sync::Arc;

/// A cold, re-subscribable, push-based sequence of values.
pub trait EventStream: Send + Sync + 'static {
    /// Type of the elements pushed to observers.
    type Item: Send + 'static;

    /// Attach `observer` to this stream for the lifetime of `subscription`.
    ///
    /// Operators call this on their upstream with an observer of their own and the same
    /// subscription. It never fails: setup only registers callbacks, any failure is
    /// delivered later through `on_error`.
    fn subscribe_with(&self, observer: BoxObserver<Self::Item>, subscription: Subscription);
}

/// Shared, type-erased event stream.
pub type BoxEventStream<T> = Arc<dyn EventStream<Item = T>>;

impl<S: EventStream + ?Sized> EventStream for Arc<S> {
    type Item = S::Item;

    fn subscribe_with(&self, observer: BoxObserver<Self::Item>, subscription: Subscription) {
        (**self).subscribe_with(observer, subscription);
    }
}

/// Extension trait providing subscription entry points for every [`EventStream`].
pub trait EventStreamExt: EventStream + Sized {
    /// Subscribe with three callbacks and return the handle that disposes the subscription.
    ///
    /// The callbacks see `on_next*` followed by at most one of `on_error`/`on_completed`.
    /// The subscription is disposed automatically after the terminal callback.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebound_stream::prelude::*;
    /// use std::sync::mpsc;
    ///
    /// let (tx, rx) = mpsc::channel();
    /// let subscription = just(21).map(|x| x * 2).subscribe(
    ///     move |value| tx.send(value).unwrap(),
    ///     |_| {},
    ///     || {},
    /// );
    ///
    /// assert_eq!(rx.try_recv().unwrap(), 42);
    /// assert!(subscription.is_disposed());
    /// ```
    fn subscribe<N, E, C>(&self, on_next: N, on_error: E, on_completed: C) -> Subscription
    where
        N: FnMut(Self::Item) + Send + 'static,
        E: FnMut(ReboundError) + Send + 'static,
        C: FnMut() + Send + 'static,
    {
        self.subscribe_observer(FnObserver::new(on_next, on_error, on_completed))
    }

    /// Subscribe with an [`Observer`] implementation.
    fn subscribe_observer<O>(&self, observer: O) -> Subscription
    where
        O: Observer<Self::Item>,
    {
        let subscription = Subscription::new();
        let safe = SafeObserver::new(Box::new(observer), subscription.clone());
        self.subscribe_with(Box::new(safe), subscription.clone());
        subscription
    }

    /// Erase the concrete type of this stream.
    fn boxed(self) -> BoxEventStream<Self::Item> {
        Arc::new(self)
    }
}

impl<S: EventStream> EventStreamExt for S {}
