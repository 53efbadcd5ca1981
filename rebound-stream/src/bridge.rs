// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Conversion of a [`Completable`] into an [`EventStream`] with explicit re-entry.
//!
//! The context a bridged emission runs on depends on two things: the [`Reentry`] policy and
//! whether the completable had already settled when the stream was subscribed.
//!
//! | Policy | Settled at subscribe time | Emission context |
//! |--------|---------------------------|------------------|
//! | `Inline` | yes | the subscribing context, before `subscribe` returns |
//! | `Inline` | no | whatever context the completable's continuation scheduler picks |
//! | `PostTo(s)` | either | `s` |
//!
//! The asymmetry of the `Inline` policy is intentional and observable: a pipeline that
//! only ever sees already-settled work never leaves its originating context, while the
//! same pipeline with pending work silently moves to another one.
//!
//! # Examples
//!
//! ```
//! use rebound_core::{Completable, ContextId};
//! use rebound_stream::prelude::*;
//! use std::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel();
//! let done = Completable::resolved("ready");
//!
//! done.to_stream(Reentry::Inline).subscribe(
//!     move |value| tx.send((value, ContextId::current())).unwrap(),
//!     |_| {},
//!     || {},
//! );
//!
//! // Delivered synchronously, on this very thread
//! assert_eq!(rx.try_recv().unwrap(), ("ready", ContextId::current()));
//! ```

use crate::async_subject::AsyncSubject;
use crate::current_context;
use crate::event_stream::EventStream;
use crate::observer::{slot, BoxObserver, ObserverSlot};
use rebound_core::{AffinityScheduler, Completable, Result, SharedScheduler, Subscription};

/// Where a bridged emission re-enters once the completable has settled.
#[derive(Clone)]
pub enum Reentry {
    /// No forced affinity: emit on whichever context observes the settlement.
    Inline,
    /// Always post the emission to the given scheduler.
    PostTo(SharedScheduler),
}

impl core::fmt::Debug for Reentry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Reentry::Inline => f.write_str("Inline"),
            Reentry::PostTo(scheduler) => f
                .debug_tuple("PostTo")
                .field(&scheduler.context_id())
                .finish(),
        }
    }
}

/// Bridge `completable` into a stream emitting its value once, then completing.
///
/// A failed completable yields a single error instead. Each subscription observes the same
/// completable; nothing is re-run.
pub fn bridge<T: Clone + Send + 'static>(
    completable: Completable<T>,
    reentry: Reentry,
) -> CompletableStream<T> {
    CompletableStream {
        completable,
        reentry,
    }
}

/// Stream returned by [`bridge`] and [`CompletableExt::to_stream`].
pub struct CompletableStream<T: Clone + Send + 'static> {
    completable: Completable<T>,
    reentry: Reentry,
}

impl<T: Clone + Send + 'static> EventStream for CompletableStream<T> {
    type Item = T;

    fn subscribe_with(&self, observer: BoxObserver<T>, subscription: Subscription) {
        if subscription.is_disposed() {
            return;
        }

        let observer = slot(observer);
        {
            let observer = observer.clone();
            subscription.add_teardown(move || {
                let released = observer.lock().take();
                drop(released);
            });
        }

        let emission = Emission {
            observer,
            subscription,
            reentry: self.reentry.clone(),
        };

        match self.completable.peek() {
            Some(result) => emission.run(result),
            None => self.completable.on_settled(move |result| emission.run(result)),
        }
    }
}

struct Emission<T> {
    observer: ObserverSlot<T>,
    subscription: Subscription,
    reentry: Reentry,
}

impl<T: Send + 'static> Emission<T> {
    fn run(self, result: Result<T>) {
        match &self.reentry {
            Reentry::Inline => emit(&self.observer, &self.subscription, result),
            Reentry::PostTo(scheduler) => {
                let observer = self.observer.clone();
                let subscription = self.subscription.clone();
                let posted =
                    scheduler.post(Box::new(move || emit(&observer, &subscription, result)));

                if let Err(error) = posted {
                    error!("Bridge could not re-enter its scheduler: {}", error);
                    emit(&self.observer, &self.subscription, Err(error));
                }
            }
        }
    }
}

fn emit<T: 'static>(
    observer: &ObserverSlot<T>,
    subscription: &Subscription,
    result: Result<T>,
) {
    if subscription.is_disposed() {
        debug!("Dropping bridged emission for a disposed subscriber");
        return;
    }
    let Some(mut observer) = observer.lock().take() else {
        return;
    };

    match result {
        Ok(value) => {
            observer.on_next(value);
            observer.on_completed();
        }
        Err(error) => observer.on_error(error),
    }
}

/// Extension trait turning completables into event streams.
pub trait CompletableExt<T: Clone + Send + 'static> {
    /// Bridge with the given re-entry policy. See [`bridge`].
    fn to_stream(&self, reentry: Reentry) -> CompletableStream<T>;

    /// Publish the outcome through an [`AsyncSubject`] without forcing any affinity.
    ///
    /// See [`to_stream_current_context`](crate::current_context::to_stream_current_context).
    fn to_stream_current_context(&self) -> AsyncSubject<T>;
}

impl<T: Clone + Send + 'static> CompletableExt<T> for Completable<T> {
    fn to_stream(&self, reentry: Reentry) -> CompletableStream<T> {
        bridge(self.clone(), reentry)
    }

    fn to_stream_current_context(&self) -> AsyncSubject<T> {
        current_context::to_stream_current_context(self)
    }
}
