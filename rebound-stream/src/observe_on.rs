// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Re-post every signal onto an affinity scheduler.

use crate::event_stream::EventStream;
use crate::observer::{slot, BoxObserver, Observer, ObserverSlot};
use rebound_core::{AffinityScheduler, ReboundError, SharedScheduler, Subscription};

/// Extension trait providing the [`observe_on`](Self::observe_on) operator.
pub trait ObserveOnExt: EventStream + Sized {
    /// Deliver every downstream signal on `scheduler`'s context.
    ///
    /// Signals keep their order because posts to one scheduler run in FIFO order. If the
    /// scheduler has been torn down, the failed post is logged and the stream terminates
    /// with [`ReboundError::SchedulerUnavailable`] on the current context.
    fn observe_on(self, scheduler: SharedScheduler) -> ObserveOn<Self> {
        ObserveOn {
            source: self,
            scheduler,
        }
    }
}

impl<S: EventStream> ObserveOnExt for S {}

/// Stream returned by [`ObserveOnExt::observe_on`].
pub struct ObserveOn<S> {
    source: S,
    scheduler: SharedScheduler,
}

impl<S: EventStream> EventStream for ObserveOn<S> {
    type Item = S::Item;

    fn subscribe_with(&self, observer: BoxObserver<S::Item>, subscription: Subscription) {
        let downstream = slot(observer);
        {
            let downstream = downstream.clone();
            subscription.add_teardown(move || {
                let released = downstream.lock().take();
                drop(released);
            });
        }

        self.source.subscribe_with(
            Box::new(ObserveOnObserver {
                downstream,
                scheduler: self.scheduler.clone(),
                subscription: subscription.clone(),
            }),
            subscription,
        );
    }
}

enum Signal<T> {
    Next(T),
    Error(ReboundError),
    Completed,
}

struct ObserveOnObserver<T> {
    downstream: ObserverSlot<T>,
    scheduler: SharedScheduler,
    subscription: Subscription,
}

impl<T: Send + 'static> ObserveOnObserver<T> {
    fn schedule(&self, signal: Signal<T>) {
        let downstream = self.downstream.clone();
        let subscription = self.subscription.clone();

        let posted = self
            .scheduler
            .post(Box::new(move || deliver(&downstream, &subscription, signal)));

        if let Err(error) = posted {
            error!("observe_on: {}", error);
            deliver(&self.downstream, &self.subscription, Signal::Error(error));
        }
    }
}

fn deliver<T: 'static>(
    downstream: &ObserverSlot<T>,
    subscription: &Subscription,
    signal: Signal<T>,
) {
    if subscription.is_disposed() {
        return;
    }
    // Taken out for the call so a synchronous dispose can run the teardown without
    // deadlocking on the slot.
    let Some(mut observer) = downstream.lock().take() else {
        return;
    };

    match signal {
        Signal::Next(value) => {
            observer.on_next(value);
            if !subscription.is_disposed() {
                *downstream.lock() = Some(observer);
            }
        }
        Signal::Error(error) => observer.on_error(error),
        Signal::Completed => observer.on_completed(),
    }
}

impl<T: Send + 'static> Observer<T> for ObserveOnObserver<T> {
    fn on_next(&mut self, value: T) {
        self.schedule(Signal::Next(value));
    }

    fn on_error(&mut self, error: ReboundError) {
        self.schedule(Signal::Error(error));
    }

    fn on_completed(&mut self) {
        self.schedule(Signal::Completed);
    }
}
