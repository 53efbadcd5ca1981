// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-shot asynchronous results.
//!
//! A [`Completable<T>`] starts `Pending` and transitions exactly once, to a value or to an
//! error. It is settled through its unique [`Completer<T>`]; every other party only observes
//! it. Whether a completable has already settled when someone looks at it is the single bit
//! that decides which context a bridged emission runs on.
//!
//! Continuations registered while pending run through the completable's
//! [`ContinuationScheduler`](crate::ContinuationScheduler) once it settles.
//!
//! ```
//! use rebound_core::Completable;
//!
//! let (completer, completable) = Completable::<u32>::pending();
//! assert!(!completable.is_settled());
//!
//! completer.resolve(7);
//! assert_eq!(completable.peek().unwrap().unwrap(), 7);
//! ```

use crate::continuation::{Inline, SharedContinuations};
use crate::error::{ReboundError, Result};
use core::future::{Future, IntoFuture};
use core::pin::Pin;
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use futures::ready;
use parking_lot::Mutex;
use std::sync::Arc;

type Continuation<T> = Box<dyn FnOnce(Result<T>) + Send + 'static>;

enum State<T> {
    Pending(Vec<Continuation<T>>),
    Settled(Result<T>),
}

struct Shared<T: Clone + Send + 'static> {
    state: Mutex<State<T>>,
    settled: Event,
    continuations: SharedContinuations,
}

impl<T: Clone + Send + 'static> Shared<T> {
    fn settle(&self, result: Result<T>) -> bool {
        let waiters = {
            let mut state = self.state.lock();
            let waiters = match &mut *state {
                State::Settled(_) => return false,
                State::Pending(waiters) => core::mem::take(waiters),
            };
            *state = State::Settled(result.clone());
            waiters
        };

        self.settled.notify(usize::MAX);

        for waiter in waiters {
            let result = result.clone();
            self.continuations.schedule(Box::new(move || waiter(result)));
        }
        true
    }
}

/// A one-shot asynchronous computation that resolves to a value or an error.
///
/// Cloning yields another observer of the same computation.
pub struct Completable<T: Clone + Send + 'static> {
    shared: Arc<Shared<T>>,
}

impl<T: Clone + Send + 'static> Clone for Completable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Completable<T> {
    fn with_state(state: State<T>, continuations: SharedContinuations) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                settled: Event::new(),
                continuations,
            }),
        }
    }

    /// Create a pending completable whose continuations run inline on the settling context.
    #[must_use]
    pub fn pending() -> (Completer<T>, Self) {
        Self::pending_on(Arc::new(Inline))
    }

    /// Create a pending completable whose continuations run through `continuations`.
    #[must_use]
    pub fn pending_on(continuations: SharedContinuations) -> (Completer<T>, Self) {
        let completable = Self::with_state(State::Pending(Vec::new()), continuations);
        let completer = Completer {
            shared: Some(completable.shared.clone()),
        };
        (completer, completable)
    }

    /// Create a completable that is already resolved with `value`.
    pub fn resolved(value: T) -> Self {
        Self::from_result(Ok(value))
    }

    /// Create a completable that has already failed with `error`.
    pub fn failed(error: ReboundError) -> Self {
        Self::from_result(Err(error))
    }

    /// Create an already settled completable.
    pub fn from_result(result: Result<T>) -> Self {
        Self::with_state(State::Settled(result), Arc::new(Inline))
    }

    /// Returns `true` once the completable has left the pending state.
    pub fn is_settled(&self) -> bool {
        matches!(*self.shared.state.lock(), State::Settled(_))
    }

    /// Returns the outcome if the completable has settled.
    pub fn peek(&self) -> Option<Result<T>> {
        match &*self.shared.state.lock() {
            State::Settled(result) => Some(result.clone()),
            State::Pending(_) => None,
        }
    }

    /// Register `f` to run with the outcome.
    ///
    /// `f` always runs through the continuation scheduler, even when the completable has
    /// already settled; it never runs on the registering call stack unless that scheduler
    /// is [`Inline`].
    pub fn on_settled<F>(&self, f: F)
    where
        F: FnOnce(Result<T>) + Send + 'static,
    {
        let result = {
            let mut state = self.shared.state.lock();
            match &mut *state {
                State::Pending(waiters) => {
                    waiters.push(Box::new(f));
                    return;
                }
                State::Settled(result) => result.clone(),
            }
        };
        self.shared
            .continuations
            .schedule(Box::new(move || f(result)));
    }

    /// Chain a synchronous step after this completable.
    ///
    /// If this completable has already settled, `f` runs right away on the calling context
    /// and the returned completable is already settled. Otherwise `f` runs as a continuation.
    /// Errors skip `f`.
    pub fn map<U, F>(&self, f: F) -> Completable<U>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let continuations = self.shared.continuations.clone();
        match self.peek() {
            Some(result) => Completable::with_state(State::Settled(result.map(f)), continuations),
            None => {
                let (completer, mapped) = Completable::pending_on(continuations);
                self.on_settled(move |result| {
                    completer.settle(result.map(f));
                });
                mapped
            }
        }
    }

    /// A future that resolves with the outcome.
    pub fn settled(&self) -> Settled<T> {
        Settled {
            completable: self.clone(),
            listener: None,
        }
    }

    /// Run `future` on a tokio runtime and expose its outcome as a completable.
    #[cfg(feature = "runtime-tokio")]
    pub fn spawn_on<F>(
        handle: &tokio::runtime::Handle,
        continuations: SharedContinuations,
        future: F,
    ) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let (completer, completable) = Self::pending_on(continuations);
        handle.spawn(async move {
            completer.settle(future.await);
        });
        completable
    }
}

impl<T: Clone + Send + 'static> IntoFuture for Completable<T> {
    type Output = Result<T>;
    type IntoFuture = Settled<T>;

    fn into_future(self) -> Self::IntoFuture {
        Settled {
            completable: self,
            listener: None,
        }
    }
}

impl<T: Clone + Send + 'static> core::fmt::Debug for Completable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Completable")
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// The only handle able to settle a pending [`Completable`].
///
/// Dropping a completer that has not settled its completable fails it with
/// [`ReboundError::Abandoned`], so observers never wait forever.
pub struct Completer<T: Clone + Send + 'static> {
    shared: Option<Arc<Shared<T>>>,
}

impl<T: Clone + Send + 'static> Completer<T> {
    /// Resolve the completable with `value`.
    pub fn resolve(self, value: T) {
        self.settle(Ok(value));
    }

    /// Fail the completable with `error`.
    pub fn fail(self, error: ReboundError) {
        self.settle(Err(error));
    }

    /// Settle the completable with `result`.
    pub fn settle(mut self, result: Result<T>) {
        if let Some(shared) = self.shared.take() {
            shared.settle(result);
        }
    }
}

impl<T: Clone + Send + 'static> Drop for Completer<T> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.take() {
            shared.settle(Err(ReboundError::Abandoned));
        }
    }
}

/// Future returned by [`Completable::settled()`]; resolves with the outcome.
pub struct Settled<T: Clone + Send + 'static> {
    completable: Completable<T>,
    listener: Option<EventListener>,
}

impl<T: Clone + Send + 'static> Future for Settled<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        loop {
            if let Some(result) = this.completable.peek() {
                return Poll::Ready(result);
            }

            match this.listener.as_mut() {
                // Register, then check again before sleeping: a settle between the
                // first check and `listen()` would otherwise be missed.
                None => this.listener = Some(this.completable.shared.settled.listen()),
                Some(listener) => {
                    ready!(Pin::new(listener).poll(cx));
                    this.listener = None;
                }
            }
        }
    }
}
