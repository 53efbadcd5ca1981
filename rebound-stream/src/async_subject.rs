// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Single-shot subject that replays its final outcome.

use crate::event_stream::EventStream;
use crate::observer::BoxObserver;
use parking_lot::Mutex;
use rebound_core::{ReboundError, Result, Subscription};
use std::sync::Arc;

struct Entry<T> {
    id: u64,
    observer: BoxObserver<T>,
    subscription: Subscription,
}

struct SubjectState<T> {
    next_id: u64,
    last: Option<T>,
    outcome: Option<Result<Option<T>>>,
    observers: Vec<Entry<T>>,
}

/// A hot subject that remembers only its final outcome.
///
/// Values pushed with [`next`](Self::next) are held back; only the last one is emitted, and
/// only once the subject completes. After termination every subscriber, early or late,
/// receives the same outcome: the last value followed by completion, or the error.
///
/// ```
/// use rebound_stream::prelude::*;
/// use std::sync::mpsc;
///
/// let subject = AsyncSubject::new();
/// subject.next(1);
/// subject.next(2);
/// subject.complete();
///
/// let (tx, rx) = mpsc::channel();
/// subject.subscribe(move |v| tx.send(v).unwrap(), |_| {}, || {});
/// assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![2]);
/// ```
pub struct AsyncSubject<T> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T> Clone for AsyncSubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Default for AsyncSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> AsyncSubject<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                next_id: 0,
                last: None,
                outcome: None,
                observers: Vec::new(),
            })),
        }
    }

    /// Remember `value` as the candidate final value. Ignored after termination.
    pub fn next(&self, value: T) {
        let mut state = self.state.lock();
        if state.outcome.is_none() {
            state.last = Some(value);
        }
    }

    /// Terminate successfully, emitting the last value (if any) to every subscriber.
    pub fn complete(&self) {
        let observers = {
            let mut state = self.state.lock();
            if state.outcome.is_some() {
                return;
            }
            let last = state.last.take();
            state.outcome = Some(Ok(last));
            core::mem::take(&mut state.observers)
        };
        let outcome = self.outcome();
        for entry in observers {
            replay(entry.observer, &entry.subscription, outcome.clone());
        }
    }

    /// Terminate with `error`. Ignored after termination.
    pub fn error(&self, error: ReboundError) {
        let observers = {
            let mut state = self.state.lock();
            if state.outcome.is_some() {
                return;
            }
            state.last = None;
            state.outcome = Some(Err(error));
            core::mem::take(&mut state.observers)
        };
        let outcome = self.outcome();
        for entry in observers {
            replay(entry.observer, &entry.subscription, outcome.clone());
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.state.lock().outcome.is_some()
    }

    /// Number of subscribers still waiting for the outcome.
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().observers.len()
    }

    fn outcome(&self) -> Option<Result<Option<T>>> {
        self.state.lock().outcome.clone()
    }
}

fn replay<T: 'static>(
    mut observer: BoxObserver<T>,
    subscription: &Subscription,
    outcome: Option<Result<Option<T>>>,
) {
    if subscription.is_disposed() {
        return;
    }
    match outcome {
        Some(Ok(Some(value))) => {
            observer.on_next(value);
            if !subscription.is_disposed() {
                observer.on_completed();
            }
        }
        Some(Ok(None)) => observer.on_completed(),
        Some(Err(error)) => observer.on_error(error),
        None => {}
    }
}

impl<T: Clone + Send + 'static> EventStream for AsyncSubject<T> {
    type Item = T;

    fn subscribe_with(&self, observer: BoxObserver<T>, subscription: Subscription) {
        if subscription.is_disposed() {
            return;
        }

        let id = {
            let mut state = self.state.lock();
            if let Some(outcome) = state.outcome.clone() {
                drop(state);
                replay(observer, &subscription, Some(outcome));
                return;
            }
            let id = state.next_id;
            state.next_id += 1;
            state.observers.push(Entry {
                id,
                observer,
                subscription: subscription.clone(),
            });
            id
        };

        let state = self.state.clone();
        subscription.add_teardown(move || {
            let removed = {
                let mut state = state.lock();
                state
                    .observers
                    .iter()
                    .position(|entry| entry.id == id)
                    .map(|index| state.observers.remove(index))
            };
            drop(removed);
        });
    }
}
