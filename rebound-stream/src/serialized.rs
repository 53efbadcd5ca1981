// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Queue-draining serialization of signals coming from several producers.

use crate::observer::BoxObserver;
use parking_lot::Mutex;
use rebound_core::ReboundError;
use std::collections::VecDeque;
use std::sync::Arc;

enum Signal<T> {
    Next(T),
    Error(ReboundError),
    Completed,
}

struct State<T> {
    queue: VecDeque<Signal<T>>,
    downstream: Option<BoxObserver<T>>,
    draining: bool,
    terminated: bool,
    released: bool,
}

/// Funnels signals from concurrent producers into one observer.
///
/// Whoever finds the serializer idle becomes the drainer and delivers queued signals one at
/// a time, outside the lock; everybody else only enqueues. A producer that re-enters from
/// inside a delivery therefore never recurses into the downstream observer. The first
/// terminal signal wins and everything after it is discarded.
pub(crate) struct Serialized<T> {
    state: Arc<Mutex<State<T>>>,
}

impl<T> Clone for Serialized<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: Send + 'static> Serialized<T> {
    pub(crate) fn new(downstream: BoxObserver<T>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                queue: VecDeque::new(),
                downstream: Some(downstream),
                draining: false,
                terminated: false,
                released: false,
            })),
        }
    }

    pub(crate) fn next(&self, value: T) {
        self.push(Signal::Next(value));
    }

    pub(crate) fn error(&self, error: ReboundError) {
        self.push(Signal::Error(error));
    }

    pub(crate) fn complete(&self) {
        self.push(Signal::Completed);
    }

    /// Drop the downstream observer and discard everything queued or pushed later.
    pub(crate) fn release(&self) {
        let downstream = {
            let mut state = self.state.lock();
            state.released = true;
            state.terminated = true;
            state.queue.clear();
            state.downstream.take()
        };
        drop(downstream);
    }

    fn push(&self, signal: Signal<T>) {
        {
            let mut state = self.state.lock();
            if state.terminated {
                return;
            }
            if !matches!(signal, Signal::Next(_)) {
                state.terminated = true;
            }
            state.queue.push_back(signal);
            if state.draining {
                return;
            }
            state.draining = true;
        }
        self.drain();
    }

    fn drain(&self) {
        loop {
            let (signal, downstream) = {
                let mut state = self.state.lock();
                match state.queue.pop_front() {
                    Some(signal) => (signal, state.downstream.take()),
                    None => {
                        state.draining = false;
                        return;
                    }
                }
            };

            let Some(mut downstream) = downstream else {
                continue;
            };

            let terminal = match signal {
                Signal::Next(value) => {
                    downstream.on_next(value);
                    false
                }
                Signal::Error(error) => {
                    downstream.on_error(error);
                    true
                }
                Signal::Completed => {
                    downstream.on_completed();
                    true
                }
            };

            if !terminal {
                let mut state = self.state.lock();
                if !state.released {
                    state.downstream = Some(downstream);
                }
            }
        }
    }
}
