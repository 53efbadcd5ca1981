// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Context-recording observer.

use parking_lot::{Condvar, Mutex};
use rebound_core::{ContextId, ReboundError, Subscription};
use rebound_stream::{EventStream, EventStreamExt, Observer};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A signal received by a [`Recorder`].
#[derive(Debug, Clone)]
pub enum Event<T> {
    Next(T),
    Error(ReboundError),
    Completed,
}

impl<T> Event<T> {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Event::Next(_))
    }
}

/// A signal and the context it was delivered on.
#[derive(Debug, Clone)]
pub struct Recorded<T> {
    pub event: Event<T>,
    pub context: ContextId,
}

struct Log<T> {
    events: Mutex<Vec<Recorded<T>>>,
    changed: Condvar,
}

/// Records every signal of the subscriptions it observes. Clones share the same log.
pub struct Recorder<T> {
    log: Arc<Log<T>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            log: self.log.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Log {
                events: Mutex::new(Vec::new()),
                changed: Condvar::new(),
            }),
        }
    }

    /// An observer appending to this recorder.
    pub fn observer(&self) -> RecordingObserver<T> {
        RecordingObserver {
            log: self.log.clone(),
        }
    }

    /// Subscribe to `stream` through the regular [`EventStreamExt::subscribe_observer`] path.
    pub fn subscribe_to<S>(&self, stream: &S) -> Subscription
    where
        S: EventStream<Item = T>,
    {
        stream.subscribe_observer(self.observer())
    }

    pub fn events(&self) -> Vec<Recorded<T>> {
        self.log.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.log.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn values(&self) -> Vec<T> {
        self.log
            .events
            .lock()
            .iter()
            .filter_map(|recorded| match &recorded.event {
                Event::Next(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<ReboundError> {
        self.log
            .events
            .lock()
            .iter()
            .filter_map(|recorded| match &recorded.event {
                Event::Error(error) => Some(error.clone()),
                _ => None,
            })
            .collect()
    }

    /// Contexts of every recorded signal, in arrival order.
    pub fn contexts(&self) -> Vec<ContextId> {
        self.log
            .events
            .lock()
            .iter()
            .map(|recorded| recorded.context)
            .collect()
    }

    pub fn is_completed(&self) -> bool {
        self.log
            .events
            .lock()
            .iter()
            .any(|recorded| matches!(recorded.event, Event::Completed))
    }

    /// Number of terminal signals seen (errors and completions).
    pub fn terminal_count(&self) -> usize {
        self.log
            .events
            .lock()
            .iter()
            .filter(|recorded| recorded.event.is_terminal())
            .count()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminal_count() > 0
    }

    /// Block until at least `count` signals were recorded. Returns `false` on timeout.
    pub fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut events = self.log.events.lock();
        while events.len() < count {
            if self.log.changed.wait_until(&mut events, deadline).timed_out() {
                return events.len() >= count;
            }
        }
        true
    }

    /// Block until a terminal signal was recorded. Returns `false` on timeout.
    pub fn wait_terminated(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut events = self.log.events.lock();
        while !events.iter().any(|recorded| recorded.event.is_terminal()) {
            if self.log.changed.wait_until(&mut events, deadline).timed_out() {
                return events.iter().any(|recorded| recorded.event.is_terminal());
            }
        }
        true
    }
}

/// Observer returned by [`Recorder::observer`].
pub struct RecordingObserver<T> {
    log: Arc<Log<T>>,
}

impl<T: Send + 'static> RecordingObserver<T> {
    fn record(&self, event: Event<T>) {
        self.log.events.lock().push(Recorded {
            event,
            context: ContextId::current(),
        });
        self.log.changed.notify_all();
    }
}

impl<T: Send + 'static> Observer<T> for RecordingObserver<T> {
    fn on_next(&mut self, value: T) {
        self.record(Event::Next(value));
    }

    fn on_error(&mut self, error: ReboundError) {
        self.record(Event::Error(error));
    }

    fn on_completed(&mut self) {
        self.record(Event::Completed);
    }
}
