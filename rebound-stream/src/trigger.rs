// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! External event source (a button click, a timer tick, ...).
//!
//! A [`Trigger`] is hot: every live subscriber is invoked synchronously on the context that
//! calls [`fire`](Trigger::fire). Subscribing never replays earlier firings.
//!
//! ```
//! use rebound_stream::prelude::*;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let clicks = Arc::new(AtomicUsize::new(0));
//! let button = Trigger::new("button");
//!
//! let counter = clicks.clone();
//! let subscription = button.stream().subscribe(
//!     move |()| {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     },
//!     |_| {},
//!     || {},
//! );
//!
//! button.fire();
//! button.fire();
//! subscription.dispose();
//! button.fire();
//!
//! assert_eq!(clicks.load(Ordering::SeqCst), 2);
//! ```

use crate::event_stream::EventStream;
use crate::observer::BoxObserver;
use crate::serialized::Serialized;
use parking_lot::Mutex;
use rebound_core::Subscription;
use std::sync::Arc;

struct Entry {
    id: u64,
    observer: Serialized<()>,
    subscription: Subscription,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
    completed: bool,
}

impl Registry {
    fn snapshot(&self) -> Vec<(Serialized<()>, Subscription)> {
        self.entries
            .iter()
            .map(|entry| (entry.observer.clone(), entry.subscription.clone()))
            .collect()
    }
}

/// Named, hot event source producing `()` on every [`fire`](Self::fire).
#[derive(Clone)]
pub struct Trigger {
    name: Arc<str>,
    registry: Arc<Mutex<Registry>>,
}

impl Trigger {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke every live subscriber on the calling context. Returns how many were invoked.
    ///
    /// Subscribers added while firing are not invoked for this firing. A firing issued from
    /// inside a subscriber is queued and delivered to that subscriber once its current
    /// callback returns. Firing a completed trigger does nothing.
    pub fn fire(&self) -> usize {
        let snapshot = {
            let registry = self.registry.lock();
            if registry.completed {
                return 0;
            }
            registry.snapshot()
        };

        let mut invoked = 0;
        for (observer, subscription) in snapshot {
            if subscription.is_disposed() {
                continue;
            }
            observer.next(());
            invoked += 1;
        }
        invoked
    }

    /// Complete every subscriber and stop accepting new ones.
    pub fn complete(&self) {
        let entries = {
            let mut registry = self.registry.lock();
            registry.completed = true;
            core::mem::take(&mut registry.entries)
        };

        for entry in entries {
            if entry.subscription.is_disposed() {
                entry.observer.release();
            } else {
                entry.observer.complete();
            }
        }
    }

    /// Number of subscribers that have not been disposed yet.
    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().entries.len()
    }

    /// The from-event adapter: an event stream that emits `()` each time the trigger fires.
    pub fn stream(&self) -> TriggerStream {
        TriggerStream {
            name: self.name.clone(),
            registry: self.registry.clone(),
        }
    }
}

impl core::fmt::Debug for Trigger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Trigger")
            .field("name", &self.name)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Stream returned by [`Trigger::stream`].
#[derive(Clone)]
pub struct TriggerStream {
    name: Arc<str>,
    registry: Arc<Mutex<Registry>>,
}

impl EventStream for TriggerStream {
    type Item = ();

    fn subscribe_with(&self, mut observer: BoxObserver<()>, subscription: Subscription) {
        if subscription.is_disposed() {
            return;
        }

        let id = {
            let mut registry = self.registry.lock();
            if registry.completed {
                drop(registry);
                observer.on_completed();
                return;
            }
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push(Entry {
                id,
                observer: Serialized::new(observer),
                subscription: subscription.clone(),
            });
            id
        };
        debug!("Subscribed to trigger '{}'", self.name);

        let registry = self.registry.clone();
        subscription.add_teardown(move || {
            let removed = {
                let mut registry = registry.lock();
                registry
                    .entries
                    .iter()
                    .position(|entry| entry.id == id)
                    .map(|index| registry.entries.remove(index))
            };
            if let Some(entry) = removed {
                entry.observer.release();
            }
        });
    }
}
