// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Disposal handle for one subscription.
//!
//! A [`Subscription`] is created by whoever subscribes and is threaded through the whole
//! operator chain of that subscription. Sources check it before emitting and register
//! teardowns on it; disposing it stops delivery to that subscriber only.

use crate::affinity::Task;
use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Ownership handle of a subscription.
///
/// Clones share the same disposal state. Disposal is idempotent and runs every registered
/// teardown exactly once.
///
/// # Example
///
/// ```
/// use rebound_core::Subscription;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let released = Arc::new(AtomicBool::new(false));
/// let subscription = Subscription::new();
///
/// let flag = released.clone();
/// subscription.add_teardown(move || flag.store(true, Ordering::SeqCst));
///
/// subscription.dispose();
/// assert!(subscription.is_disposed());
/// assert!(released.load(Ordering::SeqCst));
/// ```
#[derive(Clone)]
pub struct Subscription {
    inner: Arc<Inner>,
}

struct Inner {
    disposed: AtomicBool,
    event: Event,
    teardowns: Mutex<Vec<Task>>,
    children: Mutex<Vec<Weak<Inner>>>,
}

impl Subscription {
    /// Create a live subscription handle.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                disposed: AtomicBool::new(false),
                event: Event::new(),
                teardowns: Mutex::new(Vec::new()),
                children: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Create a subscription that is disposed together with this one but can also be
    /// disposed on its own.
    ///
    /// Fan-in operators give every inner subscription a child so that an inner sequence
    /// ending early does not tear down the whole chain.
    pub fn child(&self) -> Subscription {
        let child = Subscription::new();
        {
            let mut children = self.inner.children.lock();
            if !self.is_disposed() {
                children.retain(|weak| {
                    weak.upgrade()
                        .is_some_and(|inner| !inner.disposed.load(Ordering::Acquire))
                });
                children.push(Arc::downgrade(&child.inner));
                return child;
            }
        }
        child.dispose();
        child
    }

    /// Stop further delivery and release resources held by the subscription.
    pub fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::AcqRel) {
            return;
        }

        let teardowns = core::mem::take(&mut *self.inner.teardowns.lock());
        for teardown in teardowns {
            teardown();
        }

        let children = core::mem::take(&mut *self.inner.children.lock());
        for inner in children.iter().filter_map(Weak::upgrade) {
            Subscription { inner }.dispose();
        }

        self.inner.event.notify(usize::MAX);
    }

    /// Check if the subscription has been disposed (non-blocking).
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }

    /// Run `teardown` on disposal; runs it immediately if already disposed.
    pub fn add_teardown<F>(&self, teardown: F)
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut teardowns = self.inner.teardowns.lock();
            if !self.is_disposed() {
                teardowns.push(Box::new(teardown));
                return;
            }
        }
        teardown();
    }

    /// Wait asynchronously until the subscription is disposed.
    pub fn disposed(&self) -> Disposed<'_> {
        Disposed {
            subscription: self,
            listener: None,
        }
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Future returned by [`Subscription::disposed()`].
pub struct Disposed<'a> {
    subscription: &'a Subscription,
    listener: Option<EventListener>,
}

impl Future for Disposed<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.subscription.is_disposed() {
            return Poll::Ready(());
        }

        if self.listener.is_none() {
            self.listener = Some(self.subscription.inner.event.listen());

            // A dispose between the first check and listen() would otherwise be missed
            if self.subscription.is_disposed() {
                return Poll::Ready(());
            }
        }

        match self.listener.as_mut() {
            Some(listener) => Pin::new(listener).poll(cx),
            None => Poll::Pending,
        }
    }
}
