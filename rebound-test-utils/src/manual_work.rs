// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deterministic work factory.

use parking_lot::Mutex;
use rebound::StartWork;
use rebound_core::{Completable, Completer, Inline, ReboundError, SharedContinuations};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A [`StartWork`] whose "not completed" work settles only when the test calls
/// [`settle_next`](Self::settle_next), [`settle_all`](Self::settle_all) or
/// [`fail_next`](Self::fail_next), on the test's own thread.
///
/// "Already completed" requests return a resolved completable. Clones share the same queue.
#[derive(Clone)]
pub struct ManualWork {
    pending: Arc<Mutex<VecDeque<Completer<()>>>>,
    started: Arc<AtomicUsize>,
    continuations: SharedContinuations,
}

impl ManualWork {
    /// Pending work resumes inline on the context that settles it.
    pub fn new() -> Self {
        Self::with_continuations(Arc::new(Inline))
    }

    /// Pending work resumes through `continuations` once settled.
    pub fn with_continuations(continuations: SharedContinuations) -> Self {
        Self {
            pending: Arc::new(Mutex::new(VecDeque::new())),
            started: Arc::new(AtomicUsize::new(0)),
            continuations,
        }
    }

    /// Resolve the oldest pending work. Returns `false` if nothing was pending.
    pub fn settle_next(&self) -> bool {
        let next = self.pending.lock().pop_front();
        match next {
            Some(completer) => {
                completer.resolve(());
                true
            }
            None => false,
        }
    }

    /// Resolve every pending work item, oldest first. Returns how many were settled.
    pub fn settle_all(&self) -> usize {
        let mut settled = 0;
        while self.settle_next() {
            settled += 1;
        }
        settled
    }

    /// Fail the oldest pending work with `error`. Returns `false` if nothing was pending.
    pub fn fail_next(&self, error: ReboundError) -> bool {
        let next = self.pending.lock().pop_front();
        match next {
            Some(completer) => {
                completer.fail(error);
                true
            }
            None => false,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Total number of `start_work` calls, settled or not.
    pub fn started_count(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

impl Default for ManualWork {
    fn default() -> Self {
        Self::new()
    }
}

impl StartWork for ManualWork {
    fn start_work(&self, already_completed: bool) -> Completable<()> {
        self.started.fetch_add(1, Ordering::SeqCst);
        if already_completed {
            return Completable::resolved(());
        }

        let (completer, completable) = Completable::pending_on(self.continuations.clone());
        self.pending.lock().push_back(completer);
        completable
    }
}
