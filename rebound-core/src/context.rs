// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Identity of the execution context code is running on.
//!
//! Every OS thread lazily receives a small, process-unique [`ContextId`] the first time it
//! asks for one. Ids are never reused, so two log lines with the same id were written by
//! the same thread.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static CURRENT: ContextId = ContextId(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed));
}

/// Opaque identifier of a scheduling context (one per thread).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

impl ContextId {
    /// Returns the id of the context the caller is running on.
    ///
    /// ```
    /// use rebound_core::ContextId;
    ///
    /// let here = ContextId::current();
    /// assert_eq!(here, ContextId::current());
    ///
    /// let there = std::thread::spawn(ContextId::current).join().unwrap();
    /// assert_ne!(here, there);
    /// ```
    pub fn current() -> Self {
        CURRENT.with(|id| *id)
    }

    /// Returns `true` if the caller is running on this context.
    pub fn is_current(self) -> bool {
        Self::current() == self
    }

    /// Raw numeric value, as printed in log lines.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
