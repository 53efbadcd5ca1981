// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The originating single-threaded context abstraction.

use crate::context::ContextId;
use crate::error::Result;
use std::sync::Arc;

/// A unit of work handed to a scheduler.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A single-threaded execution context (a UI dispatcher, an event loop, ...).
///
/// [`post`](AffinityScheduler::post) returns immediately; the task runs later on the
/// context identified by [`context_id`](AffinityScheduler::context_id). Tasks posted to
/// the same scheduler instance run in FIFO order. No ordering is promised between posts
/// coming from different concurrent callers.
pub trait AffinityScheduler: Send + Sync + 'static {
    /// Identity of the context this scheduler runs tasks on.
    fn context_id(&self) -> ContextId;

    /// Queue `task` to run on this scheduler's context.
    ///
    /// # Errors
    ///
    /// Returns [`ReboundError::SchedulerUnavailable`](crate::ReboundError::SchedulerUnavailable)
    /// if the scheduler has been torn down. The task is dropped without running.
    fn post(&self, task: Task) -> Result<()>;

    /// Returns `true` if the caller already runs on this scheduler's context.
    fn is_current(&self) -> bool {
        self.context_id().is_current()
    }
}

/// Shared, type-erased scheduler handle.
pub type SharedScheduler = Arc<dyn AffinityScheduler>;

impl<S: AffinityScheduler + ?Sized> AffinityScheduler for Arc<S> {
    fn context_id(&self) -> ContextId {
        (**self).context_id()
    }

    fn post(&self, task: Task) -> Result<()> {
        (**self).post(task)
    }

    fn is_current(&self) -> bool {
        (**self).is_current()
    }
}
