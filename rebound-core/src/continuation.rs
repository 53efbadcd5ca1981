// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Where a completable resumes its continuations.
//!
//! The context an asynchronous completion resumes on is outside the caller's control:
//! it depends on the runtime and on timing. Modelling it as an injected
//! [`ContinuationScheduler`] lets production code use a thread pool while tests swap in a
//! deterministic double ([`Inline`] or a named worker [`Dispatcher`](crate::Dispatcher)).

use crate::affinity::Task;
use std::sync::Arc;

/// Runs continuations of settled completables.
pub trait ContinuationScheduler: Send + Sync + 'static {
    /// Run `continuation` on whatever context this scheduler stands for.
    fn schedule(&self, continuation: Task);
}

/// Shared, type-erased continuation scheduler.
pub type SharedContinuations = Arc<dyn ContinuationScheduler>;

/// Runs continuations synchronously on the context that settles the completable.
#[derive(Clone, Copy, Debug, Default)]
pub struct Inline;

impl ContinuationScheduler for Inline {
    fn schedule(&self, continuation: Task) {
        continuation();
    }
}

impl<C: ContinuationScheduler + ?Sized> ContinuationScheduler for Arc<C> {
    fn schedule(&self, continuation: Task) {
        (**self).schedule(continuation);
    }
}

/// Runs continuations on the worker threads of a tokio runtime.
#[cfg(feature = "runtime-tokio")]
#[derive(Clone, Debug)]
pub struct TokioContinuations {
    handle: tokio::runtime::Handle,
}

#[cfg(feature = "runtime-tokio")]
impl TokioContinuations {
    /// Schedule continuations on the runtime behind `handle`.
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Schedule continuations on the runtime the caller is running in.
    ///
    /// # Errors
    ///
    /// Returns an error when called outside of a tokio runtime.
    pub fn current() -> crate::Result<Self> {
        tokio::runtime::Handle::try_current()
            .map(Self::new)
            .map_err(crate::ReboundError::user_error)
    }
}

#[cfg(feature = "runtime-tokio")]
impl ContinuationScheduler for TokioContinuations {
    /// Spawns `continuation` on the runtime. A runtime that has shut down drops spawned
    /// tasks unrun; the continuation then runs inline on the context that dropped it.
    fn schedule(&self, continuation: Task) {
        let guard = RunOnDrop(Some(continuation));
        self.handle.spawn(async move {
            let mut guard = guard;
            if let Some(continuation) = guard.0.take() {
                continuation();
            }
        });
    }
}

#[cfg(feature = "runtime-tokio")]
struct RunOnDrop(Option<Task>);

#[cfg(feature = "runtime-tokio")]
impl Drop for RunOnDrop {
    fn drop(&mut self) {
        if let Some(continuation) = self.0.take() {
            error!(
                "Tokio runtime dropped a continuation unrun; running it on context {}",
                crate::ContextId::current()
            );
            continuation();
        }
    }
}
