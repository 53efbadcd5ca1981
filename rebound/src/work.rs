// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Factories for the asynchronous step of a pipeline.

use rebound_core::{Completable, SharedContinuations};
use std::time::Duration;
use tokio::runtime::Handle;

/// Starts one unit of asynchronous work.
///
/// `already_completed` selects the settle-timing: `true` must return work that has already
/// settled, `false` work that settles later.
pub trait StartWork: Send + Sync + 'static {
    fn start_work(&self, already_completed: bool) -> Completable<()>;
}

impl<F> StartWork for F
where
    F: Fn(bool) -> Completable<()> + Send + Sync + 'static,
{
    fn start_work(&self, already_completed: bool) -> Completable<()> {
        self(already_completed)
    }
}

/// Real work on a tokio runtime: "not completed" work sleeps for a short delay.
#[derive(Clone)]
pub struct DelayedWork {
    handle: Handle,
    delay: Duration,
    continuations: SharedContinuations,
}

impl DelayedWork {
    pub fn new(handle: Handle, delay: Duration, continuations: SharedContinuations) -> Self {
        Self {
            handle,
            delay,
            continuations,
        }
    }
}

impl StartWork for DelayedWork {
    fn start_work(&self, already_completed: bool) -> Completable<()> {
        if already_completed {
            return Completable::resolved(());
        }

        let delay = self.delay;
        Completable::spawn_on(&self.handle, self.continuations.clone(), async move {
            tokio::time::sleep(delay).await;
            Ok(())
        })
    }
}
