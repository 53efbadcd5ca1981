// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A single-threaded event loop: the originating context of a pipeline.
//!
//! A [`Dispatcher`] owns one named OS thread that drains an unbounded FIFO queue of
//! [`Task`]s. It plays the role of a UI dispatcher: triggers fire on it, sinks must run
//! on it, and [`AffinityScheduler::post`] marshals work back onto it.
//!
//! ```
//! use rebound_core::{AffinityScheduler, ContextId, Dispatcher};
//!
//! let dispatcher = Dispatcher::spawn("ui").unwrap();
//! let ran_on = dispatcher.invoke(ContextId::current).unwrap();
//! assert_eq!(ran_on, dispatcher.context_id());
//! dispatcher.shutdown();
//! ```

use crate::affinity::{AffinityScheduler, Task};
use crate::context::ContextId;
use crate::continuation::ContinuationScheduler;
use crate::error::{ReboundError, Result};
use futures::channel::{mpsc, oneshot};
use futures::executor::block_on;
use futures::StreamExt;
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Handle to a dispatcher thread. Cheap to clone; all clones post to the same queue.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

struct Inner {
    name: String,
    context_id: ContextId,
    sender: Mutex<Option<mpsc::UnboundedSender<Task>>>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl Dispatcher {
    /// Start a new dispatcher thread called `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn spawn(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let (sender, mut receiver) = mpsc::unbounded::<Task>();
        let (ready_tx, ready_rx) = oneshot::channel();
        let loop_name = name.clone();

        let thread = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                let _ = ready_tx.send(ContextId::current());
                block_on(async {
                    while let Some(task) = receiver.next().await {
                        if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
                            error!("Task posted to dispatcher '{}' panicked", loop_name);
                        }
                    }
                });
                debug!("Dispatcher '{}' drained its queue and stopped", loop_name);
            })
            .map_err(ReboundError::user_error)?;

        let context_id = block_on(ready_rx).map_err(|_| {
            ReboundError::stream_error(format!("dispatcher '{name}' failed to start"))
        })?;
        info!("Dispatcher '{}' running on context {}", name, context_id);

        Ok(Self {
            inner: Arc::new(Inner {
                name,
                context_id,
                sender: Mutex::new(Some(sender)),
                thread: Mutex::new(Some(thread)),
            }),
        })
    }

    /// Name of the dispatcher thread.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns `true` until [`shutdown`](Self::shutdown) has been called.
    pub fn is_running(&self) -> bool {
        self.inner.sender.lock().is_some()
    }

    /// Queue `task`, handing it back if the dispatcher no longer accepts work.
    pub fn try_post(&self, task: Task) -> std::result::Result<(), Task> {
        let sender = self.inner.sender.lock();
        match sender.as_ref() {
            Some(sender) => sender
                .unbounded_send(task)
                .map_err(|e| e.into_inner()),
            None => Err(task),
        }
    }

    /// Run `f` on the dispatcher and wait for its result.
    ///
    /// Called from the dispatcher itself, `f` runs inline. A panic inside `f` is
    /// resumed on the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ReboundError::SchedulerUnavailable`] if the dispatcher has shut down.
    pub fn invoke<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.is_current() {
            return Ok(f());
        }

        let (tx, rx) = oneshot::channel();
        self.post(Box::new(move || {
            let _ = tx.send(panic::catch_unwind(AssertUnwindSafe(f)));
        }))?;

        match block_on(rx) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(payload)) => panic::resume_unwind(payload),
            Err(_) => Err(ReboundError::scheduler_unavailable(self.inner.context_id)),
        }
    }

    /// Stop accepting work, let already queued tasks run, and wait for the thread to exit.
    ///
    /// Idempotent. Called from the dispatcher itself it only closes the queue.
    pub fn shutdown(&self) {
        drop(self.inner.sender.lock().take());
        let thread = self.inner.thread.lock().take();
        if let Some(thread) = thread {
            if !self.is_current() && thread.join().is_err() {
                error!("Dispatcher '{}' thread terminated abnormally", self.inner.name);
            }
        }
    }
}

impl AffinityScheduler for Dispatcher {
    fn context_id(&self) -> ContextId {
        self.inner.context_id
    }

    fn post(&self, task: Task) -> Result<()> {
        self.try_post(task)
            .map_err(|_| ReboundError::scheduler_unavailable(self.inner.context_id))
    }
}

impl ContinuationScheduler for Dispatcher {
    fn schedule(&self, continuation: Task) {
        if let Err(continuation) = self.try_post(continuation) {
            error!(
                "Dispatcher '{}' is unavailable; running continuation on context {}",
                self.inner.name,
                ContextId::current()
            );
            continuation();
        }
    }
}

impl core::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("name", &self.inner.name)
            .field("context_id", &self.inner.context_id)
            .field("running", &self.is_running())
            .finish()
    }
}
