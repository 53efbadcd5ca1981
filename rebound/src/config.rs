// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Run-time settings of the demo application.

use std::time::Duration;

/// Where work that was not already completed resumes once it settles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContinuationMode {
    /// On the tokio worker threads, like a thread-pool continuation.
    #[default]
    Tokio,
    /// Inline, on whichever context settles the work.
    Inline,
    /// On a dedicated, named worker dispatcher.
    Worker,
}

/// Settings for [`Demo::start`](crate::Demo::start).
///
/// ```
/// use rebound::{ContinuationMode, DemoConfig};
/// use std::time::Duration;
///
/// let config = DemoConfig::default()
///     .with_pending_delay(Duration::from_millis(5))
///     .with_continuations(ContinuationMode::Worker);
///
/// assert_eq!(config.dispatcher_name, "dispatcher");
/// assert_eq!(config.continuations, ContinuationMode::Worker);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoConfig {
    /// Thread name of the originating dispatcher.
    pub dispatcher_name: String,
    /// Thread name of the worker used by [`ContinuationMode::Worker`].
    pub worker_name: String,
    /// How long "not completed" work takes to settle.
    pub pending_delay: Duration,
    pub continuations: ContinuationMode,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            dispatcher_name: "dispatcher".to_string(),
            worker_name: "worker".to_string(),
            pending_delay: Duration::from_millis(1),
            continuations: ContinuationMode::default(),
        }
    }
}

impl DemoConfig {
    #[must_use]
    pub fn with_dispatcher_name(mut self, name: impl Into<String>) -> Self {
        self.dispatcher_name = name.into();
        self
    }

    #[must_use]
    pub fn with_worker_name(mut self, name: impl Into<String>) -> Self {
        self.worker_name = name.into();
        self
    }

    #[must_use]
    pub fn with_pending_delay(mut self, delay: Duration) -> Self {
        self.pending_delay = delay;
        self
    }

    #[must_use]
    pub fn with_continuations(mut self, mode: ContinuationMode) -> Self {
        self.continuations = mode;
        self
    }
}
