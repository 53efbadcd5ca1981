// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for Rebound pipelines
//!
//! A single root [`ReboundError`] covers every failure a pipeline can surface:
//! failed asynchronous work, abandoned completables, schedulers that are no longer
//! running and operations invoked on the wrong context.
//!
//! Delivery to a disposed subscriber is deliberately *not* an error: such emissions
//! are dropped silently.
//!
//! # Examples
//!
//! ```
//! use rebound_core::{ReboundError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(ReboundError::stream_error("backend not ready"))
//! }
//!
//! assert!(load().is_err());
//! ```

use crate::context::ContextId;
use std::sync::Arc;

/// Root error type for all Rebound operations
///
/// Errors are cheap to clone: a completable hands the same error to every
/// continuation, and user errors are shared behind an [`Arc`] so the original
/// error value travels unchanged through the bridge and every combinator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReboundError {
    /// Stream processing encountered an error
    ///
    /// General failure of an asynchronous step that carries only a description.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong
        context: String,
    },

    /// Error produced by user code (the asynchronous work itself)
    #[error("User error: {0}")]
    UserError(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// The completer of a pending completable was dropped without settling it
    #[error("Completable was abandoned before it settled")]
    Abandoned,

    /// A callback was posted to a scheduler that has been torn down
    #[error("Scheduler for context {context_id} is unavailable")]
    SchedulerUnavailable {
        /// Context the scheduler used to represent
        context_id: ContextId,
    },

    /// An operation restricted to one context ran somewhere else
    #[error("Operation requires context {expected} but ran on context {actual}")]
    WrongContext {
        /// Context the operation is bound to
        expected: ContextId,
        /// Context the operation actually ran on
        actual: ContextId,
    },
}

impl ReboundError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Arc::new(error))
    }

    /// Create the error reported when posting to a torn-down scheduler
    #[must_use]
    pub const fn scheduler_unavailable(context_id: ContextId) -> Self {
        Self::SchedulerUnavailable { context_id }
    }

    /// Returns `true` if this error means the asynchronous work itself failed.
    #[must_use]
    pub const fn is_asynchronous_failure(&self) -> bool {
        matches!(
            self,
            Self::StreamProcessingError { .. } | Self::UserError(_) | Self::Abandoned
        )
    }

    /// Returns `true` if this error comes from a torn-down scheduler.
    #[must_use]
    pub const fn is_scheduler_unavailable(&self) -> bool {
        matches!(self, Self::SchedulerUnavailable { .. })
    }
}

/// Specialized Result type for Rebound operations
pub type Result<T> = std::result::Result<T, ReboundError>;
