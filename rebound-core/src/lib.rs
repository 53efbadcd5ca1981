// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core building blocks for context-preserving reactive pipelines.
//!
//! - [`Completable`]: a one-shot asynchronous result, settled exactly once through a [`Completer`]
//! - [`AffinityScheduler`] / [`Dispatcher`]: a single-threaded originating context with FIFO `post`
//! - [`ContinuationScheduler`]: where a completable resumes its continuations once it settles
//! - [`Subscription`]: disposal handle shared along one subscription chain
//! - [`ReboundError`] / [`StreamItem`]: error taxonomy and the value-or-error item type

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod affinity;
pub mod completable;
pub mod context;
pub mod continuation;
pub mod dispatcher;
pub mod error;
pub mod stream_item;
pub mod subscription;

pub use self::affinity::{AffinityScheduler, SharedScheduler, Task};
pub use self::completable::{Completable, Completer, Settled};
pub use self::context::ContextId;
#[cfg(feature = "runtime-tokio")]
pub use self::continuation::TokioContinuations;
pub use self::continuation::{ContinuationScheduler, Inline, SharedContinuations};
pub use self::dispatcher::Dispatcher;
pub use self::error::{ReboundError, Result};
pub use self::stream_item::StreamItem;
pub use self::subscription::{Disposed, Subscription};
