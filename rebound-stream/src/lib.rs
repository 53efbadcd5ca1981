// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Push-based event streams whose scheduling context is always explicit.
//!
//! This crate provides a small Rx-style toolkit built on the primitives of
//! [`rebound_core`], centred on the bridge from a one-shot
//! [`Completable`](rebound_core::Completable) to an [`EventStream`]:
//!
//! - **[`bridge`]** / **[`CompletableExt::to_stream`]**: emit a completable's outcome with an
//!   explicit [`Reentry`] policy
//! - **[`to_stream_current_context`]**: publish an outcome through an [`AsyncSubject`]
//!   without forcing any affinity
//! - **Operators**: [`map`](MapExt::map), [`tap`](TapExt::tap),
//!   [`flat_map`](FlatMapExt::flat_map), [`merge`](MergeExt::merge) / [`merge_all`],
//!   [`take`](TakeExt::take), [`observe_on`](ObserveOnExt::observe_on)
//! - **Sources**: [`just`], [`fail`], [`empty`], [`Trigger`]
//! - **[`into_stream`](IntoStreamExt::into_stream)**: a futures `Stream` view for async code
//!
//! # Delivery guarantees
//!
//! Per subscription, an observer sees `on_next*` followed by at most one terminal signal,
//! never concurrently. Fan-in operators serialize through a queue drained by one producer
//! at a time. Nothing is delivered once the subscription is disposed.
//!
//! ```
//! use rebound_stream::prelude::*;
//! use std::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel();
//! merge_all(vec![just(1).boxed(), just(2).boxed()])
//!     .flat_map(|x| just(x * 10))
//!     .subscribe(move |v| tx.send(v).unwrap(), |_| {}, || {});
//!
//! assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![10, 20]);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod async_subject;
pub mod bridge;
pub mod current_context;
pub mod event_stream;
pub mod flat_map;
pub mod into_stream;
pub mod map;
pub mod merge;
pub mod observe_on;
pub mod observer;
pub mod prelude;
mod serialized;
pub mod sources;
pub mod take;
pub mod tap;
pub mod trigger;

pub use self::async_subject::AsyncSubject;
pub use self::bridge::{bridge, CompletableExt, CompletableStream, Reentry};
pub use self::current_context::to_stream_current_context;
pub use self::event_stream::{BoxEventStream, EventStream, EventStreamExt};
pub use self::flat_map::{FlatMap, FlatMapExt};
pub use self::into_stream::{IntoStreamExt, SubscriptionStream};
pub use self::map::{Map, MapExt};
pub use self::merge::{merge_all, Merge, MergeExt};
pub use self::observe_on::{ObserveOn, ObserveOnExt};
pub use self::observer::{BoxObserver, FnObserver, Observer};
pub use self::sources::{empty, fail, just, Empty, Fail, Just};
pub use self::take::{Take, TakeExt};
pub use self::tap::{Tap, TapExt};
pub use self::trigger::{Trigger, TriggerStream};
