// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the rebound workspace.
//!
//! This crate provides deterministic doubles and recording helpers for testing event
//! streams, the completable bridge and the composition strategies. It is designed for use
//! in development and testing only, not for production code.
//!
//! # Key Types
//!
//! ## `Recorder<T>`
//!
//! An observer that records every signal together with the [`ContextId`] it arrived on:
//!
//! ```rust
//! use rebound_core::ContextId;
//! use rebound_stream::just;
//! use rebound_test_utils::Recorder;
//!
//! let recorder = Recorder::new();
//! recorder.subscribe_to(&just(5));
//!
//! assert_eq!(recorder.values(), vec![5]);
//! assert!(recorder.is_completed());
//! assert_eq!(recorder.contexts(), vec![ContextId::current(); 2]);
//! ```
//!
//! ## `ManualWork`
//!
//! A work factory whose pending completables settle only when the test says so:
//!
//! ```rust
//! use rebound::StartWork;
//! use rebound_test_utils::ManualWork;
//!
//! let work = ManualWork::new();
//! let pending = work.start_work(false);
//! assert!(!pending.is_settled());
//!
//! work.settle_next();
//! assert!(pending.is_settled());
//! ```
//!
//! [`ContextId`]: rebound_core::ContextId

pub mod error;
pub mod helpers;
pub mod manual_work;
pub mod recorder;

pub use error::{test_error, TestError};
pub use helpers::{assert_no_element_emitted, unwrap_stream};
pub use manual_work::ManualWork;
pub use recorder::{Event, Recorded, Recorder, RecordingObserver};
