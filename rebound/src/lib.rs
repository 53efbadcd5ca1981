// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A demo of three ways to compose asynchronous work with event streams, and the context
//! each one leaves the downstream on.
//!
//! Four buttons ([`Button`]) fire [`Trigger`](rebound_stream::Trigger)s on a
//! [`Dispatcher`](rebound_core::Dispatcher). Each click starts a unit of work through a
//! [`StartWork`] factory and runs one of the [`Strategy`] pipelines. Every pipeline appends
//! to a shared [`LogBuffer`] and a [`Sink`] renders the buffer on the dispatcher once the
//! step has completed.
//!
//! | Strategy | "After Await" runs on | "Inside next block" runs on |
//! |---|---|---|
//! | [`Strategy::NoReschedule`] | wherever the work resumed | same |
//! | [`Strategy::PostAfterAsync`] | the dispatcher | the dispatcher |
//! | [`Strategy::WholeTaskAsStream`] | wherever the work resumed | a continuation context |
//!
//! ```no_run
//! use rebound::{Button, Demo, DemoConfig};
//! use std::time::Duration;
//!
//! # fn main() -> anyhow::Result<()> {
//! let runtime = tokio::runtime::Runtime::new()?;
//! let demo = Demo::start(DemoConfig::default(), runtime.handle().clone())?;
//!
//! demo.click(Button::NotCompletedDispatcher)?;
//! demo.sink().wait_for_blocks(1, Duration::from_secs(1));
//! print!("{}", demo.sink().text());
//!
//! demo.shutdown();
//! # Ok(())
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod app;
pub mod config;
pub mod log_buffer;
pub mod sink;
pub mod strategies;
pub mod work;

pub use self::app::{Button, Demo};
pub use self::config::{ContinuationMode, DemoConfig};
pub use self::log_buffer::{LogBuffer, LogLine};
pub use self::sink::{RenderedBlock, Sink};
pub use self::strategies::{running_text, Pipeline, Strategy, AFTER_AWAIT, INSIDE_NEXT_BLOCK};
pub use self::work::{DelayedWork, StartWork};
