// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Three ways of composing "await, then do" inside a stream pipeline.
//!
//! Every strategy maps a stream of "already completed?" flags to a stream of `()`, logging
//! four steps along the way:
//!
//! 1. `Running Already Completed Task: {strategy}` / `Running Not Completed Task: {strategy}`
//!    when the work starts (on the context the flag arrived on)
//! 2. `After Await` right after the work settled
//! 3. `Inside Next Observable Block` in the next transformation
//!
//! Where steps 2 and 3 run is what tells the strategies apart:
//!
//! | Strategy | Already completed | Not completed |
//! |----------|-------------------|---------------|
//! | [`NoReschedule`](Strategy::NoReschedule) | origin | continuation context |
//! | [`PostAfterAsync`](Strategy::PostAfterAsync) | origin | origin |
//! | [`WholeTaskAsStream`](Strategy::WholeTaskAsStream) | origin | continuation context |

use crate::log_buffer::LogBuffer;
use crate::work::StartWork;
use rebound_core::{Completable, SharedScheduler};
use rebound_stream::prelude::*;
use std::fmt;
use std::sync::Arc;

pub const AFTER_AWAIT: &str = "After Await";
pub const INSIDE_NEXT_BLOCK: &str = "Inside Next Observable Block";

/// A composition strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Bridge without any re-entry policy. Affinity survives only for already-settled work.
    NoReschedule,
    /// Bridge back onto the origin and observe on it before the next step.
    PostAfterAsync,
    /// Wrap the whole asynchronous step in a completable and publish it through the
    /// current-context adapter. Same affinity as [`Strategy::NoReschedule`].
    WholeTaskAsStream,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::NoReschedule,
        Strategy::PostAfterAsync,
        Strategy::WholeTaskAsStream,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Strategy::NoReschedule => "NoReschedule",
            Strategy::PostAfterAsync => "PostAfterAsync",
            Strategy::WholeTaskAsStream => "WholeTaskAsStream",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The text logged when a strategy starts its work.
pub fn running_text(strategy: Strategy, already_completed: bool) -> String {
    if already_completed {
        format!("Running Already Completed Task: {strategy}")
    } else {
        format!("Running Not Completed Task: {strategy}")
    }
}

/// Builds strategy pipelines sharing one work factory, one log and one origin.
#[derive(Clone)]
pub struct Pipeline {
    work: Arc<dyn StartWork>,
    log: LogBuffer,
    origin: SharedScheduler,
}

impl Pipeline {
    pub fn new(work: Arc<dyn StartWork>, log: LogBuffer, origin: SharedScheduler) -> Self {
        Self { work, log, origin }
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    /// Build the pipeline of `strategy` over `flags`.
    pub fn build<S>(&self, strategy: Strategy, flags: S) -> BoxEventStream<()>
    where
        S: EventStream<Item = bool>,
    {
        match strategy {
            Strategy::NoReschedule => self.no_reschedule(flags),
            Strategy::PostAfterAsync => self.post_after_async(flags),
            Strategy::WholeTaskAsStream => self.whole_task_as_stream(flags),
        }
    }

    fn start(&self, strategy: Strategy, already_completed: bool) -> Completable<()> {
        self.log.append(running_text(strategy, already_completed));
        self.work.start_work(already_completed)
    }

    /// Start the work inside `flat_map`, bridge it with [`Reentry::Inline`], log after it.
    pub fn no_reschedule<S>(&self, flags: S) -> BoxEventStream<()>
    where
        S: EventStream<Item = bool>,
    {
        let pipeline = self.clone();
        let log = self.log.clone();

        flags
            .flat_map(move |already_completed| {
                let log = pipeline.log.clone();
                pipeline
                    .start(Strategy::NoReschedule, already_completed)
                    .to_stream(Reentry::Inline)
                    .tap(move |_| log.append(AFTER_AWAIT))
            })
            .map(move |()| log.append(INSIDE_NEXT_BLOCK))
            .boxed()
    }

    /// Like [`no_reschedule`](Self::no_reschedule), but the bridge posts back to the origin
    /// and the next step is observed on it.
    pub fn post_after_async<S>(&self, flags: S) -> BoxEventStream<()>
    where
        S: EventStream<Item = bool>,
    {
        let pipeline = self.clone();
        let log = self.log.clone();

        flags
            .flat_map(move |already_completed| {
                let log = pipeline.log.clone();
                pipeline
                    .start(Strategy::PostAfterAsync, already_completed)
                    .to_stream(Reentry::PostTo(pipeline.origin.clone()))
                    .tap(move |_| log.append(AFTER_AWAIT))
            })
            .observe_on(self.origin.clone())
            .map(move |()| log.append(INSIDE_NEXT_BLOCK))
            .boxed()
    }

    /// Map every flag to a completable of the whole step, then flatten it through the
    /// current-context adapter.
    pub fn whole_task_as_stream<S>(&self, flags: S) -> BoxEventStream<()>
    where
        S: EventStream<Item = bool>,
    {
        let pipeline = self.clone();
        let log = self.log.clone();

        flags
            .map(move |already_completed| {
                let log = pipeline.log.clone();
                pipeline
                    .start(Strategy::WholeTaskAsStream, already_completed)
                    .map(move |()| log.append(AFTER_AWAIT))
            })
            .flat_map(|task: Completable<()>| task.to_stream_current_context())
            .map(move |()| log.append(INSIDE_NEXT_BLOCK))
            .boxed()
    }
}
