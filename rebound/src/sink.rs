// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Final consumer: flushes the log and renders it, always on the origin.

use crate::log_buffer::{LogBuffer, LogLine};
use parking_lot::{Condvar, Mutex};
use rebound_core::{ReboundError, SharedScheduler, Subscription};
use rebound_stream::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Lines flushed by one sink turn, and their rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedBlock {
    pub lines: Vec<LogLine>,
    /// One rendered line per log line, each followed by a newline.
    pub text: String,
}

impl RenderedBlock {
    fn render(lines: Vec<LogLine>) -> Self {
        let text = lines.iter().map(|line| format!("{line}\n")).collect();
        Self { lines, text }
    }
}

#[derive(Default)]
struct SinkState {
    blocks: Vec<RenderedBlock>,
    failure: Option<ReboundError>,
}

struct Shared {
    state: Mutex<SinkState>,
    rendered: Condvar,
}

/// Renders a block from the [`LogBuffer`] for every element of the stream it is attached
/// to. Clones share the same blocks.
#[derive(Clone)]
pub struct Sink {
    log: LogBuffer,
    shared: Arc<Shared>,
}

impl Sink {
    pub fn new(log: LogBuffer) -> Self {
        Self {
            log,
            shared: Arc::new(Shared {
                state: Mutex::new(SinkState::default()),
                rendered: Condvar::new(),
            }),
        }
    }

    /// Consume `stream`, re-posting every element onto `origin` before rendering.
    ///
    /// Clears the failure left by a previous attachment. Blocks rendered so far are kept.
    pub fn attach<S>(&self, stream: S, origin: SharedScheduler) -> Subscription
    where
        S: EventStream<Item = ()>,
    {
        self.shared.state.lock().failure = None;
        let on_next = self.clone();
        let on_error = self.clone();

        stream.observe_on(origin).subscribe(
            move |()| on_next.render(),
            move |error| on_error.fail(error),
            || debug!("Sink input completed"),
        )
    }

    fn render(&self) {
        match self.log.flush() {
            Ok(lines) => {
                self.shared
                    .state
                    .lock()
                    .blocks
                    .push(RenderedBlock::render(lines));
                self.shared.rendered.notify_all();
            }
            Err(error) => {
                error!("Sink could not flush the log: {}", error);
                self.shared.state.lock().failure = Some(error);
                self.shared.rendered.notify_all();
            }
        }
    }

    fn fail(&self, error: ReboundError) {
        error!("Sink input failed: {}", error);
        self.shared.state.lock().failure = Some(error);
        self.shared.rendered.notify_all();
    }

    pub fn blocks(&self) -> Vec<RenderedBlock> {
        self.shared.state.lock().blocks.clone()
    }

    pub fn block_count(&self) -> usize {
        self.shared.state.lock().blocks.len()
    }

    /// Remove and return every block rendered so far.
    pub fn take_blocks(&self) -> Vec<RenderedBlock> {
        core::mem::take(&mut self.shared.state.lock().blocks)
    }

    /// Everything rendered so far, as one text.
    pub fn text(&self) -> String {
        self.shared
            .state
            .lock()
            .blocks
            .iter()
            .map(|block| block.text.as_str())
            .collect()
    }

    /// The error that ended the latest attachment, if any.
    pub fn failure(&self) -> Option<ReboundError> {
        self.shared.state.lock().failure.clone()
    }

    /// Block until at least `count` blocks exist or rendering failed. Returns `false` on
    /// timeout or failure.
    pub fn wait_for_blocks(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.shared.state.lock();
        loop {
            if state.blocks.len() >= count {
                return true;
            }
            if state.failure.is_some() {
                return false;
            }
            if self.shared.rendered.wait_until(&mut state, deadline).timed_out() {
                return state.blocks.len() >= count;
            }
        }
    }
}
