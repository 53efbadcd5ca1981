// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The demo application: four buttons, three strategies, one sink.

use crate::config::{ContinuationMode, DemoConfig};
use crate::log_buffer::LogBuffer;
use crate::sink::Sink;
use crate::strategies::Pipeline;
use crate::work::{DelayedWork, StartWork};
use parking_lot::Mutex;
use rebound_core::{
    AffinityScheduler, Dispatcher, Inline, Result, SharedContinuations, SharedScheduler,
    Subscription, TokioContinuations,
};
use rebound_stream::prelude::*;
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;

/// The buttons of the demo window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    /// Already completed work through [`Strategy::NoReschedule`](crate::Strategy::NoReschedule).
    AlreadyCompleted,
    /// Pending work through [`Strategy::NoReschedule`](crate::Strategy::NoReschedule).
    NotCompleted,
    /// Pending work through [`Strategy::PostAfterAsync`](crate::Strategy::PostAfterAsync).
    NotCompletedDispatcher,
    /// Pending work through [`Strategy::WholeTaskAsStream`](crate::Strategy::WholeTaskAsStream).
    NotCompletedCurrentContext,
}

impl Button {
    pub const ALL: [Button; 4] = [
        Button::AlreadyCompleted,
        Button::NotCompleted,
        Button::NotCompletedDispatcher,
        Button::NotCompletedCurrentContext,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Button::AlreadyCompleted => "Already Completed",
            Button::NotCompleted => "Not Completed",
            Button::NotCompletedDispatcher => "Not Completed (Dispatcher)",
            Button::NotCompletedCurrentContext => "Not Completed (Current Context)",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct Buttons {
    already_completed: Trigger,
    not_completed: Trigger,
    not_completed_dispatcher: Trigger,
    not_completed_current_context: Trigger,
}

impl Buttons {
    fn new() -> Self {
        Self {
            already_completed: Trigger::new(Button::AlreadyCompleted.label()),
            not_completed: Trigger::new(Button::NotCompleted.label()),
            not_completed_dispatcher: Trigger::new(Button::NotCompletedDispatcher.label()),
            not_completed_current_context: Trigger::new(
                Button::NotCompletedCurrentContext.label(),
            ),
        }
    }

    fn get(&self, button: Button) -> &Trigger {
        match button {
            Button::AlreadyCompleted => &self.already_completed,
            Button::NotCompleted => &self.not_completed,
            Button::NotCompletedDispatcher => &self.not_completed_dispatcher,
            Button::NotCompletedCurrentContext => &self.not_completed_current_context,
        }
    }
}

/// A running demo: an originating dispatcher with the three strategy pipelines wired to
/// its buttons and a sink rendering the log after every completed run.
pub struct Demo {
    dispatcher: Dispatcher,
    worker: Option<Dispatcher>,
    buttons: Buttons,
    log: LogBuffer,
    sink: Sink,
    connection: Arc<Connection>,
}

/// The sink's subscription to the merged pipelines.
///
/// A failed work item terminates the subscription; the next click attaches a fresh one
/// before firing. Only touched on the dispatcher, apart from the final dispose.
struct Connection {
    sink: Sink,
    merged: BoxEventStream<()>,
    origin: SharedScheduler,
    attachment: Mutex<Attachment>,
}

#[derive(Default)]
struct Attachment {
    current: Option<Subscription>,
    closed: bool,
}

impl Connection {
    fn ensure_attached(&self) {
        let mut attachment = self.attachment.lock();
        if attachment.closed {
            return;
        }
        match &attachment.current {
            Some(current) if !current.is_disposed() => return,
            Some(_) => info!("Sink subscription ended; attaching a fresh one"),
            None => {}
        }
        attachment.current = Some(self.sink.attach(self.merged.clone(), self.origin.clone()));
    }

    fn dispose(&self) {
        let current = {
            let mut attachment = self.attachment.lock();
            attachment.closed = true;
            attachment.current.take()
        };
        if let Some(subscription) = current {
            subscription.dispose();
        }
    }
}

impl Demo {
    /// Start the dispatcher and wire the pipelines to [`DelayedWork`] on `handle`.
    ///
    /// # Errors
    ///
    /// Fails if a dispatcher thread cannot be spawned.
    pub fn start(config: DemoConfig, handle: Handle) -> Result<Self> {
        let dispatcher = Dispatcher::spawn(config.dispatcher_name.as_str())?;

        let mut worker = None;
        let continuations: SharedContinuations = match config.continuations {
            ContinuationMode::Tokio => Arc::new(TokioContinuations::new(handle.clone())),
            ContinuationMode::Inline => Arc::new(Inline),
            ContinuationMode::Worker => {
                let spawned = Dispatcher::spawn(config.worker_name.as_str())?;
                worker = Some(spawned.clone());
                Arc::new(spawned)
            }
        };

        let work = DelayedWork::new(handle, config.pending_delay, continuations);
        let mut demo = Self::wire(dispatcher, Arc::new(work))?;
        demo.worker = worker;
        Ok(demo)
    }

    /// Start a dispatcher called `dispatcher_name` and wire the pipelines to `work`.
    ///
    /// # Errors
    ///
    /// Fails if the dispatcher thread cannot be spawned.
    pub fn with_work(dispatcher_name: &str, work: Arc<dyn StartWork>) -> Result<Self> {
        let dispatcher = Dispatcher::spawn(dispatcher_name)?;
        Self::wire(dispatcher, work)
    }

    fn wire(dispatcher: Dispatcher, work: Arc<dyn StartWork>) -> Result<Self> {
        let origin: SharedScheduler = Arc::new(dispatcher.clone());
        let log = LogBuffer::new(origin.context_id());
        let buttons = Buttons::new();
        let pipeline = Pipeline::new(work, log.clone(), origin.clone());

        let no_reschedule = pipeline.no_reschedule(
            buttons
                .already_completed
                .stream()
                .map(|()| true)
                .merge(buttons.not_completed.stream().map(|()| false)),
        );
        let post_after_async = pipeline
            .post_after_async(buttons.not_completed_dispatcher.stream().map(|()| false));
        let whole_task_as_stream = pipeline.whole_task_as_stream(
            buttons
                .not_completed_current_context
                .stream()
                .map(|()| false),
        );

        let sink = Sink::new(log.clone());
        let connection = Arc::new(Connection {
            sink: sink.clone(),
            merged: merge_all(vec![post_after_async, whole_task_as_stream, no_reschedule])
                .boxed(),
            origin,
            attachment: Mutex::new(Attachment::default()),
        });

        let attached = connection.clone();
        dispatcher.invoke(move || attached.ensure_attached())?;
        info!("Demo wired on dispatcher '{}'", dispatcher.name());

        Ok(Self {
            dispatcher,
            worker: None,
            buttons,
            log,
            sink,
            connection,
        })
    }

    /// Fire `button` on the dispatcher, as a click would.
    ///
    /// If a failed work item ended the sink's subscription, a fresh one is attached first.
    ///
    /// # Errors
    ///
    /// Returns [`ReboundError::SchedulerUnavailable`] after [`shutdown`](Self::shutdown).
    ///
    /// [`ReboundError::SchedulerUnavailable`]: rebound_core::ReboundError::SchedulerUnavailable
    pub fn click(&self, button: Button) -> Result<()> {
        let trigger = self.buttons.get(button).clone();
        let connection = self.connection.clone();
        debug!("Clicking '{}'", button);
        self.dispatcher.post(Box::new(move || {
            connection.ensure_attached();
            trigger.fire();
        }))
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Dispose the pipelines and stop the dispatcher threads.
    pub fn shutdown(&self) {
        self.connection.dispose();
        self.dispatcher.shutdown();
        if let Some(worker) = &self.worker {
            worker.shutdown();
        }
        info!("Demo stopped");
    }
}

impl fmt::Debug for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Demo")
            .field("dispatcher", &self.dispatcher)
            .field("log", &self.log)
            .finish()
    }
}
