// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Context-stamped log of pipeline steps.

use parking_lot::Mutex;
use rebound_core::{ContextId, ReboundError, Result};
use std::fmt;
use std::sync::Arc;

/// One log entry: what happened and on which context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLine {
    pub context: ContextId,
    pub text: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ThreadId: {}- {} ", self.context, self.text)
    }
}

/// Ordered log shared by the pipelines and the sink.
///
/// Any context may append; only the originating context may flush. Clones share the same
/// lines.
///
/// ```
/// use rebound::LogBuffer;
/// use rebound_core::ContextId;
///
/// let log = LogBuffer::new(ContextId::current());
/// log.append("After Await");
///
/// let lines = log.flush().unwrap();
/// assert_eq!(lines[0].to_string(), format!("ThreadId: {}- After Await ", ContextId::current()));
/// assert!(log.is_empty());
/// ```
#[derive(Clone)]
pub struct LogBuffer {
    origin: ContextId,
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl LogBuffer {
    /// Create an empty buffer that can only be flushed on `origin`.
    pub fn new(origin: ContextId) -> Self {
        Self {
            origin,
            lines: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn origin(&self) -> ContextId {
        self.origin
    }

    /// Record `text` against the calling context.
    pub fn append(&self, text: impl Into<String>) {
        let line = LogLine {
            context: ContextId::current(),
            text: text.into(),
        };
        self.lines.lock().push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Copy of the current lines, without clearing them.
    pub fn snapshot(&self) -> Vec<LogLine> {
        self.lines.lock().clone()
    }

    /// Take every line recorded so far, leaving the buffer empty.
    ///
    /// # Errors
    ///
    /// Returns [`ReboundError::WrongContext`] when called off the originating context; the
    /// buffer is left untouched.
    pub fn flush(&self) -> Result<Vec<LogLine>> {
        let actual = ContextId::current();
        if actual != self.origin {
            return Err(ReboundError::WrongContext {
                expected: self.origin,
                actual,
            });
        }
        Ok(core::mem::take(&mut *self.lines.lock()))
    }
}

impl fmt::Debug for LogBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogBuffer")
            .field("origin", &self.origin)
            .field("lines", &self.len())
            .finish()
    }
}
