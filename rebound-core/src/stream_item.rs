// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::{ReboundError, Result};

/// One signal of an event stream, as seen through a pull-based view.
///
/// Completion has no item of its own: the view simply ends. An `Error` is always the last
/// item before that.
#[derive(Debug, Clone)]
pub enum StreamItem<T> {
    Value(T),
    Error(ReboundError),
}

impl<T> StreamItem<T> {
    /// The value, or the error that terminated the stream.
    pub fn into_result(self) -> Result<T> {
        match self {
            StreamItem::Value(value) => Ok(value),
            StreamItem::Error(error) => Err(error),
        }
    }
}
