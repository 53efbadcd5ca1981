// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error fixtures.

use rebound_core::ReboundError;

/// User-level failure injected by tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("test failure: {0}")]
pub struct TestError(pub String);

/// A [`ReboundError::UserError`] wrapping a [`TestError`] with `message`.
pub fn test_error(message: &str) -> ReboundError {
    ReboundError::user_error(TestError(message.to_string()))
}
