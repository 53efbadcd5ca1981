// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Everything needed to build and subscribe to pipelines.
//!
//! ```
//! use rebound_stream::prelude::*;
//! ```

pub use crate::{
    bridge, empty, fail, just, merge_all, to_stream_current_context, AsyncSubject,
    BoxEventStream, CompletableExt, EventStream, EventStreamExt, FlatMapExt, IntoStreamExt,
    MapExt, MergeExt, ObserveOnExt, Observer, Reentry, TakeExt, TapExt, Trigger,
};
