// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Clicks every button of the demo once and prints what the sink rendered.
//!
//! `RUST_LOG` controls the log output (defaults to `info`). Pass `worker` or `inline` as the
//! first argument to change where pending work resumes.

use anyhow::{bail, Context};
use rebound::{Button, ContinuationMode, Demo, DemoConfig};
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const RENDER_TIMEOUT: Duration = Duration::from_secs(5);

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_thread_names(true))
        .init();
}

fn continuation_mode(arg: Option<String>) -> anyhow::Result<ContinuationMode> {
    match arg.as_deref() {
        None | Some("tokio") => Ok(ContinuationMode::Tokio),
        Some("worker") => Ok(ContinuationMode::Worker),
        Some("inline") => Ok(ContinuationMode::Inline),
        Some(other) => {
            bail!("unknown continuation mode '{other}' (expected tokio, worker or inline)")
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mode = continuation_mode(std::env::args().nth(1))?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("pool")
        .enable_time()
        .build()
        .context("failed to build the tokio runtime")?;

    let config = DemoConfig::default()
        .with_pending_delay(Duration::from_millis(20))
        .with_continuations(mode);
    let demo = Demo::start(config, runtime.handle().clone())?;
    tracing::info!(mode = ?mode, "Demo started");

    for (clicked, button) in Button::ALL.into_iter().enumerate() {
        demo.click(button)?;
        if !demo.sink().wait_for_blocks(clicked + 1, RENDER_TIMEOUT) {
            demo.shutdown();
            match demo.sink().failure() {
                Some(error) => return Err(error).context(format!("'{button}' failed")),
                None => bail!("'{button}' rendered nothing within {RENDER_TIMEOUT:?}"),
            }
        }
    }

    for (button, block) in Button::ALL.iter().zip(demo.sink().blocks()) {
        println!("== {button} ==");
        print!("{}", block.text);
    }

    demo.shutdown();
    Ok(())
}
