// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rebound::{Button, ContinuationMode, Demo, DemoConfig, AFTER_AWAIT, INSIDE_NEXT_BLOCK};
use rebound_core::{AffinityScheduler, ContextId};
use rebound_test_utils::{test_error, ManualWork};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

const WAIT: Duration = Duration::from_secs(5);

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .build()
        .unwrap()
}

fn wait_pending(work: &ManualWork, count: usize) -> bool {
    wait_until(|| work.pending_count() >= count)
}

fn wait_until(condition: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + WAIT;
    while !condition() {
        if Instant::now() > deadline {
            return false;
        }
        thread::sleep(Duration::from_millis(1));
    }
    true
}

#[test]
fn test_button_labels() {
    let labels: Vec<_> = Button::ALL.iter().map(|button| button.label()).collect();

    assert_eq!(
        labels,
        vec![
            "Already Completed",
            "Not Completed",
            "Not Completed (Dispatcher)",
            "Not Completed (Current Context)"
        ]
    );
    assert_eq!(Button::NotCompleted.to_string(), "Not Completed");
}

#[test]
fn test_already_completed_click_renders_on_dispatcher() -> anyhow::Result<()> {
    // Arrange
    let work = ManualWork::new();
    let demo = Demo::with_work("ui", Arc::new(work.clone()))?;
    let origin = demo.dispatcher().context_id();

    // Act
    demo.click(Button::AlreadyCompleted)?;

    // Assert
    assert!(demo.sink().wait_for_blocks(1, WAIT));
    let block = &demo.sink().blocks()[0];
    assert_eq!(
        block.text,
        format!(
            "ThreadId: {origin}- Running Already Completed Task: NoReschedule \n\
             ThreadId: {origin}- {AFTER_AWAIT} \n\
             ThreadId: {origin}- {INSIDE_NEXT_BLOCK} \n"
        )
    );
    assert!(demo.log().is_empty());
    demo.shutdown();
    Ok(())
}

#[test]
fn test_buttons_route_to_their_strategies() -> anyhow::Result<()> {
    // Arrange
    let work = ManualWork::new();
    let demo = Demo::with_work("ui", Arc::new(work.clone()))?;
    let expected = [
        (Button::NotCompleted, "Running Not Completed Task: NoReschedule"),
        (
            Button::NotCompletedDispatcher,
            "Running Not Completed Task: PostAfterAsync",
        ),
        (
            Button::NotCompletedCurrentContext,
            "Running Not Completed Task: WholeTaskAsStream",
        ),
    ];

    for (rendered, (button, first_line)) in expected.into_iter().enumerate() {
        // Act
        demo.click(button)?;
        assert!(wait_pending(&work, 1));
        assert!(work.settle_next());

        // Assert
        assert!(demo.sink().wait_for_blocks(rendered + 1, WAIT), "{button}");
        let block = &demo.sink().blocks()[rendered];
        assert_eq!(block.lines[0].text, first_line);
        assert_eq!(block.lines.len(), 3);
    }

    demo.shutdown();
    Ok(())
}

#[test]
fn test_dispatcher_strategy_always_returns_to_dispatcher() -> anyhow::Result<()> {
    // Arrange
    let runtime = runtime();
    let demo = Demo::start(DemoConfig::default(), runtime.handle().clone())?;
    let origin = demo.dispatcher().context_id();

    // Act
    for round in 1..=25 {
        demo.click(Button::NotCompletedDispatcher)?;
        assert!(demo.sink().wait_for_blocks(round, WAIT), "round {round}");
    }

    // Assert
    for block in demo.sink().blocks() {
        assert!(block.lines.iter().all(|line| line.context == origin));
    }
    demo.shutdown();
    Ok(())
}

#[test]
fn test_not_completed_resumes_off_dispatcher() -> anyhow::Result<()> {
    for mode in [ContinuationMode::Tokio, ContinuationMode::Worker] {
        // Arrange
        let runtime = runtime();
        let config = DemoConfig::default()
            .with_dispatcher_name(format!("ui-{mode:?}"))
            .with_continuations(mode);
        let demo = Demo::start(config, runtime.handle().clone())?;
        let origin = demo.dispatcher().context_id();

        for (rendered, button) in [Button::NotCompleted, Button::NotCompletedCurrentContext]
            .into_iter()
            .enumerate()
        {
            // Act
            demo.click(button)?;
            assert!(demo.sink().wait_for_blocks(rendered + 1, WAIT), "{button}");

            // Assert
            let block = &demo.sink().blocks()[rendered];
            assert_eq!(block.lines[0].context, origin);
            assert_ne!(block.lines[1].context, origin, "{button} with {mode:?}");
            assert_ne!(block.lines[2].context, origin, "{button} with {mode:?}");
        }

        demo.shutdown();
    }
    Ok(())
}

#[test]
fn test_inline_continuations_resume_on_timer_context() -> anyhow::Result<()> {
    // Arrange
    let runtime = runtime();
    let config = DemoConfig::default().with_continuations(ContinuationMode::Inline);
    let demo = Demo::start(config, runtime.handle().clone())?;

    // Act
    demo.click(Button::NotCompleted)?;

    // Assert
    assert!(demo.sink().wait_for_blocks(1, WAIT));
    let block = &demo.sink().blocks()[0];
    assert_ne!(block.lines[1].context, demo.dispatcher().context_id());
    assert_ne!(block.lines[1].context, ContextId::current());
    demo.shutdown();
    Ok(())
}

#[test]
fn test_all_buttons_render_in_click_order() -> anyhow::Result<()> {
    // Arrange
    let runtime = runtime();
    let demo = Demo::start(DemoConfig::default(), runtime.handle().clone())?;

    // Act
    for (rendered, button) in Button::ALL.into_iter().enumerate() {
        demo.click(button)?;
        assert!(demo.sink().wait_for_blocks(rendered + 1, WAIT), "{button}");
    }

    // Assert
    let blocks = demo.sink().take_blocks();
    assert_eq!(blocks.len(), 4);
    assert!(blocks[0].lines[0].text.contains("Already Completed"));
    assert!(blocks[3].lines[0].text.ends_with("WholeTaskAsStream"));
    assert_eq!(demo.sink().block_count(), 0);
    assert!(demo.sink().failure().is_none());
    demo.shutdown();
    Ok(())
}

#[test]
fn test_click_after_shutdown_is_rejected() -> anyhow::Result<()> {
    // Arrange
    let demo = Demo::with_work("ui", Arc::new(ManualWork::new()))?;
    demo.shutdown();

    // Act
    let result = demo.click(Button::AlreadyCompleted);

    // Assert
    assert!(result.is_err_and(|error| error.is_scheduler_unavailable()));
    Ok(())
}

#[test]
fn test_click_after_failed_work_still_renders() -> anyhow::Result<()> {
    // Arrange
    let work = ManualWork::new();
    let demo = Demo::with_work("ui", Arc::new(work.clone()))?;
    let origin = demo.dispatcher().context_id();
    demo.click(Button::NotCompleted)?;
    assert!(wait_pending(&work, 1));
    assert!(work.fail_next(test_error("work failed")));
    assert!(wait_until(|| demo.sink().failure().is_some()));

    // Act
    demo.click(Button::AlreadyCompleted)?;

    // Assert
    assert!(demo.sink().wait_for_blocks(1, WAIT));
    assert!(demo.sink().failure().is_none());
    let block = &demo.sink().blocks()[0];
    let texts: Vec<_> = block.lines.iter().map(|line| line.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Running Not Completed Task: NoReschedule",
            "Running Already Completed Task: NoReschedule",
            AFTER_AWAIT,
            INSIDE_NEXT_BLOCK
        ]
    );
    assert!(block.lines.iter().skip(1).all(|line| line.context == origin));
    demo.shutdown();
    Ok(())
}

#[test]
fn test_every_strategy_recovers_after_failed_work() -> anyhow::Result<()> {
    // Arrange
    let work = ManualWork::new();
    let demo = Demo::with_work("ui", Arc::new(work.clone()))?;
    let failing = [
        Button::NotCompleted,
        Button::NotCompletedDispatcher,
        Button::NotCompletedCurrentContext,
    ];

    for (rendered, button) in failing.into_iter().enumerate() {
        // Act
        demo.click(button)?;
        assert!(wait_pending(&work, 1));
        assert!(work.fail_next(test_error("work failed")));
        assert!(wait_until(|| demo.sink().failure().is_some()), "{button}");
        demo.click(Button::AlreadyCompleted)?;

        // Assert
        assert!(demo.sink().wait_for_blocks(rendered + 1, WAIT), "{button}");
    }

    assert_eq!(work.started_count(), 6);
    demo.shutdown();
    Ok(())
}
