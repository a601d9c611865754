//! Test: Stage Sequencing - order, early stop, and the final exit code

use crate::helpers::*;
use driver::{Component, DriverEvent, StageOutcome};

/// Test that an empty component list runs nothing and has no exit code
#[tokio::test]
async fn test_empty_components_run_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), vec![]);

    let result = run_driver(&config, ScriptedRunner::new()).await.unwrap();

    assert!(result.calls.is_empty());
    assert_eq!(result.run.last_exit_code, None);
    // No code set maps to a successful process exit
    assert_eq!(result.run.exit_code(), 0);
    assert_eq!(result.run.aborted_after, None);
    assert!(matches!(result.events[0], DriverEvent::LimitsReported { .. }));
}

/// Test that every stage runs once, in order, when all of them continue
#[tokio::test]
async fn test_all_stages_continue() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), Component::ALL.to_vec());
    let runner = ScriptedRunner::new()
        .with(Component::Translate, StageOutcome::proceed(0))
        .with(Component::Search, StageOutcome::proceed(1))
        .with(Component::Validate, StageOutcome::proceed(5));

    let result = run_driver(&config, runner).await.unwrap();

    assert_eq!(result.called(), Component::ALL.to_vec());
    assert_eq!(result.run.components(), Component::ALL.to_vec());
    assert_eq!(result.run.last_exit_code, Some(5));
    assert_eq!(result.run.aborted_after, None);
    assert_stage_finished(&result, Component::Translate, 0);
    assert_stage_finished(&result, Component::Search, 1);
    assert_stage_finished(&result, Component::Validate, 5);
}

/// Test that a stopping stage prevents every later stage
#[tokio::test]
async fn test_stop_skips_remaining_stages() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), Component::ALL.to_vec());
    let runner = ScriptedRunner::new()
        .with(Component::Translate, StageOutcome::proceed(0))
        .with(Component::Search, StageOutcome::stop(12));

    let result = run_driver(&config, runner).await.unwrap();

    assert_eq!(result.called(), vec![Component::Translate, Component::Search]);
    assert!(!result.run.ran(Component::Validate));
    assert_eq!(result.run.last_exit_code, Some(12));
    assert_eq!(result.run.aborted_after, Some(Component::Search));
    assert!(result.events.contains(&DriverEvent::Aborted {
        component: Component::Search
    }));
}

/// translate (0, continue), search (12, continue), intermediate not kept
#[tokio::test]
async fn test_translate_then_search_exits_with_search_code() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), vec![Component::Translate, Component::Search]);
    let runner = ScriptedRunner::new()
        .with(Component::Translate, StageOutcome::proceed(0))
        .with(Component::Search, StageOutcome::proceed(12));

    let result = run_driver(&config, runner).await.unwrap();

    let translate_done = result
        .position(|e| matches!(e, DriverEvent::StageFinished { component: Component::Translate, exit_code: 0 }))
        .expect("translate reported");
    let removal = result
        .position(|e| matches!(e, DriverEvent::RemovingIntermediate { .. }))
        .expect("removal announced");
    let search_done = result
        .position(|e| matches!(e, DriverEvent::StageFinished { component: Component::Search, exit_code: 12 }))
        .expect("search reported");

    assert!(translate_done < removal && removal < search_done);
    assert!(!config.sas_file.exists());
    assert_eq!(result.run.exit_code(), 12);
    assert_eq!(result.run.aborted_after, None);
}

/// translate (1, stop) aborts the driver with code 1
#[tokio::test]
async fn test_translate_failure_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), vec![Component::Translate, Component::Search]);
    let runner = ScriptedRunner::new().with(Component::Translate, StageOutcome::stop(1));

    let result = run_driver(&config, runner).await.unwrap();

    assert_eq!(result.called(), vec![Component::Translate]);
    assert_eq!(result.run.exit_code(), 1);
    assert_eq!(
        result.events.iter().rev().nth(1),
        Some(&DriverEvent::Aborted {
            component: Component::Translate
        })
    );
}

/// Test that the caller's order is used as given
#[tokio::test]
async fn test_components_run_in_caller_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), vec![Component::Validate, Component::Translate]);
    let runner = ScriptedRunner::new()
        .with(Component::Validate, StageOutcome::proceed(0))
        .with(Component::Translate, StageOutcome::proceed(3));

    let result = run_driver(&config, runner).await.unwrap();

    assert_eq!(result.called(), vec![Component::Validate, Component::Translate]);
    assert_eq!(result.run.last_exit_code, Some(3));
}

/// Test that a stop from the last stage still reports the abort
#[tokio::test]
async fn test_stop_on_last_stage() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), vec![Component::Translate, Component::Validate]);
    let runner = ScriptedRunner::new().with(Component::Validate, StageOutcome::stop(0));

    let result = run_driver(&config, runner).await.unwrap();

    assert_eq!(result.called(), vec![Component::Translate, Component::Validate]);
    assert_eq!(result.run.aborted_after, Some(Component::Validate));
    assert_eq!(result.run.last_exit_code, Some(0));
}
