//! Test: Early Exit - version, alias listing and cleanup bypass the stages

use crate::helpers::*;
use driver::{Component, DriverEvent, ToolchainConfig};

fn aliases() -> ToolchainConfig {
    ToolchainConfig::from_yaml(
        r#"
aliases:
  lama-first: ["--search", "lazy_greedy([hff])"]
  astar-lmcut: ["--search", "astar(lmcut())"]
"#,
    )
    .unwrap()
}

/// Test that --version wins over the other early-exit modes
#[tokio::test]
async fn test_version_takes_precedence() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path(), Component::ALL.to_vec());
    std::fs::write(&config.sas_file, "kept").unwrap();
    config.version = true;
    config.show_aliases = true;
    config.cleanup = true;

    let result = run_driver(&config, ScriptedRunner::new()).await.unwrap();

    assert!(result.calls.is_empty());
    assert_eq!(result.run.last_exit_code, None);
    assert_eq!(result.events.len(), 1);
    assert!(matches!(result.events[0], DriverEvent::Version { .. }));
    assert!(config.sas_file.exists(), "cleanup must not run");
}

/// Test that alias listing wins over cleanup
#[tokio::test]
async fn test_show_aliases_before_cleanup() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path(), Component::ALL.to_vec()).with_toolchain(aliases());
    std::fs::write(&config.sas_file, "kept").unwrap();
    config.show_aliases = true;
    config.cleanup = true;

    let result = run_driver(&config, ScriptedRunner::new()).await.unwrap();

    assert!(result.calls.is_empty());
    assert_eq!(
        result.events,
        vec![DriverEvent::Aliases {
            names: vec!["astar-lmcut".to_string(), "lama-first".to_string()],
        }]
    );
    assert!(config.sas_file.exists());
}

/// Test that cleanup removes temporary files and runs no stage
#[tokio::test]
async fn test_cleanup_removes_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path(), Component::ALL.to_vec());
    std::fs::write(&config.sas_file, "stale").unwrap();
    std::fs::write(&config.plan_file, "stale").unwrap();
    config.cleanup = true;

    let result = run_driver(&config, ScriptedRunner::new()).await.unwrap();

    assert!(result.calls.is_empty());
    assert_eq!(result.run.exit_code(), 0);
    assert!(!config.sas_file.exists());
    assert!(!config.plan_file.exists());
    match &result.events[..] {
        [DriverEvent::CleanedUp { removed }] => assert_eq!(removed.len(), 2),
        other => panic!("unexpected events: {:?}", other),
    }
}

/// Test that no early exit means the limits banner comes first
#[tokio::test]
async fn test_without_early_exit_limits_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), vec![Component::Translate]);

    let result = run_driver(&config, ScriptedRunner::new()).await.unwrap();

    assert!(matches!(
        result.events[0],
        DriverEvent::LimitsReported { label: "planner", .. }
    ));
    assert_eq!(result.called(), vec![Component::Translate]);
}
