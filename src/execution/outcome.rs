//! Stage and pipeline results

use crate::core::{returncodes, Component};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Error types for driver operations
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to remove intermediate file {}: {source}", path.display())]
    RemoveIntermediate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to clean up temporary files: {0}")]
    Cleanup(#[source] std::io::Error),
}

/// What a stage reports back to the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageOutcome {
    pub exit_code: i32,

    /// Whether the next stage should run
    pub continue_execution: bool,
}

impl StageOutcome {
    pub fn new(exit_code: i32, continue_execution: bool) -> Self {
        Self {
            exit_code,
            continue_execution,
        }
    }

    /// Continue with the next stage
    pub fn proceed(exit_code: i32) -> Self {
        Self::new(exit_code, true)
    }

    /// Stop after this stage
    pub fn stop(exit_code: i32) -> Self {
        Self::new(exit_code, false)
    }
}

/// Record of one driver invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineRun {
    /// Exit code of the last stage that ran; `None` if none ran
    pub last_exit_code: Option<i32>,

    /// Stages that ran, in order
    pub executed: Vec<(Component, StageOutcome)>,

    /// Stage whose outcome stopped the loop early
    pub aborted_after: Option<Component>,

    /// Planner time, when the host can measure it
    pub planner_time: Option<Duration>,
}

impl PipelineRun {
    /// Process exit status; no stage run means success
    pub fn exit_code(&self) -> i32 {
        self.last_exit_code.unwrap_or(returncodes::SUCCESS)
    }

    pub fn ran(&self, component: Component) -> bool {
        self.executed.iter().any(|(c, _)| *c == component)
    }

    /// Components that ran, in order
    pub fn components(&self) -> Vec<Component> {
        self.executed.iter().map(|(c, _)| *c).collect()
    }
}
