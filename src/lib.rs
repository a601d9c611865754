//! driver - runs the translate, search and validate stages of a planner

pub mod cli;
pub mod core;
pub mod execution;

// Re-export commonly used types
pub use crate::core::{Component, DriverConfig, Limits, Stopwatch, ToolchainConfig};
pub use execution::{Driver, DriverError, DriverEvent, PipelineRun, StageOutcome, StageRunner};
pub use execution::SubprocessRunner;
