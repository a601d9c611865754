//! Pipeline execution

pub mod driver;
pub mod outcome;
pub mod subprocess;

use crate::core::{Component, DriverConfig};
use async_trait::async_trait;

pub use driver::{Driver, DriverEvent};
pub use outcome::{DriverError, PipelineRun, StageOutcome};
pub use subprocess::SubprocessRunner;

/// Runs the individual pipeline stages
///
/// Implementations block until the stage has finished and report failures
/// only through the returned outcome.
#[async_trait]
pub trait StageRunner: Send + Sync {
    async fn run_translate(&self, config: &DriverConfig) -> StageOutcome;

    async fn run_search(&self, config: &DriverConfig) -> StageOutcome;

    async fn run_validate(&self, config: &DriverConfig) -> StageOutcome;

    /// Dispatch to the runner for `component`
    async fn run(&self, component: Component, config: &DriverConfig) -> StageOutcome {
        match component {
            Component::Translate => self.run_translate(config).await,
            Component::Search => self.run_search(config).await,
            Component::Validate => self.run_validate(config).await,
        }
    }
}
