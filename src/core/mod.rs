//! Core domain models for the driver
//!
//! Components, limits, configuration, and the small utilities the driver
//! calls before and after the stage loop.

pub mod aliases;
pub mod cleanup;
pub mod component;
pub mod config;
pub mod limits;
pub mod returncodes;
pub mod stopwatch;

pub use aliases::{AliasError, AliasTable};
pub use component::{Component, ParseComponentError};
pub use config::{DriverConfig, LogLevel, StageCommand, StageLimits, ToolchainConfig};
pub use limits::{LimitError, Limits};
pub use stopwatch::{Stopwatch, Unsupported};
