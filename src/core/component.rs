//! Pipeline components

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A stage of the planning pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Translate,
    Search,
    Validate,
}

impl Component {
    /// All components in pipeline order
    pub const ALL: [Component; 3] = [Component::Translate, Component::Search, Component::Validate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Translate => "translate",
            Component::Search => "search",
            Component::Validate => "validate",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string does not name a pipeline component
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unhandled component: {0}")]
pub struct ParseComponentError(pub String);

impl FromStr for Component {
    type Err = ParseComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "translate" => Ok(Component::Translate),
            "search" => Ok(Component::Search),
            "validate" => Ok(Component::Validate),
            other => Err(ParseComponentError(other.to_string())),
        }
    }
}
