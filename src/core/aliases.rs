//! Named search configurations

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    #[error("unknown alias: {0}")]
    Unknown(String),

    #[error("cannot combine --alias {0} with explicit search options")]
    ConflictingOptions(String),
}

/// Alias name → search options, as read from the toolchain file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable(BTreeMap<String, Vec<String>>);

impl AliasTable {
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Alias names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Replace `search_options` by the options of `alias`
    ///
    /// Explicit options and an alias are mutually exclusive.
    pub fn expand(&self, alias: &str, search_options: &[String]) -> Result<Vec<String>, AliasError> {
        if !search_options.is_empty() {
            return Err(AliasError::ConflictingOptions(alias.to_string()));
        }
        self.get(alias)
            .map(<[String]>::to_vec)
            .ok_or_else(|| AliasError::Unknown(alias.to_string()))
    }
}
