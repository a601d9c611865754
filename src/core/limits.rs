//! Time and memory limits

use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

const BYTES_PER_MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
    #[error("time limit {0:?} must be a number optionally followed by s, m or h")]
    InvalidTime(String),

    #[error("memory limit {0:?} must be a number optionally followed by K, M or G")]
    InvalidMemory(String),
}

/// Parse a time limit; plain numbers are seconds
pub fn parse_time_limit(s: &str) -> Result<Duration, LimitError> {
    let invalid = || LimitError::InvalidTime(s.to_string());
    let trimmed = s.trim();
    let (digits, factor) = match trimmed.chars().last() {
        Some('s') => (&trimmed[..trimmed.len() - 1], 1),
        Some('m') => (&trimmed[..trimmed.len() - 1], 60),
        Some('h') => (&trimmed[..trimmed.len() - 1], 3600),
        _ => (trimmed, 1),
    };
    let value: u64 = digits.parse().map_err(|_| invalid())?;
    value
        .checked_mul(factor)
        .map(Duration::from_secs)
        .ok_or_else(invalid)
}

/// Parse a memory limit into bytes; plain numbers are MiB
pub fn parse_memory_limit(s: &str) -> Result<u64, LimitError> {
    let invalid = || LimitError::InvalidMemory(s.to_string());
    let trimmed = s.trim();
    let (digits, factor) = match trimmed.chars().last().map(|c| c.to_ascii_lowercase()) {
        Some('k') => (&trimmed[..trimmed.len() - 1], 1024),
        Some('m') => (&trimmed[..trimmed.len() - 1], BYTES_PER_MIB),
        Some('g') => (&trimmed[..trimmed.len() - 1], 1024 * BYTES_PER_MIB),
        _ => (trimmed, BYTES_PER_MIB),
    };
    let value: u64 = digits.parse().map_err(|_| invalid())?;
    value.checked_mul(factor).ok_or_else(invalid)
}

/// A time and memory limit pair; `None` means unlimited
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Limits {
    pub time: Option<Duration>,
    pub memory: Option<u64>,
}

impl Limits {
    pub fn new(time: Option<Duration>, memory: Option<u64>) -> Self {
        Self { time, memory }
    }

    /// Render the two-line banner for `label`
    pub fn banner<'a>(&'a self, label: &'a str) -> LimitsBanner<'a> {
        LimitsBanner { label, limits: self }
    }
}

pub struct LimitsBanner<'a> {
    label: &'a str,
    limits: &'a Limits,
}

impl fmt::Display for LimitsBanner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.limits.time {
            Some(time) => writeln!(f, "{} time limit: {}s", self.label, time.as_secs())?,
            None => writeln!(f, "{} time limit: unlimited", self.label)?,
        }
        match self.limits.memory {
            Some(bytes) => write!(f, "{} memory limit: {} MB", self.label, bytes / BYTES_PER_MIB),
            None => write!(f, "{} memory limit: unlimited", self.label),
        }
    }
}

/// Time a stage may use given its own limit and what is left of the overall one
pub fn effective_time_limit(
    stage: Option<Duration>,
    overall: Option<Duration>,
    elapsed: Duration,
) -> Option<Duration> {
    let remaining = overall.map(|limit| limit.saturating_sub(elapsed));
    match (stage, remaining) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
