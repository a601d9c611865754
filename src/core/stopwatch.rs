//! Planner time measurement

use std::time::{Duration, Instant};
use thiserror::Error;

/// The host cannot measure planner time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("measuring planner time is not supported: {0}")]
pub struct Unsupported(pub &'static str);

/// Wall-clock stopwatch started at process entry
///
/// Copied into every collaborator that needs the elapsed time so that all of
/// them measure against the same origin.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Result<Instant, Unsupported>,
}

impl Stopwatch {
    /// Start measuring now
    pub fn start() -> Self {
        Self {
            started: now(),
        }
    }

    /// A stopwatch for hosts without a usable clock
    pub fn unavailable(reason: &'static str) -> Self {
        Self {
            started: Err(Unsupported(reason)),
        }
    }

    pub fn elapsed(&self) -> Result<Duration, Unsupported> {
        let started = self.started?;
        now()?
            .checked_duration_since(started)
            .ok_or(Unsupported("monotonic clock went backwards"))
    }

    /// Elapsed time, or zero where it cannot be measured
    pub fn elapsed_or_zero(&self) -> Duration {
        self.elapsed().unwrap_or_default()
    }
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
fn now() -> Result<Instant, Unsupported> {
    Ok(Instant::now())
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
fn now() -> Result<Instant, Unsupported> {
    Err(Unsupported("no monotonic clock on this target"))
}
