//! CLI output formatting

use crate::execution::DriverEvent;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");

/// Format a driver event for the console
pub fn format_driver_event(event: &DriverEvent) -> String {
    match event {
        DriverEvent::Version { version, build } => {
            format!("driver {} (build: {})", version, style(build).bold())
        }
        DriverEvent::Aliases { names } => {
            if names.is_empty() {
                format!("{} No aliases defined", INFO)
            } else {
                names.join("\n")
            }
        }
        DriverEvent::CleanedUp { removed } => {
            let mut lines = vec![format!("{} Removed {} file(s)", INFO, removed.len())];
            lines.extend(removed.iter().map(|path| format!("  {}", style(path.display()).dim())));
            lines.join("\n")
        }
        DriverEvent::LimitsReported { label, limits } => format!("{}\n", limits.banner(label)),
        DriverEvent::RemovingIntermediate { path } => {
            format!("Remove intermediate file {}", style(path.display()).dim())
        }
        DriverEvent::StageFinished { component, exit_code } => {
            let code = if *exit_code == 0 {
                style(exit_code).green()
            } else {
                style(exit_code).yellow()
            };
            format!("{} exit code: {}\n", style(component).bold(), code)
        }
        DriverEvent::Aborted { component } => {
            format!("{} Driver aborting after {}", WARN, style(component).red())
        }
        // Logged by the driver itself
        DriverEvent::PlannerTime { .. } => String::new(),
    }
}
