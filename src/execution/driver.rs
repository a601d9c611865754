//! The driver - sequences the pipeline stages

use crate::{
    core::{cleanup, Component, DriverConfig, Limits, Stopwatch},
    execution::{DriverError, PipelineRun, StageRunner},
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Things the driver reports while it runs
#[derive(Debug, Clone, PartialEq)]
pub enum DriverEvent {
    Version {
        version: &'static str,
        build: String,
    },
    Aliases {
        names: Vec<String>,
    },
    CleanedUp {
        removed: Vec<PathBuf>,
    },
    LimitsReported {
        label: &'static str,
        limits: Limits,
    },
    /// Announced before the file is deleted
    RemovingIntermediate {
        path: PathBuf,
    },
    StageFinished {
        component: Component,
        exit_code: i32,
    },
    Aborted {
        component: Component,
    },
    PlannerTime {
        elapsed: Duration,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(&DriverEvent) + Send + Sync>;

/// Runs the requested stages in order and tracks the exit code
pub struct Driver<R> {
    runner: R,
    stopwatch: Stopwatch,
    event_handlers: Vec<EventHandler>,
}

impl<R: StageRunner> Driver<R> {
    pub fn new(runner: R, stopwatch: Stopwatch) -> Self {
        Self {
            runner,
            stopwatch,
            event_handlers: Vec::new(),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(&DriverEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    fn emit_event(&self, event: DriverEvent) {
        for handler in &self.event_handlers {
            handler(&event);
        }
    }

    /// Run the driver for `config`
    ///
    /// Version, alias listing and cleanup return before any stage runs, in
    /// that order of precedence. Otherwise every component runs in order
    /// until one asks to stop.
    pub async fn run(&self, config: &DriverConfig) -> Result<PipelineRun, DriverError> {
        if config.version {
            self.emit_event(DriverEvent::Version {
                version: env!("CARGO_PKG_VERSION"),
                build: config.build.clone(),
            });
            return Ok(PipelineRun::default());
        }

        if config.show_aliases {
            let names = config.toolchain.aliases.names().map(str::to_string).collect();
            self.emit_event(DriverEvent::Aliases { names });
            return Ok(PipelineRun::default());
        }

        if config.cleanup {
            let removed = cleanup::cleanup_temporary_files(config).map_err(DriverError::Cleanup)?;
            self.emit_event(DriverEvent::CleanedUp { removed });
            return Ok(PipelineRun::default());
        }

        self.emit_event(DriverEvent::LimitsReported {
            label: "planner",
            limits: config.overall_limits,
        });

        let mut run = PipelineRun::default();
        for &component in &config.components {
            debug!("Running {}", component);
            let outcome = self.runner.run(component, config).await;

            if component == Component::Search && !config.keep_sas_file {
                self.remove_intermediate(config)?;
            }

            run.last_exit_code = Some(outcome.exit_code);
            run.executed.push((component, outcome));
            self.emit_event(DriverEvent::StageFinished {
                component,
                exit_code: outcome.exit_code,
            });

            if !outcome.continue_execution {
                warn!("{} asked the driver to stop", component);
                run.aborted_after = Some(component);
                self.emit_event(DriverEvent::Aborted { component });
                break;
            }
        }

        match self.stopwatch.elapsed() {
            Ok(elapsed) => {
                info!("Planner time: {:.2}s", elapsed.as_secs_f64());
                run.planner_time = Some(elapsed);
                self.emit_event(DriverEvent::PlannerTime { elapsed });
            }
            Err(e) => debug!("{}", e),
        }

        Ok(run)
    }

    fn remove_intermediate(&self, config: &DriverConfig) -> Result<(), DriverError> {
        let path = config.sas_file.clone();
        self.emit_event(DriverEvent::RemovingIntermediate { path: path.clone() });
        std::fs::remove_file(&path).map_err(|source| DriverError::RemoveIntermediate { path, source })
    }
}
