//! Stage runner that launches the stage executables as subprocesses

use crate::{
    core::{limits, returncodes, Component, DriverConfig, Stopwatch},
    execution::{StageOutcome, StageRunner},
};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// Why a stage produced no exit status of its own
#[derive(Debug)]
enum LaunchFailure {
    /// The stage input could not be opened
    Input(std::io::Error),
    /// The executable could not be spawned or waited on
    Spawn(std::io::Error),
    TimedOut(Duration),
}

/// Exit codes the runner substitutes when a stage fails to launch or finish
struct FailureCodes {
    input: i32,
    critical: i32,
    out_of_time: i32,
}

fn failure_codes(component: Component) -> FailureCodes {
    match component {
        Component::Translate => FailureCodes {
            input: returncodes::TRANSLATE_INPUT_ERROR,
            critical: returncodes::TRANSLATE_CRITICAL_ERROR,
            out_of_time: returncodes::TRANSLATE_OUT_OF_TIME,
        },
        Component::Search => FailureCodes {
            input: returncodes::SEARCH_INPUT_ERROR,
            critical: returncodes::SEARCH_CRITICAL_ERROR,
            out_of_time: returncodes::SEARCH_OUT_OF_TIME,
        },
        Component::Validate => FailureCodes {
            input: returncodes::DRIVER_INPUT_ERROR,
            critical: returncodes::DRIVER_CRITICAL_ERROR,
            out_of_time: returncodes::DRIVER_CRITICAL_ERROR,
        },
    }
}

/// Runs each stage as the executable named in the toolchain configuration
#[derive(Debug, Clone, Copy)]
pub struct SubprocessRunner {
    stopwatch: Stopwatch,
}

impl SubprocessRunner {
    /// Create a runner that budgets stage time against `stopwatch`
    pub fn new(stopwatch: Stopwatch) -> Self {
        Self { stopwatch }
    }

    /// Launch `component` with `stage_args` after the configured ones
    ///
    /// # Errors
    /// Returns `LaunchFailure` if:
    /// - `stdin` cannot be opened
    /// - the executable cannot be spawned
    /// - the stage exceeds its time limit (the child is killed)
    async fn launch(
        &self,
        component: Component,
        config: &DriverConfig,
        stage_args: Vec<OsString>,
        stdin: Option<&Path>,
    ) -> Result<ExitStatus, LaunchFailure> {
        let stage = config.toolchain.command(component);
        let program = stage.program(&config.build);

        let time_limit = limits::effective_time_limit(
            config.stage_limits.get(component),
            config.overall_limits.time,
            self.stopwatch.elapsed_or_zero(),
        );
        match time_limit {
            Some(limit) => info!("{} time limit: {}s", component, limit.as_secs()),
            None => info!("{} time limit: unlimited", component),
        }

        let mut command = Command::new(&program);
        command.args(&stage.args).args(&stage_args).kill_on_drop(true);
        if let Some(path) = stdin {
            let file = std::fs::File::open(path).map_err(LaunchFailure::Input)?;
            command.stdin(Stdio::from(file));
        }

        debug!("Spawning {} {:?} {:?}", program, stage.args, stage_args);
        let mut child = command.spawn().map_err(LaunchFailure::Spawn)?;

        match time_limit {
            Some(limit) => {
                let waited = timeout(limit, child.wait()).await;
                match waited {
                    Ok(status) => status.map_err(LaunchFailure::Spawn),
                    Err(_) => {
                        if let Err(e) = child.kill().await {
                            warn!("Failed to kill {} after timeout: {}", component, e);
                        }
                        Err(LaunchFailure::TimedOut(limit))
                    }
                }
            }
            None => child.wait().await.map_err(LaunchFailure::Spawn),
        }
    }

    /// Launch and reduce the result to an exit code
    async fn exit_code(
        &self,
        component: Component,
        config: &DriverConfig,
        stage_args: Vec<OsString>,
        stdin: Option<&Path>,
    ) -> i32 {
        let codes = failure_codes(component);
        match self.launch(component, config, stage_args, stdin).await {
            Ok(status) => status_code(&status, codes.critical),
            Err(LaunchFailure::Input(e)) => {
                error!("Cannot read input for {}: {}", component, e);
                codes.input
            }
            Err(LaunchFailure::Spawn(e)) => {
                error!(
                    "Failed to execute {} ({}): {}",
                    component,
                    config.toolchain.command(component).program(&config.build),
                    e
                );
                codes.critical
            }
            Err(LaunchFailure::TimedOut(limit)) => {
                error!("{} exceeded its time limit of {}s", component, limit.as_secs());
                codes.out_of_time
            }
        }
    }
}

/// Exit code of a finished child; killed-by-signal becomes `-signal`
fn status_code(status: &ExitStatus, fallback: i32) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    fallback
}

fn os_args<I, P>(items: I) -> Vec<OsString>
where
    I: IntoIterator<Item = P>,
    P: Into<OsString>,
{
    items.into_iter().map(Into::into).collect()
}

#[async_trait]
impl StageRunner for SubprocessRunner {
    async fn run_translate(&self, config: &DriverConfig) -> StageOutcome {
        let mut args = os_args(&config.inputs);
        args.push("--sas-file".into());
        args.push(config.sas_file.clone().into());

        let code = self.exit_code(Component::Translate, config, args, None).await;
        StageOutcome::new(code, code == returncodes::SUCCESS)
    }

    async fn run_search(&self, config: &DriverConfig) -> StageOutcome {
        let mut args = vec![OsString::from("--internal-plan-file"), config.plan_file.clone().into()];
        args.extend(os_args(&config.search_options));

        let code = self
            .exit_code(Component::Search, config, args, Some(config.search_task()))
            .await;
        StageOutcome::new(code, returncodes::plan_found(code))
    }

    async fn run_validate(&self, config: &DriverConfig) -> StageOutcome {
        let mut args = os_args(&config.inputs);
        args.push(config.plan_file.clone().into());

        let code = self.exit_code(Component::Validate, config, args, None).await;
        StageOutcome::new(code, code == returncodes::SUCCESS)
    }
}
