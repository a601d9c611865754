//! Command-line interface

pub mod output;

use crate::core::{
    aliases::AliasError,
    limits::{parse_memory_limit, parse_time_limit},
    Component, DriverConfig, Limits, LogLevel, StageLimits, ToolchainConfig,
};
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_SAS_FILE: &str = "output.sas";

/// Errors in otherwise well-formed arguments
#[derive(Debug, Error)]
pub enum ArgsError {
    #[error("no planner input files given")]
    NoInputs,

    #[error(transparent)]
    Alias(#[from] AliasError),
}

/// Runs the translate, search and validate stages of a planner
#[derive(Debug, Parser, Clone)]
#[command(name = "driver")]
#[command(author = "Driver Contributors")]
#[command(about = "Runs the translate, search and validate stages of a planner", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print version and build, then exit
    #[arg(long)]
    pub version: bool,

    /// List the configured search aliases, then exit
    #[arg(long)]
    pub show_aliases: bool,

    /// Remove the intermediate file and plan files, then exit
    #[arg(long)]
    pub cleanup: bool,

    /// Log verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Build whose executables to use
    #[arg(long, default_value = "release")]
    pub build: String,

    /// Toolchain file with stage commands and aliases
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Time limit for the whole planner (e.g. 1800, 30m, 2h)
    #[arg(long, value_parser = parse_time_limit)]
    pub overall_time_limit: Option<Duration>,

    /// Memory limit for the whole planner (MiB, or with K/M/G suffix); reported only
    #[arg(long, value_parser = parse_memory_limit)]
    pub overall_memory_limit: Option<u64>,

    #[arg(long, value_parser = parse_time_limit)]
    pub translate_time_limit: Option<Duration>,

    #[arg(long, value_parser = parse_time_limit)]
    pub search_time_limit: Option<Duration>,

    #[arg(long, value_parser = parse_time_limit)]
    pub validate_time_limit: Option<Duration>,

    /// Run the translator
    #[arg(long)]
    pub translate: bool,

    /// Run the search
    #[arg(long)]
    pub search: bool,

    /// Validate the plan
    #[arg(long)]
    pub validate: bool,

    /// Run translate, search and validate
    #[arg(long, conflicts_with_all = ["translate", "search", "validate"])]
    pub run_all: bool,

    /// Explicit stage order (e.g. translate,search)
    #[arg(long, value_enum, value_delimiter = ',', conflicts_with_all = ["translate", "search", "validate", "run_all"])]
    pub components: Vec<Component>,

    /// Keep the intermediate file after the search
    #[arg(long)]
    pub keep_sas_file: bool,

    /// Intermediate file; implies --keep-sas-file
    #[arg(long)]
    pub sas_file: Option<PathBuf>,

    /// Where the search writes its plan
    #[arg(long, default_value = "sas_plan")]
    pub plan_file: PathBuf,

    /// Use the search options of a configured alias
    #[arg(long)]
    pub alias: Option<String>,

    /// Planner input files
    pub inputs: Vec<PathBuf>,

    /// Options passed to the search
    #[arg(last = true)]
    pub search_options: Vec<String>,
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }

    fn early_exit(&self) -> bool {
        self.version || self.show_aliases || self.cleanup
    }

    fn selected_components(&self) -> Vec<Component> {
        if !self.components.is_empty() {
            return self.components.clone();
        }
        if self.run_all {
            return Component::ALL.to_vec();
        }

        let flags = [
            (Component::Translate, self.translate),
            (Component::Search, self.search),
            (Component::Validate, self.validate),
        ];
        let chosen: Vec<_> = flags.iter().filter(|(_, on)| *on).map(|(c, _)| *c).collect();
        if !chosen.is_empty() {
            return chosen;
        }

        match self.inputs.as_slice() {
            [task] if is_translated_task(task) => vec![Component::Search],
            _ => vec![Component::Translate, Component::Search],
        }
    }

    /// Resolve the arguments against `toolchain`
    pub fn into_config(self, toolchain: ToolchainConfig) -> Result<DriverConfig, ArgsError> {
        let components = self.selected_components();

        let mut keep_sas_file = self.keep_sas_file || self.sas_file.is_some();
        let sas_file = self
            .sas_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAS_FILE));

        // Without translate there is no intermediate file to remove
        let mut search_input = None;
        if !components.contains(&Component::Translate) && components.contains(&Component::Search) {
            if let [task] = self.inputs.as_slice() {
                if is_translated_task(task) {
                    search_input = Some(task.clone());
                    keep_sas_file = true;
                }
            }
        }

        let mut search_options = self.search_options.clone();
        if !self.early_exit() {
            if self.inputs.is_empty() {
                return Err(ArgsError::NoInputs);
            }
            if let Some(alias) = &self.alias {
                search_options = toolchain.aliases.expand(alias, &search_options)?;
            }
        }

        Ok(DriverConfig {
            log_level: self.log_level,
            version: self.version,
            show_aliases: self.show_aliases,
            cleanup: self.cleanup,
            build: self.build,
            overall_limits: Limits::new(self.overall_time_limit, self.overall_memory_limit),
            stage_limits: StageLimits {
                translate: self.translate_time_limit,
                search: self.search_time_limit,
                validate: self.validate_time_limit,
            },
            components,
            inputs: self.inputs,
            search_options,
            sas_file,
            keep_sas_file,
            search_input,
            plan_file: self.plan_file,
            toolchain,
        })
    }
}

fn is_translated_task(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "sas")
}
