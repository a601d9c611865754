//! Toolchain configuration from YAML and the resolved driver configuration

use crate::core::{aliases::AliasTable, component::Component, limits::Limits};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const TOOLCHAIN_DIR: &str = "planner-driver";
const TOOLCHAIN_FILE: &str = "toolchain.yaml";

/// How to launch one stage executable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCommand {
    /// Executable path; `{build}` is replaced by the selected build name
    pub command: String,

    /// Arguments placed before the stage-specific ones
    #[serde(default)]
    pub args: Vec<String>,
}

impl StageCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Executable path for `build`
    pub fn program(&self, build: &str) -> String {
        self.command.replace("{build}", build)
    }
}

/// Stage executables and search aliases loaded from YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    #[serde(default = "default_translate")]
    pub translate: StageCommand,

    #[serde(default = "default_search")]
    pub search: StageCommand,

    #[serde(default = "default_validate")]
    pub validate: StageCommand,

    #[serde(default)]
    pub aliases: AliasTable,
}

fn default_translate() -> StageCommand {
    StageCommand::new("translate")
}

fn default_search() -> StageCommand {
    StageCommand::new("search")
}

fn default_validate() -> StageCommand {
    StageCommand::new("validate")
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            translate: default_translate(),
            search: default_search(),
            validate: default_validate(),
            aliases: AliasTable::default(),
        }
    }
}

impl ToolchainConfig {
    /// Load toolchain configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read toolchain file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid toolchain file {}", path.display()))
    }

    /// Parse toolchain configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ToolchainConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for component in Component::ALL {
            if self.command(component).command.trim().is_empty() {
                anyhow::bail!("Component '{}' has an empty command", component);
            }
        }
        Ok(())
    }

    /// Explicit path, else the per-user file if it exists, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_path().filter(|path| path.is_file()) {
            Some(path) => {
                debug!("Using toolchain file {}", path.display());
                Self::from_file(path)
            }
            None => {
                debug!("No toolchain file found, using executables on PATH");
                Ok(Self::default())
            }
        }
    }

    pub fn command(&self, component: Component) -> &StageCommand {
        match component {
            Component::Translate => &self.translate,
            Component::Search => &self.search,
            Component::Validate => &self.validate,
        }
    }
}

/// `<config dir>/planner-driver/toolchain.yaml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(TOOLCHAIN_DIR).join(TOOLCHAIN_FILE))
}

/// Log verbosity selectable on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warning => tracing::Level::WARN,
        }
    }
}

/// Per-stage time limits, enforced by the stage runner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageLimits {
    pub translate: Option<Duration>,
    pub search: Option<Duration>,
    pub validate: Option<Duration>,
}

impl StageLimits {
    pub fn get(&self, component: Component) -> Option<Duration> {
        match component {
            Component::Translate => self.translate,
            Component::Search => self.search,
            Component::Validate => self.validate,
        }
    }
}

/// Fully resolved configuration the driver runs from
#[derive(Debug, Clone, Serialize)]
pub struct DriverConfig {
    pub log_level: LogLevel,

    /// Report the version and exit
    pub version: bool,

    /// List the aliases and exit
    pub show_aliases: bool,

    /// Remove temporary files and exit
    pub cleanup: bool,

    /// Build name used in version output and `{build}` placeholders
    pub build: String,

    pub overall_limits: Limits,
    pub stage_limits: StageLimits,

    /// Stages to run, in order
    pub components: Vec<Component>,

    /// Planner input files (domain/problem or a translated task)
    pub inputs: Vec<PathBuf>,

    pub search_options: Vec<String>,

    /// Intermediate artifact written by translate
    pub sas_file: PathBuf,
    pub keep_sas_file: bool,

    /// A translated task given by the user; the search reads it instead of `sas_file`
    pub search_input: Option<PathBuf>,

    pub plan_file: PathBuf,

    pub toolchain: ToolchainConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            version: false,
            show_aliases: false,
            cleanup: false,
            build: "release".to_string(),
            overall_limits: Limits::default(),
            stage_limits: StageLimits::default(),
            components: Vec::new(),
            inputs: Vec::new(),
            search_options: Vec::new(),
            sas_file: PathBuf::from("output.sas"),
            keep_sas_file: false,
            search_input: None,
            plan_file: PathBuf::from("sas_plan"),
            toolchain: ToolchainConfig::default(),
        }
    }
}

impl DriverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = components;
        self
    }

    pub fn with_sas_file(mut self, sas_file: impl Into<PathBuf>) -> Self {
        self.sas_file = sas_file.into();
        self
    }

    pub fn with_keep_sas_file(mut self, keep: bool) -> Self {
        self.keep_sas_file = keep;
        self
    }

    pub fn with_search_input(mut self, search_input: impl Into<PathBuf>) -> Self {
        self.search_input = Some(search_input.into());
        self
    }

    /// File the search reads its task from
    pub fn search_task(&self) -> &Path {
        self.search_input.as_deref().unwrap_or(&self.sas_file)
    }

    pub fn with_plan_file(mut self, plan_file: impl Into<PathBuf>) -> Self {
        self.plan_file = plan_file.into();
        self
    }

    pub fn with_toolchain(mut self, toolchain: ToolchainConfig) -> Self {
        self.toolchain = toolchain;
        self
    }
}
