//! Test utility functions for the driver

use async_trait::async_trait;
use driver::{
    Component, Driver, DriverConfig, DriverError, DriverEvent, PipelineRun, StageOutcome,
    StageRunner, Stopwatch,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// One call the driver made into the runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCall {
    pub component: Component,
    /// Whether the intermediate file existed when the stage started
    pub artifact_present: bool,
}

/// Runner that returns predefined outcomes and records every call
///
/// Translate writes the intermediate file, the way the real translator does.
#[derive(Clone, Default)]
pub struct ScriptedRunner {
    outcomes: HashMap<Component, StageOutcome>,
    calls: Arc<Mutex<Vec<StageCall>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome `component` reports; unscripted stages proceed with 0
    pub fn with(mut self, component: Component, outcome: StageOutcome) -> Self {
        self.outcomes.insert(component, outcome);
        self
    }

    pub fn calls(&self) -> Vec<StageCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, component: Component, config: &DriverConfig) -> StageOutcome {
        self.calls.lock().unwrap().push(StageCall {
            component,
            artifact_present: config.sas_file.exists(),
        });
        self.outcomes
            .get(&component)
            .copied()
            .unwrap_or_else(|| StageOutcome::proceed(0))
    }
}

#[async_trait]
impl StageRunner for ScriptedRunner {
    async fn run_translate(&self, config: &DriverConfig) -> StageOutcome {
        let outcome = self.record(Component::Translate, config);
        std::fs::write(&config.sas_file, "begin_version\n3\nend_version\n").unwrap();
        outcome
    }

    async fn run_search(&self, config: &DriverConfig) -> StageOutcome {
        self.record(Component::Search, config)
    }

    async fn run_validate(&self, config: &DriverConfig) -> StageOutcome {
        self.record(Component::Validate, config)
    }
}

/// Everything observable about one driver invocation
#[derive(Debug)]
pub struct DriverTestResult {
    pub run: PipelineRun,
    pub events: Vec<DriverEvent>,
    pub calls: Vec<StageCall>,
}

impl DriverTestResult {
    /// Components the runner was asked to run, in order
    pub fn called(&self) -> Vec<Component> {
        self.calls.iter().map(|call| call.component).collect()
    }

    pub fn removals(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DriverEvent::RemovingIntermediate { .. }))
            .count()
    }

    /// Index of the first event matching `predicate`
    pub fn position(&self, predicate: impl Fn(&DriverEvent) -> bool) -> Option<usize> {
        self.events.iter().position(predicate)
    }
}

/// Run the driver with `runner` and capture its events
pub async fn run_driver(
    config: &DriverConfig,
    runner: ScriptedRunner,
) -> Result<DriverTestResult, DriverError> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let mut driver = Driver::new(runner.clone(), Stopwatch::start());
    let sink = events.clone();
    driver.add_event_handler(move |event| sink.lock().unwrap().push(event.clone()));

    let run = driver.run(config).await?;
    let events = events.lock().unwrap().clone();

    Ok(DriverTestResult {
        run,
        events,
        calls: runner.calls(),
    })
}

/// Config whose intermediate and plan files live in `dir`
pub fn config_in(dir: &Path, components: Vec<Component>) -> DriverConfig {
    DriverConfig::new()
        .with_components(components)
        .with_sas_file(dir.join("output.sas"))
        .with_plan_file(dir.join("sas_plan"))
}

pub fn assert_stage_finished(result: &DriverTestResult, component: Component, exit_code: i32) {
    let expected = DriverEvent::StageFinished {
        component,
        exit_code,
    };
    assert!(
        result.events.contains(&expected),
        "expected {:?} in {:?}",
        expected,
        result.events
    );
}
