use anyhow::{Context, Result};
use driver::cli::output::{format_driver_event, style, CROSS};
use driver::cli::Cli;
use driver::core::{returncodes, DriverConfig, LogLevel, Stopwatch, ToolchainConfig};
use driver::execution::{Driver, SubprocessRunner};
use tracing::debug;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let stopwatch = Stopwatch::start();
    let cli = Cli::from_args();

    if let Err(e) = init_logging(cli.log_level) {
        fail(returncodes::DRIVER_CRITICAL_ERROR, e);
    }

    let config = match resolve_config(cli) {
        Ok(config) => config,
        Err(e) => fail(returncodes::DRIVER_INPUT_ERROR, e),
    };
    match serde_json::to_string(&config) {
        Ok(json) => debug!("processed args: {}", json),
        Err(e) => debug!("processed args not serializable: {}", e),
    }

    let mut driver = Driver::new(SubprocessRunner::new(stopwatch), stopwatch);
    driver.add_event_handler(|event| {
        let line = format_driver_event(event);
        if !line.is_empty() {
            println!("{}", line);
        }
    });

    match driver.run(&config).await {
        // Exit with the code of the last stage that ran: when search finds no
        // plan, validate never runs and the search code is what we report.
        Ok(run) => std::process::exit(run.exit_code()),
        Err(e) => fail(returncodes::DRIVER_CRITICAL_ERROR, e.into()),
    }
}

fn init_logging(level: LogLevel) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level.into()).into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")
}

fn resolve_config(cli: Cli) -> Result<DriverConfig> {
    let toolchain = ToolchainConfig::discover(cli.config.as_deref())
        .context("Failed to load toolchain config")?;
    Ok(cli.into_config(toolchain)?)
}

fn fail(code: i32, error: anyhow::Error) -> ! {
    eprintln!("{} {}", CROSS, style(format!("{:#}", error)).red());
    std::process::exit(code)
}
