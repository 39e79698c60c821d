use anyhow::{Context, Result};
use motor_sizing::{catalog, config, report, telemetry};
use config::Config;
use report::ProjectReport;
use telemetry::init_tracing;
use tracing::{info, warn};

fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;

    let motors = catalog::resolve(std::env::args().skip(1));

    if motors.is_empty() {
        warn!("no motors selected; pass catalog CV ratings as arguments");
    }

    let report = ProjectReport::build(&motors, &cfg);

    info!(
        motor_count = report.summary.motor_count,
        main_breaker = %report.summary.main_breaker,
        "project dimensioned"
    );

    let json = serde_json::to_string_pretty(&report).context("serializing report")?;
    println!("{json}");
    Ok(())
}
