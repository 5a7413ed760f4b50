//! Command-line entry point running the posts API scenarios.

use std::env;
use std::process::ExitCode;

use api_scenarios::{app, load_settings, telemetry};
use color_eyre::eyre::{Context, Result};
use tokio::runtime::Builder;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    telemetry::init_tracing();

    let settings = load_settings(env::args_os())?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build scenario runtime")?;

    let report = runtime.block_on(app::run(&settings))?;
    app::log_report(&report);

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
