//! Baseline telemetry diagnostic for the CoDrone EDU.
//!
//! Zero-argument: runs the full read-only catalogue against the simulated
//! session and prints the report to stdout. Set `CODRONE_SIM_FAULTS` (comma
//! separated operation names, e.g. `cpu-id,pressure`) to exercise the
//! fault-isolation paths.

use anyhow::Context;
use codrone_diag::diag::baseline;
use codrone_diag::report::Reporter;
use codrone_diag::session::{SimSession, SIM_FAULTS_ENV};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();

    let mut session = SimSession::from_env().with_context(|| format!("bad {SIM_FAULTS_ENV}"))?;
    let mut report = Reporter::stdout();

    baseline::run(&mut session, &mut report).await;

    Ok(())
}
