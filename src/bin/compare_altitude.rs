//! Altitude sensor comparison for the CoDrone EDU.
//!
//! Zero-argument: cross-checks the time-of-flight range sensor against the
//! height accessor and the barometric readings, then prints the known
//! cross-SDK discrepancies. Set `CODRONE_SIM_FAULTS` to exercise the
//! fault-isolation paths.

use anyhow::Context;
use codrone_diag::diag::altitude;
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

    altitude::run(&mut session, &mut report).await;

    Ok(())
}
