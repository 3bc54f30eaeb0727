//! Diagnostic routines
//!
//! Each routine is a linear run over one exclusively-owned session: pair,
//! fixed probe catalogue, mandatory teardown. Pairing failure skips the
//! probes but never the teardown.

pub mod altitude;
pub mod baseline;

use std::io::Write;

use tokio::time::Duration;
use tracing::warn;

use crate::report::Reporter;
use crate::session::DroneSession;

/// Settle time for the hardware sensors after pairing.
pub(crate) const SENSOR_SETTLE: Duration = Duration::from_millis(500);

/// Settle time between a low-level request and reading the response.
pub(crate) const REQUEST_SETTLE: Duration = Duration::from_millis(100);

/// Release the session and print the completion notice. Runs on every path,
/// success and failure alike; a failing close is logged, not propagated.
pub(crate) async fn teardown<S, W>(session: &mut S, report: &mut Reporter<W>, notice: &str)
where
    S: DroneSession,
    W: Write,
{
    report.line("Disconnecting...");
    if let Err(err) = session.close().await {
        warn!(error = %err, "session close failed");
    }
    report.line(notice);
}
