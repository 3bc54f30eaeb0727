//! Fault-isolated probe runner
//!
//! A probe is one labeled, fallible query against the session that renders
//! to a handful of report lines. [`run_probe`] contains the failure: on an
//! error the diagnostic line is printed, the outcome recorded, and the run
//! moves on to the next probe. A single bad sensor never aborts its
//! siblings.

use std::future::Future;
use std::io::Write;

use tracing::{debug, warn};

use crate::error::SessionError;
use crate::report::Reporter;

/// Outcome of one labeled probe.
#[derive(Debug)]
pub struct ProbeOutcome {
    pub label: &'static str,
    pub result: Result<(), SessionError>,
}

impl ProbeOutcome {
    pub fn ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run a single probe to completion.
///
/// `query` does the session reads and returns the pre-formatted lines to
/// print. Containment and rendering stay separate: the query never touches
/// the reporter, and the reporter never sees a raw error besides the one
/// diagnostic line.
pub async fn run_probe<W, F>(
    report: &mut Reporter<W>,
    label: &'static str,
    query: F,
) -> ProbeOutcome
where
    W: Write,
    F: Future<Output = Result<Vec<String>, SessionError>>,
{
    match query.await {
        Ok(lines) => {
            debug!(probe = label, "probe ok");
            for line in &lines {
                report.line(line);
            }
            ProbeOutcome {
                label,
                result: Ok(()),
            }
        }
        Err(err) => {
            warn!(probe = label, error = %err, "probe failed");
            report.probe_failed(label, &err);
            ProbeOutcome {
                label,
                result: Err(err),
            }
        }
    }
}
