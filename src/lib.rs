//! Telemetry diagnostics for the CoDrone EDU.
//!
//! Two terminal utilities exercise the drone's telemetry surface and print
//! sensor readings for human inspection: `baseline-test` walks the whole
//! read-only catalogue (identity, flight counters, altitude triple, battery)
//! and `compare-altitude` cross-checks the time-of-flight range sensor
//! against the barometric readings.
//!
//! The drone SDK is an opaque collaborator behind the
//! [`session::DroneSession`] trait. Probes run inside isolated failure
//! boundaries ([`probe::run_probe`]) so a single bad sensor never aborts the
//! rest of the run, and everything renders through [`report::Reporter`].

pub mod diag;
pub mod error;
pub mod probe;
pub mod report;
pub mod session;
pub mod telemetry;

pub use error::{Result, SessionError};
pub use session::{DroneSession, SimSession};
