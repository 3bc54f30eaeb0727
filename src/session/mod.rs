//! Drone SDK session surface
//!
//! The drone SDK is an opaque collaborator: connection handling, wire
//! framing and unit bookkeeping all live behind this trait. The diagnostics
//! only consume it. [`SimSession`] is the deterministic stand-in used by the
//! binaries and the scenario tests; a hardware adapter plugs in by
//! implementing [`DroneSession`].

mod sim;

pub use sim::{Op, SimReadings, SimSession, SIM_FAULTS_ENV};

use async_trait::async_trait;

use crate::error::Result;
use crate::telemetry::{
    CpuId, DeviceAddress, DeviceInformation, FlightCounters, RangeFrame, StateVector,
};

/// Request opcode addressing the drone itself.
pub const DEVICE_DRONE: u8 = 0x10;

/// Request opcode asking the drone to publish its altitude frame
/// (pressure and temperature included).
pub const DATA_ALTITUDE: u8 = 0x20;

/// A paired link to a physical (or simulated) CoDrone EDU.
///
/// All queries are synchronous point-in-time reads: no caching, no retry,
/// no staleness tracking. Every method except [`pair`](Self::pair) requires
/// an established session.
#[async_trait]
pub trait DroneSession: Send {
    /// Establish the link. Must succeed before any query runs.
    async fn pair(&mut self) -> Result<()>;

    /// Raw time-of-flight distances in millimeters.
    async fn range_frame(&mut self) -> Result<RangeFrame>;

    /// Height above ground in meters, as reported by the high-level
    /// accessor. Expected to agree with the converted bottom range.
    async fn height_m(&mut self) -> Result<f64>;

    /// Aggregate state array. Callers check existence and length only.
    async fn state_vector(&mut self) -> Result<StateVector>;

    /// Low-level request-send primitive: ask `device` to publish `data`.
    /// The response lands in the regular accessors after a short settle.
    async fn send_request(&mut self, device: u8, data: u8) -> Result<()>;

    /// Barometric pressure in hPa.
    async fn pressure_hpa(&mut self) -> Result<f64>;

    /// Drone-internal temperature in °C.
    async fn temperature_c(&mut self) -> Result<f64>;

    /// Battery charge in percent.
    async fn battery_percent(&mut self) -> Result<u8>;

    /// Device identity record (models and firmware versions).
    async fn information(&mut self) -> Result<DeviceInformation>;

    /// Unique CPU identifier.
    async fn cpu_id(&mut self) -> Result<CpuId>;

    /// Bluetooth address.
    async fn address(&mut self) -> Result<DeviceAddress>;

    /// Aggregate flight statistics record.
    async fn flight_counters(&mut self) -> Result<FlightCounters>;

    /// Total flight time in seconds.
    async fn flight_time_s(&mut self) -> Result<u32>;

    async fn takeoff_count(&mut self) -> Result<u16>;

    async fn landing_count(&mut self) -> Result<u16>;

    /// Number of accidents/crashes detected by the drone.
    async fn accident_count(&mut self) -> Result<u16>;

    /// Release the link. The underlying close is assumed idempotent;
    /// callers invoke it exactly once per run regardless of outcome.
    async fn close(&mut self) -> Result<()>;
}
