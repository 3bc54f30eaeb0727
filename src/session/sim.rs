//! Simulated drone session
//!
//! A deterministic on-ground drone snapshot backing the diagnostic binaries
//! and the scenario tests, the way a SITL endpoint backs development of the
//! real link. Individual operations can be told to fail so the
//! fault-isolation paths can be exercised by hand (`CODRONE_SIM_FAULTS`) or
//! from tests.

use std::collections::HashSet;
use std::str::FromStr;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, SessionError};
use crate::session::DroneSession;
use crate::telemetry::{
    CpuId, DeviceAddress, DeviceInformation, FlightCounters, RangeFrame, StateVector,
};

/// Environment variable naming the operations that should fail, comma
/// separated (e.g. `CODRONE_SIM_FAULTS=cpu-id,pressure`).
pub const SIM_FAULTS_ENV: &str = "CODRONE_SIM_FAULTS";

/// Session operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Pair,
    RangeFrame,
    Height,
    StateVector,
    SendRequest,
    Pressure,
    Temperature,
    Battery,
    Information,
    CpuId,
    Address,
    FlightCounters,
    FlightTime,
    TakeoffCount,
    LandingCount,
    AccidentCount,
    Close,
}

impl Op {
    fn name(&self) -> &'static str {
        match self {
            Op::Pair => "pair",
            Op::RangeFrame => "range",
            Op::Height => "height",
            Op::StateVector => "state",
            Op::SendRequest => "request",
            Op::Pressure => "pressure",
            Op::Temperature => "temperature",
            Op::Battery => "battery",
            Op::Information => "information",
            Op::CpuId => "cpu-id",
            Op::Address => "address",
            Op::FlightCounters => "counters",
            Op::FlightTime => "flight-time",
            Op::TakeoffCount => "takeoffs",
            Op::LandingCount => "landings",
            Op::AccidentCount => "accidents",
            Op::Close => "close",
        }
    }
}

impl FromStr for Op {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pair" => Ok(Op::Pair),
            "range" => Ok(Op::RangeFrame),
            "height" => Ok(Op::Height),
            "state" => Ok(Op::StateVector),
            "request" => Ok(Op::SendRequest),
            "pressure" => Ok(Op::Pressure),
            "temperature" => Ok(Op::Temperature),
            "battery" => Ok(Op::Battery),
            "information" => Ok(Op::Information),
            "cpu-id" => Ok(Op::CpuId),
            "address" => Ok(Op::Address),
            "counters" => Ok(Op::FlightCounters),
            "flight-time" => Ok(Op::FlightTime),
            "takeoffs" => Ok(Op::TakeoffCount),
            "landings" => Ok(Op::LandingCount),
            "accidents" => Ok(Op::AccidentCount),
            "close" => Ok(Op::Close),
            other => Err(anyhow!("unknown session operation: {other}")),
        }
    }
}

/// Readings reported by a healthy simulated drone sitting on the ground.
#[derive(Debug, Clone)]
pub struct SimReadings {
    pub range: RangeFrame,
    pub height_m: f64,
    pub state: Vec<f32>,
    pub pressure_hpa: f64,
    pub temperature_c: f64,
    pub battery_percent: u8,
    pub information: DeviceInformation,
    pub cpu_id: CpuId,
    pub address: DeviceAddress,
    pub counters: FlightCounters,
}

impl Default for SimReadings {
    fn default() -> Self {
        Self {
            range: RangeFrame {
                front_mm: 183,
                bottom_mm: 0,
            },
            height_m: 0.0,
            // Layout mirrors the aggregate state frame: timestamp, attitude,
            // position, velocity. Only the length matters to the probes.
            state: vec![0.0; 12],
            pressure_hpa: 1013.25,
            temperature_c: 24.6,
            battery_percent: 85,
            information: DeviceInformation {
                drone_model: Some("CDE-EDU".into()),
                drone_firmware: Some("25.2.1".into()),
                controller_model: Some("CDE-CTL".into()),
                controller_firmware: Some("25.1.4".into()),
            },
            cpu_id: CpuId(vec![
                0x32, 0x00, 0x3C, 0x00, 0x0F, 0x51, 0x38, 0x35, 0x36, 0x38, 0x31, 0x30,
            ]),
            address: DeviceAddress(vec![0xC4, 0x3A, 0x35, 0x0B, 0x92, 0xE1]),
            counters: FlightCounters {
                flight_time_s: 384,
                takeoff_count: 27,
                landing_count: 26,
                accident_count: 2,
            },
        }
    }
}

/// Simulated [`DroneSession`].
pub struct SimSession {
    readings: SimReadings,
    faults: HashSet<Op>,
    paired: bool,
    close_calls: u32,
}

impl SimSession {
    /// Healthy on-ground drone.
    pub fn new() -> Self {
        Self::with_readings(SimReadings::default())
    }

    pub fn with_readings(readings: SimReadings) -> Self {
        Self {
            readings,
            faults: HashSet::new(),
            paired: false,
            close_calls: 0,
        }
    }

    /// Healthy drone with faults injected from [`SIM_FAULTS_ENV`].
    pub fn from_env() -> anyhow::Result<Self> {
        let mut session = Self::new();
        if let Ok(list) = std::env::var(SIM_FAULTS_ENV) {
            for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                let op = name
                    .parse::<Op>()
                    .with_context(|| format!("invalid {SIM_FAULTS_ENV} entry"))?;
                session.fail(op);
            }
        }
        Ok(session)
    }

    /// Make `op` fail with a simulated link error.
    pub fn fail(&mut self, op: Op) -> &mut Self {
        debug!(op = op.name(), "injecting simulated fault");
        self.faults.insert(op);
        self
    }

    /// How many times [`DroneSession::close`] ran on this session.
    pub fn close_calls(&self) -> u32 {
        self.close_calls
    }

    fn check(&self, op: Op) -> Result<()> {
        if self.faults.contains(&op) {
            return Err(SessionError::Link(format!(
                "simulated fault on {}",
                op.name()
            )));
        }
        if !self.paired {
            return Err(SessionError::NotPaired);
        }
        Ok(())
    }
}

impl Default for SimSession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DroneSession for SimSession {
    async fn pair(&mut self) -> Result<()> {
        if self.faults.contains(&Op::Pair) {
            return Err(SessionError::NoResponse("simulated fault on pair".into()));
        }
        if self.paired {
            return Err(SessionError::AlreadyPaired);
        }
        self.paired = true;
        debug!("simulated session paired");
        Ok(())
    }

    async fn range_frame(&mut self) -> Result<RangeFrame> {
        self.check(Op::RangeFrame)?;
        Ok(self.readings.range)
    }

    async fn height_m(&mut self) -> Result<f64> {
        self.check(Op::Height)?;
        Ok(self.readings.height_m)
    }

    async fn state_vector(&mut self) -> Result<StateVector> {
        self.check(Op::StateVector)?;
        Ok(StateVector::new(self.readings.state.clone()))
    }

    async fn send_request(&mut self, device: u8, data: u8) -> Result<()> {
        self.check(Op::SendRequest)?;
        debug!(device, data, "simulated request sent");
        Ok(())
    }

    async fn pressure_hpa(&mut self) -> Result<f64> {
        self.check(Op::Pressure)?;
        Ok(self.readings.pressure_hpa)
    }

    async fn temperature_c(&mut self) -> Result<f64> {
        self.check(Op::Temperature)?;
        Ok(self.readings.temperature_c)
    }

    async fn battery_percent(&mut self) -> Result<u8> {
        self.check(Op::Battery)?;
        Ok(self.readings.battery_percent)
    }

    async fn information(&mut self) -> Result<DeviceInformation> {
        self.check(Op::Information)?;
        Ok(self.readings.information.clone())
    }

    async fn cpu_id(&mut self) -> Result<CpuId> {
        self.check(Op::CpuId)?;
        Ok(self.readings.cpu_id.clone())
    }

    async fn address(&mut self) -> Result<DeviceAddress> {
        self.check(Op::Address)?;
        Ok(self.readings.address.clone())
    }

    async fn flight_counters(&mut self) -> Result<FlightCounters> {
        self.check(Op::FlightCounters)?;
        Ok(self.readings.counters)
    }

    async fn flight_time_s(&mut self) -> Result<u32> {
        self.check(Op::FlightTime)?;
        Ok(self.readings.counters.flight_time_s)
    }

    async fn takeoff_count(&mut self) -> Result<u16> {
        self.check(Op::TakeoffCount)?;
        Ok(self.readings.counters.takeoff_count)
    }

    async fn landing_count(&mut self) -> Result<u16> {
        self.check(Op::LandingCount)?;
        Ok(self.readings.counters.landing_count)
    }

    async fn accident_count(&mut self) -> Result<u16> {
        self.check(Op::AccidentCount)?;
        Ok(self.readings.counters.accident_count)
    }

    async fn close(&mut self) -> Result<()> {
        self.close_calls += 1;
        self.paired = false;
        if self.faults.contains(&Op::Close) {
            return Err(SessionError::Link("simulated fault on close".into()));
        }
        debug!("simulated session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queries_require_pairing() {
        let mut session = SimSession::new();
        assert!(matches!(
            session.battery_percent().await,
            Err(SessionError::NotPaired)
        ));

        session.pair().await.unwrap();
        assert_eq!(session.battery_percent().await.unwrap(), 85);
    }

    #[tokio::test]
    async fn test_pairing_twice_fails() {
        let mut session = SimSession::new();
        session.pair().await.unwrap();
        assert!(matches!(
            session.pair().await,
            Err(SessionError::AlreadyPaired)
        ));
    }

    #[tokio::test]
    async fn test_fault_injection_hits_only_the_named_op() {
        let mut session = SimSession::new();
        session.fail(Op::CpuId);
        session.pair().await.unwrap();

        assert!(session.cpu_id().await.is_err());
        assert!(session.address().await.is_ok());
        assert!(session.pressure_hpa().await.is_ok());
    }

    #[tokio::test]
    async fn test_close_counts_calls() {
        let mut session = SimSession::new();
        session.pair().await.unwrap();
        session.close().await.unwrap();
        session.close().await.unwrap();
        assert_eq!(session.close_calls(), 2);
    }

    #[tokio::test]
    async fn test_default_state_vector_is_long_enough_to_report() {
        let mut session = SimSession::new();
        session.pair().await.unwrap();
        let state = session.state_vector().await.unwrap();
        assert!(state.len() > 10);
    }

    #[test]
    fn test_op_round_trips_through_names() {
        for op in [Op::Pair, Op::CpuId, Op::FlightTime, Op::Close] {
            assert_eq!(op.name().parse::<Op>().unwrap(), op);
        }
        assert!("warp-drive".parse::<Op>().is_err());
    }
}
