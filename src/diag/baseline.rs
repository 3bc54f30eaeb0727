//! Baseline telemetry diagnostic
//!
//! Walks the whole read-only telemetry catalogue after a firmware update:
//! connection, device identity, CPU id, address, flight statistics, the
//! altitude triple and battery. One numbered, fault-isolated test per probe.

use std::io::Write;

use tracing::{error, info};

use crate::diag::teardown;
use crate::error::Result;
use crate::probe::{run_probe, ProbeOutcome};
use crate::report::{reading, unit_value, Reporter};
use crate::session::DroneSession;

/// Run the baseline diagnostic to completion. The session is always torn
/// down, even when pairing fails.
pub async fn run<S, W>(session: &mut S, report: &mut Reporter<W>) -> Vec<ProbeOutcome>
where
    S: DroneSession,
    W: Write,
{
    report.banner(&["CoDrone EDU Baseline Diagnostic", "Firmware 25.2.1"]);
    report.blank();

    let mut outcomes = Vec::new();

    report.section("📡 Test 1: Connection");
    match session.pair().await {
        Ok(()) => {
            info!("session paired");
            report.line("✅ Connected successfully");
            report.blank();
            probe_catalogue(session, report, &mut outcomes).await;
        }
        Err(err) => {
            error!(error = %err, "pairing failed");
            report.line(&format!("❌ Error during testing: {err}"));
        }
    }

    report.blank();
    teardown(session, report, "Disconnected.").await;

    outcomes
}

async fn probe_catalogue<S, W>(
    session: &mut S,
    report: &mut Reporter<W>,
    outcomes: &mut Vec<ProbeOutcome>,
) where
    S: DroneSession,
    W: Write,
{
    report.section("📋 Test 2: Device Information");
    outcomes.push(run_probe(report, "device information", probe_information(session)).await);
    report.blank();

    report.section("🔑 Test 3: Device CPU ID");
    outcomes.push(run_probe(report, "cpu id", probe_cpu_id(session)).await);
    report.blank();

    report.section("📍 Test 4: Bluetooth Address");
    outcomes.push(run_probe(report, "address", probe_address(session)).await);
    report.blank();

    report.section("📊 Test 5: Flight Statistics");
    outcomes.push(run_probe(report, "flight counters", probe_counters(session)).await);
    report.blank();

    report.section("📏 Test 6: Altitude Reading");
    outcomes.push(run_probe(report, "altitude triple", probe_altitude(session)).await);
    report.blank();

    report.section("🔋 Test 7: Battery Level");
    outcomes.push(run_probe(report, "battery", probe_battery(session)).await);
    report.blank();

    report.banner(&["✅ Baseline diagnostic complete"]);
}

async fn probe_information<S: DroneSession>(session: &mut S) -> Result<Vec<String>> {
    let info = session.information().await?;
    let mut lines = vec![format!("Information Data: {info}")];
    if let Some(v) = &info.drone_firmware {
        lines.push(reading("Drone Version", v));
    }
    if let Some(v) = &info.controller_firmware {
        lines.push(reading("Controller Version", v));
    }
    Ok(lines)
}

async fn probe_cpu_id<S: DroneSession>(session: &mut S) -> Result<Vec<String>> {
    let id = session.cpu_id().await?;
    Ok(vec![format!("CPU ID: {id}")])
}

async fn probe_address<S: DroneSession>(session: &mut S) -> Result<Vec<String>> {
    let address = session.address().await?;
    Ok(vec![format!("Address: {address}")])
}

async fn probe_counters<S: DroneSession>(session: &mut S) -> Result<Vec<String>> {
    let counters = session.flight_counters().await?;
    let mut lines = vec![format!("Count Data: {counters}")];

    // The split accessors are best-effort: firmware without the individual
    // queries just drops the line.
    if let Ok(t) = session.flight_time_s().await {
        lines.push(reading("Flight Time", &format!("{t} seconds")));
    }
    if let Ok(n) = session.takeoff_count().await {
        lines.push(reading("Takeoff Count", &n.to_string()));
    }
    if let Ok(n) = session.landing_count().await {
        lines.push(reading("Landing Count", &n.to_string()));
    }
    if let Ok(n) = session.accident_count().await {
        lines.push(reading("Accident Count", &n.to_string()));
    }
    Ok(lines)
}

async fn probe_altitude<S: DroneSession>(session: &mut S) -> Result<Vec<String>> {
    let height = session.height_m().await?;
    let pressure = session.pressure_hpa().await?;
    let temperature = session.temperature_c().await?;
    Ok(vec![
        reading("Altitude", &unit_value(height, 3, "m")),
        reading("Pressure", &unit_value(pressure, 2, "hPa")),
        reading("Temperature", &unit_value(temperature, 2, "°C")),
    ])
}

async fn probe_battery<S: DroneSession>(session: &mut S) -> Result<Vec<String>> {
    let battery = session.battery_percent().await?;
    Ok(vec![reading("Battery", &format!("{battery}%"))])
}
