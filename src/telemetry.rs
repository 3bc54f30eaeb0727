//! Telemetry data model
//!
//! Records returned by session queries. Shapes follow the vendor SDK: the
//! identity record keeps every field independently optional because firmware
//! revisions differ in which slots of the information frame they populate.
//! All values are ephemeral snapshots, read at the instant of the query and
//! never cached.

use std::fmt;

/// Millimeters per meter, the exact divisor for range conversions.
pub const MM_PER_M: f64 = 1000.0;

/// Tolerance for the range-vs-height cross-check, in meters. The comparison
/// is a strict inequality: a difference of exactly this value is a mismatch.
pub const HEIGHT_MATCH_TOLERANCE_M: f64 = 0.001;

/// Convert a raw millimeter reading to meters.
pub fn mm_to_m(mm: f64) -> f64 {
    mm / MM_PER_M
}

/// True when the height accessor agrees with the converted raw bottom range.
pub fn heights_match(height_m: f64, range_m: f64) -> bool {
    (height_m - range_m).abs() < HEIGHT_MATCH_TOLERANCE_M
}

/// Raw time-of-flight distances in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFrame {
    pub front_mm: i32,
    pub bottom_mm: i32,
}

impl RangeFrame {
    /// Bottom (ground-facing) distance in meters.
    pub fn bottom_m(&self) -> f64 {
        mm_to_m(self.bottom_mm as f64)
    }
}

/// Aggregate state array. Checked for existence and length only, never
/// decoded; the layout (timestamp, position, velocity, ...) varies by
/// firmware and is not part of this tool's contract.
#[derive(Debug, Clone, Default)]
pub struct StateVector(Vec<f32>);

impl StateVector {
    pub fn new(elements: Vec<f32>) -> Self {
        Self(elements)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Device identity record. Each field is independently absent-or-present;
/// consumers print only what the device reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInformation {
    pub drone_model: Option<String>,
    pub drone_firmware: Option<String>,
    pub controller_model: Option<String>,
    pub controller_firmware: Option<String>,
}

impl fmt::Display for DeviceInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unknown = "?".to_string();
        write!(
            f,
            "drone {} ({}), controller {} ({})",
            self.drone_model.as_ref().unwrap_or(&unknown),
            self.drone_firmware.as_ref().unwrap_or(&unknown),
            self.controller_model.as_ref().unwrap_or(&unknown),
            self.controller_firmware.as_ref().unwrap_or(&unknown),
        )
    }
}

/// Unique CPU identifier of the drone's MCU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuId(pub Vec<u8>);

impl fmt::Display for CpuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

/// Bluetooth address of the device, rendered in colon-separated hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAddress(pub Vec<u8>);

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ":")?;
            }
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

/// Cumulative flight statistics. Read-only counters maintained by the drone;
/// this tool never mutates or aggregates them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightCounters {
    /// Total time with motors running, seconds.
    pub flight_time_s: u32,
    pub takeoff_count: u16,
    pub landing_count: u16,
    pub accident_count: u16,
}

impl fmt::Display for FlightCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "flight time {} s, takeoffs {}, landings {}, accidents {}",
            self.flight_time_s, self.takeoff_count, self.landing_count, self.accident_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_m_divides_by_exactly_1000() {
        assert_eq!(mm_to_m(1500.0), 1.5);
        assert_eq!(mm_to_m(0.0), 0.0);
        assert_eq!(mm_to_m(1.0), 0.001);
    }

    #[test]
    fn test_range_frame_bottom_m() {
        let frame = RangeFrame {
            front_mm: 210,
            bottom_mm: 1500,
        };
        assert_eq!(frame.bottom_m(), 1.5);
    }

    #[test]
    fn test_heights_match_within_tolerance() {
        assert!(heights_match(0.0, 0.0));
        assert!(heights_match(1.5004, 1.5));
        assert!(heights_match(1.5, 1.5009));
    }

    #[test]
    fn test_heights_match_boundary_is_strict() {
        // A difference of exactly 0.001 must report mismatch.
        assert!(!heights_match(0.001, 0.0));
        assert!(!heights_match(0.0, 0.001));
        assert!(!heights_match(1.502, 1.5));
    }

    #[test]
    fn test_cpu_id_renders_as_hex() {
        let id = CpuId(vec![0xDE, 0xAD, 0x01]);
        assert_eq!(id.to_string(), "DEAD01");
    }

    #[test]
    fn test_address_renders_with_colons() {
        let addr = DeviceAddress(vec![0x00, 0x1A, 0xFF]);
        assert_eq!(addr.to_string(), "00:1A:FF");
    }

    #[test]
    fn test_information_display_marks_missing_fields() {
        let info = DeviceInformation {
            drone_firmware: Some("25.2.1".into()),
            ..Default::default()
        };
        assert_eq!(info.to_string(), "drone ? (25.2.1), controller ? (?)");
    }

    #[test]
    fn test_counters_display() {
        let counters = FlightCounters {
            flight_time_s: 321,
            takeoff_count: 12,
            landing_count: 11,
            accident_count: 1,
        };
        assert_eq!(
            counters.to_string(),
            "flight time 321 s, takeoffs 12, landings 11, accidents 1"
        );
    }
}
