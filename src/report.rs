//! Terminal reporter
//!
//! Pure formatting: label, value at fixed precision, unit suffix, optional
//! symbolic marker. Nothing downstream consumes the output; it exists for a
//! human operator. The sink is any [`Write`] so scenario tests can capture
//! a run in a buffer while the binaries write to stdout.

use std::fmt;
use std::io::{self, Write};

/// Width of the `=` / `-` rules framing banners and sections.
pub const RULE_WIDTH: usize = 60;

const LABEL_WIDTH: usize = 20;

/// Symbolic outcome marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Check,
    Cross,
    Warning,
}

impl Marker {
    pub fn symbol(&self) -> &'static str {
        match self {
            Marker::Check => "✓",
            Marker::Cross => "✗",
            Marker::Warning => "⚠️",
        }
    }
}

/// Marker for a boolean match/mismatch check.
pub fn match_marker(matched: bool) -> Marker {
    if matched {
        Marker::Check
    } else {
        Marker::Cross
    }
}

/// A numeric value at fixed precision with its unit suffix,
/// e.g. `unit_value(1013.25, 2, "hPa")` → `"1013.25 hPa"`.
pub fn unit_value(value: f64, precision: usize, unit: &str) -> String {
    format!("{value:.precision$} {unit}")
}

/// An indented, label-padded reading line, e.g. `  Pressure:    1013.25 hPa`.
pub fn reading(label: &str, value: &str) -> String {
    format!(
        "  {:<width$} {}",
        format!("{label}:"),
        value,
        width = LABEL_WIDTH
    )
}

/// Writes report lines to a sink.
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        // A broken stdout is not actionable mid-run.
        let _ = self.out.write_fmt(args);
        let _ = self.out.write_all(b"\n");
    }

    pub fn line(&mut self, text: &str) {
        self.emit(format_args!("{text}"));
    }

    pub fn blank(&mut self) {
        self.emit(format_args!(""));
    }

    pub fn rule(&mut self) {
        self.emit(format_args!("{}", "=".repeat(RULE_WIDTH)));
    }

    pub fn rule_light(&mut self) {
        self.emit(format_args!("{}", "-".repeat(RULE_WIDTH)));
    }

    /// `=`-framed banner of one or more title lines.
    pub fn banner(&mut self, lines: &[&str]) {
        self.rule();
        for l in lines {
            self.line(l);
        }
        self.rule();
    }

    /// Section title followed by a light rule.
    pub fn section(&mut self, title: &str) {
        self.line(title);
        self.rule_light();
    }

    /// Per-probe failure diagnostic. The run continues after this.
    pub fn probe_failed(&mut self, label: &str, err: &dyn fmt::Display) {
        self.emit(format_args!(
            "{}  {label} failed: {err}",
            Marker::Warning.symbol()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(reporter: Reporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_unit_value_precision_and_suffix() {
        assert_eq!(unit_value(1013.25, 2, "hPa"), "1013.25 hPa");
        assert_eq!(unit_value(0.0, 3, "m"), "0.000 m");
        assert_eq!(unit_value(24.6, 2, "°C"), "24.60 °C");
    }

    #[test]
    fn test_reading_pads_the_label() {
        assert_eq!(reading("Pressure", "1013.25 hPa"), "  Pressure:            1013.25 hPa");
    }

    #[test]
    fn test_banner_is_framed_by_rules() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.banner(&["Altitude Sensor Comparison"]);
        let out = rendered(reporter);

        let rule = "=".repeat(RULE_WIDTH);
        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec![rule.as_str(), "Altitude Sensor Comparison", rule.as_str()]
        );
    }

    #[test]
    fn test_section_uses_a_light_rule() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.section("📡 Test 1: Connection");
        let out = rendered(reporter);
        assert!(out.contains("Test 1: Connection"));
        assert!(out.contains(&"-".repeat(RULE_WIDTH)));
    }

    #[test]
    fn test_probe_failed_carries_marker_and_error_text() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.probe_failed("cpu id", &"link error: no reply");
        let out = rendered(reporter);
        assert!(out.contains("⚠️"));
        assert!(out.contains("cpu id failed: link error: no reply"));
    }

    #[test]
    fn test_match_marker_symbols() {
        assert_eq!(match_marker(true).symbol(), "✓");
        assert_eq!(match_marker(false).symbol(), "✗");
    }
}
