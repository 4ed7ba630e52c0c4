//! IPC-D-356 netlist loader
//!
//! Only the test-point records (`317`, `327`, `017`, `027`) carry geometry;
//! each becomes a [`Primitive::TestPoint`] tagged with its net, reference
//! designator, and pin. Conductor (`378`) and outline (`389`) records are
//! counted but not interpreted.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use camstack_core::{CamFormat, CamObject, ParseError, Point, Primitive, Result, Units};

const TEST_RECORDS: [&str; 4] = ["317", "327", "017", "027"];

/// Coordinate resolution selected by `P  UNITS`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NetlistUnits {
    /// `CUST 0` / `CUST 2`: inches, 0.0001 in resolution
    Inch,
    /// `CUST 1` / `SI`: millimetres, 0.001 mm resolution
    Metric,
}

impl NetlistUnits {
    fn units(self) -> Units {
        match self {
            Self::Inch => Units::Imperial,
            Self::Metric => Units::Metric,
        }
    }

    /// Millimetres per raw coordinate count.
    fn mm_per_count(self) -> f64 {
        match self {
            Self::Inch => 0.0001 * camstack_core::MM_PER_INCH,
            Self::Metric => 0.001,
        }
    }
}

fn coordinate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"X([+-]\d+)\s*Y([+-]\d+)").expect("invalid regex pattern"))
}

fn diameter_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*D(\d+)").expect("invalid regex pattern"))
}

/// Load IPC-D-356 text.
pub fn loads(data: &str, filename: Option<&str>) -> Result<CamObject> {
    let mut units = NetlistUnits::Inch;
    let mut primitives = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in data.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() || line.starts_with('C') {
            continue;
        }

        if let Some(parameter) = line.strip_prefix('P') {
            let tokens: Vec<&str> = parameter.split_whitespace().collect();
            match tokens.as_slice() {
                ["UNITS", "CUST", "1", ..] | ["UNITS", "SI", ..] => units = NetlistUnits::Metric,
                ["UNITS", "CUST", ..] => units = NetlistUnits::Inch,
                ["JOB", name @ ..] => debug!("IPC-D-356 job: {}", name.join(" ")),
                _ => {}
            }
            continue;
        }

        let record = line.get(..3).unwrap_or(line);
        if record == "999" {
            break;
        }
        if !TEST_RECORDS.contains(&record) {
            skipped += 1;
            continue;
        }

        primitives.push(parse_test_record(line, line_number, units)?);
    }

    debug!(
        "Loaded IPC-D-356 {:?}: {} test points, {} other records",
        filename,
        primitives.len(),
        skipped
    );

    Ok(CamObject::new(
        filename.map(str::to_string),
        CamFormat::IpcD356,
        units.units(),
        primitives,
    ))
}

fn field(line: &str, start: usize, end: usize) -> String {
    let end = end.min(line.len());
    line.get(start..end)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn parse_test_record(line: &str, line_number: usize, units: NetlistUnits) -> Result<Primitive> {
    let scale = units.mm_per_count();
    let net = field(line, 3, 17);
    let refdes = field(line, 20, 26);
    let pin = field(line, 27, 31);
    let tail = line.get(32..).unwrap_or("");

    let caps = coordinate_regex()
        .captures(tail)
        .ok_or_else(|| ParseError::Netlist {
            line: line_number,
            reason: "test record without coordinates".to_string(),
        })?;
    let raw = |s: &str| -> Result<f64> {
        s.parse::<i64>().map(|v| v as f64 * scale).map_err(|_| {
            ParseError::Netlist {
                line: line_number,
                reason: format!("invalid coordinate '{}'", s),
            }
            .into()
        })
    };
    let position = Point::new(raw(&caps[1])?, raw(&caps[2])?);

    let diameter = diameter_regex()
        .captures(tail)
        .and_then(|c| c[1].parse::<i64>().ok())
        .map(|v| v as f64 * scale);

    Ok(Primitive::TestPoint {
        net,
        refdes,
        pin,
        position,
        diameter,
    })
}
