//! Excellon NC drill loader
//!
//! Reads the `M48` header (units, zero suppression, tool table) and the
//! drill body (tool changes and hits). Each hit becomes a
//! [`Primitive::Hole`] with the diameter of the active tool.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use camstack_core::{CamFormat, CamObject, ParseError, Point, Primitive, Result, Units};

/// Which zeros are written out in coordinates without a decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroMode {
    /// `LZ`: leading zeros kept, trailing zeros suppressed.
    Leading,
    /// `TZ`: trailing zeros kept, leading zeros suppressed.
    Trailing,
}

/// Coordinate settings in effect while reading a drill file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExcellonSettings {
    pub units: Units,
    pub zeros: ZeroMode,
    /// Integer and decimal digit counts for implicit-decimal coordinates.
    pub format: (u32, u32),
}

impl ExcellonSettings {
    fn for_units(units: Units, zeros: ZeroMode) -> Self {
        let format = match units {
            Units::Metric => (3, 3),
            Units::Imperial => (2, 4),
        };
        Self {
            units,
            zeros,
            format,
        }
    }

    /// Value of a coordinate word in file units.
    pub fn parse_coordinate(&self, word: &str) -> Option<f64> {
        if word.contains('.') {
            return word.parse::<f64>().ok();
        }

        let (negative, digits) = match word.as_bytes().first() {
            Some(b'-') => (true, &word[1..]),
            Some(b'+') => (false, &word[1..]),
            _ => (false, word),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let (integer, decimal) = self.format;
        let total = (integer + decimal) as usize;
        let padded = match self.zeros {
            ZeroMode::Leading if digits.len() < total => format!("{:0<width$}", digits, width = total),
            _ => digits.to_string(),
        };
        let value = padded.parse::<f64>().ok()? / 10f64.powi(decimal as i32);
        Some(if negative { -value } else { value })
    }
}

impl Default for ExcellonSettings {
    fn default() -> Self {
        Self::for_units(Units::Imperial, ZeroMode::Trailing)
    }
}

fn tool_definition_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^T(\d+)(?:[FSBHZ][+-]?[\d.]*)*C([^A-Z\s]+)").expect("invalid regex pattern")
    })
}

fn tool_select_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^T(\d+)$").expect("invalid regex pattern"))
}

fn hit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:X([+-]?[\d.]+))?(?:Y([+-]?[\d.]+))?$").expect("invalid regex pattern")
    })
}

fn file_format_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"FILE_FORMAT=(\d):(\d)").expect("invalid regex pattern"))
}

/// Load Excellon drill text.
pub fn loads(data: &str, filename: Option<&str>) -> Result<CamObject> {
    let mut settings = ExcellonSettings::default();
    let mut declared_units: Option<Units> = None;
    let mut explicit_format = false;
    let mut tools: HashMap<u32, f64> = HashMap::new();
    let mut current_tool: Option<u32> = None;
    let mut position = Point::default();
    let mut primitives = Vec::new();
    let mut in_header = false;

    for (index, raw) in data.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix(';') {
            if let Some(caps) = file_format_regex().captures(comment) {
                let integer = caps[1].parse::<u32>().unwrap_or(settings.format.0);
                let decimal = caps[2].parse::<u32>().unwrap_or(settings.format.1);
                settings.format = (integer, decimal);
                explicit_format = true;
            }
            continue;
        }

        if line == "M48" {
            in_header = true;
            continue;
        }
        if in_header && (line == "%" || line == "M95") {
            in_header = false;
            continue;
        }

        if let Some(units) = parse_units_statement(line) {
            let zeros = parse_zero_mode(line).unwrap_or(settings.zeros);
            let format = settings.format;
            settings = ExcellonSettings::for_units(units, zeros);
            if explicit_format {
                settings.format = format;
            }
            declared_units = Some(units);
            continue;
        }

        if let Some(caps) = tool_definition_regex().captures(line) {
            let tool = parse_tool_number(&caps[1], line_number)?;
            let diameter = caps[2]
                .parse::<f64>()
                .map_err(|_| ParseError::Excellon {
                    line: line_number,
                    reason: format!("invalid tool diameter '{}'", &caps[2]),
                })?;
            tools.insert(tool, settings.units.to_mm(diameter));
            if !in_header {
                current_tool = Some(tool);
            }
            continue;
        }

        if in_header {
            // FMAT, VER, ICI and similar header statements carry nothing we need.
            continue;
        }

        if let Some(caps) = tool_select_regex().captures(line) {
            let tool = parse_tool_number(&caps[1], line_number)?;
            current_tool = if tool == 0 { None } else { Some(tool) };
            continue;
        }

        if let Some(caps) = hit_regex().captures(line) {
            let x = caps.get(1).map(|m| m.as_str());
            let y = caps.get(2).map(|m| m.as_str());
            if x.is_none() && y.is_none() {
                continue;
            }

            let coordinate = |word: Option<&str>, current: f64| -> Result<f64> {
                match word {
                    Some(w) => settings
                        .parse_coordinate(w)
                        .map(|v| settings.units.to_mm(v))
                        .ok_or_else(|| {
                            ParseError::Excellon {
                                line: line_number,
                                reason: format!("invalid coordinate '{}'", w),
                            }
                            .into()
                        }),
                    None => Ok(current),
                }
            };
            position = Point::new(coordinate(x, position.x)?, coordinate(y, position.y)?);

            let tool = current_tool.unwrap_or(0);
            let diameter = match tools.get(&tool) {
                Some(d) => *d,
                None => {
                    warn!(
                        "Drill hit at line {} uses undefined tool T{}",
                        line_number, tool
                    );
                    0.0
                }
            };
            primitives.push(Primitive::Hole {
                position,
                diameter,
                tool,
            });
            continue;
        }

        match line {
            "M71" => settings.units = Units::Metric,
            "M72" => settings.units = Units::Imperial,
            _ => debug!("Skipping Excellon statement at line {}: {}", line_number, line),
        }
    }

    let units = declared_units.unwrap_or(settings.units);
    debug!(
        "Loaded Excellon {:?}: {} tools, {} hits",
        filename,
        tools.len(),
        primitives.len()
    );

    Ok(CamObject::new(
        filename.map(str::to_string),
        CamFormat::Excellon,
        units,
        primitives,
    ))
}

fn parse_tool_number(digits: &str, line: usize) -> Result<u32> {
    digits.parse::<u32>().map_err(|_| {
        ParseError::Excellon {
            line,
            reason: format!("invalid tool number '{}'", digits),
        }
        .into()
    })
}

fn parse_units_statement(line: &str) -> Option<Units> {
    let keyword = line.split(',').next().unwrap_or(line);
    match keyword {
        "METRIC" => Some(Units::Metric),
        "INCH" => Some(Units::Imperial),
        _ => None,
    }
}

fn parse_zero_mode(line: &str) -> Option<ZeroMode> {
    line.split(',').skip(1).find_map(|part| match part.trim() {
        "LZ" => Some(ZeroMode::Leading),
        "TZ" => Some(ZeroMode::Trailing),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holes(cam: &CamObject) -> Vec<(Point, f64, u32)> {
        cam.primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Hole {
                    position,
                    diameter,
                    tool,
                } => Some((*position, *diameter, *tool)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_metric_decimal_coordinates() {
        let data = "M48\nMETRIC,TZ\nT1C0.800\nT2C1.000\n%\nG90\nG05\nT1\nX10.0Y5.0\nX12.5Y5.0\nT2\nX20.0Y10.0\nT0\nM30\n";
        let cam = loads(data, Some("board.drl")).unwrap();
        assert_eq!(cam.format(), CamFormat::Excellon);
        assert_eq!(cam.units(), Units::Metric);

        let hits = holes(&cam);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0], (Point::new(10.0, 5.0), 0.8, 1));
        assert_eq!(hits[1].0, Point::new(12.5, 5.0));
        assert_eq!(hits[2], (Point::new(20.0, 10.0), 1.0, 2));
    }

    #[test]
    fn test_inch_implicit_decimals() {
        // Trailing zeros kept: 2.4 format, plain division.
        let data = "M48\nINCH,TZ\nT01C0.0400\n%\nT01\nX010000Y020000\nY025000\nM30\n";
        let cam = loads(data, None).unwrap();
        let hits = holes(&cam);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].0.x - 25.4).abs() < 1e-9);
        assert!((hits[0].0.y - 50.8).abs() < 1e-9);
        // Modal X carries over.
        assert!((hits[1].0.x - 25.4).abs() < 1e-9);
        assert!((hits[1].0.y - 63.5).abs() < 1e-9);
        assert!((hits[0].1 - 1.016).abs() < 1e-9);
    }

    #[test]
    fn test_leading_zero_padding() {
        let settings = ExcellonSettings::for_units(Units::Imperial, ZeroMode::Leading);
        // "0125" in 2.4 with trailing zeros suppressed is 01.25.
        assert_eq!(settings.parse_coordinate("0125"), Some(1.25));
        assert_eq!(settings.parse_coordinate("-0125"), Some(-1.25));

        let settings = ExcellonSettings::for_units(Units::Imperial, ZeroMode::Trailing);
        assert_eq!(settings.parse_coordinate("0125"), Some(0.0125));
        assert_eq!(settings.parse_coordinate("1.5"), Some(1.5));
        assert_eq!(settings.parse_coordinate("abc"), None);
    }

    #[test]
    fn test_file_format_comment() {
        let data = "M48\n;FILE_FORMAT=3:3\nMETRIC,TZ\nT1C0.5\n%\nT1\nX1000Y2000\nM30\n";
        let cam = loads(data, None).unwrap();
        let hits = holes(&cam);
        assert_eq!(hits[0].0, Point::new(1.0, 2.0));
    }

    #[test]
    fn test_invalid_tool_diameter() {
        let data = "M48\nMETRIC\nT1C0.8.1\n%\n";
        let err = loads(data, None).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_bounds_cover_holes() {
        let data = "M48\nMETRIC\nT1C1.0\n%\nT1\nX0.0Y0.0\nX10.0Y10.0\nM30\n";
        let cam = loads(data, None).unwrap();
        let bounds = cam.bounds().unwrap();
        assert_eq!(bounds.min_x, -0.5);
        assert_eq!(bounds.max_y, 10.5);
    }
}
