//! RS-274X (extended Gerber) loader
//!
//! Parsing is delegated to `gerber_parser`; this module walks the resulting
//! command list and turns draws, arcs, and flashes into [`Primitive`]s in
//! millimetres.

use std::io::BufReader;
use std::sync::OnceLock;

use gerber_parser::parse;
use gerber_types::{
    Aperture, Command, CoordinateNumber, DCode, FunctionCode, GCode, InterpolationMode,
    Operation, Unit,
};
use regex::Regex;
use tracing::{debug, warn};

use camstack_core::{CamFormat, CamObject, ParseError, Point, Primitive, Result, Units};

/// Stroke width used when the selected aperture is undefined or a macro.
const DEFAULT_APERTURE_MM: f64 = 0.1;

/// Load RS-274X text.
pub fn loads(data: &str, filename: Option<&str>) -> Result<CamObject> {
    let sanitized = sanitize(data);

    let reader = BufReader::new(sanitized.as_bytes());
    let doc = match parse(reader) {
        Ok(d) => d,
        Err((d, e)) => {
            warn!(
                "Gerber parser returned error for {:?}, using partial document. Error: {:?}",
                filename, e
            );
            d
        }
    };

    match &doc.format_specification {
        Some(fmt) => debug!("Format specification: {}.{}", fmt.integer, fmt.decimal),
        None => debug!("No format specification found, using parser default"),
    }

    let units = match &doc.units {
        Some(Unit::Inches) => Units::Imperial,
        Some(Unit::Millimeters) => Units::Metric,
        None => {
            debug!("No units found, assuming millimeters");
            Units::Metric
        }
    };
    let unit_scale = units.mm_scale();

    // The parser has already applied %FS; values are in file units.
    let convert = |c: &CoordinateNumber| -> f64 { f64::from(*c) * unit_scale };

    let mut primitives = Vec::new();
    let mut current = Point::default();
    let mut current_aperture_code = 0;
    let mut interpolation = InterpolationMode::Linear;
    let mut command_count = 0usize;

    for command in doc.commands() {
        command_count += 1;
        match command {
            Command::FunctionCode(FunctionCode::DCode(dcode)) => match dcode {
                DCode::Operation(op) => match op {
                    Operation::Interpolate(coord, offset) => {
                        // D01
                        let x = coord
                            .as_ref()
                            .and_then(|c| c.x.as_ref())
                            .map(convert)
                            .unwrap_or(current.x);
                        let y = coord
                            .as_ref()
                            .and_then(|c| c.y.as_ref())
                            .map(convert)
                            .unwrap_or(current.y);
                        let end = Point::new(x, y);

                        let width = doc
                            .apertures
                            .get(&current_aperture_code)
                            .map(|ap| aperture_extent(ap, unit_scale))
                            .map(|(w, h)| w.min(h))
                            .unwrap_or(DEFAULT_APERTURE_MM);

                        match interpolation {
                            InterpolationMode::Linear => {
                                primitives.push(Primitive::Line {
                                    start: current,
                                    end,
                                    width,
                                });
                            }
                            InterpolationMode::ClockwiseCircular
                            | InterpolationMode::CounterclockwiseCircular => {
                                let i = offset
                                    .as_ref()
                                    .and_then(|c| c.x.as_ref())
                                    .map(convert)
                                    .unwrap_or(0.0);
                                let j = offset
                                    .as_ref()
                                    .and_then(|c| c.y.as_ref())
                                    .map(convert)
                                    .unwrap_or(0.0);
                                primitives.push(Primitive::Arc {
                                    start: current,
                                    end,
                                    center: Point::new(current.x + i, current.y + j),
                                    width,
                                    clockwise: matches!(
                                        interpolation,
                                        InterpolationMode::ClockwiseCircular
                                    ),
                                });
                            }
                        }

                        current = end;
                    }
                    Operation::Move(coord) => {
                        // D02
                        current.x = coord
                            .as_ref()
                            .and_then(|c| c.x.as_ref())
                            .map(convert)
                            .unwrap_or(current.x);
                        current.y = coord
                            .as_ref()
                            .and_then(|c| c.y.as_ref())
                            .map(convert)
                            .unwrap_or(current.y);
                    }
                    Operation::Flash(coord) => {
                        // D03
                        let x = coord
                            .as_ref()
                            .and_then(|c| c.x.as_ref())
                            .map(convert)
                            .unwrap_or(current.x);
                        let y = coord
                            .as_ref()
                            .and_then(|c| c.y.as_ref())
                            .map(convert)
                            .unwrap_or(current.y);
                        let position = Point::new(x, y);

                        let (width, height) = doc
                            .apertures
                            .get(&current_aperture_code)
                            .map(|ap| aperture_extent(ap, unit_scale))
                            .unwrap_or((DEFAULT_APERTURE_MM, DEFAULT_APERTURE_MM));
                        primitives.push(Primitive::Flash {
                            position,
                            width,
                            height,
                        });
                        current = position;
                    }
                },
                DCode::SelectAperture(code) => {
                    current_aperture_code = *code;
                }
            },
            Command::FunctionCode(FunctionCode::GCode(GCode::InterpolationMode(mode))) => {
                interpolation = *mode;
            }
            _ => {}
        }
    }

    if command_count == 0 {
        return Err(ParseError::Gerber(format!(
            "no commands found in {}",
            filename.unwrap_or("<data>")
        ))
        .into());
    }

    debug!(
        "Loaded RS-274X {:?}: {} commands, {} primitives",
        filename,
        command_count,
        primitives.len()
    );

    Ok(CamObject::new(
        filename.map(str::to_string),
        CamFormat::Rs274x,
        units,
        primitives,
    ))
}

/// Drop repeated `%FS`/`%MO` statements, which some exporters emit once per
/// layer section and which the parser rejects.
fn sanitize(data: &str) -> String {
    static FS_REGEX: OnceLock<Regex> = OnceLock::new();
    static MO_REGEX: OnceLock<Regex> = OnceLock::new();
    let re_fs = FS_REGEX.get_or_init(|| Regex::new(r"%FS.*?\*%").expect("invalid regex pattern"));
    let re_mo = MO_REGEX.get_or_init(|| Regex::new(r"%MO.*?\*%").expect("invalid regex pattern"));

    let mut sanitized = data.to_string();
    for re in [re_fs, re_mo] {
        let mut count = 0;
        sanitized = re
            .replace_all(&sanitized, |caps: &regex::Captures| {
                count += 1;
                if count > 1 {
                    String::new()
                } else {
                    caps[0].to_string()
                }
            })
            .to_string();
    }
    sanitized
}

/// Width and height of an aperture in millimetres.
fn aperture_extent(ap: &Aperture, unit_scale: f64) -> (f64, f64) {
    match ap {
        Aperture::Circle(c) => (c.diameter * unit_scale, c.diameter * unit_scale),
        Aperture::Rectangle(r) => (r.x * unit_scale, r.y * unit_scale),
        Aperture::Obround(o) => (o.x * unit_scale, o.y * unit_scale),
        Aperture::Polygon(p) => (p.diameter * unit_scale, p.diameter * unit_scale),
        _ => (DEFAULT_APERTURE_MM, DEFAULT_APERTURE_MM),
    }
}
