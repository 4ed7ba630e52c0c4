//! Parsed CAM objects
//!
//! A [`CamObject`] is what a per-format loader produces: the source name,
//! the format it was read as, and the primitives it contains in millimetres.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::{Bounds, Primitive};
use crate::units::Units;

/// File formats understood by the loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CamFormat {
    /// RS-274X (extended Gerber)
    Rs274x,
    /// Excellon NC drill
    Excellon,
    /// IPC-D-356 netlist
    IpcD356,
}

impl CamFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rs274x => "rs274x",
            Self::Excellon => "excellon",
            Self::IpcD356 => "ipc_d_356",
        }
    }
}

impl fmt::Display for CamFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rs274x => write!(f, "RS-274X"),
            Self::Excellon => write!(f, "Excellon"),
            Self::IpcD356 => write!(f, "IPC-D-356"),
        }
    }
}

/// A parsed CAM file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CamObject {
    filename: Option<String>,
    format: CamFormat,
    units: Units,
    primitives: Vec<Primitive>,
    bounds: Option<Bounds>,
}

impl CamObject {
    /// Build a CAM object; bounds are derived from the primitives.
    pub fn new(
        filename: Option<String>,
        format: CamFormat,
        units: Units,
        primitives: Vec<Primitive>,
    ) -> Self {
        let bounds = Bounds::union_all(primitives.iter().map(Primitive::bounds));
        Self {
            filename,
            format,
            units,
            primitives,
            bounds,
        }
    }

    /// Source name as given to the loader, possibly including directories.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Final path component of the source name.
    pub fn base_name(&self) -> Option<&str> {
        self.filename.as_deref().map(base_name)
    }

    pub fn format(&self) -> CamFormat {
        self.format
    }

    /// Units declared by the source file. Primitives are always millimetres.
    pub fn units(&self) -> Units {
        self.units
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn is_drill_format(&self) -> bool {
        self.format == CamFormat::Excellon
    }

    pub fn is_netlist_format(&self) -> bool {
        self.format == CamFormat::IpcD356
    }
}

/// Final component of a `/` or `\` separated name.
pub fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_format_identity() {
        let drill = CamObject::new(None, CamFormat::Excellon, Units::Metric, Vec::new());
        assert!(drill.is_drill_format());
        assert!(!drill.is_netlist_format());
        assert!(drill.bounds().is_none());

        let net = CamObject::new(None, CamFormat::IpcD356, Units::Imperial, Vec::new());
        assert!(net.is_netlist_format());
        assert_eq!(net.format().as_str(), "ipc_d_356");
    }

    #[test]
    fn test_bounds_from_primitives() {
        let cam = CamObject::new(
            Some("gerbers/board.drl".to_string()),
            CamFormat::Excellon,
            Units::Metric,
            vec![
                Primitive::Hole {
                    position: Point::new(0.0, 0.0),
                    diameter: 1.0,
                    tool: 1,
                },
                Primitive::Hole {
                    position: Point::new(10.0, 20.0),
                    diameter: 1.0,
                    tool: 1,
                },
            ],
        );
        assert_eq!(cam.bounds(), Some(Bounds::new(-0.5, -0.5, 10.5, 20.5)));
        assert_eq!(cam.base_name(), Some("board.drl"));
        assert_eq!(cam.primitives().len(), 2);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("a/b/c.gtl"), "c.gtl");
        assert_eq!(base_name("C:\\job\\top.gbr"), "top.gbr");
        assert_eq!(base_name("plain.gbl"), "plain.gbl");
        assert_eq!(base_name("dir/"), "");
    }
}
