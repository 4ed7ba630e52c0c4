//! Geometry primitives carried by parsed CAM objects.
//!
//! All coordinates are in millimetres.

use serde::{Deserialize, Serialize};

/// A point in the board plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    /// Degenerate box around a single point.
    pub fn from_point(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// Box extending `half_width`/`half_height` either side of `center`.
    pub fn around(center: Point, half_width: f64, half_height: f64) -> Self {
        Self::new(
            center.x - half_width,
            center.y - half_height,
            center.x + half_width,
            center.y + half_height,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Union over an iterator of boxes; `None` when the iterator is empty.
    pub fn union_all<I>(boxes: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = Bounds>,
    {
        boxes.into_iter().reduce(|acc, b| acc.union(&b))
    }
}

/// A single geometry operation extracted from a CAM file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Linear draw with a round aperture of `width`.
    Line { start: Point, end: Point, width: f64 },
    /// Circular draw around `center`.
    Arc {
        start: Point,
        end: Point,
        center: Point,
        width: f64,
        clockwise: bool,
    },
    /// Aperture flash; `width`/`height` describe the aperture extent.
    Flash {
        position: Point,
        width: f64,
        height: f64,
    },
    /// Drill hit.
    Hole {
        position: Point,
        diameter: f64,
        tool: u32,
    },
    /// Netlist test point.
    TestPoint {
        net: String,
        refdes: String,
        pin: String,
        position: Point,
        diameter: Option<f64>,
    },
}

impl Primitive {
    /// Extent covered by the primitive, including its stroke or pad size.
    pub fn bounds(&self) -> Bounds {
        match self {
            Primitive::Line { start, end, width } => {
                let half = width / 2.0;
                Bounds::new(start.x, start.y, end.x, end.y).union(&Bounds::around(
                    *start, half, half,
                ))
                .union(&Bounds::around(*end, half, half))
            }
            Primitive::Arc {
                start,
                end,
                center,
                width,
                ..
            } => {
                // Full circle extent; conservative but independent of sweep.
                let radius = center.distance_to(start).max(center.distance_to(end));
                let half = width / 2.0;
                Bounds::around(*center, radius + half, radius + half)
            }
            Primitive::Flash {
                position,
                width,
                height,
            } => Bounds::around(*position, width / 2.0, height / 2.0),
            Primitive::Hole {
                position, diameter, ..
            } => Bounds::around(*position, diameter / 2.0, diameter / 2.0),
            Primitive::TestPoint {
                position, diameter, ..
            } => {
                let half = diameter.unwrap_or(0.0) / 2.0;
                Bounds::around(*position, half, half)
            }
        }
    }
}
