//! # camstack Core
//!
//! Core types shared by the camstack crates: the parsed [`CamObject`], the
//! geometry primitives it carries, measurement units, and the error types
//! surfaced by the loaders.

pub mod cam;
pub mod error;
pub mod geometry;
pub mod units;

pub use cam::{base_name, CamFormat, CamObject};
pub use error::{CamError, ParseError, Result};
pub use geometry::{Bounds, Point, Primitive};
pub use units::{Units, MM_PER_INCH};
