//! # camstack Layers
//!
//! Decides which physical board layer each CAM file is and puts the layers
//! in stack order.
//!
//! ## Components
//!
//! - [`hints`]: the hint table driving classification, built in or loaded
//!   from JSON/TOML ([`config`])
//! - [`classifier`]: filename classification (extension, then keywords)
//! - [`content`]: content classification, the fallback for opaque names
//! - [`layer`]: layer entities and the factory turning CAM objects into them
//! - [`sorter`]: canonical top-to-bottom ordering
//! - [`stack`]: whole-job loading and views over the sorted layers

pub mod classifier;
pub mod config;
pub mod content;
pub mod error;
pub mod hints;
pub mod layer;
pub mod layer_class;
pub mod sorter;
pub mod stack;

pub use classifier::guess_layer_class;
pub use content::guess_layer_class_by_content;
pub use error::{HintTableError, Result};
pub use hints::{Hint, HintTable};
pub use layer::{load_layer, load_layer_data, DrillLayer, InternalLayer, Layer, PcbLayer};
pub use layer_class::LayerClass;
pub use sorter::sort_layers;
pub use stack::LayerStack;
