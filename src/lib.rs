//! # camstack
//!
//! Works out which physical board layer each file of a PCB fabrication job
//! is, and puts the layers in stack order:
//! - RS-274X (extended Gerber), Excellon drill, and IPC-D-356 netlist input
//! - Filename classification with content fallback
//! - Canonical top-to-bottom stack ordering
//!
//! ## Architecture
//!
//! camstack is organized as a workspace with multiple crates:
//!
//! 1. **camstack-core** - Errors, units, geometry, parsed CAM objects
//! 2. **camstack-formats** - Text decoding, format detection, loaders
//! 3. **camstack-layers** - Hint tables, classification, layer entities, sorting
//! 4. **camstack** - Re-exports and logging setup
//!
//! ## Example
//!
//! ```no_run
//! use camstack::LayerStack;
//!
//! let stack = LayerStack::from_directory("gerbers/")?;
//! for layer in stack.layers() {
//!     println!("{}", layer);
//! }
//! # Ok::<(), camstack::CamError>(())
//! ```

pub use camstack_core::{
    base_name, Bounds, CamError, CamFormat, CamObject, ParseError, Point, Primitive, Result,
    Units,
};

pub use camstack_formats::{decoder, detect_file_format, loads, read, FileFormat, TextEncoding};

pub use camstack_layers::{
    guess_layer_class, guess_layer_class_by_content, load_layer, load_layer_data, sort_layers,
    DrillLayer, Hint, HintTable, HintTableError, InternalLayer, Layer, LayerClass, LayerStack,
    PcbLayer,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert!(BUILD_DATE.ends_with("UTC"));
    }

    #[test]
    fn test_logging_initializes_once() {
        assert!(init_logging().is_ok());
        assert!(init_logging().is_err());
    }

    #[test]
    fn test_reexported_pipeline() {
        let layer = load_layer_data(
            "M48\nMETRIC\nT1C0.8\n%\nT1\nX1.0Y1.0\nM30\n",
            Some("board.drl"),
        )
        .unwrap();
        assert_eq!(layer.layer_class(), LayerClass::Drill);
        assert_eq!(guess_layer_class("board.gtl"), LayerClass::Top);
    }
}
