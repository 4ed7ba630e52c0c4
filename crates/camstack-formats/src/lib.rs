//! # camstack Formats
//!
//! Turns raw CAM file bytes into parsed [`CamObject`]s.
//!
//! ## Pipeline
//!
//! 1. [`decoder`]: detects the text encoding, falling back to Latin-1
//! 2. [`detect`]: identifies the file format from the decoded text
//! 3. [`dispatch`]: hands the text to the matching loader
//!
//! ## Loaders
//!
//! - **RS-274X**: extended Gerber via `gerber_parser`
//! - **Excellon**: NC drill files
//! - **IPC-D-356**: bare-board test netlists

pub mod decoder;
pub mod detect;
pub mod dispatch;
pub mod excellon;
pub mod ipc356;
pub mod rs274x;

pub use camstack_core::{CamError, CamFormat, CamObject, Result};
pub use decoder::{Detection, TextEncoding};
pub use detect::{detect_file_format, FileFormat};
pub use dispatch::{loads, read};
