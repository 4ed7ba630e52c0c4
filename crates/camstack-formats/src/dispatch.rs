//! Entry points that turn files or text into [`CamObject`]s.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use camstack_core::{CamError, CamObject, Result};

use crate::decoder;
use crate::detect::{detect_file_format, FileFormat};
use crate::{excellon, ipc356, rs274x};

/// Read a CAM file from disk.
///
/// Encoding problems never fail the read: undetermined or undecodable bytes
/// are decoded as Latin-1.
pub fn read(path: impl AsRef<Path>) -> Result<CamObject> {
    let path = path.as_ref();
    let mut data = Vec::new();
    {
        let mut file = File::open(path)?;
        file.read_to_end(&mut data)?;
    }

    let detection = decoder::detect(&data);
    match detection.encoding {
        Some(encoding) => debug!(
            "Detected encoding {} (confidence {:.2}) for {}",
            encoding,
            detection.confidence,
            path.display()
        ),
        None => debug!("No encoding detected for {}", path.display()),
    }

    let (text, _) = decoder::decode_with_fallback(&data, detection);
    let filename = path.to_string_lossy();
    loads(&text, Some(&*filename))
}

/// Load CAM data from decoded text.
pub fn loads(data: &str, filename: Option<&str>) -> Result<CamObject> {
    let format = detect_file_format(data);
    info!(
        "Detected {} format for {}",
        format,
        filename.unwrap_or("<data>")
    );

    match format {
        FileFormat::Rs274x => rs274x::loads(data, filename),
        FileFormat::Excellon => excellon::loads(data, filename),
        FileFormat::IpcD356 => ipc356::loads(data, filename),
        FileFormat::Unknown => Err(CamError::format_unrecognized(filename)),
    }
}
