//! File format detection

use serde::{Deserialize, Serialize};
use std::fmt;

use camstack_core::CamFormat;

/// Format tag produced by [`detect_file_format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    Rs274x,
    Excellon,
    IpcD356,
    Unknown,
}

impl FileFormat {
    /// The loader format, `None` for [`FileFormat::Unknown`].
    pub fn cam_format(self) -> Option<CamFormat> {
        match self {
            Self::Rs274x => Some(CamFormat::Rs274x),
            Self::Excellon => Some(CamFormat::Excellon),
            Self::IpcD356 => Some(CamFormat::IpcD356),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cam_format() {
            Some(format) => write!(f, "{}", format.as_str()),
            None => write!(f, "unknown"),
        }
    }
}

/// Identify the format of decoded CAM text.
///
/// Lines are scanned in order and the first decisive one wins: an `M48`
/// header starts an Excellon file, an `%FS` format statement marks RS-274X,
/// and a `P JOB` parameter record marks an IPC-D-356 netlist.
pub fn detect_file_format(data: &str) -> FileFormat {
    for line in data.lines() {
        if line.contains("M48") {
            return FileFormat::Excellon;
        }
        if line.contains("%FS") {
            return FileFormat::Rs274x;
        }
        if is_ipc_job_record(line) {
            return FileFormat::IpcD356;
        }
    }
    FileFormat::Unknown
}

fn is_ipc_job_record(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    matches!((tokens.next(), tokens.next()), (Some("P"), Some("JOB")))
}
