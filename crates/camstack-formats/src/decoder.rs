//! Byte-to-text decoding
//!
//! CAM exports are mostly 7-bit ASCII, but some CAD tools write UTF-8 or
//! UTF-16 with a byte order mark, and older ones write 8-bit code pages into
//! comments. Detection never fails: when no encoding can be determined the
//! data is decoded as Latin-1, which maps every byte to a character.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::warn;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Text encodings the decoder can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    /// 7-bit ASCII
    Ascii,
    /// UTF-8, with or without BOM
    Utf8,
    /// UTF-16 little endian (BOM required)
    Utf16Le,
    /// UTF-16 big endian (BOM required)
    Utf16Be,
    /// ISO-8859-1, the fixed fallback
    Latin1,
}

impl TextEncoding {
    pub fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Utf8 => "utf-8",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
            Self::Latin1 => "iso-8859-1",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of encoding detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// The detected encoding, `None` when undetermined.
    pub encoding: Option<TextEncoding>,
    /// Confidence in `0.0..=1.0`.
    pub confidence: f32,
}

/// Errors decoding bytes with a specific encoding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("invalid {encoding} data: {reason}")]
    Invalid {
        encoding: TextEncoding,
        reason: String,
    },
}

/// Detect the text encoding of raw bytes.
pub fn detect(data: &[u8]) -> Detection {
    let found = |encoding, confidence| Detection {
        encoding: Some(encoding),
        confidence,
    };

    if data.starts_with(&UTF8_BOM) {
        return found(TextEncoding::Utf8, 1.0);
    }
    if data.starts_with(&UTF16_LE_BOM) {
        return found(TextEncoding::Utf16Le, 1.0);
    }
    if data.starts_with(&UTF16_BE_BOM) {
        return found(TextEncoding::Utf16Be, 1.0);
    }
    if data.is_ascii() {
        return found(TextEncoding::Ascii, 1.0);
    }
    if std::str::from_utf8(data).is_ok() {
        return found(TextEncoding::Utf8, 0.99);
    }

    Detection {
        encoding: None,
        confidence: 0.0,
    }
}

/// Decode bytes with the given encoding. Byte order marks are stripped.
pub fn decode(data: &[u8], encoding: TextEncoding) -> Result<String, DecodeError> {
    match encoding {
        TextEncoding::Ascii | TextEncoding::Utf8 => {
            let data = data.strip_prefix(&UTF8_BOM).unwrap_or(data);
            String::from_utf8(data.to_vec()).map_err(|e| DecodeError::Invalid {
                encoding,
                reason: e.to_string(),
            })
        }
        TextEncoding::Utf16Le => decode_utf16(
            data.strip_prefix(&UTF16_LE_BOM).unwrap_or(data),
            encoding,
            u16::from_le_bytes,
        ),
        TextEncoding::Utf16Be => decode_utf16(
            data.strip_prefix(&UTF16_BE_BOM).unwrap_or(data),
            encoding,
            u16::from_be_bytes,
        ),
        TextEncoding::Latin1 => Ok(decode_latin1(data)),
    }
}

/// Decode as ISO-8859-1. Cannot fail.
pub fn decode_latin1(data: &[u8]) -> String {
    data.iter().map(|&b| b as char).collect()
}

/// Decode using an earlier [`detect`] result, recovering with Latin-1 when
/// the encoding is unknown or the detected encoding does not decode cleanly.
pub fn decode_with_fallback(data: &[u8], detection: Detection) -> (String, TextEncoding) {
    match detection.encoding {
        Some(encoding) => match decode(data, encoding) {
            Ok(text) => (text, encoding),
            Err(e) => {
                warn!("{}, falling back to {}", e, TextEncoding::Latin1);
                (decode_latin1(data), TextEncoding::Latin1)
            }
        },
        None => {
            warn!(
                "Could not determine text encoding, falling back to {}",
                TextEncoding::Latin1
            );
            (decode_latin1(data), TextEncoding::Latin1)
        }
    }
}

fn decode_utf16(
    data: &[u8],
    encoding: TextEncoding,
    to_unit: fn([u8; 2]) -> u16,
) -> Result<String, DecodeError> {
    if data.len() % 2 != 0 {
        return Err(DecodeError::Invalid {
            encoding,
            reason: "odd number of bytes".to_string(),
        });
    }
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| DecodeError::Invalid {
        encoding,
        reason: e.to_string(),
    })
}
