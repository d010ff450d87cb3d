//! Record codec
//!
//! Export direction: [`strip`] removes the Cosmos DB system properties from a
//! document and [`encode`] serializes it as compact JSON.
//!
//! Import direction: [`parse`] decodes a source file with a caller-chosen
//! [`TextEncoding`] and parses it into a [`Record`]. Failures come back as
//! [`ItemFailure`] values carrying the file name, never as errors for the
//! caller to propagate.

use crate::core::transfer::{FailureKind, ItemFailure};
use crate::domain::Record;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// System properties Cosmos DB writes onto every stored document
pub const RESERVED_FIELDS: [&str; 5] = ["_rid", "_self", "_etag", "_attachments", "_ts"];

/// Extension of files holding one record each
pub const RECORD_EXTENSION: &str = "json";

const BOM: char = '\u{feff}';

/// Errors produced while decoding or parsing a record
#[derive(Debug, Error)]
pub enum CodecError {
    /// Bytes are not valid in the requested encoding
    #[error("content is not valid {encoding}: {detail}")]
    Decode {
        encoding: TextEncoding,
        detail: String,
    },

    /// Text is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(String),

    /// JSON is valid but is not an object
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Text encodings accepted for upload source files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 (the default)
    #[default]
    Utf8,
    /// UTF-16 little endian, also accepted as `ucs2`
    Utf16Le,
    /// ISO-8859-1, also accepted as `binary`
    Latin1,
    /// 7-bit ASCII
    Ascii,
}

impl TextEncoding {
    /// Decode raw bytes into a string, dropping a leading byte order mark
    pub fn decode(self, bytes: &[u8]) -> Result<String, CodecError> {
        let text = match self {
            TextEncoding::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| {
                CodecError::Decode {
                    encoding: self,
                    detail: e.utf8_error().to_string(),
                }
            })?,
            TextEncoding::Utf16Le => {
                if bytes.len() % 2 != 0 {
                    return Err(CodecError::Decode {
                        encoding: self,
                        detail: format!("odd number of bytes ({})", bytes.len()),
                    });
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|e| CodecError::Decode {
                    encoding: self,
                    detail: e.to_string(),
                })?
            }
            TextEncoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            TextEncoding::Ascii => {
                if let Some(pos) = bytes.iter().position(|b| !b.is_ascii()) {
                    return Err(CodecError::Decode {
                        encoding: self,
                        detail: format!("non-ASCII byte 0x{:02x} at offset {pos}", bytes[pos]),
                    });
                }
                bytes.iter().map(|&b| char::from(b)).collect()
            }
        };

        Ok(match text.strip_prefix(BOM) {
            Some(rest) => rest.to_string(),
            None => text,
        })
    }

    /// Canonical name of the encoding
    pub fn as_str(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf8",
            TextEncoding::Utf16Le => "utf16le",
            TextEncoding::Latin1 => "latin1",
            TextEncoding::Ascii => "ascii",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(TextEncoding::Utf8),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(TextEncoding::Utf16Le),
            "latin1" | "binary" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            "ascii" => Ok(TextEncoding::Ascii),
            other => Err(format!(
                "Unsupported encoding '{other}'. Must be one of: utf8, utf16le, latin1, ascii"
            )),
        }
    }
}

/// Remove every reserved field from a record
///
/// Keys that are not present are ignored, so stripping is idempotent.
pub fn strip(mut record: Record) -> Record {
    for field in RESERVED_FIELDS {
        record.shift_remove(field);
    }
    record
}

/// Serialize a record as compact UTF-8 JSON
pub fn encode(record: &Record) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(record).map_err(|e| CodecError::Json(e.to_string()))
}

/// Decode and parse one source file into a record
///
/// `source` is only used to label the failure.
pub fn parse(bytes: &[u8], encoding: TextEncoding, source: &Path) -> Result<Record, ItemFailure> {
    parse_record(bytes, encoding).map_err(|e| {
        ItemFailure::new(
            display_name(source),
            FailureKind::Codec,
            format!("{e}. Check that the file contains valid JSON"),
        )
    })
}

fn parse_record(bytes: &[u8], encoding: TextEncoding) -> Result<Record, CodecError> {
    let text = encoding.decode(bytes)?;
    let value: Value = serde_json::from_str(&text).map_err(|e| CodecError::Json(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Array(_) => Err(CodecError::NotAnObject("an array")),
        Value::String(_) => Err(CodecError::NotAnObject("a string")),
        Value::Number(_) => Err(CodecError::NotAnObject("a number")),
        Value::Bool(_) => Err(CodecError::NotAnObject("a boolean")),
        Value::Null => Err(CodecError::NotAnObject("null")),
    }
}

/// True if the path carries the record file extension
pub fn is_record_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == RECORD_EXTENSION)
}

/// File name used to label a source in logs and outcomes
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
