//! Error types for NRBF record construction and encoding.

use thiserror::Error;

use crate::enums::RecordType;

/// Errors that can occur when building or encoding NRBF records.
#[derive(Debug, Error)]
pub enum NrbfError {
    /// A record was constructed with inconsistent or missing fields.
    #[error("malformed {record} record: {message}")]
    MalformedRecord {
        record: &'static str,
        message: String,
    },

    /// The record sequence cannot form a stream.
    #[error("malformed stream: {message}")]
    MalformedStream { message: String },

    /// A mandatory ancestor search reached the root without a match.
    #[error("no {kind} ancestor found above object {object_id}")]
    AncestorNotFound { object_id: i32, kind: RecordType },

    /// A length does not fit the signed 32-bit range used on the wire.
    #[error("{what} length {len} exceeds the format limit")]
    LengthOverflow { what: &'static str, len: usize },

    /// Byte stream could not be walked while inspecting it.
    #[error("invalid stream at offset {offset}: {message}")]
    InvalidStream { offset: usize, message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for NRBF operations.
pub type Result<T> = std::result::Result<T, NrbfError>;

impl NrbfError {
    /// Create a MalformedRecord error.
    pub fn malformed(record: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            record,
            message: message.into(),
        }
    }

    /// Create a MalformedRecord error for a builder field that was never set.
    pub fn missing_field(record: &'static str, field: &'static str) -> Self {
        Self::malformed(record, format!("missing required field `{field}`"))
    }

    /// Create a MalformedRecord error for parallel member lists of different lengths.
    pub fn member_count_mismatch(
        record: &'static str,
        names: usize,
        types: usize,
        values: usize,
    ) -> Self {
        Self::malformed(
            record,
            format!("{names} member names, {types} member types, {values} member values"),
        )
    }

    /// Create a MalformedStream error.
    pub fn malformed_stream(message: impl Into<String>) -> Self {
        Self::MalformedStream {
            message: message.into(),
        }
    }

    /// Create an InvalidStream error.
    pub fn invalid_stream(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidStream {
            offset,
            message: message.into(),
        }
    }

    /// Whether this error was raised while constructing a record.
    #[must_use]
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}
