//! `SerializationHeaderRecord`, the first record of every stream.
//!
//! # Structure
//!
//! | Offset | Length | Field          | Description                         |
//! |--------|--------|----------------|-------------------------------------|
//! | 0      | 1      | record_type    | `0` (SerializedStreamHeader)        |
//! | 1-4    | 4      | root_id        | Object id of the graph root         |
//! | 5-8    | 4      | header_id      | `-1` when no header array follows   |
//! | 9-12   | 4      | major_version  | Always `1`                          |
//! | 13-16  | 4      | minor_version  | Always `0`                          |

use std::io::Write;

use super::write_i32;
use crate::error::Result;

/// Header id meaning "no additional header".
pub const NO_HEADER_ID: i32 = -1;

/// Format major version.
pub const MAJOR_VERSION: i32 = 1;

/// Format minor version.
pub const MINOR_VERSION: i32 = 0;

/// Stream header naming the root object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializationHeaderRecord {
    pub root_id: i32,
    pub header_id: i32,
    pub major_version: i32,
    pub minor_version: i32,
}

impl SerializationHeaderRecord {
    /// Header for `root_id` with no additional header and version 1.0.
    #[must_use]
    pub fn new(root_id: i32) -> Self {
        Self {
            root_id,
            header_id: NO_HEADER_ID,
            major_version: MAJOR_VERSION,
            minor_version: MINOR_VERSION,
        }
    }

    /// Override the header id.
    #[must_use]
    pub fn with_header_id(mut self, header_id: i32) -> Self {
        self.header_id = header_id;
        self
    }

    pub(crate) fn encode_fields<W: Write>(&self, w: &mut W) -> Result<()> {
        write_i32(w, self.root_id)?;
        write_i32(w, self.header_id)?;
        write_i32(w, self.major_version)?;
        write_i32(w, self.minor_version)?;
        Ok(())
    }
}
