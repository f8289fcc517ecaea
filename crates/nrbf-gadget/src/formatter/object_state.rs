//! `ObjectStateFormatter` envelope.
//!
//! `LosFormatter` and `ObjectStateFormatter` open every payload with a format
//! marker, a version marker and one type token. A `BinarySerialized` token is
//! followed by a 7-bit encoded byte count and then the MS-NRBF stream that
//! the inner `BinaryFormatter` will read.
//!
//! | Offset | Field          | Value                 |
//! |--------|----------------|-----------------------|
//! | 0      | marker format  | `0xFF`                |
//! | 1      | marker version | `0x01`                |
//! | 2      | token          | `0x32` (50)           |
//! | 3..    | length         | 7-bit encoded, 1-5 B  |
//! | ..     | body           | serialized stream     |

use std::io::Write;

use nrbf_format::{NrbfError, write_7bit_int};

use crate::error::Result;

/// Format marker written before any token.
pub const MARKER_FORMAT: u8 = 0xFF;

/// Version marker written after the format marker.
pub const MARKER_VERSION: u8 = 0x01;

/// Type tokens understood by `ObjectStateFormatter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Token {
    Int16 = 1,
    Int32 = 2,
    Byte = 3,
    Char = 4,
    String = 5,
    DateTime = 6,
    Double = 7,
    Single = 8,
    Color = 9,
    KnownColor = 10,
    IntEnum = 11,
    EmptyColor = 12,
    Pair = 15,
    Triplet = 16,
    Array = 20,
    StringArray = 21,
    ArrayList = 22,
    Hashtable = 23,
    HybridDictionary = 24,
    Type = 25,
    Unit = 27,
    EmptyUnit = 28,
    EventValidationStore = 29,
    IndexedStringAdd = 30,
    IndexedString = 31,
    StringFormatted = 40,
    BinarySerialized = 50,
    SparseArray = 60,
    Null = 100,
    EmptyString = 101,
    ZeroInt32 = 102,
    True = 103,
    False = 104,
}

impl Token {
    /// Byte written on the wire.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

/// The three bytes that open an `ObjectStateFormatter` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectStateFormatterHeader {
    pub marker_format: u8,
    pub marker_version: u8,
    pub token: Token,
}

impl ObjectStateFormatterHeader {
    /// Header with the standard markers and the given token.
    #[must_use]
    pub const fn new(token: Token) -> Self {
        Self {
            marker_format: MARKER_FORMAT,
            marker_version: MARKER_VERSION,
            token,
        }
    }

    /// Write the three header bytes.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&[self.marker_format, self.marker_version, self.token.tag()])
            .map_err(NrbfError::from)?;
        Ok(())
    }
}

impl Default for ObjectStateFormatterHeader {
    fn default() -> Self {
        Self::new(Token::BinarySerialized)
    }
}

/// Wrap a serialized stream as a `LosFormatter` payload.
///
/// ```
/// use nrbf_gadget::formatter::los_formatter;
///
/// let payload = los_formatter(&[0x0b]).unwrap();
/// assert_eq!(payload, vec![0xFF, 0x01, 0x32, 0x01, 0x0b]);
/// ```
///
/// # Errors
///
/// Fails when the body is longer than `i32::MAX` bytes, which the reader's
/// length field cannot express.
pub fn los_formatter(blob: &[u8]) -> Result<Vec<u8>> {
    if i32::try_from(blob.len()).is_err() {
        return Err(NrbfError::LengthOverflow {
            what: "LosFormatter body",
            len: blob.len(),
        }
        .into());
    }

    // 3 header bytes + at most 5 length bytes
    let mut payload = Vec::with_capacity(blob.len() + 8);
    ObjectStateFormatterHeader::new(Token::BinarySerialized).write_to(&mut payload)?;
    write_7bit_int(&mut payload, blob.len() as u64)?;
    payload.extend_from_slice(blob);
    Ok(payload)
}
