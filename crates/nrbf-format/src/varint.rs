//! 7-bit variable-length integers.
//!
//! The format writes lengths the way `System.IO.BinaryWriter.Write7BitEncodedInt`
//! does: little-endian groups of 7 bits, with the high bit of each byte set
//! while more groups follow.

use std::io::Write;

use crate::error::Result;

/// Maximum number of groups a `u64` can occupy.
const MAX_GROUPS: usize = 10;

/// Encode a non-negative integer as 7-bit groups, least significant first.
///
/// Zero encodes to an **empty** sequence. Length prefixes that must stay
/// readable for zero go through [`write_7bit_int`] instead, which always
/// emits at least one byte.
///
/// ```
/// use nrbf_format::encode_7bit_int;
///
/// assert_eq!(encode_7bit_int(300), vec![0xAC, 0x02]);
/// assert!(encode_7bit_int(0).is_empty());
/// ```
#[must_use]
pub fn encode_7bit_int(mut value: u64) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(MAX_GROUPS);
    while value > 0 {
        let mut group = (value & 0x7f) as u8;
        value >>= 7;
        if value > 0 {
            group |= 0x80;
        }
        encoded.push(group);
    }
    encoded
}

/// Write a 7-bit encoded integer, emitting a single `0x00` for zero.
pub fn write_7bit_int<W: Write>(w: &mut W, value: u64) -> Result<()> {
    if value == 0 {
        w.write_all(&[0])?;
    } else {
        w.write_all(&encode_7bit_int(value))?;
    }
    Ok(())
}

/// Decode a 7-bit encoded integer from the start of `bytes`.
///
/// Returns the value and the number of bytes consumed, or `None` when the
/// input ends before a byte with a clear continuation bit or runs past the
/// width of a `u64`.
///
/// Zero is the one value whose [`encode_7bit_int`] form does not decode:
/// the empty sequence yields `None`. The single `0x00` byte written by
/// [`write_7bit_int`] decodes to `Some((0, 1))`.
#[must_use]
pub fn decode_7bit_int(bytes: &[u8]) -> Option<(u64, usize)> {
    let mut value = 0u64;
    for (idx, byte) in bytes.iter().take(MAX_GROUPS).enumerate() {
        value |= u64::from(byte & 0x7f) << (7 * idx);
        if byte & 0x80 == 0 {
            return Some((value, idx + 1));
        }
    }
    None
}
