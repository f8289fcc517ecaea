//! `MemberReference`: points a member at an object defined elsewhere in the stream.

use std::io::Write;

use super::write_i32;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberReference {
    pub id_ref: i32,
}

impl MemberReference {
    #[must_use]
    pub fn new(id_ref: i32) -> Self {
        Self { id_ref }
    }

    pub(crate) fn encode_fields<W: Write>(&self, w: &mut W) -> Result<()> {
        write_i32(w, self.id_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Record;

    #[test]
    fn test_reference_layout() {
        let bytes = Record::from(MemberReference::new(5)).to_bytes().unwrap();
        assert_eq!(bytes, vec![9, 5, 0, 0, 0]);
    }
}
