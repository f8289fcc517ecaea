//! `BinaryObjectString`: a string object with its own id.

use std::io::Write;

use super::{write_i32, write_string};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryObjectString {
    pub object_id: i32,
    pub value: String,
}

impl BinaryObjectString {
    pub fn new(object_id: i32, value: impl Into<String>) -> Self {
        Self {
            object_id,
            value: value.into(),
        }
    }

    pub(crate) fn encode_fields<W: Write>(&self, w: &mut W) -> Result<()> {
        write_i32(w, self.object_id)?;
        write_string(w, &self.value)
    }
}
