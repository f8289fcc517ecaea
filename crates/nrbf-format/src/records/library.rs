//! `BinaryLibrary`: binds a library id to an assembly identity.

use std::io::Write;

use super::{write_i32, write_string};
use crate::error::Result;

/// Assembly reference used by later class records through `library_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryLibrary {
    pub library_id: i32,
    /// Full assembly name, e.g. `Name, Version=.., Culture=.., PublicKeyToken=..`.
    pub library_name: String,
}

impl BinaryLibrary {
    pub fn new(library_id: i32, library_name: impl Into<String>) -> Self {
        Self {
            library_id,
            library_name: library_name.into(),
        }
    }

    pub(crate) fn encode_fields<W: Write>(&self, w: &mut W) -> Result<()> {
        write_i32(w, self.library_id)?;
        write_string(w, &self.library_name)
    }
}
