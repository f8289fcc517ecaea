//! Record definitions and their byte layouts.
//!
//! A serialized stream is a flat sequence of records. Each record starts
//! with its [`RecordType`] tag byte and continues with its fields in declared
//! order:
//!
//! | Field kind              | Encoding                                   |
//! |-------------------------|--------------------------------------------|
//! | `INT32`                 | 4 bytes, little-endian, two's complement   |
//! | `LengthPrefixedString`  | 7-bit encoded byte length, then UTF-8      |
//! | enum tag                | 1 byte                                     |
//! | nested record           | the nested record's full encoding          |
//!
//! Records are plain values. They know nothing about the stream that holds
//! them; id bookkeeping belongs to whoever builds the sequence.

mod class;
mod header;
mod library;
mod primitive;
mod reference;
mod string;

use std::io::Write;

pub use class::{
    ClassInfo, ClassTypeInfo, ClassWithId, ClassWithMembersAndTypes,
    ClassWithMembersAndTypesBuilder, MemberType, MemberTypeInfo, SystemClassWithMembersAndTypes,
};
pub use header::SerializationHeaderRecord;
pub use library::BinaryLibrary;
pub use primitive::PrimitiveValue;
pub use reference::MemberReference;
pub use string::BinaryObjectString;

use crate::enums::RecordType;
use crate::error::{NrbfError, Result};
use crate::varint::write_7bit_int;

/// Any record that can appear in a serialized stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    SerializationHeader(SerializationHeaderRecord),
    BinaryLibrary(BinaryLibrary),
    ClassWithId(ClassWithId),
    SystemClassWithMembersAndTypes(SystemClassWithMembersAndTypes),
    ClassWithMembersAndTypes(ClassWithMembersAndTypes),
    BinaryObjectString(BinaryObjectString),
    MemberReference(MemberReference),
    ObjectNull,
    MessageEnd,
}

impl Record {
    /// Tag byte written ahead of this record.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::SerializationHeader(_) => RecordType::SerializedStreamHeader,
            Self::BinaryLibrary(_) => RecordType::BinaryLibrary,
            Self::ClassWithId(_) => RecordType::ClassWithId,
            Self::SystemClassWithMembersAndTypes(_) => RecordType::SystemClassWithMembersAndTypes,
            Self::ClassWithMembersAndTypes(_) => RecordType::ClassWithMembersAndTypes,
            Self::BinaryObjectString(_) => RecordType::BinaryObjectString,
            Self::MemberReference(_) => RecordType::MemberReference,
            Self::ObjectNull => RecordType::ObjectNull,
            Self::MessageEnd => RecordType::MessageEnd,
        }
    }

    /// Object id introduced by this record, if it introduces one.
    #[must_use]
    pub fn object_id(&self) -> Option<i32> {
        match self {
            Self::ClassWithId(record) => Some(record.object_id),
            Self::SystemClassWithMembersAndTypes(record) => Some(record.class_info.object_id),
            Self::ClassWithMembersAndTypes(record) => Some(record.class_info.object_id),
            Self::BinaryObjectString(record) => Some(record.object_id),
            Self::SerializationHeader(_)
            | Self::BinaryLibrary(_)
            | Self::MemberReference(_)
            | Self::ObjectNull
            | Self::MessageEnd => None,
        }
    }

    /// Member values carried inline after the record's own fields.
    #[must_use]
    pub fn member_values(&self) -> &[MemberValue] {
        match self {
            Self::ClassWithId(record) => &record.member_values,
            Self::SystemClassWithMembersAndTypes(record) => &record.member_values,
            Self::ClassWithMembersAndTypes(record) => &record.member_values,
            _ => &[],
        }
    }

    /// Write the tag byte and all fields.
    pub fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&[self.record_type().tag()])?;
        match self {
            Self::SerializationHeader(record) => record.encode_fields(w),
            Self::BinaryLibrary(record) => record.encode_fields(w),
            Self::ClassWithId(record) => record.encode_fields(w),
            Self::SystemClassWithMembersAndTypes(record) => record.encode_fields(w),
            Self::ClassWithMembersAndTypes(record) => record.encode_fields(w),
            Self::BinaryObjectString(record) => record.encode_fields(w),
            Self::MemberReference(record) => record.encode_fields(w),
            Self::ObjectNull | Self::MessageEnd => Ok(()),
        }
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.encode(&mut out)?;
        Ok(out)
    }
}

macro_rules! impl_from_record {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Record {
                fn from(record: $ty) -> Self {
                    Self::$variant(record)
                }
            }

            impl From<$ty> for MemberValue {
                fn from(record: $ty) -> Self {
                    Self::Record(Record::$variant(record))
                }
            }
        )*
    };
}

impl_from_record!(
    SerializationHeader(SerializationHeaderRecord),
    BinaryLibrary(BinaryLibrary),
    ClassWithId(ClassWithId),
    SystemClassWithMembersAndTypes(SystemClassWithMembersAndTypes),
    ClassWithMembersAndTypes(ClassWithMembersAndTypes),
    BinaryObjectString(BinaryObjectString),
    MemberReference(MemberReference),
);

/// Value of one class member, in member order.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberValue {
    /// Untyped primitive, for members declared as [`MemberType::Primitive`].
    Primitive(PrimitiveValue),
    /// Any other member: a full record written inline.
    Record(Record),
}

impl MemberValue {
    pub(crate) fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        match self {
            Self::Primitive(value) => value.encode(w),
            Self::Record(record) => record.encode(w),
        }
    }
}

impl From<PrimitiveValue> for MemberValue {
    fn from(value: PrimitiveValue) -> Self {
        Self::Primitive(value)
    }
}

impl From<Record> for MemberValue {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

/// Write a little-endian `INT32`.
pub(crate) fn write_i32<W: Write>(w: &mut W, value: i32) -> Result<()> {
    w.write_all(&value.to_le_bytes())?;
    Ok(())
}

/// Write a count as `INT32`, rejecting counts the format cannot express.
pub(crate) fn write_count<W: Write>(w: &mut W, what: &'static str, count: usize) -> Result<()> {
    let count = i32::try_from(count).map_err(|_| NrbfError::LengthOverflow { what, len: count })?;
    write_i32(w, count)
}

/// Write a `LengthPrefixedString`.
pub(crate) fn write_string<W: Write>(w: &mut W, value: &str) -> Result<()> {
    let len = value.len();
    if i32::try_from(len).is_err() {
        return Err(NrbfError::LengthOverflow { what: "string", len });
    }
    write_7bit_int(w, len as u64)?;
    w.write_all(value.as_bytes())?;
    Ok(())
}
