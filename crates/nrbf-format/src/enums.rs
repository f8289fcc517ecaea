//! Wire enumerations of the binary format.
//!
//! Every value here is fixed by the MS-NRBF protocol document and written as a
//! single byte.

use std::fmt;

/// Leading tag byte of every record (MS-NRBF 2.1.2.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecordType {
    SerializedStreamHeader = 0,
    ClassWithId = 1,
    SystemClassWithMembers = 2,
    ClassWithMembers = 3,
    SystemClassWithMembersAndTypes = 4,
    ClassWithMembersAndTypes = 5,
    BinaryObjectString = 6,
    BinaryArray = 7,
    MemberPrimitiveTyped = 8,
    MemberReference = 9,
    ObjectNull = 10,
    MessageEnd = 11,
    BinaryLibrary = 12,
    ObjectNullMultiple256 = 13,
    ObjectNullMultiple = 14,
    ArraySinglePrimitive = 15,
    ArraySingleObject = 16,
    ArraySingleString = 17,
    MethodCall = 21,
    MethodReturn = 22,
}

impl RecordType {
    /// Raw tag byte.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Record type name as used in MS-NRBF.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SerializedStreamHeader => "SerializedStreamHeader",
            Self::ClassWithId => "ClassWithId",
            Self::SystemClassWithMembers => "SystemClassWithMembers",
            Self::ClassWithMembers => "ClassWithMembers",
            Self::SystemClassWithMembersAndTypes => "SystemClassWithMembersAndTypes",
            Self::ClassWithMembersAndTypes => "ClassWithMembersAndTypes",
            Self::BinaryObjectString => "BinaryObjectString",
            Self::BinaryArray => "BinaryArray",
            Self::MemberPrimitiveTyped => "MemberPrimitiveTyped",
            Self::MemberReference => "MemberReference",
            Self::ObjectNull => "ObjectNull",
            Self::MessageEnd => "MessageEnd",
            Self::BinaryLibrary => "BinaryLibrary",
            Self::ObjectNullMultiple256 => "ObjectNullMultiple256",
            Self::ObjectNullMultiple => "ObjectNullMultiple",
            Self::ArraySinglePrimitive => "ArraySinglePrimitive",
            Self::ArraySingleObject => "ArraySingleObject",
            Self::ArraySingleString => "ArraySingleString",
            Self::MethodCall => "MethodCall",
            Self::MethodReturn => "MethodReturn",
        }
    }
}

impl TryFrom<u8> for RecordType {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        let record_type = match value {
            0 => Self::SerializedStreamHeader,
            1 => Self::ClassWithId,
            2 => Self::SystemClassWithMembers,
            3 => Self::ClassWithMembers,
            4 => Self::SystemClassWithMembersAndTypes,
            5 => Self::ClassWithMembersAndTypes,
            6 => Self::BinaryObjectString,
            7 => Self::BinaryArray,
            8 => Self::MemberPrimitiveTyped,
            9 => Self::MemberReference,
            10 => Self::ObjectNull,
            11 => Self::MessageEnd,
            12 => Self::BinaryLibrary,
            13 => Self::ObjectNullMultiple256,
            14 => Self::ObjectNullMultiple,
            15 => Self::ArraySinglePrimitive,
            16 => Self::ArraySingleObject,
            17 => Self::ArraySingleString,
            21 => Self::MethodCall,
            22 => Self::MethodReturn,
            other => return Err(other),
        };
        Ok(record_type)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Member type tag inside a `MemberTypeInfo` (MS-NRBF 2.1.2.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BinaryType {
    Primitive = 0,
    String = 1,
    Object = 2,
    SystemClass = 3,
    Class = 4,
    ObjectArray = 5,
    StringArray = 6,
    PrimitiveArray = 7,
}

impl BinaryType {
    /// Raw tag byte.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for BinaryType {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        let binary_type = match value {
            0 => Self::Primitive,
            1 => Self::String,
            2 => Self::Object,
            3 => Self::SystemClass,
            4 => Self::Class,
            5 => Self::ObjectArray,
            6 => Self::StringArray,
            7 => Self::PrimitiveArray,
            other => return Err(other),
        };
        Ok(binary_type)
    }
}

/// Primitive type tag (MS-NRBF 2.1.2.3). Value 4 is unused by the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PrimitiveType {
    Boolean = 1,
    Byte = 2,
    Char = 3,
    Decimal = 5,
    Double = 6,
    Int16 = 7,
    Int32 = 8,
    Int64 = 9,
    SByte = 10,
    Single = 11,
    TimeSpan = 12,
    DateTime = 13,
    UInt16 = 14,
    UInt32 = 15,
    UInt64 = 16,
    Null = 17,
    String = 18,
}

impl PrimitiveType {
    /// Raw tag byte.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Encoded width for fixed-size primitives.
    ///
    /// `None` for `Char`, `Decimal` and `String`, whose width depends on the value.
    #[must_use]
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Boolean | Self::Byte | Self::SByte => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Single => Some(4),
            Self::Double
            | Self::Int64
            | Self::UInt64
            | Self::TimeSpan
            | Self::DateTime => Some(8),
            Self::Null => Some(0),
            Self::Char | Self::Decimal | Self::String => None,
        }
    }
}

impl TryFrom<u8> for PrimitiveType {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        let primitive_type = match value {
            1 => Self::Boolean,
            2 => Self::Byte,
            3 => Self::Char,
            5 => Self::Decimal,
            6 => Self::Double,
            7 => Self::Int16,
            8 => Self::Int32,
            9 => Self::Int64,
            10 => Self::SByte,
            11 => Self::Single,
            12 => Self::TimeSpan,
            13 => Self::DateTime,
            14 => Self::UInt16,
            15 => Self::UInt32,
            16 => Self::UInt64,
            17 => Self::Null,
            18 => Self::String,
            other => return Err(other),
        };
        Ok(primitive_type)
    }
}
