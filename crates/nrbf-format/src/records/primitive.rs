//! Untyped primitive member values (`MemberPrimitiveUnTyped`).

use std::io::Write;

use super::write_string;
use crate::enums::PrimitiveType;
use crate::error::Result;

/// A primitive written without any tag, as the value of a `Primitive` member.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    Boolean(bool),
    Byte(u8),
    /// UTF-8 encoded code point.
    Char(char),
    /// Decimal in its invariant-culture string form.
    Decimal(String),
    Double(f64),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    SByte(i8),
    Single(f32),
    /// Ticks.
    TimeSpan(i64),
    /// Ticks in the low 62 bits, `DateTimeKind` in the top two.
    DateTime(u64),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    /// Declared `Null`; writes no bytes.
    Null,
    String(String),
}

impl PrimitiveValue {
    /// Primitive tag this value satisfies.
    #[must_use]
    pub fn primitive_type(&self) -> PrimitiveType {
        match self {
            Self::Boolean(_) => PrimitiveType::Boolean,
            Self::Byte(_) => PrimitiveType::Byte,
            Self::Char(_) => PrimitiveType::Char,
            Self::Decimal(_) => PrimitiveType::Decimal,
            Self::Double(_) => PrimitiveType::Double,
            Self::Int16(_) => PrimitiveType::Int16,
            Self::Int32(_) => PrimitiveType::Int32,
            Self::Int64(_) => PrimitiveType::Int64,
            Self::SByte(_) => PrimitiveType::SByte,
            Self::Single(_) => PrimitiveType::Single,
            Self::TimeSpan(_) => PrimitiveType::TimeSpan,
            Self::DateTime(_) => PrimitiveType::DateTime,
            Self::UInt16(_) => PrimitiveType::UInt16,
            Self::UInt32(_) => PrimitiveType::UInt32,
            Self::UInt64(_) => PrimitiveType::UInt64,
            Self::Null => PrimitiveType::Null,
            Self::String(_) => PrimitiveType::String,
        }
    }

    pub(crate) fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        match self {
            Self::Boolean(v) => w.write_all(&[u8::from(*v)])?,
            Self::Byte(v) => w.write_all(&[*v])?,
            Self::Char(v) => {
                let mut buf = [0u8; 4];
                w.write_all(v.encode_utf8(&mut buf).as_bytes())?;
            }
            Self::Decimal(v) | Self::String(v) => write_string(w, v)?,
            Self::Double(v) => w.write_all(&v.to_le_bytes())?,
            Self::Int16(v) => w.write_all(&v.to_le_bytes())?,
            Self::Int32(v) => w.write_all(&v.to_le_bytes())?,
            Self::Int64(v) | Self::TimeSpan(v) => w.write_all(&v.to_le_bytes())?,
            Self::SByte(v) => w.write_all(&v.to_le_bytes())?,
            Self::Single(v) => w.write_all(&v.to_le_bytes())?,
            Self::DateTime(v) | Self::UInt64(v) => w.write_all(&v.to_le_bytes())?,
            Self::UInt16(v) => w.write_all(&v.to_le_bytes())?,
            Self::UInt32(v) => w.write_all(&v.to_le_bytes())?,
            Self::Null => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ClassInfo, ClassWithMembersAndTypes, MemberType, MemberTypeInfo, Record};

    fn encoded(value: &PrimitiveValue) -> Vec<u8> {
        let mut out = Vec::new();
        value.encode(&mut out).unwrap();
        out
    }

    #[test]
    fn test_fixed_widths_match_type() {
        let values = [
            PrimitiveValue::Boolean(true),
            PrimitiveValue::Byte(7),
            PrimitiveValue::Double(1.5),
            PrimitiveValue::Int16(-2),
            PrimitiveValue::Int32(-1),
            PrimitiveValue::Int64(9),
            PrimitiveValue::SByte(-8),
            PrimitiveValue::Single(0.5),
            PrimitiveValue::TimeSpan(10_000),
            PrimitiveValue::DateTime(1),
            PrimitiveValue::UInt16(2),
            PrimitiveValue::UInt32(3),
            PrimitiveValue::UInt64(4),
            PrimitiveValue::Null,
        ];
        for value in &values {
            let width = value.primitive_type().fixed_width().unwrap();
            assert_eq!(encoded(value).len(), width, "{value:?}");
        }
    }

    #[test]
    fn test_null_member_builds_and_writes_nothing() {
        let class = ClassWithMembersAndTypes::from_member_values(
            ClassInfo::new(1, "A", ["n"]),
            MemberTypeInfo::new(vec![MemberType::Primitive(PrimitiveType::Null)]),
            2,
            vec![PrimitiveValue::Null.into()],
        )
        .unwrap();
        let bytes = Record::from(class).to_bytes().unwrap();
        // BinaryType::Primitive, PrimitiveType::Null, library id, no value bytes
        assert_eq!(&bytes[bytes.len() - 6..], &[0, 17, 2, 0, 0, 0]);
    }

    #[test]
    fn test_variable_width_values() {
        assert_eq!(encoded(&PrimitiveValue::Int32(-1)), vec![0xff; 4]);
        assert_eq!(encoded(&PrimitiveValue::Char('é')), "é".as_bytes());
        assert_eq!(
            encoded(&PrimitiveValue::String("hi".to_string())),
            b"\x02hi"
        );
        assert_eq!(
            encoded(&PrimitiveValue::Decimal("1.5".to_string())),
            b"\x031.5"
        );
    }
}
