//! Read-only walk over stream bytes.
//!
//! This is a debugging aid for the records this crate writes, not a
//! deserializer: it checks that each record is complete and reports its type,
//! offset and object id, without building objects.

use std::collections::HashMap;

use crate::enums::{BinaryType, PrimitiveType, RecordType};
use crate::error::{NrbfError, Result};
use crate::records::{ClassTypeInfo, MemberType};
use crate::varint::decode_7bit_int;

/// One record found in the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    /// Offset of the tag byte.
    pub offset: usize,
    pub record_type: RecordType,
    pub object_id: Option<i32>,
    /// 0 for top-level records, +1 per enclosing class record.
    pub depth: usize,
}

/// Every record of a stream, in byte order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub records: Vec<RecordSummary>,
    pub root_id: Option<i32>,
}

impl StreamSummary {
    /// Walk `bytes` up to and including the terminating `MessageEnd`.
    ///
    /// # Errors
    ///
    /// [`NrbfError::InvalidStream`] on truncation, unknown tags, record types
    /// outside the supported subset, or bytes after `MessageEnd`.
    pub fn read(bytes: &[u8]) -> Result<Self> {
        let mut walker = Walker {
            cursor: Cursor { bytes, pos: 0 },
            class_members: HashMap::new(),
            summary: StreamSummary::default(),
        };
        loop {
            if walker.read_record(0)? == RecordType::MessageEnd {
                break;
            }
        }
        let pos = walker.cursor.pos;
        if pos != bytes.len() {
            return Err(NrbfError::invalid_stream(pos, "trailing bytes after MessageEnd"));
        }
        Ok(walker.summary)
    }

    /// Record types in byte order.
    #[must_use]
    pub fn record_types(&self) -> Vec<RecordType> {
        self.records.iter().map(|record| record.record_type).collect()
    }

    /// Top-level record types in byte order.
    #[must_use]
    pub fn top_level_types(&self) -> Vec<RecordType> {
        self.records
            .iter()
            .filter(|record| record.depth == 0)
            .map(|record| record.record_type)
            .collect()
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| NrbfError::invalid_stream(self.pos, "unexpected end of stream"))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_i32(&mut self) -> Result<i32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(i32::from_le_bytes(buf))
    }

    fn read_count(&mut self) -> Result<usize> {
        let offset = self.pos;
        let count = self.read_i32()?;
        let count = usize::try_from(count)
            .map_err(|_| NrbfError::invalid_stream(offset, format!("negative count {count}")))?;
        if count > self.bytes.len() - self.pos {
            return Err(NrbfError::invalid_stream(offset, format!("count {count} exceeds stream")));
        }
        Ok(count)
    }

    fn read_string(&mut self) -> Result<String> {
        let offset = self.pos;
        let (len, used) = decode_7bit_int(&self.bytes[self.pos..])
            .ok_or_else(|| NrbfError::invalid_stream(offset, "bad string length prefix"))?;
        self.pos += used;
        let len = usize::try_from(len)
            .map_err(|_| NrbfError::invalid_stream(offset, "string length overflow"))?;
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec())
            .map_err(|_| NrbfError::invalid_stream(offset, "string is not UTF-8"))
    }
}

struct Walker<'a> {
    cursor: Cursor<'a>,
    /// Member layout by class object id, for `ClassWithId` lookups.
    class_members: HashMap<i32, Vec<MemberType>>,
    summary: StreamSummary,
}

impl Walker<'_> {
    fn read_record(&mut self, depth: usize) -> Result<RecordType> {
        let offset = self.cursor.pos;
        let tag = self.cursor.read_u8()?;
        let record_type = RecordType::try_from(tag)
            .map_err(|tag| {
                NrbfError::invalid_stream(offset, format!("unknown record type {tag}"))
            })?;
        let entry = self.summary.records.len();
        self.summary.records.push(RecordSummary {
            offset,
            record_type,
            object_id: None,
            depth,
        });

        let object_id = match record_type {
            RecordType::SerializedStreamHeader => {
                let root_id = self.cursor.read_i32()?;
                self.cursor.take(12)?;
                self.summary.root_id.get_or_insert(root_id);
                None
            }
            RecordType::BinaryLibrary => {
                self.cursor.read_i32()?;
                self.cursor.read_string()?;
                None
            }
            RecordType::ClassWithMembersAndTypes | RecordType::SystemClassWithMembersAndTypes => {
                let object_id = self.cursor.read_i32()?;
                self.cursor.read_string()?;
                let count = self.cursor.read_count()?;
                for _ in 0..count {
                    self.cursor.read_string()?;
                }
                let members = self.read_member_types(count)?;
                if record_type == RecordType::ClassWithMembersAndTypes {
                    self.cursor.read_i32()?;
                }
                self.read_values(&members, depth)?;
                self.class_members.insert(object_id, members);
                Some(object_id)
            }
            RecordType::ClassWithId => {
                let object_id = self.cursor.read_i32()?;
                let metadata_id = self.cursor.read_i32()?;
                let members = self.class_members.get(&metadata_id).cloned().ok_or_else(|| {
                    NrbfError::invalid_stream(offset, format!("unknown metadata id {metadata_id}"))
                })?;
                self.read_values(&members, depth)?;
                Some(object_id)
            }
            RecordType::BinaryObjectString => {
                let object_id = self.cursor.read_i32()?;
                self.cursor.read_string()?;
                Some(object_id)
            }
            RecordType::MemberReference => {
                self.cursor.read_i32()?;
                None
            }
            RecordType::ObjectNull | RecordType::MessageEnd => None,
            other => {
                return Err(NrbfError::invalid_stream(
                    offset,
                    format!("record type {other} is not supported by the inspector"),
                ));
            }
        };
        self.summary.records[entry].object_id = object_id;
        Ok(record_type)
    }

    fn read_member_types(&mut self, count: usize) -> Result<Vec<MemberType>> {
        let offset = self.cursor.pos;
        let tags = self.cursor.take(count)?.to_vec();
        let mut members = Vec::with_capacity(count);
        for tag in tags {
            let binary_type = BinaryType::try_from(tag)
                .map_err(|tag| {
                    NrbfError::invalid_stream(offset, format!("unknown binary type {tag}"))
                })?;
            let member = match binary_type {
                BinaryType::Primitive => MemberType::Primitive(self.read_primitive_type()?),
                BinaryType::PrimitiveArray => {
                    MemberType::PrimitiveArray(self.read_primitive_type()?)
                }
                BinaryType::SystemClass => MemberType::SystemClass(self.cursor.read_string()?),
                BinaryType::Class => {
                    let type_name = self.cursor.read_string()?;
                    let library_id = self.cursor.read_i32()?;
                    MemberType::Class(ClassTypeInfo::new(type_name, library_id))
                }
                BinaryType::String => MemberType::String,
                BinaryType::Object => MemberType::Object,
                BinaryType::ObjectArray => MemberType::ObjectArray,
                BinaryType::StringArray => MemberType::StringArray,
            };
            members.push(member);
        }
        Ok(members)
    }

    fn read_primitive_type(&mut self) -> Result<PrimitiveType> {
        let offset = self.cursor.pos;
        let tag = self.cursor.read_u8()?;
        PrimitiveType::try_from(tag)
            .map_err(|tag| {
                NrbfError::invalid_stream(offset, format!("unknown primitive type {tag}"))
            })
    }

    fn read_values(&mut self, members: &[MemberType], depth: usize) -> Result<()> {
        for member in members {
            match member {
                MemberType::Primitive(primitive) => self.skip_primitive(*primitive)?,
                _ => {
                    // A library may be introduced right before the value that uses it.
                    while self.read_record(depth + 1)? == RecordType::BinaryLibrary {}
                }
            }
        }
        Ok(())
    }

    fn skip_primitive(&mut self, primitive: PrimitiveType) -> Result<()> {
        match primitive {
            PrimitiveType::Decimal | PrimitiveType::String => {
                self.cursor.read_string()?;
            }
            PrimitiveType::Char => {
                let lead = self.cursor.read_u8()?;
                let extra = match lead {
                    0x00..=0x7f => 0,
                    0xc0..=0xdf => 1,
                    0xe0..=0xef => 2,
                    _ => 3,
                };
                self.cursor.take(extra)?;
            }
            fixed => {
                self.cursor.take(fixed.fixed_width().unwrap_or(0))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{
        BinaryLibrary, BinaryObjectString, ClassInfo, ClassWithId, ClassWithMembersAndTypes,
        MemberTypeInfo, PrimitiveValue, Record, SerializationHeaderRecord,
    };
    use crate::stream::assemble;

    fn class(object_id: i32) -> ClassWithMembersAndTypes {
        ClassWithMembersAndTypes::from_member_values(
            ClassInfo::new(object_id, "A", ["s", "n", "c"]),
            MemberTypeInfo::new(vec![
                MemberType::String,
                MemberType::Primitive(PrimitiveType::Int32),
                MemberType::Primitive(PrimitiveType::Char),
            ]),
            2,
            vec![
                BinaryObjectString::new(object_id + 10, "x").into(),
                PrimitiveValue::Int32(5).into(),
                PrimitiveValue::Char('ß').into(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_walks_nested_records() {
        let bytes = assemble(vec![
            SerializationHeaderRecord::new(1).into(),
            BinaryLibrary::new(2, "Lib").into(),
            class(1).into(),
            Record::MessageEnd,
        ])
        .unwrap();
        let summary = StreamSummary::read(&bytes).unwrap();
        assert_eq!(summary.root_id, Some(1));
        assert_eq!(
            summary.record_types(),
            vec![
                RecordType::SerializedStreamHeader,
                RecordType::BinaryLibrary,
                RecordType::ClassWithMembersAndTypes,
                RecordType::BinaryObjectString,
                RecordType::MessageEnd,
            ]
        );
        assert_eq!(summary.top_level_types().len(), 4);
        let string = &summary.records[3];
        assert_eq!(string.depth, 1);
        assert_eq!(string.object_id, Some(11));
        assert_eq!(summary.records[1].offset, 17);
    }

    #[test]
    fn test_class_with_id_uses_earlier_metadata() {
        let bytes = assemble(vec![
            SerializationHeaderRecord::new(1).into(),
            BinaryLibrary::new(2, "Lib").into(),
            class(1).into(),
            ClassWithId::new(
                5,
                1,
                vec![
                    Record::ObjectNull.into(),
                    PrimitiveValue::Int32(1).into(),
                    PrimitiveValue::Char('a').into(),
                ],
            )
            .into(),
            Record::MessageEnd,
        ])
        .unwrap();
        let summary = StreamSummary::read(&bytes).unwrap();
        let types = summary.top_level_types();
        assert_eq!(types[3], RecordType::ClassWithId);
        assert_eq!(types.last(), Some(&RecordType::MessageEnd));
    }

    #[test]
    fn test_truncated_stream_fails() {
        let bytes = assemble(vec![
            SerializationHeaderRecord::new(1).into(),
            Record::MessageEnd,
        ])
        .unwrap();
        let err = StreamSummary::read(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, NrbfError::InvalidStream { offset: 17, .. }));
    }

    #[test]
    fn test_trailing_bytes_fail() {
        let mut bytes = assemble(vec![
            SerializationHeaderRecord::new(1).into(),
            Record::MessageEnd,
        ])
        .unwrap();
        bytes.push(0);
        assert!(StreamSummary::read(&bytes).is_err());
    }

    #[test]
    fn test_unknown_tag_fails() {
        let err = StreamSummary::read(&[99]).unwrap_err();
        assert!(err.to_string().contains("unknown record type 99"));
    }
}
