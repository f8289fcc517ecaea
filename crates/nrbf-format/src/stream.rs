//! Stream assembly.
//!
//! A [`SerializedStream`] is an ordered list of records ending in
//! `MessageEnd`. Encoding it is the concatenation of each record's encoding.
//! Id consistency is left to the code that chose the records.

use std::io::Write;

use tracing::trace;

use crate::ancestry::ParentIndex;
use crate::error::{NrbfError, Result};
use crate::records::{MemberValue, Record};

/// Ordered records of one object graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedStream {
    records: Vec<Record>,
}

impl SerializedStream {
    /// Wrap a record sequence.
    ///
    /// # Errors
    ///
    /// Fails when `records` is empty or does not end with `MessageEnd`.
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        match records.last() {
            None => Err(NrbfError::malformed_stream("stream has no records")),
            Some(Record::MessageEnd) => Ok(Self { records }),
            Some(last) => Err(NrbfError::malformed_stream(format!(
                "stream ends with {} instead of MessageEnd",
                last.record_type()
            ))),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Root object id named by a leading header record.
    #[must_use]
    pub fn root_id(&self) -> Option<i32> {
        match self.records.first() {
            Some(Record::SerializationHeader(header)) => Some(header.root_id),
            _ => None,
        }
    }

    /// Write every record in order.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        for record in &self.records {
            record.encode(w)?;
        }
        Ok(())
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        trace!(
            records = self.records.len(),
            bytes = out.len(),
            "assembled stream"
        );
        Ok(out)
    }

    /// Map every object to the class record that carries it as a member.
    #[must_use]
    pub fn object_graph(&self) -> ParentIndex {
        let mut index = ParentIndex::new();
        for record in &self.records {
            if let Some(object_id) = record.object_id() {
                index.insert_root(object_id, record.record_type());
                index_members(&mut index, object_id, record.member_values());
            }
        }
        index
    }
}

fn index_members(index: &mut ParentIndex, parent_id: i32, values: &[MemberValue]) {
    for value in values {
        let MemberValue::Record(record) = value else {
            continue;
        };
        match record.object_id() {
            Some(object_id) => {
                index.insert_child(object_id, record.record_type(), parent_id);
                index_members(index, object_id, record.member_values());
            }
            None => index_members(index, parent_id, record.member_values()),
        }
    }
}

/// Assemble `records` into stream bytes.
///
/// # Errors
///
/// As [`SerializedStream::from_records`], plus any encoding error.
pub fn assemble(records: Vec<Record>) -> Result<Vec<u8>> {
    SerializedStream::from_records(records)?.to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ancestry::Lookup;
    use crate::enums::RecordType;
    use crate::records::{
        BinaryLibrary, BinaryObjectString, ClassInfo, ClassWithMembersAndTypes, MemberType,
        MemberTypeInfo, SerializationHeaderRecord,
    };

    fn sample_records() -> Vec<Record> {
        vec![
            SerializationHeaderRecord::new(1).into(),
            BinaryLibrary::new(2, "Lib").into(),
            ClassWithMembersAndTypes::from_member_values(
                ClassInfo::new(1, "A", ["B"]),
                MemberTypeInfo::new(vec![MemberType::String]),
                2,
                vec![BinaryObjectString::new(3, "x").into()],
            )
            .unwrap()
            .into(),
            Record::MessageEnd,
        ]
    }

    #[test]
    fn test_rejects_empty_stream() {
        let err = SerializedStream::from_records(vec![]).unwrap_err();
        assert!(matches!(err, NrbfError::MalformedStream { .. }));
    }

    #[test]
    fn test_rejects_missing_terminator() {
        let err =
            SerializedStream::from_records(vec![SerializationHeaderRecord::new(1).into()])
                .unwrap_err();
        assert!(err.to_string().contains("SerializedStreamHeader instead of MessageEnd"));
    }

    #[test]
    fn test_bytes_are_concatenation() {
        let records = sample_records();
        let mut expected = Vec::new();
        for record in &records {
            expected.extend(record.to_bytes().unwrap());
        }
        assert_eq!(assemble(records).unwrap(), expected);
    }

    #[test]
    fn test_root_id() {
        let stream = SerializedStream::from_records(sample_records()).unwrap();
        assert_eq!(stream.root_id(), Some(1));
        assert_eq!(stream.records().len(), 4);
    }

    #[test]
    fn test_object_graph_links_members() {
        let stream = SerializedStream::from_records(sample_records()).unwrap();
        let graph = stream.object_graph();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.parent(3), Some(1));
        assert_eq!(graph.parent(1), None);
        let owner = graph
            .find_ancestor(3, RecordType::ClassWithMembersAndTypes, Lookup::Required)
            .unwrap();
        assert_eq!(owner, Some(1));
    }
}
