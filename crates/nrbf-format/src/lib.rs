//! .NET Remoting Binary Format (MS-NRBF) record model and stream writer.
//!
//! This crate writes the binary object-graph format read by
//! `System.Runtime.Serialization.Formatters.Binary.BinaryFormatter`.
//! It covers the record subset needed to describe class instances with
//! string, primitive and nested-object members.
//!
//! # Features
//!
//! - 7-bit variable-length integers as written by `BinaryWriter`
//! - Typed records with exact byte layouts and construction-time checks
//! - Stream assembly with a `MessageEnd` terminator check
//! - Parent-index ancestor lookups over the object graph
//! - A read-only inspector that lists the records of a written stream
//!
//! # Example
//!
//! ```
//! use nrbf_format::{
//!     BinaryLibrary, BinaryObjectString, ClassInfo, ClassWithMembersAndTypes, MemberType,
//!     MemberTypeInfo, Record, SerializationHeaderRecord, SerializedStream,
//! };
//!
//! let library = BinaryLibrary::new(2, "Example, Version=1.0.0.0");
//! let class = ClassWithMembersAndTypes::from_member_values(
//!     ClassInfo::new(1, "Example.Type", ["Name"]),
//!     MemberTypeInfo::new(vec![MemberType::String]),
//!     library.library_id,
//!     vec![BinaryObjectString::new(3, "value").into()],
//! )
//! .unwrap();
//!
//! let stream = SerializedStream::from_records(vec![
//!     SerializationHeaderRecord::new(1).into(),
//!     library.into(),
//!     class.into(),
//!     Record::MessageEnd,
//! ])
//! .unwrap();
//! let bytes = stream.to_bytes().unwrap();
//! assert_eq!(bytes[0], 0x00);
//! assert_eq!(bytes.last(), Some(&0x0b));
//! ```

pub mod ancestry;
pub mod enums;
mod error;
pub mod inspect;
pub mod records;
mod stream;
mod varint;

// Re-export error types
pub use error::{NrbfError, Result};

// Re-export core types
pub use ancestry::{Lookup, ParentIndex};
pub use enums::{BinaryType, PrimitiveType, RecordType};
pub use inspect::{RecordSummary, StreamSummary};
pub use records::{
    BinaryLibrary, BinaryObjectString, ClassInfo, ClassTypeInfo, ClassWithId,
    ClassWithMembersAndTypes, ClassWithMembersAndTypesBuilder, MemberReference, MemberType,
    MemberTypeInfo, MemberValue, PrimitiveValue, Record, SerializationHeaderRecord,
    SystemClassWithMembersAndTypes,
};
pub use stream::{SerializedStream, assemble};
pub use varint::{decode_7bit_int, encode_7bit_int, write_7bit_int};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
