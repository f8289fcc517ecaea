//! Class records: `ClassInfo`, `MemberTypeInfo` and the records built from them.
//!
//! A class record describes an object's type and member layout, then carries
//! the member values inline, in the same order as the member names:
//!
//! ```text
//! ClassWithMembersAndTypes {
//!     record_type:        u8 = 5,
//!     class_info:         { object_id: i32, name: LengthPrefixedString,
//!                           member_count: i32, member_names: [LengthPrefixedString] },
//!     member_type_info:   { binary_types: [u8; member_count],
//!                           additional_infos: [..] },
//!     library_id:         i32,
//!     member_values:      [MemberPrimitiveUnTyped | Record; member_count],
//! }
//! ```
//!
//! Names, types and values are parallel lists. The constructors here refuse
//! lists of different lengths and values that disagree with their declared
//! type; the target deserializer would otherwise read garbage.

use std::io::Write;

use super::{MemberValue, Record, write_count, write_i32, write_string};
use crate::enums::{BinaryType, PrimitiveType};
use crate::error::{NrbfError, Result};

/// Object id, type name and ordered member names of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    pub object_id: i32,
    pub name: String,
    pub member_names: Vec<String>,
}

impl ClassInfo {
    pub fn new<I, S>(object_id: i32, name: impl Into<String>, member_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            object_id,
            name: name.into(),
            member_names: member_names.into_iter().map(Into::into).collect(),
        }
    }

    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        write_i32(w, self.object_id)?;
        write_string(w, &self.name)?;
        write_count(w, "member list", self.member_names.len())?;
        for name in &self.member_names {
            write_string(w, name)?;
        }
        Ok(())
    }
}

/// Type name plus the library that defines it, for `Class` members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTypeInfo {
    pub type_name: String,
    pub library_id: i32,
}

impl ClassTypeInfo {
    pub fn new(type_name: impl Into<String>, library_id: i32) -> Self {
        Self {
            type_name: type_name.into(),
            library_id,
        }
    }
}

/// Declared type of one member: the `BinaryType` tag plus its additional info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberType {
    Primitive(PrimitiveType),
    String,
    Object,
    /// Class from mscorlib, identified by name only.
    SystemClass(String),
    Class(ClassTypeInfo),
    ObjectArray,
    StringArray,
    PrimitiveArray(PrimitiveType),
}

impl MemberType {
    #[must_use]
    pub fn binary_type(&self) -> BinaryType {
        match self {
            Self::Primitive(_) => BinaryType::Primitive,
            Self::String => BinaryType::String,
            Self::Object => BinaryType::Object,
            Self::SystemClass(_) => BinaryType::SystemClass,
            Self::Class(_) => BinaryType::Class,
            Self::ObjectArray => BinaryType::ObjectArray,
            Self::StringArray => BinaryType::StringArray,
            Self::PrimitiveArray(_) => BinaryType::PrimitiveArray,
        }
    }

    fn encode_additional_info<W: Write>(&self, w: &mut W) -> Result<()> {
        match self {
            Self::Primitive(primitive) | Self::PrimitiveArray(primitive) => {
                w.write_all(&[primitive.tag()])?;
            }
            Self::SystemClass(name) => write_string(w, name)?,
            Self::Class(info) => {
                write_string(w, &info.type_name)?;
                write_i32(w, info.library_id)?;
            }
            Self::String | Self::Object | Self::ObjectArray | Self::StringArray => {}
        }
        Ok(())
    }
}

/// Ordered member types, parallel to [`ClassInfo::member_names`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberTypeInfo {
    pub member_types: Vec<MemberType>,
}

impl MemberTypeInfo {
    #[must_use]
    pub fn new(member_types: Vec<MemberType>) -> Self {
        Self { member_types }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.member_types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.member_types.is_empty()
    }

    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        let tags: Vec<u8> = self
            .member_types
            .iter()
            .map(|member| member.binary_type().tag())
            .collect();
        w.write_all(&tags)?;
        for member in &self.member_types {
            member.encode_additional_info(w)?;
        }
        Ok(())
    }
}

/// Check that names, types and values line up one to one.
fn validate_members(
    record: &'static str,
    class_info: &ClassInfo,
    member_type_info: &MemberTypeInfo,
    member_values: &[MemberValue],
) -> Result<()> {
    let names = class_info.member_names.len();
    let types = member_type_info.len();
    let values = member_values.len();
    if names != types || types != values {
        return Err(NrbfError::member_count_mismatch(record, names, types, values));
    }

    let members = class_info
        .member_names
        .iter()
        .zip(&member_type_info.member_types)
        .zip(member_values);
    for ((name, member_type), value) in members {
        match (member_type, value) {
            (MemberType::Primitive(expected), MemberValue::Primitive(actual))
                if *expected != actual.primitive_type() =>
            {
                return Err(NrbfError::malformed(
                    record,
                    format!(
                        "member `{name}` declared {expected:?} but holds {:?}",
                        actual.primitive_type()
                    ),
                ));
            }
            (MemberType::Primitive(_), MemberValue::Primitive(_)) => {}
            (MemberType::Primitive(expected), MemberValue::Record(_)) => {
                return Err(NrbfError::malformed(
                    record,
                    format!("member `{name}` declared {expected:?} but holds a record"),
                ));
            }
            (other, MemberValue::Primitive(_)) => {
                return Err(NrbfError::malformed(
                    record,
                    format!(
                        "member `{name}` declared {:?} but holds a primitive",
                        other.binary_type()
                    ),
                ));
            }
            (other, MemberValue::Record(nested)) => {
                if !record_fits_member(other, nested) {
                    return Err(NrbfError::malformed(
                        record,
                        format!(
                            "member `{name}` declared {:?} but holds {}",
                            other.binary_type(),
                            nested.record_type()
                        ),
                    ));
                }
            }
        }
    }
    Ok(())
}

/// Whether `nested` may stand as the value of a non-primitive member.
///
/// Stream framing records never appear inside an object; a `String` member
/// takes a string, a reference to one, or null.
fn record_fits_member(member_type: &MemberType, nested: &Record) -> bool {
    match nested {
        Record::SerializationHeader(_) | Record::BinaryLibrary(_) | Record::MessageEnd => false,
        Record::BinaryObjectString(_) | Record::MemberReference(_) | Record::ObjectNull => true,
        Record::ClassWithId(_)
        | Record::SystemClassWithMembersAndTypes(_)
        | Record::ClassWithMembersAndTypes(_) => !matches!(member_type, MemberType::String),
    }
}

fn encode_values<W: Write>(w: &mut W, member_values: &[MemberValue]) -> Result<()> {
    for value in member_values {
        value.encode(w)?;
    }
    Ok(())
}

/// Class record with full type information and a library reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassWithMembersAndTypes {
    pub(crate) class_info: ClassInfo,
    pub(crate) member_type_info: MemberTypeInfo,
    pub(crate) library_id: i32,
    pub(crate) member_values: Vec<MemberValue>,
}

impl ClassWithMembersAndTypes {
    const RECORD: &'static str = "ClassWithMembersAndTypes";

    /// Bind class metadata to its member values.
    ///
    /// # Errors
    ///
    /// Fails when the member name, type and value lists differ in length or a
    /// value does not match its declared type.
    pub fn from_member_values(
        class_info: ClassInfo,
        member_type_info: MemberTypeInfo,
        library_id: i32,
        member_values: Vec<MemberValue>,
    ) -> Result<Self> {
        validate_members(Self::RECORD, &class_info, &member_type_info, &member_values)?;
        Ok(Self {
            class_info,
            member_type_info,
            library_id,
            member_values,
        })
    }

    /// Start a builder; every field except the member values is required.
    #[must_use]
    pub fn builder() -> ClassWithMembersAndTypesBuilder {
        ClassWithMembersAndTypesBuilder::default()
    }

    #[must_use]
    pub fn class_info(&self) -> &ClassInfo {
        &self.class_info
    }

    #[must_use]
    pub fn member_type_info(&self) -> &MemberTypeInfo {
        &self.member_type_info
    }

    #[must_use]
    pub fn library_id(&self) -> i32 {
        self.library_id
    }

    #[must_use]
    pub fn member_values(&self) -> &[MemberValue] {
        &self.member_values
    }

    pub(crate) fn encode_fields<W: Write>(&self, w: &mut W) -> Result<()> {
        self.class_info.encode(w)?;
        self.member_type_info.encode(w)?;
        write_i32(w, self.library_id)?;
        encode_values(w, &self.member_values)
    }
}

/// Builder for [`ClassWithMembersAndTypes`] from individually named fields.
#[derive(Debug, Default)]
pub struct ClassWithMembersAndTypesBuilder {
    class_info: Option<ClassInfo>,
    member_type_info: Option<MemberTypeInfo>,
    library_id: Option<i32>,
    member_values: Vec<MemberValue>,
}

impl ClassWithMembersAndTypesBuilder {
    #[must_use]
    pub fn class_info(mut self, class_info: ClassInfo) -> Self {
        self.class_info = Some(class_info);
        self
    }

    #[must_use]
    pub fn member_type_info(mut self, member_type_info: MemberTypeInfo) -> Self {
        self.member_type_info = Some(member_type_info);
        self
    }

    #[must_use]
    pub fn library_id(mut self, library_id: i32) -> Self {
        self.library_id = Some(library_id);
        self
    }

    #[must_use]
    pub fn member_value(mut self, value: impl Into<MemberValue>) -> Self {
        self.member_values.push(value.into());
        self
    }

    /// Finish the record.
    ///
    /// # Errors
    ///
    /// Fails when a required field was never set, or as
    /// [`ClassWithMembersAndTypes::from_member_values`] does.
    pub fn build(self) -> Result<ClassWithMembersAndTypes> {
        let record = ClassWithMembersAndTypes::RECORD;
        let class_info = self
            .class_info
            .ok_or_else(|| NrbfError::missing_field(record, "class_info"))?;
        let member_type_info = self
            .member_type_info
            .ok_or_else(|| NrbfError::missing_field(record, "member_type_info"))?;
        let library_id = self
            .library_id
            .ok_or_else(|| NrbfError::missing_field(record, "library_id"))?;
        ClassWithMembersAndTypes::from_member_values(
            class_info,
            member_type_info,
            library_id,
            self.member_values,
        )
    }
}

/// Class record for a type from mscorlib; no library id is written.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemClassWithMembersAndTypes {
    pub(crate) class_info: ClassInfo,
    pub(crate) member_type_info: MemberTypeInfo,
    pub(crate) member_values: Vec<MemberValue>,
}

impl SystemClassWithMembersAndTypes {
    const RECORD: &'static str = "SystemClassWithMembersAndTypes";

    /// # Errors
    ///
    /// Same rules as [`ClassWithMembersAndTypes::from_member_values`].
    pub fn from_member_values(
        class_info: ClassInfo,
        member_type_info: MemberTypeInfo,
        member_values: Vec<MemberValue>,
    ) -> Result<Self> {
        validate_members(Self::RECORD, &class_info, &member_type_info, &member_values)?;
        Ok(Self {
            class_info,
            member_type_info,
            member_values,
        })
    }

    #[must_use]
    pub fn class_info(&self) -> &ClassInfo {
        &self.class_info
    }

    #[must_use]
    pub fn member_type_info(&self) -> &MemberTypeInfo {
        &self.member_type_info
    }

    #[must_use]
    pub fn member_values(&self) -> &[MemberValue] {
        &self.member_values
    }

    pub(crate) fn encode_fields<W: Write>(&self, w: &mut W) -> Result<()> {
        self.class_info.encode(w)?;
        self.member_type_info.encode(w)?;
        encode_values(w, &self.member_values)
    }
}

/// New object reusing the metadata of an earlier class record.
///
/// The member layout lives with the record named by `metadata_id`, so the
/// values cannot be checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassWithId {
    pub object_id: i32,
    pub metadata_id: i32,
    pub member_values: Vec<MemberValue>,
}

impl ClassWithId {
    #[must_use]
    pub fn new(object_id: i32, metadata_id: i32, member_values: Vec<MemberValue>) -> Self {
        Self {
            object_id,
            metadata_id,
            member_values,
        }
    }

    pub(crate) fn encode_fields<W: Write>(&self, w: &mut W) -> Result<()> {
        write_i32(w, self.object_id)?;
        write_i32(w, self.metadata_id)?;
        encode_values(w, &self.member_values)
    }
}
