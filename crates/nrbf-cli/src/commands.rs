use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use nrbf_format::StreamSummary;
use nrbf_gadget::{GenerateOptions, Generator};
use tracing::{debug, info};

use crate::cli::EncodingArg;

/// Generator settings taken from the command line.
#[derive(Debug, Clone)]
pub struct GenerateRequest<'a> {
    pub command: &'a str,
    pub chain: &'a str,
    pub formatter: Option<&'a str>,
    pub encoding: EncodingArg,
}

impl GenerateRequest<'_> {
    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            gadget_chain: self.chain.to_string(),
            formatter: self.formatter.map(str::to_string),
        }
    }
}

/// Generate the payload and write it to `output` or `out`.
pub fn run_generate(
    generator: &Generator,
    request: &GenerateRequest<'_>,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let payload = generator
        .generate(request.command, &request.options())
        .with_context(|| format!("generate payload with gadget chain {}", request.chain))?;
    let bytes = encode_payload(payload, request.encoding);

    match output {
        Some(path) => {
            fs::write(path, &bytes).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), bytes = bytes.len(), "wrote payload");
        }
        None => {
            out.write_all(&bytes).context("write payload to stdout")?;
            out.flush().context("flush stdout")?;
            debug!(bytes = bytes.len(), "wrote payload to stdout");
        }
    }
    Ok(())
}

/// Print a table of the records in the generated stream.
///
/// The formatter envelope is skipped; the table lists the stream the chain
/// builds.
pub fn run_inspect(
    generator: &Generator,
    request: &GenerateRequest<'_>,
    out: &mut impl Write,
) -> Result<()> {
    let stream = generator
        .generate_gadget_chain(request.command, request.chain)
        .with_context(|| format!("build gadget chain {}", request.chain))?;
    let bytes = stream.to_bytes().context("serialize gadget chain")?;
    let summary = StreamSummary::read(&bytes).context("walk generated stream")?;

    let mut table = Table::new();
    table.set_header(vec!["Offset", "Record", "Object ID", "Depth"]);
    apply_table_style(&mut table);
    for record in &summary.records {
        let object_id = record
            .object_id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        table.add_row(vec![
            Cell::new(record.offset),
            Cell::new(format!("{}{}", "  ".repeat(record.depth), record.record_type)),
            Cell::new(object_id),
            Cell::new(record.depth),
        ]);
    }
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    writeln!(out, "{table}")?;
    writeln!(out, "{} records, {} bytes", summary.records.len(), bytes.len())?;
    Ok(())
}

/// Print the registered gadget chains and formatters.
pub fn run_list(generator: &Generator, out: &mut impl Write) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Kind", "Name", "Description"]);
    apply_table_style(&mut table);
    for chain in generator.chains().iter() {
        table.add_row(vec!["gadget chain", chain.name, chain.description]);
    }
    for formatter in generator.formatters().iter() {
        table.add_row(vec!["formatter", formatter.name, formatter.description]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

fn encode_payload(payload: Vec<u8>, encoding: EncodingArg) -> Vec<u8> {
    match encoding {
        EncodingArg::Raw => payload,
        EncodingArg::Hex => {
            let mut text = hex::encode(payload);
            text.push('\n');
            text.into_bytes()
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(encoding: EncodingArg, formatter: Option<&'static str>) -> GenerateRequest<'static> {
        GenerateRequest {
            command: "calc.exe",
            chain: "TextFormattingRunProperties",
            formatter,
            encoding,
        }
    }

    #[test]
    fn test_generate_raw_to_writer() {
        let generator = Generator::standard();
        let mut out = Vec::new();
        run_generate(
            &generator,
            &request(EncodingArg::Raw, Some("LosFormatter")),
            None,
            &mut out,
        )
        .unwrap();
        assert_eq!(&out[..3], &[0xFF, 0x01, 0x32]);
    }

    #[test]
    fn test_generate_hex() {
        let generator = Generator::standard();
        let mut out = Vec::new();
        run_generate(&generator, &request(EncodingArg::Hex, None), None, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("0001000000ffffffff01000000"));
        assert!(text.ends_with("0b\n"));
    }

    #[test]
    fn test_generate_unknown_chain_writes_nothing() {
        let generator = Generator::standard();
        let mut out = Vec::new();
        let mut bogus = request(EncodingArg::Raw, None);
        bogus.chain = "Bogus";
        let err = run_generate(&generator, &bogus, None, &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported gadget chain: Bogus"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_inspect_lists_records() {
        let generator = Generator::standard();
        let mut out = Vec::new();
        run_inspect(&generator, &request(EncodingArg::Raw, None), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("BinaryLibrary"));
        assert!(text.contains("BinaryObjectString"));
        assert!(text.contains("5 records"));
    }

    #[test]
    fn test_list_names_registered_entries() {
        let mut out = Vec::new();
        run_list(&Generator::standard(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("TextFormattingRunProperties"));
        assert!(text.contains("LosFormatter"));
    }
}
