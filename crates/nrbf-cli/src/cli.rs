//! CLI argument definitions for the payload generator.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use nrbf_gadget::{DEFAULT_FORMATTER, DEFAULT_GADGET_CHAIN};

/// `--formatter` value that skips the envelope.
pub const RAW_FORMATTER: &str = "none";

#[derive(Parser)]
#[command(
    name = "nrbf",
    version,
    about = "Generate .NET BinaryFormatter gadget-chain payloads",
    long_about = "Generate .NET Remoting Binary Format (MS-NRBF) payloads that run an OS \
                  command when deserialized.\n\n\
                  The stream is built by a named gadget chain and optionally wrapped in a \
                  formatter envelope such as LosFormatter."
)]
pub struct Cli {
    /// OS command to run on the target (passed to `cmd /c`).
    #[arg(value_name = "COMMAND", required_unless_present = "list")]
    pub command: Option<String>,

    /// Gadget chain that builds the object graph.
    #[arg(short = 'g', long = "chain", default_value = DEFAULT_GADGET_CHAIN)]
    pub chain: String,

    /// Formatter envelope around the stream (`none` for the raw stream).
    #[arg(short = 'f', long = "formatter", default_value = DEFAULT_FORMATTER)]
    pub formatter: String,

    /// Write the payload to a file instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Payload encoding.
    #[arg(short = 'e', long = "encoding", value_enum, default_value = "raw")]
    pub encoding: EncodingArg,

    /// Print the records of the generated stream instead of the payload.
    #[arg(long = "inspect", conflicts_with = "output")]
    pub inspect: bool,

    /// List the available gadget chains and formatters.
    #[arg(long = "list", conflicts_with_all = ["command", "inspect", "output"])]
    pub list: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Formatter name to pass to the generator, `None` for the raw stream.
    pub fn formatter_name(&self) -> Option<&str> {
        if self.formatter.eq_ignore_ascii_case(RAW_FORMATTER) {
            None
        } else {
            Some(&self.formatter)
        }
    }
}

/// Payload encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EncodingArg {
    /// Bytes as generated.
    Raw,
    /// Lowercase hexadecimal text.
    Hex,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
