//! .NET deserialization payload generation.
//!
//! This crate builds gadget-chain object graphs with `nrbf-format` and wraps
//! them in the envelope a hosting formatter expects:
//!
//! - **Gadget chains**: named builders from an OS command to a record stream
//! - **Formatters**: named envelopes around the stream bytes
//! - **XAML**: the resource dictionaries that chains embed as strings
//!
//! The reference pairing is the `TextFormattingRunProperties` chain inside a
//! `LosFormatter` envelope, which is what [`GenerateOptions::default`] selects.

pub mod chains;
mod error;
pub mod formatter;
mod generate;
pub mod xaml;

pub use chains::{DEFAULT_GADGET_CHAIN, GadgetChain, GadgetChainRegistry};
pub use error::{GadgetError, Result};
pub use formatter::{DEFAULT_FORMATTER, Formatter, FormatterRegistry};
pub use generate::{
    GenerateOptions, Generator, default_generator, generate, generate_formatted,
    generate_gadget_chain,
};
