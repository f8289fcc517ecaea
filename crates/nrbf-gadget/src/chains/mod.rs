//! Gadget chains, looked up by name.
//!
//! Each chain is a builder function from an OS command to a record stream.
//! New chains share the record model and stream assembler; adding one means
//! writing its builder and registering it in [`GadgetChainRegistry::standard`].

pub mod text_formatting_run_properties;

use std::collections::BTreeMap;

use nrbf_format::SerializedStream;

use crate::error::{GadgetError, Result};

/// Chain used when the caller does not name one.
pub const DEFAULT_GADGET_CHAIN: &str = text_formatting_run_properties::NAME;

/// Builds the record stream for an OS command.
pub type ChainBuilder = fn(&str) -> Result<SerializedStream>;

/// A registered gadget chain.
#[derive(Debug, Clone, Copy)]
pub struct GadgetChain {
    pub name: &'static str,
    pub description: &'static str,
    pub build: ChainBuilder,
}

/// Gadget chains indexed by name.
///
/// Unknown names are an error; there is no fallback chain.
#[derive(Debug, Clone, Default)]
pub struct GadgetChainRegistry {
    chains: BTreeMap<&'static str, GadgetChain>,
}

impl GadgetChainRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every chain this crate implements.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(GadgetChain {
            name: text_formatting_run_properties::NAME,
            description: "XamlReader.Parse through TextFormattingRunProperties.ForegroundBrush \
                          (Microsoft.PowerShell.Editor)",
            build: text_formatting_run_properties::build,
        });
        registry
    }

    /// Registers a chain under its name, replacing any previous entry.
    pub fn register(&mut self, chain: GadgetChain) {
        self.chains.insert(chain.name, chain);
    }

    /// Looks up a chain by exact name.
    ///
    /// # Errors
    ///
    /// [`GadgetError::UnsupportedGadgetChain`] for an unknown name.
    pub fn get(&self, name: &str) -> Result<&GadgetChain> {
        self.chains
            .get(name)
            .ok_or_else(|| GadgetError::unsupported_gadget_chain(name))
    }

    /// Builds `command` with the chain called `name`.
    pub fn build(&self, name: &str, command: &str) -> Result<SerializedStream> {
        (self.get(name)?.build)(command)
    }

    /// Registered chains in name order.
    pub fn iter(&self) -> impl Iterator<Item = &GadgetChain> + '_ {
        self.chains.values()
    }

    /// Returns the number of registered chains.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns true if no chains are registered.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
