//! Formatter envelopes, looked up by name.
//!
//! A formatter wraps the raw stream bytes in whatever framing the target
//! deserializer expects.

pub mod object_state;

use std::collections::BTreeMap;

pub use object_state::{ObjectStateFormatterHeader, Token, los_formatter};

use crate::error::{GadgetError, Result};

/// Registry name of the `LosFormatter` envelope.
pub const LOS_FORMATTER: &str = "LosFormatter";

/// Formatter used when the caller does not name one.
pub const DEFAULT_FORMATTER: &str = LOS_FORMATTER;

/// Wraps a serialized stream.
pub type WrapFn = fn(&[u8]) -> Result<Vec<u8>>;

/// A registered formatter.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    pub name: &'static str,
    pub description: &'static str,
    pub wrap: WrapFn,
}

/// Formatters indexed by name.
#[derive(Debug, Clone, Default)]
pub struct FormatterRegistry {
    formatters: BTreeMap<&'static str, Formatter>,
}

impl FormatterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every formatter this crate implements.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Formatter {
            name: LOS_FORMATTER,
            description: "ObjectStateFormatter envelope with a BinarySerialized token",
            wrap: los_formatter,
        });
        registry
    }

    /// Registers a formatter under its name, replacing any previous entry.
    pub fn register(&mut self, formatter: Formatter) {
        self.formatters.insert(formatter.name, formatter);
    }

    /// Looks up a formatter by exact name.
    ///
    /// # Errors
    ///
    /// [`GadgetError::UnsupportedFormatter`] for an unknown name.
    pub fn get(&self, name: &str) -> Result<&Formatter> {
        self.formatters
            .get(name)
            .ok_or_else(|| GadgetError::unsupported_formatter(name))
    }

    /// Wraps `blob` with the formatter called `name`.
    pub fn wrap(&self, name: &str, blob: &[u8]) -> Result<Vec<u8>> {
        (self.get(name)?.wrap)(blob)
    }

    /// Registered formatters in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Formatter> + '_ {
        self.formatters.values()
    }

    /// Returns the number of registered formatters.
    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    /// Returns true if no formatters are registered.
    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }
}
