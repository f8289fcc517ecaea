//! Error types for payload generation.

use nrbf_format::NrbfError;
use thiserror::Error;

/// Errors that can occur while generating a payload.
#[derive(Debug, Error)]
pub enum GadgetError {
    /// No gadget chain is registered under this name.
    #[error("unsupported gadget chain: {name}")]
    UnsupportedGadgetChain { name: String },

    /// No formatter is registered under this name.
    #[error("unsupported formatter: {name}")]
    UnsupportedFormatter { name: String },

    /// Record construction or encoding failed.
    #[error(transparent)]
    Record(#[from] NrbfError),

    /// The embedded XAML document could not be written.
    #[error("failed to write XAML: {message}")]
    Xaml { message: String },
}

/// Result type alias for generation.
pub type Result<T> = std::result::Result<T, GadgetError>;

impl GadgetError {
    /// Create an UnsupportedGadgetChain error.
    pub fn unsupported_gadget_chain(name: impl Into<String>) -> Self {
        Self::UnsupportedGadgetChain { name: name.into() }
    }

    /// Create an UnsupportedFormatter error.
    pub fn unsupported_formatter(name: impl Into<String>) -> Self {
        Self::UnsupportedFormatter { name: name.into() }
    }

    /// Create a Xaml error.
    pub fn xaml(message: impl Into<String>) -> Self {
        Self::Xaml {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GadgetError::unsupported_gadget_chain("Bogus");
        assert_eq!(format!("{err}"), "unsupported gadget chain: Bogus");

        let err = GadgetError::unsupported_formatter("Bogus");
        assert_eq!(format!("{err}"), "unsupported formatter: Bogus");
    }

    #[test]
    fn test_record_error_is_transparent() {
        let err: GadgetError = NrbfError::malformed_stream("stream has no records").into();
        assert_eq!(format!("{err}"), "malformed stream: stream has no records");
    }
}
