//! CLI library components for the `nrbf` payload generator.

pub mod logging;
