//! Shared digest types for imgsum.
//!
//! - [`Algorithm`]: the fixed set of digest bindings (MD5, SHA-1, SHA-256)
//! - [`DigestState`]: per-computation working state
//! - [`HexDigest`]: lowercase hex rendering of a computed digest

pub mod algorithm;
pub mod codec;

// Re-exports
pub use algorithm::{Algorithm, DigestState, UnknownAlgorithm};
pub use codec::{HexDigest, encode};
