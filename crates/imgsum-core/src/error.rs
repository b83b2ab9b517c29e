//! Errors surfaced by the digest command

use crate::image::AcquireError;
use imgsum_schema::{Algorithm, HexDigest};
use std::io;
use thiserror::Error;

/// Exit status for a verification mismatch.
pub const EXIT_MISMATCH: u8 = 1;
/// Exit status for a malformed invocation.
pub const EXIT_USAGE: u8 = 2;
/// Exit status when report output cannot be written.
pub const EXIT_IO: u8 = 74;

/// Why a digest command did not complete successfully.
#[derive(Debug, Error)]
pub enum DigestError {
    /// Image list is empty or too long.
    #[error("expected between 1 and {max} images, got {count}")]
    Arguments {
        /// Number of identifiers supplied.
        count: usize,
        /// Upper bound on identifiers per invocation.
        max: usize,
    },

    /// Computed digest differs from the expected one.
    #[error("{image}: {algorithm} mismatch: expected {expected}, got {actual}")]
    Mismatch {
        /// Name of the image that was digested.
        image: String,
        /// Algorithm in use.
        algorithm: Algorithm,
        /// Digest the caller asked for, exactly as supplied.
        expected: String,
        /// Digest actually computed.
        actual: HexDigest,
        /// Identifiers skipped before the mismatching image, in order.
        skipped: Vec<AcquireError>,
    },

    /// Verify mode ran out of identifiers without acquiring any image.
    #[error("nothing to verify: none of {} image(s) could be acquired", .skipped.len())]
    NothingVerified {
        /// Acquisition failures, in identifier order.
        skipped: Vec<AcquireError>,
    },

    /// A report line could not be written.
    #[error("failed to write report: {0}")]
    Report(#[source] io::Error),
}

impl DigestError {
    /// Process exit status this error maps to.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Mismatch { .. } | Self::NothingVerified { .. } => EXIT_MISMATCH,
            Self::Arguments { .. } => EXIT_USAGE,
            Self::Report(_) => EXIT_IO,
        }
    }
}
