//! The digest command.
//!
//! Walks a list of image identifiers in order. Each acquired image is
//! digested with a fresh state through the [`ChunkedReader`] and then either
//! reported (print mode) or compared against the expected digest (verify
//! mode). Verify mode is decided by the first image that can be acquired:
//! a match or a mismatch ends the command without touching later images.
//!
//! The expected digest is compared byte for byte with the lowercase hex of
//! the computed one. It is never normalised, so upper-case, short or non-hex
//! values simply mismatch.
//!
//! Acquisition failures never abort the batch. They are collected in
//! [`Outcome::skipped`], or carried by the error when verify mode fails.

use crate::error::DigestError;
use crate::image::{AcquireError, Image, ImageSource};
use crate::reader::ChunkedReader;
use crate::reporter::Reporter;
use imgsum_schema::{Algorithm, HexDigest};

/// Upper bound on identifiers accepted by one invocation.
pub const MAX_IMAGES: usize = 256;

/// Per-invocation options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigestOptions {
    /// Digest to verify against, verbatim. `None` selects print mode.
    pub expected: Option<String>,
}

impl DigestOptions {
    /// Print mode.
    pub fn print() -> Self {
        Self::default()
    }

    /// Verify mode against `expected`.
    pub fn verify(expected: impl Into<String>) -> Self {
        Self {
            expected: Some(expected.into()),
        }
    }

    /// Build options from an optional raw `--sum` value.
    pub fn from_sum(expected: Option<&str>) -> Self {
        match expected {
            Some(sum) => Self::verify(sum),
            None => Self::print(),
        }
    }

    /// Whether these options select verify mode.
    pub fn is_verify(&self) -> bool {
        self.expected.is_some()
    }
}

/// Result of a successful run.
#[derive(Debug, Default)]
pub struct Outcome {
    /// Report lines emitted (print mode).
    pub printed: usize,
    /// Name of the image whose digest matched (verify mode).
    pub verified: Option<String>,
    /// Identifiers that could not be acquired, in order.
    pub skipped: Vec<AcquireError>,
}

/// A digest command bound to one algorithm and one image source.
#[derive(Debug)]
pub struct DigestCommand<S> {
    algorithm: Algorithm,
    source: S,
    reader: ChunkedReader,
}

impl<S: ImageSource> DigestCommand<S> {
    /// Create a command using the default chunk size.
    pub fn new(algorithm: Algorithm, source: S) -> Self {
        Self {
            algorithm,
            source,
            reader: ChunkedReader::default(),
        }
    }

    /// Use a different chunked reader.
    pub fn with_reader(mut self, reader: ChunkedReader) -> Self {
        self.reader = reader;
        self
    }

    /// Algorithm this command computes.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Digest a single image and hex-encode the result.
    pub fn digest_image(&self, image: &Image) -> HexDigest {
        HexDigest::from_bytes(&self.reader.digest(self.algorithm, image))
    }

    /// Run the command over `identifiers`.
    ///
    /// # Errors
    ///
    /// - [`DigestError::Arguments`] if `identifiers` is empty or longer than
    ///   [`MAX_IMAGES`]
    /// - [`DigestError::Mismatch`] if the first acquired image does not match
    /// - [`DigestError::NothingVerified`] if verify mode acquired no image
    /// - [`DigestError::Report`] if a report line cannot be written
    pub fn run<I, R>(
        &self,
        identifiers: &[I],
        options: &DigestOptions,
        reporter: &mut R,
    ) -> Result<Outcome, DigestError>
    where
        I: AsRef<str>,
        R: Reporter + ?Sized,
    {
        if identifiers.is_empty() || identifiers.len() > MAX_IMAGES {
            return Err(DigestError::Arguments {
                count: identifiers.len(),
                max: MAX_IMAGES,
            });
        }

        let mut outcome = Outcome::default();

        for identifier in identifiers {
            let identifier = identifier.as_ref();

            let image = match self.source.acquire(identifier) {
                Ok(image) => image,
                Err(e) => {
                    tracing::warn!("Skipping {identifier}: {}", e.kind);
                    outcome.skipped.push(e);
                    continue;
                }
            };

            let actual = self.digest_image(&image);
            tracing::debug!(
                algorithm = %self.algorithm,
                len = image.len(),
                "{}: {actual}",
                image.name()
            );

            if let Some(expected) = &options.expected {
                if actual.as_str() == expected.as_str() {
                    outcome.verified = Some(image.name().to_string());
                    return Ok(outcome);
                }
                return Err(DigestError::Mismatch {
                    image: image.name().to_string(),
                    algorithm: self.algorithm,
                    expected: expected.clone(),
                    actual,
                    skipped: outcome.skipped,
                });
            }

            reporter
                .digest(&actual, image.name())
                .map_err(DigestError::Report)?;
            outcome.printed += 1;
        }

        if options.is_verify() {
            return Err(DigestError::NothingVerified {
                skipped: outcome.skipped,
            });
        }

        Ok(outcome)
    }
}
