//! Streaming digest engine for named images.
//!
//! # Overview
//!
//! A [`DigestCommand`] takes a list of image identifiers, acquires each one
//! through an [`ImageSource`], pushes its bytes through a small bounded
//! buffer ([`ChunkedReader`]) into an [`Algorithm`](imgsum_schema::Algorithm)
//! state, and hex-encodes the result. The digest is then either handed to a
//! [`Reporter`] (print mode) or compared with an expected value (verify
//! mode).
//!
//! # Example
//!
//! ```
//! use imgsum_core::{DigestCommand, DigestOptions, ImageRegistry, ReportLine};
//! use imgsum_schema::Algorithm;
//!
//! let images = ImageRegistry::new().with("A", &b"abc"[..]);
//! let command = DigestCommand::new(Algorithm::Md5, images);
//!
//! let mut lines: Vec<ReportLine> = Vec::new();
//! command.run(&["A"], &DigestOptions::print(), &mut lines).unwrap();
//! assert_eq!(lines[0].to_string(), "900150983cd24fb0d6963f7d28e17f72  A");
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod image;
pub mod reader;
pub mod reporter;

pub use command::{DigestCommand, DigestOptions, MAX_IMAGES, Outcome};
pub use config::EngineConfig;
pub use error::DigestError;
pub use image::{
    AcquireError, AcquireErrorKind, FileSource, Image, ImageRegistry, ImageSource, SourceChain,
};
pub use reader::{ChunkedReader, DEFAULT_CHUNK_SIZE};
pub use reporter::{LineReporter, NullReporter, ReportLine, Reporter};
