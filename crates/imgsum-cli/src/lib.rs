//! imgsum - digest commands over named images
//!
//! Computes or verifies MD5, SHA-1 and SHA-256 digests of one or more
//! images. Each image is streamed through a small fixed buffer, so large
//! files are never read into memory as a whole.
//!
//! # Usage
//!
//! ```text
//! imgsum sha256sum boot.img initrd.img       # print "<hex>  <name>" lines
//! imgsum md5sum --sum <hex> boot.img         # verify, exit 1 on mismatch
//! imgsum digest -a sha1 boot.img             # algorithm chosen at runtime
//! ```
//!
//! When the binary is invoked under the name `md5sum`, `sha1sum` or
//! `sha256sum` (e.g. through a symlink) it behaves as that subcommand.

pub mod cmd;

use clap::{Args, Parser, Subcommand};
use imgsum_core::{EngineConfig, MAX_IMAGES};
use imgsum_schema::Algorithm;
use std::ffi::OsString;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "imgsum")]
#[command(author, version, about = "imgsum - compute and verify image digests")]
pub struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Size in bytes of the buffer images are read through [env: IMGSUM_CHUNK_SIZE]
    #[arg(long, global = true, value_name = "BYTES")]
    pub chunk_size: Option<NonZeroUsize>,

    /// Directory relative image paths are resolved in [env: IMGSUM_BASE_DIR]
    #[arg(long, global = true, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    #[allow(missing_docs)]
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Engine configuration with command line values layered over the
    /// environment.
    ///
    /// The environment is read by [`EngineConfig::from_env`], which ignores
    /// invalid values; only the flags are validated by clap.
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::from_env();
        if let Some(size) = self.chunk_size {
            config.chunk_size = size;
        }
        if let Some(dir) = &self.base_dir {
            config.base_dir = Some(dir.clone());
        }
        config
    }
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute or verify MD5 digests
    #[command(name = "md5sum")]
    Md5sum(DigestArgs),
    /// Compute or verify SHA-1 digests
    #[command(name = "sha1sum")]
    Sha1sum(DigestArgs),
    /// Compute or verify SHA-256 digests
    #[command(name = "sha256sum")]
    Sha256sum(DigestArgs),
    /// Compute or verify digests with an algorithm chosen at runtime
    Digest {
        /// Digest algorithm (md5, sha1, sha256)
        #[arg(short, long)]
        algorithm: Algorithm,
        #[allow(missing_docs)]
        #[command(flatten)]
        args: DigestArgs,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

/// Arguments shared by every digest subcommand.
#[derive(Debug, Clone, Args)]
pub struct DigestArgs {
    /// Expected digest; verify the first image against it instead of printing
    #[arg(short = 's', long = "sum", value_name = "HEX")]
    pub sum: Option<String>,

    /// Images to digest
    #[arg(required = true, num_args = 1..=MAX_IMAGES, value_name = "IMAGE")]
    pub images: Vec<String>,
}

/// Rewrite `argv` for multi-call use.
///
/// If the program name is one of the digest command names, that name is
/// inserted as the subcommand so `sha256sum foo` parses like
/// `imgsum sha256sum foo`.
pub fn multicall_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let algorithm = args
        .first()
        .and_then(|argv0| Path::new(argv0).file_stem())
        .and_then(|stem| stem.to_str())
        .and_then(Algorithm::from_command_name);

    if let Some(algorithm) = algorithm {
        args.insert(1, algorithm.command_name().into());
    }
    args
}
