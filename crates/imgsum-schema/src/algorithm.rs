//! Digest algorithm bindings.
//!
//! Each supported hash function is one [`Algorithm`] variant. The variant
//! describes the size of its working state and output and hands out fresh
//! [`DigestState`] values that follow the init/update/final contract.

use digest::DynDigest;
use md5::Md5;
use sha1::Sha1;
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the fixed set of supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// MD5, 16-byte digest.
    Md5,
    /// SHA-1, 20-byte digest.
    Sha1,
    /// SHA-256, 32-byte digest.
    Sha256,
}

impl Algorithm {
    /// Every supported algorithm, in command order.
    pub const ALL: [Self; 3] = [Self::Md5, Self::Sha1, Self::Sha256];

    /// Short lowercase name (`md5`, `sha1`, `sha256`).
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }

    /// Name of the command bound to this algorithm (`md5sum`, ...).
    pub fn command_name(self) -> &'static str {
        match self {
            Self::Md5 => "md5sum",
            Self::Sha1 => "sha1sum",
            Self::Sha256 => "sha256sum",
        }
    }

    /// Inverse of [`Algorithm::command_name`].
    pub fn from_command_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.command_name() == name)
    }

    /// Bytes of opaque working state the algorithm threads through a digest.
    pub fn context_size(self) -> usize {
        match self {
            Self::Md5 => size_of::<Md5>(),
            Self::Sha1 => size_of::<Sha1>(),
            Self::Sha256 => size_of::<Sha256>(),
        }
    }

    /// Bytes of final output.
    pub fn digest_size(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha256 => 32,
        }
    }

    /// Create a fresh working state.
    pub fn init(self) -> DigestState {
        let inner: Box<dyn DynDigest + Send> = match self {
            Self::Md5 => Box::new(Md5::default()),
            Self::Sha1 => Box::new(Sha1::default()),
            Self::Sha256 => Box::new(Sha256::default()),
        };
        DigestState {
            algorithm: self,
            inner,
        }
    }

    /// Digest `data` with a single update.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        let mut state = self.init();
        state.update(data);
        state.finalize()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when an algorithm name is not one of the supported set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown digest algorithm '{0}' (expected md5, sha1 or sha256)")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" | "md5sum" => Ok(Self::Md5),
            "sha1" | "sha-1" | "sha1sum" => Ok(Self::Sha1),
            "sha256" | "sha-256" | "sha256sum" => Ok(Self::Sha256),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Working state of one in-flight digest computation.
///
/// Created by [`Algorithm::init`]. [`DigestState::finalize`] consumes the
/// state, so a finished computation cannot be fed again; every image gets
/// its own state.
pub struct DigestState {
    algorithm: Algorithm,
    inner: Box<dyn DynDigest + Send>,
}

impl DigestState {
    /// Algorithm this state belongs to.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Feed the next run of input bytes.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finish the computation, yielding exactly `digest_size()` bytes.
    pub fn finalize(self) -> Vec<u8> {
        self.inner.finalize().into_vec()
    }
}

impl fmt::Debug for DigestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestState")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
