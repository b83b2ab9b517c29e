//! Images and the sources that acquire them.
//!
//! An [`Image`] is a named, length-known byte range. [`ImageSource`]
//! implementations resolve an identifier into an image:
//!
//! - [`ImageRegistry`]: images already held in memory, looked up by name
//! - [`FileSource`]: files on disk, mapped read-only
//! - [`SourceChain`]: first success across several sources

use bytes::Bytes;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Backing storage of an image.
enum ImageData {
    Memory(Bytes),
    Mapped(memmap2::Mmap),
}

impl Deref for ImageData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Memory(b) => b,
            Self::Mapped(m) => m,
        }
    }
}

/// A named, read-only byte source.
pub struct Image {
    name: String,
    data: ImageData,
}

impl Image {
    /// Create an image over in-memory bytes.
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: ImageData::Memory(data.into()),
        }
    }

    /// Map a file read-only as an image named `name`.
    ///
    /// Empty files are held in memory instead, since a zero-length mapping is
    /// rejected on most platforms.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened or mapped.
    pub fn map_file(name: impl Into<String>, path: &Path) -> io::Result<Self> {
        let name = name.into();
        let file = fs::File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(Self::new(name, Bytes::new()));
        }

        // SAFETY: the mapping is read-only and lives no longer than the image.
        // Concurrent truncation by another process is outside our control, the
        // same as for any mmap-based reader.
        #[allow(unsafe_code)]
        let mmap = unsafe { memmap2::Mmap::map(&file)? };

        Ok(Self {
            name,
            data: ImageData::Mapped(mmap),
        })
    }

    /// Name used when reporting this image.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length in bytes.
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whether the image holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copy `buf.len()` bytes starting at `offset` into `buf`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + buf.len()` exceeds the image length.
    pub fn read_at(&self, offset: u64, buf: &mut [u8]) {
        let start = offset as usize;
        buf.copy_from_slice(&self.data[start..start + buf.len()]);
    }

    /// Borrow the full byte range.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backing = match self.data {
            ImageData::Memory(_) => "memory",
            ImageData::Mapped(_) => "mapped",
        };
        f.debug_struct("Image")
            .field("name", &self.name)
            .field("len", &self.len())
            .field("backing", &backing)
            .finish()
    }
}

/// Why an identifier could not be turned into an image.
#[derive(Debug, Error)]
pub enum AcquireErrorKind {
    /// Nothing is known under this identifier.
    #[error("no such image")]
    NotFound,

    /// The identifier names something that is not a regular file.
    #[error("not a regular file")]
    NotAFile,

    /// Reading the image failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure to acquire one image.
#[derive(Debug, Error)]
#[error("{identifier}: {kind}")]
pub struct AcquireError {
    /// Identifier as supplied by the caller.
    pub identifier: String,
    /// Underlying cause.
    #[source]
    pub kind: AcquireErrorKind,
}

impl AcquireError {
    /// Build an error for `identifier`.
    pub fn new(identifier: impl Into<String>, kind: impl Into<AcquireErrorKind>) -> Self {
        Self {
            identifier: identifier.into(),
            kind: kind.into(),
        }
    }

    /// Shorthand for [`AcquireErrorKind::NotFound`].
    pub fn not_found(identifier: impl Into<String>) -> Self {
        Self::new(identifier, AcquireErrorKind::NotFound)
    }
}

/// Resolves identifiers into images.
pub trait ImageSource {
    /// Acquire the image named by `identifier`.
    ///
    /// # Errors
    ///
    /// Returns an [`AcquireError`] if the identifier cannot be resolved or
    /// its bytes cannot be made readable.
    fn acquire(&self, identifier: &str) -> Result<Image, AcquireError>;
}

impl<T: ImageSource + ?Sized> ImageSource for &T {
    fn acquire(&self, identifier: &str) -> Result<Image, AcquireError> {
        (**self).acquire(identifier)
    }
}

impl<T: ImageSource + ?Sized> ImageSource for Box<T> {
    fn acquire(&self, identifier: &str) -> Result<Image, AcquireError> {
        (**self).acquire(identifier)
    }
}

/// Images held in memory, keyed by name.
///
/// Acquisition hands out a cheap clone of the stored bytes, so registered
/// images can be digested any number of times.
#[derive(Debug, Default, Clone)]
pub struct ImageRegistry {
    images: BTreeMap<String, Bytes>,
}

impl ImageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `data` under `name`, replacing any previous image.
    pub fn register(&mut self, name: impl Into<String>, data: impl Into<Bytes>) {
        self.images.insert(name.into(), data.into());
    }

    /// Builder form of [`ImageRegistry::register`].
    pub fn with(mut self, name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.register(name, data);
        self
    }

    /// Remove an image, returning its bytes if it was registered.
    pub fn unregister(&mut self, name: &str) -> Option<Bytes> {
        self.images.remove(name)
    }

    /// Bytes registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Bytes> {
        self.images.get(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }

    /// Number of registered images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether no images are registered.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageSource for ImageRegistry {
    fn acquire(&self, identifier: &str) -> Result<Image, AcquireError> {
        self.images
            .get(identifier)
            .map(|data| Image::new(identifier, data.clone()))
            .ok_or_else(|| AcquireError::not_found(identifier))
    }
}

/// Files on disk, resolved relative to an optional base directory.
#[derive(Debug, Default, Clone)]
pub struct FileSource {
    base_dir: Option<PathBuf>,
}

impl FileSource {
    /// Resolve identifiers against the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative identifiers against `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    /// Path an identifier resolves to.
    pub fn resolve(&self, identifier: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(identifier),
            None => PathBuf::from(identifier),
        }
    }
}

impl ImageSource for FileSource {
    fn acquire(&self, identifier: &str) -> Result<Image, AcquireError> {
        let path = self.resolve(identifier);
        let meta = fs::metadata(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AcquireError::not_found(identifier),
            _ => AcquireError::new(identifier, e),
        })?;
        if !meta.is_file() {
            return Err(AcquireError::new(identifier, AcquireErrorKind::NotAFile));
        }

        Image::map_file(identifier, &path).map_err(|e| AcquireError::new(identifier, e))
    }
}

/// Tries each source in order and returns the first image acquired.
#[derive(Default)]
pub struct SourceChain {
    sources: Vec<Box<dyn ImageSource>>,
}

impl SourceChain {
    /// Create an empty chain. An empty chain acquires nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source to the end of the chain.
    pub fn push(mut self, source: impl ImageSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl fmt::Debug for SourceChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceChain")
            .field("sources", &self.sources.len())
            .finish()
    }
}

impl ImageSource for SourceChain {
    fn acquire(&self, identifier: &str) -> Result<Image, AcquireError> {
        let mut last = AcquireError::not_found(identifier);
        for source in &self.sources {
            match source.acquire(identifier) {
                Ok(image) => return Ok(image),
                Err(e) => last = e,
            }
        }
        Err(last)
    }
}
