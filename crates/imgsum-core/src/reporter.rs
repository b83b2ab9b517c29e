//! Reporter trait for digest output
//!
//! The command emits one report line per digested image in print mode.
//! Reporters decide where those lines go without the command knowing about
//! stdout, buffers or files.

use imgsum_schema::HexDigest;
use std::fmt;
use std::io::{self, Write};

/// Sink for print-mode report lines.
pub trait Reporter {
    /// Emit the digest of the image called `name`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the line cannot be written.
    fn digest(&mut self, digest: &HexDigest, name: &str) -> io::Result<()>;
}

impl<T: Reporter + ?Sized> Reporter for &mut T {
    fn digest(&mut self, digest: &HexDigest, name: &str) -> io::Result<()> {
        (**self).digest(digest, name)
    }
}

/// One line of print-mode output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    /// Hex digest of the image.
    pub digest: HexDigest,
    /// Image name.
    pub name: String,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.digest, self.name)
    }
}

/// Collects lines in memory.
impl Reporter for Vec<ReportLine> {
    fn digest(&mut self, digest: &HexDigest, name: &str) -> io::Result<()> {
        self.push(ReportLine {
            digest: digest.clone(),
            name: name.to_string(),
        });
        Ok(())
    }
}

/// Writes `<hex>  <name>` lines to any writer, flushing after each line.
#[derive(Debug)]
pub struct LineReporter<W> {
    out: W,
}

impl<W: Write> LineReporter<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl LineReporter<io::Stdout> {
    /// Reporter over standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter for LineReporter<W> {
    fn digest(&mut self, digest: &HexDigest, name: &str) -> io::Result<()> {
        writeln!(self.out, "{digest}  {name}")?;
        self.out.flush()
    }
}

/// A no-op reporter for silent operations (e.g., verification, testing).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn digest(&mut self, _: &HexDigest, _: &str) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgsum_schema::Algorithm;

    #[test]
    fn line_reporter_uses_two_space_separator() {
        let digest = HexDigest::from_bytes(&Algorithm::Md5.digest(b""));
        let mut reporter = LineReporter::new(Vec::new());
        reporter.digest(&digest, "empty.img").unwrap();
        reporter.digest(&digest, "again").unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            out,
            "d41d8cd98f00b204e9800998ecf8427e  empty.img\n\
             d41d8cd98f00b204e9800998ecf8427e  again\n"
        );
    }

    #[test]
    fn report_line_display_matches_line_reporter() {
        let digest = HexDigest::from_bytes(&[0xab, 0xcd]);
        let line = ReportLine {
            digest: digest.clone(),
            name: "x".to_string(),
        };
        let mut reporter = LineReporter::new(Vec::new());
        reporter.digest(&digest, "x").unwrap();
        assert_eq!(
            format!("{line}\n"),
            String::from_utf8(reporter.into_inner()).unwrap()
        );
    }
}
