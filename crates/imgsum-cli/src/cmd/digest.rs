//! Digest commands (md5sum, sha1sum, sha256sum, digest)

use crate::DigestArgs;
use anyhow::Result;
use imgsum_core::{
    AcquireError, DigestCommand, DigestError, DigestOptions, EngineConfig, LineReporter,
};
use imgsum_schema::Algorithm;
use std::io;

/// Print or verify digests of the given images.
///
/// Report lines go to stdout. Images that cannot be acquired are listed on
/// stderr and do not fail the command unless nothing could be verified.
///
/// # Errors
///
/// Returns the [`DigestError`] from the run: a verify mismatch, verify mode
/// with no acquirable image, a bad image count or a failed stdout write.
pub fn digest(algorithm: Algorithm, args: &DigestArgs, config: &EngineConfig) -> Result<()> {
    let options = DigestOptions::from_sum(args.sum.as_deref());
    let command =
        DigestCommand::new(algorithm, config.file_source()).with_reader(config.reader());

    tracing::debug!(
        "{} over {} image(s), chunk size {}",
        algorithm.command_name(),
        args.images.len(),
        config.chunk_size
    );

    let mut reporter = LineReporter::new(io::stdout().lock());
    match command.run(args.images.as_slice(), &options, &mut reporter) {
        Ok(outcome) => {
            report_skipped(&outcome.skipped);
            if let Some(name) = outcome.verified {
                tracing::info!("{name}: {algorithm} OK");
            }
            Ok(())
        }
        Err(e) => {
            if let DigestError::NothingVerified { skipped } | DigestError::Mismatch { skipped, .. } =
                &e
            {
                report_skipped(skipped);
            }
            Err(e.into())
        }
    }
}

fn report_skipped(skipped: &[AcquireError]) {
    for e in skipped {
        eprintln!("imgsum: {e}");
    }
}
