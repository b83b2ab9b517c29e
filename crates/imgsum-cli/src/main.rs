//! imgsum - digest commands over named images

use clap::Parser;
use imgsum_core::DigestError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use imgsum_cli::cmd;
use imgsum_cli::{Cli, Commands};
use imgsum_schema::Algorithm;

fn main() -> ExitCode {
    let cli = Cli::parse_from(imgsum_cli::multicall_args(std::env::args_os()));

    // Initialize logging. Stdout carries report lines only.
    let default_level = if cli.verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = cli.engine_config();

    let result = match cli.command {
        Commands::Md5sum(args) => cmd::digest::digest(Algorithm::Md5, &args, &config),
        Commands::Sha1sum(args) => cmd::digest::digest(Algorithm::Sha1, &args, &config),
        Commands::Sha256sum(args) => cmd::digest::digest(Algorithm::Sha256, &args, &config),
        Commands::Digest { algorithm, args } => cmd::digest::digest(algorithm, &args, &config),
        Commands::Completions { shell } => {
            cmd::completions::completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("imgsum: {e:#}");
            let code = e.downcast_ref::<DigestError>().map_or(1, DigestError::exit_code);
            ExitCode::from(code)
        }
    }
}
