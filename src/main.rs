//! cloudkey - Encrypt and decrypt files with key in the cloud.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cloudkey::cli::output;
use cloudkey::cli::{execute, Cli};
use cloudkey::core::constants::LOG_ENV;
use cloudkey::error::{Error, KmsError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("cloudkey=debug")
        } else {
            EnvFilter::new("cloudkey=info")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::Kms(KmsError::Auth(_)) => Some("run: gcloud auth application-default login"),
            Error::Kms(KmsError::KeyFileRead { .. }) => Some(
                "check ServiceAccountKey in the config, or re-run: cloudkey config gcp service-account",
            ),
            Error::Kms(KmsError::Unsupported(_)) => Some("rebuild with: --features gcp,aws"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
