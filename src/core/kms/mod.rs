//! Cloud KMS backends.
//!
//! Shared types (`KmsProvider`, `KmsBackend`) plus provider implementations.
//!
//! - `gcp`: GCP Cloud KMS (feature-gated)
//! - `aws`: AWS KMS (feature-gated)
//! - `mock`: in-process stand-in for tests and benches

use std::fmt;

use crate::core::config::Config;
use crate::error::{KmsError, Result};

#[cfg(feature = "aws")]
pub mod aws;

#[cfg(feature = "gcp")]
pub mod gcp;

#[cfg(any(test, feature = "test-kms"))]
pub mod mock;

/// Supported KMS providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KmsProvider {
    Gcp,
    Aws,
}

impl KmsProvider {
    /// Provider display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gcp => "gcp",
            Self::Aws => "aws",
        }
    }
}

impl fmt::Display for KmsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for KMS encrypt/decrypt operations.
///
/// Implemented by the real providers and by the mock used in tests.
/// Payloads are raw bytes; any wire encoding is the backend's concern.
pub trait KmsBackend: fmt::Debug {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>>;
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;
    fn provider(&self) -> KmsProvider;
}

/// Build an authenticated backend for `provider` from the profile.
///
/// # Errors
///
/// Returns the provider's setup error (`Auth`, `Session`, `KeyFileRead`,
/// `KeyFileParse`), or `Unsupported` if the provider wasn't compiled in.
pub fn connect(provider: KmsProvider, config: &Config) -> Result<Box<dyn KmsBackend>> {
    #[cfg(not(any(feature = "gcp", feature = "aws")))]
    let _ = config;

    match provider {
        #[cfg(feature = "gcp")]
        KmsProvider::Gcp => Ok(Box::new(gcp::GcpKms::connect(&config.gcp_config)?)),
        #[cfg(feature = "aws")]
        KmsProvider::Aws => Ok(Box::new(aws::AwsKms::connect(&config.aws_config)?)),
        #[allow(unreachable_patterns)]
        other => Err(KmsError::Unsupported(other.name()).into()),
    }
}

/// Build the current-thread runtime a backend blocks on.
#[cfg(any(feature = "gcp", feature = "aws"))]
fn runtime(provider: KmsProvider) -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            KmsError::Session {
                provider: provider.name(),
                reason: format!("failed to create runtime: {}", e),
            }
            .into()
        })
}
