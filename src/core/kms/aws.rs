//! AWS KMS backend.
//!
//! Encrypts files using AWS Key Management Service.
//! Enable with `--features aws`.
//!
//! ## Usage
//!
//! ```bash
//! cloudkey config aws shared-creds cloudkey.toml -p ops -r us-east-1 \
//!     -k arn:aws:kms:us-east-1:123456789012:key/12345678-1234-1234-1234-123456789012
//! cloudkey encrypt aws -c cloudkey.toml secrets.env
//! ```
//!
//! Credentials come from the profile only, never from the ambient
//! environment: either the static key id / secret / token, or a shared
//! credentials file and profile name.

use std::path::Path;

use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::BehaviorVersion;
use aws_sdk_kms::config::{Credentials, Region, SharedCredentialsProvider};
use aws_sdk_kms::primitives::Blob;
use tokio::runtime::Runtime;
use tracing::{debug, trace};

use super::{KmsBackend, KmsProvider};
use crate::core::config::AwsConfig;
use crate::error::{KmsError, Result};

/// Provider name attached to static credentials.
const STATIC_PROVIDER_NAME: &str = "cloudkey-static";

/// AWS KMS backend.
///
/// KMS stores the key information in the ciphertext, so decryption
/// doesn't specify the key ID.
#[derive(Debug)]
pub struct AwsKms {
    key_id: String,
    client: aws_sdk_kms::Client,
    runtime: Runtime,
}

impl AwsKms {
    /// Open a regional session with the configured credentials.
    ///
    /// # Errors
    ///
    /// Returns `KmsError::Session` if the shared credentials file is
    /// missing or the runtime can't be created.
    pub fn connect(config: &AwsConfig) -> Result<Self> {
        debug!(
            region = %config.region,
            static_creds = config.use_static_creds,
            "connecting to aws kms"
        );

        let credentials = credentials_provider(config)?;
        let runtime = super::runtime(KmsProvider::Aws)?;

        let sdk_config = runtime.block_on(
            aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(config.region.clone()))
                .credentials_provider(credentials)
                .load(),
        );
        let client = aws_sdk_kms::Client::new(&sdk_config);

        Ok(Self {
            key_id: config.crypto_key_id.clone(),
            client,
            runtime,
        })
    }
}

fn credentials_provider(config: &AwsConfig) -> Result<SharedCredentialsProvider> {
    if config.use_static_creds {
        let token = Some(config.access_token.clone()).filter(|t| !t.is_empty());
        return Ok(SharedCredentialsProvider::new(Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            token,
            None,
            STATIC_PROVIDER_NAME,
        )));
    }

    let mut builder = ProfileFileCredentialsProvider::builder();

    if !config.cred_file.is_empty() {
        let path = Path::new(&config.cred_file);
        if !path.is_file() {
            return Err(KmsError::Session {
                provider: KmsProvider::Aws.name(),
                reason: format!("credentials file not found: {}", path.display()),
            }
            .into());
        }
        builder = builder.profile_files(
            ProfileFiles::builder()
                .with_file(ProfileFileKind::Credentials, path)
                .build(),
        );
    }

    if !config.profile.is_empty() {
        builder = builder.profile_name(&config.profile);
    }

    Ok(SharedCredentialsProvider::new(builder.build()))
}

impl KmsBackend for AwsKms {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        trace!(
            key_id = %self.key_id,
            plaintext_len = plaintext.len(),
            "encrypting with AWS KMS"
        );

        let result = self
            .runtime
            .block_on(
                self.client
                    .encrypt()
                    .key_id(&self.key_id)
                    .plaintext(Blob::new(plaintext))
                    .send(),
            )
            .map_err(|e| KmsError::Encryption(format!("KMS encrypt failed: {}", e)))?;

        let blob = result
            .ciphertext_blob
            .ok_or_else(|| KmsError::Encryption("no ciphertext returned".into()))?;

        trace!(ciphertext_len = blob.as_ref().len(), "encrypted with AWS KMS");
        Ok(blob.into_inner())
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting with AWS KMS");

        let result = self
            .runtime
            .block_on(
                self.client
                    .decrypt()
                    .ciphertext_blob(Blob::new(ciphertext))
                    .send(),
            )
            .map_err(|e| KmsError::Decryption(format!("KMS decrypt failed: {}", e)))?;

        let blob = result
            .plaintext
            .ok_or_else(|| KmsError::Decryption("no plaintext returned".into()))?;

        trace!(plaintext_len = blob.as_ref().len(), "decrypted with AWS KMS");
        Ok(blob.into_inner())
    }

    fn provider(&self) -> KmsProvider {
        KmsProvider::Aws
    }
}
