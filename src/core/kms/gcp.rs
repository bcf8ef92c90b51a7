//! Google Cloud KMS backend.
//!
//! Talks to the Cloud KMS API directly with either application-default
//! credentials (what `gcloud auth application-default login` sets up) or a
//! service account JSON key. Enable with `--features gcp`.
//!
//! ## Usage
//!
//! ```bash
//! cloudkey config gcp gcloud-account cloudkey.toml -p my-project -l global -r my-ring -k my-key
//! cloudkey encrypt gcp -c cloudkey.toml secrets.env
//! ```

use std::path::Path;

use google_cloud_auth::credentials::{self, service_account, Credentials};
use google_cloud_kms_v1::client::KeyManagementService;
use http::Extensions;
use tokio::runtime::Runtime;
use tracing::{debug, trace};

use super::{KmsBackend, KmsProvider};
use crate::core::config::GcpConfig;
use crate::core::constants::GCP_CLOUD_PLATFORM_SCOPE;
use crate::error::{Error, KmsError, Result};

/// Google Cloud KMS backend.
#[derive(Debug)]
pub struct GcpKms {
    /// Full resource name: projects/*/locations/*/keyRings/*/cryptoKeys/*
    resource_name: String,
    client: KeyManagementService,
    runtime: Runtime,
}

impl GcpKms {
    /// Authenticate and build a Cloud KMS client for the configured key.
    ///
    /// # Errors
    ///
    /// - `KmsError::Auth` if no application-default credentials are found
    /// - `KmsError::KeyFileRead` / `KmsError::KeyFileParse` for a bad
    ///   service account key
    /// - `KmsError::Session` if the client can't be constructed
    pub fn connect(config: &GcpConfig) -> Result<Self> {
        let resource_name = config.resource_name();
        debug!(
            resource = %resource_name,
            gcloud_account = config.use_gcloud_account,
            "connecting to gcp kms"
        );

        let runtime = super::runtime(KmsProvider::Gcp)?;
        let client = runtime.block_on(async {
            let credentials = if config.use_gcloud_account {
                application_default_credentials().await?
            } else {
                service_account_credentials(Path::new(&config.service_account_key))?
            };

            let client = KeyManagementService::builder()
                .with_credentials(credentials)
                .build()
                .await
                .map_err(|e| KmsError::Session {
                    provider: KmsProvider::Gcp.name(),
                    reason: e.to_string(),
                })?;
            Ok::<_, Error>(client)
        })?;

        Ok(Self {
            resource_name,
            client,
            runtime,
        })
    }
}

async fn application_default_credentials() -> Result<Credentials> {
    let credentials = credentials::Builder::default()
        .with_scopes([GCP_CLOUD_PLATFORM_SCOPE])
        .build()
        .map_err(|e| KmsError::Auth(format!("no application-default credentials: {}", e)))?;

    // Falls back to the metadata server when nothing is on disk, so only a
    // token fetch tells whether an account is actually available.
    credentials.headers(Extensions::new()).await.map_err(|e| {
        KmsError::Auth(format!("no usable application-default credentials: {}", e))
    })?;

    Ok(credentials)
}

fn service_account_credentials(path: &Path) -> Result<Credentials> {
    let data = std::fs::read(path).map_err(|source| KmsError::KeyFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |reason: String| KmsError::KeyFileParse {
        path: path.to_path_buf(),
        reason,
    };

    let json: serde_json::Value =
        serde_json::from_slice(&data).map_err(|e| parse_error(e.to_string()))?;

    let credentials = service_account::Builder::new(json)
        .with_access_specifier(service_account::AccessSpecifier::from_scopes([
            GCP_CLOUD_PLATFORM_SCOPE,
        ]))
        .build()
        .map_err(|e| parse_error(e.to_string()))?;

    Ok(credentials)
}

impl KmsBackend for GcpKms {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        trace!(
            resource = %self.resource_name,
            plaintext_len = plaintext.len(),
            "encrypting with GCP KMS"
        );

        let response = self
            .runtime
            .block_on(
                self.client
                    .encrypt()
                    .set_name(&self.resource_name)
                    .set_plaintext(plaintext.to_vec())
                    .send(),
            )
            .map_err(|e| KmsError::Encryption(format!("GCP KMS encrypt failed: {}", e)))?;

        trace!(ciphertext_len = response.ciphertext.len(), "encrypted with GCP KMS");
        Ok(response.ciphertext.to_vec())
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        trace!(
            resource = %self.resource_name,
            ciphertext_len = ciphertext.len(),
            "decrypting with GCP KMS"
        );

        let response = self
            .runtime
            .block_on(
                self.client
                    .decrypt()
                    .set_name(&self.resource_name)
                    .set_ciphertext(ciphertext.to_vec())
                    .send(),
            )
            .map_err(|e| KmsError::Decryption(format!("GCP KMS decrypt failed: {}", e)))?;

        trace!(plaintext_len = response.plaintext.len(), "decrypted with GCP KMS");
        Ok(response.plaintext.to_vec())
    }

    fn provider(&self) -> KmsProvider {
        KmsProvider::Gcp
    }
}
