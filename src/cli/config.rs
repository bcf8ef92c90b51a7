//! Config command - write provider profiles.

use std::path::Path;

use crate::cli::output;
use crate::cli::{AwsMethod, ConfigProvider, GcpMethod};
use crate::core::config;
use crate::error::Result;

/// Write the requested provider section.
pub fn execute(provider: ConfigProvider) -> Result<()> {
    match provider {
        ConfigProvider::Gcp { method } => match method {
            GcpMethod::GcloudAccount { key } => {
                config::configure_gcp_gcloud_account(
                    &key.config,
                    &key.project,
                    &key.location,
                    &key.keyring,
                    &key.key,
                )?;
                written(&key.config, "gcp", "gcloud account")
            }
            GcpMethod::ServiceAccount {
                key,
                service_account_key,
            } => {
                config::configure_gcp_service_account(
                    &key.config,
                    &key.project,
                    &key.location,
                    &key.keyring,
                    &key.key,
                    &service_account_key,
                )?;
                written(&key.config, "gcp", "service account")
            }
        },
        ConfigProvider::Aws { method } => match method {
            AwsMethod::StaticCreds {
                config: path,
                access_key_id,
                secret_access_key,
                access_token,
                region,
                key,
            } => {
                config::configure_aws_static_creds(
                    &path,
                    &access_key_id,
                    &secret_access_key,
                    &access_token,
                    &region,
                    &key,
                )?;
                written(&path, "aws", "static credentials")
            }
            AwsMethod::SharedCreds {
                config: path,
                cred_file,
                profile,
                region,
                key,
            } => {
                config::configure_aws_shared_creds(&path, &cred_file, &profile, &region, &key)?;
                written(&path, "aws", "shared credentials")
            }
        },
    }
}

fn written(path: &Path, provider: &str, method: &str) -> Result<()> {
    output::success(&format!(
        "wrote {} config ({}) to {}",
        provider,
        method,
        output::path(&path.display().to_string())
    ));
    Ok(())
}
