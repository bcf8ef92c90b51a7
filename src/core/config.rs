//! Configuration file management.
//!
//! A profile holds one section per provider. Each `configure_*` function
//! validates its arguments, loads the existing file (if any), replaces one
//! section wholesale and writes the file back. The other section is kept
//! as it was.
//!
//! ```toml
//! [GcpConfig]
//! UseGcloudAccount = true
//! UseServiceAccount = false
//! Project = "my-project"
//! Location = "global"
//! Keyring = "my-ring"
//! Cryptokey = "my-key"
//! ServiceAccountKey = ""
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::core::fs::write_private;
use crate::error::{ConfigError, Error, Result};

/// Persisted profile.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "GcpConfig")]
    pub gcp_config: GcpConfig,
    #[serde(rename = "AwsConfig")]
    pub aws_config: AwsConfig,
}

/// GCP Cloud KMS section.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GcpConfig {
    /// Authenticate with application-default (gcloud) credentials
    pub use_gcloud_account: bool,
    /// Authenticate with a service account key file
    pub use_service_account: bool,
    pub project: String,
    pub location: String,
    pub keyring: String,
    pub cryptokey: String,
    /// Path to the service account JSON key
    pub service_account_key: String,
}

impl GcpConfig {
    /// Full crypto key resource name used to address Cloud KMS.
    pub fn resource_name(&self) -> String {
        format!(
            "projects/{}/locations/{}/keyRings/{}/cryptoKeys/{}",
            self.project, self.location, self.keyring, self.cryptokey
        )
    }
}

/// AWS KMS section.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AwsConfig {
    /// Authenticate with the inline key id / secret / token
    pub use_static_creds: bool,
    /// Authenticate with a shared credentials file and profile
    pub use_shared_creds: bool,
    #[serde(rename = "AccessKeyID")]
    pub access_key_id: String,
    pub secret_access_key: String,
    pub access_token: String,
    pub region: String,
    /// KMS key id, ARN or alias
    #[serde(rename = "CryptoKeyID")]
    pub crypto_key_id: String,
    /// Shared credentials file (empty = SDK default location)
    pub cred_file: String,
    /// Profile in the shared credentials file (empty = default profile)
    pub profile: String,
}

impl Config {
    /// Load the profile at `path`.
    ///
    /// A missing file is not an error: an empty profile is returned so
    /// the first `configure_*` call can create it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file exists but can't be read,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            debug!("config file not found, using empty profile");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(config)
    }

    /// Overwrite `path` with this profile, readable by the owner only.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialize` or `ConfigError::Write`.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        write_private(path, contents.as_bytes()).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }
}

/// Fail with `InvalidArguments` naming every field that isn't present.
fn require(fields: &[(&'static str, bool)]) -> Result<()> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidArguments(missing))
    }
}

/// Replace the section touched by `update` and persist the result.
fn update(path: &Path, update: impl FnOnce(&mut Config)) -> Result<()> {
    let mut config = Config::load(path)?;
    update(&mut config);
    config.save(path)
}

/// Configure GCP with application-default (gcloud) credentials.
pub fn configure_gcp_gcloud_account(
    path: &Path,
    project: &str,
    location: &str,
    keyring: &str,
    cryptokey: &str,
) -> Result<()> {
    require(&[
        ("config", !path.as_os_str().is_empty()),
        ("project", !project.is_empty()),
        ("location", !location.is_empty()),
        ("keyring", !keyring.is_empty()),
        ("key", !cryptokey.is_empty()),
    ])?;

    update(path, |config| {
        config.gcp_config = GcpConfig {
            use_gcloud_account: true,
            project: project.to_string(),
            location: location.to_string(),
            keyring: keyring.to_string(),
            cryptokey: cryptokey.to_string(),
            ..GcpConfig::default()
        };
    })?;

    debug!(project, location, keyring, cryptokey, "configured gcp gcloud account");
    Ok(())
}

/// Configure GCP with a service account key file.
pub fn configure_gcp_service_account(
    path: &Path,
    project: &str,
    location: &str,
    keyring: &str,
    cryptokey: &str,
    service_account_key: &str,
) -> Result<()> {
    require(&[
        ("config", !path.as_os_str().is_empty()),
        ("project", !project.is_empty()),
        ("location", !location.is_empty()),
        ("keyring", !keyring.is_empty()),
        ("key", !cryptokey.is_empty()),
        ("service-account-key", !service_account_key.is_empty()),
    ])?;

    update(path, |config| {
        config.gcp_config = GcpConfig {
            use_service_account: true,
            project: project.to_string(),
            location: location.to_string(),
            keyring: keyring.to_string(),
            cryptokey: cryptokey.to_string(),
            service_account_key: service_account_key.to_string(),
            ..GcpConfig::default()
        };
    })?;

    debug!(key_file = %service_account_key, "configured gcp service account");
    Ok(())
}

/// Configure AWS with static credentials.
///
/// At least one of the key id, secret and token must be set.
pub fn configure_aws_static_creds(
    path: &Path,
    access_key_id: &str,
    secret_access_key: &str,
    access_token: &str,
    region: &str,
    crypto_key_id: &str,
) -> Result<()> {
    let any_credential =
        !(access_key_id.is_empty() && secret_access_key.is_empty() && access_token.is_empty());
    require(&[
        ("config", !path.as_os_str().is_empty()),
        ("access-key-id, secret-access-key or access-token", any_credential),
        ("region", !region.is_empty()),
        ("key", !crypto_key_id.is_empty()),
    ])?;

    update(path, |config| {
        config.aws_config = AwsConfig {
            use_static_creds: true,
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            access_token: access_token.to_string(),
            region: region.to_string(),
            crypto_key_id: crypto_key_id.to_string(),
            ..AwsConfig::default()
        };
    })?;

    debug!(region, "configured aws static credentials");
    Ok(())
}

/// Configure AWS with a shared credentials file and profile.
///
/// Both `cred_file` and `profile` may be empty to use the SDK defaults.
pub fn configure_aws_shared_creds(
    path: &Path,
    cred_file: &str,
    profile: &str,
    region: &str,
    crypto_key_id: &str,
) -> Result<()> {
    require(&[
        ("config", !path.as_os_str().is_empty()),
        ("region", !region.is_empty()),
        ("key", !crypto_key_id.is_empty()),
    ])?;

    update(path, |config| {
        config.aws_config = AwsConfig {
            use_shared_creds: true,
            cred_file: cred_file.to_string(),
            profile: profile.to_string(),
            region: region.to_string(),
            crypto_key_id: crypto_key_id.to_string(),
            ..AwsConfig::default()
        };
    })?;

    debug!(region, profile, "configured aws shared credentials");
    Ok(())
}
