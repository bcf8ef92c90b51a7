//! Per-invocation session.
//!
//! Owns the loaded profile and at most one authenticated client per
//! provider. A client is built the first time an operation needs it and
//! reused for the rest of the run.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::Config;
use crate::core::kms::{self, KmsBackend, KmsProvider};
use crate::core::{codec, walk};
use crate::error::{Error, Result};

pub struct Session {
    config: Config,
    gcp: Option<Box<dyn KmsBackend>>,
    aws: Option<Box<dyn KmsBackend>>,
}

impl Session {
    /// Open a session on the profile at `config_path`.
    ///
    /// # Errors
    ///
    /// `InvalidArguments` for an empty path, or the `Config::load` error.
    pub fn open(config_path: &Path) -> Result<Self> {
        if config_path.as_os_str().is_empty() {
            return Err(Error::InvalidArguments(vec!["config"]));
        }
        Ok(Self::new(Config::load(config_path)?))
    }

    pub fn new(config: Config) -> Self {
        Self {
            config,
            gcp: None,
            aws: None,
        }
    }

    /// Use `backend` instead of connecting to the real provider.
    #[cfg(any(test, feature = "test-kms"))]
    pub fn with_backend(mut self, backend: Box<dyn KmsBackend>) -> Self {
        match backend.provider() {
            KmsProvider::Gcp => self.gcp = Some(backend),
            KmsProvider::Aws => self.aws = Some(backend),
        }
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Return the client for `provider`, connecting on first use.
    pub fn ensure(&mut self, provider: KmsProvider) -> Result<&dyn KmsBackend> {
        let slot = match provider {
            KmsProvider::Gcp => &mut self.gcp,
            KmsProvider::Aws => &mut self.aws,
        };

        let backend = match slot.take() {
            Some(backend) => backend,
            None => {
                debug!(%provider, "initializing provider client");
                kms::connect(provider, &self.config)?
            }
        };

        Ok(&**slot.insert(backend))
    }

    /// Encrypt one file. See [`codec::encrypt_file`].
    pub fn encrypt(
        &mut self,
        provider: KmsProvider,
        path: &Path,
        extension: &str,
    ) -> Result<PathBuf> {
        require_path(path, "file")?;
        codec::encrypt_file(self.ensure(provider)?, path, extension)
    }

    /// Decrypt one file. See [`codec::decrypt_file`].
    pub fn decrypt(
        &mut self,
        provider: KmsProvider,
        path: &Path,
        extension: &str,
    ) -> Result<PathBuf> {
        require_path(path, "file")?;
        codec::decrypt_file(self.ensure(provider)?, path, extension)
    }

    /// Re-encrypt a tree. See [`walk::re_encrypt`].
    pub fn re_encrypt(
        &mut self,
        provider: KmsProvider,
        dir: &Path,
        extension: &str,
    ) -> Result<usize> {
        require_path(dir, "dir")?;
        walk::re_encrypt(self.ensure(provider)?, dir, extension)
    }

    /// Re-decrypt a tree. See [`walk::re_decrypt`].
    pub fn re_decrypt(
        &mut self,
        provider: KmsProvider,
        dir: &Path,
        extension: &str,
    ) -> Result<usize> {
        require_path(dir, "dir")?;
        walk::re_decrypt(self.ensure(provider)?, dir, extension)
    }
}

/// Inputs are checked before any client is built.
fn require_path(path: &Path, name: &'static str) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidArguments(vec![name]));
    }
    Ok(())
}
