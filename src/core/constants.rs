//! Constants used throughout cloudkey.

/// Extension appended to encrypted files when none is given.
pub const DEFAULT_EXTENSION: &str = ".crypted";

/// OAuth scope requested for Cloud KMS access.
pub const GCP_CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Environment variable read for the log filter.
pub const LOG_ENV: &str = "CLOUDKEY_LOG";

/// Mode applied to every file cloudkey writes (owner read/write).
#[cfg(unix)]
pub const PRIVATE_FILE_MODE: u32 = 0o600;

/// Resolve an extension argument, falling back to [`DEFAULT_EXTENSION`].
pub fn extension_or_default(extension: &str) -> &str {
    if extension.is_empty() {
        DEFAULT_EXTENSION
    } else {
        extension
    }
}
