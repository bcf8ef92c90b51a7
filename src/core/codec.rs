//! Single-file encrypt and decrypt.
//!
//! Output paths are derived asymmetrically:
//!
//! - encrypt appends the extension: `notes.txt` → `notes.txt.crypted`
//! - decrypt removes the first occurrence of the extension anywhere in the
//!   path: `notes.crypted` → `notes`, `a.crypted.txt` → `a.txt`. A path
//!   without the extension is written back in place.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::constants::extension_or_default;
use crate::core::fs::write_private;
use crate::core::kms::KmsBackend;
use crate::error::{Error, Result};

/// Path an encrypted copy of `path` is written to.
pub fn encrypted_path(path: &Path, extension: &str) -> PathBuf {
    let mut out = path.as_os_str().to_os_string();
    out.push(extension_or_default(extension));
    PathBuf::from(out)
}

/// Path the plaintext of `path` is written to.
///
/// The search runs on the raw path bytes, so names that aren't valid
/// UTF-8 map back to the exact original.
pub fn decrypted_path(path: &Path, extension: &str) -> PathBuf {
    let extension = extension_or_default(extension).as_bytes();
    let raw = path.as_os_str().as_encoded_bytes();

    match raw.windows(extension.len()).position(|w| w == extension) {
        Some(i) => {
            let mut out = raw[..i].to_vec();
            out.extend_from_slice(&raw[i + extension.len()..]);
            path_from_bytes(out)
        }
        None => path.to_path_buf(),
    }
}

#[cfg(unix)]
fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;
    PathBuf::from(OsString::from_vec(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(&bytes).into_owned())
}

fn ensure_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidArguments(vec!["file"]));
    }
    Ok(())
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &[u8]) -> Result<()> {
    write_private(path, contents).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Encrypt `path` with `kms` and write the ciphertext next to it.
///
/// Returns the path written.
///
/// # Errors
///
/// `InvalidArguments` for an empty path, `FileRead`/`FileWrite` for I/O
/// failures, and `KmsError::Encryption` if the provider rejects the call.
pub fn encrypt_file(kms: &dyn KmsBackend, path: &Path, extension: &str) -> Result<PathBuf> {
    ensure_path(path)?;
    debug!(path = %path.display(), provider = %kms.provider(), "encrypting file");

    let plaintext = Zeroizing::new(read(path)?);
    let ciphertext = kms.encrypt(&plaintext)?;

    let output = encrypted_path(path, extension);
    write(&output, &ciphertext)?;

    info!("encrypted file created: {}", output.display());
    Ok(output)
}

/// Decrypt `path` with `kms` and write the plaintext to the derived path.
///
/// Returns the path written.
///
/// # Errors
///
/// `InvalidArguments` for an empty path, `FileRead`/`FileWrite` for I/O
/// failures, and `KmsError::Decryption` if the provider rejects the call.
pub fn decrypt_file(kms: &dyn KmsBackend, path: &Path, extension: &str) -> Result<PathBuf> {
    ensure_path(path)?;
    debug!(path = %path.display(), provider = %kms.provider(), "decrypting file");

    let ciphertext = read(path)?;
    let plaintext = Zeroizing::new(kms.decrypt(&ciphertext)?);

    let output = decrypted_path(path, extension);
    write(&output, &plaintext)?;

    info!("decrypted file created: {}", output.display());
    Ok(output)
}
