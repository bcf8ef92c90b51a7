//! Recursive re-encrypt / re-decrypt.
//!
//! Both walks visit the tree depth-first in file-name order and stop at
//! the first error. Their selection policies differ:
//!
//! - re-encrypt refreshes a plaintext file `f` only when `f + extension`
//!   already exists, so files never encrypted before are left alone
//! - re-decrypt decrypts every file whose path ends with `extension`

use std::path::Path;

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::core::codec::{decrypt_file, encrypt_file, encrypted_path};
use crate::core::constants::extension_or_default;
use crate::core::kms::KmsBackend;
use crate::error::{Error, Result};

/// Visit every non-directory under `dir`, calling `visit` on those
/// `select` accepts. Returns how many were visited.
fn walk(
    dir: &Path,
    select: impl Fn(&Path) -> bool,
    mut visit: impl FnMut(&Path) -> Result<()>,
) -> Result<usize> {
    if dir.as_os_str().is_empty() {
        return Err(Error::InvalidArguments(vec!["dir"]));
    }

    let mut count = 0;
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if select(path) {
            visit(path)?;
            count += 1;
        } else {
            trace!(path = %path.display(), "skipped");
        }
    }

    Ok(count)
}

/// Re-encrypt every file under `dir` that already has an encrypted sibling.
///
/// # Errors
///
/// `InvalidArguments` for an empty `dir`; otherwise the first traversal or
/// per-file error, after which no further files are touched.
pub fn re_encrypt(kms: &dyn KmsBackend, dir: &Path, extension: &str) -> Result<usize> {
    let extension = extension_or_default(extension);
    debug!(dir = %dir.display(), extension, "re-encrypting");

    walk(
        dir,
        |path| encrypted_path(path, extension).exists(),
        |path| encrypt_file(kms, path, extension).map(drop),
    )
}

/// Decrypt every file under `dir` whose path ends with `extension`.
///
/// # Errors
///
/// `InvalidArguments` for an empty `dir`; otherwise the first traversal or
/// per-file error, after which no further files are touched.
pub fn re_decrypt(kms: &dyn KmsBackend, dir: &Path, extension: &str) -> Result<usize> {
    let extension = extension_or_default(extension);
    debug!(dir = %dir.display(), extension, "re-decrypting");

    walk(
        dir,
        |path| {
            path.as_os_str()
                .as_encoded_bytes()
                .ends_with(extension.as_bytes())
        },
        |path| decrypt_file(kms, path, extension).map(drop),
    )
}
