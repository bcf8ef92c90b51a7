//! Private file writes.

use std::fs;
use std::io;
use std::path::Path;

#[cfg(unix)]
use super::constants::PRIVATE_FILE_MODE;

/// Write `contents` to `path`, replacing it, and restrict it to the owner.
///
/// New files are created with the private mode; the mode is applied again
/// afterwards so files that already existed with looser permissions are
/// tightened too.
pub fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .mode(PRIVATE_FILE_MODE)
            .open(path)?;
        file.write_all(contents)?;
        file.flush()?;

        fs::set_permissions(path, fs::Permissions::from_mode(PRIVATE_FILE_MODE))?;
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents)?;
    }

    Ok(())
}
