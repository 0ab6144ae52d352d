//! Whole-file replacement through a scratch file and rename

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::error;

/// Scratch file written before it replaces `path`
///
/// The suffix goes on the full file name, so `accounts.tmp` gets
/// `accounts.tmp.tmp` and never aliases the file it replaces.
pub(crate) fn scratch_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Replace the contents of `path` with `contents`
///
/// The data is synced to the scratch file before the rename. On failure the
/// scratch file is removed and `path` keeps its previous contents.
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let temp_path = scratch_path(path);

    let written = File::create(&temp_path).and_then(|mut file| {
        file.write_all(contents)?;
        file.sync_all()
    });

    written
        .and_then(|()| fs::rename(&temp_path, path))
        .map_err(|e| {
            error!("Failed to write {:?}: {}", path, e);
            let _ = fs::remove_file(&temp_path);
            e
        })
}
