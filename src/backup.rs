use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{PatchError, Result};

pub fn backup_path(path: &Path) -> PathBuf {
    let mut backup: OsString = path.as_os_str().to_owned();
    backup.push(".bak");
    PathBuf::from(backup)
}

/// Copies `path` to `<path>.bak`, replacing any earlier backup.
pub fn backup(path: &Path) -> Result<PathBuf> {
    let target = backup_path(path);

    match fs::copy(path, &target) {
        Ok(n) => {
            info!("Backed up {:?} to {:?} ({} bytes)", path, target, n);
            Ok(target)
        }
        Err(source) => Err(PatchError::BackupFailed { path: target, source }),
    }
}
