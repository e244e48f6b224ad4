use crate::key::validate_key;
use crate::time::{self, Expiration};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{error, warn};

/// The outcome of inspecting the file behind a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
  /// The file exists. `modified` is `None` if the platform cannot report
  /// modification times.
  Present { modified: Option<Expiration> },
  /// There is no file for the key.
  Missing,
  /// The file could not be inspected for another OS reason.
  Failed,
  /// The key is not a valid file name.
  InvalidKey,
}

impl FileStatus {
  #[inline]
  pub fn exists(&self) -> bool {
    matches!(self, FileStatus::Present { .. })
  }
}

/// Resolves the file path for `key`, or logs and returns `None` if the key
/// would escape the directory.
pub(crate) fn entry_path(dir: &Path, key: &str) -> Option<PathBuf> {
  match validate_key(key) {
    Ok(()) => Some(dir.join(key)),
    Err(error) => {
      warn!(dir = %dir.display(), key, %error, "rejecting cache key");
      None
    }
  }
}

/// Stats the file for `key`. Not-found is silent, other failures are logged.
pub(crate) fn stat(dir: &Path, key: &str) -> FileStatus {
  let Some(path) = entry_path(dir, key) else {
    return FileStatus::InvalidKey;
  };

  match fs::metadata(&path) {
    Ok(metadata) => FileStatus::Present {
      modified: metadata.modified().ok().map(time::from_system_time),
    },
    Err(e) if e.kind() == io::ErrorKind::NotFound => FileStatus::Missing,
    Err(e) => {
      error!(path = %path.display(), error = %e, "failed to get file stat");
      FileStatus::Failed
    }
  }
}

/// Removes a single file, logging any failure (including not-found).
pub(crate) fn remove(path: &Path) -> bool {
  match fs::remove_file(path) {
    Ok(()) => true,
    Err(e) => {
      error!(path = %path.display(), error = %e, "cannot delete cache item");
      false
    }
  }
}
