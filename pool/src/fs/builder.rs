use crate::error::BuildError;
use crate::fs::pool::FilesystemItemPool;

use std::fs;
use std::path::PathBuf;

use tracing::debug;

/// Owner read/write, group and other read.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// A builder for [`FilesystemItemPool`].
#[derive(Debug, Clone)]
pub struct FilesystemPoolBuilder {
  dir: PathBuf,
  file_mode: u32,
  create_dir: bool,
}

impl FilesystemPoolBuilder {
  /// Starts a builder for a pool rooted at `dir`.
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self {
      dir: dir.into(),
      file_mode: DEFAULT_FILE_MODE,
      create_dir: false,
    }
  }

  /// Sets the permission bits for newly created cache files.
  ///
  /// Only honoured on unix. Existing files keep their permissions when they
  /// are overwritten.
  pub fn file_mode(mut self, mode: u32) -> Self {
    self.file_mode = mode;
    self
  }

  /// Creates the directory (and its parents) at build time if it is missing,
  /// instead of failing.
  pub fn create_dir(mut self, create: bool) -> Self {
    self.create_dir = create;
    self
  }

  /// Builds the pool, checking that the directory exists and is a directory.
  pub fn build(self) -> Result<FilesystemItemPool, BuildError> {
    if self.create_dir {
      fs::create_dir_all(&self.dir).map_err(|source| BuildError::CreateDirectory {
        path: self.dir.clone(),
        source,
      })?;
    }

    let metadata = fs::metadata(&self.dir).map_err(|source| BuildError::DirectoryUnreadable {
      path: self.dir.clone(),
      source,
    })?;

    if !metadata.is_dir() {
      return Err(BuildError::NotADirectory { path: self.dir });
    }

    debug!(dir = %self.dir.display(), mode = self.file_mode, "opened filesystem item pool");
    Ok(FilesystemItemPool::from_parts(self.dir, self.file_mode))
  }
}
