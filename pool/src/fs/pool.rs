use crate::error::BuildError;
use crate::fs::builder::FilesystemPoolBuilder;
use crate::fs::item::FilesystemItem;
use crate::fs::status::{self, FileStatus};
use crate::item::Item;
use crate::pool::ItemPool;
use crate::queue::DeferredQueue;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::error;

/// An item pool backed by a directory, one file per key.
///
/// Keys are used verbatim as file names and must therefore be valid single
/// path segments; see [`validate_key`](crate::key::validate_key). Handles for
/// invalid keys can still be created, but every operation on them fails.
///
/// No locking is performed: concurrent writers to the same key race the way
/// the file system lets them.
#[derive(Debug)]
pub struct FilesystemItemPool {
  dir: Arc<Path>,
  file_mode: u32,
  queue: DeferredQueue<FilesystemItem>,
}

impl FilesystemItemPool {
  /// Opens a pool over an existing directory with default settings.
  pub fn new(dir: impl Into<PathBuf>) -> Result<Self, BuildError> {
    FilesystemPoolBuilder::new(dir).build()
  }

  /// Returns a builder for a pool rooted at `dir`.
  pub fn builder(dir: impl Into<PathBuf>) -> FilesystemPoolBuilder {
    FilesystemPoolBuilder::new(dir)
  }

  pub(crate) fn from_parts(dir: PathBuf, file_mode: u32) -> Self {
    Self {
      dir: Arc::from(dir),
      file_mode,
      queue: DeferredQueue::new(),
    }
  }

  /// The directory holding the cache files.
  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// The permission bits used for newly created files.
  pub fn file_mode(&self) -> u32 {
    self.file_mode
  }

  /// Inspects the file behind `key` without collapsing the outcome to a
  /// boolean.
  pub fn status(&self, key: &str) -> FileStatus {
    status::stat(&self.dir, key)
  }

  fn write(&self, path: &Path, value: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
      use std::os::unix::fs::OpenOptionsExt;
      options.mode(self.file_mode);
    }

    let mut file = options.open(path)?;
    file.write_all(value)?;
    file.flush()
  }
}

impl ItemPool for FilesystemItemPool {
  type Value = Vec<u8>;
  type Item = FilesystemItem;

  fn get_item(&self, key: &str) -> FilesystemItem {
    FilesystemItem::new(self.dir.clone(), key)
  }

  fn has_item(&self, key: &str) -> bool {
    self.status(key).exists()
  }

  fn clear(&self) -> bool {
    let entries = match fs::read_dir(&self.dir) {
      Ok(entries) => entries,
      Err(e) => {
        error!(dir = %self.dir.display(), error = %e, "failed to read cache directory");
        return false;
      }
    };

    let mut success = true;
    for entry in entries {
      match entry {
        Ok(entry) => {
          if !status::remove(&entry.path()) {
            success = false;
          }
        }
        Err(e) => {
          error!(dir = %self.dir.display(), error = %e, "failed to read cache directory entry");
          success = false;
        }
      }
    }
    success
  }

  fn delete_item(&self, key: &str) -> bool {
    match status::entry_path(&self.dir, key) {
      Some(path) => status::remove(&path),
      None => false,
    }
  }

  fn save(&self, item: &FilesystemItem) -> bool {
    let Some(path) = status::entry_path(&self.dir, item.key()) else {
      return false;
    };

    match self.write(&path, &item.get()) {
      Ok(()) => true,
      Err(e) => {
        error!(path = %path.display(), error = %e, "failed to write cache file");
        false
      }
    }
  }

  fn save_deferred(&self, item: &FilesystemItem) -> bool {
    self.queue.push(item.clone());
    true
  }

  fn commit(&self) -> bool {
    self.queue.commit(|item| self.save(item))
  }

  fn deferred_len(&self) -> usize {
    self.queue.len()
  }
}
