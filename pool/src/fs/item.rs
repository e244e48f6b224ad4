use crate::fs::status::{self, FileStatus};
use crate::item::Item;
use crate::time::{self, Expiration};

use core::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{error, warn};

/// A cache entry whose value is the content of `<dir>/<key>`.
///
/// The file is read at most once per handle, on the first [`Item::get`]
/// that succeeds. Clones share that cached value and the expiration.
#[derive(Clone)]
pub struct FilesystemItem {
  inner: Arc<ItemInner>,
}

struct ItemInner {
  dir: Arc<Path>,
  key: String,
  state: Mutex<ItemState>,
}

#[derive(Default)]
struct ItemState {
  value: Option<Vec<u8>>,
  expiration: Option<Expiration>,
}

impl fmt::Debug for FilesystemItem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = self.inner.state.lock();
    f.debug_struct("FilesystemItem")
      .field("dir", &self.inner.dir)
      .field("key", &self.inner.key)
      .field("loaded", &state.value.is_some())
      .field("expiration", &state.expiration)
      .finish()
  }
}

impl FilesystemItem {
  pub(crate) fn new(dir: Arc<Path>, key: &str) -> Self {
    Self {
      inner: Arc::new(ItemInner {
        dir,
        key: key.to_owned(),
        state: Mutex::new(ItemState::default()),
      }),
    }
  }

  /// The file backing this item, or `None` if the key is not a valid file
  /// name.
  pub fn path(&self) -> Option<PathBuf> {
    status::entry_path(&self.inner.dir, &self.inner.key)
  }

  /// Returns `true` if both handles refer to the same entry state.
  pub fn ptr_eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }

  fn load(&self) -> Option<Vec<u8>> {
    let path = self.path()?;
    match fs::read(&path) {
      Ok(bytes) => Some(bytes),
      Err(e) => {
        error!(path = %path.display(), error = %e, "failed to read cache file");
        None
      }
    }
  }
}

/// Hit rule for a file that exists. Anchored to the write time: a file
/// touched after the expiration instant is stale even if the instant is
/// still ahead of us. Without a write time only the instant is checked.
fn is_fresh(expiration: Option<Expiration>, modified: Option<Expiration>) -> bool {
  match (expiration, modified) {
    (None, _) => true,
    (Some(expiration), Some(modified)) => expiration >= modified && time::is_pending(expiration),
    (Some(expiration), None) => time::is_pending(expiration),
  }
}

impl Item<Vec<u8>> for FilesystemItem {
  fn key(&self) -> &str {
    &self.inner.key
  }

  fn get(&self) -> Vec<u8> {
    let mut state = self.inner.state.lock();
    if state.value.is_none() {
      state.value = self.load();
    }
    state.value.clone().unwrap_or_default()
  }

  fn is_hit(&self) -> bool {
    let expiration = self.inner.state.lock().expiration;

    let modified = match status::stat(&self.inner.dir, &self.inner.key) {
      FileStatus::Present { modified } => modified,
      _ => return false,
    };

    if expiration.is_some() && modified.is_none() {
      warn!(key = %self.inner.key, "file modification time unavailable, checking expiration against now only");
    }
    is_fresh(expiration, modified)
  }

  fn set(&self, value: Vec<u8>) {
    self.inner.state.lock().value = Some(value);
  }

  fn expires_at(&self, expiration: Expiration) {
    self.inner.state.lock().expiration = Some(expiration);
  }

  fn expiration(&self) -> Option<Expiration> {
    self.inner.state.lock().expiration
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn item_in(dir: &Path, key: &str) -> FilesystemItem {
    FilesystemItem::new(Arc::from(dir), key)
  }

  #[test]
  fn test_get_loads_once() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("k"), b"first").unwrap();

    let item = item_in(dir.path(), "k");
    assert_eq!(item.get(), b"first".to_vec());

    // The handle keeps what it loaded.
    fs::write(dir.path().join("k"), b"second").unwrap();
    assert_eq!(item.get(), b"first".to_vec());
    assert_eq!(item_in(dir.path(), "k").get(), b"second".to_vec());
  }

  #[test]
  fn test_failed_read_is_retried() {
    let dir = tempfile::tempdir().unwrap();
    let item = item_in(dir.path(), "late");
    assert!(item.get().is_empty());

    fs::write(dir.path().join("late"), b"now here").unwrap();
    assert_eq!(item.get(), b"now here".to_vec());
  }

  #[test]
  fn test_set_does_not_write() {
    let dir = tempfile::tempdir().unwrap();
    let item = item_in(dir.path(), "k");
    item.set(b"value".to_vec());

    assert_eq!(item.get(), b"value".to_vec());
    assert!(!dir.path().join("k").exists());
    assert!(!item.is_hit());
  }

  #[test]
  fn test_clones_share_state() {
    let dir = tempfile::tempdir().unwrap();
    let item = item_in(dir.path(), "k");
    let clone = item.clone();

    clone.set(vec![7]);
    clone.expires_after(std::time::Duration::from_secs(5));

    assert!(item.ptr_eq(&clone));
    assert_eq!(item.get(), vec![7]);
    assert!(item.expiration().is_some());
  }

  #[test]
  fn test_freshness_without_modification_time() {
    let past = time::now() - chrono::Duration::seconds(1);
    let future = time::after(std::time::Duration::from_secs(60));

    assert!(is_fresh(None, None));
    assert!(is_fresh(Some(future), None));
    assert!(!is_fresh(Some(past), None), "Expired even when mtime is unknown");
  }

  #[test]
  fn test_freshness_is_anchored_to_modification_time() {
    let now = time::now();
    let future = time::after(std::time::Duration::from_secs(60));
    let later = future + chrono::Duration::seconds(60);

    assert!(is_fresh(Some(future), Some(now)));
    assert!(!is_fresh(Some(future), Some(later)));
    assert!(!is_fresh(Some(now - chrono::Duration::seconds(1)), Some(now - chrono::Duration::seconds(2))));
  }
}
