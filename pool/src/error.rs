use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when building an item pool.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The cache directory could not be stat'd.
  #[error("cache directory '{}' is unreadable: {source}", .path.display())]
  DirectoryUnreadable {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The cache path exists but is not a directory.
  #[error("cache directory '{}' is not a directory", .path.display())]
  NotADirectory { path: PathBuf },

  /// The builder was asked to create the cache directory and failed.
  #[error("failed to create cache directory '{}': {source}", .path.display())]
  CreateDirectory {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The in-memory pool was configured with zero shards.
  #[error("shard count cannot be zero")]
  ZeroShards,

  /// The requested shard count has no power of two representable in `usize`.
  #[error("shard count {requested} is too large")]
  TooManyShards { requested: usize },
}

/// Why a key cannot be used as a file name inside a cache directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeyError {
  #[error("cache key is empty")]
  Empty,
  #[error("cache key '.' and '..' are reserved")]
  Reserved,
  #[error("cache key contains a path separator")]
  Separator,
  #[error("cache key contains a NUL byte")]
  Nul,
}

/// The two ways [`cacheable`](crate::cacheable) can fail.
///
/// `Producer` means nothing was computed and nothing was stored. `Save` means
/// the value was computed but could not be written to the pool.
#[derive(Debug, Error)]
pub enum CacheableError<E> {
  #[error("failed to call producer")]
  Producer(#[source] E),

  #[error("cannot save item '{key}' into item pool")]
  Save { key: String },
}

impl<E> CacheableError<E> {
  /// Returns `true` if the producer itself failed.
  pub fn is_producer(&self) -> bool {
    matches!(self, CacheableError::Producer(_))
  }

  /// Returns `true` if the value was produced but persisting it failed.
  pub fn is_save(&self) -> bool {
    matches!(self, CacheableError::Save { .. })
  }
}
