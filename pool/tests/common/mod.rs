#![allow(dead_code)]

use fibre_pool::{FilesystemItemPool, InMemoryItemPool};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness. Safe to call from every
/// test; only the first call installs the subscriber.
pub fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}

/// Builds a filesystem pool over a fresh temporary directory. The directory
/// lives as long as the returned guard.
pub fn new_fs_pool() -> (TempDir, FilesystemItemPool) {
  init_tracing();
  let dir = tempfile::tempdir().unwrap();
  let pool = FilesystemItemPool::new(dir.path()).unwrap();
  (dir, pool)
}

pub fn new_memory_pool<T>() -> InMemoryItemPool<T> {
  init_tracing();
  InMemoryItemPool::builder().shards(4).build().unwrap()
}
