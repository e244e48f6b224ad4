mod common;

use common::{new_fs_pool, new_memory_pool};
use fibre_pool::{cacheable, CacheableError, Item, ItemPool};
use std::cell::Cell;
use std::io;
use std::time::Duration;

#[test]
fn test_fs_cacheable_computes_once() {
  let (_dir, pool) = new_fs_pool();
  let calls = Cell::new(0);

  let first = cacheable(&pool, "example2~", |item| {
    calls.set(calls.get() + 1);
    item.expires_after(Duration::from_secs(60));
    Ok::<_, io::Error>(b"some value".to_vec())
  })
  .unwrap();
  assert_eq!(first, b"some value".to_vec());
  assert!(pool.get_item("example2~").is_hit());

  let second = cacheable(&pool, "example2~", |_| {
    calls.set(calls.get() + 1);
    Ok::<_, io::Error>(b"different".to_vec())
  })
  .unwrap();
  assert_eq!(second, b"some value".to_vec());
  assert_eq!(calls.get(), 1, "Producer must run exactly once");
}

#[test]
fn test_memory_cacheable_computes_once() {
  let pool = new_memory_pool::<u64>();
  let calls = Cell::new(0);

  for _ in 0..3 {
    let value = cacheable(&pool, "answer", |_| {
      calls.set(calls.get() + 1);
      Ok::<_, io::Error>(calls.get() * 10)
    })
    .unwrap();
    assert_eq!(value, 10);
  }
  assert_eq!(calls.get(), 1);
}

#[test]
fn test_cacheable_producer_sets_expiration() {
  let pool = new_memory_pool::<u64>();

  let value = cacheable(&pool, "short", |item| {
    item.expires_after(Duration::from_millis(100));
    Ok::<_, io::Error>(1)
  })
  .unwrap();
  assert_eq!(value, 1);
  assert!(pool.get_item("short").expiration().is_some());

  std::thread::sleep(Duration::from_millis(250));

  // Expired, so the producer runs again.
  let value = cacheable(&pool, "short", |_| Ok::<_, io::Error>(2)).unwrap();
  assert_eq!(value, 2);
}

#[test]
fn test_cacheable_producer_failure_stores_nothing() {
  let (_dir, pool) = new_fs_pool();

  let err = cacheable(&pool, "broken", |_| {
    Err(io::Error::new(io::ErrorKind::Other, "upstream unavailable"))
  })
  .unwrap_err();

  assert!(err.is_producer());
  match err {
    CacheableError::Producer(inner) => assert_eq!(inner.to_string(), "upstream unavailable"),
    other => panic!("unexpected error {:?}", other),
  }
  assert!(!pool.has_item("broken"));
}

#[test]
fn test_cacheable_save_failure_is_distinct() {
  let (_dir, pool) = new_fs_pool();
  let calls = Cell::new(0);

  let err = cacheable(&pool, "not/a/file", |_| {
    calls.set(calls.get() + 1);
    Ok::<_, io::Error>(vec![1, 2, 3])
  })
  .unwrap_err();

  assert!(err.is_save());
  assert!(!err.is_producer());
  assert_eq!(calls.get(), 1);
  assert!(err.to_string().contains("not/a/file"));
}

#[test]
fn test_cacheable_error_chains_producer_source() {
  use std::error::Error;

  let pool = new_memory_pool::<u8>();
  let err = cacheable(&pool, "k", |_| {
    Err::<u8, _>(io::Error::new(io::ErrorKind::NotFound, "missing input"))
  })
  .unwrap_err();

  assert_eq!(err.to_string(), "failed to call producer");
  assert_eq!(err.source().unwrap().to_string(), "missing input");
}

// Delegates to an in-memory pool but overwrites the shared item right after
// saving it, the way a concurrent writer holding the same handle could.
struct OverwritingPool(fibre_pool::InMemoryItemPool<u32>);

impl ItemPool for OverwritingPool {
  type Value = u32;
  type Item = fibre_pool::InMemoryItem<u32>;

  fn get_item(&self, key: &str) -> Self::Item {
    self.0.get_item(key)
  }
  fn has_item(&self, key: &str) -> bool {
    self.0.has_item(key)
  }
  fn clear(&self) -> bool {
    self.0.clear()
  }
  fn delete_item(&self, key: &str) -> bool {
    self.0.delete_item(key)
  }
  fn save(&self, item: &Self::Item) -> bool {
    let saved = self.0.save(item);
    item.set(0);
    saved
  }
  fn save_deferred(&self, item: &Self::Item) -> bool {
    self.0.save_deferred(item)
  }
  fn commit(&self) -> bool {
    self.0.commit()
  }
  fn deferred_len(&self) -> usize {
    self.0.deferred_len()
  }
}

#[test]
fn test_cacheable_returns_the_produced_value() {
  let pool = OverwritingPool(new_memory_pool::<u32>());

  let value = cacheable(&pool, "k", |_| Ok::<_, io::Error>(41)).unwrap();
  assert_eq!(value, 41);
  assert_eq!(pool.get_item("k").get(), 0, "Stored item was changed after the save");
}
