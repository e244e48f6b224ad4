use crate::memory::builder::{default_shards, InMemoryPoolBuilder};
use crate::memory::item::InMemoryItem;
use crate::memory::store::ShardedStore;
use crate::item::Item;
use crate::pool::ItemPool;
use crate::queue::DeferredQueue;

use core::fmt;
use std::hash::BuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};

// Zero is reserved for "no owner".
static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

/// An item pool holding items in a sharded, thread-safe in-process map.
///
/// Every operation is infallible; the `bool` results of the [`ItemPool`]
/// methods are always `true`.
///
/// Saving an item that another pool already holds stores an independent
/// copy, so deleting it from one pool never affects the other.
pub struct InMemoryItemPool<T, H = ahash::RandomState> {
  id: u64,
  store: ShardedStore<InMemoryItem<T>, H>,
  queue: DeferredQueue<InMemoryItem<T>>,
}

impl<T> InMemoryItemPool<T> {
  /// Creates a pool with default settings. Never fails.
  pub fn new() -> Self {
    Self::from_store(ShardedStore::new(default_shards(), ahash::RandomState::new()))
  }

  /// Returns a builder for a pool of `T`.
  pub fn builder() -> InMemoryPoolBuilder<T> {
    InMemoryPoolBuilder::new()
  }
}

impl<T, H> fmt::Debug for InMemoryItemPool<T, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("InMemoryItemPool")
      .field("id", &self.id)
      .field("store", &self.store)
      .field("queue", &self.queue)
      .finish()
  }
}

impl<T> Default for InMemoryItemPool<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T, H> InMemoryItemPool<T, H>
where
  H: BuildHasher + Clone,
{
  pub(crate) fn from_store(store: ShardedStore<InMemoryItem<T>, H>) -> Self {
    Self {
      id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
      store,
      queue: DeferredQueue::new(),
    }
  }

  /// Returns the number of stored items, expired or not.
  pub fn len(&self) -> usize {
    self.store.iter_shards().map(|shard| shard.read().len()).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.store.iter_shards().all(|shard| shard.read().is_empty())
  }

  /// Returns the keys of all stored items, in no particular order.
  pub fn keys(&self) -> Vec<String> {
    self
      .store
      .iter_shards()
      .flat_map(|shard| shard.read().keys().cloned().collect::<Vec<_>>())
      .collect()
  }

  pub fn num_shards(&self) -> usize {
    self.store.num_shards()
  }
}

impl<T, H> ItemPool for InMemoryItemPool<T, H>
where
  T: Clone + Default,
  H: BuildHasher + Clone,
{
  type Value = T;
  type Item = InMemoryItem<T>;

  fn get_item(&self, key: &str) -> InMemoryItem<T> {
    let stored = self.store.shard(key).read().get(key).cloned();
    stored.unwrap_or_else(|| InMemoryItem::new(key))
  }

  fn has_item(&self, key: &str) -> bool {
    self.store.shard(key).read().contains_key(key)
  }

  fn clear(&self) -> bool {
    for shard in self.store.iter_shards() {
      let mut guard = shard.write();
      for (_, item) in guard.drain() {
        item.release(self.id);
      }
    }
    true
  }

  fn delete_item(&self, key: &str) -> bool {
    let mut guard = self.store.shard(key).write();
    if let Some(item) = guard.remove(key) {
      item.release(self.id);
    }
    true
  }

  fn save(&self, item: &InMemoryItem<T>) -> bool {
    let key = item.key();
    let mut guard = self.store.shard(key).write();

    let stored = if item.claim(self.id) {
      item.clone()
    } else {
      let copy = item.detached_copy();
      copy.claim(self.id);
      copy
    };

    if let Some(previous) = guard.insert(key.to_owned(), stored.clone()) {
      if !previous.ptr_eq(&stored) {
        previous.release(self.id);
      }
    }
    true
  }

  fn save_deferred(&self, item: &InMemoryItem<T>) -> bool {
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
