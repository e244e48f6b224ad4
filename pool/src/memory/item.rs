use crate::item::Item;
use crate::time::{self, Expiration};

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

const NO_OWNER: u64 = 0;

/// A cache entry living only in process memory.
///
/// Once saved, the pool stores this very handle: every [`get_item`] for the
/// key returns a clone of it, so a value [`set`] through any of them is seen
/// by all. An item belongs to at most one pool at a time; saving it into a
/// second pool stores a copy there instead.
///
/// [`get_item`]: crate::ItemPool::get_item
/// [`set`]: Item::set
pub struct InMemoryItem<T> {
  inner: Arc<ItemInner<T>>,
}

struct ItemInner<T> {
  key: String,
  state: RwLock<ItemState<T>>,
  // Id of the pool holding this item, 0 when none. Changed by that pool
  // under the shard lock.
  owner: AtomicU64,
}

struct ItemState<T> {
  value: Option<T>,
  expiration: Option<Expiration>,
}

impl<T> Clone for InMemoryItem<T> {
  fn clone(&self) -> Self {
    Self {
      inner: self.inner.clone(),
    }
  }
}

impl<T> fmt::Debug for InMemoryItem<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = self.inner.state.read();
    f.debug_struct("InMemoryItem")
      .field("key", &self.inner.key)
      .field("has_value", &state.value.is_some())
      .field("expiration", &state.expiration)
      .field("stored", &self.is_stored())
      .finish()
  }
}

impl<T> InMemoryItem<T> {
  pub(crate) fn new(key: &str) -> Self {
    Self {
      inner: Arc::new(ItemInner {
        key: key.to_owned(),
        state: RwLock::new(ItemState {
          value: None,
          expiration: None,
        }),
        owner: AtomicU64::new(NO_OWNER),
      }),
    }
  }

  /// A new, unowned handle with the same key, value and expiration.
  pub(crate) fn detached_copy(&self) -> Self
  where
    T: Clone,
  {
    let state = self.inner.state.read();
    Self {
      inner: Arc::new(ItemInner {
        key: self.inner.key.clone(),
        state: RwLock::new(ItemState {
          value: state.value.clone(),
          expiration: state.expiration,
        }),
        owner: AtomicU64::new(NO_OWNER),
      }),
    }
  }

  /// Returns `true` if both handles refer to the same entry.
  pub fn ptr_eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }

  /// Returns `true` while this handle is the one held by a pool.
  pub fn is_stored(&self) -> bool {
    self.inner.owner.load(Ordering::Acquire) != NO_OWNER
  }

  /// Marks the item as held by `pool`. Fails if another pool holds it.
  pub(crate) fn claim(&self, pool: u64) -> bool {
    match self
      .inner
      .owner
      .compare_exchange(NO_OWNER, pool, Ordering::AcqRel, Ordering::Acquire)
    {
      Ok(_) => true,
      Err(current) => current == pool,
    }
  }

  /// Clears the owner, but only if it is `pool`.
  pub(crate) fn release(&self, pool: u64) {
    let _ = self
      .inner
      .owner
      .compare_exchange(pool, NO_OWNER, Ordering::AcqRel, Ordering::Acquire);
  }
}

impl<T: Clone + Default> Item<T> for InMemoryItem<T> {
  fn key(&self) -> &str {
    &self.inner.key
  }

  fn get(&self) -> T {
    self.inner.state.read().value.clone().unwrap_or_default()
  }

  fn is_hit(&self) -> bool {
    if !self.is_stored() {
      return false;
    }
    self
      .inner
      .state
      .read()
      .expiration
      .map_or(true, time::is_pending)
  }

  fn set(&self, value: T) {
    self.inner.state.write().value = Some(value);
  }

  fn expires_at(&self, expiration: Expiration) {
    self.inner.state.write().expiration = Some(expiration);
  }

  fn expiration(&self) -> Option<Expiration> {
    self.inner.state.read().expiration
  }
}
