use crate::time::{self, Expiration};

use std::time::Duration;

/// A single addressable cache entry: a key, a lazily available value and an
/// optional expiration.
///
/// An item is a *view* into the storage of the pool that handed it out.
/// Creating one never touches storage, and changing its value or expiration
/// is not persisted until the item goes through [`ItemPool::save`] or
/// [`ItemPool::commit`].
///
/// Items are cheap handles: cloning one yields another handle to the same
/// entry state, which is why every method takes `&self`.
///
/// [`ItemPool::save`]: crate::ItemPool::save
/// [`ItemPool::commit`]: crate::ItemPool::commit
pub trait Item<T>: Clone {
  /// Returns the key this item is bound to.
  fn key(&self) -> &str;

  /// Returns the item's value.
  ///
  /// This is not authoritative about presence: a missing entry yields an
  /// empty or default value. Use [`Item::is_hit`] to find out whether the
  /// entry exists.
  fn get(&self) -> T;

  /// Returns `true` if the entry is present in its backing store and not
  /// expired.
  ///
  /// Evaluated against the store on every call, never remembered.
  fn is_hit(&self) -> bool;

  /// Replaces the in-memory value of this item. Does not persist it.
  fn set(&self, value: T);

  /// Sets an absolute expiration instant.
  fn expires_at(&self, expiration: Expiration);

  /// Returns the expiration set on this handle, if any.
  fn expiration(&self) -> Option<Expiration>;

  /// Sets the expiration to `now + duration`.
  fn expires_after(&self, duration: Duration) {
    self.expires_at(time::after(duration));
  }
}
