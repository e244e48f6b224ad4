use crate::item::Item;

/// A collection of items sharing one storage backend.
///
/// Lookups never fail and never perform I/O; all I/O happens in
/// [`Item::get`], [`Item::is_hit`], [`ItemPool::has_item`] and the
/// persistence methods. Failures of individual operations are reported as
/// `false` rather than as errors.
pub trait ItemPool {
  /// The payload type stored by this pool.
  type Value;
  /// The item handle type handed out by this pool.
  type Item: Item<Self::Value>;

  /// Returns a handle for `key`. Never fails.
  fn get_item(&self, key: &str) -> Self::Item;

  /// Returns one handle per key, in input order.
  fn get_items<K: AsRef<str>>(&self, keys: &[K]) -> Vec<Self::Item> {
    keys.iter().map(|key| self.get_item(key.as_ref())).collect()
  }

  /// Returns `true` if an entry exists for `key`, ignoring expiration.
  fn has_item(&self, key: &str) -> bool;

  /// Removes every entry. Best effort: keeps going after a failure and
  /// returns `false` if anything could not be removed.
  fn clear(&self) -> bool;

  /// Removes the entry for `key`.
  fn delete_item(&self, key: &str) -> bool;

  /// Removes the entries for all `keys`, attempting every one of them even
  /// after a failure. Returns `true` only if all deletions succeeded.
  fn delete_items<K: AsRef<str>>(&self, keys: &[K]) -> bool {
    keys
      .iter()
      .fold(true, |ok, key| self.delete_item(key.as_ref()) && ok)
  }

  /// Persists `item` immediately.
  fn save(&self, item: &Self::Item) -> bool;

  /// Queues `item` for the next [`ItemPool::commit`]. Does not touch storage.
  fn save_deferred(&self, item: &Self::Item) -> bool;

  /// Saves every queued item in enqueue order.
  ///
  /// Returns `true` only if all saves succeeded. Items that failed remain
  /// queued so that a later commit can retry them; a commit with nothing
  /// queued is a no-op returning `true`.
  fn commit(&self) -> bool;

  /// Returns the number of items waiting for a commit.
  fn deferred_len(&self) -> usize;
}
