use crate::error::CacheableError;
use crate::item::Item;
use crate::pool::ItemPool;

/// Returns the cached value for `key`, computing and storing it on a miss.
///
/// On a hit the stored value is returned and `producer` is not called. On a
/// miss `producer` receives the (unhit) item, so it can set an expiration
/// before the value is persisted; its result is then set on the item and
/// saved. The produced value is returned as-is, even if another handle to a
/// shared item changes it after the save.
///
/// # Errors
///
/// - [`CacheableError::Producer`] if `producer` fails. Nothing is stored.
/// - [`CacheableError::Save`] if the value was produced but the pool could
///   not save it. The produced value is dropped.
///
/// # Example
///
/// ```
/// use fibre_pool::{cacheable, InMemoryItemPool, Item};
/// use std::time::Duration;
///
/// let pool = InMemoryItemPool::<u64>::new();
/// let value = cacheable(&pool, "answer", |item| {
///   item.expires_after(Duration::from_secs(60));
///   Ok::<_, std::io::Error>(42)
/// })
/// .unwrap();
/// assert_eq!(value, 42);
/// ```
pub fn cacheable<P, F, E>(
  pool: &P,
  key: &str,
  producer: F,
) -> Result<P::Value, CacheableError<E>>
where
  P: ItemPool,
  P::Value: Clone,
  F: FnOnce(&P::Item) -> Result<P::Value, E>,
{
  let item = pool.get_item(key);
  if item.is_hit() {
    return Ok(item.get());
  }

  let value = producer(&item).map_err(CacheableError::Producer)?;
  item.set(value.clone());

  if !pool.save(&item) {
    return Err(CacheableError::Save {
      key: key.to_owned(),
    });
  }

  Ok(value)
}
