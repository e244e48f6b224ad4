use core::fmt;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash, Hasher};

use crossbeam_utils::CachePadded;
use parking_lot::RwLock;

pub(crate) type Shard<V, H> = RwLock<HashMap<String, V, H>>;

#[inline]
fn hash_key<H: BuildHasher>(hasher: &H, key: &str) -> u64 {
  let mut state = hasher.build_hasher();
  key.hash(&mut state);
  state.finish()
}

/// A string-keyed map partitioned into independently locked shards.
///
/// Every operation on a key goes through the single lock of that key's shard,
/// so operations on one key are linearizable while different keys rarely
/// contend.
pub(crate) struct ShardedStore<V, H> {
  shards: Box<[CachePadded<Shard<V, H>>]>,
  hasher: H,
}

impl<V, H> fmt::Debug for ShardedStore<V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ShardedStore")
      .field("num_shards", &self.shards.len())
      .finish()
  }
}

impl<V, H> ShardedStore<V, H>
where
  H: BuildHasher + Clone,
{
  /// Creates a store with `num_shards` shards. The builder guarantees
  /// `num_shards > 0`.
  pub(crate) fn new(num_shards: usize, hasher: H) -> Self {
    let shards = (0..num_shards)
      .map(|_| CachePadded::new(RwLock::new(HashMap::with_hasher(hasher.clone()))))
      .collect::<Vec<_>>()
      .into_boxed_slice();

    Self { shards, hasher }
  }

  /// Returns the lock guarding the shard that owns `key`.
  #[inline]
  pub(crate) fn shard(&self, key: &str) -> &Shard<V, H> {
    let index = hash_key(&self.hasher, key) as usize % self.shards.len();
    &self.shards[index]
  }

  /// Iterates over all shard locks, for whole-store operations like `clear`.
  pub(crate) fn iter_shards(&self) -> impl Iterator<Item = &Shard<V, H>> {
    self.shards.iter().map(|padded| &**padded)
  }

  pub(crate) fn num_shards(&self) -> usize {
    self.shards.len()
  }
}
