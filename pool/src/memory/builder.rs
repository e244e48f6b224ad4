use crate::error::BuildError;
use crate::memory::pool::InMemoryItemPool;
use crate::memory::store::ShardedStore;

use core::fmt;
use std::hash::BuildHasher;
use std::marker::PhantomData;

/// A builder for [`InMemoryItemPool`].
pub struct InMemoryPoolBuilder<T, H = ahash::RandomState> {
  shards: usize,
  hasher: H,
  _value_marker: PhantomData<fn() -> T>,
}

impl<T, H> fmt::Debug for InMemoryPoolBuilder<T, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("InMemoryPoolBuilder")
      .field("shards", &self.shards)
      .finish_non_exhaustive()
  }
}

impl<T> InMemoryPoolBuilder<T> {
  /// Creates a builder with one shard per four CPUs' worth of threads,
  /// rounded to a power of two, and the default hasher.
  pub fn new() -> Self {
    Self {
      shards: default_shards(),
      hasher: ahash::RandomState::new(),
      _value_marker: PhantomData,
    }
  }
}

impl<T> Default for InMemoryPoolBuilder<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T, H> InMemoryPoolBuilder<T, H> {
  /// Sets the number of independently locked shards.
  ///
  /// Rounded up to a power of two at build time. Zero is rejected.
  pub fn shards(mut self, shards: usize) -> Self {
    self.shards = shards;
    self
  }

  /// Sets the hasher used to pick a key's shard.
  pub fn hasher<H2>(self, hasher: H2) -> InMemoryPoolBuilder<T, H2> {
    InMemoryPoolBuilder {
      shards: self.shards,
      hasher,
      _value_marker: PhantomData,
    }
  }
}

impl<T, H> InMemoryPoolBuilder<T, H>
where
  H: BuildHasher + Clone,
{
  pub fn build(self) -> Result<InMemoryItemPool<T, H>, BuildError> {
    if self.shards == 0 {
      return Err(BuildError::ZeroShards);
    }
    let shards = self
      .shards
      .checked_next_power_of_two()
      .ok_or(BuildError::TooManyShards {
        requested: self.shards,
      })?;
    let store = ShardedStore::new(shards, self.hasher);
    Ok(InMemoryItemPool::from_store(store))
  }
}

pub(crate) fn default_shards() -> usize {
  (num_cpus::get() * 4).max(1).next_power_of_two()
}
