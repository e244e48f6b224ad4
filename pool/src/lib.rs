//! A uniform item-pool caching contract over interchangeable backing stores.
//!
//! # Overview
//! - **Items**: a key, a lazily available value and an optional expiration.
//!   Items are views into storage; nothing is persisted until the pool saves
//!   them.
//! - **Pools**: lookup, existence checks, deletion, immediate saves and
//!   deferred saves flushed in a batch by `commit`.
//! - **Backends**: a directory of files ([`FilesystemItemPool`], opaque byte
//!   payloads) and a sharded concurrent map ([`InMemoryItemPool`], any
//!   `Clone + Default` value, never serialized).
//! - **Memoization**: [`cacheable`] collapses "check, compute, store" into a
//!   single call.
//!
//! Expected failures (a missing file, a missing key, an I/O error) never
//! panic. They come back as `false` or an empty value and are logged through
//! `tracing`. Only pool construction and [`cacheable`] return errors.
//!
//! # Expiration
//! An in-memory item is a hit while its expiration is in the future. A
//! filesystem item is additionally anchored to the file's modification time:
//! it is a miss once the file was written after the expiration instant, even
//! if that instant has not yet passed.

pub mod cacheable;
pub mod error;
pub mod fs;
pub mod item;
pub mod key;
pub mod memory;
pub mod pool;

mod queue;
mod time;

pub use cacheable::cacheable;
pub use error::{BuildError, CacheableError, KeyError};
pub use fs::{FileStatus, FilesystemItem, FilesystemItemPool, FilesystemPoolBuilder};
pub use item::Item;
pub use key::validate_key;
pub use memory::{InMemoryItem, InMemoryItemPool, InMemoryPoolBuilder};
pub use pool::ItemPool;
pub use time::Expiration;
