//! The in-memory backend: items held in a sharded concurrent map.

mod builder;
mod item;
mod pool;
mod store;

pub use builder::InMemoryPoolBuilder;
pub use item::InMemoryItem;
pub use pool::InMemoryItemPool;
