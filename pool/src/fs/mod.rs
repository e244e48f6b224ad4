//! The filesystem backend: one file per key, stored flat in a base directory.

mod builder;
mod item;
mod pool;
mod status;

pub use builder::{FilesystemPoolBuilder, DEFAULT_FILE_MODE};
pub use item::FilesystemItem;
pub use pool::FilesystemItemPool;
pub use status::FileStatus;
