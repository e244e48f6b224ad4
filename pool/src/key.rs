//! Key validation for backends that map keys onto file names.
//!
//! Keys are used verbatim as file names, so anything that could name a
//! different directory entry than the one intended is rejected.

use crate::error::KeyError;

/// Checks that `key` can be used as a single file name inside a cache
/// directory.
pub fn validate_key(key: &str) -> Result<(), KeyError> {
  if key.is_empty() {
    return Err(KeyError::Empty);
  }
  if key == "." || key == ".." {
    return Err(KeyError::Reserved);
  }
  if key.contains(['/', '\\']) {
    return Err(KeyError::Separator);
  }
  if key.contains('\0') {
    return Err(KeyError::Nul);
  }
  Ok(())
}
