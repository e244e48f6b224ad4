use chrono::{DateTime, Utc};
use std::time::{Duration, SystemTime};

/// An absolute expiration instant.
///
/// Wall-clock based so that it can be compared against file modification
/// times as well as against "now".
pub type Expiration = DateTime<Utc>;

#[inline]
pub(crate) fn now() -> Expiration {
  Utc::now()
}

/// Returns `now + duration`, saturating at the latest representable instant.
pub(crate) fn after(duration: Duration) -> Expiration {
  chrono::Duration::from_std(duration)
    .ok()
    .and_then(|delta| now().checked_add_signed(delta))
    .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[inline]
pub(crate) fn from_system_time(time: SystemTime) -> Expiration {
  DateTime::<Utc>::from(time)
}

/// Returns `true` while `expiration` lies strictly in the future.
#[inline]
pub(crate) fn is_pending(expiration: Expiration) -> bool {
  expiration > now()
}
