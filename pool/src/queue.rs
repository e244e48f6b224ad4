use core::fmt;

use parking_lot::Mutex;
use tracing::debug;

/// The per-pool queue of items waiting for a batch commit.
///
/// The lock is held for the whole of `commit`, so commits are serialized with
/// each other and with `push`.
pub(crate) struct DeferredQueue<I> {
  items: Mutex<Vec<I>>,
}

impl<I> fmt::Debug for DeferredQueue<I> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DeferredQueue")
      .field("len", &self.len())
      .finish()
  }
}

impl<I> DeferredQueue<I> {
  pub(crate) fn new() -> Self {
    Self {
      items: Mutex::new(Vec::new()),
    }
  }

  pub(crate) fn push(&self, item: I) {
    self.items.lock().push(item);
  }

  pub(crate) fn len(&self) -> usize {
    self.items.lock().len()
  }

  /// Runs `save` over every queued item in enqueue order.
  ///
  /// Items that saved successfully leave the queue, items that failed stay
  /// in place (order preserved) for the next commit. Returns `true` only if
  /// every save succeeded.
  pub(crate) fn commit<F>(&self, mut save: F) -> bool
  where
    F: FnMut(&I) -> bool,
  {
    let mut items = self.items.lock();
    let attempted = items.len();

    // `retain` visits each element exactly once, in order.
    items.retain(|item| !save(item));

    let failed = items.len();
    debug!(attempted, failed, "committed deferred items");
    failed == 0
  }
}
