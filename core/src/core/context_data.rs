// pricetag/src/core/context_data.rs
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared workflow state owned by one orchestrator.
///
/// Clones share the same data and the same mount flag. Once the owning
/// orchestrator is unmounted, `write_if_mounted` refuses to touch the data, which
/// is how a response arriving after the user left the screen gets dropped.
///
/// IMPORTANT: Lock guards obtained from this struct are blocking and MUST NOT
/// be held across `.await` suspension points.
#[derive(Debug)]
pub struct ScanContext<T: Send + Sync + 'static> {
  data: Arc<RwLock<T>>,
  mounted: Arc<AtomicBool>,
}

impl<T: Send + Sync + 'static> ScanContext<T> {
  pub fn new(data: T) -> Self {
    ScanContext {
      data: Arc::new(RwLock::new(data)),
      mounted: Arc::new(AtomicBool::new(true)),
    }
  }

  /// The returned guard MUST be dropped before any `.await` point.
  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.data.read()
  }

  /// Unconditional write access; workflow handlers should prefer `write_if_mounted`.
  /// The returned guard MUST be dropped before any `.await` point.
  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.data.write()
  }

  /// Applies `f` only while the owner is still mounted. Returns `None` when the
  /// write was discarded.
  pub fn write_if_mounted<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
    if !self.is_mounted() {
      return None;
    }
    let mut guard = self.data.write();
    Some(f(&mut guard))
  }

  pub fn is_mounted(&self) -> bool {
    self.mounted.load(Ordering::SeqCst)
  }

  /// A detached handle that can unmount this context from elsewhere, e.g. from
  /// the navigation layer while a lookup is still in flight.
  pub fn mount_guard(&self) -> MountGuard {
    MountGuard {
      mounted: Arc::clone(&self.mounted),
    }
  }
}

impl<T: Send + Sync + 'static> Clone for ScanContext<T> {
  fn clone(&self) -> Self {
    ScanContext {
      data: Arc::clone(&self.data),
      mounted: Arc::clone(&self.mounted),
    }
  }
}

impl<T: Send + Sync + 'static + Default> Default for ScanContext<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}

/// Cloneable handle to the mount flag of a `ScanContext`.
#[derive(Debug, Clone)]
pub struct MountGuard {
  mounted: Arc<AtomicBool>,
}

impl MountGuard {
  /// Marks the owning screen as gone. Irreversible.
  pub fn unmount(&self) {
    self.mounted.store(false, Ordering::SeqCst);
  }

  pub fn is_mounted(&self) -> bool {
    self.mounted.load(Ordering::SeqCst)
  }
}
