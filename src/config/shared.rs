//! Process-wide settings handle whose contents can be swapped at runtime

use super::settings::Settings;
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable handle to the current [`Settings`].
///
/// Readers take a cheap `Arc` snapshot; a replacement is visible to every
/// reader that takes its snapshot afterwards.
#[derive(Clone)]
pub struct SharedSettings {
    inner: Arc<RwLock<Arc<Settings>>>,
}

impl SharedSettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(settings))),
        }
    }

    /// Snapshot of the settings in force right now
    pub fn current(&self) -> Arc<Settings> {
        Arc::clone(&self.inner.read())
    }

    /// Swap in `settings`, returning the snapshot it replaced
    pub fn replace(&self, settings: Settings) -> Arc<Settings> {
        let mut guard = self.inner.write();
        std::mem::replace(&mut *guard, Arc::new(settings))
    }
}

impl std::fmt::Debug for SharedSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedSettings").field(&*self.current()).finish()
    }
}

impl From<Settings> for SharedSettings {
    fn from(settings: Settings) -> Self {
        Self::new(settings)
    }
}
