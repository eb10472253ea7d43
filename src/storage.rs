//! Per-identity state that outlives a single frame.
//!
//! Immediate-mode widgets are rebuilt every frame, so anything that must
//! survive (an animator's clock, a captured cursor position) is kept here,
//! keyed by the widget's identity string.

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

struct StateEntry {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl StateEntry {
    fn new<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            value,
            type_name: type_name::<T>(),
        }
    }

    /// Downcast to `T`.
    ///
    /// Two widgets sharing an identity end up here with different types; that
    /// is a bug in the integrating code, so it is not recoverable.
    fn downcast<T: Send + Sync + 'static>(&self, id: &str) -> Arc<T> {
        match self.value.clone().downcast::<T>() {
            Ok(value) => value,
            Err(_) => panic!(
                "state `{}` holds a {} but a {} was requested (identity collision?)",
                id,
                self.type_name,
                type_name::<T>()
            ),
        }
    }
}

/// Keyed store with get-or-create semantics.
///
/// Values are handed out as `Arc`s, so a caller keeps a strong reference to
/// its state even after the entry is discarded from the store.
#[derive(Default)]
pub struct StateStore {
    values: RwLock<HashMap<String, StateEntry>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, StateEntry>> {
        self.values.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, StateEntry>> {
        self.values.write().unwrap_or_else(|e| e.into_inner())
    }

    /// The state stored under `id`, if any.
    ///
    /// # Panics
    /// If the stored state is not a `T`.
    pub fn get<T: Send + Sync + 'static>(&self, id: &str) -> Option<Arc<T>> {
        self.read().get(id).map(|entry| entry.downcast(id))
    }

    /// The state stored under `id`, created with `init` on first access.
    ///
    /// # Panics
    /// If the stored state is not a `T`.
    pub fn get_or_insert_with<T, F>(&self, id: &str, init: F) -> Arc<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        if let Some(value) = self.get(id) {
            return value;
        }

        let mut values = self.write();
        // Another thread may have won the race between the two locks
        if let Some(entry) = values.get(id) {
            return entry.downcast(id);
        }

        log::trace!("creating state `{}` ({})", id, type_name::<T>());
        let value = Arc::new(init());
        values.insert(id.to_string(), StateEntry::new(value.clone()));
        value
    }

    /// Store `value` under `id`, replacing whatever was there.
    pub fn set<T: Send + Sync + 'static>(&self, id: impl Into<String>, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.write().insert(id.into(), StateEntry::new(value.clone()));
        value
    }

    /// Forget the state of `id`. Returns whether there was one.
    pub fn remove(&self, id: &str) -> bool {
        self.write().remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn clear(&self) {
        self.write().clear();
    }
}
