//! Key-value store abstraction.

use std::collections::HashMap;
use std::sync::Mutex;

use giken_core::{GikenError, Result};

/// Minimal string key-value store.
///
/// Values are opaque strings; callers own the encoding. `update` runs a
/// read-modify-write cycle that no other writer can interleave with.
pub trait KvStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<String>>;

    fn set_raw(&self, key: &str, value: &str) -> Result<()>;

    /// Atomically replace the value at `key` with `f(current)`.
    ///
    /// If `f` fails nothing is written. Returns the stored value.
    fn update_raw(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> Result<String>,
    ) -> Result<String>;
}

/// Process-local store, used for tests and `--memory` runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.map
            .lock()
            .map_err(|e| GikenError::Storage(format!("Memory store lock poisoned: {}", e)))
    }
}

impl KvStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn update_raw(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> Result<String>,
    ) -> Result<String> {
        let mut map = self.lock()?;
        let next = f(map.get(key).cloned())?;
        map.insert(key.to_string(), next.clone());
        Ok(next)
    }
}
