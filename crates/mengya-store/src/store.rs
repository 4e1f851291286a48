//! The two-tier hierarchical store.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use mengya_types::clock::Clock;
use mengya_types::config::MengyaConfig;
use mengya_types::error::{MengyaError, Result};

use crate::defaults::default_value;
use crate::path::{flatten, get_nested, set_nested};
use crate::storage::Storage;

/// Broadcast payload for a successful [`HierarchicalStore::set_data`].
#[derive(Debug, Clone, PartialEq)]
pub struct DataChange {
    pub path: String,
    pub value: Value,
}

/// Handle returned by [`HierarchicalStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Outcome of a [`HierarchicalStore::sync_data`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Leaves written back to the persisted tier.
    pub written: usize,
    /// Entries removed by the expiry sweep.
    pub expired: usize,
}

type Listener = Box<dyn FnMut(&DataChange)>;

/// Dot-path key-value store with an in-memory cache over a persisted tier.
///
/// Reads consult memory first, then the persisted tier (promoting hits into
/// memory), then the built-in defaults. Writes go to both tiers and notify
/// subscribers in registration order.
pub struct HierarchicalStore {
    memory: Value,
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
    namespace: String,
    expiry_ms: u64,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl HierarchicalStore {
    /// Create a store with the default namespace and expiry window.
    pub fn new(storage: Box<dyn Storage>, clock: Box<dyn Clock>) -> Self {
        Self::from_config(&MengyaConfig::default(), storage, clock)
    }

    /// Create a store using the namespace and expiry window from `config`.
    pub fn from_config(
        config: &MengyaConfig,
        storage: Box<dyn Storage>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            memory: Value::Object(Default::default()),
            storage,
            clock,
            namespace: config.namespace.clone(),
            expiry_ms: config.expiry_ms,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Current time from the store's clock, in epoch milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// The persisted backend.
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}_{key}", self.namespace)
    }

    // -- Two-tier API --------------------------------------------------------

    /// Write `value` at `path` in both tiers and notify subscribers.
    ///
    /// Returns `false` if the value cannot be represented as JSON (nothing is
    /// mutated) or if the persisted write fails (memory keeps the value, no
    /// notification is sent).
    pub fn set_data<T: Serialize + ?Sized>(&mut self, path: &str, value: &T) -> bool {
        match self.try_set_data(path, value) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to set {path}: {e}");
                false
            },
        }
    }

    fn try_set_data<T: Serialize + ?Sized>(&mut self, path: &str, value: &T) -> Result<()> {
        let value =
            serde_json::to_value(value).map_err(|e| MengyaError::Serialization(e.to_string()))?;
        set_nested(&mut self.memory, path, value.clone())?;
        self.write_local(path, &value)?;
        self.notify(&DataChange {
            path: path.to_string(),
            value,
        });
        Ok(())
    }

    /// Read the value at `path`.
    ///
    /// Falls back from memory to the persisted tier (promoting a hit into
    /// memory) to the built-in default. `None` means no tier and no default
    /// has a value. Defaults are never written back.
    pub fn get_data(&mut self, path: &str) -> Option<Value> {
        if let Some(value) = get_nested(&self.memory, path) {
            return Some(value.clone());
        }
        if let Some(value) = self.get_local(path) {
            log::debug!("Promoting {path} into memory");
            if let Err(e) = set_nested(&mut self.memory, path, value.clone()) {
                log::warn!("Not promoting {path}: {e}");
            }
            return Some(value);
        }
        default_value(path, self.clock.now_ms())
    }

    /// Typed [`get_data`](Self::get_data). A value of the wrong shape reads
    /// as `None`.
    pub fn get_data_as<T: DeserializeOwned>(&mut self, path: &str) -> Option<T> {
        let value = self.get_data(path)?;
        match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(e) => {
                log::warn!("Value at {path} has unexpected shape: {e}");
                None
            },
        }
    }

    /// Peek at the in-memory tier only.
    pub fn memory_value(&self, path: &str) -> Option<&Value> {
        get_nested(&self.memory, path)
    }

    /// Drop the in-memory tier, as a fresh page load would.
    pub fn clear_memory(&mut self) {
        self.memory = Value::Object(Default::default());
    }

    /// Write every in-memory leaf back to the persisted tier, then sweep
    /// expired entries.
    pub fn sync_data(&mut self) -> SyncReport {
        let mut written = 0;
        for (path, value) in flatten(&self.memory) {
            match self.write_local(&path, &value) {
                Ok(()) => written += 1,
                Err(e) => log::error!("Failed to sync {path}: {e}"),
            }
        }
        let expired = self.clean_expired_data();
        log::info!("Data sync complete: {written} written, {expired} expired");
        SyncReport { written, expired }
    }

    /// Remove namespaced entries whose `timestamp` is older than the expiry
    /// window. Returns the number removed.
    ///
    /// Entries that do not parse, or carry no positive numeric `timestamp`,
    /// are left alone.
    pub fn clean_expired_data(&mut self) -> usize {
        let keys = match self.storage.keys() {
            Ok(keys) => keys,
            Err(e) => {
                log::error!("Cannot enumerate storage for expiry sweep: {e}");
                return 0;
            },
        };
        let prefix = format!("{}_", self.namespace);
        let now = self.clock.now_ms() as f64;
        let expiry = self.expiry_ms as f64;

        let mut removed = 0;
        for key in keys.iter().filter(|k| k.starts_with(&prefix)) {
            let Ok(Some(raw)) = self.storage.get_item(key) else {
                continue;
            };
            let Ok(envelope) = serde_json::from_str::<Value>(&raw) else {
                continue;
            };
            let Some(timestamp) = envelope.get("timestamp").and_then(Value::as_f64) else {
                continue;
            };
            if timestamp > 0.0 && now - timestamp > expiry {
                match self.storage.remove_item(key) {
                    Ok(()) => {
                        log::debug!("Expired {key}");
                        removed += 1;
                    },
                    Err(e) => log::error!("Failed to remove expired {key}: {e}"),
                }
            }
        }
        removed
    }

    // -- Persisted-tier helpers ----------------------------------------------

    /// Write `value` to the persisted tier only. Failures are logged.
    pub fn set_local<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        let result = serde_json::to_value(value)
            .map_err(|e| MengyaError::Serialization(e.to_string()))
            .and_then(|value| self.write_local(key, &value));
        match result {
            Ok(()) => true,
            Err(e) => {
                log::error!("Local storage write failed for {key}: {e}");
                false
            },
        }
    }

    /// Read from the persisted tier only.
    ///
    /// Absent keys, stored `null` and malformed JSON all read as `None`.
    pub fn get_local(&self, key: &str) -> Option<Value> {
        let storage_key = self.storage_key(key);
        let raw = match self.storage.get_item(&storage_key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(e) => {
                log::warn!("Local storage read failed for {storage_key}: {e}");
                return None;
            },
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring malformed entry {storage_key}: {e}");
                None
            },
        }
    }

    /// Delete a key from the persisted tier.
    pub fn remove_local(&mut self, key: &str) {
        let storage_key = self.storage_key(key);
        if let Err(e) = self.storage.remove_item(&storage_key) {
            log::error!("Local storage remove failed for {storage_key}: {e}");
        }
    }

    fn write_local(&mut self, key: &str, value: &Value) -> Result<()> {
        let text = serde_json::to_string(value)?;
        let storage_key = self.storage_key(key);
        self.storage.set_item(&storage_key, &text)
    }

    // -- Change notification -------------------------------------------------

    /// Register a listener for successful writes. Listeners run
    /// synchronously, in registration order.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&DataChange) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, change: &DataChange) {
        for (_, listener) in &mut self.listeners {
            listener(change);
        }
    }
}
