//! Persisted-tier backends.
//!
//! [`Storage`] mirrors the browser's local-storage surface: flat string keys
//! mapped to string values. [`MemoryStorage`] keeps everything in an ordered
//! map and can be given a byte quota to model a full store.

use std::collections::BTreeMap;

use mengya_types::error::{MengyaError, Result};

/// A flat string key-value backend.
pub trait Storage {
    /// Look up a key. `Ok(None)` means the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any previous one.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<()>;

    /// All keys currently stored, in ascending order.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Ordered in-memory backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
    /// Maximum total size of keys plus values, in bytes.
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty, unbounded backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty backend that rejects writes past `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: BTreeMap::new(),
            quota: Some(bytes),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let replaced = self.items.get(key).map_or(0, |old| key.len() + old.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > quota {
                return Err(MengyaError::Storage(format!(
                    "quota exceeded writing {key}: {needed} > {quota} bytes"
                )));
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.items.keys().cloned().collect())
    }
}
