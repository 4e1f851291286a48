//! Hierarchical two-tier key-value store.
//!
//! Values are JSON blobs addressed by dot-delimited paths (`child.profile`).
//! A nested in-memory object caches a flat persisted [`Storage`] backend:
//! reads fall through to the backend and promote hits into memory, writes
//! go to both tiers and notify subscribers, and a sweep drops persisted
//! envelopes whose `timestamp` is older than the expiry window.

pub mod defaults;
pub mod file;
pub mod path;
pub mod storage;
pub mod store;

pub use file::FileStorage;
pub use storage::{MemoryStorage, Storage};
pub use store::{DataChange, HierarchicalStore, ListenerId, SyncReport};
