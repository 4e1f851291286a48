//! Shared fixtures for navigation tests.

use mengya_store::{HierarchicalStore, MemoryStorage};
use mengya_types::clock::ManualClock;
use mengya_types::config::MengyaConfig;

use crate::host::MemoryHost;
use crate::session::Session;

/// Wall-clock instant the fixtures start at.
pub const NOW: u64 = 1_700_000_000_000;

/// Store over an unbounded in-memory backend, frozen at [`NOW`].
pub fn memory_store() -> HierarchicalStore {
    HierarchicalStore::new(
        Box::new(MemoryStorage::new()),
        Box::new(ManualClock::at_ms(NOW)),
    )
}

/// Store whose persisted tier rejects every write.
pub fn full_store() -> HierarchicalStore {
    HierarchicalStore::new(
        Box::new(MemoryStorage::with_quota(0)),
        Box::new(ManualClock::at_ms(NOW)),
    )
}

/// Session over a [`MemoryHost`] showing `path`.
pub fn memory_session(path: &str, config: MengyaConfig) -> Session<MemoryHost> {
    Session::new(
        config,
        MemoryHost::new(path),
        Box::new(MemoryStorage::new()),
        Box::new(ManualClock::at_ms(NOW)),
    )
}
