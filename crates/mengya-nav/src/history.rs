//! Bounded back-stack of page identifiers.

use std::collections::VecDeque;

/// Default number of entries kept.
pub const DEFAULT_LIMIT: usize = 10;

/// Most-recent-last list of visited pages.
///
/// Holds at most `limit` entries (the oldest is evicted first) and never
/// two identical entries in a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: VecDeque<String>,
    limit: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl NavigationHistory {
    /// Create an empty history. A `limit` of zero is treated as one.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit + 1),
            limit,
        }
    }

    /// Rebuild a history from saved entries, re-applying the invariants.
    pub fn from_entries<I, S>(limit: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut history = Self::new(limit);
        for entry in entries {
            history.record(entry);
        }
        history
    }

    /// Push `page` unless it is already on top. Returns whether it was
    /// pushed.
    pub fn record(&mut self, page: impl Into<String>) -> bool {
        let page = page.into();
        if self.top() == Some(page.as_str()) {
            return false;
        }
        self.entries.push_back(page);
        if self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        true
    }

    /// Remove and return the top entry.
    pub fn pop(&mut self) -> Option<String> {
        self.entries.pop_back()
    }

    /// The most recent entry.
    pub fn top(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Replace the whole history with a single entry.
    pub fn reset_to(&mut self, page: impl Into<String>) {
        self.entries.clear();
        self.entries.push_back(page.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Owned copy of the entries, oldest first.
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}
