//! Per-context deduplicating catalog of accepted media.

mod filter;
mod key;

use std::collections::HashSet;
use std::time::SystemTime;

use serde::Serialize;

pub use filter::{CatalogFilter, FormatFamily};
pub use key::DedupKey;

use crate::media::MediaDescriptor;

/// One accepted resource as stored for a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Unique and increasing within one catalog.
    pub id: u64,
    pub descriptor: MediaDescriptor,
    pub discovered_at: SystemTime,
}

/// Insertion-ordered entries for one context, at most one per [`DedupKey`].
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    keys: HashSet<DedupKey>,
    next_id: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `descriptor` unless an entry with the same key exists.
    /// Returns whether the catalog changed.
    pub fn push(&mut self, descriptor: MediaDescriptor) -> bool {
        let key = DedupKey::of(&descriptor);
        if self.keys.contains(&key) {
            tracing::debug!(key = %key.to_string_key(), "duplicate suppressed");
            return false;
        }
        self.next_id += 1;
        self.keys.insert(key);
        self.entries.push(CatalogEntry {
            id: self.next_id,
            descriptor,
            discovered_at: SystemTime::now(),
        });
        true
    }

    /// Entries in insertion order.
    pub fn list(&self) -> Vec<CatalogEntry> {
        self.entries.clone()
    }

    /// Entries newest first.
    pub fn list_recent(&self) -> Vec<CatalogEntry> {
        self.entries.iter().rev().cloned().collect()
    }

    /// Entries matching `filter`, newest first.
    pub fn list_filtered(&self, filter: &CatalogFilter) -> Vec<CatalogEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| filter.matches(&e.descriptor))
            .cloned()
            .collect()
    }

    /// Empties the catalog. Ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
