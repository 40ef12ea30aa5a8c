use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::exchange::{ContextId, ExchangeId};
use crate::media::MediaDescriptor;

/// A request whose URL looked like media, waiting for its headers.
#[derive(Debug, Clone)]
pub struct PendingExchange {
    pub exchange_id: ExchangeId,
    pub context_id: ContextId,
    /// URL-only classification, emitted as-is if headers never arrive.
    pub provisional: MediaDescriptor,
    pub created_at: Instant,
}

impl PendingExchange {
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }
}

/// Pending exchanges of one context, at most one per exchange id.
#[derive(Debug, Default)]
pub struct PendingSet {
    by_id: HashMap<ExchangeId, PendingExchange>,
}

impl PendingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts unless the id is already tracked; the first request wins.
    pub fn insert(&mut self, pending: PendingExchange) -> bool {
        if self.by_id.contains_key(&pending.exchange_id) {
            return false;
        }
        self.by_id.insert(pending.exchange_id.clone(), pending);
        true
    }

    pub fn take(&mut self, id: &ExchangeId) -> Option<PendingExchange> {
        self.by_id.remove(id)
    }

    pub fn contains(&self, id: &ExchangeId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Removes every pending older than `stale_after`; returns how many.
    pub fn remove_stale(&mut self, now: Instant, stale_after: Duration) -> usize {
        let before = self.by_id.len();
        self.by_id.retain(|_, p| p.age(now) <= stale_after);
        before - self.by_id.len()
    }

    pub fn clear(&mut self) {
        self.by_id.clear();
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
