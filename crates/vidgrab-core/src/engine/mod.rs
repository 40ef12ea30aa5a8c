//! The engine: one object owning every context's catalog and pending set.
//!
//! Contexts are independent. The map lock is only held to find, insert or
//! remove a context's bundle; all work happens under that bundle's own mutex,
//! so handlers for different contexts never contend.

mod hooks;
mod sweeper;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::{Duration, Instant};

pub use hooks::describe_page_hook;
pub use sweeper::spawn_sweeper;

use crate::catalog::{Catalog, CatalogEntry, CatalogFilter};
use crate::classify::Classifier;
use crate::config::EngineConfig;
use crate::correlator::{Correlator, PendingSet, Transition};
use crate::exchange::{ContextId, ObservedExchange, PageHookNotification, Phase};
use crate::media::MediaDescriptor;

/// Notified with the new entry count whenever a context's catalog changes.
pub trait CatalogObserver: Send + Sync {
    fn catalog_changed(&self, context: &ContextId, count: usize);
}

/// Badge label for a catalog size: empty when there is nothing to show.
pub fn badge_text(count: usize) -> String {
    if count == 0 {
        String::new()
    } else {
        count.to_string()
    }
}

#[derive(Debug, Default)]
struct ContextState {
    catalog: Catalog,
    pendings: PendingSet,
    /// Set by `drop_context`; a handler still holding the bundle must not write.
    closed: bool,
}

type Bundle = Arc<Mutex<ContextState>>;

fn lock(bundle: &Bundle) -> MutexGuard<'_, ContextState> {
    bundle.lock().unwrap_or_else(|e| e.into_inner())
}

pub struct Engine {
    correlator: Correlator,
    min_blob_bytes: u64,
    sweep_interval: Duration,
    contexts: RwLock<HashMap<ContextId, Bundle>>,
    observer: Option<Arc<dyn CatalogObserver>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(cfg: EngineConfig) -> Self {
        let classifier = Classifier::new(&cfg.classifier);
        Self {
            correlator: Correlator::new(classifier, &cfg.correlator),
            min_blob_bytes: cfg.classifier.min_blob_bytes,
            sweep_interval: cfg.correlator.sweep_interval(),
            contexts: RwLock::new(HashMap::new()),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn CatalogObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn classifier(&self) -> &Classifier {
        self.correlator.classifier()
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    fn existing(&self, ctx: &ContextId) -> Option<Bundle> {
        let map = self.contexts.read().unwrap_or_else(|e| e.into_inner());
        map.get(ctx).cloned()
    }

    fn bundle(&self, ctx: &ContextId) -> Bundle {
        if let Some(b) = self.existing(ctx) {
            return b;
        }
        let mut map = self.contexts.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(map.entry(ctx.clone()).or_default())
    }

    /// State for `exchange`'s context. A context without state only gets a
    /// bundle when the event could put something into it: a request whose URL
    /// classifies as media, or headers that do. Completions never create one.
    fn bundle_for(&self, exchange: &ObservedExchange) -> Option<Bundle> {
        if let Some(b) = self.existing(&exchange.context_id) {
            return Some(b);
        }
        let wanted = match exchange.phase {
            Phase::Requested => self.classifier().classify(&exchange.url, None).is_accept(),
            Phase::HeadersReceived => self
                .classifier()
                .classify(&exchange.url, exchange.headers.as_ref())
                .is_accept(),
            Phase::Completed => false,
        };
        wanted.then(|| self.bundle(&exchange.context_id))
    }

    fn notify(&self, ctx: &ContextId, count: usize) {
        if let Some(observer) = &self.observer {
            observer.catalog_changed(ctx, count);
        }
    }

    fn push_locked(
        &self,
        ctx: &ContextId,
        state: &mut ContextState,
        descriptor: MediaDescriptor,
    ) -> bool {
        if state.closed {
            return false;
        }
        let url = descriptor.url.clone();
        let quality = descriptor.quality;
        let origin = descriptor.origin;
        if !state.catalog.push(descriptor) {
            return false;
        }
        tracing::info!(context = %ctx, %url, %quality, %origin, "media added");
        true
    }

    /// Feeds one observed exchange through the correlator, pushing whatever
    /// it emits into the exchange's context.
    pub fn handle_exchange(&self, exchange: &ObservedExchange) -> Transition {
        let ctx = &exchange.context_id;
        let Some(bundle) = self.bundle_for(exchange) else {
            tracing::debug!(context = %ctx, exchange = %exchange.exchange_id, "no state for exchange");
            return Transition::Ignored;
        };
        let (transition, added) = {
            let mut state = lock(&bundle);
            if state.closed {
                return Transition::Ignored;
            }
            let transition = self.correlator.observe(&mut state.pendings, exchange);
            let added = match &transition {
                Transition::Resolved(d) | Transition::Direct(d) | Transition::FallbackEmitted(d) => {
                    self.push_locked(ctx, &mut state, d.clone())
                        .then(|| state.catalog.len())
                }
                _ => None,
            };
            (transition, added)
        };
        if let Some(count) = added {
            self.notify(ctx, count);
        }
        transition
    }

    /// Describes and pushes one page hook notification. Returns whether the
    /// catalog changed.
    pub fn handle_page_hook(&self, ctx: &ContextId, notification: &PageHookNotification) -> bool {
        let Some(descriptor) =
            describe_page_hook(self.classifier(), notification, self.min_blob_bytes)
        else {
            tracing::debug!(context = %ctx, kind = ?notification.kind, "page hook ignored");
            return false;
        };
        self.push(ctx, descriptor)
    }

    /// Adds `descriptor` to `ctx`'s catalog unless its dedup key is present.
    pub fn push(&self, ctx: &ContextId, descriptor: MediaDescriptor) -> bool {
        let bundle = self.bundle(ctx);
        let count = {
            let mut state = lock(&bundle);
            if !self.push_locked(ctx, &mut state, descriptor) {
                return false;
            }
            state.catalog.len()
        };
        self.notify(ctx, count);
        true
    }

    /// Entries in discovery order; empty for unknown contexts.
    pub fn list(&self, ctx: &ContextId) -> Vec<CatalogEntry> {
        self.existing(ctx)
            .map(|b| lock(&b).catalog.list())
            .unwrap_or_default()
    }

    /// Entries newest first.
    pub fn list_recent(&self, ctx: &ContextId) -> Vec<CatalogEntry> {
        self.existing(ctx)
            .map(|b| lock(&b).catalog.list_recent())
            .unwrap_or_default()
    }

    pub fn list_filtered(&self, ctx: &ContextId, filter: &CatalogFilter) -> Vec<CatalogEntry> {
        self.existing(ctx)
            .map(|b| lock(&b).catalog.list_filtered(filter))
            .unwrap_or_default()
    }

    pub fn count(&self, ctx: &ContextId) -> usize {
        self.existing(ctx)
            .map(|b| lock(&b).catalog.len())
            .unwrap_or(0)
    }

    pub fn pending_count(&self, ctx: &ContextId) -> usize {
        self.existing(ctx)
            .map(|b| lock(&b).pendings.len())
            .unwrap_or(0)
    }

    /// Contexts with live state.
    pub fn contexts(&self) -> Vec<ContextId> {
        let map = self.contexts.read().unwrap_or_else(|e| e.into_inner());
        let mut ids: Vec<ContextId> = map.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Empties `ctx`'s catalog. Pending exchanges are kept.
    pub fn clear(&self, ctx: &ContextId) {
        let Some(bundle) = self.existing(ctx) else {
            return;
        };
        lock(&bundle).catalog.clear();
        tracing::debug!(context = %ctx, "catalog cleared");
        self.notify(ctx, 0);
    }

    /// Forgets `ctx` entirely: catalog and pending exchanges.
    pub fn drop_context(&self, ctx: &ContextId) {
        let removed = {
            let mut map = self.contexts.write().unwrap_or_else(|e| e.into_inner());
            map.remove(ctx)
        };
        let Some(bundle) = removed else {
            return;
        };
        {
            let mut state = lock(&bundle);
            state.closed = true;
            state.catalog.clear();
            state.pendings.clear();
        }
        tracing::debug!(context = %ctx, "context dropped");
        self.notify(ctx, 0);
    }

    /// Removes stale pendings in every context; returns how many were swept.
    pub fn sweep(&self, now: Instant) -> usize {
        let bundles: Vec<(ContextId, Bundle)> = {
            let map = self.contexts.read().unwrap_or_else(|e| e.into_inner());
            map.iter()
                .map(|(k, v)| (k.clone(), Arc::clone(v)))
                .collect()
        };
        let mut swept = 0;
        for (ctx, bundle) in bundles {
            let n = self.correlator.sweep(&mut lock(&bundle).pendings, now);
            if n > 0 {
                tracing::debug!(context = %ctx, swept = n, "stale pendings swept");
            }
            swept += n;
        }
        swept
    }
}
