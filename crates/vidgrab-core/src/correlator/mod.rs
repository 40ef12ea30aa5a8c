//! Binds an early "request seen" signal to the later headers/completion
//! signals of the same exchange.
//!
//! A URL that already looks like media becomes a pending exchange. Headers
//! refine it (or reject it); a completion without headers falls back to the
//! URL-only classification if it is still fresh. Everything else is swept.
//!
//! The correlator never touches the catalog. Each handler reports a
//! [`Transition`] and the caller pushes whatever descriptor it carries.

mod pending;

use std::time::{Duration, Instant};

pub use pending::{PendingExchange, PendingSet};

use crate::classify::{Classifier, Verdict};
use crate::config::CorrelatorConfig;
use crate::exchange::{ObservedExchange, Phase};
use crate::media::{MediaDescriptor, Origin};

/// What one event did to the pending set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A new pending exchange is tracked.
    Created,
    /// Headers confirmed a tracked exchange; push the enriched descriptor.
    Resolved(MediaDescriptor),
    /// Headers arrived for an exchange never tracked and classified as media.
    Direct(MediaDescriptor),
    /// Completed within the fallback window without headers.
    FallbackEmitted(MediaDescriptor),
    /// Headers showed a tracked exchange is not media.
    HeaderRejected { rule: &'static str },
    /// Completed after the fallback window.
    Expired,
    /// Nothing to do: rejected URL, untracked completion, repeated request.
    Ignored,
}

impl Transition {
    /// The descriptor to push, if any.
    pub fn emitted(self) -> Option<MediaDescriptor> {
        match self {
            Transition::Resolved(d) | Transition::Direct(d) | Transition::FallbackEmitted(d) => {
                Some(d)
            }
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Transition::Created => "created",
            Transition::Resolved(_) => "resolved",
            Transition::Direct(_) => "direct",
            Transition::FallbackEmitted(_) => "fallback_emitted",
            Transition::HeaderRejected { .. } => "header_rejected",
            Transition::Expired => "expired",
            Transition::Ignored => "ignored",
        }
    }
}

#[derive(Debug)]
pub struct Correlator {
    classifier: Classifier,
    fallback_window: Duration,
    stale_after: Duration,
}

impl Correlator {
    pub fn new(classifier: Classifier, cfg: &CorrelatorConfig) -> Self {
        Self {
            classifier,
            fallback_window: cfg.fallback_window(),
            stale_after: cfg.stale_after(),
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn stale_after(&self) -> Duration {
        self.stale_after
    }

    /// Routes `exchange` to the handler for its phase.
    pub fn observe(&self, pendings: &mut PendingSet, exchange: &ObservedExchange) -> Transition {
        let transition = match exchange.phase {
            Phase::Requested => self.on_requested(pendings, exchange),
            Phase::HeadersReceived => self.on_headers(pendings, exchange),
            Phase::Completed => self.on_completed(pendings, exchange),
        };
        tracing::debug!(
            context = %exchange.context_id,
            exchange = %exchange.exchange_id,
            transition = transition.name(),
            "exchange observed"
        );
        transition
    }

    pub fn on_requested(&self, pendings: &mut PendingSet, exchange: &ObservedExchange) -> Transition {
        if pendings.contains(&exchange.exchange_id) {
            return Transition::Ignored;
        }
        let Verdict::Accept(provisional) = self.classifier.classify(&exchange.url, None) else {
            return Transition::Ignored;
        };
        pendings.insert(PendingExchange {
            exchange_id: exchange.exchange_id.clone(),
            context_id: exchange.context_id.clone(),
            provisional,
            created_at: exchange.observed_at,
        });
        Transition::Created
    }

    pub fn on_headers(&self, pendings: &mut PendingSet, exchange: &ObservedExchange) -> Transition {
        let tracked = pendings.take(&exchange.exchange_id).is_some();
        match self.classifier.classify(&exchange.url, exchange.headers.as_ref()) {
            Verdict::Accept(d) => {
                let d = d.with_origin(Origin::NetworkHeaders);
                if tracked {
                    Transition::Resolved(d)
                } else {
                    Transition::Direct(d)
                }
            }
            Verdict::Reject { rule } if tracked => Transition::HeaderRejected { rule },
            Verdict::Reject { .. } => Transition::Ignored,
        }
    }

    pub fn on_completed(&self, pendings: &mut PendingSet, exchange: &ObservedExchange) -> Transition {
        let Some(pending) = pendings.take(&exchange.exchange_id) else {
            return Transition::Ignored;
        };
        if pending.age(exchange.observed_at) > self.fallback_window {
            return Transition::Expired;
        }
        let origin = if pending.provisional.resource_type.is_manifest() {
            Origin::ManifestFallback
        } else {
            Origin::NetworkUrlOnly
        };
        Transition::FallbackEmitted(pending.provisional.with_origin(origin))
    }

    /// Drops pendings older than the staleness bound; returns how many.
    pub fn sweep(&self, pendings: &mut PendingSet, now: Instant) -> usize {
        pendings.remove_stale(now, self.stale_after)
    }
}
