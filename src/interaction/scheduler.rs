use std::time::{Duration, Instant};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Classes of high-frequency intents that are coalesced independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentClass {
    Pan,
    WheelZoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRecompute {
    pub class: IntentClass,
    pub scheduled_at: Instant,
}

/// Trailing-edge debounce for cluster/label recomputation.
///
/// Each intent overwrites the pending entry for its class. A recomputation is
/// due once any entry's `scheduled_at` has passed, and always runs against the
/// latest transform at that moment.
#[derive(Debug, Clone)]
pub struct RecomputeScheduler {
    quiescence: Duration,
    pending: IndexMap<IntentClass, Instant>,
}

impl RecomputeScheduler {
    #[must_use]
    pub fn new(quiescence: Duration) -> Self {
        Self {
            quiescence,
            pending: IndexMap::new(),
        }
    }

    /// Records an intent at `at`, superseding any pending entry of its class.
    pub fn schedule(&mut self, class: IntentClass, at: Instant) -> PendingRecompute {
        let scheduled_at = at + self.quiescence;
        if self.pending.insert(class, scheduled_at).is_some() {
            trace!(?class, "coalesced pending recomputation");
        }
        PendingRecompute {
            class,
            scheduled_at,
        }
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    #[must_use]
    pub fn pending(&self, class: IntentClass) -> Option<PendingRecompute> {
        self.pending
            .get(&class)
            .map(|&scheduled_at| PendingRecompute {
                class,
                scheduled_at,
            })
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    /// Removes every due entry; returns `true` when a recomputation should run.
    pub fn take_due(&mut self, now: Instant) -> bool {
        let before = self.pending.len();
        self.pending.retain(|_, scheduled_at| *scheduled_at > now);
        self.pending.len() != before
    }

    /// Drops all pending entries; returns whether any existed.
    pub fn cancel_all(&mut self) -> bool {
        let had_pending = self.has_pending();
        self.pending.clear();
        had_pending
    }
}

impl Default for RecomputeScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}
