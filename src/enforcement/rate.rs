// src/enforcement/rate.rs
// Per-identity sliding-window rate limiting over an in-memory ledger
// map. State lives for the process lifetime only; cross-instance
// consistency is out of scope.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::signals::identity::IdentityKey;

/// Outcome of one `check_and_record` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Admitted,
    Limited { retry_after: Duration },
}

impl RateDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            RateDecision::Admitted => "admitted",
            RateDecision::Limited { .. } => "limited",
        }
    }
}

/// Sliding-window limiter keyed by [`IdentityKey`].
///
/// Each ledger is an ordered sequence of attempt timestamps. Pruning,
/// the ceiling check, and the append all happen under one lock
/// acquisition; two concurrent requests for the same identity can
/// never both take the last remaining slot.
pub struct SlidingWindowLimiter {
    ceiling: u32,
    window: Duration,
    ledgers: Mutex<HashMap<IdentityKey, VecDeque<Instant>>>,
}

impl SlidingWindowLimiter {
    pub fn new(ceiling: u32, window: Duration) -> Self {
        SlidingWindowLimiter {
            ceiling,
            window,
            ledgers: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(cfg: &crate::config::Config) -> Self {
        SlidingWindowLimiter::new(cfg.rate_ceiling, cfg.rate_window)
    }

    /// Admit or limit one attempt at `now`.
    ///
    /// Entries older than `now - window` are pruned before the count
    /// is evaluated. On admission `now` is appended to the ledger; a
    /// limited attempt records nothing.
    pub fn check_and_record(&self, key: &IdentityKey, now: Instant) -> RateDecision {
        let mut ledgers = self.ledgers.lock();
        let ledger = ledgers.entry(key.clone()).or_default();

        while let Some(front) = ledger.front() {
            if now.duration_since(*front) > self.window {
                ledger.pop_front();
            } else {
                break;
            }
        }

        if ledger.len() as u32 >= self.ceiling {
            let retry_after = ledger
                .front()
                .map(|oldest| (*oldest + self.window).saturating_duration_since(now))
                .unwrap_or(self.window);
            return RateDecision::Limited { retry_after };
        }

        ledger.push_back(now);
        RateDecision::Admitted
    }

    /// Drop ledgers whose every entry has aged out of the window.
    ///
    /// `check_and_record` prunes lazily, so identities that stop
    /// submitting would otherwise pin their (empty-in-effect) ledgers
    /// forever. Callers may run this on whatever maintenance cadence
    /// suits them.
    pub fn purge_idle(&self, now: Instant) {
        let mut ledgers = self.ledgers.lock();
        ledgers.retain(|_, ledger| {
            ledger
                .back()
                .is_some_and(|newest| now.duration_since(*newest) <= self.window)
        });
    }

    /// Number of identities currently holding a ledger.
    pub fn tracked_identities(&self) -> usize {
        self.ledgers.lock().len()
    }
}
