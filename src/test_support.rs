// src/test_support.rs
// Shared fixtures for unit tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::audit::{AuditEvent, AuditSink};
use crate::providers::{ScoreOracle, VerificationOutcome};
use crate::submission::ClientSubmission;

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Serialize tests that mutate process environment variables.
pub(crate) fn lock_env() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A submission that passes every honeypot signal.
pub(crate) fn submission() -> ClientSubmission {
    ClientSubmission {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        message: "Hello!".to_string(),
        captcha_token: "tok-abc123".to_string(),
        website: String::new(),
        phone: String::new(),
        company: String::new(),
        js_enabled: "true".to_string(),
        form_time: 10,
    }
}

/// Audit sink that captures events in memory.
#[derive(Default)]
pub(crate) struct MemorySink {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemorySink {
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl AuditSink for MemorySink {
    fn record(&self, event: &AuditEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}

/// Oracle double with a fixed outcome and call bookkeeping.
pub(crate) struct MockOracle {
    outcome: VerificationOutcome,
    calls: AtomicU32,
    last_call: Mutex<Option<(String, String)>>,
}

impl MockOracle {
    pub fn with_outcome(outcome: VerificationOutcome) -> Self {
        MockOracle {
            outcome,
            calls: AtomicU32::new(0),
            last_call: Mutex::new(None),
        }
    }

    pub fn valid(score: f64) -> Self {
        MockOracle::with_outcome(VerificationOutcome { valid: true, score })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<(String, String)> {
        self.last_call
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ScoreOracle for MockOracle {
    async fn verify(&self, token: &str, client_ip: &str) -> VerificationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_call
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) =
            Some((token.to_string(), client_ip.to_string()));
        self.outcome
    }
}
