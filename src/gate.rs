// src/gate.rs
// The admission pipeline: Honeypot -> Score Oracle -> Rate Limiter,
// short-circuiting on the first denial. Ordering is by cost: the
// honeypot is free, the oracle is a network round-trip, and the rate
// ledger should only record traffic that already looks human.

use std::sync::Arc;
use std::time::Instant;

use crate::audit::{now_ts, AuditEvent, AuditEventKind, AuditSink};
use crate::config::Config;
use crate::enforcement::rate::{RateDecision, SlidingWindowLimiter};
use crate::providers::{self, ScoreOracle};
use crate::signals::honeypot::HoneypotPolicy;
use crate::signals::identity::{bucket_ip, IdentityKey};
use crate::submission::ClientSubmission;
use crate::verdict::{AdmissionVerdict, DenyReason};

/// The gate, shared via `Arc` by the embedding server. Every
/// collaborator is injected so tests (and eventual multi-instance
/// deployments) own their state.
pub struct AdmissionGate {
    honeypot: HoneypotPolicy,
    oracle: Arc<dyn ScoreOracle>,
    limiter: SlidingWindowLimiter,
    audit: Arc<dyn AuditSink>,
    min_score: f64,
}

impl AdmissionGate {
    pub fn new(
        honeypot: HoneypotPolicy,
        oracle: Arc<dyn ScoreOracle>,
        limiter: SlidingWindowLimiter,
        audit: Arc<dyn AuditSink>,
        min_score: f64,
    ) -> Self {
        AdmissionGate {
            honeypot,
            oracle,
            limiter,
            audit,
            min_score,
        }
    }

    pub fn from_config(cfg: &Config, audit: Arc<dyn AuditSink>) -> Self {
        AdmissionGate::new(
            HoneypotPolicy::from_config(cfg),
            providers::select_oracle(cfg),
            SlidingWindowLimiter::from_config(cfg),
            audit,
            cfg.min_score,
        )
    }

    /// Run the full check sequence for one submission.
    ///
    /// Always returns a verdict; expected failure modes never escape
    /// as errors. Each call emits exactly one audit event.
    pub async fn admit(
        &self,
        submission: &ClientSubmission,
        client_ip: &str,
    ) -> AdmissionVerdict {
        let identity = IdentityKey::derive(&submission.email, client_ip);

        if let Err(rejection) = self.honeypot.evaluate(submission) {
            let reason = rejection.reason();
            self.record_denied(&identity, client_ip, reason, Some(rejection.detail()), None);
            return AdmissionVerdict::Deny {
                reason,
                retry_after: None,
            };
        }

        let outcome = self
            .oracle
            .verify(&submission.captcha_token, client_ip)
            .await;
        if !outcome.passes(self.min_score) {
            self.record_denied(
                &identity,
                client_ip,
                DenyReason::CaptchaFailed,
                Some(format!("valid={} score={:.2}", outcome.valid, outcome.score)),
                Some(outcome.score),
            );
            return AdmissionVerdict::Deny {
                reason: DenyReason::CaptchaFailed,
                retry_after: None,
            };
        }

        match self.limiter.check_and_record(&identity, Instant::now()) {
            RateDecision::Limited { retry_after } => {
                self.record_denied(
                    &identity,
                    client_ip,
                    DenyReason::RateLimited,
                    Some(format!("retry_after={}s", retry_after.as_secs())),
                    None,
                );
                AdmissionVerdict::Deny {
                    reason: DenyReason::RateLimited,
                    retry_after: Some(retry_after),
                }
            }
            RateDecision::Admitted => {
                self.audit.record(&AuditEvent {
                    ts: now_ts(),
                    event: AuditEventKind::Admitted,
                    identity: identity.prefix(),
                    ip_bucket: Some(bucket_ip(client_ip)),
                    reason: None,
                    detail: None,
                    score: Some(outcome.score),
                });
                AdmissionVerdict::Admit {
                    score: outcome.score,
                }
            }
        }
    }

    fn record_denied(
        &self,
        identity: &IdentityKey,
        client_ip: &str,
        reason: DenyReason,
        detail: Option<String>,
        score: Option<f64>,
    ) {
        self.audit.record(&AuditEvent {
            ts: now_ts(),
            event: AuditEventKind::Denied,
            identity: identity.prefix(),
            ip_bucket: Some(bucket_ip(client_ip)),
            reason: Some(reason.as_str()),
            detail,
            score,
        });
    }
}
