// src/verdict.rs
// The pipeline's output and its caller-facing mapping.

use std::time::Duration;

/// One message for every bot-defense denial. Distinct wording per
/// check would let a probing client learn which heuristic fired.
pub const GENERIC_DENY_MESSAGE: &str = "Request validation failed. Please try again.";

/// Closed set of denial reasons recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    HoneypotFilled,
    NoClientCapability,
    TooFast,
    FormExpired,
    CaptchaFailed,
    RateLimited,
}

impl DenyReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DenyReason::HoneypotFilled => "honeypot_filled",
            DenyReason::NoClientCapability => "no_client_capability",
            DenyReason::TooFast => "too_fast",
            DenyReason::FormExpired => "form_expired",
            DenyReason::CaptchaFailed => "captcha_failed",
            DenyReason::RateLimited => "rate_limited",
        }
    }
}

/// Final admit/deny decision for one submission.
///
/// Consumed once by the caller; the gate retains nothing beyond the
/// rate-limit ledger entry an admission leaves behind.
#[derive(Debug, Clone, PartialEq)]
pub enum AdmissionVerdict {
    /// All checks passed; `score` is the oracle's confidence value,
    /// forwarded for audit logging only.
    Admit { score: f64 },
    /// A check failed. `retry_after` is set only for rate-limit
    /// denials.
    Deny {
        reason: DenyReason,
        retry_after: Option<Duration>,
    },
}

impl AdmissionVerdict {
    pub fn is_admitted(&self) -> bool {
        matches!(self, AdmissionVerdict::Admit { .. })
    }

    /// HTTP-style status for the embedding endpoint.
    pub fn http_status(&self) -> u16 {
        match self {
            AdmissionVerdict::Admit { .. } => 200,
            AdmissionVerdict::Deny {
                reason: DenyReason::RateLimited,
                ..
            } => 429,
            AdmissionVerdict::Deny { .. } => 403,
        }
    }

    /// Message safe to show the requester. `None` for admissions (the
    /// caller owns the success response). Rate-limit denials tell the
    /// user when to retry; every other denial shares one generic
    /// message.
    pub fn client_message(&self) -> Option<String> {
        match self {
            AdmissionVerdict::Admit { .. } => None,
            AdmissionVerdict::Deny {
                reason: DenyReason::RateLimited,
                retry_after,
            } => {
                let minutes = retry_after.map_or(1, |d| d.as_secs().div_ceil(60).max(1));
                Some(format!(
                    "Rate limit exceeded. Try again in {minutes} minutes."
                ))
            }
            AdmissionVerdict::Deny { .. } => Some(GENERIC_DENY_MESSAGE.to_string()),
        }
    }
}
