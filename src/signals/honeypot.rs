// src/signals/honeypot.rs
// Stateless heuristics over request metadata: decoy fields, the
// client-capability flag, and elapsed form-fill time.

use std::time::Duration;

use crate::config::Config;
use crate::submission::ClientSubmission;
use crate::verdict::DenyReason;

/// Sentinel the client-side script writes into `js_enabled`.
const CAPABILITY_SENTINEL: &str = "true";

/// Why a submission tripped the honeypot, with enough context for
/// operators to tune thresholds. Never shown to the requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoneypotRejection {
    DecoyFilled { field: &'static str },
    MissingClientCapability { flag: String },
    TooFast { form_time_secs: u64 },
    Expired { form_time_secs: u64 },
}

impl HoneypotRejection {
    pub fn reason(&self) -> DenyReason {
        match self {
            HoneypotRejection::DecoyFilled { .. } => DenyReason::HoneypotFilled,
            HoneypotRejection::MissingClientCapability { .. } => DenyReason::NoClientCapability,
            HoneypotRejection::TooFast { .. } => DenyReason::TooFast,
            HoneypotRejection::Expired { .. } => DenyReason::FormExpired,
        }
    }

    /// Audit detail, e.g. `field=website` or `form_time=2s`.
    pub fn detail(&self) -> String {
        match self {
            HoneypotRejection::DecoyFilled { field } => format!("field={field}"),
            HoneypotRejection::MissingClientCapability { flag } => {
                format!("js_enabled={flag:?}")
            }
            HoneypotRejection::TooFast { form_time_secs }
            | HoneypotRejection::Expired { form_time_secs } => {
                format!("form_time={form_time_secs}s")
            }
        }
    }
}

/// Timing thresholds for the fill-time check.
#[derive(Debug, Clone, Copy)]
pub struct HoneypotPolicy {
    min_fill_time: Duration,
    max_fill_time: Duration,
}

impl HoneypotPolicy {
    pub fn new(min_fill_time: Duration, max_fill_time: Duration) -> Self {
        HoneypotPolicy {
            min_fill_time,
            max_fill_time,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        HoneypotPolicy::new(cfg.min_fill_time, cfg.max_fill_time)
    }

    /// Run the three signals in order, first failure wins.
    pub fn evaluate(&self, submission: &ClientSubmission) -> Result<(), HoneypotRejection> {
        for (field, value) in submission.decoy_fields() {
            if !value.is_empty() {
                return Err(HoneypotRejection::DecoyFilled { field });
            }
        }

        if submission.js_enabled != CAPABILITY_SENTINEL {
            return Err(HoneypotRejection::MissingClientCapability {
                flag: submission.js_enabled.clone(),
            });
        }

        let fill_time = Duration::from_secs(submission.form_time);
        if fill_time < self.min_fill_time {
            return Err(HoneypotRejection::TooFast {
                form_time_secs: submission.form_time,
            });
        }
        if fill_time > self.max_fill_time {
            return Err(HoneypotRejection::Expired {
                form_time_secs: submission.form_time,
            });
        }

        Ok(())
    }
}
