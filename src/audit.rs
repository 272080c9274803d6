// src/audit.rs
// Structured audit trail for admission decisions. Every verdict emits
// exactly one event; sinks are fire-and-forget and must never feed an
// error back into the pipeline.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventKind {
    Admitted,
    Denied,
}

/// One admission-decision record.
///
/// Carries only non-reversible identity context: the hash-key prefix
/// and a masked IP bucket, never the raw email or full address.
#[derive(Serialize, Debug, Clone)]
pub struct AuditEvent {
    /// Unix timestamp, seconds.
    pub ts: u64,
    pub event: AuditEventKind,
    /// Short prefix of the identity key.
    pub identity: String,
    pub ip_bucket: Option<String>,
    pub reason: Option<&'static str>,
    pub detail: Option<String>,
    pub score: Option<f64>,
}

/// Fire-and-forget sink for audit events. A log line, a metrics
/// counter, or a durable store all fit behind this.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: &AuditEvent);
}

/// Default sink: one JSON line per event through `tracing`.
pub struct LogAuditSink;

impl AuditSink for LogAuditSink {
    fn record(&self, event: &AuditEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => match event.event {
                AuditEventKind::Admitted => tracing::info!(target: "formgate::audit", "{payload}"),
                AuditEventKind::Denied => tracing::warn!(target: "formgate::audit", "{payload}"),
            },
            Err(err) => {
                tracing::error!(target: "formgate::audit", error = %err, "dropping unserializable audit event");
            }
        }
    }
}

pub fn now_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
