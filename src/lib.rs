// src/lib.rs
// Admission gate for public "request a resource" form endpoints.
//
// Every inbound submission runs through a fixed sequence of checks,
// cheapest first: honeypot heuristics, an external human/bot score
// oracle, then a per-identity sliding-window rate limiter. The first
// failing check denies the request; callers surface a generic message
// while the audit sink records the true reason.

pub mod audit; // Structured audit events and the fire-and-forget sink trait
pub mod config; // Env-loaded configuration, fatal at startup on bad values
pub mod enforcement; // Rate limiting
pub mod gate; // The admission pipeline
pub mod providers; // Score-oracle backends (HTTP, bypass)
pub mod signals; // Stateless request signals (identity, honeypot)
pub mod submission; // Inbound boundary types
pub mod verdict; // Deny taxonomy and caller-facing result mapping

#[cfg(test)]
mod test_support;

pub use audit::{AuditEvent, AuditEventKind, AuditSink, LogAuditSink};
pub use config::{Config, ConfigError};
pub use enforcement::rate::{RateDecision, SlidingWindowLimiter};
pub use gate::AdmissionGate;
pub use providers::{ScoreOracle, VerificationOutcome};
pub use signals::identity::IdentityKey;
pub use submission::{forwarded_client_ip, ClientSubmission};
pub use verdict::{AdmissionVerdict, DenyReason};
