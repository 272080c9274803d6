// src/submission.rs
// Inbound boundary types. The embedding HTTP layer decodes the form
// body into `ClientSubmission` and resolves the client IP before
// handing both to the gate.

use serde::Deserialize;

/// One untrusted form submission, immutable once received.
///
/// Field names match the public form wire format. `website`, `phone`
/// and `company` are decoys the real UI never renders; `js_enabled`
/// and `form_time` are filled in by the client-side script.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub message: String,
    pub captcha_token: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub js_enabled: String,
    #[serde(default)]
    pub form_time: u64,
}

impl ClientSubmission {
    /// Decoy fields in evaluation order, paired with their wire names.
    pub(crate) fn decoy_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("website", self.website.as_str()),
            ("phone", self.phone.as_str()),
            ("company", self.company.as_str()),
        ]
    }
}

/// Resolve the client IP from a forwarding header value, falling back
/// to the transport peer address.
///
/// `forwarded` is the raw value of an `X-Forwarded-For`-style header
/// (possibly a comma-separated hop list); the first non-empty hop
/// wins. Callers are responsible for only passing the header when the
/// proxy that set it is trusted.
pub fn forwarded_client_ip(forwarded: Option<&str>, peer_addr: &str) -> String {
    if let Some(value) = forwarded {
        if let Some(first) = value.split(',').next() {
            let first = first.trim();
            if !first.is_empty() && first != "unknown" {
                return first.to_string();
            }
        }
    }
    peer_addr.to_string()
}
