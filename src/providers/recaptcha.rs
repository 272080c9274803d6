// src/providers/recaptcha.rs
// HTTP backend for reCAPTCHA-style verification services: form POST
// with a shared secret, JSON response with a success flag and score.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::contracts::{ScoreOracle, VerificationOutcome};

pub struct HttpScoreOracle {
    verify_url: String,
    secret: String,
    client: Client,
}

impl HttpScoreOracle {
    /// Build an oracle client with a total-request timeout. Expiry of
    /// the timeout fails closed; there is no retry.
    pub fn new(verify_url: String, secret: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        HttpScoreOracle {
            verify_url,
            secret,
            client,
        }
    }
}

/// Wire shape of the verification response. `score` is absent for
/// checkbox-style tokens; treat that as zero confidence.
#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

#[async_trait]
impl ScoreOracle for HttpScoreOracle {
    async fn verify(&self, token: &str, client_ip: &str) -> VerificationOutcome {
        let params = [
            ("secret", self.secret.as_str()),
            ("response", token),
            ("remoteip", client_ip),
        ];

        let response = match self
            .client
            .post(&self.verify_url)
            .form(&params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "score oracle request failed; failing closed");
                return VerificationOutcome::failed();
            }
        };

        let body: VerifyResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = %err, "score oracle body unreadable; failing closed");
                return VerificationOutcome::failed();
            }
        };

        if !body.error_codes.is_empty() {
            tracing::debug!(codes = ?body.error_codes, "score oracle returned error codes");
        }

        VerificationOutcome {
            valid: body.success,
            score: body.score.unwrap_or(0.0).clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_v3_shape() {
        let body: VerifyResponse = serde_json::from_str(
            r#"{"success":true,"score":0.9,"action":"resume_request","challenge_ts":"2026-01-01T00:00:00Z","hostname":"example.com"}"#,
        )
        .unwrap();
        assert!(body.success);
        assert_eq!(body.score, Some(0.9));
        assert!(body.error_codes.is_empty());
    }

    #[test]
    fn response_without_score_defaults_to_none() {
        let body: VerifyResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(body.success);
        assert_eq!(body.score, None);
    }

    #[test]
    fn error_codes_field_uses_wire_name() {
        let body: VerifyResponse = serde_json::from_str(
            r#"{"success":false,"error-codes":["invalid-input-response"]}"#,
        )
        .unwrap();
        assert!(!body.success);
        assert_eq!(body.error_codes, vec!["invalid-input-response"]);
    }

    #[tokio::test]
    async fn transport_failure_fails_closed() {
        let oracle = HttpScoreOracle::new(
            "http://127.0.0.1:1/verify".to_string(),
            "secret".to_string(),
            Duration::from_millis(200),
        );
        let outcome = oracle.verify("token", "1.2.3.4").await;
        assert_eq!(outcome, VerificationOutcome::failed());
    }
}
