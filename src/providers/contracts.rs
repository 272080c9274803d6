use async_trait::async_trait;

/// Result of one oracle verification call. Transient; never retained
/// beyond the request's audit record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerificationOutcome {
    pub valid: bool,
    /// Confidence in [0.0, 1.0], higher meaning more human.
    pub score: f64,
}

impl VerificationOutcome {
    /// Fail-closed outcome used for timeouts and transport errors.
    pub fn failed() -> Self {
        VerificationOutcome {
            valid: false,
            score: 0.0,
        }
    }

    pub fn passes(&self, min_score: f64) -> bool {
        self.valid && self.score >= min_score
    }
}

/// A human/bot scoring service.
///
/// Implementations must resolve within their configured timeout and
/// map every failure mode to [`VerificationOutcome::failed`]; the
/// pipeline treats a transport error identically to an explicit
/// rejection.
#[async_trait]
pub trait ScoreOracle: Send + Sync {
    async fn verify(&self, token: &str, client_ip: &str) -> VerificationOutcome;
}
