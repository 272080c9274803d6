use async_trait::async_trait;

use super::contracts::{ScoreOracle, VerificationOutcome};

/// Oracle stand-in for test environments where outbound verification
/// is disabled. Accepts every token with a fixed score.
pub struct BypassScoreOracle {
    score: f64,
}

impl BypassScoreOracle {
    pub fn with_score(score: f64) -> Self {
        BypassScoreOracle { score }
    }
}

impl Default for BypassScoreOracle {
    fn default() -> Self {
        BypassScoreOracle::with_score(1.0)
    }
}

#[async_trait]
impl ScoreOracle for BypassScoreOracle {
    async fn verify(&self, _token: &str, _client_ip: &str) -> VerificationOutcome {
        VerificationOutcome {
            valid: true,
            score: self.score,
        }
    }
}
