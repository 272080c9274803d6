// src/config.rs
// Gate configuration, loaded once from the environment at process start.
// Tunables fall back to defaults; the oracle endpoint and secret are
// required unless verification is bypassed for a test environment.

use std::env;
use std::time::Duration;

const DEFAULT_MIN_SCORE: f64 = 0.5;
const DEFAULT_RATE_CEILING: u32 = 5;
const DEFAULT_RATE_WINDOW_SECS: u64 = 3600;
const DEFAULT_MIN_FILL_SECS: u64 = 3;
const DEFAULT_MAX_FILL_SECS: u64 = 3600;
const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Runtime configuration for the admission gate.
///
/// Loaded once at startup; a bad value here is fatal at initialization
/// and never surfaces as a per-request error.
#[derive(Debug, Clone)]
pub struct Config {
    /// Verification endpoint of the external score oracle.
    pub verify_url: String,
    /// Shared secret sent with every oracle verification call.
    pub verify_secret: String,
    /// Minimum acceptable oracle score, in [0.0, 1.0].
    pub min_score: f64,
    /// Maximum admitted requests per identity within one window.
    pub rate_ceiling: u32,
    /// Rolling rate-limit window.
    pub rate_window: Duration,
    /// Submissions filled faster than this are treated as scripted.
    pub min_fill_time: Duration,
    /// Submissions older than this are treated as stale or replayed.
    pub max_fill_time: Duration,
    /// Upper bound on the oracle round-trip; expiry fails closed.
    pub oracle_timeout: Duration,
    /// Skip the oracle call entirely (test environments only).
    pub verify_bypass: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let verify_bypass = env_bool("FORMGATE_VERIFY_BYPASS", false)?;

        let (verify_url, verify_secret) = if verify_bypass {
            (
                env::var("FORMGATE_VERIFY_URL").unwrap_or_default(),
                env::var("FORMGATE_VERIFY_SECRET").unwrap_or_default(),
            )
        } else {
            (
                env_required("FORMGATE_VERIFY_URL")?,
                env_required("FORMGATE_VERIFY_SECRET")?,
            )
        };

        let cfg = Config {
            verify_url,
            verify_secret,
            min_score: env_f64("FORMGATE_MIN_SCORE", DEFAULT_MIN_SCORE)?,
            rate_ceiling: env_u64("FORMGATE_RATE_CEILING", u64::from(DEFAULT_RATE_CEILING))? as u32,
            rate_window: Duration::from_secs(env_u64(
                "FORMGATE_RATE_WINDOW_SECS",
                DEFAULT_RATE_WINDOW_SECS,
            )?),
            min_fill_time: Duration::from_secs(env_u64(
                "FORMGATE_MIN_FILL_SECS",
                DEFAULT_MIN_FILL_SECS,
            )?),
            max_fill_time: Duration::from_secs(env_u64(
                "FORMGATE_MAX_FILL_SECS",
                DEFAULT_MAX_FILL_SECS,
            )?),
            oracle_timeout: Duration::from_secs(env_u64(
                "FORMGATE_ORACLE_TIMEOUT_SECS",
                DEFAULT_ORACLE_TIMEOUT_SECS,
            )?),
            verify_bypass,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(ConfigError::Invalid {
                name: "FORMGATE_MIN_SCORE",
                reason: format!("{} is outside [0.0, 1.0]", self.min_score),
            });
        }
        if self.rate_ceiling == 0 {
            return Err(ConfigError::Invalid {
                name: "FORMGATE_RATE_CEILING",
                reason: "ceiling must be at least 1".to_string(),
            });
        }
        if self.min_fill_time > self.max_fill_time {
            return Err(ConfigError::Invalid {
                name: "FORMGATE_MIN_FILL_SECS",
                reason: format!(
                    "minimum fill time {}s exceeds maximum {}s",
                    self.min_fill_time.as_secs(),
                    self.max_fill_time.as_secs()
                ),
            });
        }
        if self.oracle_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                name: "FORMGATE_ORACLE_TIMEOUT_SECS",
                reason: "timeout must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }
}

fn env_required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn env_u64(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };
    raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
        name,
        reason: format!("{raw:?} is not an unsigned integer"),
    })
}

fn env_f64(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };
    raw.trim().parse::<f64>().map_err(|_| ConfigError::Invalid {
        name,
        reason: format!("{raw:?} is not a number"),
    })
}

fn env_bool(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            reason: format!("{raw:?} is not a boolean"),
        }),
    }
}
