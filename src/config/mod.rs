use std::env;

use serde::{Deserialize, Serialize};

/// Score cutoffs for the four risk bands.
///
/// A score of `critical_min` or above is Critical, `high_min` or above is
/// High, `medium_min` or above is Medium, anything below is Low. Cutoffs
/// must be strictly decreasing so every score in 1..=25 lands in exactly
/// one band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandThresholds {
    pub critical_min: u8,
    pub high_min: u8,
    pub medium_min: u8,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            critical_min: 20,
            high_min: 12,
            medium_min: 6,
        }
    }
}

impl BandThresholds {
    /// Whether the cutoffs are strictly decreasing and within the 1..=25
    /// score domain.
    pub fn is_valid(&self) -> bool {
        self.medium_min >= 1
            && self.medium_min < self.high_min
            && self.high_min < self.critical_min
            && self.critical_min <= 25
    }
}

/// Scoring configuration, loaded from environment variables with defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub bands: BandThresholds,
}

impl ScoringConfig {
    /// Read `RISK_BAND_CRITICAL_MIN`, `RISK_BAND_HIGH_MIN`, and
    /// `RISK_BAND_MEDIUM_MIN`, falling back to the defaults for anything
    /// missing or unparseable. A non-monotonic override set is discarded
    /// wholesale.
    pub fn from_env() -> Self {
        let defaults = BandThresholds::default();
        let bands = BandThresholds {
            critical_min: env_threshold("RISK_BAND_CRITICAL_MIN", defaults.critical_min),
            high_min: env_threshold("RISK_BAND_HIGH_MIN", defaults.high_min),
            medium_min: env_threshold("RISK_BAND_MEDIUM_MIN", defaults.medium_min),
        };

        if bands.is_valid() {
            Self { bands }
        } else {
            tracing::warn!(?bands, "non-monotonic band threshold overrides, using defaults");
            Self::default()
        }
    }
}

fn env_threshold(key: &str, default: u8) -> u8 {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
