//! Exponentially-weighted mean/variance updates.

use chrono::{DateTime, Utc};
use manas_models::constants::DEFAULT_HALF_LIFE_DAYS;
use manas_models::BaselineStats;
use serde::{Deserialize, Serialize};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Decay configuration for baseline updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EwmaConfig {
    /// Elapsed time after which an observation's weight halves, in days.
    #[serde(default = "default_half_life_days")]
    pub half_life_days: f64,
}

fn default_half_life_days() -> f64 {
    DEFAULT_HALF_LIFE_DAYS
}

impl Default for EwmaConfig {
    fn default() -> Self {
        Self {
            half_life_days: DEFAULT_HALF_LIFE_DAYS,
        }
    }
}

/// Absorb one observation into a baseline.
///
/// The decay factor is `exp(-ln2 * dt / half_life)` where `dt` is the time
/// since the previous observation; with no prior timestamp the decay is 0
/// and the first observation fully replaces the seed. The variance update
/// uses the pre-update and post-update means:
///
/// ```text
/// var' = decay * var + (1 - decay) * (x - mean) * (x - mean')
/// ```
///
/// which stays unbiased as the mean shifts within the same call, unlike
/// the naive `(x - mean)^2`.
///
/// A non-finite `new_value` is treated as a non-observation and returns
/// the baseline unchanged.
pub fn update(
    current: &BaselineStats,
    new_value: f64,
    now: DateTime<Utc>,
    config: &EwmaConfig,
) -> BaselineStats {
    if !new_value.is_finite() {
        return current.clone();
    }

    let decay = match current.last_updated_at {
        Some(last) => {
            let dt_ms = (now - last).num_milliseconds().max(0) as f64;
            let half_life_ms = config.half_life_days * MS_PER_DAY;
            (-std::f64::consts::LN_2 * dt_ms / half_life_ms).exp()
        }
        None => 0.0,
    };

    let mean = decay * current.mean + (1.0 - decay) * new_value;
    let var = current.std * current.std;
    let var = decay * var + (1.0 - decay) * (new_value - current.mean) * (new_value - mean);

    BaselineStats {
        mean,
        std: var.max(0.0).sqrt(),
        count: current.count + 1,
        last_updated_at: Some(now),
    }
}
