//! Confidence-weighted blend of model and retrieval estimates.

use manas_models::constants::{ALPHA_MAX, ALPHA_MIN, VARIANCE_DISAGREEMENT_CAP};
use manas_models::{Estimate, RetrievalEpisode};
use serde::{Deserialize, Serialize};

/// How fast retrieval support pulls weight away from the model. The log
/// in the schedule makes very large support saturate instead of
/// collapsing alpha to the floor immediately.
const ALPHA_DECAY_RATE: f64 = 0.15;

/// Weight the squared model/retrieval disagreement carries in the
/// blended variance.
const DISAGREEMENT_WEIGHT: f64 = 0.25;

/// Blend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlendConfig {
    /// Lower bound on the model's weight.
    #[serde(default = "default_alpha_min")]
    pub alpha_min: f64,
    /// Upper bound on the model's weight; also the weight at zero support.
    #[serde(default = "default_alpha_max")]
    pub alpha_max: f64,
    /// Cap on the squared-disagreement variance penalty.
    #[serde(default = "default_disagreement_cap")]
    pub disagreement_cap: f64,
}

fn default_alpha_min() -> f64 {
    ALPHA_MIN
}
fn default_alpha_max() -> f64 {
    ALPHA_MAX
}
fn default_disagreement_cap() -> f64 {
    VARIANCE_DISAGREEMENT_CAP
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            alpha_min: ALPHA_MIN,
            alpha_max: ALPHA_MAX,
            disagreement_cap: VARIANCE_DISAGREEMENT_CAP,
        }
    }
}

/// Model weight as a function of effective retrieval support.
///
/// `alpha_max` at zero support, non-increasing in support, clamped at
/// `alpha_min` for very large support.
pub fn alpha(effective_support: f64, config: &BlendConfig) -> f64 {
    (config.alpha_max - ALPHA_DECAY_RATE * (1.0 + effective_support.max(0.0)).ln())
        .clamp(config.alpha_min, config.alpha_max)
}

/// Blend a model estimate with retrieval episodes.
///
/// Effective support sums `max(0, similarity)` — negative-similarity
/// episodes stay in the list but contribute nothing. With zero support
/// the blend degenerates to the model estimate alone. Otherwise the
/// blended variance combines both sources plus a capped penalty for how
/// far they disagree.
pub fn blend(
    model_estimate: Estimate,
    episodes: &[RetrievalEpisode],
    config: &BlendConfig,
) -> Estimate {
    let support: f64 = episodes.iter().map(RetrievalEpisode::support).sum();
    if support <= 0.0 {
        return model_estimate;
    }

    let retrieval_mean: f64 = episodes
        .iter()
        .map(|e| e.support() * e.value)
        .sum::<f64>()
        / support;
    let retrieval_var: f64 = episodes
        .iter()
        .map(|e| e.support() * (e.value - retrieval_mean) * (e.value - retrieval_mean))
        .sum::<f64>()
        / support;

    let a = alpha(support, config);
    let mean = a * model_estimate.mean + (1.0 - a) * retrieval_mean;

    let gap = model_estimate.mean - retrieval_mean;
    let disagreement = (gap * gap).min(config.disagreement_cap);
    let var = a * a * model_estimate.sd * model_estimate.sd
        + (1.0 - a) * (1.0 - a) * retrieval_var
        + DISAGREEMENT_WEIGHT * disagreement;

    Estimate::new(mean, var.sqrt())
}
