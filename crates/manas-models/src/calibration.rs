//! Fitted calibration models and point estimates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A per-subject calibrated linear model with bootstrap weight uncertainty.
///
/// Created/replaced wholesale on each retrain; never partially mutated.
/// Readers must see either the old model or the new one, so callers should
/// swap the whole struct (e.g. behind an `Arc`), not patch fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationModel {
    /// Version string: schema version plus a digest of the fitted weights.
    pub model_version: String,
    /// When the model was trained.
    pub updated_at: DateTime<Utc>,
    /// L2 penalty the model was fit with.
    pub lambda: f64,
    /// Standard deviation of training residuals.
    pub residual_sd: f64,
    /// Ordered predictor names: bias, the fixed predictors, then the
    /// selected feature ids. Same length as `weights`.
    pub predictor_keys: Vec<String>,
    /// Fitted ridge weights, aligned with `predictor_keys`.
    pub weights: Vec<f64>,
    /// Diagonal bootstrap variance per weight, aligned with `weights`.
    pub weight_var: Vec<f64>,
    /// Number of rows the model was trained on.
    pub training_n: usize,
}

impl CalibrationModel {
    /// Feature ids the model selects on: the predictor keys after the
    /// fixed prefix.
    pub fn feature_ids(&self, fixed_len: usize) -> &[String] {
        &self.predictor_keys[fixed_len.min(self.predictor_keys.len())..]
    }
}

/// A point estimate with an honest standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub mean: f64,
    pub sd: f64,
}

impl Estimate {
    pub fn new(mean: f64, sd: f64) -> Self {
        Self { mean, sd }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_ids_skip_fixed_prefix() {
        let model = CalibrationModel {
            model_version: "1:abc".to_string(),
            updated_at: Utc::now(),
            lambda: 1.0,
            residual_sd: 0.5,
            predictor_keys: vec![
                "bias".to_string(),
                "valence".to_string(),
                "theme:work".to_string(),
            ],
            weights: vec![5.0, 1.0, -0.5],
            weight_var: vec![0.01, 0.02, 0.03],
            training_n: 20,
        };
        assert_eq!(model.feature_ids(2), &["theme:work".to_string()]);
        // Degenerate prefix longer than the key list yields an empty tail.
        assert!(model.feature_ids(10).is_empty());
    }
}
