//! Per-subject ridge calibration with bootstrap weight uncertainty.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use manas_models::constants::{
    CALIBRATION_SCHEMA_VERSION, DEFAULT_BOOTSTRAP_SAMPLES, DEFAULT_MAX_FEATURES,
    DEFAULT_RIDGE_LAMBDA, MIN_TRAINING_ROWS,
};
use manas_models::{CalibrationModel, TrainingRow};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

use crate::ridge;
use crate::vectorize::{vectorize, FIXED_PREDICTOR_KEYS};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum TrainError {
    /// Below the minimum row count: refusing to fit an overconfident model.
    #[error("insufficient training data: {got} rows, need at least {min}")]
    InsufficientRows { got: usize, min: usize },

    /// The normal-equation system failed to factorize.
    #[error("ridge system is ill-conditioned; check lambda and input values")]
    IllConditioned,
}

// =============================================================================
// Configuration
// =============================================================================

/// Trainer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// L2 penalty. Applied to every coordinate, bias included.
    #[serde(default = "default_lambda")]
    pub lambda: f64,
    /// Cap on the number of recurring-feature indicator columns.
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    /// Number of bootstrap resamples for weight-variance estimation.
    #[serde(default = "default_bootstrap_samples")]
    pub bootstrap_samples: usize,
    /// Minimum rows below which training fails.
    #[serde(default = "default_min_rows")]
    pub min_rows: usize,
}

fn default_lambda() -> f64 {
    DEFAULT_RIDGE_LAMBDA
}
fn default_max_features() -> usize {
    DEFAULT_MAX_FEATURES
}
fn default_bootstrap_samples() -> usize {
    DEFAULT_BOOTSTRAP_SAMPLES
}
fn default_min_rows() -> usize {
    MIN_TRAINING_ROWS
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            lambda: DEFAULT_RIDGE_LAMBDA,
            max_features: DEFAULT_MAX_FEATURES,
            bootstrap_samples: DEFAULT_BOOTSTRAP_SAMPLES,
            min_rows: MIN_TRAINING_ROWS,
        }
    }
}

// =============================================================================
// Training
// =============================================================================

/// Fit a calibration model over the full row set.
///
/// Feature selection counts feature-id occurrences over these rows only
/// (held-out rows never leak into selection) and keeps the most frequent
/// `max_features`, ties broken by id for determinism. The ridge fit is
/// closed-form; `weight_var` comes from refitting on `bootstrap_samples`
/// resamples drawn with replacement from the injected RNG.
///
/// There is no incremental variant: retraining is always from scratch and
/// the returned model replaces the previous one wholesale.
pub fn train<R: Rng>(
    rows: &[TrainingRow],
    config: &TrainerConfig,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<CalibrationModel, TrainError> {
    let n = rows.len();
    if n < config.min_rows {
        return Err(TrainError::InsufficientRows {
            got: n,
            min: config.min_rows,
        });
    }

    let feature_ids = select_features(rows, config.max_features);
    debug!(
        rows = n,
        selected = feature_ids.len(),
        "feature selection complete"
    );

    let x: Vec<Vec<f64>> = rows.iter().map(|r| vectorize(r, &feature_ids)).collect();
    let y: Vec<f64> = rows.iter().map(|r| r.label_mood).collect();

    let weights = ridge::fit(&x, &y, config.lambda)?;

    let residuals: Vec<f64> = x
        .iter()
        .zip(&y)
        .map(|(xi, yi)| yi - dot(&weights, xi))
        .collect();
    let residual_sd = population_variance(&residuals).sqrt();

    let weight_var = bootstrap_weight_variance(&x, &y, config, weights.len(), rng)?;

    let mut predictor_keys: Vec<String> =
        FIXED_PREDICTOR_KEYS.iter().map(|k| k.to_string()).collect();
    predictor_keys.extend(feature_ids);

    let model = CalibrationModel {
        model_version: model_version(&weights, &predictor_keys),
        updated_at: now,
        lambda: config.lambda,
        residual_sd,
        predictor_keys,
        weights,
        weight_var,
        training_n: n,
    };
    info!(
        version = %model.model_version,
        rows = n,
        residual_sd = model.residual_sd,
        "calibration model trained"
    );
    Ok(model)
}

/// [`train`] with a `Pcg64` seeded from `seed`; same seed, same model.
pub fn train_seeded(
    rows: &[TrainingRow],
    config: &TrainerConfig,
    now: DateTime<Utc>,
    seed: u64,
) -> Result<CalibrationModel, TrainError> {
    let mut rng = Pcg64::seed_from_u64(seed);
    train(rows, config, now, &mut rng)
}

/// Keep the `max_features` most frequent feature ids across the rows,
/// ties broken by id ascending.
fn select_features(rows: &[TrainingRow], max_features: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        for id in &row.feature_ids {
            *counts.entry(id.as_str()).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(max_features);
    ranked.into_iter().map(|(id, _)| id.to_string()).collect()
}

/// Per-coordinate variance of the weight vectors refit on bootstrap
/// resamples.
fn bootstrap_weight_variance<R: Rng>(
    x: &[Vec<f64>],
    y: &[f64],
    config: &TrainerConfig,
    p: usize,
    rng: &mut R,
) -> Result<Vec<f64>, TrainError> {
    let n = x.len();
    let b = config.bootstrap_samples;
    let mut samples: Vec<Vec<f64>> = Vec::with_capacity(b);

    let mut xb: Vec<Vec<f64>> = Vec::with_capacity(n);
    let mut yb: Vec<f64> = Vec::with_capacity(n);
    for _ in 0..b {
        xb.clear();
        yb.clear();
        for _ in 0..n {
            let i = rng.gen_range(0..n);
            xb.push(x[i].clone());
            yb.push(y[i]);
        }
        samples.push(ridge::fit(&xb, &yb, config.lambda)?);
    }

    let mut weight_var = vec![0.0; p];
    for (j, var) in weight_var.iter_mut().enumerate() {
        let coord: Vec<f64> = samples.iter().map(|w| w[j]).collect();
        *var = population_variance(&coord);
    }
    Ok(weight_var)
}

fn model_version(weights: &[f64], predictor_keys: &[String]) -> String {
    let mut hasher = Sha256::new();
    for w in weights {
        hasher.update(w.to_le_bytes());
    }
    for key in predictor_keys {
        hasher.update(key.as_bytes());
        hasher.update(b"\n");
    }
    let digest = hex::encode(hasher.finalize());
    format!("{}:{}", CALIBRATION_SCHEMA_VERSION, &digest[..12])
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}
