//! Numeric contract constants.
//!
//! These values are part of the engine's external contract: callers, the
//! implementation, and the test suite must agree on them. Changing any of
//! them changes persisted baselines and model outputs, so bump
//! [`CALIBRATION_SCHEMA_VERSION`] when they move.

/// Schema version stamped into every calibration model version string.
pub const CALIBRATION_SCHEMA_VERSION: u32 = 1;

/// Effective standard-deviation floor for z-scoring.
///
/// Prevents division blow-up for subjects whose history has shown
/// near-zero variance so far.
pub const STD_FLOOR: f64 = 0.75;

/// Symmetric clamp applied to every z-score.
pub const Z_SCORE_CLAMP: f64 = 5.0;

/// Observations required before a baseline is considered established
/// enough for z-based ranking (evidence selection, profile displays).
pub const MIN_ENTRIES_FOR_Z: u64 = 5;

/// Lower bound on the parametric model's blend weight.
pub const ALPHA_MIN: f64 = 0.25;

/// Upper bound on the parametric model's blend weight. This is also the
/// weight at zero retrieval support.
pub const ALPHA_MAX: f64 = 0.75;

/// Cap on the squared model/retrieval disagreement term folded into the
/// blended variance.
pub const VARIANCE_DISAGREEMENT_CAP: f64 = 4.0;

/// Default half-life, in days, for exponentially-weighted baselines.
pub const DEFAULT_HALF_LIFE_DAYS: f64 = 45.0;

/// Default L2 penalty for ridge calibration fits.
pub const DEFAULT_RIDGE_LAMBDA: f64 = 1.0;

/// Default number of bootstrap resamples for weight-uncertainty estimation.
pub const DEFAULT_BOOTSTRAP_SAMPLES: usize = 50;

/// Minimum training rows below which calibration must fail rather than
/// fit an overconfident model.
pub const MIN_TRAINING_ROWS: usize = 10;

/// Default cap on the number of recurring-feature indicator columns.
pub const DEFAULT_MAX_FEATURES: usize = 120;

/// Absolute 7-day slope (score-units per day) at or below which the
/// sentiment trend classifies as stable.
pub const SLOPE_STABLE_EPS: f64 = 0.05;
