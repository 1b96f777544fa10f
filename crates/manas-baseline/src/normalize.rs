//! Bounded z-score normalization against a baseline.

use manas_models::constants::{STD_FLOOR, Z_SCORE_CLAMP};
use manas_models::BaselineStats;

/// Z-score a raw value against a baseline.
///
/// Total over all inputs:
/// - non-finite `raw` normalizes to 0 (graceful degradation of a single
///   data point rather than failing the computation),
/// - `count < 2` normalizes to 0 (cold start: one observation cannot
///   anchor a deviation),
/// - the effective denominator is floored at [`STD_FLOOR`] so near-zero
///   historical variance cannot blow the score up,
/// - the result is clamped to `[-Z_SCORE_CLAMP, Z_SCORE_CLAMP]` so a
///   single extreme entry cannot dominate downstream consumers.
pub fn z_score(raw: f64, baseline: &BaselineStats) -> f64 {
    if !raw.is_finite() || baseline.count < 2 {
        return 0.0;
    }
    let std_eff = baseline.std.max(STD_FLOOR);
    ((raw - baseline.mean) / std_eff).clamp(-Z_SCORE_CLAMP, Z_SCORE_CLAMP)
}
