//! Held-out evaluation of a calibration model.

use manas_models::{CalibrationModel, TrainingRow};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::predict::predict;

/// Pure evaluation summary over a held-out row set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalSummary {
    /// Rows evaluated.
    pub n: usize,
    /// Mean absolute error of the point estimates.
    pub mae: f64,
    /// Empirical fraction of labels inside the central 80% interval
    /// `mean +/- z * sd`. A well-calibrated model sits near 0.8.
    pub coverage80: f64,
}

/// Evaluate a model on held-out rows.
///
/// No I/O, no mutation: callers that gate retrains on quality compare the
/// summary against their own thresholds. An empty row set yields zeros
/// with `n == 0`; callers must branch on `n` before trusting the metrics.
pub fn evaluate(model: &CalibrationModel, rows: &[TrainingRow]) -> EvalSummary {
    if rows.is_empty() {
        return EvalSummary {
            n: 0,
            mae: 0.0,
            coverage80: 0.0,
        };
    }

    let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
    let z80 = normal.inverse_cdf(0.9);

    let mut abs_err_sum = 0.0;
    let mut covered = 0usize;
    for row in rows {
        let est = predict(model, row);
        let err = (row.label_mood - est.mean).abs();
        abs_err_sum += err;
        if err <= z80 * est.sd {
            covered += 1;
        }
    }

    EvalSummary {
        n: rows.len(),
        mae: abs_err_sum / rows.len() as f64,
        coverage80: covered as f64 / rows.len() as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;

    fn constant_model(mean: f64, residual_sd: f64) -> CalibrationModel {
        CalibrationModel {
            model_version: "1:test".to_string(),
            updated_at: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
            lambda: 1.0,
            residual_sd,
            predictor_keys: crate::vectorize::FIXED_PREDICTOR_KEYS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            weights: vec![mean, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            weight_var: vec![0.0; 7],
            training_n: 20,
        }
    }

    fn row(label: f64) -> TrainingRow {
        TrainingRow {
            affect_valence: 0.0,
            affect_arousal: 0.0,
            sleep_hours: None,
            sleep_quality: None,
            energy_level: None,
            medication_taken: None,
            feature_ids: BTreeSet::new(),
            label_mood: label,
        }
    }

    #[test]
    fn empty_rows_yield_zeroed_summary() {
        let summary = evaluate(&constant_model(5.0, 1.0), &[]);
        assert_eq!(summary.n, 0);
        assert_eq!(summary.mae, 0.0);
    }

    #[test]
    fn mae_matches_hand_computation() {
        let model = constant_model(5.0, 1.0);
        let rows = [row(5.0), row(6.0), row(3.0)];
        let summary = evaluate(&model, &rows);
        assert_eq!(summary.n, 3);
        assert!((summary.mae - 1.0).abs() < 1e-12); // (0 + 1 + 2) / 3
    }

    #[test]
    fn tight_labels_are_fully_covered() {
        // sd = 1.0, z ~= 1.28: every label within +/-1 is covered.
        let model = constant_model(5.0, 1.0);
        let rows = [row(5.0), row(5.5), row(4.5)];
        assert_eq!(evaluate(&model, &rows).coverage80, 1.0);
    }

    #[test]
    fn distant_labels_are_uncovered() {
        let model = constant_model(5.0, 0.1);
        let rows = [row(9.0), row(1.0)];
        assert_eq!(evaluate(&model, &rows).coverage80, 0.0);
    }
}
