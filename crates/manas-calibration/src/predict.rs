//! Point prediction with propagated uncertainty.

use manas_models::{CalibrationModel, Estimate, TrainingRow};

use crate::vectorize::{vectorize, FIXED_PREDICTOR_KEYS};

/// Predict a mood estimate for a new row.
///
/// `mean = w . x`; `sd = sqrt(residual_sd^2 + sum(x_i^2 * weight_var_i))`.
/// The variance term treats weight coordinates as independent (diagonal
/// bootstrap variance, no covariance propagation). That is a deliberate
/// first-order approximation — replacing it with a full covariance model
/// changes numeric output and breaks the contract.
pub fn predict(model: &CalibrationModel, row: &TrainingRow) -> Estimate {
    let x = vectorize(row, model.feature_ids(FIXED_PREDICTOR_KEYS.len()));

    let mean: f64 = model.weights.iter().zip(&x).map(|(w, xi)| w * xi).sum();
    let param_var: f64 = model
        .weight_var
        .iter()
        .zip(&x)
        .map(|(v, xi)| xi * xi * v)
        .sum();
    let sd = (model.residual_sd * model.residual_sd + param_var).sqrt();

    Estimate::new(mean, sd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;

    fn model(weights: Vec<f64>, weight_var: Vec<f64>, keys: Vec<&str>) -> CalibrationModel {
        CalibrationModel {
            model_version: "1:test".to_string(),
            updated_at: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
            lambda: 1.0,
            residual_sd: 0.5,
            predictor_keys: keys.into_iter().map(|k| k.to_string()).collect(),
            weights,
            weight_var,
            training_n: 20,
        }
    }

    fn row_with(features: &[&str]) -> TrainingRow {
        TrainingRow {
            affect_valence: 0.5,
            affect_arousal: 0.0,
            sleep_hours: None,
            sleep_quality: None,
            energy_level: None,
            medication_taken: None,
            feature_ids: features.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
            label_mood: 0.0,
        }
    }

    #[test]
    fn mean_is_dot_product() {
        let mut keys = FIXED_PREDICTOR_KEYS.to_vec();
        keys.push("theme:work");
        let weights = vec![4.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0];
        let m = model(weights, vec![0.0; 8], keys);

        // x = [1, 0.5, 0, 0, 0, 0, 0, 1] -> 4 + 1 - 1 = 4
        let est = predict(&m, &row_with(&["theme:work"]));
        assert_relative_eq!(est.mean, 4.0, epsilon = 1e-12);
        // Zero weight variance: sd collapses to the residual sd.
        assert_relative_eq!(est.sd, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn sd_combines_residual_and_parameter_uncertainty() {
        let keys = FIXED_PREDICTOR_KEYS.to_vec();
        let m = model(
            vec![5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            vec![0.04, 0.09, 0.0, 0.0, 0.0, 0.0, 0.0],
            keys,
        );

        // x = [1, 0.5, 0, ...]: param_var = 1*0.04 + 0.25*0.09
        let est = predict(&m, &row_with(&[]));
        let expected = (0.5_f64 * 0.5 + 0.04 + 0.25 * 0.09).sqrt();
        assert_relative_eq!(est.sd, expected, epsilon = 1e-12);
    }

    #[test]
    fn absent_features_contribute_nothing() {
        let mut keys = FIXED_PREDICTOR_KEYS.to_vec();
        keys.push("theme:family");
        let m = model(
            vec![5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0],
            vec![0.0; 8],
            keys,
        );
        let est = predict(&m, &row_with(&["theme:unrelated"]));
        assert_relative_eq!(est.mean, 5.0, epsilon = 1e-12);
    }
}
