//! Fixed-layout feature vectorization of training rows.

use manas_models::TrainingRow;

/// Names of the fixed predictor prefix, in vector order. Every model's
/// `predictor_keys` starts with these, followed by the selected feature
/// ids.
pub const FIXED_PREDICTOR_KEYS: [&str; 7] = [
    "bias",
    "affect_valence",
    "affect_arousal",
    "sleep_hours",
    "sleep_quality",
    "energy_level",
    "medication_taken",
];

/// Map a row into a fixed-length numeric vector.
///
/// The prefix is `[1, valence, arousal, sleep_hours/12, sleep_quality/10,
/// energy/10, medication as 0/1]` with the scaled self-report fields
/// clamped to `[0, 1]`; unreported fields encode as 0. The tail is one
/// 0/1 indicator per entry of `feature_ids`, which the trainer selects
/// per model — the vectorizer itself is stateless.
pub fn vectorize(row: &TrainingRow, feature_ids: &[String]) -> Vec<f64> {
    let mut x = Vec::with_capacity(FIXED_PREDICTOR_KEYS.len() + feature_ids.len());
    x.push(1.0);
    x.push(row.affect_valence);
    x.push(row.affect_arousal);
    x.push(scaled(row.sleep_hours, 12.0));
    x.push(scaled(row.sleep_quality, 10.0));
    x.push(scaled(row.energy_level, 10.0));
    x.push(match row.medication_taken {
        Some(true) => 1.0,
        _ => 0.0,
    });
    for id in feature_ids {
        x.push(if row.feature_ids.contains(id) { 1.0 } else { 0.0 });
    }
    x
}

fn scaled(value: Option<f64>, max: f64) -> f64 {
    match value {
        Some(v) => (v / max).clamp(0.0, 1.0),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BTreeSet;

    fn row() -> TrainingRow {
        let mut feature_ids = BTreeSet::new();
        feature_ids.insert("theme:work".to_string());
        feature_ids.insert("trigger:conflict".to_string());
        TrainingRow {
            affect_valence: 0.4,
            affect_arousal: -0.2,
            sleep_hours: Some(6.0),
            sleep_quality: Some(7.0),
            energy_level: None,
            medication_taken: Some(true),
            feature_ids,
            label_mood: 6.5,
        }
    }

    #[test]
    fn fixed_prefix_layout() {
        let x = vectorize(&row(), &[]);
        assert_eq!(x.len(), FIXED_PREDICTOR_KEYS.len());
        assert_eq!(x[0], 1.0);
        assert_relative_eq!(x[1], 0.4);
        assert_relative_eq!(x[2], -0.2);
        assert_relative_eq!(x[3], 0.5); // 6h / 12
        assert_relative_eq!(x[4], 0.7); // 7 / 10
        assert_eq!(x[5], 0.0); // unreported energy
        assert_eq!(x[6], 1.0); // medication taken
    }

    #[test]
    fn indicators_follow_feature_id_order() {
        let ids = vec![
            "theme:family".to_string(),
            "theme:work".to_string(),
            "trigger:conflict".to_string(),
        ];
        let x = vectorize(&row(), &ids);
        assert_eq!(&x[FIXED_PREDICTOR_KEYS.len()..], &[0.0, 1.0, 1.0]);
    }

    #[test]
    fn scaled_fields_clamp() {
        let mut r = row();
        r.sleep_hours = Some(20.0);
        r.sleep_quality = Some(-3.0);
        let x = vectorize(&r, &[]);
        assert_eq!(x[3], 1.0);
        assert_eq!(x[4], 0.0);
    }
}
