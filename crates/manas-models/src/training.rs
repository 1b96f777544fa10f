//! Labeled training rows consumed by the calibration trainer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One labeled row of affect signals, self-report fields, and recurring
/// feature indicators.
///
/// Produced externally from persisted extraction + self-report history and
/// consumed read-only by the trainer. Optional fields are genuinely absent
/// data, not zeros: the vectorizer decides how to encode them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    /// Affect valence from the extraction service.
    pub affect_valence: f64,
    /// Affect arousal from the extraction service.
    pub affect_arousal: f64,
    /// Self-reported hours of sleep, if reported.
    pub sleep_hours: Option<f64>,
    /// Self-reported sleep quality on a 1-10 scale, if reported.
    pub sleep_quality: Option<f64>,
    /// Self-reported energy level on a 1-10 scale, if reported.
    pub energy_level: Option<f64>,
    /// Whether medication was taken, if reported.
    pub medication_taken: Option<bool>,
    /// Recurring theme/trigger identifiers present in this entry.
    /// `BTreeSet` keeps serialization and feature counting deterministic.
    pub feature_ids: BTreeSet<String>,
    /// Target mood label on the 1-10 scale.
    pub label_mood: f64,
}

impl TrainingRow {
    /// Whether the given feature id is present in this row.
    pub fn has_feature(&self, id: &str) -> bool {
        self.feature_ids.contains(id)
    }
}
