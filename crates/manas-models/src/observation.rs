//! Raw observations and per-(subject, metric) baseline state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel subject id for population-level baselines.
///
/// Population baselines are tracked with the same machinery as personal
/// ones; the sentinel keeps them addressable in the same keyed store.
pub const POPULATION_SUBJECT: &str = "__population__";

/// Metric name for mood baselines.
pub const METRIC_MOOD: &str = "mood";

/// Metric name for calmness baselines.
///
/// Anxiety is reverse-coded into calmness (`11 - anxiety`) once, at the
/// boundary that records observations; everything downstream tracks and
/// names the value as calmness so sign conventions stay consistent.
pub const METRIC_CALMNESS: &str = "calmness";

/// A single raw metric observation.
///
/// Immutable once recorded. The only mutation path in the engine is
/// "append a new observation", which produces an updated [`BaselineStats`]
/// for the caller to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Subject the observation belongs to (or [`POPULATION_SUBJECT`]).
    pub subject_id: String,
    /// Metric name, e.g. `"mood"` or `"calmness"`.
    pub metric: String,
    /// Raw metric value as produced by the extraction boundary.
    pub value: f64,
    /// When the observation was made.
    pub ts: DateTime<Utc>,
}

/// Exponentially-weighted baseline for one (subject, metric) pair.
///
/// `count == 0` means the mean/std are seed values and not yet meaningful;
/// consumers must treat that as a cold-start state, not data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineStats {
    /// Exponentially-weighted mean.
    pub mean: f64,
    /// Exponentially-weighted standard deviation, always >= 0.
    pub std: f64,
    /// Number of observations absorbed so far.
    pub count: u64,
    /// Timestamp of the most recent observation, `None` before the first.
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl BaselineStats {
    /// Seed a baseline with prior mean/std and no observations.
    pub fn seed(mean: f64, std: f64) -> Self {
        Self {
            mean,
            std: std.max(0.0),
            count: 0,
            last_updated_at: None,
        }
    }

    /// Whether enough observations have been absorbed for z-based ranking.
    pub fn established(&self) -> bool {
        self.count >= crate::constants::MIN_ENTRIES_FOR_Z
    }
}

impl Default for BaselineStats {
    /// Neutral seed on the 1-10 scale used by the affect metrics.
    fn default() -> Self {
        Self::seed(5.5, 2.0)
    }
}
