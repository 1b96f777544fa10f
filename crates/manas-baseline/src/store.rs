//! Keyed baseline store: one [`BaselineStats`] per (subject, metric).
//!
//! The store is an explicit value passed into the engine rather than
//! ambient global state; load-at-startup, persistence, and per-subject
//! write serialization are the caller's concern. `&mut self` on the write
//! path makes lost updates unrepresentable within one store instance, and
//! `BTreeMap` keeps iteration deterministic.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use manas_models::{BaselineStats, Observation};
use tracing::{debug, info};

use crate::ewma::{update, EwmaConfig};
use crate::normalize::z_score;

/// Keyed store of exponentially-weighted baselines.
#[derive(Debug, Clone)]
pub struct BaselineStore {
    baselines: BTreeMap<(String, String), BaselineStats>,
    config: EwmaConfig,
    /// Seed applied when a (subject, metric) pair is first observed.
    seed: BaselineStats,
}

impl BaselineStore {
    /// Create an empty store with the given decay configuration.
    pub fn new(config: EwmaConfig) -> Self {
        Self {
            baselines: BTreeMap::new(),
            config,
            seed: BaselineStats::default(),
        }
    }

    /// Create an empty store with a custom seed for new pairs.
    pub fn with_seed(config: EwmaConfig, seed: BaselineStats) -> Self {
        Self {
            baselines: BTreeMap::new(),
            config,
            seed,
        }
    }

    /// Load a persisted baseline, replacing any tracked state for the pair.
    pub fn insert(&mut self, subject_id: &str, metric: &str, stats: BaselineStats) {
        self.baselines
            .insert((subject_id.to_string(), metric.to_string()), stats);
    }

    /// Absorb an observation, returning the updated baseline for the
    /// caller to persist.
    pub fn observe(&mut self, obs: &Observation) -> BaselineStats {
        let key = (obs.subject_id.clone(), obs.metric.clone());
        let current = self.baselines.get(&key).unwrap_or(&self.seed);
        let updated = update(current, obs.value, obs.ts, &self.config);
        debug!(
            subject = %obs.subject_id,
            metric = %obs.metric,
            count = updated.count,
            mean = updated.mean,
            "baseline updated"
        );
        self.baselines.insert(key, updated.clone());
        updated
    }

    /// Look up the tracked baseline for a pair, if any.
    pub fn get(&self, subject_id: &str, metric: &str) -> Option<&BaselineStats> {
        self.baselines
            .get(&(subject_id.to_string(), metric.to_string()))
    }

    /// Z-score a raw value against the tracked baseline. Untracked pairs
    /// are cold starts and score 0.
    pub fn z_score(&self, subject_id: &str, metric: &str, raw: f64) -> f64 {
        match self.get(subject_id, metric) {
            Some(baseline) => z_score(raw, baseline),
            None => 0.0,
        }
    }

    /// Explicitly reset a pair, returning the removed baseline. This is
    /// the only deletion path.
    pub fn reset(&mut self, subject_id: &str, metric: &str) -> Option<BaselineStats> {
        let removed = self
            .baselines
            .remove(&(subject_id.to_string(), metric.to_string()));
        if removed.is_some() {
            info!(subject = %subject_id, metric = %metric, "baseline reset");
        }
        removed
    }

    /// Timestamp of the most recent observation for a pair.
    pub fn last_updated_at(&self, subject_id: &str, metric: &str) -> Option<DateTime<Utc>> {
        self.get(subject_id, metric)
            .and_then(|b| b.last_updated_at)
    }

    /// Iterate tracked pairs in deterministic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), &BaselineStats)> {
        self.baselines.iter()
    }

    /// Number of tracked pairs.
    pub fn len(&self) -> usize {
        self.baselines.len()
    }

    /// Whether the store tracks no pairs.
    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }
}

impl Default for BaselineStore {
    fn default() -> Self {
        Self::new(EwmaConfig::default())
    }
}
