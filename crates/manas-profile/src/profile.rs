//! Longitudinal profile assembly.

use chrono::{DateTime, Duration, Utc};
use manas_baseline::{z_score, BaselineStore};
use manas_models::{BaselineStats, METRIC_CALMNESS, METRIC_MOOD};
use serde::{Deserialize, Serialize};

use crate::composite::composite_score;
use crate::themes::{frequency_table, FrequencyEntry};
use crate::trend::{classify_trend, rolling_volatility, slope, SentimentTrend};

/// One scored journal entry, ordered by timestamp in the history the
/// aggregator consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntry {
    pub ts: DateTime<Utc>,
    /// Mood estimate on the 1-10 scale.
    pub mood: f64,
    /// Anxiety estimate on the 1-10 scale (reverse-coded to calmness
    /// internally; the raw value is kept here for display).
    pub anxiety: f64,
    /// Recurring themes detected in the entry.
    pub themes: Vec<String>,
    /// Triggers detected in the entry.
    pub triggers: Vec<String>,
    /// Whether the extraction flagged crisis language.
    pub crisis_flag: bool,
    /// Short excerpt for display as evidence.
    pub excerpt: String,
}

/// A representative snippet chosen by evidence selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSnippet {
    pub ts: DateTime<Utc>,
    pub excerpt: String,
    /// Mood z-score against the subject baseline at selection time
    /// (0 while the baseline is not yet established).
    pub mood_z: f64,
    pub crisis_flag: bool,
}

/// Profile computation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Trailing period for theme/trigger frequency tables, in days.
    #[serde(default = "default_theme_window_days")]
    pub theme_window_days: f64,
    /// Rows kept in each frequency table.
    #[serde(default = "default_top_themes")]
    pub top_themes: usize,
    /// Snippets kept by evidence selection.
    #[serde(default = "default_top_evidence")]
    pub top_evidence: usize,
    /// Entries in the rolling volatility window.
    #[serde(default = "default_volatility_window")]
    pub volatility_window: usize,
}

fn default_theme_window_days() -> f64 {
    30.0
}
fn default_top_themes() -> usize {
    5
}
fn default_top_evidence() -> usize {
    3
}
fn default_volatility_window() -> usize {
    7
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            theme_window_days: 30.0,
            top_themes: 5,
            top_evidence: 3,
            volatility_window: 7,
        }
    }
}

/// Derived, read-only aggregate over a subject's history.
///
/// Recomputed on demand; never persisted as the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalProfile {
    pub subject_id: String,
    pub generated_at: DateTime<Utc>,
    pub entry_count: usize,
    /// Tracked mood baseline, if any observations have been absorbed.
    pub mood_baseline: Option<BaselineStats>,
    /// Tracked calmness baseline, if any observations have been absorbed.
    pub calmness_baseline: Option<BaselineStats>,
    /// Composite-score slope over the trailing 7 days, units per day.
    pub slope_7d: Option<f64>,
    /// Composite-score slope over the trailing 14 days, units per day.
    pub slope_14d: Option<f64>,
    /// Rolling sample standard deviation of the composite score.
    pub volatility: Option<f64>,
    pub sentiment_trend: SentimentTrend,
    pub top_themes: Vec<FrequencyEntry>,
    pub top_triggers: Vec<FrequencyEntry>,
    pub evidence: Vec<EvidenceSnippet>,
}

/// Build a profile over a subject's ordered entry history.
///
/// `entries` must be sorted by timestamp ascending. Trend and volatility
/// anchor at the most recent entry; theme tables cover the trailing
/// window ending at `now`; evidence ranks crisis entries first, then by
/// absolute mood z-score against the tracked baseline (z-ranking only
/// once the baseline is established).
pub fn build_profile(
    subject_id: &str,
    entries: &[ScoredEntry],
    baselines: &BaselineStore,
    config: &ProfileConfig,
    now: DateTime<Utc>,
) -> LongitudinalProfile {
    let series: Vec<f64> = entries
        .iter()
        .map(|e| composite_score(e.mood, e.anxiety))
        .collect();
    let points: Vec<(DateTime<Utc>, f64)> = entries
        .iter()
        .zip(&series)
        .map(|(e, &c)| (e.ts, c))
        .collect();

    let (slope_7d, slope_14d, volatility) = match entries.len().checked_sub(1) {
        Some(last) => (
            slope(&points, last, 7.0),
            slope(&points, last, 14.0),
            rolling_volatility(&series, last, config.volatility_window),
        ),
        None => (None, None, None),
    };

    let window = Duration::milliseconds((config.theme_window_days * 86_400_000.0) as i64);
    let recent: Vec<&ScoredEntry> = entries.iter().filter(|e| now - e.ts <= window).collect();
    let theme_lists: Vec<Vec<String>> = recent.iter().map(|e| e.themes.clone()).collect();
    let trigger_lists: Vec<Vec<String>> = recent.iter().map(|e| e.triggers.clone()).collect();

    LongitudinalProfile {
        subject_id: subject_id.to_string(),
        generated_at: now,
        entry_count: entries.len(),
        mood_baseline: baselines.get(subject_id, METRIC_MOOD).cloned(),
        calmness_baseline: baselines.get(subject_id, METRIC_CALMNESS).cloned(),
        slope_7d,
        slope_14d,
        volatility,
        sentiment_trend: classify_trend(slope_7d),
        top_themes: frequency_table(&theme_lists, config.top_themes),
        top_triggers: frequency_table(&trigger_lists, config.top_themes),
        evidence: select_evidence(subject_id, entries, baselines, config.top_evidence),
    }
}

/// Rank entries by crisis flag, then absolute mood z-score, then recency,
/// and keep the top `top_n` as representative snippets.
fn select_evidence(
    subject_id: &str,
    entries: &[ScoredEntry],
    baselines: &BaselineStore,
    top_n: usize,
) -> Vec<EvidenceSnippet> {
    let mood_baseline = baselines.get(subject_id, METRIC_MOOD);
    let established = mood_baseline.map(BaselineStats::established).unwrap_or(false);

    let mut ranked: Vec<(f64, &ScoredEntry)> = entries
        .iter()
        .map(|e| {
            let z = match (established, mood_baseline) {
                (true, Some(b)) => z_score(e.mood, b),
                _ => 0.0,
            };
            (z, e)
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.1.crisis_flag
            .cmp(&a.1.crisis_flag)
            .then_with(|| b.0.abs().total_cmp(&a.0.abs()))
            .then_with(|| b.1.ts.cmp(&a.1.ts))
    });

    ranked
        .into_iter()
        .take(top_n)
        .map(|(z, e)| EvidenceSnippet {
            ts: e.ts,
            excerpt: e.excerpt.clone(),
            mood_z: z,
            crisis_flag: e.crisis_flag,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use manas_models::Observation;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap() + Duration::days(n)
    }

    fn entry(n: i64, mood: f64, anxiety: f64, themes: &[&str]) -> ScoredEntry {
        ScoredEntry {
            ts: day(n),
            mood,
            anxiety,
            themes: themes.iter().map(|s| s.to_string()).collect(),
            triggers: vec![],
            crisis_flag: false,
            excerpt: format!("entry {}", n),
        }
    }

    fn store_with_history(subject: &str, moods: &[f64]) -> BaselineStore {
        let mut store = BaselineStore::default();
        for (i, &m) in moods.iter().enumerate() {
            store.observe(&Observation {
                subject_id: subject.to_string(),
                metric: METRIC_MOOD.to_string(),
                value: m,
                ts: day(i as i64),
            });
        }
        store
    }

    #[test]
    fn empty_history_is_a_cold_start_not_an_error() {
        let profile = build_profile(
            "alice",
            &[],
            &BaselineStore::default(),
            &ProfileConfig::default(),
            day(0),
        );
        assert_eq!(profile.entry_count, 0);
        assert_eq!(profile.slope_7d, None);
        assert_eq!(profile.volatility, None);
        assert_eq!(profile.sentiment_trend, SentimentTrend::InsufficientData);
        assert!(profile.top_themes.is_empty());
        assert!(profile.evidence.is_empty());
        assert!(profile.mood_baseline.is_none());
    }

    #[test]
    fn improving_history_classifies_improving() {
        let entries: Vec<_> = (0..10)
            .map(|i| entry(i, 4.0 + 0.4 * i as f64, 5.0, &["work"]))
            .collect();
        let store = store_with_history("alice", &[4.0, 4.4, 4.8, 5.2, 5.6, 6.0]);
        let profile = build_profile(
            "alice",
            &entries,
            &store,
            &ProfileConfig::default(),
            day(9),
        );

        assert_eq!(profile.sentiment_trend, SentimentTrend::Improving);
        assert!(profile.slope_7d.unwrap() > 0.1);
        assert!(profile.slope_14d.unwrap() > 0.1);
        assert!(profile.volatility.unwrap() > 0.0);
        assert!(profile.mood_baseline.is_some());
    }

    #[test]
    fn theme_tables_cover_only_the_trailing_window() {
        let mut entries = vec![entry(0, 5.0, 5.0, &["ancient"])];
        entries.extend((60..64).map(|i| entry(i, 5.0, 5.0, &["recent"])));
        let profile = build_profile(
            "alice",
            &entries,
            &BaselineStore::default(),
            &ProfileConfig::default(),
            day(63),
        );

        assert_eq!(profile.top_themes.len(), 1);
        assert_eq!(profile.top_themes[0].name, "recent");
        assert_eq!(profile.top_themes[0].count, 4);
    }

    #[test]
    fn crisis_entries_lead_evidence() {
        let mut entries: Vec<_> = (0..8).map(|i| entry(i, 5.0, 5.0, &[])).collect();
        entries[2].crisis_flag = true;
        entries[5].mood = 9.5; // extreme deviation

        let store = store_with_history("alice", &[5.0; 10]);
        let profile = build_profile(
            "alice",
            &entries,
            &store,
            &ProfileConfig::default(),
            day(7),
        );

        assert_eq!(profile.evidence.len(), 3);
        assert!(profile.evidence[0].crisis_flag);
        assert_eq!(profile.evidence[1].excerpt, "entry 5");
        assert!(profile.evidence[1].mood_z > 0.0);
    }

    #[test]
    fn unestablished_baseline_skips_z_ranking() {
        let entries: Vec<_> = (0..4).map(|i| entry(i, 5.0 + i as f64, 5.0, &[])).collect();
        // Only 2 observations: below MIN_ENTRIES_FOR_Z.
        let store = store_with_history("alice", &[5.0, 5.0]);
        let profile = build_profile(
            "alice",
            &entries,
            &store,
            &ProfileConfig::default(),
            day(3),
        );
        assert!(profile.evidence.iter().all(|s| s.mood_z == 0.0));
        // Ties fall back to recency: newest first.
        assert_eq!(profile.evidence[0].excerpt, "entry 3");
    }
}
