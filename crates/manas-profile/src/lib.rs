//! # Manas Profile
//!
//! Longitudinal aggregates over a subject's ordered entry history:
//! composite wellness scores, trend slopes, rolling volatility, recurring
//! theme/trigger frequencies, sentiment-trend classification, and
//! representative evidence selection.
//!
//! ## Invariants
//! - All functions are pure given the ordered history; no hidden state.
//! - "Not yet computable" is a first-class state (`None` /
//!   `InsufficientData`), never an error.
//! - Profiles are derived views, recomputed on demand; the underlying
//!   observations remain the source of truth.

pub mod composite;
pub mod profile;
pub mod themes;
pub mod trend;

pub use composite::{anxiety_to_calmness, composite_score};
pub use profile::{build_profile, EvidenceSnippet, LongitudinalProfile, ProfileConfig, ScoredEntry};
pub use themes::{frequency_table, FrequencyEntry};
pub use trend::{classify_trend, rolling_volatility, slope, SentimentTrend};
