//! # Manas Baseline
//!
//! Online per-(subject, metric) baselines under exponential time-decay,
//! and the bounded z-score normalizer built on top of them.
//!
//! ## Invariants
//! - Pure computation: no I/O, no clocks, no ambient state. Timestamps are
//!   supplied by the caller; persistence is the caller's responsibility.
//! - An observation's influence on the mean decays geometrically in
//!   wall-clock time, not call count.
//! - Z-scores are total: every finite or non-finite input maps to a value
//!   in `[-Z_SCORE_CLAMP, Z_SCORE_CLAMP]`.

pub mod ewma;
pub mod normalize;
pub mod store;

pub use ewma::{update, EwmaConfig};
pub use normalize::z_score;
pub use store::BaselineStore;
