//! # Manas Calibration
//!
//! Per-subject calibration pipeline: vectorize labeled rows, fit a ridge
//! model with bootstrap weight uncertainty, predict with honest standard
//! deviations, and blend predictions with retrieval-based estimates.
//!
//! ## Invariants
//! - Pure computation: no I/O, no clocks, no ambient randomness. The
//!   trainer's RNG and timestamp are injected by the caller.
//! - Deterministic: same rows + same seed = identical model, down to the
//!   version digest.
//! - Retraining is always from scratch over the full row set; the output
//!   model replaces the previous one wholesale.

pub mod blend;
pub mod eval;
pub mod predict;
pub mod trainer;
pub mod vectorize;

mod ridge;

pub use blend::{alpha, blend, BlendConfig};
pub use eval::{evaluate, EvalSummary};
pub use predict::predict;
pub use trainer::{train, train_seeded, TrainError, TrainerConfig};
pub use vectorize::{vectorize, FIXED_PREDICTOR_KEYS};
