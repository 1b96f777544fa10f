//! # Manas Models
//!
//! Shared data model for the affect-calibration and normalization engine.
//!
//! This crate holds the types that cross crate boundaries (observations,
//! baselines, training rows, calibration models, retrieval episodes) plus
//! the numeric constants that form the engine's external contract. It has
//! no behavior beyond constructors and trivial accessors; all computation
//! lives in the consuming crates.

pub mod calibration;
pub mod constants;
pub mod observation;
pub mod retrieval;
pub mod training;

pub use calibration::{CalibrationModel, Estimate};
pub use observation::{
    BaselineStats, Observation, METRIC_CALMNESS, METRIC_MOOD, POPULATION_SUBJECT,
};
pub use retrieval::RetrievalEpisode;
pub use training::TrainingRow;
