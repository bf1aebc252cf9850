//! CFLP Core - Shared types for the capacitated facility location engine
//!
//! This crate provides the fundamental abstractions used by the model crates:
//! - Error types for parsing, instance construction and solution validation
//! - Score types for comparing candidate assignments
//! - The `OptimizationProblem` capability trait consumed by external optimizers

pub mod error;
pub mod problem;
pub mod score;

pub use error::{
    CflpError, InstanceError, InstanceSection, ParseError, Result, ValidationError,
};
pub use problem::OptimizationProblem;
pub use score::{HardSoftScore, Score, ScoreLevel};
