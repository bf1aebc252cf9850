//! CFLP - Capacitated Facility Location Problem model
//!
//! Parse an instance, hand the model to any optimizer, and evaluate
//! candidate site to facility assignments.
//!
//! # Example
//!
//! ```rust
//! use cflp::prelude::*;
//!
//! let model = ProblemModel::from_source("2 2\n10 5\n10 7\n4 4\n1 2\n3 1\n").unwrap();
//!
//! assert_eq!(model.num_decision_variables(), 2);
//! assert_eq!(model.evaluate(&[0, 0]).unwrap(), 8.0);
//!
//! let report = model.evaluate_verbose(&[0, 1]).unwrap();
//! assert_eq!(report.open_facilities().count(), 2);
//! assert!(report.score().is_feasible());
//! ```

// Errors and scores
pub use cflp_core::{
    CflpError, HardSoftScore, InstanceError, InstanceSection, OptimizationProblem, ParseError,
    Result, Score, ValidationError,
};

// Configuration
pub use cflp_config::{CflpConfig, ConfigError, PenaltyConfig, ThreadCount};

// Model
pub use cflp_model::{
    parse_instance, validate, AllocationCosts, EvaluationResult, Evaluator, Facility, Instance,
    ProblemModel, Site,
};

#[cfg(feature = "console")]
mod console;
#[cfg(feature = "console")]
pub use console::init_logging;

pub mod prelude {
    pub use super::{
        CflpConfig, CflpError, EvaluationResult, HardSoftScore, Instance, OptimizationProblem,
        PenaltyConfig, ProblemModel, Score,
    };
}
