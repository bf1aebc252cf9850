//! CFLP Model - Capacitated facility location problem engine
//!
//! Turns a flat numeric instance source into an immutable [`Instance`],
//! checks candidate assignments with [`validate`] and scores them with an
//! [`Evaluator`]. [`ProblemModel`] ties the pieces together behind the
//! contract external optimizers use: construct from a source, read the
//! dimensions, call `evaluate`.
//!
//! # Example
//!
//! ```
//! use cflp_model::ProblemModel;
//!
//! let model = ProblemModel::from_source("2 2  3 5  10 7  4 4  1 2  3 1").unwrap();
//!
//! // Facility 0 holds 3 units but receives 8: overflow of 5.
//! let report = model.evaluate_verbose(&[0, 0]).unwrap();
//! assert!(!report.feasible);
//! assert_eq!(report.overflow.get(&0), Some(&5.0));
//! assert_eq!(
//!     report.objective,
//!     report.raw_cost() + model.penalty_coefficient() * 5.0
//! );
//! ```

pub mod evaluator;
pub mod instance;
pub mod model;
pub mod parser;
pub mod validator;

#[cfg(test)]
mod evaluator_tests;
#[cfg(test)]
mod model_tests;

pub use evaluator::{EvaluationResult, Evaluator};
pub use instance::{AllocationCosts, Facility, Instance, Site};
pub use model::ProblemModel;
pub use parser::parse_instance;
pub use validator::validate;
