//! Capability interface shared by pluggable optimization problems.

use std::path::Path;

use crate::error::Result;
use crate::score::Score;

/// A problem that external search algorithms can optimize.
///
/// Candidate solutions are vectors of `num_decision_variables()` integers,
/// each in `0..domain_size()`. Problems are constructed explicitly from their
/// source and handed to whichever optimizer needs them; there is no global
/// registry.
///
/// Implementations must be `Send + Sync` so many optimizer workers can
/// evaluate candidates against one shared problem without locking.
///
/// # Example
///
/// ```
/// use cflp_core::{HardSoftScore, OptimizationProblem, Result, ValidationError};
///
/// /// Pick one of `n` values per variable, cost is the sum of picked values.
/// struct SumProblem {
///     variables: usize,
///     values: usize,
/// }
///
/// impl OptimizationProblem for SumProblem {
///     type Score = HardSoftScore;
///
///     fn from_source(source: &str) -> Result<Self> {
///         let variables = source.trim().len();
///         Ok(SumProblem { variables, values: 3 })
///     }
///
///     fn num_decision_variables(&self) -> usize {
///         self.variables
///     }
///
///     fn domain_size(&self) -> usize {
///         self.values
///     }
///
///     fn evaluate(&self, solution: &[usize]) -> Result<f64> {
///         if solution.len() != self.variables {
///             return Err(ValidationError::Shape {
///                 expected: self.variables,
///                 actual: solution.len(),
///             }
///             .into());
///         }
///         Ok(solution.iter().map(|&v| v as f64).sum())
///     }
///
///     fn score(&self, solution: &[usize]) -> Result<HardSoftScore> {
///         Ok(HardSoftScore::of_soft(-self.evaluate(solution)?))
///     }
/// }
///
/// let problem = SumProblem::from_source("abc").unwrap();
/// assert_eq!(problem.num_decision_variables(), 3);
/// assert_eq!(problem.evaluate(&[0, 1, 2]).unwrap(), 3.0);
/// assert!(problem.evaluate(&[0]).is_err());
/// ```
pub trait OptimizationProblem: Send + Sync + Sized {
    /// Lexicographic score for optimizers that compare levels.
    type Score: Score;

    /// Builds the problem from raw source content.
    fn from_source(source: &str) -> Result<Self>;

    /// Reads `path` and builds the problem from its content.
    fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_source(&contents)
    }

    /// Number of integer decision variables in a candidate solution.
    fn num_decision_variables(&self) -> usize;

    /// Number of values each decision variable may take.
    fn domain_size(&self) -> usize;

    /// Scalar objective to minimize.
    fn evaluate(&self, solution: &[usize]) -> Result<f64>;

    /// Multi-level score, higher is better.
    fn score(&self, solution: &[usize]) -> Result<Self::Score>;
}
