//! Problem model facade consumed by external optimizers.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use cflp_config::{CflpConfig, ThreadCount};
use cflp_core::{CflpError, HardSoftScore, OptimizationProblem, Result, ValidationError};
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::evaluator::{EvaluationResult, Evaluator};
use crate::instance::Instance;
use crate::parser::parse_instance;
use crate::validator::validate;

/// How [`ProblemModel::evaluate_batch`] spreads work.
enum BatchMode {
    Sequential,
    SharedPool,
    DedicatedPool(rayon::ThreadPool),
}

/// A loaded facility location problem.
///
/// A model only exists once its instance parsed successfully, and the
/// instance never changes afterwards. Every method takes `&self`, so one
/// model can be shared (for example behind an `Arc`) by many optimizer
/// workers evaluating concurrently without locks.
///
/// # Examples
///
/// ```
/// use cflp_model::ProblemModel;
///
/// let model = ProblemModel::from_source("2 2\n10 5\n10 7\n4 4\n1 2\n3 1\n").unwrap();
///
/// assert_eq!(model.num_facilities(), 2);
/// assert_eq!(model.num_sites(), 2);
/// assert_eq!(model.evaluate(&[0, 0]).unwrap(), 8.0);
/// assert_eq!(model.evaluate(&[0, 1]).unwrap(), 14.0);
/// assert!(model.evaluate(&[0, 2]).is_err());
/// ```
pub struct ProblemModel {
    instance: Instance,
    evaluator: Evaluator,
    batch: BatchMode,
    evaluations: AtomicU64,
}

impl ProblemModel {
    /// Parses `source` and builds a model with the default configuration.
    pub fn from_source(source: &str) -> Result<Self> {
        Self::from_source_with_config(source, &CflpConfig::default())
    }

    /// Parses `source` and builds a model with `config`.
    pub fn from_source_with_config(source: &str, config: &CflpConfig) -> Result<Self> {
        let instance = parse_instance(source)?;
        Self::from_instance(instance, config)
    }

    /// Reads and parses the instance file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with_config(path, &CflpConfig::default())
    }

    /// Reads and parses the instance file at `path`, using `config`.
    pub fn from_path_with_config(path: impl AsRef<Path>, config: &CflpConfig) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        debug!(event = "instance_read", path = %path.display(), bytes = contents.len());
        Self::from_source_with_config(&contents, config)
    }

    /// Wraps an already built instance.
    pub fn from_instance(instance: Instance, config: &CflpConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| CflpError::Config(e.to_string()))?;

        let evaluator = Evaluator::for_instance(&instance, &config.penalty)?;
        let batch = match config.evaluation_thread_count {
            ThreadCount::Auto => BatchMode::SharedPool,
            ThreadCount::None => BatchMode::Sequential,
            ThreadCount::Count(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("cflp-eval-{}", i))
                    .build()
                    .map_err(|e| CflpError::Config(e.to_string()))?;
                BatchMode::DedicatedPool(pool)
            }
        };

        info!(
            event = "model_loaded",
            facilities = instance.num_facilities(),
            sites = instance.num_sites(),
            penalty_coefficient = evaluator.penalty_coefficient(),
        );

        Ok(ProblemModel {
            instance,
            evaluator,
            batch,
            evaluations: AtomicU64::new(0),
        })
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn num_facilities(&self) -> usize {
        self.instance.num_facilities()
    }

    pub fn num_sites(&self) -> usize {
        self.instance.num_sites()
    }

    pub fn penalty_coefficient(&self) -> f64 {
        self.evaluator.penalty_coefficient()
    }

    /// Number of assignments evaluated so far.
    pub fn evaluation_count(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }

    /// Checks that `assignment` is a well-formed site to facility map.
    pub fn validate(&self, assignment: &[usize]) -> std::result::Result<(), ValidationError> {
        validate(&self.instance, assignment).inspect_err(|e| {
            debug!(event = "validation_failed", error = %e);
        })
    }

    /// Objective of `assignment`, penalized when over capacity.
    ///
    /// # Errors
    ///
    /// Returns [`CflpError::Validation`] when the assignment has the wrong
    /// length or names a facility that does not exist.
    pub fn evaluate(&self, assignment: &[usize]) -> Result<f64> {
        Ok(self.evaluate_verbose(assignment)?.objective)
    }

    /// Full evaluation report of `assignment`.
    pub fn evaluate_verbose(&self, assignment: &[usize]) -> Result<EvaluationResult> {
        self.validate(assignment)?;
        let result = self.evaluator.evaluate(&self.instance, assignment);
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        Ok(result)
    }

    /// Lexicographic score of `assignment`, higher is better.
    pub fn score(&self, assignment: &[usize]) -> Result<HardSoftScore> {
        Ok(self.evaluate_verbose(assignment)?.score())
    }

    /// Evaluates many candidates, in parallel unless configured otherwise.
    ///
    /// Results are returned in input order.
    pub fn evaluate_batch<A>(&self, candidates: &[A]) -> Vec<Result<f64>>
    where
        A: AsRef<[usize]> + Sync,
    {
        match &self.batch {
            BatchMode::Sequential => candidates
                .iter()
                .map(|c| self.evaluate(c.as_ref()))
                .collect(),
            BatchMode::SharedPool => candidates
                .par_iter()
                .map(|c| self.evaluate(c.as_ref()))
                .collect(),
            BatchMode::DedicatedPool(pool) => pool.install(|| {
                candidates
                    .par_iter()
                    .map(|c| self.evaluate(c.as_ref()))
                    .collect::<Vec<_>>()
            }),
        }
    }

    /// Assigns every site to a uniformly drawn facility.
    ///
    /// The result always validates; it is not necessarily feasible.
    pub fn random_assignment<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let num_facilities = self.num_facilities();
        (0..self.num_sites())
            .map(|_| rng.random_range(0..num_facilities))
            .collect()
    }
}

impl fmt::Debug for ProblemModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProblemModel")
            .field("facilities", &self.num_facilities())
            .field("sites", &self.num_sites())
            .field("penalty_coefficient", &self.penalty_coefficient())
            .field("evaluations", &self.evaluation_count())
            .finish()
    }
}

impl OptimizationProblem for ProblemModel {
    type Score = HardSoftScore;

    fn from_source(source: &str) -> Result<Self> {
        ProblemModel::from_source(source)
    }

    fn num_decision_variables(&self) -> usize {
        self.num_sites()
    }

    fn domain_size(&self) -> usize {
        self.num_facilities()
    }

    fn evaluate(&self, solution: &[usize]) -> Result<f64> {
        ProblemModel::evaluate(self, solution)
    }

    fn score(&self, solution: &[usize]) -> Result<HardSoftScore> {
        ProblemModel::score(self, solution)
    }
}
