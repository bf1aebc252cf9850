//! Objective evaluation with capacity overflow penalty.

use std::collections::BTreeMap;

use cflp_config::{check_coefficient, PenaltyConfig};
use cflp_core::{CflpError, HardSoftScore, Result};
use tracing::trace;

use crate::instance::Instance;

/// Outcome of evaluating one assignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationResult {
    /// Raw cost, plus `penalty_coefficient * total_overflow` when infeasible.
    pub objective: f64,
    /// True when no facility is over capacity.
    pub feasible: bool,
    /// Facility index to the demand above its capacity; non-zero entries only.
    pub overflow: BTreeMap<usize, f64>,
    /// Fixed costs of open facilities.
    pub opening_cost: f64,
    /// Allocation costs of every site from its assigned facility.
    pub allocation_cost: f64,
    /// Assigned demand per facility.
    pub loads: Vec<f64>,
    /// Number of sites assigned per facility.
    pub assigned_sites: Vec<usize>,
}

impl EvaluationResult {
    /// Opening plus allocation cost, without penalty.
    pub fn raw_cost(&self) -> f64 {
        self.opening_cost + self.allocation_cost
    }

    pub fn total_overflow(&self) -> f64 {
        self.overflow.values().sum()
    }

    /// Facilities serving at least one site.
    pub fn open_facilities(&self) -> impl Iterator<Item = usize> + '_ {
        self.assigned_sites
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(facility, _)| facility)
    }

    /// Lexicographic score: negated total overflow, then negated raw cost.
    ///
    /// Unlike the scalar objective, a feasible score beats every infeasible
    /// score whatever the penalty coefficient.
    pub fn score(&self) -> HardSoftScore {
        HardSoftScore::of(-self.total_overflow(), -self.raw_cost())
    }
}

/// Computes objective values of assignments.
///
/// The evaluator holds no instance state and never mutates the instance,
/// so one evaluator may be used from many threads at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluator {
    penalty_coefficient: f64,
}

impl Evaluator {
    /// Creates an evaluator with an explicit penalty coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`CflpError::Config`] unless the coefficient is finite and
    /// positive.
    pub fn new(penalty_coefficient: f64) -> Result<Self> {
        let penalty_coefficient =
            check_coefficient(penalty_coefficient).map_err(|e| CflpError::Config(e.to_string()))?;
        Ok(Evaluator {
            penalty_coefficient,
        })
    }

    /// Creates an evaluator whose coefficient follows `penalty` for `instance`.
    ///
    /// # Errors
    ///
    /// Returns [`CflpError::Config`] when the automatic coefficient cannot
    /// be derived because the instance cost bound is not finite.
    pub fn for_instance(instance: &Instance, penalty: &PenaltyConfig) -> Result<Self> {
        let coefficient = penalty
            .coefficient(instance.cost_upper_bound())
            .map_err(|e| CflpError::Config(e.to_string()))?;
        Self::new(coefficient)
    }

    pub fn penalty_coefficient(&self) -> f64 {
        self.penalty_coefficient
    }

    /// Evaluates a validated assignment.
    ///
    /// A facility is open, and pays its fixed cost, when at least one site
    /// is assigned to it. Demand above a facility's capacity is overflow;
    /// any overflow makes the assignment infeasible and adds
    /// `penalty_coefficient * total_overflow` to the objective.
    ///
    /// # Panics
    /// Panics if `assignment` has not passed [`validate`](crate::validate)
    /// for `instance`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cflp_model::{parse_instance, Evaluator};
    ///
    /// let instance = parse_instance("2 2  10 5  10 7  4 4  1 2  3 1").unwrap();
    /// let evaluator = Evaluator::new(1000.0).unwrap();
    ///
    /// let result = evaluator.evaluate(&instance, &[0, 1]);
    /// assert_eq!(result.opening_cost, 12.0);
    /// assert_eq!(result.allocation_cost, 2.0);
    /// assert_eq!(result.objective, 14.0);
    /// assert!(result.feasible);
    /// ```
    pub fn evaluate(&self, instance: &Instance, assignment: &[usize]) -> EvaluationResult {
        let num_facilities = instance.num_facilities();
        let mut loads = vec![0.0; num_facilities];
        let mut assigned_sites = vec![0usize; num_facilities];
        let mut allocation_cost = 0.0;

        for (site, &facility) in assignment.iter().enumerate() {
            allocation_cost += instance.allocation_cost(facility, site);
            loads[facility] += instance.site(site).demand;
            assigned_sites[facility] += 1;
        }

        let mut opening_cost = 0.0;
        let mut overflow = BTreeMap::new();
        for (index, facility) in instance.facilities().iter().enumerate() {
            if assigned_sites[index] > 0 {
                opening_cost += facility.fixed_cost;
            }
            let excess = loads[index] - facility.capacity;
            if excess > 0.0 {
                overflow.insert(index, excess);
            }
        }

        let feasible = overflow.is_empty();
        let raw_cost = opening_cost + allocation_cost;
        let objective = if feasible {
            raw_cost
        } else {
            let total_overflow: f64 = overflow.values().sum();
            raw_cost + self.penalty_coefficient * total_overflow
        };

        trace!(event = "evaluate", objective, feasible);

        EvaluationResult {
            objective,
            feasible,
            overflow,
            opening_cost,
            allocation_cost,
            loads,
            assigned_sites,
        }
    }
}
