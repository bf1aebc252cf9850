//! Instance fixtures.
//!
//! Provides small hand-checked scenarios and seeded random instances with
//! integral values, rendered in the whitespace separated source format.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Raw instance data, facility-major cost rows.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceData {
    pub capacities: Vec<f64>,
    pub fixed_costs: Vec<f64>,
    pub demands: Vec<f64>,
    pub costs: Vec<Vec<f64>>,
}

impl InstanceData {
    pub fn num_facilities(&self) -> usize {
        self.capacities.len()
    }

    pub fn num_sites(&self) -> usize {
        self.demands.len()
    }

    /// Renders the data as an instance source: header, one facility per
    /// line, demands on one line, then one cost row per facility.
    pub fn to_source(&self) -> String {
        let mut out = format!("{} {}\n", self.num_facilities(), self.num_sites());
        for (capacity, fixed_cost) in self.capacities.iter().zip(&self.fixed_costs) {
            out.push_str(&format!("{} {}\n", capacity, fixed_cost));
        }
        out.push_str(&join(&self.demands));
        out.push('\n');
        for row in &self.costs {
            out.push_str(&join(row));
            out.push('\n');
        }
        out
    }

    /// All tokens of [`to_source`](Self::to_source) in order.
    pub fn tokens(&self) -> Vec<String> {
        self.to_source()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Two facilities, two sites.
///
/// Capacities `[10, 10]`, fixed costs `[5, 7]`, demands `[4, 4]`,
/// costs `[[1, 2], [3, 1]]`.
/// Assignment `[0, 0]` costs 8 and `[0, 1]` costs 14, both feasible.
pub fn two_by_two() -> InstanceData {
    InstanceData {
        capacities: vec![10.0, 10.0],
        fixed_costs: vec![5.0, 7.0],
        demands: vec![4.0, 4.0],
        costs: vec![vec![1.0, 2.0], vec![3.0, 1.0]],
    }
}

/// [`two_by_two`] with facility 0 shrunk to capacity 3.
///
/// Assignment `[0, 0]` overflows facility 0 by 5.
pub fn tight_capacity() -> InstanceData {
    InstanceData {
        capacities: vec![3.0, 10.0],
        ..two_by_two()
    }
}

/// Seeded random instance with integral values.
///
/// Capacities lie in `1..=30`, fixed costs in `0..=100`, demands in
/// `0..=10` and allocation costs in `0..=50`.
pub fn random_instance(seed: u64, facilities: usize, sites: usize) -> InstanceData {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut integral = |low: u32, high: u32| f64::from(rng.random_range(low..=high));

    let capacities = (0..facilities).map(|_| integral(1, 30)).collect();
    let fixed_costs = (0..facilities).map(|_| integral(0, 100)).collect();
    let demands = (0..sites).map(|_| integral(0, 10)).collect();
    let costs = (0..facilities)
        .map(|_| (0..sites).map(|_| integral(0, 50)).collect::<Vec<_>>())
        .collect();

    InstanceData {
        capacities,
        fixed_costs,
        demands,
        costs,
    }
}

/// Seeded uniform random assignment of `sites` sites to `facilities` facilities.
pub fn random_assignment(seed: u64, facilities: usize, sites: usize) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..sites).map(|_| rng.random_range(0..facilities)).collect()
}
