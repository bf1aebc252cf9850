//! Tests for objective evaluation.

use cflp_config::PenaltyConfig;
use cflp_core::{CflpError, Score};
use cflp_test::{random_assignment, random_instance, tight_capacity, two_by_two, InstanceData};

use crate::evaluator::Evaluator;
use crate::instance::Instance;
use crate::parser::parse_instance;

fn parse(data: &InstanceData) -> Instance {
    parse_instance(&data.to_source()).unwrap()
}

/// Every assignment of `sites` sites to `facilities` facilities.
fn all_assignments(facilities: usize, sites: usize) -> Vec<Vec<usize>> {
    let mut out = vec![vec![]];
    for _ in 0..sites {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                (0..facilities).map(move |f| {
                    let mut next = prefix.clone();
                    next.push(f);
                    next
                })
            })
            .collect();
    }
    out
}

#[test]
fn test_single_open_facility() {
    let instance = parse(&two_by_two());
    let result = Evaluator::new(1000.0).unwrap().evaluate(&instance, &[0, 0]);

    assert_eq!(result.opening_cost, 5.0);
    assert_eq!(result.allocation_cost, 3.0);
    assert_eq!(result.loads, vec![8.0, 0.0]);
    assert_eq!(result.objective, 8.0);
    assert!(result.feasible);
    assert!(result.overflow.is_empty());
    assert_eq!(result.open_facilities().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn test_both_facilities_open() {
    let instance = parse(&two_by_two());
    let result = Evaluator::new(1000.0).unwrap().evaluate(&instance, &[0, 1]);

    assert_eq!(result.opening_cost, 12.0);
    assert_eq!(result.allocation_cost, 2.0);
    assert_eq!(result.objective, 14.0);
    assert!(result.feasible);
    assert_eq!(result.assigned_sites, vec![1, 1]);
}

#[test]
fn test_all_on_second_facility_is_feasible() {
    let instance = parse(&two_by_two());
    let result = Evaluator::new(1000.0).unwrap().evaluate(&instance, &[1, 1]);

    assert!(result.feasible);
    assert_eq!(result.loads[1], 8.0);
    assert_eq!(result.objective, 7.0 + 3.0 + 1.0);
}

#[test]
fn test_overflow_is_penalized() {
    let instance = parse(&tight_capacity());
    let penalty = 1000.0;
    let result = Evaluator::new(penalty).unwrap().evaluate(&instance, &[0, 0]);

    assert!(!result.feasible);
    assert_eq!(result.overflow.len(), 1);
    assert_eq!(result.overflow[&0], 5.0);
    assert_eq!(result.total_overflow(), 5.0);
    assert_eq!(result.raw_cost(), 8.0);
    assert_eq!(result.objective, (5.0 + 3.0) + penalty * 5.0);
}

#[test]
fn test_auto_penalty_coefficient() {
    let instance = parse(&tight_capacity());
    let evaluator = Evaluator::for_instance(&instance, &PenaltyConfig::Auto).unwrap();
    assert_eq!(evaluator.penalty_coefficient(), instance.cost_upper_bound() + 1.0);

    let fixed =
        Evaluator::for_instance(&instance, &PenaltyConfig::Fixed { coefficient: 1e9 }).unwrap();
    assert_eq!(fixed.penalty_coefficient(), 1e9);
}

#[test]
fn test_closed_facilities_pay_nothing() {
    let data = random_instance(17, 5, 8);
    let instance = parse(&data);
    let evaluator = Evaluator::new(1.0e6).unwrap();

    for seed in 0..50 {
        let assignment = random_assignment(seed, 5, 8);
        let result = evaluator.evaluate(&instance, &assignment);

        let expected: f64 = (0..5)
            .filter(|f| assignment.contains(f))
            .map(|f| data.fixed_costs[f])
            .sum();
        assert_eq!(result.opening_cost, expected);
        for facility in 0..5 {
            if !assignment.contains(&facility) {
                assert_eq!(result.loads[facility], 0.0);
                assert_eq!(result.assigned_sites[facility], 0);
            }
        }
    }
}

#[test]
fn test_zero_demand_site_opens_its_facility() {
    let instance = parse_instance("2 2  10 5  10 7  0 4  1 2  3 1").unwrap();
    let result = Evaluator::new(1000.0).unwrap().evaluate(&instance, &[1, 0]);

    assert_eq!(result.loads, vec![4.0, 0.0]);
    assert_eq!(result.opening_cost, 12.0);
    assert_eq!(result.open_facilities().collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn test_exact_capacity_is_feasible() {
    let instance = parse_instance("1 2  8 1  4 4  1 1").unwrap();
    let result = Evaluator::new(1000.0).unwrap().evaluate(&instance, &[0, 0]);

    assert!(result.feasible);
    assert_eq!(result.objective, 3.0);
}

#[test]
fn test_evaluation_is_deterministic() {
    let instance = parse(&random_instance(5, 4, 30));
    let evaluator = Evaluator::for_instance(&instance, &PenaltyConfig::Auto).unwrap();

    for seed in 0..20 {
        let assignment = random_assignment(seed, 4, 30);
        let first = evaluator.evaluate(&instance, &assignment);
        let second = evaluator.evaluate(&instance, &assignment);
        assert_eq!(first, second);
    }
}

#[test]
fn test_feasible_dominates_infeasible() {
    for seed in 0..25 {
        let instance = parse(&random_instance(seed, 3, 5));
        let evaluator = Evaluator::for_instance(&instance, &PenaltyConfig::Auto).unwrap();

        let results: Vec<_> = all_assignments(3, 5)
            .iter()
            .map(|a| evaluator.evaluate(&instance, a))
            .collect();
        let worst_feasible = results
            .iter()
            .filter(|r| r.feasible)
            .map(|r| r.objective)
            .fold(f64::NEG_INFINITY, f64::max);
        let best_infeasible = results
            .iter()
            .filter(|r| !r.feasible)
            .map(|r| r.objective)
            .fold(f64::INFINITY, f64::min);

        assert!(
            worst_feasible < best_infeasible,
            "seed {}: feasible {} vs infeasible {}",
            seed,
            worst_feasible,
            best_infeasible
        );
    }
}

#[test]
fn test_score_orders_feasible_first() {
    let instance = parse(&tight_capacity());
    let evaluator = Evaluator::new(0.001).unwrap();

    let infeasible = evaluator.evaluate(&instance, &[0, 0]).score();
    let feasible = evaluator.evaluate(&instance, &[1, 1]).score();

    assert!(feasible.is_feasible());
    assert!(!infeasible.is_feasible());
    assert!(feasible.is_better_than(&infeasible));
    assert_eq!(infeasible.hard(), -5.0);
    assert_eq!(infeasible.soft(), -8.0);
}

#[test]
fn test_score_orders_fractional_overflow() {
    // Overflow of 0.2 on facility 0 is cheaper under the automatic
    // coefficient than opening facility 1, but the score still ranks the
    // feasible plan first.
    let instance = parse_instance("2 2  1 0  10 100  0.6 0.6  0 0  0 0").unwrap();
    let evaluator = Evaluator::for_instance(&instance, &PenaltyConfig::Auto).unwrap();
    assert_eq!(evaluator.penalty_coefficient(), 101.0);

    let infeasible = evaluator.evaluate(&instance, &[0, 0]);
    let feasible = evaluator.evaluate(&instance, &[1, 1]);

    assert!(!infeasible.feasible);
    assert!(feasible.feasible);
    assert!(infeasible.objective < feasible.objective);
    assert!(feasible.score().is_better_than(&infeasible.score()));
}

#[test]
fn test_rejects_invalid_coefficient() {
    for coefficient in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            Evaluator::new(coefficient),
            Err(CflpError::Config(_))
        ));
    }
}

#[test]
fn test_auto_coefficient_needs_finite_bound() {
    let instance = parse_instance("2 1  1 1e308  1 1e308  5  0 0").unwrap();
    assert_eq!(instance.cost_upper_bound(), f64::INFINITY);

    assert!(matches!(
        Evaluator::for_instance(&instance, &PenaltyConfig::Auto),
        Err(CflpError::Config(_))
    ));
    let fixed = Evaluator::for_instance(&instance, &PenaltyConfig::Fixed { coefficient: 2.0 });
    assert_eq!(fixed.unwrap().penalty_coefficient(), 2.0);
}

#[test]
fn test_fractional_overflow() {
    let instance = parse_instance("1 2  1 0  0.75 0.5  0 0").unwrap();
    let result = Evaluator::new(100.0).unwrap().evaluate(&instance, &[0, 0]);

    assert!(!result.feasible);
    assert_eq!(result.overflow[&0], 0.25);
    assert_eq!(result.objective, 25.0);
}

#[test]
#[should_panic]
fn test_unvalidated_assignment_panics() {
    let instance = parse(&two_by_two());
    Evaluator::new(1.0).unwrap().evaluate(&instance, &[0, 2]);
}
