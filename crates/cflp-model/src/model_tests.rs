//! Tests for the problem model facade.

use std::io::Write;
use std::sync::Arc;

use cflp_config::{CflpConfig, ThreadCount};
use cflp_core::{CflpError, OptimizationProblem, ParseError, ValidationError};
use cflp_test::{random_assignment, random_instance, tight_capacity, two_by_two};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::model::ProblemModel;

fn two_by_two_model() -> ProblemModel {
    ProblemModel::from_source(&two_by_two().to_source()).unwrap()
}

#[test]
fn test_dimensions() {
    let model = two_by_two_model();
    assert_eq!(model.num_facilities(), 2);
    assert_eq!(model.num_sites(), 2);
    assert_eq!(model.num_decision_variables(), 2);
    assert_eq!(model.domain_size(), 2);
}

#[test]
fn test_evaluate_scenarios() {
    let model = two_by_two_model();
    assert_eq!(model.evaluate(&[0, 0]).unwrap(), 8.0);
    assert_eq!(model.evaluate(&[0, 1]).unwrap(), 14.0);
    assert_eq!(model.evaluate(&[1, 1]).unwrap(), 11.0);
}

#[test]
fn test_overflow_scenario() {
    let model = ProblemModel::from_source(&tight_capacity().to_source()).unwrap();
    let penalty = model.penalty_coefficient();

    let report = model.evaluate_verbose(&[0, 0]).unwrap();
    assert!(!report.feasible);
    assert_eq!(report.overflow[&0], 5.0);
    assert_eq!(report.objective, (5.0 + 3.0) + penalty * 5.0);
    assert_eq!(model.evaluate(&[0, 0]).unwrap(), report.objective);
}

#[test]
fn test_fixed_penalty_from_config() {
    let config = CflpConfig::new().with_penalty_coefficient(1000.0);
    let model = ProblemModel::from_source_with_config(&tight_capacity().to_source(), &config)
        .unwrap();

    assert_eq!(model.penalty_coefficient(), 1000.0);
    assert_eq!(model.evaluate(&[0, 0]).unwrap(), 8.0 + 5000.0);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = CflpConfig::new().with_penalty_coefficient(f64::NAN);
    let err = ProblemModel::from_source_with_config(&two_by_two().to_source(), &config)
        .unwrap_err();
    assert!(matches!(err, CflpError::Config(_)));
}

#[test]
fn test_unbounded_costs_need_fixed_penalty() {
    // Fixed costs sum past f64::MAX, so no automatic coefficient exists.
    let source = "2 1  1 1e308  1 1e308  5  0 0";

    let err = ProblemModel::from_source(source).unwrap_err();
    assert!(matches!(err, CflpError::Config(_)));

    let config = CflpConfig::new().with_penalty_coefficient(10.0);
    let model = ProblemModel::from_source_with_config(source, &config).unwrap();
    assert_eq!(model.penalty_coefficient(), 10.0);
    assert!(!model.evaluate_verbose(&[0]).unwrap().feasible);
}

#[test]
fn test_parse_error_propagates() {
    let err = ProblemModel::from_source("2 2  10 5").unwrap_err();
    assert!(matches!(
        err,
        CflpError::Parse(ParseError::UnexpectedEnd { .. })
    ));
}

#[test]
fn test_validation_precedes_evaluation() {
    let model = two_by_two_model();

    let err = model.evaluate(&[0, 0, 0]).unwrap_err();
    assert!(matches!(
        err,
        CflpError::Validation(ValidationError::Shape {
            expected: 2,
            actual: 3
        })
    ));

    let err = model.evaluate_verbose(&[0, 2]).unwrap_err();
    assert!(matches!(
        err,
        CflpError::Validation(ValidationError::FacilityIndex {
            site: 1,
            facility: 2,
            num_facilities: 2
        })
    ));

    assert_eq!(model.evaluation_count(), 0);
}

#[test]
fn test_evaluation_count() {
    let model = two_by_two_model();
    model.evaluate(&[0, 1]).unwrap();
    model.evaluate_verbose(&[1, 1]).unwrap();
    model.score(&[0, 0]).unwrap();
    assert_eq!(model.evaluation_count(), 3);
}

#[test]
fn test_score_matches_report() {
    let model = ProblemModel::from_source(&tight_capacity().to_source()).unwrap();
    let score = model.score(&[0, 0]).unwrap();
    assert_eq!(score.hard(), -5.0);
    assert_eq!(score.soft(), -8.0);
    assert_eq!(OptimizationProblem::score(&model, &[0, 0]).unwrap(), score);
}

#[test]
fn test_batch_matches_single_evaluation() {
    let data = random_instance(3, 6, 40);
    let candidates: Vec<Vec<usize>> = (0..64).map(|seed| random_assignment(seed, 6, 40)).collect();

    for thread_count in [ThreadCount::None, ThreadCount::Auto, ThreadCount::Count(2)] {
        let config = CflpConfig::new().with_thread_count(thread_count);
        let model = ProblemModel::from_source_with_config(&data.to_source(), &config).unwrap();

        let batch = model.evaluate_batch(&candidates);
        assert_eq!(batch.len(), candidates.len());
        for (candidate, result) in candidates.iter().zip(batch) {
            assert_eq!(result.unwrap(), model.evaluate(candidate).unwrap());
        }
    }
}

#[test]
fn test_batch_keeps_errors_in_place() {
    let model = two_by_two_model();
    let candidates = vec![vec![0, 0], vec![0], vec![1, 1]];

    let results = model.evaluate_batch(&candidates);
    assert_eq!(*results[0].as_ref().unwrap(), 8.0);
    assert!(results[1].is_err());
    assert_eq!(*results[2].as_ref().unwrap(), 11.0);
}

#[test]
fn test_concurrent_evaluation() {
    let data = random_instance(8, 5, 25);
    let model = Arc::new(ProblemModel::from_source(&data.to_source()).unwrap());
    let assignment = random_assignment(1, 5, 25);
    let expected = model.evaluate(&assignment).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let model = Arc::clone(&model);
            let assignment = assignment.clone();
            std::thread::spawn(move || {
                (0..100)
                    .map(|_| model.evaluate(&assignment).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().iter().all(|&v| v == expected));
    }
    assert_eq!(model.evaluation_count(), 401);
}

#[test]
fn test_random_assignment_validates() {
    let model = ProblemModel::from_source(&random_instance(4, 7, 30).to_source()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..20 {
        let assignment = model.random_assignment(&mut rng);
        assert_eq!(assignment.len(), 30);
        assert!(model.validate(&assignment).is_ok());
    }
}

#[test]
fn test_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", two_by_two().to_source()).unwrap();

    let model = ProblemModel::from_path(file.path()).unwrap();
    assert_eq!(model.evaluate(&[0, 1]).unwrap(), 14.0);

    let via_trait = <ProblemModel as OptimizationProblem>::from_path(file.path()).unwrap();
    assert_eq!(via_trait.num_sites(), 2);
}

#[test]
fn test_missing_file() {
    let err = ProblemModel::from_path("/nonexistent/instance.txt").unwrap_err();
    assert!(matches!(err, CflpError::Io(_)));
}

#[test]
fn test_debug_output() {
    let debug = format!("{:?}", two_by_two_model());
    assert!(debug.contains("facilities: 2"));
    assert!(debug.contains("sites: 2"));
}
