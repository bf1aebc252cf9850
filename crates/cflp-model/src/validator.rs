//! Shape validation of candidate assignments.

use cflp_core::ValidationError;

use crate::instance::Instance;

/// Checks that `assignment` maps every site of `instance` to an existing
/// facility.
///
/// Checks run in order and stop at the first failure: length first, then
/// each entry from site 0 upwards. Costs and capacities are not inspected;
/// an over-capacity assignment is valid and is penalized by evaluation.
///
/// # Examples
///
/// ```
/// use cflp_core::ValidationError;
/// use cflp_model::{parse_instance, validate};
///
/// let instance = parse_instance("2 2  10 5  10 7  4 4  1 2  3 1").unwrap();
///
/// assert!(validate(&instance, &[0, 1]).is_ok());
/// assert_eq!(
///     validate(&instance, &[0, 1, 1]),
///     Err(ValidationError::Shape { expected: 2, actual: 3 })
/// );
/// assert_eq!(
///     validate(&instance, &[0, 2]),
///     Err(ValidationError::FacilityIndex { site: 1, facility: 2, num_facilities: 2 })
/// );
/// ```
pub fn validate(instance: &Instance, assignment: &[usize]) -> Result<(), ValidationError> {
    let expected = instance.num_sites();
    if assignment.len() != expected {
        return Err(ValidationError::Shape {
            expected,
            actual: assignment.len(),
        });
    }

    let num_facilities = instance.num_facilities();
    match assignment
        .iter()
        .enumerate()
        .find(|&(_, &facility)| facility >= num_facilities)
    {
        Some((site, &facility)) => Err(ValidationError::FacilityIndex {
            site,
            facility,
            num_facilities,
        }),
        None => Ok(()),
    }
}
