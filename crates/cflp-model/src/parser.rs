//! Instance parser for the flat numeric source format.
//!
//! Tokens are whitespace separated and strictly positional:
//!
//! ```text
//! F S
//! capacity_0 fixed_cost_0
//! ...
//! capacity_{F-1} fixed_cost_{F-1}
//! demand_0 ... demand_{S-1}
//! cost_{0,0} ... cost_{0,S-1}
//! ...
//! cost_{F-1,0} ... cost_{F-1,S-1}
//! ```
//!
//! Line breaks carry no meaning. The cost matrix is read row-major: the `S`
//! costs of facility 0 first, then facility 1, and so on. The token count
//! must match the header exactly.

use cflp_core::{InstanceSection, ParseError};
use tracing::debug;

use crate::instance::{AllocationCosts, Facility, Instance, Site};

/// Parses an instance from its source text.
///
/// # Examples
///
/// ```
/// use cflp_model::parse_instance;
///
/// let instance = parse_instance("2 2\n10 5\n10 7\n4 4\n1 2\n3 1\n").unwrap();
/// assert_eq!(instance.num_facilities(), 2);
/// assert_eq!(instance.allocation_cost(1, 0), 3.0);
///
/// // One token short
/// assert!(parse_instance("2 2\n10 5\n10 7\n4 4\n1 2\n3\n").is_err());
/// ```
pub fn parse_instance(source: &str) -> Result<Instance, ParseError> {
    let mut tokens = Tokens::new(source);

    let num_facilities = tokens.count("facility count")?;
    let num_sites = tokens.count("site count")?;
    let matrix_len =
        num_facilities
            .checked_mul(num_sites)
            .ok_or(ParseError::DimensionOverflow {
                facilities: num_facilities,
                sites: num_sites,
            })?;

    tokens.require(InstanceSection::Facilities, num_facilities.saturating_mul(2))?;
    let mut facilities = Vec::with_capacity(num_facilities);
    for index in 0..num_facilities {
        let capacity = tokens.value(InstanceSection::Facilities, index)?;
        let fixed_cost = tokens.value(InstanceSection::Facilities, index)?;
        facilities.push(Facility {
            capacity,
            fixed_cost,
        });
    }

    tokens.require(InstanceSection::Demands, num_sites)?;
    let mut sites = Vec::with_capacity(num_sites);
    for index in 0..num_sites {
        let demand = tokens.value(InstanceSection::Demands, index)?;
        sites.push(Site { demand });
    }

    tokens.require(InstanceSection::AllocationCosts, matrix_len)?;
    if tokens.remaining() > matrix_len {
        return Err(ParseError::TrailingTokens {
            count: tokens.remaining() - matrix_len,
        });
    }
    let mut values = Vec::with_capacity(matrix_len);
    for index in 0..matrix_len {
        values.push(tokens.value(InstanceSection::AllocationCosts, index)?);
    }

    debug!(
        event = "instance_parsed",
        facilities = num_facilities,
        sites = num_sites,
        tokens = tokens.position,
    );

    let costs = AllocationCosts::from_row_major(num_facilities, num_sites, values);
    Ok(Instance::from_checked(facilities, sites, costs))
}

/// Positional cursor over whitespace separated tokens.
struct Tokens<'a> {
    tokens: Vec<&'a str>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(source: &'a str) -> Self {
        Tokens {
            tokens: source.split_whitespace().collect(),
            position: 0,
        }
    }

    fn remaining(&self) -> usize {
        self.tokens.len() - self.position
    }

    fn require(&self, section: InstanceSection, expected: usize) -> Result<(), ParseError> {
        let found = self.remaining();
        if found < expected {
            return Err(ParseError::UnexpectedEnd {
                section,
                expected,
                found,
            });
        }
        Ok(())
    }

    fn next_token(&mut self, section: InstanceSection) -> Result<&'a str, ParseError> {
        self.require(section, 1)?;
        let token = self.tokens[self.position];
        self.position += 1;
        Ok(token)
    }

    /// Reads a header count; must be an integer of at least one.
    fn count(&mut self, name: &'static str) -> Result<usize, ParseError> {
        let position = self.position;
        let token = self.next_token(InstanceSection::Header)?;
        let value = token
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidInteger {
                position,
                token: token.to_string(),
            })?;
        if value < 1 {
            return Err(ParseError::InvalidCount { name, value });
        }
        Ok(value)
    }

    /// Reads a finite, non-negative value belonging to element `index` of `section`.
    fn value(&mut self, section: InstanceSection, index: usize) -> Result<f64, ParseError> {
        let position = self.position;
        let token = self.next_token(section)?;
        let value = token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::InvalidNumber {
                position,
                token: token.to_string(),
            })?;
        if value < 0.0 {
            return Err(ParseError::NegativeValue {
                section,
                index,
                value,
            });
        }
        Ok(value + 0.0)
    }
}
