//! Error types for the CFLP engine

use std::fmt;

use thiserror::Error;

/// Positional section of an instance source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceSection {
    /// The leading `F S` pair.
    Header,
    /// `F` pairs of (capacity, fixed cost).
    Facilities,
    /// `S` site demands.
    Demands,
    /// The row-major `F x S` allocation cost matrix.
    AllocationCosts,
}

impl fmt::Display for InstanceSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstanceSection::Header => "header",
            InstanceSection::Facilities => "facilities",
            InstanceSection::Demands => "demands",
            InstanceSection::AllocationCosts => "allocation costs",
        };
        f.write_str(name)
    }
}

/// Error raised while turning a raw token stream into an instance.
///
/// No partial instance is ever produced when parsing fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A header token is not a non-negative integer.
    #[error("token {position} ('{token}') is not a valid integer")]
    InvalidInteger { position: usize, token: String },

    /// Facility or site count below one.
    #[error("{name} must be at least 1, got {value}")]
    InvalidCount { name: &'static str, value: usize },

    /// A value token is not a finite number.
    #[error("token {position} ('{token}') is not a finite number")]
    InvalidNumber { position: usize, token: String },

    /// Capacities, costs and demands must be non-negative.
    #[error("negative value {value} in {section} at index {index}")]
    NegativeValue {
        section: InstanceSection,
        index: usize,
        value: f64,
    },

    /// The source ended before a section was complete.
    #[error("{section} section needs {expected} tokens, only {found} available")]
    UnexpectedEnd {
        section: InstanceSection,
        expected: usize,
        found: usize,
    },

    /// Tokens remain after the allocation cost matrix.
    #[error("{count} unconsumed token(s) after the allocation cost matrix")]
    TrailingTokens { count: usize },

    /// `F x S` does not fit in memory addressing.
    #[error("cost matrix of {facilities} x {sites} entries is too large")]
    DimensionOverflow { facilities: usize, sites: usize },
}

/// Error raised when building an instance from in-memory data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstanceError {
    #[error("instance needs at least one {what}")]
    Empty { what: &'static str },

    #[error("{what}: expected {expected} entries, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{what} at index {index} must be finite and non-negative, got {value}")]
    InvalidValue {
        what: &'static str,
        index: usize,
        value: f64,
    },
}

/// Error raised when an assignment is not a well-formed site to facility map.
///
/// Capacity violations are never reported here; they are penalized by evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Assignment length differs from the number of sites.
    #[error("assignment has {actual} entries, instance has {expected} sites")]
    Shape { expected: usize, actual: usize },

    /// Facility index out of range.
    #[error("site {site} is assigned to facility {facility}, valid range is 0..{num_facilities}")]
    FacilityIndex {
        site: usize,
        facility: usize,
        num_facilities: usize,
    },
}

/// Main error type for CFLP operations
#[derive(Debug, Error)]
pub enum CflpError {
    /// Malformed instance source
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Inconsistent in-memory instance data
    #[error("Instance error: {0}")]
    Instance(#[from] InstanceError),

    /// Malformed assignment
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Instance file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error in evaluation configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for CFLP operations
pub type Result<T> = std::result::Result<T, CflpError>;
