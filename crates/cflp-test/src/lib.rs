//! Shared test fixtures for CFLP crates.
//!
//! This crate provides raw instance data and source text for testing.
//! It does NOT depend on `cflp-model` to avoid circular dependencies:
//! fixtures are plain vectors and strings that each crate parses itself.
//!
//! - [`instances`] - Hand-written scenarios and seeded random instances
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! cflp-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use cflp_test::instances::{two_by_two, random_instance};
//!
//! let source = two_by_two().to_source();
//! ```

pub mod instances;

pub use instances::{random_assignment, random_instance, tight_capacity, two_by_two, InstanceData};
