//! Score types for comparing candidate assignments
//!
//! Scores follow the "higher is better" convention: penalties are negative.
//! Score implementations are immutable and implement arithmetic operations.

mod hard_soft;
mod traits;


pub use hard_soft::HardSoftScore;
pub use traits::Score;

/// Score level representing different constraint priorities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreLevel {
    /// Hard constraints - must be satisfied for feasibility
    Hard,
    /// Soft constraints - optimization objectives
    Soft,
}
