//! HardSoftScore - Two-level score with hard and soft levels

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

use super::traits::Score;
use super::ScoreLevel;

/// A score with separate hard and soft levels.
///
/// For facility location the hard level is the negated total capacity
/// overflow and the soft level is the negated opening plus allocation cost.
///
/// When comparing scores:
/// 1. Hard levels are compared first
/// 2. Soft levels are only compared when hard levels are equal
///
/// # Examples
///
/// ```
/// use cflp_core::{HardSoftScore, Score};
///
/// let overloaded = HardSoftScore::of(-1.0, -10.0); // one unit over capacity
/// let expensive = HardSoftScore::of(0.0, -500.0);  // feasible but costly
///
/// // Feasible assignments always rank above infeasible ones
/// assert!(expensive > overloaded);
/// assert!(expensive.is_feasible());
/// assert!(!overloaded.is_feasible());
/// ```
#[derive(Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftScore {
    hard: f64,
    soft: f64,
}

impl HardSoftScore {
    /// The zero score.
    pub const ZERO: HardSoftScore = HardSoftScore {
        hard: 0.0,
        soft: 0.0,
    };

    /// Creates a new HardSoftScore.
    ///
    /// Negative zero is normalized so `-0.0` and `0.0` compare equal.
    #[inline]
    pub fn of(hard: f64, soft: f64) -> Self {
        HardSoftScore {
            hard: hard + 0.0,
            soft: soft + 0.0,
        }
    }

    /// Creates a score with only a hard component.
    #[inline]
    pub fn of_hard(hard: f64) -> Self {
        HardSoftScore::of(hard, 0.0)
    }

    /// Creates a score with only a soft component.
    #[inline]
    pub fn of_soft(soft: f64) -> Self {
        HardSoftScore::of(0.0, soft)
    }

    /// Returns the hard score component.
    #[inline]
    pub const fn hard(&self) -> f64 {
        self.hard
    }

    /// Returns the soft score component.
    #[inline]
    pub const fn soft(&self) -> f64 {
        self.soft
    }
}

impl Score for HardSoftScore {
    #[inline]
    fn is_feasible(&self) -> bool {
        self.hard >= 0.0
    }

    #[inline]
    fn zero() -> Self {
        HardSoftScore::ZERO
    }

    #[inline]
    fn levels_count() -> usize {
        2
    }

    fn to_level_numbers(&self) -> Vec<f64> {
        vec![self.hard, self.soft]
    }

    fn level_label(index: usize) -> ScoreLevel {
        match index {
            0 => ScoreLevel::Hard,
            1 => ScoreLevel::Soft,
            _ => panic!("HardSoftScore has 2 levels, got index {}", index),
        }
    }
}

impl PartialEq for HardSoftScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HardSoftScore {}

impl Ord for HardSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.hard.total_cmp(&other.hard) {
            Ordering::Equal => self.soft.total_cmp(&other.soft),
            other => other,
        }
    }
}

impl PartialOrd for HardSoftScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for HardSoftScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        HardSoftScore::of(self.hard + other.hard, self.soft + other.soft)
    }
}

impl Sub for HardSoftScore {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        HardSoftScore::of(self.hard - other.hard, self.soft - other.soft)
    }
}

impl Neg for HardSoftScore {
    type Output = Self;

    fn neg(self) -> Self {
        HardSoftScore::of(-self.hard, -self.soft)
    }
}

impl fmt::Debug for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HardSoftScore({}, {})", self.hard, self.soft)
    }
}

impl fmt::Display for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}
