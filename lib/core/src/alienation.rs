//! Alienation functions
//!
//! A closed table of monotonic transforms turning a non-negative distance
//! into an alienation contribution. Generalized measure families plug one of
//! these in place of the raw distance.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A transform of a distance `d >= 0` into a perceived alienation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alienation {
    /// `d`
    #[default]
    Linear,
    /// `d^2`
    Square,
    /// `d^3`
    Cube,
    /// `d+d^2`
    LinearPlusSquare,
    /// `d+2d^2`
    LinearPlusTwiceSquare,
    /// `exp(d)-1`
    ExpMinusOne,
    /// `exp(2d)-1`
    ExpTwiceMinusOne,
}

impl Alienation {
    /// Every alienation function, in discovery order
    pub const ALL: [Alienation; 7] = [
        Alienation::Linear,
        Alienation::Square,
        Alienation::Cube,
        Alienation::LinearPlusSquare,
        Alienation::LinearPlusTwiceSquare,
        Alienation::ExpMinusOne,
        Alienation::ExpTwiceMinusOne,
    ];

    /// The symbolic key used in requests and display names
    pub fn key(self) -> &'static str {
        match self {
            Alienation::Linear => "d",
            Alienation::Square => "d^2",
            Alienation::Cube => "d^3",
            Alienation::LinearPlusSquare => "d+d^2",
            Alienation::LinearPlusTwiceSquare => "d+2d^2",
            Alienation::ExpMinusOne => "exp(d)-1",
            Alienation::ExpTwiceMinusOne => "exp(2d)-1",
        }
    }

    /// Apply the transform to a distance
    #[inline]
    pub fn apply(self, d: f64) -> f64 {
        match self {
            Alienation::Linear => d,
            Alienation::Square => d * d,
            Alienation::Cube => d * d * d,
            Alienation::LinearPlusSquare => d + d * d,
            Alienation::LinearPlusTwiceSquare => d + 2.0 * d * d,
            Alienation::ExpMinusOne => d.exp_m1(),
            Alienation::ExpTwiceMinusOne => (2.0 * d).exp_m1(),
        }
    }

    /// Look up an alienation function by key
    ///
    /// Keys are matched exactly; anything outside the table is an
    /// [`Error::UnknownAlienationKey`] carrying the offending key.
    pub fn resolve(key: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.key() == key)
            .ok_or_else(|| Error::UnknownAlienationKey(key.to_string()))
    }

    /// All recognized keys, in table order
    pub fn keys() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|a| a.key())
    }
}

impl FromStr for Alienation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s)
    }
}

impl fmt::Display for Alienation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
