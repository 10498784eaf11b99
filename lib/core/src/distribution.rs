//! Weighted distributions of positions
//!
//! [`Distribution`] is the borrowed (positions, weights) pair a request hands
//! to the evaluator. The core does not validate it; measure bodies call
//! [`Distribution::support`] to get a validated, sorted and normalized
//! [`Support`] before scoring.

use crate::error::{Error, Result};

/// Positions paired element-wise with weights
#[derive(Debug, Clone, Copy)]
pub struct Distribution<'a> {
    positions: &'a [f64],
    weights: &'a [f64],
}

impl<'a> Distribution<'a> {
    pub fn new(positions: &'a [f64], weights: &'a [f64]) -> Self {
        Self { positions, weights }
    }

    pub fn positions(&self) -> &'a [f64] {
        self.positions
    }

    pub fn weights(&self) -> &'a [f64] {
        self.weights
    }

    /// Validate and normalize into a [`Support`]
    ///
    /// Requirements: equal, non-zero lengths; finite positions spanning a
    /// finite range; finite, non-negative weights with a positive total.
    /// Points are sorted by position, equal positions are merged, and weights
    /// are rescaled to sum to one.
    pub fn support(&self) -> Result<Support> {
        if self.positions.len() != self.weights.len() {
            return Err(Error::InvalidDistribution(format!(
                "positions and weights must have the same length ({} != {})",
                self.positions.len(),
                self.weights.len()
            )));
        }
        if self.positions.is_empty() {
            return Err(Error::InvalidDistribution(
                "distribution must contain at least one position".to_string(),
            ));
        }

        let mut pairs = Vec::with_capacity(self.positions.len());
        for (i, (&x, &w)) in self.positions.iter().zip(self.weights).enumerate() {
            if !x.is_finite() {
                return Err(Error::InvalidDistribution(format!(
                    "position {} is not finite",
                    i
                )));
            }
            if !w.is_finite() || w < 0.0 {
                return Err(Error::InvalidDistribution(format!(
                    "weight {} must be a finite non-negative number, got {}",
                    i, w
                )));
            }
            pairs.push((x, w));
        }

        // Scale by the largest weight first so the total cannot overflow
        let largest = pairs.iter().map(|(_, w)| *w).fold(0.0, f64::max);
        if largest <= 0.0 {
            return Err(Error::InvalidDistribution(
                "total weight must be positive".to_string(),
            ));
        }
        let total: f64 = pairs.iter().map(|(_, w)| w / largest).sum();

        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        if let (Some(lo), Some(hi)) = (pairs.first(), pairs.last()) {
            if !(hi.0 - lo.0).is_finite() {
                return Err(Error::InvalidDistribution(format!(
                    "positions span a range too wide to represent ({} to {})",
                    lo.0, hi.0
                )));
            }
        }

        let mut positions: Vec<f64> = Vec::with_capacity(pairs.len());
        let mut probs: Vec<f64> = Vec::with_capacity(pairs.len());
        for (x, w) in pairs {
            match positions.last() {
                Some(&last) if last == x => {
                    if let Some(p) = probs.last_mut() {
                        *p += w / largest / total;
                    }
                }
                _ => {
                    positions.push(x);
                    probs.push(w / largest / total);
                }
            }
        }

        Ok(Support { positions, probs })
    }
}

/// Sorted distinct positions with relative frequencies summing to one
#[derive(Debug, Clone, PartialEq)]
pub struct Support {
    positions: Vec<f64>,
    probs: Vec<f64>,
}

impl Support {
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    /// Number of distinct positions (categories)
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate (position, probability) pairs in position order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.positions.iter().copied().zip(self.probs.iter().copied())
    }

    /// `max x - min x`
    pub fn range(&self) -> f64 {
        match (self.positions.first(), self.positions.last()) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0.0,
        }
    }

    pub fn mean(&self) -> f64 {
        self.positions.first().copied().unwrap_or(0.0) + self.lower_gap()
    }

    /// `mean - min x`, summed from the low end without cancellation
    pub fn lower_gap(&self) -> f64 {
        match self.positions.first() {
            Some(&lo) => self.iter().map(|(x, p)| p * (x - lo)).sum(),
            None => 0.0,
        }
    }

    /// `max x - mean`, summed from the high end without cancellation
    pub fn upper_gap(&self) -> f64 {
        match self.positions.last() {
            Some(&hi) => self.iter().map(|(x, p)| p * (hi - x)).sum(),
            None => 0.0,
        }
    }

    /// Smallest position whose cumulative probability reaches one half
    pub fn median(&self) -> f64 {
        let mut cumulative = 0.0;
        for (x, p) in self.iter() {
            cumulative += p;
            // Tolerate rounding in the running sum
            if cumulative >= 0.5 - 1e-12 {
                return x;
            }
        }
        self.positions.last().copied().unwrap_or(0.0)
    }
}
