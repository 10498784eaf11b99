use super::PolarizationMeasure;
use crate::distribution::Distribution;
use crate::error::{Error, Result};

const CATEGORIES: usize = 5;

/// Expert-panel index for five-category scales
///
/// Each pole collects its extreme category and half of the adjacent
/// moderate category: `L = p_0 + p_1 / 2`, `R = p_4 + p_3 / 2`. The index
/// `4 L R` is one when the scale is evenly split between the extremes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Experts;

impl Experts {
    pub fn new() -> Self {
        Experts
    }
}

impl PolarizationMeasure for Experts {
    fn score(&self, distribution: &Distribution<'_>) -> Result<f64> {
        let support = distribution.support()?;
        if support.len() != CATEGORIES {
            return Err(Error::InvalidDistribution(format!(
                "Experts measure requires exactly {} categories, got {}",
                CATEGORIES,
                support.len()
            )));
        }

        let p = support.probs();
        let left = p[0] + p[1] / 2.0;
        let right = p[4] + p[3] / 2.0;
        Ok(4.0 * left * right)
    }
}
