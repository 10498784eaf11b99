use super::PolarizationMeasure;
use crate::distribution::Distribution;
use crate::error::Result;

/// Two-group bi-polarization
///
/// The distribution is split at its weighted mean into a left and a right
/// group (mass sitting exactly on the mean is shared half/half). The score
/// is the group balance `4 p_L p_R` times the distance between the group
/// means relative to the range, so it lies in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BiPol;

impl BiPol {
    pub fn new() -> Self {
        BiPol
    }
}

impl PolarizationMeasure for BiPol {
    fn score(&self, distribution: &Distribution<'_>) -> Result<f64> {
        let support = distribution.support()?;
        let range = support.range();
        if range <= 0.0 {
            return Ok(0.0);
        }

        let mean = support.mean();
        let (mut left_mass, mut left_moment) = (0.0, 0.0);
        let (mut right_mass, mut right_moment) = (0.0, 0.0);
        for (x, p) in support.iter() {
            if x < mean {
                left_mass += p;
                left_moment += p * x;
            } else if x > mean {
                right_mass += p;
                right_moment += p * x;
            } else {
                left_mass += p / 2.0;
                left_moment += p * x / 2.0;
                right_mass += p / 2.0;
                right_moment += p * x / 2.0;
            }
        }

        if left_mass <= 0.0 || right_mass <= 0.0 {
            return Ok(0.0);
        }

        let gap = right_moment / right_mass - left_moment / left_mass;
        Ok(4.0 * left_mass * right_mass * gap / range)
    }
}
