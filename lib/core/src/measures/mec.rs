use super::PolarizationMeasure;
use crate::alienation::Alienation;
use crate::distribution::{Distribution, Support};
use crate::error::Result;

/// MEC value of the balanced split between the two extremes, for any
/// `alpha` and any `beta`
const EXTREME_SPLIT: f64 = 0.5;

/// Mass-emphasized clustering
///
/// With `s_i = p_i^alpha` and range-normalized distances `r_ij`:
///
/// `MEC = sum_ij s_i s_j r_ij^beta / (sum_i s_i)^2`
///
/// `alpha > 1` emphasizes concentrated groups, `beta > 1` emphasizes
/// distant pairs. For `beta >= 1` the value lies in `[0, 0.5]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mec {
    pub alpha: f64,
    pub beta: f64,
}

impl Mec {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }
}

impl PolarizationMeasure for Mec {
    fn score(&self, distribution: &Distribution<'_>) -> Result<f64> {
        let support = distribution.support()?;
        let beta = self.beta;
        Ok(emphasized_pair_mean(&support, self.alpha, |r| r.powf(beta)))
    }
}

/// [`Mec`] rescaled so the balanced extreme split scores one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MecNormalized {
    pub alpha: f64,
    pub beta: f64,
}

impl MecNormalized {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }
}

impl PolarizationMeasure for MecNormalized {
    fn score(&self, distribution: &Distribution<'_>) -> Result<f64> {
        let raw = Mec::new(self.alpha, self.beta).score(distribution)?;
        Ok(raw / EXTREME_SPLIT)
    }
}

/// [`Mec`] with a pluggable alienation function in place of `r^beta`,
/// normalized so the balanced extreme split scores one
///
/// `GMEC = sum_ij s_i s_j a(r_ij) / ((sum_i s_i)^2 * 0.5 * a(1))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneralizedMec {
    pub alpha: f64,
    pub alienation: Alienation,
}

impl GeneralizedMec {
    pub fn new(alpha: f64, alienation: Alienation) -> Self {
        Self { alpha, alienation }
    }
}

impl PolarizationMeasure for GeneralizedMec {
    fn score(&self, distribution: &Distribution<'_>) -> Result<f64> {
        let support = distribution.support()?;
        let alienation = self.alienation;
        let raw = emphasized_pair_mean(&support, self.alpha, |r| alienation.apply(r));
        Ok(raw / (EXTREME_SPLIT * alienation.apply(1.0)))
    }
}

/// Mean of `f(r_ij)` over ordered pairs of distinct positions, weighted by
/// `p_i^alpha * p_j^alpha`
fn emphasized_pair_mean(support: &Support, alpha: f64, f: impl Fn(f64) -> f64) -> f64 {
    let range = support.range();
    if range <= 0.0 {
        return 0.0;
    }

    let emphasized: Vec<(f64, f64)> = support
        .iter()
        .filter(|(_, p)| *p > 0.0)
        .map(|(x, p)| (x, p.powf(alpha)))
        .collect();
    let mass: f64 = emphasized.iter().map(|(_, s)| s).sum();

    let mut total = 0.0;
    for (i, &(xi, si)) in emphasized.iter().enumerate() {
        for (j, &(xj, sj)) in emphasized.iter().enumerate() {
            if i != j {
                total += si * sj * f((xi - xj).abs() / range);
            }
        }
    }

    total / (mass * mass)
}
