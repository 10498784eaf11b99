use super::PolarizationMeasure;
use crate::alienation::Alienation;
use crate::distribution::Distribution;
use crate::error::Result;

/// Esteban-Ray polarization
///
/// `P = sum_i sum_j p_i^(1+alpha) p_j |x_i - x_j|`
///
/// `alpha` is the identification sensitivity; larger values reward
/// concentrated groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstebanRay {
    pub alpha: f64,
}

impl EstebanRay {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl PolarizationMeasure for EstebanRay {
    fn score(&self, distribution: &Distribution<'_>) -> Result<f64> {
        GeneralizedEstebanRay::new(self.alpha, Alienation::Linear).score(distribution)
    }
}

/// Esteban-Ray with a pluggable alienation function
///
/// `P = sum_i sum_j p_i^(1+alpha) p_j a(|x_i - x_j|)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneralizedEstebanRay {
    pub alpha: f64,
    pub alienation: Alienation,
}

impl GeneralizedEstebanRay {
    pub fn new(alpha: f64, alienation: Alienation) -> Self {
        Self { alpha, alienation }
    }
}

impl PolarizationMeasure for GeneralizedEstebanRay {
    fn score(&self, distribution: &Distribution<'_>) -> Result<f64> {
        let support = distribution.support()?;

        let mut total = 0.0;
        for (xi, pi) in support.iter().filter(|(_, p)| *p > 0.0) {
            let identification = pi.powf(1.0 + self.alpha);
            for (xj, pj) in support.iter() {
                if xi != xj {
                    total += identification * pj * self.alienation.apply((xi - xj).abs());
                }
            }
        }

        Ok(total)
    }
}
