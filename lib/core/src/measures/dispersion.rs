use super::PolarizationMeasure;
use crate::distribution::Distribution;
use crate::error::Result;

/// Earth mover's distance to consensus
///
/// Cost of moving all mass onto the weighted median, i.e. the mean absolute
/// deviation around the median, relative to half the range. The balanced
/// extreme split scores one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Emd;

impl Emd {
    pub fn new() -> Self {
        Emd
    }
}

impl PolarizationMeasure for Emd {
    fn score(&self, distribution: &Distribution<'_>) -> Result<f64> {
        let support = distribution.support()?;
        let range = support.range();
        if range <= 0.0 {
            return Ok(0.0);
        }

        let median = support.median();
        let work: f64 = support.iter().map(|(x, p)| p * (x - median).abs()).sum();
        Ok(work / (range / 2.0))
    }
}

/// Shannon-entropy dissent (Tastle & Wierman)
///
/// `1 - Cns` with `Cns = 1 + sum_i p_i log2(1 - |x_i - mu| / range)`.
///
/// `range - |x_i - mu|` is taken from the mean's distance to the far end of
/// the range, so a point near the mean never rounds its log argument to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Shannon;

impl Shannon {
    pub fn new() -> Self {
        Shannon
    }
}

impl PolarizationMeasure for Shannon {
    fn score(&self, distribution: &Distribution<'_>) -> Result<f64> {
        let support = distribution.support()?;
        let range = support.range();
        if range <= 0.0 {
            return Ok(0.0);
        }

        let (lo, hi) = (support.positions()[0], support.positions()[support.len() - 1]);
        let (below, above) = (support.lower_gap(), support.upper_gap());
        let consensus = 1.0
            + support
                .iter()
                .filter(|(_, p)| *p > 0.0)
                .map(|(x, p)| {
                    let closeness = if x - lo <= below {
                        above + (x - lo)
                    } else {
                        below + (hi - x)
                    };
                    p * (closeness / range).max(f64::MIN_POSITIVE).log2()
                })
                .sum::<f64>();
        Ok(1.0 - consensus)
    }
}
