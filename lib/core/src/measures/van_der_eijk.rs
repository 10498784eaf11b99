use super::PolarizationMeasure;
use crate::distribution::Distribution;
use crate::error::Result;

/// Frequencies below this are treated as empty categories
const EMPTY: f64 = 1e-12;

/// Van der Eijk agreement, reported as polarization
///
/// The distinct positions are treated as the `K` ordered categories of a
/// rating scale. The frequency distribution is decomposed into layers of
/// equal mass; each layer's agreement is `U (1 - (S - 1) / (K - 1))` where
/// `S` is the number of non-empty categories and `U` the unimodality of the
/// layer pattern. Agreement `A` in `[-1, 1]` maps to `(1 - A) / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VanDerEijk;

impl VanDerEijk {
    pub fn new() -> Self {
        VanDerEijk
    }

    /// Agreement `A` of a frequency vector over ordered categories
    pub fn agreement(frequencies: &[f64]) -> f64 {
        let categories = frequencies.len();
        if categories < 2 {
            return 1.0;
        }

        let mut remaining: Vec<f64> = frequencies.to_vec();
        let total: f64 = remaining.iter().sum();
        if total <= 0.0 {
            return 1.0;
        }

        let mut agreement = 0.0;
        loop {
            let pattern: Vec<bool> = remaining.iter().map(|f| *f > EMPTY).collect();
            let filled = pattern.iter().filter(|&&b| b).count();
            if filled == 0 {
                break;
            }

            let layer = remaining
                .iter()
                .filter(|f| **f > EMPTY)
                .copied()
                .fold(f64::INFINITY, f64::min);
            let weight = layer * filled as f64 / total;

            let spread = (filled - 1) as f64 / (categories - 1) as f64;
            agreement += weight * unimodality(&pattern) * (1.0 - spread);

            for (f, &on) in remaining.iter_mut().zip(&pattern) {
                if on {
                    *f = if *f - layer > EMPTY { *f - layer } else { 0.0 };
                }
            }
        }

        agreement
    }
}

impl PolarizationMeasure for VanDerEijk {
    fn score(&self, distribution: &Distribution<'_>) -> Result<f64> {
        let support = distribution.support()?;
        Ok((1.0 - Self::agreement(support.probs())) / 2.0)
    }
}

/// Unimodality `U` of a layer pattern, from the counts of unimodal (`110`,
/// `011`) and bimodal (`101`) category triples
///
/// Triples are counted by their middle category, using the number of filled
/// categories on either side of it.
fn unimodality(pattern: &[bool]) -> f64 {
    let k = pattern.len();
    let total_filled = pattern.iter().filter(|&&b| b).count() as u64;
    let (mut unimodal, mut bimodal) = (0u64, 0u64);
    let mut filled_left = 0u64;
    for (j, &middle) in pattern.iter().enumerate() {
        let empty_left = j as u64 - filled_left;
        let filled_right = total_filled - filled_left - middle as u64;
        let empty_right = (k - j - 1) as u64 - filled_right;
        if middle {
            unimodal += filled_left * empty_right + empty_left * filled_right;
            filled_left += 1;
        } else {
            bimodal += filled_left * filled_right;
        }
    }

    if unimodal + bimodal == 0 {
        return 1.0;
    }

    let k = k as f64;
    let (tu, tdu) = (unimodal as f64, bimodal as f64);
    ((k - 2.0) * tu - (k - 1.0) * tdu) / ((k - 2.0) * (tu + tdu))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measures::test_support::assert_close;

    #[test]
    fn test_single_category_agrees() {
        assert_eq!(VanDerEijk::agreement(&[0.0, 0.0, 1.0, 0.0, 0.0]), 1.0);

        let dist = Distribution::new(&[1.0, 2.0, 3.0], &[0.0, 1.0, 0.0]);
        assert_eq!(VanDerEijk.score(&dist).unwrap(), 0.0);
    }

    #[test]
    fn test_uniform_is_zero_agreement() {
        assert_close(VanDerEijk::agreement(&[0.2; 5]), 0.0);

        let dist = Distribution::new(&[1.0, 2.0, 3.0, 4.0, 5.0], &[1.0; 5]);
        assert_close(VanDerEijk.score(&dist).unwrap(), 0.5);
    }

    #[test]
    fn test_extremes_disagree() {
        assert_close(VanDerEijk::agreement(&[0.5, 0.0, 0.0, 0.0, 0.5]), -1.0);

        let dist = Distribution::new(&[1.0, 2.0, 3.0], &[0.5, 0.0, 0.5]);
        assert_close(VanDerEijk.score(&dist).unwrap(), 1.0);
    }

    #[test]
    fn test_adjacent_pair() {
        // Pattern 01100 on a 5-point scale: TU = 3, TDU = 0, U = 1
        // A = 1 - (2 - 1) / (5 - 1) = 0.75
        assert_close(VanDerEijk::agreement(&[0.0, 0.5, 0.5, 0.0, 0.0]), 0.75);
    }

    fn triple_counts(pattern: &[bool]) -> (u64, u64) {
        let k = pattern.len();
        let (mut unimodal, mut bimodal) = (0, 0);
        for i in 0..k {
            for j in (i + 1)..k {
                for l in (j + 1)..k {
                    match (pattern[i], pattern[j], pattern[l]) {
                        (true, true, false) | (false, true, true) => unimodal += 1,
                        (true, false, true) => bimodal += 1,
                        _ => {}
                    }
                }
            }
        }
        (unimodal, bimodal)
    }

    #[test]
    fn test_unimodality_matches_triple_enumeration() {
        for k in 3..=9usize {
            for bits in 0u32..(1 << k) {
                let pattern: Vec<bool> = (0..k).map(|i| bits & (1 << i) != 0).collect();
                let (tu, tdu) = triple_counts(&pattern);
                let expected = if tu + tdu == 0 {
                    1.0
                } else {
                    let (k, tu, tdu) = (k as f64, tu as f64, tdu as f64);
                    ((k - 2.0) * tu - (k - 1.0) * tdu) / ((k - 2.0) * (tu + tdu))
                };
                assert_close(unimodality(&pattern), expected);
            }
        }
    }

    #[test]
    fn test_many_categories() {
        let k = 2000;
        let positions: Vec<f64> = (0..k).map(|i| i as f64).collect();
        let weights: Vec<f64> = (0..k).map(|i| (i % 7 + 1) as f64).collect();
        let dist = Distribution::new(&positions, &weights);

        let score = VanDerEijk.score(&dist).unwrap();
        assert!((0.0..=1.0).contains(&score), "got {}", score);
    }

    #[test]
    fn test_layered_distribution() {
        // Layer 1: 11111 with weight 0.5 -> A = 0
        // Layer 2: 00100 with weight 0.5 -> A = 1
        let agreement = VanDerEijk::agreement(&[0.1, 0.1, 0.6, 0.1, 0.1]);
        assert_close(agreement, 0.5);
    }
}
