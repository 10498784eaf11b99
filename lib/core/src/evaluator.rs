//! Batch evaluation
//!
//! Builds and scores every requested measure independently. A failure in one
//! entry (unknown type, bad parameter, invalid distribution, non-finite
//! output, even a panic inside a measure body) is reported inline on that
//! entry and never affects the others.

use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::factory::MeasureFactory;
use crate::measure::{Measure, MeasureSpec};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Outcome of one requested measure
///
/// Exactly one of `value` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureResult {
    pub name: String,
    pub value: Option<f64>,
    pub error: Option<String>,
}

impl MeasureResult {
    pub fn success(name: String, value: f64) -> Self {
        Self {
            name,
            value: Some(value),
            error: None,
        }
    }

    pub fn failure(name: String, error: &Error) -> Self {
        Self {
            name,
            value: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.value.is_some()
    }
}

/// Evaluate a batch of measure specifications on one distribution
///
/// The result has one entry per spec, in the same order. Construction
/// failures are named after the raw type tag.
pub fn evaluate(positions: &[f64], weights: &[f64], specs: &[MeasureSpec]) -> Vec<MeasureResult> {
    let distribution = Distribution::new(positions, weights);
    specs
        .iter()
        .map(|spec| evaluate_spec(&distribution, spec))
        .collect()
}

/// Evaluate a single specification
pub fn evaluate_spec(distribution: &Distribution<'_>, spec: &MeasureSpec) -> MeasureResult {
    evaluate_spec_with(distribution, spec, |measure, distribution| {
        measure.evaluate(distribution)
    })
}

/// Build `spec` and score it through `invoke`
///
/// A failed build is named after the raw type tag; a failed invocation keeps
/// the measure's display name.
fn evaluate_spec_with<F>(
    distribution: &Distribution<'_>,
    spec: &MeasureSpec,
    invoke: F,
) -> MeasureResult
where
    F: Fn(&Measure, &Distribution<'_>) -> Result<f64>,
{
    let named = match MeasureFactory::from_spec(spec) {
        Ok(named) => named,
        Err(e) => {
            warn!(measure = %spec.kind, error = %e, "Failed to build measure");
            return MeasureResult::failure(spec.kind.clone(), &e);
        }
    };

    match guarded(|| invoke(&named.measure, distribution)) {
        Ok(value) => {
            debug!(measure = %named.name, value, "Measure evaluated");
            MeasureResult::success(named.name, value)
        }
        Err(e) => {
            warn!(measure = %named.name, error = %e, "Measure evaluation failed");
            MeasureResult::failure(named.name, &e)
        }
    }
}

/// Score a built measure, requiring a finite result
pub fn score(measure: &Measure, distribution: &Distribution<'_>) -> Result<f64> {
    guarded(|| measure.evaluate(distribution))
}

/// Run a measure body, turning a panic or a non-finite value into an error
fn guarded<F>(body: F) -> Result<f64>
where
    F: FnOnce() -> Result<f64>,
{
    let value = match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(result) => result?,
        Err(payload) => return Err(Error::Computation(panic_message(payload.as_ref()))),
    };

    if !value.is_finite() {
        return Err(Error::NonFiniteResult(value));
    }
    Ok(value)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "measure panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alienation::Alienation;
    use crate::measure::MeasureKind;
    use crate::measures::GeneralizedEstebanRay;

    const X: [f64; 5] = [0.0, 1.0, 2.0, 3.0, 4.0];
    const W: [f64; 5] = [0.1, 0.2, 0.4, 0.2, 0.1];

    #[test]
    fn test_reference_scenario() {
        let specs = vec![
            MeasureSpec::new("EstebanRay").with_param("alpha", 0.8),
            MeasureSpec::new("GeneralizedER")
                .with_param("alpha", 0.8)
                .with_param("alienation", "d^2"),
            MeasureSpec::new("Unknown"),
        ];

        let results = evaluate(&X, &W, &specs);
        assert_eq!(results.len(), 3);

        assert_eq!(results[0].name, "ER(0.8)");
        assert!(results[0].value.is_some());
        assert!(results[0].error.is_none());

        assert_eq!(results[1].name, "GER(0.8,d^2)");
        assert!(results[1].value.is_some());

        assert_eq!(results[2].name, "Unknown");
        assert!(results[2].value.is_none());
        assert_eq!(
            results[2].error.as_deref(),
            Some("Unknown measure type: Unknown")
        );
    }

    #[test]
    fn test_unknown_alienation_falls_back_to_tag() {
        let specs = vec![MeasureSpec::new("GeneralizedMEC").with_param("alienation", "bogus")];
        let results = evaluate(&X, &W, &specs);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "GeneralizedMEC");
        assert!(results[0].value.is_none());
        assert!(results[0].error.as_deref().unwrap().contains("bogus"));
    }

    #[test]
    fn test_order_preserved_with_alternating_failures() {
        let specs: Vec<MeasureSpec> = (0..10)
            .map(|i| {
                if i % 2 == 0 {
                    MeasureSpec::new("Shannon")
                } else {
                    MeasureSpec::new(format!("Bogus{}", i))
                }
            })
            .collect();

        let results = evaluate(&X, &W, &specs);
        assert_eq!(results.len(), 10);
        for (i, result) in results.iter().enumerate() {
            if i % 2 == 0 {
                assert!(result.is_ok(), "entry {} failed: {:?}", i, result.error);
                assert_eq!(result.name, "Shannon");
            } else {
                assert!(!result.is_ok());
                assert_eq!(result.name, format!("Bogus{}", i));
            }
        }
    }

    #[test]
    fn test_non_finite_result_is_failure() {
        let measure = Measure::GeneralizedEr(GeneralizedEstebanRay::new(
            0.8,
            Alienation::ExpTwiceMinusOne,
        ));
        let distribution = Distribution::new(&[0.0, 1000.0], &[0.5, 0.5]);

        let err = score(&measure, &distribution).unwrap_err();
        assert!(matches!(err, Error::NonFiniteResult(v) if v.is_infinite()));

        let results = evaluate(
            &[0.0, 1000.0],
            &[0.5, 0.5],
            &[
                MeasureSpec::new("GeneralizedER").with_param("alienation", "exp(2d)-1"),
                MeasureSpec::new("EMD"),
            ],
        );
        assert_eq!(results[0].name, "GER(0.8,exp(2d)-1)");
        assert!(results[0].error.as_deref().unwrap().contains("Non-finite"));
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_panicking_body_is_isolated() {
        let specs = vec![
            MeasureSpec::new("EstebanRay"),
            MeasureSpec::new("Shannon"),
            MeasureSpec::new("EMD"),
        ];
        let distribution = Distribution::new(&X, &W);

        let results: Vec<MeasureResult> = specs
            .iter()
            .map(|spec| {
                evaluate_spec_with(&distribution, spec, |measure, distribution| {
                    if measure.kind() == MeasureKind::Shannon {
                        panic!("shannon body exploded");
                    }
                    measure.evaluate(distribution)
                })
            })
            .collect();

        assert!(results[0].is_ok());
        assert_eq!(results[1].name, "Shannon");
        assert!(results[1].value.is_none());
        assert_eq!(
            results[1].error.as_deref(),
            Some("Computation failed: shannon body exploded")
        );
        assert!(results[2].is_ok());
        assert_eq!(results[2], evaluate_spec(&distribution, &specs[2]));
    }

    #[test]
    fn test_guarded_outcomes() {
        assert_eq!(guarded(|| Ok(0.25)), Ok(0.25));
        assert!(matches!(guarded(|| Ok(f64::NAN)), Err(Error::NonFiniteResult(v)) if v.is_nan()));

        let err = guarded(|| panic!("{} went wrong", "something")).unwrap_err();
        assert_eq!(err, Error::Computation("something went wrong".to_string()));
    }

    #[test]
    fn test_body_failure_keeps_display_name() {
        // Experts needs five categories
        let results = evaluate(&[0.0, 1.0], &[0.5, 0.5], &[MeasureSpec::new("Experts")]);
        assert_eq!(results[0].name, "Experts");
        assert!(results[0].value.is_none());
        assert!(results[0].error.is_some());
    }

    #[test]
    fn test_length_mismatch_reported_per_entry() {
        let specs = vec![MeasureSpec::new("BiPol"), MeasureSpec::new("EMD")];
        let results = evaluate(&[0.0, 1.0, 2.0], &[0.5, 0.5], &specs);

        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(result.error.as_deref().unwrap().contains("same length"));
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(evaluate(&X, &W, &[]).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let spec = MeasureSpec::new("MEC").with_param("alpha", 1.5);
        let first = evaluate(&X, &W, std::slice::from_ref(&spec));
        let second = evaluate(&X, &W, std::slice::from_ref(&spec));
        assert_eq!(first, second);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");

        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "measure panicked");
    }
}
