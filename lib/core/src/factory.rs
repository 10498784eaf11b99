//! Measure factory
//!
//! Turns a declarative [`MeasureSpec`] into a named, executable [`Measure`].
//! The factory owns every family's defaults and construction rules:
//!
//! | Tag | Parameters (default) |
//! |-----|----------------------|
//! | `EstebanRay` | `alpha` (0.8) |
//! | `GeneralizedER` | `alpha` (0.8), `alienation` (`d`) |
//! | `MEC`, `MECNormalized` | `alpha` (2), `beta` (1.15) |
//! | `GeneralizedMEC` | `alpha` (2), `alienation` (`d`) |
//! | `BiPol`, `EMD`, `Shannon`, `VanDerEijk`, `Experts` | none |
//!
//! Missing parameters take their default, extra parameters are ignored.
//! Alienation keys are resolved here, so an unknown key fails before any
//! scoring happens.

use crate::alienation::Alienation;
use crate::error::{Error, Result};
use crate::measure::{
    Measure, MeasureKind, MeasureSpec, ParamValue, Params, DEFAULT_ER_ALPHA, DEFAULT_MEC_ALPHA,
    DEFAULT_MEC_BETA,
};
use crate::measures::{
    BiPol, Emd, EstebanRay, Experts, GeneralizedEstebanRay, GeneralizedMec, Mec, MecNormalized,
    Shannon, VanDerEijk,
};
use crate::naming::format_number;

/// A measure instance with its display name
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMeasure {
    pub name: String,
    pub measure: Measure,
}

pub struct MeasureFactory;

impl MeasureFactory {
    /// Build a measure from a type tag and parameters
    ///
    /// # Errors
    /// - [`Error::UnknownMeasureType`] if the tag is not a known family
    /// - [`Error::UnknownAlienationKey`] if a generalized family names an
    ///   alienation function outside the table
    /// - [`Error::InvalidParameter`] if a parameter cannot be coerced
    pub fn build(tag: &str, params: &Params) -> Result<NamedMeasure> {
        let kind: MeasureKind = tag.parse()?;
        let measure = Self::build_kind(kind, params)?;
        Ok(NamedMeasure {
            name: measure.name(),
            measure,
        })
    }

    /// Build a measure from a request specification
    pub fn from_spec(spec: &MeasureSpec) -> Result<NamedMeasure> {
        Self::build(&spec.kind, &spec.params)
    }

    /// Build a measure of a known family
    pub fn build_kind(kind: MeasureKind, params: &Params) -> Result<Measure> {
        let measure = match kind {
            MeasureKind::EstebanRay => {
                Measure::EstebanRay(EstebanRay::new(number(params, "alpha", DEFAULT_ER_ALPHA)?))
            }
            MeasureKind::GeneralizedEr => Measure::GeneralizedEr(GeneralizedEstebanRay::new(
                number(params, "alpha", DEFAULT_ER_ALPHA)?,
                alienation(params, "alienation")?,
            )),
            MeasureKind::Mec => Measure::Mec(Mec::new(
                number(params, "alpha", DEFAULT_MEC_ALPHA)?,
                number(params, "beta", DEFAULT_MEC_BETA)?,
            )),
            MeasureKind::MecNormalized => Measure::MecNormalized(MecNormalized::new(
                number(params, "alpha", DEFAULT_MEC_ALPHA)?,
                number(params, "beta", DEFAULT_MEC_BETA)?,
            )),
            MeasureKind::GeneralizedMec => Measure::GeneralizedMec(GeneralizedMec::new(
                number(params, "alpha", DEFAULT_MEC_ALPHA)?,
                alienation(params, "alienation")?,
            )),
            MeasureKind::BiPol => Measure::BiPol(BiPol),
            MeasureKind::Emd => Measure::Emd(Emd),
            MeasureKind::Shannon => Measure::Shannon(Shannon),
            MeasureKind::VanDerEijk => Measure::VanDerEijk(VanDerEijk),
            MeasureKind::Experts => Measure::Experts(Experts),
        };
        Ok(measure)
    }
}

/// Read a numeric parameter, falling back to `default`
///
/// Numeric strings are accepted; non-finite values are rejected.
fn number(params: &Params, key: &str, default: f64) -> Result<f64> {
    let value = match params.get(key) {
        None => return Ok(default),
        Some(ParamValue::Number(n)) => *n,
        Some(ParamValue::Text(s)) => s.trim().parse::<f64>().map_err(|_| {
            Error::invalid_parameter(key, format!("expected a number, got {:?}", s))
        })?,
    };

    if !value.is_finite() {
        return Err(Error::invalid_parameter(key, "must be a finite number"));
    }
    Ok(value)
}

/// Read and resolve an alienation parameter, defaulting to `d`
fn alienation(params: &Params, key: &str) -> Result<Alienation> {
    match params.get(key) {
        None => Ok(Alienation::default()),
        Some(ParamValue::Text(s)) => Alienation::resolve(s),
        Some(ParamValue::Number(n)) => Alienation::resolve(&format_number(*n)),
    }
}
