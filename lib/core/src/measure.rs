//! Measure kinds, specifications and instances
//!
//! A [`MeasureSpec`] is the declarative request item (type tag + named
//! parameters). The closed [`MeasureKind`] enum is the registry of known
//! families, and a [`Measure`] is a resolved instance holding its family's
//! parameters.

use crate::alienation::Alienation;
use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::measures::{
    BiPol, Emd, EstebanRay, Experts, GeneralizedEstebanRay, GeneralizedMec, Mec, MecNormalized,
    PolarizationMeasure, Shannon, VanDerEijk,
};
use crate::naming::format_number;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Default `alpha` of the Esteban-Ray families
pub const DEFAULT_ER_ALPHA: f64 = 0.8;
/// Default `alpha` of the MEC families
pub const DEFAULT_MEC_ALPHA: f64 = 2.0;
/// Default `beta` of MEC and MECNormalized
pub const DEFAULT_MEC_BETA: f64 = 1.15;

/// A parameter value as supplied by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => f.write_str(&format_number(*n)),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

/// Named parameters of a measure specification
pub type Params = HashMap<String, ParamValue>;

/// A requested measure: type tag plus parameters
///
/// The tag is kept as a raw string so that unknown families are reported
/// per entry by the evaluator instead of failing request decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: Params,
}

impl MeasureSpec {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: Params::new(),
        }
    }

    /// Builder-style parameter setter
    pub fn with_param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

/// Default value of a family parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamDefault {
    Number(f64),
    Alienation(Alienation),
}

/// Definition of one family parameter, for discovery
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDef {
    pub key: &'static str,
    pub default: ParamDefault,
}

impl ParamDef {
    const fn number(key: &'static str, default: f64) -> Self {
        Self {
            key,
            default: ParamDefault::Number(default),
        }
    }

    const fn alienation(key: &'static str) -> Self {
        Self {
            key,
            default: ParamDefault::Alienation(Alienation::Linear),
        }
    }
}

const ER_PARAMS: &[ParamDef] = &[ParamDef::number("alpha", DEFAULT_ER_ALPHA)];
const GER_PARAMS: &[ParamDef] = &[
    ParamDef::number("alpha", DEFAULT_ER_ALPHA),
    ParamDef::alienation("alienation"),
];
const MEC_PARAMS: &[ParamDef] = &[
    ParamDef::number("alpha", DEFAULT_MEC_ALPHA),
    ParamDef::number("beta", DEFAULT_MEC_BETA),
];
const GMEC_PARAMS: &[ParamDef] = &[
    ParamDef::number("alpha", DEFAULT_MEC_ALPHA),
    ParamDef::alienation("alienation"),
];

/// The closed set of measure families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasureKind {
    EstebanRay,
    BiPol,
    MecNormalized,
    Mec,
    GeneralizedMec,
    Emd,
    Shannon,
    VanDerEijk,
    Experts,
    GeneralizedEr,
}

impl MeasureKind {
    /// Every family, in catalogue order
    pub const ALL: [MeasureKind; 10] = [
        MeasureKind::EstebanRay,
        MeasureKind::BiPol,
        MeasureKind::MecNormalized,
        MeasureKind::Mec,
        MeasureKind::GeneralizedMec,
        MeasureKind::Emd,
        MeasureKind::Shannon,
        MeasureKind::VanDerEijk,
        MeasureKind::Experts,
        MeasureKind::GeneralizedEr,
    ];

    /// Type tag used on the wire
    pub fn tag(self) -> &'static str {
        match self {
            MeasureKind::EstebanRay => "EstebanRay",
            MeasureKind::BiPol => "BiPol",
            MeasureKind::MecNormalized => "MECNormalized",
            MeasureKind::Mec => "MEC",
            MeasureKind::GeneralizedMec => "GeneralizedMEC",
            MeasureKind::Emd => "EMD",
            MeasureKind::Shannon => "Shannon",
            MeasureKind::VanDerEijk => "VanDerEijk",
            MeasureKind::Experts => "Experts",
            MeasureKind::GeneralizedEr => "GeneralizedER",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            MeasureKind::EstebanRay => "Esteban-Ray",
            MeasureKind::BiPol => "BiPol",
            MeasureKind::MecNormalized => "MEC Normalized",
            MeasureKind::Mec => "MEC",
            MeasureKind::GeneralizedMec => "Generalized MEC",
            MeasureKind::Emd => "EMD",
            MeasureKind::Shannon => "Shannon",
            MeasureKind::VanDerEijk => "Van der Eijk",
            MeasureKind::Experts => "Experts (5-cat)",
            MeasureKind::GeneralizedEr => "Generalized ER",
        }
    }

    /// Parameters accepted by the family, with their defaults
    pub fn params(self) -> &'static [ParamDef] {
        match self {
            MeasureKind::EstebanRay => ER_PARAMS,
            MeasureKind::GeneralizedEr => GER_PARAMS,
            MeasureKind::Mec | MeasureKind::MecNormalized => MEC_PARAMS,
            MeasureKind::GeneralizedMec => GMEC_PARAMS,
            MeasureKind::BiPol
            | MeasureKind::Emd
            | MeasureKind::Shannon
            | MeasureKind::VanDerEijk
            | MeasureKind::Experts => &[],
        }
    }
}

impl FromStr for MeasureKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| Error::UnknownMeasureType(s.to_string()))
    }
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A resolved measure instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    EstebanRay(EstebanRay),
    GeneralizedEr(GeneralizedEstebanRay),
    BiPol(BiPol),
    Mec(Mec),
    MecNormalized(MecNormalized),
    GeneralizedMec(GeneralizedMec),
    Emd(Emd),
    Shannon(Shannon),
    VanDerEijk(VanDerEijk),
    Experts(Experts),
}

impl Measure {
    pub fn kind(&self) -> MeasureKind {
        match self {
            Measure::EstebanRay(_) => MeasureKind::EstebanRay,
            Measure::GeneralizedEr(_) => MeasureKind::GeneralizedEr,
            Measure::BiPol(_) => MeasureKind::BiPol,
            Measure::Mec(_) => MeasureKind::Mec,
            Measure::MecNormalized(_) => MeasureKind::MecNormalized,
            Measure::GeneralizedMec(_) => MeasureKind::GeneralizedMec,
            Measure::Emd(_) => MeasureKind::Emd,
            Measure::Shannon(_) => MeasureKind::Shannon,
            Measure::VanDerEijk(_) => MeasureKind::VanDerEijk,
            Measure::Experts(_) => MeasureKind::Experts,
        }
    }

    /// Display name with every resolved parameter embedded
    ///
    /// Deterministic: equal instances always produce equal names.
    pub fn name(&self) -> String {
        match self {
            Measure::EstebanRay(m) => format!("ER({})", format_number(m.alpha)),
            Measure::GeneralizedEr(m) => {
                format!("GER({},{})", format_number(m.alpha), m.alienation)
            }
            Measure::Mec(m) => format!("MEC({},{})", format_number(m.alpha), format_number(m.beta)),
            Measure::MecNormalized(m) => {
                format!("MEC({},{})N", format_number(m.alpha), format_number(m.beta))
            }
            Measure::GeneralizedMec(m) => {
                format!("GMEC({},{})", format_number(m.alpha), m.alienation)
            }
            Measure::BiPol(_)
            | Measure::Emd(_)
            | Measure::Shannon(_)
            | Measure::VanDerEijk(_)
            | Measure::Experts(_) => self.kind().tag().to_string(),
        }
    }

    /// Score a distribution with this instance
    pub fn evaluate(&self, distribution: &Distribution<'_>) -> Result<f64> {
        match self {
            Measure::EstebanRay(m) => m.score(distribution),
            Measure::GeneralizedEr(m) => m.score(distribution),
            Measure::BiPol(m) => m.score(distribution),
            Measure::Mec(m) => m.score(distribution),
            Measure::MecNormalized(m) => m.score(distribution),
            Measure::GeneralizedMec(m) => m.score(distribution),
            Measure::Emd(m) => m.score(distribution),
            Measure::Shannon(m) => m.score(distribution),
            Measure::VanDerEijk(m) => m.score(distribution),
            Measure::Experts(m) => m.score(distribution),
        }
    }
}

impl PolarizationMeasure for Measure {
    fn score(&self, distribution: &Distribution<'_>) -> Result<f64> {
        self.evaluate(distribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in MeasureKind::ALL {
            assert_eq!(kind.tag().parse::<MeasureKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = "Unknown".parse::<MeasureKind>().unwrap_err();
        assert_eq!(err, Error::UnknownMeasureType("Unknown".to_string()));

        // Tags are case sensitive
        assert!("estebanray".parse::<MeasureKind>().is_err());
        assert!("GeneralizedEr".parse::<MeasureKind>().is_err());
    }

    #[test]
    fn test_param_defs() {
        assert_eq!(MeasureKind::EstebanRay.params().len(), 1);
        assert_eq!(MeasureKind::Mec.params(), MeasureKind::MecNormalized.params());
        assert_eq!(
            MeasureKind::GeneralizedMec.params()[1].default,
            ParamDefault::Alienation(Alienation::Linear)
        );
        assert!(MeasureKind::Experts.params().is_empty());
    }

    #[test]
    fn test_spec_deserialize() {
        let spec: MeasureSpec = serde_json::from_value(serde_json::json!({
            "type": "GeneralizedER",
            "params": {"alpha": 1, "alienation": "d^2"}
        }))
        .unwrap();

        assert_eq!(spec.kind, "GeneralizedER");
        assert_eq!(spec.params["alpha"], ParamValue::Number(1.0));
        assert_eq!(spec.params["alienation"], ParamValue::Text("d^2".to_string()));
    }

    #[test]
    fn test_spec_params_default_to_empty() {
        let spec: MeasureSpec = serde_json::from_str(r#"{"type": "BiPol"}"#).unwrap();
        assert!(spec.params.is_empty());
    }

    #[test]
    fn test_names() {
        assert_eq!(Measure::EstebanRay(EstebanRay::new(0.8)).name(), "ER(0.8)");
        assert_eq!(Measure::Mec(Mec::new(2.0, 1.15)).name(), "MEC(2.0,1.15)");
        assert_eq!(
            Measure::MecNormalized(MecNormalized::new(2.0, 1.15)).name(),
            "MEC(2.0,1.15)N"
        );
        assert_eq!(
            Measure::GeneralizedEr(GeneralizedEstebanRay::new(0.8, Alienation::ExpMinusOne)).name(),
            "GER(0.8,exp(d)-1)"
        );
        assert_eq!(
            Measure::GeneralizedMec(GeneralizedMec::new(3.0, Alienation::Cube)).name(),
            "GMEC(3.0,d^3)"
        );
        assert_eq!(Measure::VanDerEijk(VanDerEijk).name(), "VanDerEijk");
    }
}
