//! Display names
//!
//! Formatting of parameter values inside measure names, and the reverse
//! mapping from a display name back to a [`MeasureSpec`].
//!
//! Recognized name shapes:
//!
//! | Name | Specification |
//! |------|---------------|
//! | `BiPol`, `EMD`, `Shannon`, `VanDerEijk`, `Experts` | zero-parameter family |
//! | `MEC(a,b)N` | `MECNormalized` |
//! | `MEC(a,b)` | `MEC` when `b` is numeric, else `GeneralizedMEC` with alienation `b` |
//! | `GMEC(a,f)` | `GeneralizedMEC` |
//! | `GER(a,f)`, `ER(a,f)` | `GeneralizedER` |
//! | `ER(a)` | `EstebanRay` |

use crate::measure::{MeasureKind, MeasureSpec};

/// Render a numeric parameter for a display name
///
/// Integral values keep a trailing `.0` (`2.0`, not `2`). Very small and very
/// large magnitudes use a signed, two-digit exponent (`1e-05`, `1.5e+16`).
pub fn format_number(value: f64) -> String {
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

/// Map a display name back to the specification that produces it
///
/// Returns `None` when the name has none of the recognized shapes or its
/// `alpha` is not a number.
pub fn parse_display_name(name: &str) -> Option<MeasureSpec> {
    let name = name.trim();

    if let Some(kind) = MeasureKind::ALL
        .iter()
        .copied()
        .find(|kind| kind.params().is_empty() && kind.tag() == name)
    {
        return Some(MeasureSpec::new(kind.tag()));
    }

    if let Some(args) = call_args(name, "MEC(", ")N") {
        let (alpha, beta) = split_pair(args)?;
        let beta = parse_number(beta)?;
        return Some(
            MeasureSpec::new(MeasureKind::MecNormalized.tag())
                .with_param("alpha", alpha)
                .with_param("beta", beta),
        );
    }

    if let Some(args) = call_args(name, "MEC(", ")") {
        let (alpha, second) = split_pair(args)?;
        // Benchmark convention: MEC(alpha,alienation) is the generalized family
        let spec = match parse_number(second) {
            Some(beta) => MeasureSpec::new(MeasureKind::Mec.tag()).with_param("beta", beta),
            None => MeasureSpec::new(MeasureKind::GeneralizedMec.tag())
                .with_param("alienation", second),
        };
        return Some(spec.with_param("alpha", alpha));
    }

    for (prefix, kind) in [
        ("GMEC(", MeasureKind::GeneralizedMec),
        ("GER(", MeasureKind::GeneralizedEr),
    ] {
        if let Some(args) = call_args(name, prefix, ")") {
            let (alpha, alienation) = split_pair(args)?;
            return Some(
                MeasureSpec::new(kind.tag())
                    .with_param("alpha", alpha)
                    .with_param("alienation", alienation),
            );
        }
    }

    if let Some(args) = call_args(name, "ER(", ")") {
        return match args.split_once(',') {
            Some(_) => {
                let (alpha, alienation) = split_pair(args)?;
                Some(
                    MeasureSpec::new(MeasureKind::GeneralizedEr.tag())
                        .with_param("alpha", alpha)
                        .with_param("alienation", alienation),
                )
            }
            None => Some(
                MeasureSpec::new(MeasureKind::EstebanRay.tag())
                    .with_param("alpha", parse_number(args)?),
            ),
        };
    }

    None
}

fn call_args<'a>(name: &'a str, prefix: &str, suffix: &str) -> Option<&'a str> {
    name.strip_prefix(prefix)?.strip_suffix(suffix)
}

/// Split `alpha,rest` at the first comma, parsing `alpha`
fn split_pair(args: &str) -> Option<(f64, &str)> {
    let (first, second) = args.split_once(',')?;
    if second.is_empty() {
        return None;
    }
    Some((parse_number(first)?, second))
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
