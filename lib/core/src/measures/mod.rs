//! Polarization measure bodies
//!
//! Every measure family is a small value type holding its resolved
//! parameters and implementing [`PolarizationMeasure`]. Bodies validate the
//! distribution themselves (see [`Distribution::support`]) and report
//! failures through [`crate::Error`].
//!
//! Literature measures:
//! - [`EstebanRay`] / [`GeneralizedEstebanRay`] - Esteban & Ray (1994)
//! - [`Emd`] - earth mover's distance to consensus
//! - [`Shannon`] - Tastle & Wierman consensus entropy
//! - [`VanDerEijk`] - van der Eijk (2001) agreement
//! - [`Experts`] - five-category expert index
//!
//! Proposed measures:
//! - [`BiPol`] - two-group bi-polarization
//! - [`Mec`] / [`MecNormalized`] / [`GeneralizedMec`] - mass-emphasized clustering

mod bipol;
mod dispersion;
mod esteban_ray;
mod experts;
mod mec;
mod van_der_eijk;

pub use bipol::BiPol;
pub use dispersion::{Emd, Shannon};
pub use esteban_ray::{EstebanRay, GeneralizedEstebanRay};
pub use experts::Experts;
pub use mec::{GeneralizedMec, Mec, MecNormalized};
pub use van_der_eijk::VanDerEijk;

use crate::distribution::Distribution;
use crate::error::Result;

/// A scalar polarization index of a weighted distribution
pub trait PolarizationMeasure {
    /// Score the distribution
    fn score(&self, distribution: &Distribution<'_>) -> Result<f64>;
}
