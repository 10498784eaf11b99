//! # polarx Core
//!
//! Core library for the polarx polarization service.
//!
//! This crate provides the measure registry and evaluation contract:
//!
//! - [`Alienation`] - Closed table of distance-to-alienation transforms
//! - [`MeasureKind`] / [`MeasureSpec`] - Known families and request items
//! - [`MeasureFactory`] - Builds named [`Measure`] instances from specs
//! - [`evaluate`] - Batch evaluation with per-entry fault isolation
//! - [`measures`] - The measure bodies behind [`PolarizationMeasure`]
//!
//! ## Example
//!
//! ```rust
//! use polarx_core::{evaluate, MeasureSpec};
//!
//! let x = [0.0, 1.0, 2.0, 3.0, 4.0];
//! let weights = [0.1, 0.2, 0.4, 0.2, 0.1];
//! let specs = vec![
//!     MeasureSpec::new("EstebanRay").with_param("alpha", 0.8),
//!     MeasureSpec::new("GeneralizedER")
//!         .with_param("alpha", 0.8)
//!         .with_param("alienation", "d^2"),
//!     MeasureSpec::new("Unknown"),
//! ];
//!
//! let results = evaluate(&x, &weights, &specs);
//! assert_eq!(results.len(), 3);
//! assert!(results[0].value.is_some());
//! assert_eq!(results[2].name, "Unknown");
//! assert!(results[2].error.is_some());
//! ```

pub mod alienation;
pub mod distribution;
pub mod error;
pub mod evaluator;
pub mod factory;
pub mod measure;
pub mod measures;
pub mod naming;

pub use alienation::Alienation;
pub use distribution::{Distribution, Support};
pub use error::{Error, Result};
pub use evaluator::{evaluate, evaluate_spec, MeasureResult};
pub use factory::{MeasureFactory, NamedMeasure};
pub use measure::{Measure, MeasureKind, MeasureSpec, ParamDef, ParamDefault, ParamValue, Params};
pub use measures::PolarizationMeasure;
pub use naming::{format_number, parse_display_name};
