//! # polarx
//!
//! Polarization and bi-polarization indices over weighted distributions of
//! opinion positions, served over HTTP.
//!
//! Callers submit positions, matching weights and a list of measure
//! specifications; every measure is built and scored independently, so one
//! bad specification never aborts the batch.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install polarx
//! polarx --http-port 8000
//! ```
//!
//! ```bash
//! curl -X POST localhost:8000/compute -H 'Content-Type: application/json' -d '{
//!   "x": [0, 1, 2, 3, 4],
//!   "weights": [0.1, 0.2, 0.4, 0.2, 0.1],
//!   "measures": [{"type": "GeneralizedER", "params": {"alpha": 0.8, "alienation": "d^2"}}]
//! }'
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use polarx::prelude::*;
//!
//! let built = MeasureFactory::build("MEC", &Params::new()).unwrap();
//! assert_eq!(built.name, "MEC(2.0,1.15)");
//!
//! let distribution = Distribution::new(&[0.0, 1.0], &[0.5, 0.5]);
//! let value = built.measure.evaluate(&distribution).unwrap();
//! assert!((value - 0.5).abs() < 1e-12);
//! ```
//!
//! ## Crate Structure
//!
//! - [`polarx-core`](https://docs.rs/polarx-core) - Measures, factory, batch evaluator
//! - [`polarx-api`](https://docs.rs/polarx-api) - REST API

// Re-export core types
pub use polarx_core::{
    evaluate, parse_display_name,
    Alienation, Distribution, Error, Measure, MeasureFactory, MeasureKind,
    MeasureResult, MeasureSpec, NamedMeasure, ParamValue, Params,
    PolarizationMeasure, Result,
};

// Re-export API
pub use polarx_api::{RestApi, ServerConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        evaluate, parse_display_name,
        Alienation, Distribution, Error, Measure, MeasureFactory, MeasureKind,
        MeasureResult, MeasureSpec, NamedMeasure, ParamValue, Params,
        PolarizationMeasure, Result,
        RestApi, ServerConfig,
    };
}

/// Measure bodies
pub mod measures {
    pub use polarx_core::measures::*;
}
