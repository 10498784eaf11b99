//! # polarx API
//!
//! HTTP boundary for the polarx measure evaluator.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/compute` | Evaluate a batch of measures on one distribution |
//! | `GET` | `/alienation-functions` | List alienation function keys |
//! | `GET` | `/measure-types` | Catalogue of measure families and parameters |
//! | `POST` | `/measures/parse` | Map a display name back to a specification |

pub mod rest;

pub use rest::{RestApi, ServerConfig, DEFAULT_JSON_LIMIT};
