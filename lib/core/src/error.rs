use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unknown measure type: {0}")]
    UnknownMeasureType(String),

    #[error("Unknown alienation: {0}")]
    UnknownAlienationKey(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Non-finite result: {0}")]
    NonFiniteResult(f64),

    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    #[error("Computation failed: {0}")]
    Computation(String),
}

impl Error {
    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
