//! Error types used by the crate.

use geodraw_types::error::GeodrawTypesError;
use geodraw_types::FeatureId;
use thiserror::Error;

/// Geodraw error type.
#[derive(Debug, Error)]
pub enum GeodrawError {
    /// The system random source failed.
    #[error("failed to generate feature id: {0}")]
    RandomSource(getrandom::Error),
    /// Identifier configuration cannot produce identifiers.
    #[error("invalid id configuration: {0}")]
    InvalidIdConfig(String),
    /// Every attempt to generate an identifier produced one that was already issued.
    #[error("no unused feature id found after {0} attempts")]
    IdSpaceExhausted(usize),
    /// The operation needs a map SDK, but the drawing manager is not attached to one.
    #[error("drawing manager is not attached to a map")]
    NotAttached,
    /// No tracked feature with the given id.
    #[error("feature {0} is not tracked")]
    UnknownFeature(FeatureId),
    /// Error converting geometries or feature records.
    #[error(transparent)]
    Types(#[from] GeodrawTypesError),
}

impl From<getrandom::Error> for GeodrawError {
    fn from(value: getrandom::Error) -> Self {
        Self::RandomSource(value)
    }
}
