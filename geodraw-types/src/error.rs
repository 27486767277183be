//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum GeodrawTypesError {
    /// Geometry conversion error.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
    /// Shape kind name is not one of the supported kinds.
    #[error("unknown shape kind: {0}")]
    UnknownShapeKind(String),
    /// Feature cannot be converted into a feature record.
    #[error("invalid feature: {0}")]
    InvalidFeature(String),
}
