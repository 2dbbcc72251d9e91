//! Error types for field evaluation and for the configuration/output layer.

use nalgebra::Vector3;
use thiserror::Error;

/// Failures of the field evaluation routines.
///
/// Singularities that arise from the closed-form expressions themselves (points on the
/// loop axis, points on the wire) are not errors; they are resolved inside the evaluator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// A direction vector has zero or non-finite length.
    #[error("degenerate direction vector ({}, {}, {})", .direction.x, .direction.y, .direction.z)]
    DegenerateDirection { direction: Vector3<f64> },

    /// A loop radius is non-positive or non-finite, or the loop centre is non-finite.
    #[error("invalid loop geometry: radius {radius}, centre ({}, {}, {})", .centre.x, .centre.y, .centre.z)]
    InvalidLoopGeometry { radius: f64, centre: Vector3<f64> },

    /// An observation point has a non-finite coordinate.
    #[error("non-finite observation point #{index}: ({}, {}, {})", .point.x, .point.y, .point.z)]
    InvalidInput { index: usize, point: Vector3<f64> },
}

/// Top-level error type of the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when a configuration file parses but describes an unusable setup.
    #[error("configuration error: {0}")]
    Configuration(String),
}
