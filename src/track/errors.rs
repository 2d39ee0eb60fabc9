//! Errors for CTCRW track likelihoods (data validation, parameter checks,
//! covariance factorization, and quality-class lookups).
//!
//! This module defines a model error type, [`TrackError`], and a parameter
//! error type, [`ParamError`], used across the track stack. Both implement
//! `Display`/`Error`; `ParamError` converts into `TrackError` at the model
//! boundary.
//!
//! ## Conventions
//! - **Indices are 0-based** and refer to record positions in the observed
//!   series unless stated otherwise.
//! - Time gaps must be **finite and non-negative**; negative gaps are a data
//!   error, not a silently skipped branch.
//! - A non-positive-definite covariance is **fatal**: the evaluation aborts
//!   rather than returning a misleading finite value.
//! - Quality classes address a fixed-size density table; an out-of-range
//!   class is an index error.

/// Crate-wide result alias for track operations that may produce
/// [`TrackError`].
pub type TrackResult<T> = Result<T, TrackError>;

/// Result alias for parameter-construction/validation paths that may produce
/// [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for CTCRW track modeling.
///
/// Covers input/data validation, latent-state consistency, covariance
/// factorization failures, and quality-class lookups. Implements
/// `Display`/`Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackError {
    // ---- Input/data validation ----
    /// Track has no records.
    EmptyTrack,

    /// A per-record series has the wrong length.
    SeriesLengthMismatch { name: &'static str, expected: usize, actual: usize },

    /// A series entry is NaN/±inf.
    NonFiniteSeries { name: &'static str, index: usize, value: f64 },

    /// A time gap is negative (gaps must be rejected upstream).
    NegativeTimeGap { index: usize, value: f64 },

    /// An inclusion flag is neither 0 nor 1.
    InvalidIncludeFlag { index: usize, value: f64 },

    /// A record's quality class addresses no entry in the density table.
    QualityClassOutOfRange { index: usize, class: usize, n_classes: usize },

    // ---- Cross-container consistency ----
    /// Data and parameters disagree on the number of quality classes.
    ClassCountMismatch { data: usize, params: usize },

    /// The trajectory requires more latent states than the caller supplied.
    StateCountMismatch { required: usize, available: usize },

    // ---- Covariance factorization and densities ----
    /// Covariance is not symmetric positive-definite.
    CovarianceNotPositiveDefinite { dim: usize },

    /// A vector/matrix dimension does not match the factorization.
    DimensionMismatch { expected: usize, actual: usize },

    /// Degrees of freedom must be finite and strictly positive.
    InvalidDegreesOfFreedom { value: f64 },

    // ---- Parameter validation ----
    /// Wrapper for parameter-construction errors.
    Param(ParamError),
}

impl std::error::Error for TrackError {}

impl std::fmt::Display for TrackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            TrackError::EmptyTrack => {
                write!(f, "Track contains no records.")
            }
            TrackError::SeriesLengthMismatch { name, expected, actual } => {
                write!(f, "Series '{name}' must have length {expected}; got {actual}.")
            }
            TrackError::NonFiniteSeries { name, index, value } => {
                write!(f, "Series '{name}' has a non-finite entry at index {index}: {value}")
            }
            TrackError::NegativeTimeGap { index, value } => {
                write!(f, "Time gap at index {index} is negative: {value}")
            }
            TrackError::InvalidIncludeFlag { index, value } => {
                write!(f, "Inclusion flag at index {index} must be 0 or 1; got {value}")
            }
            TrackError::QualityClassOutOfRange { index, class, n_classes } => {
                write!(
                    f,
                    "Record {index} has quality class {class}, outside the {n_classes} configured classes."
                )
            }
            // ---- Cross-container consistency ----
            TrackError::ClassCountMismatch { data, params } => {
                write!(
                    f,
                    "Data were validated against {data} quality classes but parameters define {params}."
                )
            }
            TrackError::StateCountMismatch { required, available } => {
                write!(
                    f,
                    "Trajectory requires {required} latent states but only {available} were supplied."
                )
            }
            // ---- Covariance factorization and densities ----
            TrackError::CovarianceNotPositiveDefinite { dim } => {
                write!(f, "{dim}x{dim} covariance is not symmetric positive-definite.")
            }
            TrackError::DimensionMismatch { expected, actual } => {
                write!(f, "Expected a vector of dimension {expected}; got {actual}.")
            }
            TrackError::InvalidDegreesOfFreedom { value } => {
                write!(f, "Degrees of freedom must be finite and > 0; got: {value}")
            }
            // ---- Parameter validation ----
            TrackError::Param(err) => err.fmt(f),
        }
    }
}

impl From<ParamError> for TrackError {
    fn from(err: ParamError) -> TrackError {
        TrackError::Param(err)
    }
}

/// Errors specific to parameter construction and validation.
///
/// Typical causes include length mismatches for the per-axis parameter
/// vectors, non-finite coordinates, and malformed correction matrices.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// A parameter vector has the wrong length.
    ParamLengthMismatch { name: &'static str, expected: usize, actual: usize },

    /// A parameter entry is NaN/±inf.
    NonFiniteParam { name: &'static str, value: f64 },

    /// The correction matrix must have one row per coordinate axis.
    CorrectionShapeMismatch { rows: usize, cols: usize },

    /// A latent-state matrix has the wrong shape.
    StateMatrixShape { name: &'static str, rows: usize, cols: usize, reason: &'static str },

    /// The degrees-of-freedom floor must be finite and >= 0.
    InvalidDfFloor { value: f64 },

    /// The scored-prefix cutoff must be finite.
    InvalidScoredCutoff { value: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::ParamLengthMismatch { name, expected, actual } => {
                write!(f, "Parameter '{name}' must have length {expected}; got {actual}.")
            }
            ParamError::NonFiniteParam { name, value } => {
                write!(f, "Parameter '{name}' has a non-finite entry: {value}")
            }
            ParamError::CorrectionShapeMismatch { rows, cols } => {
                write!(
                    f,
                    "Correction matrix must have 2 rows (one per axis); got {rows}x{cols}."
                )
            }
            ParamError::StateMatrixShape { name, rows, cols, reason } => {
                write!(f, "Latent-state matrix '{name}' has shape {rows}x{cols}: {reason}")
            }
            ParamError::InvalidDfFloor { value } => {
                write!(f, "Degrees-of-freedom floor must be finite and >= 0; got: {value}")
            }
            ParamError::InvalidScoredCutoff { value } => {
                write!(f, "Scored-prefix cutoff must be finite; got: {value}")
            }
        }
    }
}
