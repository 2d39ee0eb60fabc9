//! Validation helpers for track data, parameters, and latent states.
//!
//! Purpose
//! -------
//! Centralize the length, finiteness, and range checks performed by the
//! constructors in [`data`](crate::track::core::data) and
//! [`params`](crate::track::core::params), so downstream numerics can assume
//! clean inputs without re-checking.
//!
//! Conventions
//! -----------
//! - Checks stop at the **first** offending element and report its index and
//!   value in the error payload.
//! - Data-side violations surface as [`TrackError`]; parameter-side
//!   violations surface as [`ParamError`].
//! - These helpers never mutate or rescale their inputs.
use crate::track::errors::{ParamError, ParamResult, TrackError, TrackResult};
use ndarray::{ArrayView1, ArrayView2};

/// Validate that a per-record series has the expected length.
///
/// Returns
/// -------
/// `TrackResult<()>`
///   - `Ok(())` if `actual == expected`.
///   - `Err(TrackError::SeriesLengthMismatch)` otherwise, tagged with `name`.
pub fn validate_series_len(name: &'static str, expected: usize, actual: usize) -> TrackResult<()> {
    if actual != expected {
        return Err(TrackError::SeriesLengthMismatch { name, expected, actual });
    }
    Ok(())
}

/// Validate that every entry of a per-record series is finite.
///
/// Returns
/// -------
/// `TrackResult<()>`
///   - `Ok(())` if all entries are finite.
///   - `Err(TrackError::NonFiniteSeries)` for the first NaN/±inf entry.
pub fn validate_finite_series(name: &'static str, series: ArrayView1<f64>) -> TrackResult<()> {
    for (index, &value) in series.iter().enumerate() {
        if !value.is_finite() {
            return Err(TrackError::NonFiniteSeries { name, index, value });
        }
    }
    Ok(())
}

/// Validate the time-gap series: finite and non-negative.
///
/// Negative gaps are rejected here rather than being silently treated as
/// "no transition" downstream.
///
/// # Errors
/// - [`TrackError::NonFiniteSeries`] for NaN/±inf entries.
/// - [`TrackError::NegativeTimeGap`] for the first entry `< 0`.
pub fn validate_time_gaps(dt: ArrayView1<f64>) -> TrackResult<()> {
    validate_finite_series("dt", dt)?;
    for (index, &value) in dt.iter().enumerate() {
        if value < 0.0 {
            return Err(TrackError::NegativeTimeGap { index, value });
        }
    }
    Ok(())
}

/// Validate inclusion flags: each entry must be exactly 0.0 or 1.0.
///
/// The flags multiply density values, so anything other than a crisp 0/1
/// would silently reweight the objective.
///
/// # Errors
/// - [`TrackError::InvalidIncludeFlag`] for the first entry outside {0, 1}.
pub fn validate_include_flags(include: ArrayView1<f64>) -> TrackResult<()> {
    for (index, &value) in include.iter().enumerate() {
        if value != 0.0 && value != 1.0 {
            return Err(TrackError::InvalidIncludeFlag { index, value });
        }
    }
    Ok(())
}

/// Validate quality classes against the configured class count.
///
/// # Errors
/// - [`TrackError::QualityClassOutOfRange`] for the first class
///   `>= n_classes`.
pub fn validate_quality_classes(qual: &[usize], n_classes: usize) -> TrackResult<()> {
    for (index, &class) in qual.iter().enumerate() {
        if class >= n_classes {
            return Err(TrackError::QualityClassOutOfRange { index, class, n_classes });
        }
    }
    Ok(())
}

/// Validate a parameter vector: expected length and all entries finite.
///
/// # Errors
/// - [`ParamError::ParamLengthMismatch`] if the length is wrong.
/// - [`ParamError::NonFiniteParam`] for the first NaN/±inf entry.
pub fn validate_param_vector(
    name: &'static str, vector: ArrayView1<f64>, expected: usize,
) -> ParamResult<()> {
    if vector.len() != expected {
        return Err(ParamError::ParamLengthMismatch { name, expected, actual: vector.len() });
    }
    for &value in vector.iter() {
        if !value.is_finite() {
            return Err(ParamError::NonFiniteParam { name, value });
        }
    }
    Ok(())
}

/// Validate the log-correction matrix: one row per axis, finite entries.
///
/// The column count is free (`n_classes - 1`, possibly zero when only the
/// reference class exists).
///
/// # Errors
/// - [`ParamError::CorrectionShapeMismatch`] if the row count is not 2.
/// - [`ParamError::NonFiniteParam`] for the first NaN/±inf entry.
pub fn validate_correction(log_correction: ArrayView2<f64>) -> ParamResult<()> {
    if log_correction.nrows() != 2 {
        return Err(ParamError::CorrectionShapeMismatch {
            rows: log_correction.nrows(),
            cols: log_correction.ncols(),
        });
    }
    for &value in log_correction.iter() {
        if !value.is_finite() {
            return Err(ParamError::NonFiniteParam { name: "log_correction", value });
        }
    }
    Ok(())
}

/// Validate a latent-state matrix: exactly 2 rows, at least one column,
/// finite entries.
///
/// # Errors
/// - [`ParamError::StateMatrixShape`] if the shape is wrong.
/// - [`ParamError::NonFiniteParam`] for the first NaN/±inf entry.
pub fn validate_state_matrix(name: &'static str, matrix: ArrayView2<f64>) -> ParamResult<()> {
    if matrix.nrows() != 2 {
        return Err(ParamError::StateMatrixShape {
            name,
            rows: matrix.nrows(),
            cols: matrix.ncols(),
            reason: "expected one row per coordinate axis (2 rows).",
        });
    }
    if matrix.ncols() == 0 {
        return Err(ParamError::StateMatrixShape {
            name,
            rows: matrix.nrows(),
            cols: matrix.ncols(),
            reason: "expected at least one latent state column.",
        });
    }
    for &value in matrix.iter() {
        if !value.is_finite() {
            return Err(ParamError::NonFiniteParam { name, value });
        }
    }
    Ok(())
}

/// Validate the degrees-of-freedom floor: finite and non-negative.
///
/// # Errors
/// - [`ParamError::InvalidDfFloor`] otherwise.
pub fn validate_df_floor(min_df: f64) -> ParamResult<()> {
    if !min_df.is_finite() || min_df < 0.0 {
        return Err(ParamError::InvalidDfFloor { value: min_df });
    }
    Ok(())
}

/// Validate the scored-prefix cutoff: finite (any sign).
///
/// # Errors
/// - [`ParamError::InvalidScoredCutoff`] for NaN/±inf.
pub fn validate_scored_cutoff(num_scored: f64) -> ParamResult<()> {
    if !num_scored.is_finite() {
        return Err(ParamError::InvalidScoredCutoff { value: num_scored });
    }
    Ok(())
}
