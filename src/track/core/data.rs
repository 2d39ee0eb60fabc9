//! Track data containers for CTCRW likelihood evaluation.
//!
//! Purpose
//! -------
//! Provide a small, validated container for an observed track: coordinates,
//! time gaps, quality classes, and inclusion flags, one entry per record.
//! This module centralizes input validation for raw track data so the
//! numerical core can assume clean, shape-consistent inputs.
//!
//! Key behaviors
//! -------------
//! - [`TrackData`] enforces the record invariants at construction time:
//!   equal series lengths, finite coordinates, finite non-negative time
//!   gaps, crisp 0/1 inclusion flags, and in-range quality classes.
//! - The configured quality-class count is stored alongside the records so
//!   the model layer can cross-check it against the parameter set.
//!
//! Invariants & assumptions
//! ------------------------
//! - All series have the same, non-zero length `n`.
//! - `dt[i] >= 0` for all `i`; `dt[i] == 0` marks a record sharing its
//!   latent state with the previous record (duplicate timestamp). `dt[0]`
//!   is conventionally 0 and never drives a transition.
//! - `qual[i] < n_classes` for all `i`.
//! - `include[i] ∈ {0.0, 1.0}` — a boolean-as-numeric multiplier.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; records are ordered in time.
//! - Coordinates are stored as-is; any projection or unit handling happens
//!   upstream.
//! - This module does **not** interpret the data; it only validates it.
//!
//! Downstream usage
//! ----------------
//! - Construct [`TrackData`] at the boundary where raw observations enter
//!   the modeling stack, then hand it (immutably) to the likelihood
//!   evaluator.
//! - Consumers may rely on the invariants above without re-validating.
use crate::track::core::validation::{
    validate_finite_series, validate_include_flags, validate_quality_classes, validate_series_len,
    validate_time_gaps,
};
use crate::track::errors::{TrackError, TrackResult};
use ndarray::Array1;

/// `TrackData` — validated observed track, one entry per record.
///
/// Purpose
/// -------
/// Represent a single validated track for CTCRW likelihood evaluation:
/// observed coordinates, the time gap to the previous record, a quality
/// class selecting the observation covariance, and an inclusion flag
/// weighting the record's contribution.
///
/// Fields
/// ------
/// - `lat`, `lon`: `Array1<f64>`
///   Observed coordinates per record; finite.
/// - `dt`: `Array1<f64>`
///   Time gap since the previous record; finite and non-negative. A zero
///   gap means the record shares the previous record's latent state.
/// - `qual`: `Vec<usize>`
///   Quality class per record, each strictly below `n_classes`.
/// - `include`: `Array1<f64>`
///   Per-record 0/1 multiplier on the observation term.
/// - `n_classes`: `usize`
///   Number of quality classes the records were validated against.
///
/// Invariants
/// ----------
/// - All series share the same length `n > 0`.
/// - Entries satisfy the per-series domains listed above.
///
/// Notes
/// -----
/// - Negative time gaps are rejected outright; they are a caller error, not
///   a modeling case.
/// - The container is immutable after construction; evaluation never
///   mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackData {
    /// Observed first-axis coordinates (e.g. latitude).
    pub lat: Array1<f64>,
    /// Observed second-axis coordinates (e.g. longitude).
    pub lon: Array1<f64>,
    /// Time gap since the previous record (>= 0; 0 = shared latent state).
    pub dt: Array1<f64>,
    /// Quality class per record.
    pub qual: Vec<usize>,
    /// Per-record 0/1 inclusion multiplier.
    pub include: Array1<f64>,
    /// Quality-class count the records were validated against.
    pub n_classes: usize,
}

impl TrackData {
    /// Construct a validated [`TrackData`] instance from raw series.
    ///
    /// Parameters
    /// ----------
    /// - `lat`, `lon`: coordinate series; must be finite.
    /// - `dt`: time-gap series; finite and non-negative.
    /// - `qual`: quality classes; each `< n_classes`.
    /// - `include`: inclusion flags; each exactly 0.0 or 1.0.
    /// - `n_classes`: number of quality classes configured for this run.
    ///
    /// Returns
    /// -------
    /// `TrackResult<TrackData>`
    ///   - `Ok(TrackData)` if all invariants hold.
    ///   - `Err(TrackError)` describing the first violation.
    ///
    /// Errors
    /// ------
    /// - [`TrackError::EmptyTrack`] when `lat` is empty.
    /// - [`TrackError::SeriesLengthMismatch`] when any series length differs
    ///   from `lat.len()`.
    /// - [`TrackError::NonFiniteSeries`] for NaN/±inf coordinates or gaps.
    /// - [`TrackError::NegativeTimeGap`] for the first negative gap.
    /// - [`TrackError::InvalidIncludeFlag`] for a flag outside {0, 1}.
    /// - [`TrackError::QualityClassOutOfRange`] for a class `>= n_classes`.
    ///
    /// Panics
    /// ------
    /// - Never panics; all invalid inputs are reported via `TrackError`.
    pub fn new(
        lat: Array1<f64>, lon: Array1<f64>, dt: Array1<f64>, qual: Vec<usize>,
        include: Array1<f64>, n_classes: usize,
    ) -> TrackResult<Self> {
        let n = lat.len();
        if n == 0 {
            return Err(TrackError::EmptyTrack);
        }
        validate_series_len("lon", n, lon.len())?;
        validate_series_len("dt", n, dt.len())?;
        validate_series_len("qual", n, qual.len())?;
        validate_series_len("include", n, include.len())?;

        validate_finite_series("lat", lat.view())?;
        validate_finite_series("lon", lon.view())?;
        validate_time_gaps(dt.view())?;
        validate_include_flags(include.view())?;
        validate_quality_classes(&qual, n_classes)?;

        Ok(TrackData { lat, lon, dt, qual, include, n_classes })
    }

    /// Number of records in the track.
    pub fn len(&self) -> usize {
        self.lat.len()
    }

    /// Always false for a constructed instance; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.lat.is_empty()
    }

    /// Number of latent states the trajectory addresses: one for the first
    /// record plus one per later record with a strictly positive gap.
    ///
    /// The model layer uses this to check the caller-supplied latent-state
    /// matrices before evaluation.
    pub fn n_states(&self) -> usize {
        1 + self.dt.iter().skip(1).filter(|&&gap| gap > 0.0).count()
    }
}
