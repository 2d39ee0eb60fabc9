//! track — CTCRW track-likelihood stack: core numerics, model, and errors.
//!
//! Purpose
//! -------
//! Provide a cohesive layer for evaluating the negative log-likelihood of a
//! continuous-time correlated-velocity (CTCRW) movement model observed
//! through irregular, quality-graded location fixes. This is the main entry
//! point for track likelihoods in the crate and the surface consumers
//! should depend on.
//!
//! Key behaviors
//! -------------
//! - Collect the numerical and structural building blocks in [`core`]:
//!   validated data/parameter containers, the SPD factorization, Gaussian
//!   and Student-t densities, transition moments, the quality-class table,
//!   and scoring weights.
//! - Expose the evaluation API in [`models`] via [`CtcrwModel`], returning
//!   a [`CtcrwReport`] with the objective and derived reporting quantities.
//! - Centralize error types in [`errors`] ([`TrackError`], [`ParamError`],
//!   and the `TrackResult` / `ParamResult` aliases) so callers see a
//!   uniform error surface.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are carried in validated containers; downstream numerics assume
//!   their invariants (finiteness, non-negative gaps, in-range classes,
//!   2-row latent matrices) without re-checking.
//! - Evaluation is single-threaded, synchronous, and pure: a function from
//!   `(data, params, states, options)` to a report, with no memoization and
//!   no state surviving across calls.
//! - Data-dependent selection (scored prefix, inclusion flags, diagnostic
//!   record) is expressed as multiplicative 0/1 weights on evaluated terms,
//!   never as early exits, so the objective stays smooth in the continuous
//!   parameters.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based throughout. Axis 0 is latitude, axis 1 longitude,
//!   in every per-axis vector and 2-row matrix.
//! - Scale-like parameters enter on the log scale; degrees of freedom are
//!   floored via `exp(raw) + min_df`.
//! - The stack performs no I/O and no logging; callers orchestrate data
//!   loading and output. Error conditions are surfaced as typed results;
//!   numeric overflow propagates as infinities by design.
//!
//! Downstream usage
//! ----------------
//! - Typical flow:
//!   1. Construct [`TrackData`] from the observed series and the configured
//!      quality-class count.
//!   2. Construct [`CtcrwParams`] (log-scale), [`StateTrajectory`]
//!      (caller-owned latent states), and [`CtcrwOptions`] (observation
//!      family, df floor, scored-prefix cutoff).
//!   3. Build a [`CtcrwModel`] and call
//!      [`negative_log_likelihood`](models::CtcrwModel::negative_log_likelihood).
//!   4. Hand `CtcrwReport::nll` to the driving optimizer and the remaining
//!      report fields to the output layer.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each submodule; the end-to-end pipeline
//!   (hand-computable reference totals, family convergence, masking) is
//!   exercised in `tests/integration_ctcrw_pipeline.rs`.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------
//
// These are the types most callers need day to day. More specialized items
// (validation helpers, the raw factorization, transition moments) remain
// under their respective submodules.

pub use self::core::{
    CtcrwOptions, CtcrwParams, ObsDensity, ObsModelKind, QualityTable, SpdFactor,
    StateTrajectory, TrackData,
};

pub use self::errors::{ParamError, ParamResult, TrackError, TrackResult};

pub use self::models::{CtcrwModel, CtcrwReport};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use ctcrw::track::prelude::*;
//
// to import the main track-likelihood surface in a single line.

pub mod prelude {
    pub use super::{
        CtcrwModel, CtcrwOptions, CtcrwParams, CtcrwReport, ObsModelKind, ParamError,
        ParamResult, StateTrajectory, TrackData, TrackError, TrackResult,
    };
}
