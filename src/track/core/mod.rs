//! core — shared CTCRW data, parameters, factorization, and densities.
//!
//! Purpose
//! -------
//! Collect the building blocks for the CTCRW track likelihood: validated
//! data and parameter containers, the SPD covariance factorization, the
//! Gaussian and Student-t densities evaluated through it, the closed-form
//! transition moments, the per-quality-class observation table, and the
//! multiplicative scoring weights. The model layer builds on these
//! primitives.
//!
//! Key behaviors
//! -------------
//! - Define validated input containers ([`TrackData`], [`CtcrwParams`],
//!   [`StateTrajectory`], [`CtcrwOptions`]) whose invariants downstream
//!   numerics rely on without re-checking.
//! - Factorize SPD covariances once and answer log-determinant and
//!   quadratic-form queries against the factor ([`SpdFactor`]).
//! - Evaluate zero-mean Gaussian and Student-t negative log densities over
//!   a shared factorization ([`neg_log_mvn`], [`ObsDensity`],
//!   [`ObsModelKind`]).
//! - Propagate the latent state across time gaps with closed-form
//!   Ornstein–Uhlenbeck integrals ([`ou_transition`],
//!   [`transition_residual`]).
//! - Map quality classes to observation covariances and density functors
//!   ([`observation_variances`], [`QualityTable`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Containers are immutable after construction; evaluation never mutates
//!   inputs and keeps no cross-call state.
//! - Covariances reaching [`SpdFactor::factorize`] must be symmetric
//!   positive-definite; violations are fatal typed errors, not recoveries.
//! - Scale-like parameters enter on the log scale, so natural-scale values
//!   are positive by construction.
//!
//! Conventions
//! -----------
//! - All indexing is 0-based; axis 0 is latitude, axis 1 longitude.
//! - This module performs no I/O and no logging; errors surface as
//!   [`TrackResult`](crate::track::errors::TrackResult) /
//!   [`ParamResult`](crate::track::errors::ParamResult).
//!
//! Downstream usage
//! ----------------
//! - Construct the containers at the boundary, then evaluate through
//!   [`CtcrwModel`](crate::track::models::CtcrwModel); reach into the
//!   submodules directly only for lower-level control (e.g. factorizing a
//!   covariance outside the model walk).

pub mod data;
pub mod density;
pub mod factorization;
pub mod masks;
pub mod observation;
pub mod params;
pub mod process;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::TrackData;
pub use self::density::{neg_log_mvn, ObsDensity, ObsModelKind};
pub use self::factorization::SpdFactor;
pub use self::masks::{index_match_weight, prefix_weight};
pub use self::observation::{observation_sds, observation_variances, QualityTable};
pub use self::params::{CtcrwOptions, CtcrwParams, StateTrajectory};
pub use self::process::{ou_transition, transition_residual, OuTransition};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use ctcrw::track::core::prelude::*;
//
// to import the main core surface in a single line.

pub mod prelude {
    pub use super::data::TrackData;
    pub use super::density::{neg_log_mvn, ObsDensity, ObsModelKind};
    pub use super::factorization::SpdFactor;
    pub use super::observation::QualityTable;
    pub use super::params::{CtcrwOptions, CtcrwParams, StateTrajectory};
    pub use super::process::{ou_transition, OuTransition};
}
