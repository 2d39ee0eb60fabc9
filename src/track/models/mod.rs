//! models — the user-facing CTCRW track likelihood.
//!
//! Purpose
//! -------
//! Expose the track-level evaluation API on top of `track::core`: the
//! [`CtcrwModel`] entry point that walks a record series, dispatches
//! transition and observation terms, and returns the total negative
//! log-likelihood together with the derived reporting quantities in a
//! [`CtcrwReport`].
//!
//! Key behaviors
//! -------------
//! - Cross-check data, parameters, and the latent trajectory before any
//!   numerics run.
//! - Keep evaluation a pure function of its inputs: no caching, no hidden
//!   state, bit-for-bit reproducible.
//!
//! Conventions
//! -----------
//! - Errors are reported as
//!   [`TrackResult`](crate::track::errors::TrackResult); panics indicate
//!   programming errors, not bad data or bad parameters.

pub mod ctcrw;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::ctcrw::{CtcrwModel, CtcrwReport};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::ctcrw::{CtcrwModel, CtcrwReport};
}
