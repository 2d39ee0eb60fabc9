//! ctcrw — continuous-time correlated-velocity track likelihoods.
//!
//! Purpose
//! -------
//! Serve as the crate root for the CTCRW track-likelihood stack: a pure,
//! reproducible evaluator of the negative log-likelihood of a 2-D
//! position/velocity state-space model observed irregularly through noisy,
//! quality-graded location fixes.
//!
//! Key behaviors
//! -------------
//! - Re-export the [`track`] module as the public crate surface: validated
//!   containers, the SPD factorization and densities, the transition
//!   moments, and the [`track::CtcrwModel`] evaluation entry point.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work is implemented in the inner modules; this
//!   file is the crate surface only.
//! - Evaluation is a pure in-process function boundary: no file formats,
//!   no wire formats, no fitting loop. Callers own data ingestion, the
//!   driving optimizer, and output.
//!
//! Downstream usage
//! ----------------
//! - Most callers want `use ctcrw::track::prelude::*;` and the flow
//!   documented on [`track`].

pub mod track;
