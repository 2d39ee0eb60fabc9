//! CTCRW parameterization: log-scale inputs, latent states, and run options.
//!
//! This module provides the **model-space** parameter container
//! [`CtcrwParams`], the caller-owned latent-state matrices
//! [`StateTrajectory`], and the per-run configuration [`CtcrwOptions`].
//!
//! ## Mapping conventions
//! - Rates and standard deviations enter on the **log scale** and are
//!   mapped to the natural scale with `exp`, so any real-valued vector an
//!   unconstrained optimizer proposes yields positive rates/variances:
//!   `beta = exp(log_beta)`, `var_state = exp(2·log_sd_state)`.
//! - Degrees of freedom are floored: `ν_q = exp(df[q]) + min_df`, keeping
//!   `ν_q > min_df >= 0` everywhere.
//! - Per-class observation corrections are log-scale multipliers with the
//!   reference class (index 0) fixed at no correction; the matrix carries
//!   only the `n_classes − 1` non-reference columns.
//!
//! ## Axis convention
//! Index 0 is the first coordinate axis (latitude), index 1 the second
//! (longitude), in every length-2 vector and every 2-row matrix here.
//!
//! ## Invariants validated by constructors
//! - `log_beta`, `log_sd_state`, `log_sd_obs`, `gamma` have length 2 and
//!   finite entries.
//! - `log_correction` has 2 rows and finite entries.
//! - `df` has length `log_correction.ncols() + 1` and finite entries.
//! - `mu` and `vel` are 2-row matrices of equal, non-zero width with finite
//!   entries.
//! - `min_df` is finite and >= 0; `num_scored` is finite.
use crate::track::core::density::ObsModelKind;
use crate::track::core::validation::{
    validate_correction, validate_df_floor, validate_param_vector, validate_scored_cutoff,
    validate_state_matrix,
};
use crate::track::errors::{ParamError, ParamResult};
use ndarray::{Array1, Array2};

/// Constrained **model-space** parameters for the CTCRW track model.
///
/// All stochastic-scale quantities are stored on the log scale (see the
/// module doc); natural-scale views are exposed through the accessor
/// methods. Invariants are validated at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CtcrwParams {
    /// Log mean-reversion rate per axis (length 2).
    pub log_beta: Array1<f64>,
    /// Log process standard deviation per axis (length 2).
    pub log_sd_state: Array1<f64>,
    /// Log baseline observation standard deviation per axis (length 2).
    pub log_sd_obs: Array1<f64>,
    /// Log observation corrections, 2 x (n_classes − 1); class 0 carries none.
    pub log_correction: Array2<f64>,
    /// Asymptotic velocity drift per axis (length 2, natural scale).
    pub gamma: Array1<f64>,
    /// Raw degrees-of-freedom parameters, one per quality class.
    pub df: Array1<f64>,
}

impl CtcrwParams {
    /// Create validated model-space parameters.
    ///
    /// Validates the lengths and finiteness listed in the module doc; in
    /// particular `df.len()` must equal `log_correction.ncols() + 1`, the
    /// implied number of quality classes.
    ///
    /// # Errors
    /// - [`ParamError::ParamLengthMismatch`] / [`ParamError::NonFiniteParam`]
    ///   for malformed vectors.
    /// - [`ParamError::CorrectionShapeMismatch`] if the correction matrix
    ///   does not have one row per axis.
    pub fn new(
        log_beta: Array1<f64>, log_sd_state: Array1<f64>, log_sd_obs: Array1<f64>,
        log_correction: Array2<f64>, gamma: Array1<f64>, df: Array1<f64>,
    ) -> ParamResult<Self> {
        validate_param_vector("log_beta", log_beta.view(), 2)?;
        validate_param_vector("log_sd_state", log_sd_state.view(), 2)?;
        validate_param_vector("log_sd_obs", log_sd_obs.view(), 2)?;
        validate_correction(log_correction.view())?;
        validate_param_vector("gamma", gamma.view(), 2)?;
        validate_param_vector("df", df.view(), log_correction.ncols() + 1)?;
        Ok(CtcrwParams { log_beta, log_sd_state, log_sd_obs, log_correction, gamma, df })
    }

    /// Number of quality classes: the reference class plus one per
    /// correction column.
    pub fn n_classes(&self) -> usize {
        self.log_correction.ncols() + 1
    }

    /// Natural-scale mean-reversion rates `exp(log_beta)`, per axis.
    pub fn beta(&self) -> Array1<f64> {
        self.log_beta.mapv(f64::exp)
    }

    /// Natural-scale process variance rates `exp(2·log_sd_state)`, per axis.
    pub fn var_state(&self) -> Array1<f64> {
        self.log_sd_state.mapv(|v| (2.0 * v).exp())
    }

    /// Linear-scale correction factors `exp(log_correction)`, for reporting.
    pub fn correction(&self) -> Array2<f64> {
        self.log_correction.mapv(f64::exp)
    }

    /// Effective per-class degrees of freedom `exp(df) + min_df`.
    ///
    /// The floor guarantees `ν > min_df` for every real-valued raw
    /// parameter, which is what keeps the Student-t density well-defined
    /// under unconstrained optimization.
    pub fn effective_dfs(&self, min_df: f64) -> Array1<f64> {
        self.df.mapv(|raw| raw.exp() + min_df)
    }
}

/// Caller-owned latent position/velocity estimates, one column per latent
/// state, one row per axis.
///
/// These are parameters of the outer estimation problem, not quantities
/// this crate computes; evaluation reads them immutably.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTrajectory {
    /// Latent positions, 2 x n_states.
    pub mu: Array2<f64>,
    /// Latent velocities, 2 x n_states.
    pub vel: Array2<f64>,
}

impl StateTrajectory {
    /// Create a validated latent-state trajectory.
    ///
    /// # Errors
    /// - [`ParamError::StateMatrixShape`] if either matrix is not a 2-row
    ///   matrix with at least one column, or the column counts differ.
    /// - [`ParamError::NonFiniteParam`] for NaN/±inf entries.
    pub fn new(mu: Array2<f64>, vel: Array2<f64>) -> ParamResult<Self> {
        validate_state_matrix("mu", mu.view())?;
        validate_state_matrix("vel", vel.view())?;
        if mu.ncols() != vel.ncols() {
            return Err(ParamError::StateMatrixShape {
                name: "vel",
                rows: vel.nrows(),
                cols: vel.ncols(),
                reason: "mu and vel must have the same number of state columns.",
            });
        }
        Ok(StateTrajectory { mu, vel })
    }

    /// Number of latent states (columns).
    pub fn n_states(&self) -> usize {
        self.mu.ncols()
    }
}

/// Per-run evaluation options.
///
/// Chosen once per likelihood evaluation and uniform across quality
/// classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CtcrwOptions {
    /// Observation density family for every quality class.
    pub obs_model: ObsModelKind,
    /// Floor added to `exp(df)` in the degrees-of-freedom mapping (>= 0).
    pub min_df: f64,
    /// Continuous cutoff: records with index strictly below it are scored,
    /// and the record whose index equals it has its raw residual reported.
    pub num_scored: f64,
}

impl CtcrwOptions {
    /// Create validated run options.
    ///
    /// # Errors
    /// - [`ParamError::InvalidDfFloor`] if `min_df` is not finite and >= 0.
    /// - [`ParamError::InvalidScoredCutoff`] if `num_scored` is not finite.
    pub fn new(obs_model: ObsModelKind, min_df: f64, num_scored: f64) -> ParamResult<Self> {
        validate_df_floor(min_df)?;
        validate_scored_cutoff(num_scored)?;
        Ok(CtcrwOptions { obs_model, min_df, num_scored })
    }
}
