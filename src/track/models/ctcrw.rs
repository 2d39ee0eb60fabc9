//! CTCRW track model: negative log-likelihood over an observed track.
//!
//! This module wires the transition and observation densities into a single
//! pass over the record series. The walk keeps a latent-state counter that
//! advances on every positive time gap after the first record, so records
//! sharing a timestamp share a latent state, and dispatches per record:
//!
//! - first logical state: observation term only (no transition is scored
//!   into the first state — there is no prior on it);
//! - positive gap thereafter: one 4-dimensional transition term plus the
//!   observation term;
//! - zero gap thereafter: observation term only.
//!
//! Every observation density is evaluated and then scaled by the record's
//! inclusion flag and the scored-prefix weight; the weights multiply, they
//! never skip the evaluation, so the accumulated total stays smooth in the
//! continuous parameters.
use crate::track::core::{
    data::TrackData,
    density::neg_log_mvn,
    factorization::SpdFactor,
    masks::{index_match_weight, prefix_weight},
    observation::{observation_sds, QualityTable},
    params::{CtcrwOptions, CtcrwParams, StateTrajectory},
    process::transition_residual,
};
use crate::track::errors::{TrackError, TrackResult};
use ndarray::{array, Array1, Array2};

/// CTCRW track model: per-run options bundled with the evaluation entry
/// point.
///
/// The model owns no data and no scratch state; evaluation is a pure
/// function of `(data, params, states)` given the options, reproducible
/// bit-for-bit across calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CtcrwModel {
    /// Run options: observation family, df floor, scored-prefix cutoff.
    pub options: CtcrwOptions,
}

/// Evaluation output: the objective plus the derived reporting quantities.
///
/// The reporting fields are byproducts for the caller's output layer; they
/// feed nothing back into the objective.
#[derive(Debug, Clone, PartialEq)]
pub struct CtcrwReport {
    /// Total negative log-likelihood.
    pub nll: f64,
    /// Linear-scale correction factors, 2 x (n_classes − 1).
    pub correction: Array2<f64>,
    /// Observation standard deviations, 2 x n_classes.
    pub sd_obs: Array2<f64>,
    /// Effective per-class degrees of freedom.
    pub dfs: Array1<f64>,
    /// Raw (lat, lon) residual of the record whose index equals the
    /// scored-prefix cutoff; zero when no record matches.
    pub residual_at_cutoff: Array1<f64>,
}

impl CtcrwModel {
    /// Construct a model from validated options.
    pub fn new(options: CtcrwOptions) -> CtcrwModel {
        CtcrwModel { options }
    }

    /// Evaluate the negative log-likelihood of a track.
    ///
    /// # Steps
    /// 1. Cross-check data against parameters (class counts) and the latent
    ///    trajectory (state count implied by the gap pattern).
    /// 2. Map parameters to the natural scale and build the per-class
    ///    density table once.
    /// 3. Walk the records, advancing the latent-state counter on positive
    ///    gaps, accumulating transition and weighted observation terms and
    ///    the diagnostic residual.
    ///
    /// # Arguments
    /// - `data`: validated observed track.
    /// - `params`: validated model parameters.
    /// - `states`: caller-owned latent positions/velocities, one column per
    ///   latent state.
    ///
    /// # Returns
    /// A [`CtcrwReport`] with the total and the derived reporting
    /// quantities.
    ///
    /// # Errors
    /// - [`TrackError::ClassCountMismatch`] if data and parameters disagree
    ///   on the number of quality classes.
    /// - [`TrackError::StateCountMismatch`] if the trajectory implies more
    ///   latent states than `states` supplies.
    /// - [`TrackError::CovarianceNotPositiveDefinite`] from a degenerate
    ///   transition or observation covariance.
    /// - [`TrackError::QualityClassOutOfRange`] from a class lookup beyond
    ///   the table (already excluded by `TrackData::new`, kept as a
    ///   backstop).
    pub fn negative_log_likelihood(
        &self, data: &TrackData, params: &CtcrwParams, states: &StateTrajectory,
    ) -> TrackResult<CtcrwReport> {
        if data.n_classes != params.n_classes() {
            return Err(TrackError::ClassCountMismatch {
                data: data.n_classes,
                params: params.n_classes(),
            });
        }
        let required = data.n_states();
        if required > states.n_states() {
            return Err(TrackError::StateCountMismatch {
                required,
                available: states.n_states(),
            });
        }

        let beta = params.beta();
        let var_state = params.var_state();
        let table = QualityTable::build(params, &self.options)?;

        let mut state_num = 0usize;
        let mut nll = 0.0;
        let mut residual_at_cutoff = Array1::<f64>::zeros(2);

        for i in 0..data.len() {
            if i > 0 && data.dt[i] > 0.0 {
                state_num += 1;
            }

            if state_num > 0 && data.dt[i] > 0.0 {
                let (residual, cov) = transition_residual(
                    beta.view(),
                    var_state.view(),
                    params.gamma.view(),
                    states,
                    state_num,
                    data.dt[i],
                );
                let factor = SpdFactor::factorize(cov.view())?;
                nll += neg_log_mvn(&factor, residual.view())?;
            }

            let obs = array![
                data.lat[i] - states.mu[[0, state_num]],
                data.lon[i] - states.mu[[1, state_num]]
            ];
            let keep = prefix_weight(i, self.options.num_scored);
            nll += table.density(data.qual[i], i)?.neg_log_density(obs.view())?
                * data.include[i]
                * keep;

            residual_at_cutoff
                .scaled_add(index_match_weight(i, self.options.num_scored), &obs);
        }

        Ok(CtcrwReport {
            nll,
            correction: params.correction(),
            sd_obs: observation_sds(params),
            dfs: params.effective_dfs(self.options.min_df),
            residual_at_cutoff,
        })
    }
}
