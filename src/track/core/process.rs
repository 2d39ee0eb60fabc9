//! Closed-form transition moments for the correlated-velocity process.
//!
//! Implements the Ornstein–Uhlenbeck velocity integrals that propagate one
//! coordinate axis of the latent state `(position, velocity)` across a time
//! gap, and the assembly of the 4-dimensional transition residual and
//! block-diagonal covariance across both axes.
//!
//! ## Model convention
//! Velocity mean-reverts toward a drift `γ` at rate `β > 0` with Gaussian
//! process noise of rate `σ²`; position integrates velocity. Over a gap
//! `dt`, with `prev = (p₀, v₀)`:
//!
//! ```text
//! E[v]        = γ + e^(−β·dt)·(v₀ − γ)
//! E[p]        = p₀ + v₀·(1 − e^(−β·dt)/β)
//! Var(p)      = (σ²/β²)·(dt − 2(1−e^(−β·dt))/β + (1−e^(−2β·dt))/(2β))
//! Var(v)      = σ²·(1 − e^(−2β·dt))/(2β)
//! Cov(p, v)   = σ²·(1 − 2e^(−β·dt) + e^(−2β·dt))/(2β²)
//! ```
//!
//! The `E[p]` parenthesization is load-bearing: `/β` divides only the
//! exponential term. Fitted parameters are only comparable across tools
//! that agree on it; see DESIGN.md before changing it.
//!
//! ## Axis independence
//! The two coordinate axes evolve independently, so the 4x4 transition
//! covariance is block-diagonal with one 2x2 block per axis and the state
//! residual is laid out `[pos₀, vel₀, pos₁, vel₁]`.
//!
//! ## Limits
//! All variances vanish as `dt → 0`; the zero-gap covariance is singular
//! and must not be factorized. Callers skip the transition term entirely
//! for zero gaps.
use crate::track::core::params::StateTrajectory;
use ndarray::{Array1, Array2, ArrayView1};

/// Transition moments for one coordinate axis over one time gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OuTransition {
    /// Predicted position mean.
    pub mean_pos: f64,
    /// Predicted velocity mean.
    pub mean_vel: f64,
    /// Position variance.
    pub var_pos: f64,
    /// Velocity variance.
    pub var_vel: f64,
    /// Position/velocity covariance.
    pub cov_pos_vel: f64,
}

/// Propagate one axis of the latent state across a gap `dt`.
///
/// # Arguments
/// - `beta`: mean-reversion rate, > 0.
/// - `var_state`: process variance rate, >= 0.
/// - `gamma`: asymptotic velocity drift.
/// - `prev_pos`, `prev_vel`: latent state before the gap.
/// - `dt`: elapsed time, >= 0.
///
/// # Returns
/// The predicted mean and 2x2 covariance entries for `(position, velocity)`
/// after the gap. Pure function; no validation beyond what the formulas
/// themselves impose (callers guarantee `beta > 0`).
pub fn ou_transition(
    beta: f64, var_state: f64, gamma: f64, prev_pos: f64, prev_vel: f64, dt: f64,
) -> OuTransition {
    let decay = (-beta * dt).exp();
    let decay2 = (-2.0 * beta * dt).exp();

    let mean_vel = gamma + decay * (prev_vel - gamma);
    let mean_pos = prev_pos + prev_vel * (1.0 - decay / beta);

    let var_pos = var_state / beta.powi(2)
        * (dt - 2.0 * (1.0 - decay) / beta + (1.0 - decay2) / (2.0 * beta));
    let var_vel = var_state * (1.0 - decay2) / (2.0 * beta);
    let cov_pos_vel = var_state * (1.0 - 2.0 * decay + decay2) / (2.0 * beta.powi(2));

    OuTransition { mean_pos, mean_vel, var_pos, var_vel, cov_pos_vel }
}

/// Assemble the 4-dimensional transition residual and covariance for one
/// latent-state step.
///
/// Reads the previous latent state (column `state_num − 1`) and the current
/// one (column `state_num`) from the trajectory, propagates each axis with
/// [`ou_transition`], and returns:
/// - the residual `[pos₀ − E[p₀], vel₀ − E[v₀], pos₁ − E[p₁], vel₁ − E[v₁]]`,
/// - the block-diagonal 4x4 covariance (one 2x2 block per axis).
///
/// # Arguments
/// - `beta`, `var_state`, `gamma`: natural-scale per-axis parameters
///   (length 2 each).
/// - `states`: latent trajectory; `state_num` must be in `1..n_states`.
/// - `dt`: gap driving this step, > 0.
///
/// # Panics
/// - Indexing panics if `state_num` is 0 or out of range; the model layer
///   checks the state count against the data before evaluation.
pub fn transition_residual(
    beta: ArrayView1<f64>, var_state: ArrayView1<f64>, gamma: ArrayView1<f64>,
    states: &StateTrajectory, state_num: usize, dt: f64,
) -> (Array1<f64>, Array2<f64>) {
    let mut residual = Array1::<f64>::zeros(4);
    let mut cov = Array2::<f64>::zeros((4, 4));

    for axis in 0..2 {
        let trans = ou_transition(
            beta[axis],
            var_state[axis],
            gamma[axis],
            states.mu[[axis, state_num - 1]],
            states.vel[[axis, state_num - 1]],
            dt,
        );

        let block = 2 * axis;
        residual[block] = states.mu[[axis, state_num]] - trans.mean_pos;
        residual[block + 1] = states.vel[[axis, state_num]] - trans.mean_vel;

        cov[[block, block]] = trans.var_pos;
        cov[[block + 1, block + 1]] = trans.var_vel;
        cov[[block, block + 1]] = trans.cov_pos_vel;
        cov[[block + 1, block]] = trans.cov_pos_vel;
    }

    (residual, cov)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::core::factorization::SpdFactor;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The closed-form moments against hand-evaluated values.
    // - Covariance symmetry/positive-definiteness across parameter regimes.
    // - Vanishing variances in the short-gap limit and the small-β velocity
    //   limit.
    // - Residual layout and block-diagonal structure of the 4-d assembly.
    //
    // They intentionally DO NOT cover:
    // - Density evaluation on the transition covariance; see `density` and
    //   the integration tests.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-12;

    #[test]
    // Purpose
    // -------
    // The moments match direct evaluation of the closed forms at a
    // representative parameter point.
    //
    // Given
    // -----
    // - `β = 1, σ² = 1, γ = 0, (p₀, v₀) = (2, 3), dt = 1`.
    //
    // Expect
    // ------
    // - Each field equals its formula evaluated with `e⁻¹` and `e⁻²`.
    fn moments_match_closed_forms() {
        let decay = (-1.0_f64).exp();
        let decay2 = (-2.0_f64).exp();
        let trans = ou_transition(1.0, 1.0, 0.0, 2.0, 3.0, 1.0);

        assert!((trans.mean_vel - 3.0 * decay).abs() < TOL);
        assert!((trans.mean_pos - (2.0 + 3.0 * (1.0 - decay))).abs() < TOL);
        assert!(
            (trans.var_pos - (1.0 - 2.0 * (1.0 - decay) + (1.0 - decay2) / 2.0)).abs() < TOL
        );
        assert!((trans.var_vel - (1.0 - decay2) / 2.0).abs() < TOL);
        assert!((trans.cov_pos_vel - (1.0 - 2.0 * decay + decay2) / 2.0).abs() < TOL);
    }

    #[test]
    // Purpose
    // -------
    // The per-axis covariance is positive-definite (factorizable) across a
    // grid of rates, variances, and gaps.
    //
    // Given
    // -----
    // - `β ∈ {0.1, 1, 5}`, `σ² ∈ {0.5, 2}`, `dt ∈ {0.01, 1, 100}`.
    //
    // Expect
    // ------
    // - `SpdFactor::factorize` succeeds on every 2x2 block.
    fn covariance_is_positive_definite_on_grid() {
        for &beta in &[0.1, 1.0, 5.0] {
            for &var_state in &[0.5, 2.0] {
                for &dt in &[0.01, 1.0, 100.0] {
                    let trans = ou_transition(beta, var_state, 0.0, 0.0, 0.0, dt);
                    let cov = array![
                        [trans.var_pos, trans.cov_pos_vel],
                        [trans.cov_pos_vel, trans.var_vel]
                    ];
                    assert!(
                        SpdFactor::factorize(cov.view()).is_ok(),
                        "covariance not PD at beta={beta}, var={var_state}, dt={dt}"
                    );
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Variances vanish as the gap shrinks to zero.
    //
    // Given
    // -----
    // - `β = 1, σ² = 1, dt = 1e-8`.
    //
    // Expect
    // ------
    // - `var_pos`, `var_vel`, and `cov_pos_vel` are all below 1e-7.
    fn variances_vanish_in_short_gap_limit() {
        let trans = ou_transition(1.0, 1.0, 0.0, 0.0, 0.0, 1e-8);
        assert!(trans.var_pos.abs() < 1e-7);
        assert!(trans.var_vel.abs() < 1e-7);
        assert!(trans.cov_pos_vel.abs() < 1e-7);
    }

    #[test]
    // Purpose
    // -------
    // In the small-β limit the velocity mean approaches the undamped
    // constant-velocity value `v₀` (with `γ = 0`), since the exponential
    // decay disappears.
    //
    // Given
    // -----
    // - `β = 1e-8, γ = 0, v₀ = 3, dt = 1`.
    //
    // Expect
    // ------
    // - `mean_vel` within 1e-6 of `v₀`.
    fn velocity_mean_approaches_undamped_limit_for_small_beta() {
        let trans = ou_transition(1e-8, 1.0, 0.0, 2.0, 3.0, 1.0);
        assert!((trans.mean_vel - 3.0).abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // The 4-d assembly lays the residual out `[pos₀, vel₀, pos₁, vel₁]`
    // and places each axis's 2x2 block on the diagonal with zero
    // cross-axis entries.
    //
    // Given
    // -----
    // - A 2-state trajectory whose second state equals the per-axis
    //   predicted means exactly (zero residual) on axis 0 and is offset by
    //   `(0.5, −0.25)` on axis 1.
    //
    // Expect
    // ------
    // - Residual `[0, 0, 0.5, −0.25]`.
    // - `cov[[0, 2]] == cov[[1, 3]] == 0` and both diagonal blocks match
    //   `ou_transition` on their axis.
    fn assembly_layout_and_block_structure() {
        let beta = array![1.0, 2.0];
        let var_state = array![1.0, 0.5];
        let gamma = array![0.0, 0.1];
        let dt = 0.75;

        let prev_mu = [2.0, -1.0];
        let prev_vel = [3.0, 0.5];
        let trans0 = ou_transition(beta[0], var_state[0], gamma[0], prev_mu[0], prev_vel[0], dt);
        let trans1 = ou_transition(beta[1], var_state[1], gamma[1], prev_mu[1], prev_vel[1], dt);

        let states = StateTrajectory::new(
            array![[prev_mu[0], trans0.mean_pos], [prev_mu[1], trans1.mean_pos + 0.5]],
            array![[prev_vel[0], trans0.mean_vel], [prev_vel[1], trans1.mean_vel - 0.25]],
        )
        .unwrap();

        let (residual, cov) =
            transition_residual(beta.view(), var_state.view(), gamma.view(), &states, 1, dt);

        assert!(residual[0].abs() < TOL);
        assert!(residual[1].abs() < TOL);
        assert!((residual[2] - 0.5).abs() < TOL);
        assert!((residual[3] + 0.25).abs() < TOL);

        assert_eq!(cov[[0, 2]], 0.0);
        assert_eq!(cov[[0, 3]], 0.0);
        assert_eq!(cov[[1, 2]], 0.0);
        assert_eq!(cov[[1, 3]], 0.0);
        assert!((cov[[0, 0]] - trans0.var_pos).abs() < TOL);
        assert!((cov[[1, 1]] - trans0.var_vel).abs() < TOL);
        assert!((cov[[2, 2]] - trans1.var_pos).abs() < TOL);
        assert!((cov[[3, 3]] - trans1.var_vel).abs() < TOL);
        assert!((cov[[2, 3]] - trans1.cov_pos_vel).abs() < TOL);
    }
}
