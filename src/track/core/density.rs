//! Zero-mean multivariate Gaussian and Student-t negative log densities.
//!
//! Both densities evaluate through a shared [`SpdFactor`], so the
//! log-determinant and quadratic form of a covariance are computed once per
//! factorization regardless of which family consumes them.
//!
//! ## Supported families
//! - [`neg_log_mvn`]: multivariate normal with arbitrary SPD covariance,
//!   used directly for the transition density and as the light-tailed arm
//!   of the observation density.
//! - [`ObsDensity`]: multivariate Student-t (Lange, Little & Taylor 1989)
//!   over the same factorization, with a construction-time switch
//!   ([`ObsModelKind`]) that swaps in the Gaussian evaluation instead —
//!   the two families are siblings over one factorization, selected per
//!   run to compare heavy- against light-tailed observation error.
//!
//! ## Numerics
//! - Normalizing constants use `statrs`' log-gamma.
//! - Quadratic forms and log-determinants come from the Cholesky factor; no
//!   explicit inverses or determinant expansions.
use crate::track::core::factorization::SpdFactor;
use crate::track::errors::{TrackError, TrackResult};
use ndarray::{ArrayView1, ArrayView2};
use statrs::function::gamma::ln_gamma;
use std::f64::consts::PI;

/// Observation density family, chosen once per evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObsModelKind {
    /// Heavy-tailed multivariate Student-t observation error.
    StudentT,
    /// Multivariate normal observation error.
    Gaussian,
}

/// Negative log density of a zero-mean multivariate normal variable.
///
/// Evaluates `0.5·log det Σ + 0.5·xᵀΣ⁻¹x + 0.5·k·ln(2π)` for `k = x.len()`
/// against an already-factorized covariance. Pure function of its inputs.
///
/// # Errors
/// - [`TrackError::DimensionMismatch`] if `x` does not match the factor's
///   dimension.
pub fn neg_log_mvn(factor: &SpdFactor, x: ArrayView1<f64>) -> TrackResult<f64> {
    let k = x.len() as f64;
    Ok(0.5 * factor.log_det() + 0.5 * factor.quad_form(x)? + k * 0.5 * (2.0 * PI).ln())
}

/// Observation density over a factorized scale matrix: Student-t with a
/// Gaussian fallback arm.
///
/// Built once per quality class and reused for every record of that class.
/// The degrees of freedom apply only to the Student-t arm; the Gaussian arm
/// reads the identical factorization.
#[derive(Debug, Clone)]
pub struct ObsDensity {
    factor: SpdFactor,
    df: f64,
    kind: ObsModelKind,
}

impl ObsDensity {
    /// Build an observation density from a scale matrix, degrees of
    /// freedom, and family tag.
    ///
    /// # Arguments
    /// - `sigma`: SPD scale matrix (factorized here, once).
    /// - `df`: degrees of freedom, finite and > 0. Callers reparameterize
    ///   to guarantee this (e.g. `exp(raw) + floor`); this constructor only
    ///   enforces the domain.
    /// - `kind`: which family `neg_log_density` evaluates.
    ///
    /// # Errors
    /// - [`TrackError::InvalidDegreesOfFreedom`] if `df` is not finite and
    ///   strictly positive.
    /// - [`TrackError::CovarianceNotPositiveDefinite`] if `sigma` cannot be
    ///   factorized.
    pub fn new(sigma: ArrayView2<f64>, df: f64, kind: ObsModelKind) -> TrackResult<Self> {
        if !df.is_finite() || df <= 0.0 {
            return Err(TrackError::InvalidDegreesOfFreedom { value: df });
        }
        Ok(ObsDensity { factor: SpdFactor::factorize(sigma)?, df, kind })
    }

    /// Family tag this density evaluates.
    pub fn kind(&self) -> ObsModelKind {
        self.kind
    }

    /// Degrees of freedom carried for the Student-t arm.
    pub fn df(&self) -> f64 {
        self.df
    }

    /// Evaluate the negative log density at `x`.
    ///
    /// For the Student-t arm (Lange et al. 1989, negative-log convention):
    ///
    /// ```text
    /// lgamma(ν/2) − lgamma((ν+k)/2) + (k/2)·ln ν + k·lgamma(1/2)
    ///   + 0.5·log det Σ + ((ν+k)/2)·ln(1 + xᵀΣ⁻¹x / ν)
    /// ```
    ///
    /// For the Gaussian arm, delegates to [`neg_log_mvn`] on the same
    /// factorization.
    ///
    /// # Errors
    /// - [`TrackError::DimensionMismatch`] if `x` does not match the scale
    ///   matrix dimension.
    pub fn neg_log_density(&self, x: ArrayView1<f64>) -> TrackResult<f64> {
        match self.kind {
            ObsModelKind::Gaussian => neg_log_mvn(&self.factor, x),
            ObsModelKind::StudentT => {
                let k = x.len() as f64;
                let df = self.df;
                let quad = self.factor.quad_form(x)?;
                Ok(ln_gamma(0.5 * df) - ln_gamma(0.5 * (df + k))
                    + 0.5 * k * df.ln()
                    + k * ln_gamma(0.5)
                    + 0.5 * self.factor.log_det()
                    + 0.5 * (df + k) * (1.0 + quad / df).ln())
            }
        }
    }
}
