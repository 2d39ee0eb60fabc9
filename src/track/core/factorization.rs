//! Symmetric positive-definite factorization with log-determinant and
//! quadratic form.
//!
//! Purpose
//! -------
//! Wrap a Cholesky decomposition of an SPD covariance so downstream density
//! code can evaluate `log det Σ` and the quadratic form `xᵀ Σ⁻¹ x` without
//! ever forming an explicit inverse. This module bridges between the
//! `ndarray` containers used throughout the crate and `nalgebra`'s dense
//! decompositions.
//!
//! Key behaviors
//! -------------
//! - [`SpdFactor::factorize`] copies the covariance into a
//!   `nalgebra::DMatrix` and runs a Cholesky decomposition. A failed
//!   decomposition (non-positive-definite input) is a fatal, typed error —
//!   it signals an invalid upstream parameter, and returning a finite value
//!   would mislead the caller.
//! - [`SpdFactor::log_det`] reads `2·Σ ln L_ii` off the triangular factor.
//! - [`SpdFactor::quad_form`] evaluates `xᵀ Σ⁻¹ x` through triangular
//!   solves against the stored factor.
//!
//! Invariants & assumptions
//! ------------------------
//! - The input matrix is square and symmetric; only its lower triangle is
//!   consumed by the decomposition. Symmetry is the caller's contract.
//! - A successfully constructed factor is positive-definite, so `log_det`
//!   and `quad_form` are well-defined (quadratic forms are >= 0).
//!
//! Conventions
//! -----------
//! - Errors are reported via [`TrackResult`]; this module never panics on
//!   bad numerical input.
//! - Factors are cheap value objects built fresh per covariance; no caching.
use crate::track::errors::{TrackError, TrackResult};
use nalgebra::{Cholesky, DMatrix, DVector, Dyn};
use ndarray::{ArrayView1, ArrayView2};

/// Cholesky factorization of a symmetric positive-definite covariance.
///
/// Holds the decomposition of one covariance matrix and answers
/// log-determinant and quadratic-form queries against it. Construct via
/// [`SpdFactor::factorize`].
#[derive(Debug, Clone)]
pub struct SpdFactor {
    chol: Cholesky<f64, Dyn>,
    dim: usize,
}

impl SpdFactor {
    /// Factorize a symmetric positive-definite covariance.
    ///
    /// Parameters
    /// ----------
    /// - `sigma`: square covariance matrix. Symmetry is assumed; the
    ///   decomposition reads the lower triangle.
    ///
    /// Returns
    /// -------
    /// `TrackResult<SpdFactor>`
    ///   - `Ok(SpdFactor)` when the Cholesky decomposition succeeds.
    ///   - `Err(TrackError::CovarianceNotPositiveDefinite)` when a pivot is
    ///     non-positive, i.e. the matrix is not positive-definite.
    ///
    /// Errors
    /// ------
    /// - [`TrackError::DimensionMismatch`] if `sigma` is not square.
    /// - [`TrackError::CovarianceNotPositiveDefinite`] on decomposition
    ///   failure. This is fatal by contract: a non-PD covariance means an
    ///   invalid parameter vector upstream.
    pub fn factorize(sigma: ArrayView2<f64>) -> TrackResult<Self> {
        let (rows, cols) = sigma.dim();
        if rows != cols {
            return Err(TrackError::DimensionMismatch { expected: rows, actual: cols });
        }
        let dense = fill_dmatrix(sigma);
        let chol = Cholesky::new(dense)
            .ok_or(TrackError::CovarianceNotPositiveDefinite { dim: rows })?;
        Ok(SpdFactor { chol, dim: rows })
    }

    /// Dimension of the factorized covariance.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Log-determinant of the factorized covariance.
    ///
    /// Computed as `2·Σ ln L_ii` from the triangular factor, which stays
    /// finite and accurate where a determinant expansion would under- or
    /// overflow.
    pub fn log_det(&self) -> f64 {
        2.0 * self.chol.l_dirty().diagonal().iter().map(|d| d.ln()).sum::<f64>()
    }

    /// Quadratic form `xᵀ Σ⁻¹ x` against the factorized covariance.
    ///
    /// Parameters
    /// ----------
    /// - `x`: vector of the factor's dimension.
    ///
    /// Returns
    /// -------
    /// `TrackResult<f64>`
    ///   The Mahalanobis-squared value, computed via triangular solves
    ///   (no explicit inverse).
    ///
    /// Errors
    /// ------
    /// - [`TrackError::DimensionMismatch`] if `x.len() != self.dim()`.
    pub fn quad_form(&self, x: ArrayView1<f64>) -> TrackResult<f64> {
        if x.len() != self.dim {
            return Err(TrackError::DimensionMismatch { expected: self.dim, actual: x.len() });
        }
        let b = DVector::from_iterator(self.dim, x.iter().copied());
        let solved = self.chol.solve(&b);
        Ok(b.dot(&solved))
    }
}

/// Copy an `ndarray` covariance into a `nalgebra::DMatrix`.
///
/// Bridge between the crate's container type and the decomposition backend;
/// a plain element-wise copy with no transformation.
fn fill_dmatrix(sigma: ArrayView2<f64>) -> DMatrix<f64> {
    let n = sigma.nrows();
    DMatrix::from_fn(n, n, |i, j| sigma[[i, j]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Log-determinant and quadratic-form correctness on matrices with
    //   hand-computable inverses.
    // - Rejection of non-positive-definite and non-square inputs.
    // - Dimension checking on quadratic-form queries.
    //
    // They intentionally DO NOT cover:
    // - Density formulas built on top of the factor; see `density`.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-12;

    #[test]
    // Purpose
    // -------
    // On a diagonal covariance the log-determinant is the sum of the log
    // diagonal and the quadratic form is a weighted sum of squares.
    //
    // Given
    // -----
    // - `Σ = diag(4, 9)` and `x = (2, 3)`.
    //
    // Expect
    // ------
    // - `log_det == ln 4 + ln 9` and `quad_form == 4/4 + 9/9 == 2`.
    fn diagonal_matrix_log_det_and_quad_form() {
        let sigma = array![[4.0, 0.0], [0.0, 9.0]];
        let factor = SpdFactor::factorize(sigma.view()).unwrap();

        assert!((factor.log_det() - (4.0_f64.ln() + 9.0_f64.ln())).abs() < TOL);

        let x = array![2.0, 3.0];
        assert!((factor.quad_form(x.view()).unwrap() - 2.0).abs() < TOL);
        assert_eq!(factor.dim(), 2);
    }

    #[test]
    // Purpose
    // -------
    // A dense SPD matrix reproduces the quadratic form computed from its
    // explicit inverse.
    //
    // Given
    // -----
    // - `Σ = [[2, 1], [1, 2]]` with `Σ⁻¹ = [[2/3, -1/3], [-1/3, 2/3]]` and
    //   `x = (1, 1)`.
    //
    // Expect
    // ------
    // - `quad_form == 2/3` and `log_det == ln 3`.
    fn dense_matrix_matches_explicit_inverse() {
        let sigma = array![[2.0, 1.0], [1.0, 2.0]];
        let factor = SpdFactor::factorize(sigma.view()).unwrap();

        let x = array![1.0, 1.0];
        assert!((factor.quad_form(x.view()).unwrap() - 2.0 / 3.0).abs() < TOL);
        assert!((factor.log_det() - 3.0_f64.ln()).abs() < TOL);
    }

    #[test]
    // Purpose
    // -------
    // A symmetric but indefinite matrix is rejected with the fatal
    // non-positive-definite error.
    //
    // Given
    // -----
    // - `Σ = [[1, 2], [2, 1]]` (determinant −3).
    //
    // Expect
    // ------
    // - `Err(TrackError::CovarianceNotPositiveDefinite { dim: 2 })`.
    fn indefinite_matrix_is_rejected() {
        let sigma = array![[1.0, 2.0], [2.0, 1.0]];
        assert_eq!(
            SpdFactor::factorize(sigma.view()).unwrap_err(),
            TrackError::CovarianceNotPositiveDefinite { dim: 2 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Non-square inputs and mismatched query vectors are rejected with
    // dimension errors.
    //
    // Given
    // -----
    // - A 2x3 input matrix; a valid 2x2 factor queried with a 3-vector.
    //
    // Expect
    // ------
    // - `DimensionMismatch` in both cases.
    fn dimension_mismatches_are_rejected() {
        let rect = ndarray::Array2::<f64>::zeros((2, 3));
        assert_eq!(
            SpdFactor::factorize(rect.view()).unwrap_err(),
            TrackError::DimensionMismatch { expected: 2, actual: 3 }
        );

        let sigma = array![[1.0, 0.0], [0.0, 1.0]];
        let factor = SpdFactor::factorize(sigma.view()).unwrap();
        let x = array![1.0, 2.0, 3.0];
        assert_eq!(
            factor.quad_form(x.view()).unwrap_err(),
            TrackError::DimensionMismatch { expected: 2, actual: 3 }
        );
    }
}
