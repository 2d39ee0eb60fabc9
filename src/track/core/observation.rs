//! Per-quality-class observation covariances and density table.
//!
//! Each location fix carries a discrete quality class selecting its
//! observation error scale. This module maps the baseline log standard
//! deviations and the per-class log corrections onto diagonal 2x2
//! covariances, and builds one immutable [`ObsDensity`] per class so the
//! factorization work happens once per class per evaluation rather than
//! once per record.
//!
//! ## Variance mapping
//! For axis `a` and class `q`:
//!
//! ```text
//! var[a][0] = exp(2·log_sd_obs[a])                          (reference class)
//! var[a][q] = exp(2·(log_sd_obs[a] + log_correction[a][q−1]))   for q >= 1
//! ```
//!
//! The axes carry no cross-correlation, so each class's covariance is
//! diagonal.
use crate::track::core::density::ObsDensity;
use crate::track::core::params::{CtcrwOptions, CtcrwParams};
use crate::track::errors::{TrackError, TrackResult};
use ndarray::{array, Array2};

/// Observation variances per axis and quality class, 2 x n_classes.
///
/// Class 0 is the uncorrected reference; later columns apply that class's
/// log correction on top of the baseline.
pub fn observation_variances(params: &CtcrwParams) -> Array2<f64> {
    let n_classes = params.n_classes();
    let mut var = Array2::<f64>::zeros((2, n_classes));
    for axis in 0..2 {
        var[[axis, 0]] = (2.0 * params.log_sd_obs[axis]).exp();
        for class in 1..n_classes {
            var[[axis, class]] =
                (2.0 * (params.log_sd_obs[axis] + params.log_correction[[axis, class - 1]])).exp();
        }
    }
    var
}

/// Observation standard deviations per axis and class, for reporting.
pub fn observation_sds(params: &CtcrwParams) -> Array2<f64> {
    observation_variances(params).mapv(f64::sqrt)
}

/// Immutable per-quality-class density table.
///
/// Built once per evaluation from the parameter set and run options; each
/// entry owns the factorized diagonal covariance and the class's effective
/// degrees of freedom, tagged with the run-wide family switch.
#[derive(Debug, Clone)]
pub struct QualityTable {
    densities: Vec<ObsDensity>,
}

impl QualityTable {
    /// Build the density table: one [`ObsDensity`] per quality class.
    ///
    /// # Arguments
    /// - `params`: supplies the variance mapping and raw degrees of freedom.
    /// - `options`: supplies the family switch and the df floor applied as
    ///   `exp(raw) + min_df`.
    ///
    /// # Errors
    /// - [`TrackError::InvalidDegreesOfFreedom`] if a class's effective df
    ///   is not finite and > 0 (e.g. overflowed to infinity).
    /// - [`TrackError::CovarianceNotPositiveDefinite`] if a class variance
    ///   degenerates (e.g. underflowed to zero).
    pub fn build(params: &CtcrwParams, options: &CtcrwOptions) -> TrackResult<Self> {
        let var = observation_variances(params);
        let dfs = params.effective_dfs(options.min_df);
        let mut densities = Vec::with_capacity(params.n_classes());
        for class in 0..params.n_classes() {
            let sigma = array![[var[[0, class]], 0.0], [0.0, var[[1, class]]]];
            densities.push(ObsDensity::new(sigma.view(), dfs[class], options.obs_model)?);
        }
        Ok(QualityTable { densities })
    }

    /// Number of classes in the table.
    pub fn n_classes(&self) -> usize {
        self.densities.len()
    }

    /// Checked lookup of the density for `class`, on behalf of record
    /// `record`.
    ///
    /// # Errors
    /// - [`TrackError::QualityClassOutOfRange`] if `class` addresses no
    ///   table entry.
    pub fn density(&self, class: usize, record: usize) -> TrackResult<&ObsDensity> {
        self.densities.get(class).ok_or(TrackError::QualityClassOutOfRange {
            index: record,
            class,
            n_classes: self.densities.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::core::density::ObsModelKind;
    use ndarray::{array, Array1};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The variance mapping (reference class uncorrected, later classes
    //   corrected) and its square-root reporting companion.
    // - Table construction, per-class degrees of freedom, and checked
    //   lookup.
    //
    // They intentionally DO NOT cover:
    // - Density values; see `density` and the integration tests.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-12;

    fn make_params() -> CtcrwParams {
        CtcrwParams::new(
            array![0.0, 0.0],
            array![0.0, 0.0],
            array![-1.0, -2.0],
            array![[0.3], [0.6]],
            array![0.0, 0.0],
            array![0.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // The variance mapping leaves class 0 at the baseline and applies the
    // per-axis correction to class 1; `observation_sds` is its square root.
    //
    // Given
    // -----
    // - `log_sd_obs = (−1, −2)` and a single correction column `(0.3, 0.6)`.
    //
    // Expect
    // ------
    // - `var[a][0] == exp(2·log_sd_obs[a])`,
    //   `var[a][1] == exp(2·(log_sd_obs[a] + corr[a]))`,
    //   and `sd == sqrt(var)` elementwise.
    fn variance_mapping_and_sds() {
        let params = make_params();
        let var = observation_variances(&params);

        assert!((var[[0, 0]] - (-2.0_f64).exp()).abs() < TOL);
        assert!((var[[1, 0]] - (-4.0_f64).exp()).abs() < TOL);
        assert!((var[[0, 1]] - (2.0_f64 * (-1.0 + 0.3)).exp()).abs() < TOL);
        assert!((var[[1, 1]] - (2.0_f64 * (-2.0 + 0.6)).exp()).abs() < TOL);

        let sd = observation_sds(&params);
        for (s, v) in sd.iter().zip(var.iter()) {
            assert!((s - v.sqrt()).abs() < TOL);
        }
    }

    #[test]
    // Purpose
    // -------
    // The table holds one density per class, each carrying that class's
    // floored degrees of freedom and the run-wide family tag.
    //
    // Given
    // -----
    // - Two classes with raw df `(0, 1)` and floor 2.0, Student-t family.
    //
    // Expect
    // ------
    // - `n_classes == 2`; dfs are `e⁰ + 2` and `e¹ + 2`; both entries are
    //   Student-t.
    fn table_builds_one_density_per_class() {
        let params = make_params();
        let options = CtcrwOptions::new(ObsModelKind::StudentT, 2.0, 10.0).unwrap();
        let table = QualityTable::build(&params, &options).unwrap();

        assert_eq!(table.n_classes(), 2);
        assert!((table.density(0, 0).unwrap().df() - (1.0 + 2.0)).abs() < TOL);
        assert!((table.density(1, 0).unwrap().df() - (1.0_f64.exp() + 2.0)).abs() < TOL);
        assert_eq!(table.density(0, 0).unwrap().kind(), ObsModelKind::StudentT);
    }

    #[test]
    // Purpose
    // -------
    // A class index beyond the table reports the record and table size.
    //
    // Given
    // -----
    // - A 2-class table queried with class 5 for record 7.
    //
    // Expect
    // ------
    // - `TrackError::QualityClassOutOfRange { index: 7, class: 5,
    //   n_classes: 2 }`.
    fn lookup_out_of_range_is_fatal() {
        let params = make_params();
        let options = CtcrwOptions::new(ObsModelKind::Gaussian, 0.0, 10.0).unwrap();
        let table = QualityTable::build(&params, &options).unwrap();

        assert_eq!(
            table.density(5, 7).unwrap_err(),
            TrackError::QualityClassOutOfRange { index: 7, class: 5, n_classes: 2 }
        );
    }

    #[test]
    // Purpose
    // -------
    // A single-class parameter set builds a one-entry table whose class 0
    // uses the uncorrected baseline.
    //
    // Given
    // -----
    // - A params set with no correction columns.
    //
    // Expect
    // ------
    // - `n_classes == 1` and lookup of class 0 succeeds.
    fn single_class_table() {
        let params = CtcrwParams::new(
            array![0.0, 0.0],
            array![0.0, 0.0],
            array![0.0, 0.0],
            ndarray::Array2::zeros((2, 0)),
            array![0.0, 0.0],
            Array1::zeros(1),
        )
        .unwrap();
        let options = CtcrwOptions::new(ObsModelKind::Gaussian, 1.0, 1.0).unwrap();
        let table = QualityTable::build(&params, &options).unwrap();

        assert_eq!(table.n_classes(), 1);
        assert!(table.density(0, 0).is_ok());
    }
}
