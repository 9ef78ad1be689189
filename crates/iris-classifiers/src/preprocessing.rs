//! Z-score normalization of feature columns.
//!
//! Statistics are fitted per `FeatureSet`: the training and test subsets are
//! each standardized with their own column means and sample standard
//! deviations, never with shared ones. A column whose standard deviation is
//! zero (or undefined because the set has fewer than two rows) is rejected
//! with `IrisError::DegenerateColumn` instead of producing NaN or infinity.

use ndarray::Array1;
use statrs::statistics::Statistics;

use crate::data_handling::FeatureSet;
use crate::error::{IrisError, Result};

/// Per-column mean and sample standard deviation of one `FeatureSet`.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizationStats {
    pub columns: Vec<String>,
    pub mean: Array1<f64>,
    pub std: Array1<f64>,
}

impl NormalizationStats {
    /// Relative tolerance under which a standard deviation counts as zero.
    const ZERO_STD_TOL: f64 = 1e-12;

    fn check_columns(&self, x: &FeatureSet) -> Result<()> {
        if self.columns != x.columns {
            return Err(IrisError::Format(format!(
                "normalization stats fitted on {:?}, applied to {:?}",
                self.columns, x.columns
            )));
        }
        Ok(())
    }
}

/// Fit column statistics, failing on zero-variance columns.
pub fn fit_stats(x: &FeatureSet) -> Result<NormalizationStats> {
    let ncols = x.ncols();
    let mut mean = Array1::<f64>::zeros(ncols);
    let mut std = Array1::<f64>::zeros(ncols);

    for (c, name) in x.columns.iter().enumerate() {
        let column = x.values.column(c);
        let m = column.iter().mean();
        let s = column.iter().std_dev();

        if !s.is_finite() || s <= NormalizationStats::ZERO_STD_TOL * m.abs().max(1.0) {
            return Err(IrisError::DegenerateColumn {
                column: name.clone(),
            });
        }

        mean[c] = m;
        std[c] = s;
    }

    Ok(NormalizationStats {
        columns: x.columns.clone(),
        mean,
        std,
    })
}

/// Apply `v -> (v - mean) / std` column-wise.
pub fn transform(x: &FeatureSet, stats: &NormalizationStats) -> Result<FeatureSet> {
    stats.check_columns(x)?;
    let values = (&x.values - &stats.mean) / &stats.std;
    Ok(FeatureSet {
        columns: x.columns.clone(),
        values,
    })
}

/// Invert `transform`: `v -> v * std + mean`.
pub fn denormalize(x: &FeatureSet, stats: &NormalizationStats) -> Result<FeatureSet> {
    stats.check_columns(x)?;
    let values = &x.values * &stats.std + &stats.mean;
    Ok(FeatureSet {
        columns: x.columns.clone(),
        values,
    })
}

/// Fit statistics on `x` and standardize it with them.
pub fn normalize(x: &FeatureSet) -> Result<(FeatureSet, NormalizationStats)> {
    let stats = fit_stats(x)?;
    log::debug!(
        "Normalization stats over {} rows: mean={:?} std={:?}",
        x.nrows(),
        stats.mean.to_vec(),
        stats.std.to_vec()
    );
    let normed = transform(x, &stats)?;
    Ok((normed, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn features(values: Array2<f64>) -> FeatureSet {
        let columns = (0..values.ncols()).map(|c| format!("f{}", c)).collect();
        FeatureSet::new(columns, values).unwrap()
    }

    #[test]
    fn test_fit_stats_uses_sample_std() {
        let x = features(array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]]);
        let stats = fit_stats(&x).unwrap();
        assert!((stats.mean[0] - 2.5).abs() < 1e-12);
        assert!((stats.mean[1] - 25.0).abs() < 1e-12);
        // sample variance of 1..4 is 5/3
        assert!((stats.std[0] - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_is_degenerate() {
        let x = features(array![[1.0, 5.0], [2.0, 5.0], [3.0, 5.0]]);
        match normalize(&x) {
            Err(IrisError::DegenerateColumn { column }) => assert_eq!(column, "f1"),
            other => panic!("expected DegenerateColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_single_row_is_degenerate() {
        let x = features(array![[1.0, 2.0]]);
        assert!(matches!(
            fit_stats(&x),
            Err(IrisError::DegenerateColumn { .. })
        ));
    }

    #[test]
    fn test_transform_rejects_other_columns() {
        let x = features(array![[1.0, 2.0], [3.0, 5.0]]);
        let stats = fit_stats(&x).unwrap();
        let other = FeatureSet::new(
            vec!["a".to_string(), "b".to_string()],
            array![[1.0, 2.0], [3.0, 5.0]],
        )
        .unwrap();
        assert!(matches!(transform(&other, &stats), Err(IrisError::Format(_))));
    }
}
