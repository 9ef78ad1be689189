//! Descriptive statistics for inspecting the merged dataset.
//!
//! Nothing here feeds the estimator; the summaries are logged so a run can be
//! sanity-checked the way a `describe()` / correlation table would be.
use std::fmt;

use ndarray::{Array2, ArrayView1};
use statrs::statistics::Statistics;

use crate::data_handling::{FeatureSet, Table, COLUMN_NAMES};

/// Count, moments and quartiles of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    fn from_column(name: &str, column: ArrayView1<f64>) -> Self {
        let mut sorted = column.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        ColumnSummary {
            name: name.to_string(),
            count: sorted.len(),
            mean: column.iter().mean(),
            std: column.iter().std_dev(),
            min: Statistics::min(column.iter()),
            q25: quantile_sorted(&sorted, 0.25),
            q50: quantile_sorted(&sorted, 0.50),
            q75: quantile_sorted(&sorted, 0.75),
            max: Statistics::max(column.iter()),
        }
    }
}

impl fmt::Display for ColumnSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:<12} {:>6} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>9.4}",
            self.name,
            self.count,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.q50,
            self.q75,
            self.max
        )
    }
}

/// Quantile of sorted data by linear interpolation between closest ranks.
/// Empty input gives NaN.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Summaries of all five columns of `table`.
pub fn describe(table: &Table) -> Vec<ColumnSummary> {
    let m = table.to_matrix();
    COLUMN_NAMES
        .iter()
        .enumerate()
        .map(|(c, name)| ColumnSummary::from_column(name, m.column(c)))
        .collect()
}

/// Summaries of every column of a feature set.
pub fn describe_features(x: &FeatureSet) -> Vec<ColumnSummary> {
    x.columns
        .iter()
        .enumerate()
        .map(|(c, name)| ColumnSummary::from_column(name, x.values.column(c)))
        .collect()
}

/// Render summaries as a fixed-width text table.
pub fn format_summaries(summaries: &[ColumnSummary]) -> String {
    let mut out = format!(
        "{:<12} {:>6} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}\n",
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for s in summaries {
        out.push_str(&s.to_string());
        out.push('\n');
    }
    out
}

/// Pearson correlation between every pair of the five table columns.
///
/// Pairs involving a constant column come out as NaN.
pub fn correlation_matrix(table: &Table) -> Array2<f64> {
    let m = table.to_matrix();
    let k = m.ncols();
    let mut corr = Array2::<f64>::zeros((k, k));
    for i in 0..k {
        for j in i..k {
            let a = m.column(i);
            let b = m.column(j);
            let r = a.iter().covariance(b.iter()) / (a.iter().std_dev() * b.iter().std_dev());
            corr[(i, j)] = r;
            corr[(j, i)] = r;
        }
    }
    corr
}

/// Render a correlation matrix with the table's column names.
pub fn format_correlation(corr: &Array2<f64>) -> String {
    let mut out = format!("{:<12}", "");
    for name in COLUMN_NAMES.iter() {
        out.push_str(&format!(" {:>12}", name));
    }
    out.push('\n');
    for (i, row) in corr.rows().into_iter().enumerate() {
        out.push_str(&format!("{:<12}", COLUMN_NAMES.get(i).copied().unwrap_or("?")));
        for v in row.iter() {
            out.push_str(&format!(" {:>12.4}", v));
        }
        out.push('\n');
    }
    out
}
