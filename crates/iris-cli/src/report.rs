use std::fmt::Write;

use iris_classifiers::scoring::BinaryScores;

use crate::pipeline::{PipelineReport, SubsetShape};

/// Percentage rounded to two decimals.
fn pct(v: f64) -> f64 {
    (v * 10_000.0).round() / 100.0
}

fn write_shape(out: &mut String, shape: &SubsetShape, name: &str) {
    let _ = writeln!(out, "No. of rows in {} Features: {}", name, shape.feature_rows);
    let _ = writeln!(out, "No. of columns in {} Features: {}", name, shape.feature_cols);
    let _ = writeln!(out, "No. of rows in {} Label: {}", name, shape.label_rows);
    let _ = writeln!(out, "No. of columns in {} Label: {}", name, shape.label_cols);
}

fn write_scores(out: &mut String, scores: &BinaryScores, name: &str) {
    let _ = writeln!(out, "{} Data Accuracy (%) = {}", name, pct(scores.accuracy));
    let _ = writeln!(out, "{} Data Precision (%) = {}", name, pct(scores.precision));
    let _ = writeln!(out, "{} Data Recall (%) = {}", name, pct(scores.recall));
}

/// Render the stdout report for a finished run.
pub fn render_report(report: &PipelineReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Model: {}", report.model);
    write_shape(&mut out, &report.train_shape, "Training");
    write_shape(&mut out, &report.test_shape, "Test");
    write_scores(&mut out, &report.train_scores, "Training");
    let _ = writeln!(out, "{}", "-".repeat(50));
    write_scores(&mut out, &report.test_scores, "Test");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_rounds_to_two_decimals() {
        assert_eq!(pct(2.0 / 3.0), 66.67);
        assert_eq!(pct(0.75), 75.0);
        assert_eq!(pct(1.0), 100.0);
    }

    #[test]
    fn test_render_report_layout() {
        let shape = |rows| SubsetShape {
            feature_rows: rows,
            feature_cols: 4,
            label_rows: rows,
            label_cols: 1,
        };
        let report = PipelineReport {
            model: "logistic".to_string(),
            train_shape: shape(80),
            test_shape: shape(20),
            train_scores: BinaryScores {
                accuracy: 0.9625,
                precision: 0.95,
                recall: 0.975,
            },
            test_scores: BinaryScores {
                accuracy: 0.75,
                precision: 2.0 / 3.0,
                recall: 1.0,
            },
        };
        let text = render_report(&report);
        assert!(text.starts_with("Model: logistic\n"), "{}", text);
        assert!(text.contains("No. of rows in Training Features: 80"));
        assert!(text.contains("No. of columns in Test Features: 4"));
        assert!(text.contains("Training Data Accuracy (%) = 96.25"));
        assert!(text.contains("Test Data Precision (%) = 66.67"));
        assert!(text.contains("Test Data Recall (%) = 100"));
        assert!(text.contains(&"-".repeat(50)));
    }
}
