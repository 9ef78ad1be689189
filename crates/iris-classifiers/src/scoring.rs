//! Binary classification scores against the positive class (label 1).
//!
//! Policy for zero denominators: precision with no predicted positives, recall
//! with no actual positives and accuracy over zero rows all fail with
//! `IrisError::UndefinedMetric` rather than being reported as 0.
use crate::error::{IrisError, Result};

/// Positive class label.
pub const POSITIVE_LABEL: i64 = 1;

/// Confusion counts for the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
}

impl ConfusionCounts {
    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryScores {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
}

/// Count agreement between row-aligned true and predicted labels.
pub fn confusion_counts(y_true: &[i64], y_pred: &[i64]) -> Result<ConfusionCounts> {
    if y_true.len() != y_pred.len() {
        return Err(IrisError::Format(format!(
            "{} true labels but {} predictions",
            y_true.len(),
            y_pred.len()
        )));
    }

    let mut counts = ConfusionCounts::default();
    for (i, (&t, &p)) in y_true.iter().zip(y_pred.iter()).enumerate() {
        if !is_binary(t) || !is_binary(p) {
            return Err(IrisError::Format(format!(
                "row {}: labels must be 0 or 1, got true={} predicted={}",
                i, t, p
            )));
        }
        match (t == POSITIVE_LABEL, p == POSITIVE_LABEL) {
            (true, true) => counts.true_positive += 1,
            (false, true) => counts.false_positive += 1,
            (false, false) => counts.true_negative += 1,
            (true, false) => counts.false_negative += 1,
        }
    }
    Ok(counts)
}

fn is_binary(label: i64) -> bool {
    label == 0 || label == 1
}

fn ratio(numerator: usize, denominator: usize, metric: &'static str) -> Result<f64> {
    if denominator == 0 {
        return Err(IrisError::UndefinedMetric { metric });
    }
    Ok(numerator as f64 / denominator as f64)
}

/// Accuracy, precision and recall of `y_pred` against `y_true`.
pub fn calculate_binary_class_scores(y_true: &[i64], y_pred: &[i64]) -> Result<BinaryScores> {
    let c = confusion_counts(y_true, y_pred)?;
    Ok(BinaryScores {
        accuracy: ratio(c.true_positive + c.true_negative, c.total(), "accuracy")?,
        precision: ratio(c.true_positive, c.true_positive + c.false_positive, "precision")?,
        recall: ratio(c.true_positive, c.true_positive + c.false_negative, "recall")?,
    })
}
