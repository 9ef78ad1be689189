use crate::batching::BatchFeed;
use crate::error::Result;

/// A trainable binary classifier fed through a `BatchFeed`.
///
/// Pipeline code only talks to this trait, so the estimator behind it can be
/// swapped without touching the stages around it. Labels follow the crate
/// convention of 1 for the positive class and 0 for the negative class.
pub trait ClassifierModel {
    /// Fit the model on every batch the feed yields.
    fn fit(&mut self, feed: &BatchFeed) -> Result<()>;

    /// Positive-class probability per row, in input row order.
    fn predict_proba(&self, feed: &BatchFeed) -> Result<Vec<f64>>;

    /// Predicted class label per row, in input row order.
    fn predict(&self, feed: &BatchFeed) -> Result<Vec<i64>>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
