use ndarray::{Array1, Array2};

use crate::batching::{Batch, BatchFeed};
use crate::config::{ModelConfig, ModelType};
use crate::error::{IrisError, Result};
use crate::models::classifier_trait::ClassifierModel;

/// Linear logistic classifier trained by mini-batch gradient descent.
///
/// Keeps one weight per named numeric feature column and a bias term. Each
/// batch takes a single step along the gradient of the mean log-loss, plus an
/// optional L2 penalty on the weights.
pub struct LogisticRegression {
    feature_columns: Vec<String>,
    weights: Option<Array1<f64>>,
    bias: f64,
    params: ModelConfig,
}

impl LogisticRegression {
    pub fn new(params: ModelConfig, feature_columns: Vec<String>) -> Self {
        LogisticRegression {
            feature_columns,
            weights: None,
            bias: 0.0,
            params,
        }
    }

    pub fn weights(&self) -> Option<&Array1<f64>> {
        self.weights.as_ref()
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    fn hyper_params(&self) -> (f64, f64) {
        match self.params.model_type {
            ModelType::Logistic {
                l2_penalty,
                decision_threshold,
            } => (l2_penalty, decision_threshold),
        }
    }

    /// Stack the batch's columns into a `(rows, features)` matrix.
    fn batch_matrix(&self, batch: &Batch) -> Result<Array2<f64>> {
        let n = batch.len();
        let mut x = Array2::<f64>::zeros((n, self.feature_columns.len()));
        for (c, name) in self.feature_columns.iter().enumerate() {
            let column = batch.features.get(name).ok_or_else(|| {
                IrisError::Format(format!("batch is missing feature column '{}'", name))
            })?;
            if column.len() != n {
                return Err(IrisError::Format(format!(
                    "feature column '{}' has {} values for {} labels",
                    name,
                    column.len(),
                    n
                )));
            }
            for (r, &v) in column.iter().enumerate() {
                x[(r, c)] = v;
            }
        }
        Ok(x)
    }

    fn batch_targets(batch: &Batch) -> Result<Array1<f64>> {
        batch
            .labels
            .iter()
            .map(|&l| match l {
                0 => Ok(0.0),
                1 => Ok(1.0),
                other => Err(IrisError::Format(format!(
                    "label {} is not binary (expected 0 or 1)",
                    other
                ))),
            })
            .collect()
    }

}

fn linear(x: &Array2<f64>, w: &Array1<f64>, bias: f64) -> Array1<f64> {
    x.dot(w) + bias
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn log_loss(p: &Array1<f64>, y: &Array1<f64>) -> f64 {
    const EPS: f64 = 1e-15;
    p.iter()
        .zip(y.iter())
        .map(|(&p, &y)| {
            let p = p.clamp(EPS, 1.0 - EPS);
            -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        })
        .sum()
}

impl ClassifierModel for LogisticRegression {
    fn fit(&mut self, feed: &BatchFeed) -> Result<()> {
        let (l2_penalty, _) = self.hyper_params();
        let lr = self.params.learning_rate;

        // parameters are only stored once every batch has been consumed
        let mut w = Array1::<f64>::zeros(self.feature_columns.len());
        let mut bias = 0.0;

        let mut batches = feed.batches();
        let mut epoch = 0;
        let mut epoch_loss = 0.0;
        let mut epoch_rows = 0usize;

        while let Some(batch) = batches.next() {
            let x = self.batch_matrix(&batch)?;
            let y = Self::batch_targets(&batch)?;
            let n = y.len() as f64;

            let p = linear(&x, &w, bias).mapv(sigmoid);
            epoch_loss += log_loss(&p, &y);
            epoch_rows += y.len();

            let residual = &p - &y;
            let grad_w = x.t().dot(&residual) / n + &w * l2_penalty;
            let grad_b = residual.sum() / n;

            w.scaled_add(-lr, &grad_w);
            bias -= lr * grad_b;

            // the iterator advances its epoch counter after the last batch
            if batches.epoch() != epoch {
                log::debug!(
                    "[{}] epoch {}/{}: mean log-loss {:.5}",
                    self.name(),
                    epoch + 1,
                    feed.epochs(),
                    epoch_loss / epoch_rows.max(1) as f64
                );
                epoch = batches.epoch();
                epoch_loss = 0.0;
                epoch_rows = 0;
            }
        }

        log::debug!("[{}] weights={:?} bias={:.5}", self.name(), w.to_vec(), bias);
        self.weights = Some(w);
        self.bias = bias;
        Ok(())
    }

    fn predict_proba(&self, feed: &BatchFeed) -> Result<Vec<f64>> {
        let w = self.weights.as_ref().ok_or(IrisError::ModelNotTrained)?;
        if feed.shuffles() {
            return Err(IrisError::InvalidParameter(
                "prediction feed must not shuffle rows".to_string(),
            ));
        }

        // one pass yields every row exactly once; later epochs only repeat it
        let mut proba = Vec::with_capacity(feed.nrows());
        for batch in feed.batches().take(feed.batches_per_epoch()) {
            let x = self.batch_matrix(&batch)?;
            proba.extend(linear(&x, w, self.bias).mapv(sigmoid));
        }
        Ok(proba)
    }

    fn predict(&self, feed: &BatchFeed) -> Result<Vec<i64>> {
        let (_, threshold) = self.hyper_params();
        let proba = self.predict_proba(feed)?;
        Ok(proba
            .into_iter()
            .map(|p| if p >= threshold { 1 } else { 0 })
            .collect())
    }

    fn name(&self) -> &str {
        "logistic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_handling::{FeatureSet, LabelSet};

    /// Two columns; label is 1 exactly when the first column is positive.
    fn separable(n: usize) -> (FeatureSet, LabelSet) {
        let mut data = Vec::with_capacity(2 * n);
        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let v = (i as f64 - n as f64 / 2.0 + 0.5) / n as f64 * 4.0;
            data.push(v);
            data.push(((i * 7) % 5) as f64 / 5.0 - 0.4);
            labels.push(if v > 0.0 { 1 } else { 0 });
        }
        let x = FeatureSet::new(
            vec!["signal".to_string(), "noise".to_string()],
            Array2::from_shape_vec((n, 2), data).unwrap(),
        )
        .unwrap();
        (x, LabelSet::new(labels))
    }

    #[test]
    fn test_learns_separable_data() {
        let (x, y) = separable(60);
        let mut model = LogisticRegression::new(ModelConfig::default(), x.columns.clone());

        let train = BatchFeed::new(&x, &y, 50, true, 16).unwrap().with_seed(1);
        model.fit(&train).unwrap();

        let eval = BatchFeed::new(&x, &y, 1, false, 16).unwrap();
        let pred = model.predict(&eval).unwrap();
        assert_eq!(pred.len(), 60);
        let correct = pred
            .iter()
            .zip(y.values.iter())
            .filter(|(p, t)| p == t)
            .count();
        assert!(correct >= 57, "only {} of 60 correct", correct);

        let w = model.weights().unwrap();
        assert!(w[0] > 0.0, "signal weight should be positive: {:?}", w);
    }

    #[test]
    fn test_repeated_eval_epochs_keep_one_prediction_per_row() {
        let (x, y) = separable(10);
        let mut model = LogisticRegression::new(ModelConfig::default(), x.columns.clone());
        model
            .fit(&BatchFeed::new(&x, &y, 2, false, 4).unwrap())
            .unwrap();
        let eval = BatchFeed::new(&x, &y, 4, false, 4).unwrap();
        assert_eq!(model.predict_proba(&eval).unwrap().len(), 10);
    }

    #[test]
    fn test_predict_before_fit() {
        let (x, y) = separable(4);
        let model = LogisticRegression::new(ModelConfig::default(), x.columns.clone());
        let feed = BatchFeed::new(&x, &y, 1, false, 4).unwrap();
        assert!(matches!(model.predict(&feed), Err(IrisError::ModelNotTrained)));
    }

    #[test]
    fn test_shuffled_prediction_feed_is_rejected() {
        let (x, y) = separable(8);
        let mut model = LogisticRegression::new(ModelConfig::default(), x.columns.clone());
        model
            .fit(&BatchFeed::new(&x, &y, 1, true, 4).unwrap())
            .unwrap();
        let eval = BatchFeed::new(&x, &y, 1, true, 4).unwrap();
        assert!(matches!(
            model.predict(&eval),
            Err(IrisError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_missing_column_is_format_error() {
        let (x, y) = separable(4);
        let mut model = LogisticRegression::new(
            ModelConfig::default(),
            vec!["signal".to_string(), "absent".to_string()],
        );
        let feed = BatchFeed::new(&x, &y, 1, false, 4).unwrap();
        assert!(matches!(model.fit(&feed), Err(IrisError::Format(_))));
    }

    #[test]
    fn test_failed_refit_keeps_previous_parameters() {
        let (x, y) = separable(8);
        let mut model = LogisticRegression::new(ModelConfig::default(), x.columns.clone());
        model
            .fit(&BatchFeed::new(&x, &y, 3, false, 4).unwrap())
            .unwrap();
        let weights = model.weights().unwrap().clone();
        let bias = model.bias();
        assert_ne!(bias, 0.0);

        // the bad label sits in the second batch, after one update step
        let bad = LabelSet::new(vec![0, 0, 0, 0, 1, 1, 5, 1]);
        let err = model
            .fit(&BatchFeed::new(&x, &bad, 1, false, 4).unwrap())
            .unwrap_err();
        assert!(matches!(err, IrisError::Format(_)));
        assert_eq!(model.weights().unwrap(), &weights);
        assert_eq!(model.bias(), bias);
    }

    #[test]
    fn test_non_binary_label_is_rejected() {
        let (x, _) = separable(4);
        let y = LabelSet::new(vec![0, 1, 2, 1]);
        let mut model = LogisticRegression::new(ModelConfig::default(), x.columns.clone());
        let feed = BatchFeed::new(&x, &y, 1, false, 4).unwrap();
        assert!(model.fit(&feed).is_err());
    }
}
