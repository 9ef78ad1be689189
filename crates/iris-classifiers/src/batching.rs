//! Lazy mini-batch feed over a feature/label pair.
//!
//! A `BatchFeed` is a factory: every call to `batches()` builds a fresh
//! iterator that walks the rows `epochs` times, optionally reshuffling the row
//! order at the start of each epoch, and yields one `Batch` at a time. Nothing
//! beyond the current batch and the row order is materialized.
use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::data_handling::{FeatureSet, LabelSet};
use crate::error::{IrisError, Result};

/// One mini-batch: each feature column by name, plus the aligned labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub features: BTreeMap<String, Vec<f64>>,
    pub labels: Vec<i64>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Restartable source of batches for training or prediction.
#[derive(Debug, Clone)]
pub struct BatchFeed<'a> {
    features: &'a FeatureSet,
    labels: &'a LabelSet,
    epochs: usize,
    shuffle: bool,
    batch_size: usize,
    seed: Option<u64>,
}

impl<'a> BatchFeed<'a> {
    pub fn new(
        features: &'a FeatureSet,
        labels: &'a LabelSet,
        epochs: usize,
        shuffle: bool,
        batch_size: usize,
    ) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(IrisError::Format(format!(
                "{} feature rows but {} labels",
                features.nrows(),
                labels.len()
            )));
        }
        if batch_size == 0 {
            return Err(IrisError::InvalidParameter(
                "batch size must be positive".to_string(),
            ));
        }
        if epochs == 0 {
            return Err(IrisError::InvalidParameter(
                "epoch count must be positive".to_string(),
            ));
        }
        Ok(BatchFeed {
            features,
            labels,
            epochs,
            shuffle,
            batch_size,
            seed: None,
        })
    }

    /// Fix the shuffling seed so every `batches()` call yields the same sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn nrows(&self) -> usize {
        self.labels.len()
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    pub fn shuffles(&self) -> bool {
        self.shuffle
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn columns(&self) -> &[String] {
        &self.features.columns
    }

    /// Batches per epoch, `ceil(N / B)`.
    pub fn batches_per_epoch(&self) -> usize {
        self.nrows().div_ceil(self.batch_size)
    }

    /// Total batches over all epochs.
    pub fn num_batches(&self) -> usize {
        self.epochs * self.batches_per_epoch()
    }

    /// A fresh pass over the data.
    pub fn batches(&self) -> Batches<'a> {
        let rng = match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Batches {
            feed: self.clone(),
            rng,
            order: (0..self.nrows()).collect(),
            epoch: 0,
            cursor: 0,
        }
    }
}

/// Iterator returned by `BatchFeed::batches`.
pub struct Batches<'a> {
    feed: BatchFeed<'a>,
    rng: StdRng,
    order: Vec<usize>,
    epoch: usize,
    cursor: usize,
}

impl<'a> Batches<'a> {
    /// Index of the epoch the next batch belongs to.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    fn make_batch(&self, rows: &[usize]) -> Batch {
        let x = &self.feed.features.values;
        let features = self
            .feed
            .features
            .columns
            .iter()
            .enumerate()
            .map(|(c, name)| (name.clone(), rows.iter().map(|&r| x[(r, c)]).collect()))
            .collect();
        let labels = rows.iter().map(|&r| self.feed.labels.values[r]).collect();
        Batch { features, labels }
    }
}

impl<'a> Iterator for Batches<'a> {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        let n = self.order.len();
        if n == 0 || self.epoch >= self.feed.epochs {
            return None;
        }
        if self.cursor == 0 && self.feed.shuffle {
            self.order.shuffle(&mut self.rng);
        }

        let end = (self.cursor + self.feed.batch_size).min(n);
        let batch = self.make_batch(&self.order[self.cursor..end]);

        if end == n {
            self.epoch += 1;
            self.cursor = 0;
        } else {
            self.cursor = end;
        }
        Some(batch)
    }
}
