//! Runs the pipeline end to end: load, filter, merge, split, normalize,
//! train, predict and score.
use anyhow::{Context, Result};

use iris_classifiers::batching::BatchFeed;
use iris_classifiers::data_handling::{
    filter_and_relabel, merge_tables, FeatureSet, LabelSet, Table,
};
use iris_classifiers::io::load_table;
use iris_classifiers::models::classifier_trait::ClassifierModel;
use iris_classifiers::models::factory::build_model;
use iris_classifiers::preprocessing::normalize;
use iris_classifiers::scoring::{calculate_binary_class_scores, BinaryScores};
use iris_classifiers::splitting::train_test_split;
use iris_classifiers::stats::{
    correlation_matrix, describe, describe_features, format_correlation, format_summaries,
};

use crate::config::PipelineConfig;

/// Row and column counts of one subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsetShape {
    pub feature_rows: usize,
    pub feature_cols: usize,
    pub label_rows: usize,
    pub label_cols: usize,
}

impl SubsetShape {
    fn of(x: &FeatureSet, y: &LabelSet) -> Self {
        SubsetShape {
            feature_rows: x.nrows(),
            feature_cols: x.ncols(),
            label_rows: y.len(),
            label_cols: 1,
        }
    }
}

/// Everything printed at the end of a successful run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub model: String,
    pub train_shape: SubsetShape,
    pub test_shape: SubsetShape,
    pub train_scores: BinaryScores,
    pub test_scores: BinaryScores,
}

pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport> {
    let fetch = config.fetch_config();

    let training = load_table(&config.train_url, &fetch)
        .with_context(|| format!("Failed to load training data from {}", config.train_url))?;
    let test = load_table(&config.test_url, &fetch)
        .with_context(|| format!("Failed to load test data from {}", config.test_url))?;

    let training = filter_and_relabel(&training);
    let test = filter_and_relabel(&test);
    training.log_summary("Training table (filtered)");
    test.log_summary("Test table (filtered)");

    let dataset = merge_tables(&training, &test);
    log_dataset_statistics(&dataset);

    let split = train_test_split(
        &dataset.features(),
        &dataset.labels(),
        config.test_fraction,
        config.seed,
    )?;
    log::debug!(
        "Training features:\n{}",
        format_summaries(&describe_features(&split.train_features))
    );
    log::debug!(
        "Test features:\n{}",
        format_summaries(&describe_features(&split.test_features))
    );

    // each subset is standardized with its own statistics
    let (train_x, _) =
        normalize(&split.train_features).context("Failed to normalize training features")?;
    let (test_x, _) =
        normalize(&split.test_features).context("Failed to normalize test features")?;

    let mut model = build_model(config.model.clone(), train_x.columns.clone());

    let mut train_feed = BatchFeed::new(
        &train_x,
        &split.train_labels,
        config.epochs,
        config.shuffle,
        config.batch_size,
    )?;
    if let Some(seed) = config.seed {
        train_feed = train_feed.with_seed(seed.wrapping_add(1));
    }
    log::info!(
        "Training {} model: {} rows, {} epochs, batch size {} ({} batches)",
        model.name(),
        train_feed.nrows(),
        train_feed.epochs(),
        train_feed.batch_size(),
        train_feed.num_batches()
    );
    model.fit(&train_feed)?;

    let train_scores = evaluate(model.as_ref(), &train_x, &split.train_labels, config)
        .context("Failed to score training data")?;
    let test_scores = evaluate(model.as_ref(), &test_x, &split.test_labels, config)
        .context("Failed to score test data")?;

    log::info!(
        "Scores: train accuracy {:.4}, test accuracy {:.4}",
        train_scores.accuracy,
        test_scores.accuracy
    );

    Ok(PipelineReport {
        model: model.name().to_string(),
        train_shape: SubsetShape::of(&split.train_features, &split.train_labels),
        test_shape: SubsetShape::of(&split.test_features, &split.test_labels),
        train_scores,
        test_scores,
    })
}

fn evaluate(
    model: &dyn ClassifierModel,
    x: &FeatureSet,
    y: &LabelSet,
    config: &PipelineConfig,
) -> Result<BinaryScores> {
    let feed = BatchFeed::new(x, y, config.eval_epochs, false, config.batch_size)?;
    let predictions = model.predict(&feed)?;
    let truth = y.values.to_vec();
    Ok(calculate_binary_class_scores(&truth, &predictions)?)
}

fn log_dataset_statistics(dataset: &Table) {
    dataset.log_summary("Merged dataset");
    log::info!("Merged dataset statistics:\n{}", format_summaries(&describe(dataset)));
    log::debug!(
        "Merged dataset correlation:\n{}",
        format_correlation(&correlation_matrix(dataset))
    );
}
