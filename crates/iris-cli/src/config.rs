use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use iris_classifiers::config::{ModelConfig, ModelType};
use iris_classifiers::io::{default_cache_dir, FetchConfig};
use iris_classifiers::splitting::DEFAULT_TEST_FRACTION;

pub const DEFAULT_TRAIN_URL: &str =
    "https://storage.googleapis.com/download.tensorflow.org/data/iris_training.csv";
pub const DEFAULT_TEST_URL: &str =
    "https://storage.googleapis.com/download.tensorflow.org/data/iris_test.csv";

/// Parameters for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub train_url: String,
    pub test_url: String,
    /// Download cache; `None` uses the platform default.
    pub cache_dir: Option<PathBuf>,
    pub max_fetch_attempts: u32,
    pub test_fraction: f64,
    pub epochs: usize,
    /// Passes over the data when predicting; only the first one is scored.
    pub eval_epochs: usize,
    pub batch_size: usize,
    pub shuffle: bool,
    pub seed: Option<u64>,
    pub model: ModelConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            train_url: DEFAULT_TRAIN_URL.to_string(),
            test_url: DEFAULT_TEST_URL.to_string(),
            cache_dir: None,
            max_fetch_attempts: 3,
            test_fraction: DEFAULT_TEST_FRACTION,
            epochs: 20,
            eval_epochs: 1,
            batch_size: 32,
            shuffle: true,
            seed: None,
            model: ModelConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Start from the JSON file at `config_path` (or defaults) and apply CLI overrides.
    pub fn from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => load_pipeline_config(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(url) = matches.get_one::<String>("train_url") {
            config.train_url = url.clone();
        }
        if let Some(url) = matches.get_one::<String>("test_url") {
            config.test_url = url.clone();
        }
        if let Some(dir) = matches.get_one::<PathBuf>("cache_dir") {
            config.cache_dir = Some(dir.clone());
        }
        if let Some(&fraction) = matches.get_one::<f64>("test_fraction") {
            config.test_fraction = fraction;
        }
        if let Some(&epochs) = matches.get_one::<usize>("epochs") {
            config.epochs = epochs;
        }
        if let Some(&batch_size) = matches.get_one::<usize>("batch_size") {
            config.batch_size = batch_size;
        }
        if let Some(&seed) = matches.get_one::<u64>("seed") {
            config.seed = Some(seed);
        }
        if let Some(&lr) = matches.get_one::<f64>("learning_rate") {
            config.model.learning_rate = lr;
        }
        if let Some(model_type) = matches.get_one::<String>("model_type") {
            config.model.model_type = ModelType::from_str(model_type).map_err(anyhow::Error::msg)?;
        }
        if matches.get_flag("no_shuffle") {
            config.shuffle = false;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values no stage could run with.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            anyhow::bail!("test_fraction must lie in (0, 1), got {}", self.test_fraction);
        }
        if self.epochs == 0 || self.eval_epochs == 0 {
            anyhow::bail!("epochs and eval_epochs must be positive");
        }
        if self.batch_size == 0 {
            anyhow::bail!("batch_size must be positive");
        }
        if self.max_fetch_attempts == 0 {
            anyhow::bail!("max_fetch_attempts must be positive");
        }
        Ok(())
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            cache_dir: self.cache_dir.clone().unwrap_or_else(default_cache_dir),
            max_attempts: self.max_fetch_attempts,
            ..FetchConfig::default()
        }
    }
}

/// Load a pipeline configuration from a JSON file.
pub fn load_pipeline_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: PipelineConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}
