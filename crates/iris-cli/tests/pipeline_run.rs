//! End-to-end pipeline runs against local fixture files.

mod common;

use iris_cli::config::PipelineConfig;
use iris_cli::pipeline::run_pipeline;

fn fixture_config(dir: &std::path::Path) -> PipelineConfig {
    let (train, test) = common::write_fixtures(dir);
    PipelineConfig {
        train_url: train.to_str().unwrap().to_string(),
        test_url: test.to_str().unwrap().to_string(),
        cache_dir: Some(dir.join("cache")),
        seed: Some(42),
        ..PipelineConfig::default()
    }
}

#[test]
fn run_pipeline_on_fixtures() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path());

    let report = run_pipeline(&config).unwrap();
    assert_eq!(report.model, "logistic");
    assert_eq!(report.train_shape.feature_rows, 80);
    assert_eq!(report.test_shape.feature_rows, 20);
    assert_eq!(report.train_shape.feature_cols, 4);
    assert_eq!(report.test_shape.label_cols, 1);
    assert!(report.train_scores.accuracy >= 0.9, "{:?}", report.train_scores);
    assert!(report.test_scores.accuracy >= 0.9, "{:?}", report.test_scores);
}

#[test]
fn seeded_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path());

    let a = run_pipeline(&config).unwrap();
    let b = run_pipeline(&config).unwrap();
    assert_eq!(a.train_scores, b.train_scores);
    assert_eq!(a.test_scores, b.test_scores);
}

#[test]
fn missing_training_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = fixture_config(dir.path());
    config.train_url = dir.path().join("absent.csv").to_str().unwrap().to_string();

    let err = run_pipeline(&config).unwrap_err();
    assert!(format!("{:#}", err).contains("IO error"), "{:#}", err);
}

#[test]
fn constant_feature_column_fails_normalization() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = fixture_config(dir.path());
    let flat = "h,h,h,h,h\n".to_string()
        + &(0..20)
            .map(|i| format!("5.0,3.0,4.0,1.3,{}\n", 1 + i % 2))
            .collect::<String>();
    let path = dir.path().join("flat.csv");
    std::fs::write(&path, flat).unwrap();
    config.train_url = path.to_str().unwrap().to_string();
    config.test_url = path.to_str().unwrap().to_string();

    let err = run_pipeline(&config).unwrap_err();
    assert!(format!("{:#}", err).contains("Degenerate column"), "{:#}", err);
}
