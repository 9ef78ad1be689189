use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, IrisError>;

/// Failures that can stop a pipeline run.
#[derive(Error, Debug)]
pub enum IrisError {
    /// A resource could not be fetched or the cache could not be used.
    #[error("IO error: {0}")]
    Io(String),
    /// Input data does not match the expected schema.
    #[error("Format error: {0}")]
    Format(String),
    /// A feature column has zero variance and cannot be standardized.
    #[error("Degenerate column '{column}': standard deviation is zero or undefined")]
    DegenerateColumn { column: String },
    /// A scoring ratio has a zero denominator.
    #[error("Undefined metric '{metric}': denominator is zero")]
    UndefinedMetric { metric: &'static str },
    /// A stage was called with an argument outside its domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Prediction was requested before the model was fitted.
    #[error("Model is not trained yet")]
    ModelNotTrained,
}

impl From<std::io::Error> for IrisError {
    fn from(err: std::io::Error) -> Self {
        IrisError::Io(err.to_string())
    }
}

impl From<csv::Error> for IrisError {
    fn from(err: csv::Error) -> Self {
        IrisError::Format(err.to_string())
    }
}
