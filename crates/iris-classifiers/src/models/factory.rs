use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::logistic::LogisticRegression;

/// Build a boxed classifier over the named feature columns.
pub fn build_model(params: ModelConfig, feature_columns: Vec<String>) -> Box<dyn ClassifierModel> {
    match params.model_type {
        ModelType::Logistic { .. } => Box::new(LogisticRegression::new(params, feature_columns)),
    }
}
