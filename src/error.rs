use thiserror::Error;

use crate::table::Feature;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    #[error("no observed {feature} value in patient history")]
    NoObservedValue { feature: Feature },

    #[error("models are not fitted; train before predicting")]
    ModelNotFitted,

    #[error("failed to fit {target} model: {message}")]
    Fit { target: Feature, message: String },
}

impl ForecastError {
    pub fn fit(target: Feature, message: impl ToString) -> Self {
        Self::Fit {
            target,
            message: message.to_string(),
        }
    }
}
