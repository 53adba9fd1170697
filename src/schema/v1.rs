use serde::{Deserialize, Serialize};

use crate::forecast::{PatientForecast, TrainSummary};
use crate::model::ModelParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMeta {
    pub train: String,
    pub input: Option<String>,
    pub as_of: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Training {
    pub summary: TrainSummary,
    pub params: ModelParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReportV1 {
    pub tool: String,
    pub tool_version: String,
    pub schema_version: String,
    pub input_meta: InputMeta,
    pub training: Option<Training>,
    pub forecasts: Vec<PatientForecast>,
    pub warnings: Vec<String>,
}

impl ForecastReportV1 {
    pub fn empty(tool_version: &str, train: String) -> Self {
        Self {
            tool: "kira-progression".to_string(),
            tool_version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            input_meta: InputMeta {
                train,
                input: None,
                as_of: None,
            },
            training: None,
            forecasts: Vec::new(),
            warnings: Vec::new(),
        }
    }
}
