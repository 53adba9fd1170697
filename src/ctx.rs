use std::path::PathBuf;

use chrono::NaiveDate;

use crate::forecast::{Forecaster, PatientForecast, TrainSummary};
use crate::model::ModelParams;
use crate::pairing::PairTable;
use crate::schema::v1::ForecastReportV1;
use crate::table::{CanonicalTable, RawTable};

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub json_path: PathBuf,
    pub tsv_path: PathBuf,
}

#[derive(Debug)]
pub struct Ctx {
    pub train_path: PathBuf,
    pub input_path: Option<PathBuf>,
    pub as_of: Option<NaiveDate>,
    pub write_json: bool,
    pub write_tsv: bool,
    pub raw_train: Option<RawTable>,
    pub canonical: Option<CanonicalTable>,
    pub pairs: Option<PairTable>,
    pub forecaster: Forecaster,
    pub train_summary: Option<TrainSummary>,
    pub forecasts: Vec<PatientForecast>,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub report: ForecastReportV1,
}

impl Ctx {
    pub fn new(
        train_path: PathBuf,
        input_path: Option<PathBuf>,
        out_dir: PathBuf,
        as_of: Option<NaiveDate>,
        write_json: bool,
        write_tsv: bool,
        params: ModelParams,
        tool_version: &str,
    ) -> Self {
        let json_path = out_dir.join("forecast.json");
        let tsv_path = out_dir.join("forecast.tsv");
        let report = ForecastReportV1::empty(tool_version, train_path.display().to_string());
        Self {
            train_path,
            input_path,
            as_of,
            write_json,
            write_tsv,
            raw_train: None,
            canonical: None,
            pairs: None,
            forecaster: Forecaster::new(params),
            train_summary: None,
            forecasts: Vec::new(),
            warnings: Vec::new(),
            output: OutputPaths {
                out_dir,
                json_path,
                tsv_path,
            },
            report,
        }
    }
}
