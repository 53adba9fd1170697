use std::fmt;
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ForecastError;
use crate::io::csv_reader::read_table;
use crate::model::{ModelParams, ModelTriple, TargetRows};
use crate::pairing::{PairTable, set_futures};
use crate::preprocess::preprocess;
use crate::table::canonical::last_observed;
use crate::table::{CanonicalTable, Feature, RawTable, VisitRecord};

/// One forward prediction. Interval bounds are placeholders and always 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(rename = "CN relative probability")]
    pub cn_probability: f64,
    #[serde(rename = "MCI relative probability")]
    pub mci_probability: f64,
    #[serde(rename = "AD relative probability")]
    pub ad_probability: f64,
    #[serde(rename = "ADAS13")]
    pub adas13: f64,
    #[serde(rename = "ADAS13 50% CI lower")]
    pub adas13_lower: f64,
    #[serde(rename = "ADAS13 50% CI upper")]
    pub adas13_upper: f64,
    #[serde(rename = "Ventricles_ICV")]
    pub ventricles_icv: f64,
    #[serde(rename = "Ventricles_ICV 50% CI lower")]
    pub ventricles_icv_lower: f64,
    #[serde(rename = "Ventricles_ICV 50% CI upper")]
    pub ventricles_icv_upper: f64,
}

impl Forecast {
    pub const KEYS: [&'static str; 9] = [
        "CN relative probability",
        "MCI relative probability",
        "AD relative probability",
        "ADAS13",
        "ADAS13 50% CI lower",
        "ADAS13 50% CI upper",
        "Ventricles_ICV",
        "Ventricles_ICV 50% CI lower",
        "Ventricles_ICV 50% CI upper",
    ];

    pub fn values(&self) -> [f64; 9] {
        [
            self.cn_probability,
            self.mci_probability,
            self.ad_probability,
            self.adas13,
            self.adas13_lower,
            self.adas13_upper,
            self.ventricles_icv,
            self.ventricles_icv_lower,
            self.ventricles_icv_upper,
        ]
    }

    pub fn entries(&self) -> [(&'static str, f64); 9] {
        let values = self.values();
        std::array::from_fn(|i| (Self::KEYS[i], values[i]))
    }

    pub fn diagnosis_probabilities(&self) -> [f64; 3] {
        [self.cn_probability, self.mci_probability, self.ad_probability]
    }
}

impl ModelTriple {
    pub fn predict(&self, features: [f64; 3]) -> Forecast {
        let x = Array2::from_shape_fn((1, features.len()), |(_, j)| features[j]);
        let proba = self.diagnosis.predict_proba(x.view());
        Forecast {
            cn_probability: proba[[0, 0]],
            mci_probability: proba[[0, 1]],
            ad_probability: proba[[0, 2]],
            adas13: self.adas13.predict(x.view())[0],
            adas13_lower: 0.0,
            adas13_upper: 0.0,
            ventricles_icv: self.ventricles_icv.predict(x.view())[0],
            ventricles_icv_lower: 0.0,
            ventricles_icv_upper: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainSummary {
    pub visits: usize,
    pub skipped_rows: usize,
    pub patients: usize,
    pub pair_rows: usize,
    pub target_rows: TargetRows,
}

impl TrainSummary {
    pub fn new(
        raw_rows: usize,
        canonical: &CanonicalTable,
        pairs: &PairTable,
        target_rows: TargetRows,
    ) -> Self {
        Self {
            visits: canonical.len(),
            skipped_rows: raw_rows.saturating_sub(canonical.len()),
            patients: canonical.patient_count(),
            pair_rows: pairs.len(),
            target_rows,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientForecast {
    #[serde(rename = "RID")]
    pub rid: i64,
    #[serde(flatten)]
    pub forecast: Forecast,
}

#[derive(Debug, Clone, Default)]
pub struct PatientForecasts {
    pub forecasts: Vec<PatientForecast>,
    pub warnings: Vec<String>,
}

/// Owns the fitted model triple. Re-training replaces it.
#[derive(Default)]
pub struct Forecaster {
    params: ModelParams,
    models: Option<ModelTriple>,
}

impl Forecaster {
    pub fn new(params: ModelParams) -> Self {
        Self {
            params,
            models: None,
        }
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    pub fn is_fitted(&self) -> bool {
        self.models.is_some()
    }

    pub fn models(&self) -> Option<&ModelTriple> {
        self.models.as_ref()
    }

    pub fn train(&mut self, source: &Path) -> Result<TrainSummary> {
        let raw = read_table(source)?;
        self.train_table(&raw)
    }

    pub fn train_table(&mut self, raw: &RawTable) -> Result<TrainSummary> {
        let canonical = preprocess(raw)?;
        let pairs = set_futures(&canonical);
        let target_rows = self.fit_pairs(&pairs)?;
        Ok(TrainSummary::new(raw.len(), &canonical, &pairs, target_rows))
    }

    /// Fits all three models; the previous triple is kept if any fit fails.
    pub fn fit_pairs(&mut self, pairs: &PairTable) -> Result<TargetRows, ForecastError> {
        let (models, rows) = ModelTriple::fit(pairs, &self.params)?;
        self.models = Some(models);
        info!(pair_rows = pairs.len(), "models fitted");
        Ok(rows)
    }

    /// Forecast from a single history row laid out under `headers`.
    pub fn predict(
        &self,
        headers: &[String],
        row: &[String],
        as_of: Option<NaiveDate>,
    ) -> Result<Forecast> {
        let mut table = RawTable::new(headers.to_vec());
        table.push_row(row.to_vec());
        self.predict_history(&table, as_of)
    }

    /// Forecast for one patient's history, using the last observed value of
    /// each feature. `as_of` does not change which values are used.
    pub fn predict_history(&self, history: &RawTable, as_of: Option<NaiveDate>) -> Result<Forecast> {
        let models = self.models.as_ref().ok_or(ForecastError::ModelNotFitted)?;
        if let Some(date) = as_of {
            debug!(%date, "forecast requested as of date");
        }
        let canonical = preprocess(history)?;
        Ok(predict_visits(models, canonical.rows())?)
    }

    /// One forecast per patient in `table`. Patients lacking an observed
    /// feature are reported as warnings.
    pub fn forecast_patients(&self, table: &RawTable) -> Result<PatientForecasts> {
        let models = self.models.as_ref().ok_or(ForecastError::ModelNotFitted)?;
        let canonical = preprocess(table)?;
        let mut out = PatientForecasts::default();
        for (rid, visits) in canonical.patients() {
            match predict_visits(models, visits) {
                Ok(forecast) => out.forecasts.push(PatientForecast { rid, forecast }),
                Err(err) => {
                    warn!(rid, error = %err, "patient skipped");
                    out.warnings.push(format!("RID {rid}: {err}"));
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Debug for Forecaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forecaster")
            .field("params", &self.params)
            .field("fitted", &self.is_fitted())
            .finish()
    }
}

pub fn latest_features(visits: &[VisitRecord]) -> Result<[f64; 3], ForecastError> {
    let mut out = [0.0; 3];
    for (slot, feature) in out.iter_mut().zip(Feature::ALL) {
        *slot = last_observed(visits, feature).ok_or(ForecastError::NoObservedValue { feature })?;
    }
    Ok(out)
}

fn predict_visits(models: &ModelTriple, visits: &[VisitRecord]) -> Result<Forecast, ForecastError> {
    let features = latest_features(visits)?;
    Ok(models.predict(features))
}
