use std::fmt;

use linfa::DatasetBase;
use linfa::traits::{Fit, Predict};
use linfa_elasticnet::ElasticNet;
use linfa_logistic::{MultiFittedLogisticRegression, MultiLogisticRegression};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ForecastError;
use crate::math::stats::observed_mean;
use crate::pairing::PairTable;
use crate::table::Feature;

pub mod scaler;

use scaler::StandardScaler;

/// CN, MCI, AD.
pub const DIAGNOSIS_CLASSES: usize = 3;

/// L2 penalty of the continuous-target regressors. Keeps the solve defined
/// when a standardised column is constant or rows are fewer than features.
pub const RIDGE_PENALTY: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelParams {
    pub max_iterations: u64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            max_iterations: 100,
        }
    }
}

/// Rows each model was fitted on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRows {
    pub diagnosis: usize,
    pub adas13: usize,
    pub ventricles_icv: usize,
}

/// Class index for a diagnosis value: 1 -> 0 (CN), 2 -> 1 (MCI), 3 -> 2 (AD).
pub fn diagnosis_class(value: f64) -> Option<usize> {
    if value.fract() != 0.0 || !(1.0..=DIAGNOSIS_CLASSES as f64).contains(&value) {
        return None;
    }
    Some(value as usize - 1)
}

/// Input matrix over (Diagnosis, ADAS13, Ventricles_ICV) for every pair row.
/// Missing cells take their column mean over the pair table.
pub fn feature_matrix(pairs: &PairTable) -> Result<Array2<f64>, ForecastError> {
    let rows = pairs.rows();
    let mut x = Array2::zeros((rows.len(), Feature::ALL.len()));
    for (j, feature) in Feature::ALL.into_iter().enumerate() {
        let fill = observed_mean(rows.iter().map(|r| r.visit.feature(feature)))
            .ok_or_else(|| ForecastError::fit(feature, "feature column has no observed value"))?;
        for (i, r) in rows.iter().enumerate() {
            x[[i, j]] = r.visit.feature(feature).unwrap_or(fill);
        }
    }
    Ok(x)
}

pub struct DiagnosisModel {
    scaler: StandardScaler,
    estimator: MultiFittedLogisticRegression<f64, usize>,
}

impl DiagnosisModel {
    pub fn fit(
        x: ArrayView2<f64>,
        y: &[f64],
        params: &ModelParams,
    ) -> Result<Self, ForecastError> {
        let target = Feature::Diagnosis;
        let labels = y
            .iter()
            .map(|&v| {
                diagnosis_class(v).ok_or_else(|| {
                    ForecastError::fit(target, format!("diagnosis value {v} is not one of 1, 2, 3"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut seen = [false; DIAGNOSIS_CLASSES];
        for &c in &labels {
            seen[c] = true;
        }
        if seen.iter().filter(|s| **s).count() < 2 {
            return Err(ForecastError::fit(
                target,
                "training rows contain fewer than two diagnosis classes",
            ));
        }

        let scaler = StandardScaler::fit(x);
        let dataset = DatasetBase::new(scaler.transform(x), Array1::from(labels));
        let estimator = MultiLogisticRegression::<f64>::new()
            .max_iterations(params.max_iterations)
            .fit(&dataset)
            .map_err(|err| ForecastError::fit(target, err))?;
        Ok(Self { scaler, estimator })
    }

    /// One row per sample, one column per class index. Classes absent from
    /// training get probability 0.
    pub fn predict_proba(&self, x: ArrayView2<f64>) -> Array2<f64> {
        let fitted = self
            .estimator
            .predict_probabilities(&self.scaler.transform(x));
        let mut out = Array2::zeros((x.nrows(), DIAGNOSIS_CLASSES));
        for (col, &class) in self.estimator.classes().iter().enumerate() {
            out.column_mut(class).assign(&fitted.column(col));
        }
        out
    }
}

impl fmt::Debug for DiagnosisModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosisModel")
            .field("scaler", &self.scaler)
            .field("classes", &self.estimator.classes())
            .finish_non_exhaustive()
    }
}

/// Scaler plus ridge regression for a continuous target.
pub struct ScalarModel {
    target: Feature,
    scaler: StandardScaler,
    estimator: ElasticNet<f64>,
}

impl ScalarModel {
    pub fn fit(target: Feature, x: ArrayView2<f64>, y: &[f64]) -> Result<Self, ForecastError> {
        let scaler = StandardScaler::fit(x);
        let dataset = DatasetBase::new(scaler.transform(x), Array1::from(y.to_vec()));
        let estimator = ElasticNet::<f64>::ridge()
            .penalty(RIDGE_PENALTY)
            .fit(&dataset)
            .map_err(|err| ForecastError::fit(target, err))?;
        Ok(Self {
            target,
            scaler,
            estimator,
        })
    }

    pub fn predict(&self, x: ArrayView2<f64>) -> Array1<f64> {
        self.estimator.predict(&self.scaler.transform(x))
    }
}

impl fmt::Debug for ScalarModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarModel")
            .field("target", &self.target)
            .field("scaler", &self.scaler)
            .field("intercept", &self.estimator.intercept())
            .finish_non_exhaustive()
    }
}

/// The three independently fitted models.
#[derive(Debug)]
pub struct ModelTriple {
    pub diagnosis: DiagnosisModel,
    pub adas13: ScalarModel,
    pub ventricles_icv: ScalarModel,
}

impl ModelTriple {
    pub fn fit(pairs: &PairTable, params: &ModelParams) -> Result<(Self, TargetRows), ForecastError> {
        let x = feature_matrix(pairs)?;

        let (x_dx, y_dx) = observed_subset(pairs, &x, Feature::Diagnosis)?;
        let (x_adas, y_adas) = observed_subset(pairs, &x, Feature::Adas13)?;
        let (x_vent, y_vent) = observed_subset(pairs, &x, Feature::VentriclesIcv)?;
        let rows = TargetRows {
            diagnosis: y_dx.len(),
            adas13: y_adas.len(),
            ventricles_icv: y_vent.len(),
        };
        info!(
            diagnosis_rows = rows.diagnosis,
            adas13_rows = rows.adas13,
            ventricles_icv_rows = rows.ventricles_icv,
            "fitting models"
        );

        let triple = Self {
            diagnosis: DiagnosisModel::fit(x_dx.view(), &y_dx, params)?,
            adas13: ScalarModel::fit(Feature::Adas13, x_adas.view(), &y_adas)?,
            ventricles_icv: ScalarModel::fit(Feature::VentriclesIcv, x_vent.view(), &y_vent)?,
        };
        Ok((triple, rows))
    }
}

// Rows where this target's future value is observed.
fn observed_subset(
    pairs: &PairTable,
    x: &Array2<f64>,
    target: Feature,
) -> Result<(Array2<f64>, Vec<f64>), ForecastError> {
    let mut idx = Vec::new();
    let mut y = Vec::new();
    for (i, r) in pairs.rows().iter().enumerate() {
        if let Some(v) = r.future(target) {
            idx.push(i);
            y.push(v);
        }
    }
    if idx.is_empty() {
        return Err(ForecastError::fit(target, "no training row has an observed future value"));
    }
    Ok((x.select(Axis(0), &idx), y))
}
