//! Visit tables: the raw string table read from a source and the column
//! layout detected from its header.

use std::fmt;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub mod canonical;

pub use canonical::{CanonicalTable, VisitRecord};

pub const COL_RID: &str = "RID";
pub const COL_YEARS_BL: &str = "Years_bl";
pub const COL_DIAGNOSIS: &str = "Diagnosis";
pub const COL_DXCHANGE: &str = "DXCHANGE";
pub const COL_ADAS13: &str = "ADAS13";
pub const COL_VENTRICLES_ICV: &str = "Ventricles_ICV";
pub const COL_VENTRICLES: &str = "Ventricles";
pub const COL_ICV_BL: &str = "ICV_bl";

/// The three model inputs, which are also the three forecast targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    Diagnosis,
    Adas13,
    VentriclesIcv,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::Diagnosis, Feature::Adas13, Feature::VentriclesIcv];

    pub fn column(self) -> &'static str {
        match self {
            Feature::Diagnosis => COL_DIAGNOSIS,
            Feature::Adas13 => COL_ADAS13,
            Feature::VentriclesIcv => COL_VENTRICLES_ICV,
        }
    }

    pub fn future_column(self) -> &'static str {
        match self {
            Feature::Diagnosis => "Future_Diagnosis",
            Feature::Adas13 => "Future_ADAS13",
            Feature::VentriclesIcv => "Future_Ventricles_ICV",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Header plus string cells, untouched by any coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn from_str_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        let mut table = Self::new(headers.iter().map(|h| h.to_string()).collect());
        for row in rows {
            table.push_row(row.iter().map(|c| c.to_string()).collect());
        }
        table
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text, or an empty string when the row is shorter than the header.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosisSource {
    Unified(usize),
    DxChange(usize),
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioSource {
    Provided(usize),
    Derived,
}

/// Column positions resolved once from a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSchema {
    pub rid: usize,
    pub years_bl: Option<usize>,
    pub diagnosis: DiagnosisSource,
    pub adas13: Option<usize>,
    pub ratio: RatioSource,
    pub ventricles: Option<usize>,
    pub icv_bl: Option<usize>,
}

impl InputSchema {
    pub fn detect(headers: &[String]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let Some(rid) = find(COL_RID) else {
            bail!("input table has no {} column", COL_RID);
        };
        let diagnosis = match (find(COL_DIAGNOSIS), find(COL_DXCHANGE)) {
            (Some(idx), _) => DiagnosisSource::Unified(idx),
            (None, Some(idx)) => DiagnosisSource::DxChange(idx),
            (None, None) => DiagnosisSource::Absent,
        };
        let ratio = match find(COL_VENTRICLES_ICV) {
            Some(idx) => RatioSource::Provided(idx),
            None => RatioSource::Derived,
        };

        Ok(Self {
            rid,
            years_bl: find(COL_YEARS_BL),
            diagnosis,
            adas13: find(COL_ADAS13),
            ratio,
            ventricles: find(COL_VENTRICLES),
            icv_bl: find(COL_ICV_BL),
        })
    }
}

/// Lenient numeric cast: anything that is not a finite float is missing.
pub fn coerce_f64(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn coerce_patient_id(cell: &str) -> Option<i64> {
    let trimmed = cell.trim();
    if let Ok(id) = trimmed.parse::<i64>() {
        return Some(id);
    }
    let value = coerce_f64(trimmed)?;
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}
