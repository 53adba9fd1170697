use crate::table::{
    COL_ADAS13, COL_DIAGNOSIS, COL_ICV_BL, COL_RID, COL_VENTRICLES, COL_VENTRICLES_ICV,
    COL_YEARS_BL, Feature, RawTable,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisitRecord {
    pub rid: i64,
    pub years_bl: Option<f64>,
    pub diagnosis: Option<f64>,
    pub adas13: Option<f64>,
    pub ventricles_icv: Option<f64>,
    pub ventricles: Option<f64>,
    pub icv_bl: Option<f64>,
}

impl VisitRecord {
    pub fn feature(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Diagnosis => self.diagnosis,
            Feature::Adas13 => self.adas13,
            Feature::VentriclesIcv => self.ventricles_icv,
        }
    }
}

/// Visits sorted by (RID, Years_bl). Only the preprocessor builds one, so
/// each patient's visits are contiguous and in time order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalTable {
    rows: Vec<VisitRecord>,
}

impl CanonicalTable {
    pub(crate) fn from_sorted(rows: Vec<VisitRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[VisitRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn patients(&self) -> impl Iterator<Item = (i64, &[VisitRecord])> {
        self.rows
            .chunk_by(|a, b| a.rid == b.rid)
            .map(|visits| (visits[0].rid, visits))
    }

    pub fn patient_count(&self) -> usize {
        self.patients().count()
    }

    pub fn to_raw(&self) -> RawTable {
        let headers = [
            COL_RID,
            COL_YEARS_BL,
            COL_DIAGNOSIS,
            COL_ADAS13,
            COL_VENTRICLES_ICV,
            COL_VENTRICLES,
            COL_ICV_BL,
        ];
        let mut raw = RawTable::new(headers.iter().map(|h| h.to_string()).collect());
        for r in &self.rows {
            raw.push_row(vec![
                r.rid.to_string(),
                format_cell(r.years_bl),
                format_cell(r.diagnosis),
                format_cell(r.adas13),
                format_cell(r.ventricles_icv),
                format_cell(r.ventricles),
                format_cell(r.icv_bl),
            ]);
        }
        raw
    }
}

/// Last observed value of `feature` in visit order.
pub fn last_observed(visits: &[VisitRecord], feature: Feature) -> Option<f64> {
    visits.iter().rev().find_map(|v| v.feature(feature))
}

fn format_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
