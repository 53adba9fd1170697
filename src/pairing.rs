use crate::table::{CanonicalTable, Feature, VisitRecord};

/// A visit together with the target values of the same patient's next visit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairRow {
    pub visit: VisitRecord,
    pub future_diagnosis: Option<f64>,
    pub future_adas13: Option<f64>,
    pub future_ventricles_icv: Option<f64>,
}

impl PairRow {
    pub fn future(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Diagnosis => self.future_diagnosis,
            Feature::Adas13 => self.future_adas13,
            Feature::VentriclesIcv => self.future_ventricles_icv,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairTable {
    rows: Vec<PairRow>,
}

impl PairTable {
    pub fn rows(&self) -> &[PairRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn observed(&self, feature: Feature) -> usize {
        self.rows
            .iter()
            .filter(|r| r.future(feature).is_some())
            .count()
    }
}

/// Shifts the target columns one row up and drops every patient's last
/// visit, so no future value crosses a patient boundary. Equal Years_bl keep
/// input order; the later input row counts as the last visit.
pub fn set_futures(table: &CanonicalTable) -> PairTable {
    let rows = table
        .rows()
        .windows(2)
        .filter(|w| w[0].rid == w[1].rid)
        .map(|w| PairRow {
            visit: w[0],
            future_diagnosis: w[1].diagnosis,
            future_adas13: w[1].adas13,
            future_ventricles_icv: w[1].ventricles_icv,
        })
        .collect();
    PairTable { rows }
}
