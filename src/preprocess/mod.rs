use std::cmp::Ordering;

use anyhow::Result;
use tracing::debug;

use crate::table::{
    CanonicalTable, DiagnosisSource, InputSchema, RatioSource, RawTable, VisitRecord,
    coerce_f64, coerce_patient_id,
};

pub fn preprocess(raw: &RawTable) -> Result<CanonicalTable> {
    let schema = InputSchema::detect(&raw.headers)?;
    debug!(
        diagnosis = ?schema.diagnosis,
        ratio = ?schema.ratio,
        rows = raw.len(),
        "input schema"
    );

    let numeric = |row: usize, col: Option<usize>| col.and_then(|c| coerce_f64(raw.cell(row, c)));

    let mut visits = Vec::with_capacity(raw.len());
    let mut skipped = 0usize;
    for row in 0..raw.len() {
        let Some(rid) = coerce_patient_id(raw.cell(row, schema.rid)) else {
            skipped += 1;
            continue;
        };

        let diagnosis = match schema.diagnosis {
            DiagnosisSource::Unified(col) => numeric(row, Some(col)),
            DiagnosisSource::DxChange(col) => numeric(row, Some(col)).map(remap_dxchange),
            DiagnosisSource::Absent => None,
        };
        let ventricles = numeric(row, schema.ventricles);
        let icv_bl = numeric(row, schema.icv_bl);
        let ventricles_icv = match schema.ratio {
            RatioSource::Provided(col) => numeric(row, Some(col)),
            RatioSource::Derived => derive_ratio(ventricles, icv_bl),
        };

        visits.push(VisitRecord {
            rid,
            years_bl: numeric(row, schema.years_bl),
            diagnosis,
            adas13: numeric(row, schema.adas13),
            ventricles_icv,
            ventricles,
            icv_bl,
        });
    }

    if skipped > 0 {
        debug!(skipped, "rows without a readable RID were skipped");
    }

    // Stable: visits sharing a Years_bl keep their input order.
    visits.sort_by(|a, b| {
        a.rid
            .cmp(&b.rid)
            .then_with(|| cmp_years(a.years_bl, b.years_bl))
    });

    Ok(CanonicalTable::from_sorted(visits))
}

/// Collapses DXCHANGE conversion codes into their destination class
/// (1 = CN, 2 = MCI, 3 = AD).
pub fn remap_dxchange(code: f64) -> f64 {
    if code.fract() != 0.0 {
        return code;
    }
    match code as i64 {
        4 | 8 => 2.0,
        5 | 6 => 3.0,
        7 | 9 => 1.0,
        _ => code,
    }
}

pub fn derive_ratio(ventricles: Option<f64>, icv_bl: Option<f64>) -> Option<f64> {
    match (ventricles, icv_bl) {
        (Some(v), Some(c)) if c != 0.0 => Some(v / c).filter(|r| r.is_finite()),
        _ => None,
    }
}

// Missing Years_bl sorts after every observed one.
fn cmp_years(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
