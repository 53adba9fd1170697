use kira_progression::preprocess::{derive_ratio, preprocess, remap_dxchange};
use kira_progression::table::RawTable;

fn dxchange_table() -> RawTable {
    RawTable::from_str_rows(
        &["RID", "Years_bl", "DXCHANGE", "ADAS13", "Ventricles", "ICV_bl", "PTGENDER"],
        &[
            &["2", "1.0", "5", "20", "30000", "1500000", "Male"],
            &["1", "0.5", "7", "11", "20000", "1000000", "Female"],
            &["1", "0.0", "4", "10", "18000", "1000000", "Female"],
            &["2", "0.0", "2", "18", "29000", "1500000", "Male"],
        ],
    )
}

#[test]
fn dxchange_codes_collapse_to_destination_class() {
    assert_eq!(remap_dxchange(4.0), 2.0);
    assert_eq!(remap_dxchange(5.0), 3.0);
    assert_eq!(remap_dxchange(6.0), 3.0);
    assert_eq!(remap_dxchange(7.0), 1.0);
    assert_eq!(remap_dxchange(8.0), 2.0);
    assert_eq!(remap_dxchange(9.0), 1.0);
    assert_eq!(remap_dxchange(1.0), 1.0);
    assert_eq!(remap_dxchange(3.0), 3.0);
    assert_eq!(remap_dxchange(4.5), 4.5);
}

#[test]
fn rows_sorted_by_patient_then_time() {
    let table = preprocess(&dxchange_table()).unwrap();
    let order: Vec<(i64, Option<f64>)> = table.rows().iter().map(|r| (r.rid, r.years_bl)).collect();
    assert_eq!(
        order,
        vec![(1, Some(0.0)), (1, Some(0.5)), (2, Some(0.0)), (2, Some(1.0))]
    );
    let dx: Vec<Option<f64>> = table.rows().iter().map(|r| r.diagnosis).collect();
    assert_eq!(dx, vec![Some(2.0), Some(1.0), Some(2.0), Some(3.0)]);
}

#[test]
fn unified_diagnosis_is_not_remapped() {
    let raw = RawTable::from_str_rows(
        &["RID", "Years_bl", "Diagnosis", "DXCHANGE", "ADAS13", "Ventricles_ICV"],
        &[&["1", "0", "3", "5", "12", "0.02"]],
    );
    let table = preprocess(&raw).unwrap();
    assert_eq!(table.rows()[0].diagnosis, Some(3.0));

    let raw = RawTable::from_str_rows(
        &["RID", "Years_bl", "Diagnosis", "ADAS13", "Ventricles_ICV"],
        &[&["1", "0", "7", "12", "0.02"]],
    );
    let table = preprocess(&raw).unwrap();
    assert_eq!(table.rows()[0].diagnosis, Some(7.0));
}

#[test]
fn ratio_derived_when_absent() {
    let table = preprocess(&dxchange_table()).unwrap();
    let first = table.rows()[0];
    assert!((first.ventricles_icv.unwrap() - 0.018).abs() < 1e-12);
    assert_eq!(first.ventricles, Some(18000.0));
    assert_eq!(first.icv_bl, Some(1000000.0));
}

#[test]
fn ratio_division_edge_cases_are_missing() {
    assert_eq!(derive_ratio(Some(3.0), Some(4.0)), Some(0.75));
    assert_eq!(derive_ratio(Some(3.0), Some(0.0)), None);
    assert_eq!(derive_ratio(None, Some(4.0)), None);
    assert_eq!(derive_ratio(Some(3.0), None), None);

    let raw = RawTable::from_str_rows(
        &["RID", "Years_bl", "Diagnosis", "ADAS13", "Ventricles", "ICV_bl"],
        &[
            &["1", "0", "1", "10", "20000", "0"],
            &["1", "1", "1", "10", "", "1000000"],
            &["1", "2", "1", "10", "n/a", "1000000"],
        ],
    );
    let table = preprocess(&raw).unwrap();
    assert!(table.rows().iter().all(|r| r.ventricles_icv.is_none()));
}

#[test]
fn provided_ratio_is_kept() {
    let raw = RawTable::from_str_rows(
        &["RID", "Years_bl", "Diagnosis", "ADAS13", "Ventricles_ICV", "Ventricles", "ICV_bl"],
        &[&["1", "0", "1", "10", "0.5", "1", "4"]],
    );
    let table = preprocess(&raw).unwrap();
    assert_eq!(table.rows()[0].ventricles_icv, Some(0.5));
}

#[test]
fn non_numeric_cells_become_missing() {
    let raw = RawTable::from_str_rows(
        &["RID", "Years_bl", "Diagnosis", "ADAS13", "Ventricles_ICV"],
        &[
            &["1", "0", "MCI", " 12.5 ", "NaN"],
            &["1", "1", "2", "", "inf"],
        ],
    );
    let table = preprocess(&raw).unwrap();
    let rows = table.rows();
    assert_eq!(rows[0].diagnosis, None);
    assert_eq!(rows[0].adas13, Some(12.5));
    assert_eq!(rows[0].ventricles_icv, None);
    assert_eq!(rows[1].diagnosis, Some(2.0));
    assert_eq!(rows[1].adas13, None);
    assert_eq!(rows[1].ventricles_icv, None);
}

#[test]
fn short_rows_and_absent_columns_read_as_missing() {
    let raw = RawTable::from_str_rows(
        &["RID", "Years_bl", "Diagnosis"],
        &[&["1", "0", "1"], &["1", "1"]],
    );
    let table = preprocess(&raw).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[1].diagnosis, None);
    assert!(table.rows().iter().all(|r| r.adas13.is_none()));
    assert!(table.rows().iter().all(|r| r.ventricles_icv.is_none()));
}

#[test]
fn unreadable_patient_ids_are_skipped() {
    let raw = RawTable::from_str_rows(
        &["RID", "Years_bl", "Diagnosis"],
        &[&["1", "0", "1"], &["", "0", "2"], &["abc", "1", "2"], &["3.0", "0", "3"]],
    );
    let table = preprocess(&raw).unwrap();
    let rids: Vec<i64> = table.rows().iter().map(|r| r.rid).collect();
    assert_eq!(rids, vec![1, 3]);
}

#[test]
fn missing_rid_column_is_an_error() {
    let raw = RawTable::from_str_rows(&["PTID", "Years_bl"], &[&["011_S_0002", "0"]]);
    let err = preprocess(&raw).unwrap_err();
    assert!(err.to_string().contains("RID"));
}

#[test]
fn missing_years_sort_last_within_patient() {
    let raw = RawTable::from_str_rows(
        &["RID", "Years_bl", "Diagnosis"],
        &[&["1", "", "3"], &["1", "2", "2"], &["1", "0", "1"]],
    );
    let table = preprocess(&raw).unwrap();
    let dx: Vec<Option<f64>> = table.rows().iter().map(|r| r.diagnosis).collect();
    assert_eq!(dx, vec![Some(1.0), Some(2.0), Some(3.0)]);
}

#[test]
fn preprocess_is_idempotent() {
    let once = preprocess(&dxchange_table()).unwrap();
    let twice = preprocess(&once.to_raw()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn input_table_is_left_untouched() {
    let raw = dxchange_table();
    let before = raw.clone();
    let _ = preprocess(&raw).unwrap();
    assert_eq!(raw, before);
}
