use kira_progression::pairing::set_futures;
use kira_progression::preprocess::preprocess;
use kira_progression::table::{Feature, RawTable};

const HEADERS: &[&str] = &["RID", "Years_bl", "Diagnosis", "ADAS13", "Ventricles_ICV"];

#[test]
fn three_visit_patient_yields_two_pairs() {
    let raw = RawTable::from_str_rows(
        HEADERS,
        &[
            &["1", "2", "2", "15", "0.35"],
            &["1", "0", "1", "10", "0.3"],
            &["1", "1", "1", "12", "0.32"],
        ],
    );
    let pairs = set_futures(&preprocess(&raw).unwrap());
    assert_eq!(pairs.len(), 2);

    let first = pairs.rows()[0];
    assert_eq!(first.visit.years_bl, Some(0.0));
    assert_eq!(first.future_diagnosis, Some(1.0));
    assert_eq!(first.future_adas13, Some(12.0));
    assert_eq!(first.future_ventricles_icv, Some(0.32));

    let second = pairs.rows()[1];
    assert_eq!(second.visit.years_bl, Some(1.0));
    assert_eq!(second.future_diagnosis, Some(2.0));
    assert_eq!(second.future_adas13, Some(15.0));
    assert_eq!(second.future_ventricles_icv, Some(0.35));
}

#[test]
fn one_row_dropped_per_patient() {
    let raw = RawTable::from_str_rows(
        HEADERS,
        &[
            &["1", "0", "1", "10", "0.02"],
            &["1", "1", "1", "11", "0.021"],
            &["1", "2", "2", "12", "0.022"],
            &["2", "0", "2", "20", "0.03"],
            &["2", "0.5", "3", "24", "0.031"],
            &["3", "0", "1", "8", "0.01"],
            &["3", "1", "1", "9", "0.011"],
            &["3", "2", "1", "9", "0.012"],
            &["3", "3", "2", "13", "0.013"],
        ],
    );
    let canonical = preprocess(&raw).unwrap();
    let pairs = set_futures(&canonical);
    assert_eq!(pairs.len(), canonical.len() - canonical.patient_count());

    for (rid, visits) in canonical.patients() {
        let latest = visits.last().unwrap().years_bl;
        assert!(
            !pairs
                .rows()
                .iter()
                .any(|p| p.visit.rid == rid && p.visit.years_bl == latest)
        );
        let kept = pairs.rows().iter().filter(|p| p.visit.rid == rid).count();
        assert_eq!(kept, visits.len() - 1);
    }
}

#[test]
fn futures_never_cross_patients() {
    let raw = RawTable::from_str_rows(
        HEADERS,
        &[
            &["1", "0", "1", "10", "0.02"],
            &["1", "1", "2", "11", "0.021"],
            &["2", "0", "3", "40", "0.05"],
            &["2", "1", "3", "42", "0.051"],
        ],
    );
    let pairs = set_futures(&preprocess(&raw).unwrap());
    for p in pairs.rows() {
        if p.visit.rid == 1 {
            assert_eq!(p.future_adas13, Some(11.0));
        } else {
            assert_eq!(p.future_adas13, Some(42.0));
        }
    }
}

#[test]
fn single_visit_patient_contributes_nothing() {
    let raw = RawTable::from_str_rows(
        HEADERS,
        &[
            &["1", "0", "1", "10", "0.02"],
            &["2", "0", "2", "20", "0.03"],
            &["2", "1", "2", "21", "0.031"],
            &["3", "0", "3", "30", "0.04"],
        ],
    );
    let pairs = set_futures(&preprocess(&raw).unwrap());
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs.rows()[0].visit.rid, 2);
}

#[test]
fn missing_next_values_stay_missing() {
    let raw = RawTable::from_str_rows(
        HEADERS,
        &[&["1", "0", "1", "10", "0.02"], &["1", "1", "", "11", ""]],
    );
    let pairs = set_futures(&preprocess(&raw).unwrap());
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs.observed(Feature::Diagnosis), 0);
    assert_eq!(pairs.observed(Feature::Adas13), 1);
    assert_eq!(pairs.observed(Feature::VentriclesIcv), 0);
}

#[test]
fn tied_visit_times_keep_input_order() {
    let raw = RawTable::from_str_rows(
        HEADERS,
        &[
            &["1", "0", "1", "10", "0.02"],
            &["1", "1", "1", "11", "0.021"],
            &["1", "1", "2", "12", "0.022"],
        ],
    );
    let pairs = set_futures(&preprocess(&raw).unwrap());
    assert_eq!(pairs.len(), 2);
    // The later input row among the ties is the one treated as last.
    assert_eq!(pairs.rows()[1].visit.adas13, Some(11.0));
    assert_eq!(pairs.rows()[1].future_adas13, Some(12.0));
}

#[test]
fn empty_table_has_no_pairs() {
    let raw = RawTable::from_str_rows(HEADERS, &[]);
    let pairs = set_futures(&preprocess(&raw).unwrap());
    assert!(pairs.is_empty());
}
