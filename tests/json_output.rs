use kira_progression::ctx::Ctx;
use kira_progression::forecast::{Forecast, PatientForecast, TrainSummary};
use kira_progression::io::json_writer::build_report;
use kira_progression::model::{ModelParams, TargetRows};

#[test]
fn json_report_populated() {
    let mut ctx = Ctx::new(
        std::path::PathBuf::from("train.csv"),
        Some(std::path::PathBuf::from("input.csv")),
        std::path::PathBuf::from("out"),
        chrono::NaiveDate::from_ymd_opt(2018, 1, 1),
        true,
        true,
        ModelParams::default(),
        "0.0.0-test",
    );
    ctx.train_summary = Some(TrainSummary {
        visits: 10,
        skipped_rows: 1,
        patients: 3,
        pair_rows: 7,
        target_rows: TargetRows {
            diagnosis: 7,
            adas13: 6,
            ventricles_icv: 5,
        },
    });
    ctx.forecasts = vec![PatientForecast {
        rid: 4,
        forecast: Forecast {
            cn_probability: 0.5,
            mci_probability: 0.3,
            ad_probability: 0.2,
            adas13: 14.0,
            adas13_lower: 0.0,
            adas13_upper: 0.0,
            ventricles_icv: 0.02,
            ventricles_icv_lower: 0.0,
            ventricles_icv_upper: 0.0,
        },
    }];
    ctx.warnings.push("RID 9: no observed ADAS13 value in patient history".to_string());

    let report = build_report(&ctx).unwrap();
    let json = serde_json::to_value(report).unwrap();

    assert_eq!(json["tool"], "kira-progression");
    assert_eq!(json["schema_version"], "v1");
    assert_eq!(json["input_meta"]["as_of"], "2018-01-01");
    assert_eq!(json["input_meta"]["input"], "input.csv");
    assert_eq!(json["training"]["summary"]["pair_rows"], 7);
    assert_eq!(json["training"]["summary"]["target_rows"]["adas13"], 6);
    assert_eq!(json["training"]["params"]["max_iterations"], 100);
    assert_eq!(json["forecasts"][0]["RID"], 4);
    assert_eq!(json["forecasts"][0]["CN relative probability"], 0.5);
    assert_eq!(json["forecasts"][0]["Ventricles_ICV 50% CI upper"], 0.0);
    assert!(json["warnings"].is_array());
}

#[test]
fn json_report_requires_training() {
    let ctx = Ctx::new(
        std::path::PathBuf::from("train.csv"),
        None,
        std::path::PathBuf::from("out"),
        None,
        true,
        false,
        ModelParams::default(),
        "0.0.0-test",
    );
    assert!(build_report(&ctx).is_err());
}

