use anyhow::{Result, anyhow};

use crate::ctx::Ctx;

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let version = env!("CARGO_PKG_VERSION");
    let summary = ctx
        .train_summary
        .as_ref()
        .ok_or_else(|| anyhow!("training summary missing"))?;

    let mut out = String::new();
    out.push_str(&format!("kira-progression v{}\n", version));
    out.push_str(&format!(
        "Training: {} visits, {} patients, {} pairs\n",
        summary.visits, summary.patients, summary.pair_rows
    ));
    out.push_str(&format!(
        "Fitted rows: diagnosis={} adas13={} ventricles_icv={}\n",
        summary.target_rows.diagnosis,
        summary.target_rows.adas13,
        summary.target_rows.ventricles_icv
    ));
    if summary.skipped_rows > 0 {
        out.push_str(&format!("Skipped rows: {}\n", summary.skipped_rows));
    }
    out.push_str(&format!("Forecasts: {}\n", ctx.forecasts.len()));

    if let [pf] = ctx.forecasts.as_slice() {
        let [cn, mci, ad] = pf.forecast.diagnosis_probabilities();
        out.push_str(&format!(
            "RID {}: CN={:.3} MCI={:.3} AD={:.3} ADAS13={:.2} Ventricles_ICV={:.4}\n",
            pf.rid, cn, mci, ad, pf.forecast.adas13, pf.forecast.ventricles_icv
        ));
    }

    Ok(out)
}
