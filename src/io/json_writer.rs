use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::schema::v1::{ForecastReportV1, InputMeta, Training};

pub fn build_report(ctx: &Ctx) -> Result<ForecastReportV1> {
    let summary = ctx.train_summary.context("training summary missing")?;

    let input_meta = InputMeta {
        train: ctx.train_path.display().to_string(),
        input: ctx.input_path.as_ref().map(|p| p.display().to_string()),
        as_of: ctx.as_of.map(|d| d.format("%Y-%m-%d").to_string()),
    };

    Ok(ForecastReportV1 {
        tool: ctx.report.tool.clone(),
        tool_version: ctx.report.tool_version.clone(),
        schema_version: ctx.report.schema_version.clone(),
        input_meta,
        training: Some(Training {
            summary,
            params: *ctx.forecaster.params(),
        }),
        forecasts: ctx.forecasts.clone(),
        warnings: ctx.warnings.clone(),
    })
}
