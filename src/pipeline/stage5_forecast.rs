use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::csv_reader::read_table;
use crate::pipeline::Stage;

pub struct Stage5Forecast;

impl Stage5Forecast {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Forecast {
    fn name(&self) -> &'static str {
        "stage5_forecast"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let Some(input) = ctx.input_path.clone() else {
            return Ok(());
        };
        let history = read_table(&input)
            .with_context(|| format!("failed to read patient histories {}", input.display()))?;
        let result = ctx.forecaster.forecast_patients(&history)?;

        info!(
            forecasts = result.forecasts.len(),
            skipped = result.warnings.len(),
            "forecasts_ready"
        );
        ctx.forecasts = result.forecasts;
        ctx.warnings.extend(result.warnings);
        Ok(())
    }
}
