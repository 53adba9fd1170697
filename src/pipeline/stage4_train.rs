use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::forecast::TrainSummary;
use crate::pipeline::Stage;
use crate::schema::v1::Training;

pub struct Stage4Train;

impl Stage4Train {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Train {
    fn name(&self) -> &'static str {
        "stage4_train"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let raw = ctx.raw_train.as_ref().context("training table not loaded")?;
        let canonical = ctx.canonical.as_ref().context("canonical table missing")?;
        let pairs = ctx.pairs.as_ref().context("pair table missing")?;

        let target_rows = ctx.forecaster.fit_pairs(pairs)?;
        let summary = TrainSummary::new(raw.len(), canonical, pairs, target_rows);
        ctx.report.training = Some(Training {
            summary,
            params: *ctx.forecaster.params(),
        });
        ctx.train_summary = Some(summary);
        Ok(())
    }
}
