use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::pairing::set_futures;
use crate::pipeline::Stage;
use crate::table::Feature;

pub struct Stage3Futures;

impl Stage3Futures {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Futures {
    fn name(&self) -> &'static str {
        "stage3_futures"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let canonical = ctx.canonical.as_ref().context("canonical table missing")?;
        let pairs = set_futures(canonical);
        info!(
            pair_rows = pairs.len(),
            future_diagnosis = pairs.observed(Feature::Diagnosis),
            future_adas13 = pairs.observed(Feature::Adas13),
            future_ventricles_icv = pairs.observed(Feature::VentriclesIcv),
            "pair_table_ready"
        );
        ctx.pairs = Some(pairs);
        Ok(())
    }
}
