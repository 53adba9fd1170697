use anyhow::Result;
use std::fs;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage0Scaffold;

impl Stage0Scaffold {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage0Scaffold {
    fn name(&self) -> &'static str {
        "stage0_scaffold"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        fs::create_dir_all(&ctx.output.out_dir)?;
        info!(
            out_dir = %ctx.output.out_dir.display(),
            "output_dir_ready"
        );

        ctx.report.input_meta.train = ctx.train_path.display().to_string();
        ctx.report.input_meta.input = ctx.input_path.as_ref().map(|p| p.display().to_string());
        ctx.report.input_meta.as_of = ctx.as_of.map(|d| d.format("%Y-%m-%d").to_string());

        Ok(())
    }
}
