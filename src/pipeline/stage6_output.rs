use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::io::{self, json_writer, tsv_writer};
use crate::pipeline::Stage;

pub struct Stage6Output;

impl Stage6Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage6Output {
    fn name(&self) -> &'static str {
        "stage6_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let report = json_writer::build_report(ctx)?;
        ctx.report = report;

        if ctx.write_json {
            io::write_json(&ctx.output.json_path, &ctx.report)?;
            info!(path = %ctx.output.json_path.display(), "json_written");
        }
        if ctx.write_tsv {
            tsv_writer::write_tsv(&ctx.output.tsv_path, ctx)?;
            info!(path = %ctx.output.tsv_path.display(), "tsv_written");
        }

        info!("stage6_output_ready");
        Ok(())
    }
}
