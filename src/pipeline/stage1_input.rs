use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::csv_reader::read_table;
use crate::pipeline::Stage;

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        info!(train = %ctx.train_path.display(), "input_files");
        let raw = read_table(&ctx.train_path).with_context(|| {
            format!("failed to read training table {}", ctx.train_path.display())
        })?;
        ctx.raw_train = Some(raw);
        Ok(())
    }
}
