use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::preprocess::preprocess;

pub struct Stage2Preprocess;

impl Stage2Preprocess {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Preprocess {
    fn name(&self) -> &'static str {
        "stage2_preprocess"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let raw = ctx.raw_train.as_ref().context("training table not loaded")?;
        let canonical = preprocess(raw)?;
        if canonical.is_empty() {
            bail!("training table has no rows with a readable RID");
        }

        let skipped = raw.len() - canonical.len();
        if skipped > 0 {
            warn!(skipped, "training rows without RID dropped");
            ctx.warnings
                .push(format!("{} training rows without a readable RID were skipped", skipped));
        }
        info!(
            visits = canonical.len(),
            patients = canonical.patient_count(),
            "canonical_table_ready"
        );
        ctx.canonical = Some(canonical);
        Ok(())
    }
}
