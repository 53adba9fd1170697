use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::forecast::Forecast;

pub fn write_tsv(path: &Path, ctx: &Ctx) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    writeln!(w, "RID\t{}", Forecast::KEYS.join("\t"))?;
    for pf in &ctx.forecasts {
        write!(w, "{}", pf.rid)?;
        for v in pf.forecast.values() {
            write!(w, "\t{:.6}", v)?;
        }
        writeln!(w)?;
    }
    w.flush()?;

    Ok(())
}
