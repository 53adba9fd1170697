use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use tracing::info;

use crate::io::open_maybe_gz;
use crate::table::RawTable;

/// Reads a delimited visit table with a header row. Rows may be shorter or
/// longer than the header; missing trailing cells read as empty.
pub fn read_table(path: &Path) -> Result<RawTable> {
    let reader = open_maybe_gz(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .with_context(|| format!("failed to read header of {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();
    if headers.iter().all(|h| h.is_empty()) {
        bail!("{} has no header row", path.display());
    }

    let mut table = RawTable::new(headers);
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("{}: bad record {}", path.display(), i + 1))?;
        table.push_row(record.iter().map(str::to_string).collect());
    }

    if table.is_empty() {
        bail!("{} contains no visit rows", path.display());
    }
    info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers.len(),
        "table_loaded"
    );
    Ok(table)
}
