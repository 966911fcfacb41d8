use std::path::Path;

use anyhow::{Context, Result};
use parlamento_core::{ScheduleRecord, decode_records};

/// Read a saved events API payload.
pub fn load(path: &Path) -> Result<Vec<ScheduleRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read records from {}", path.display()))?;

    let records = decode_records(&content)
        .with_context(|| format!("Invalid records in {}", path.display()))?;

    Ok(records)
}
