use kinemix::SeriesId;
use kinemix_persistence::fixtures;
use kinemix_persistence::StoreSummary;
use std::path::Path;
use tracing::info;

use crate::error::ToolError;

/// Writes a synthetic kinematics store. Output depends only on the arguments.
pub fn run(
    output: &Path,
    series: SeriesId,
    events: u64,
    tracks_per_event: u32,
    seed: u64,
) -> Result<StoreSummary, ToolError> {
    if output.as_os_str().is_empty() {
        return Err(ToolError::InvalidArgument("output path is empty".into()));
    }

    let summary = fixtures::write_synthetic_store(output, series, events, tracks_per_event, seed)?;
    info!(seed, tracks_per_event, "generated {} events into {}", summary.entries, output.display());

    println!(
        "Wrote {} events ({} bytes) to {}",
        summary.entries,
        summary.bytes_written,
        summary.path.display()
    );
    Ok(summary)
}
