use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use kinemix::SeriesId;
use kinemix_persistence::StoreReader;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::ToolError;

/// One row of the inspect report.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub path: PathBuf,
    pub series: Option<String>,
    pub version: Option<u32>,
    pub events: Option<u64>,
    pub tracks: Option<u64>,
    /// `OK` or the error that stopped the inspection.
    pub status: String,
}

impl StoreStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// Reads every store in `paths` end to end and reports what it holds.
/// A broken store becomes a row with its error, not a failure of the command.
pub fn run(paths: &[PathBuf], series: &SeriesId) -> Result<Vec<StoreStatus>, ToolError> {
    if paths.is_empty() {
        return Err(ToolError::InvalidArgument("no store paths given".into()));
    }
    Ok(paths.iter().map(|p| inspect_one(p.clone(), series)).collect())
}

pub fn print_report(rows: &[StoreStatus], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Store", "Series", "Version", "Events", "Tracks", "Status"]);

    let dash = || "-".to_string();
    for row in rows {
        table.add_row(vec![
            row.path.display().to_string(),
            row.series.clone().unwrap_or_else(dash),
            row.version.map(|v| format!("V{v}")).unwrap_or_else(dash),
            row.events.map(|n| n.to_string()).unwrap_or_else(dash),
            row.tracks.map(|n| n.to_string()).unwrap_or_else(dash),
            row.status.clone(),
        ]);
    }

    println!("\nStore Report\n");
    println!("{table}\n");
    Ok(())
}

fn inspect_one(path: PathBuf, series: &SeriesId) -> StoreStatus {
    let mut row = StoreStatus {
        path,
        series: None,
        version: None,
        events: None,
        tracks: None,
        status: "OK".to_string(),
    };

    let reader = match StoreReader::open(&row.path, series) {
        Ok(reader) => reader,
        Err(e) => {
            row.status = e.to_string();
            return row;
        }
    };

    row.series = Some(reader.series().to_string());
    row.version = Some(reader.header().version);
    row.events = Some(reader.count());

    let mut tracks = 0u64;
    for record in reader.iter() {
        match record {
            Ok(record) => tracks += record.len() as u64,
            Err(e) => {
                row.status = e.to_string();
                return row;
            }
        }
    }
    row.tracks = Some(tracks);
    row
}
