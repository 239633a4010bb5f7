use crate::error::ToolError;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use kinemix::{MixConfig, MixReport, Mixer, Ratio, SeriesId, Source};
use kinemix_persistence::{StoreReader, StoreWriter};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments of one `kmix mix` invocation.
#[derive(Debug, Clone)]
pub struct MixArgs {
    pub input_a: PathBuf,
    pub input_b: PathBuf,
    pub output: PathBuf,
    pub ratio: i64,
    pub series: SeriesId,
    /// Open the inputs and compute the result without creating the output.
    pub dry_run: bool,
}

impl MixArgs {
    pub fn new(
        input_a: impl Into<PathBuf>,
        input_b: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        ratio: i64,
    ) -> Self {
        Self {
            input_a: input_a.into(),
            input_b: input_b.into(),
            output: output.into(),
            ratio,
            series: SeriesId::default(),
            dry_run: false,
        }
    }

    /// Checks everything that can be checked without touching the filesystem.
    pub fn validate(&self) -> Result<MixConfig, ToolError> {
        for (name, path) in [
            ("first input", &self.input_a),
            ("second input", &self.input_b),
            ("output", &self.output),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ToolError::InvalidArgument(format!("{name} path is empty")));
            }
        }

        Ok(MixConfig {
            ratio: Ratio::new(self.ratio)?,
            series: self.series.clone(),
        })
    }
}

/// Interleaves the two input stores into a new output store.
///
/// Nothing is created unless both inputs open and hold the series.
pub fn run(args: &MixArgs) -> Result<MixReport, ToolError> {
    let config = args.validate()?;

    let mut a = StoreReader::open(&args.input_a, &config.series)?;
    let mut b = StoreReader::open(&args.input_b, &config.series)?;
    info!("found {} events in {}", a.count(), args.input_a.display());
    info!("found {} events in {}", b.count(), args.input_b.display());

    if args.dry_run {
        let report = Mixer::plan(config.ratio, a.count(), b.count()).summarize();
        info!("dry run: would generate {} events", report.produced);
        return Ok(report);
    }

    for input in [&args.input_a, &args.input_b] {
        if same_file(input, &args.output) {
            return Err(ToolError::InvalidArgument(format!(
                "output {} would overwrite an input",
                args.output.display()
            )));
        }
    }

    let mut writer = StoreWriter::create(&args.output, config.series.clone())?;
    let mut mixer = Mixer::for_sources(config.ratio, &a, &b);
    let report = mixer.run(&mut a, &mut b, &mut writer)?;
    a.close();
    b.close();
    writer.finalize()?;

    info!(
        ratio = config.ratio.get(),
        from_a = report.taken_a,
        from_b = report.taken_b,
        "generated {} events",
        report.produced
    );
    Ok(report)
}

/// True when both paths name the same existing file, hard links included.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Serializable view of a [`MixReport`].
#[derive(Debug, Serialize)]
pub struct MixSummary {
    pub ratio: u32,
    pub produced: u64,
    pub taken_a: u64,
    pub taken_b: u64,
    pub available_a: u64,
    pub available_b: u64,
    pub exhausted: String,
    pub dry_run: bool,
}

impl MixSummary {
    pub fn new(report: &MixReport, dry_run: bool) -> Self {
        Self {
            ratio: report.ratio.get(),
            produced: report.produced,
            taken_a: report.taken_a,
            taken_b: report.taken_b,
            available_a: report.available_a,
            available_b: report.available_b,
            exhausted: report.exhausted.to_string(),
            dry_run,
        }
    }
}

pub fn print_report(report: &MixReport, dry_run: bool, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&MixSummary::new(report, dry_run))?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Input", "Available", "Mixed", "Left over"]);

    for (name, source, available, taken) in [
        ("A", Source::A, report.available_a, report.taken_a),
        ("B", Source::B, report.available_b, report.taken_b),
    ] {
        table.add_row(vec![
            name.to_string(),
            available.to_string(),
            taken.to_string(),
            report.left_over(source).to_string(),
        ]);
    }

    let verb = if dry_run { "Would generate" } else { "Generated" };
    println!(
        "\n{verb} {} events at ratio {} (1 of type 1, then {} of type 2)",
        report.produced,
        report.ratio,
        report.ratio.get() - 1
    );
    println!("Stopped: no more events of type {}\n", report.exhausted.event_type());
    println!("{table}\n");
    Ok(())
}
