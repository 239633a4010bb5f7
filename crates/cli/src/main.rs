use clap::{Args, Parser, Subcommand};
use kinemix::config::{DEFAULT_BRANCH, DEFAULT_TREE};
use kinemix::SeriesId;
use kinemix_cli::commands::{generate, inspect, mix, verify};
use kinemix_cli::{telemetry, ToolError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "kmix")]
#[command(
    about = "Interleave simulated-event kinematics stores at a fixed ratio",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which series inside a store to use.
#[derive(Args)]
struct SeriesArgs {
    /// Tree name
    #[arg(long, default_value = DEFAULT_TREE)]
    tree: String,

    /// Branch name
    #[arg(long, default_value = DEFAULT_BRANCH)]
    branch: String,
}

impl SeriesArgs {
    fn series(&self) -> SeriesId {
        SeriesId::new(self.tree.as_str(), self.branch.as_str())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Merge two stores: output position p takes from the first input when
    /// p % ratio == 0 and from the second otherwise. Stops at the first
    /// position whose input is exhausted.
    Mix {
        /// First input (event type 1)
        input_a: PathBuf,
        /// Second input (event type 2)
        input_b: PathBuf,
        /// Output store, created or truncated
        output: PathBuf,

        /// Cadence period; 1 takes every event from the first input
        #[arg(long, short, allow_negative_numbers = true)]
        ratio: i64,

        #[command(flatten)]
        series: SeriesArgs,

        /// Report what would be produced without writing the output
        #[arg(long)]
        dry_run: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show series, event and track counts of one or more stores
    Inspect {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        series: SeriesArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check every entry of a store and print its content digest
    Verify {
        path: PathBuf,

        #[command(flatten)]
        series: SeriesArgs,
    },
    /// Write a deterministic synthetic store
    Generate {
        output: PathBuf,

        /// Number of events
        #[arg(long, short)]
        events: u64,

        /// Tracks in every event
        #[arg(long, default_value_t = 10)]
        tracks_per_event: u32,

        /// Generator seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[command(flatten)]
        series: SeriesArgs,
    },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Mix {
            input_a,
            input_b,
            output,
            ratio,
            series,
            dry_run,
            json,
        } => {
            let args = mix::MixArgs {
                input_a,
                input_b,
                output,
                ratio,
                series: series.series(),
                dry_run,
            };
            let report = mix::run(&args)?;
            mix::print_report(&report, dry_run, json)
        }
        Commands::Inspect { paths, series, json } => {
            let rows = inspect::run(&paths, &series.series())?;
            inspect::print_report(&rows, json)
        }
        Commands::Verify { path, series } => {
            verify::run(&path, &series.series())?;
            Ok(())
        }
        Commands::Generate {
            output,
            events,
            tracks_per_event,
            seed,
            series,
        } => {
            generate::run(&output, series.series(), events, tracks_per_event, seed)?;
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    telemetry::init_telemetry();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let code = err.downcast_ref::<ToolError>().map_or(1, ToolError::exit_code);
            ExitCode::from(code)
        }
    }
}
