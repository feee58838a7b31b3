//! CLI entry point for the bike-share traffic tool.
//!
//! Loads station and trip data, runs the traffic pipeline for one time
//! selection or sweeps every slider position, and writes the frames as CSV.

use anyhow::{Result, bail};
use bikeshare_traffic::{
    config::{DataConfig, log_file_path},
    controller::{Controller, Event, TrafficContext},
    output::{CsvRenderer, append_frame, print_json},
    selection::{SLIDER_STEP_MINUTES, TimeSelection, slider_positions},
    source::{DataSource, FileSource, load_all, load_event},
    stats::TrafficSummary,
};
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_traffic")]
#[command(about = "Per-station bike-share traffic by time of day", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DataArgs {
    /// Station JSON file (overrides BIKESHARE_STATIONS)
    #[arg(long)]
    stations: Option<PathBuf>,

    /// Trip CSV file (overrides BIKESHARE_TRIPS)
    #[arg(long)]
    trips: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute station traffic for a single time selection
    Snapshot {
        #[command(flatten)]
        data: DataArgs,

        /// Minute of day, HH:MM, or "any"/-1 for no filter
        #[arg(short, long, default_value = "any", allow_hyphen_values = true)]
        time: TimeSelection,

        /// CSV file to append the frame to
        #[arg(short, long, default_value = "traffic.csv")]
        output: String,

        /// Log the frame as JSON instead of writing CSV
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Compute station traffic for every slider position
    Sweep {
        #[command(flatten)]
        data: DataArgs,

        /// Minutes between slider positions
        #[arg(short, long, default_value_t = SLIDER_STEP_MINUTES)]
        step: u16,

        /// CSV file to append all frames to
        #[arg(short, long, default_value = "sweep.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = log_file_path();
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_traffic.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Snapshot {
            data,
            time,
            output,
            json,
        } => {
            let source = file_source(data);
            snapshot(&source, time, &output, json).await?;
        }
        Commands::Sweep { data, step, output } => {
            let source = file_source(data);
            sweep(&source, step, &output).await?;
        }
    }

    Ok(())
}

fn file_source(data: DataArgs) -> FileSource {
    let config = DataConfig::from_env().with_overrides(data.stations, data.trips);
    info!(
        stations = %config.stations_path.display(),
        trips = %config.trips_path.display(),
        "Using data files"
    );
    FileSource::new(config.stations_path, config.trips_path)
}

/// Runs one pipeline pass and writes the frame.
#[tracing::instrument(skip(source, selection), fields(selection = %selection))]
async fn snapshot<S: DataSource>(
    source: &S,
    selection: TimeSelection,
    output: &str,
    json: bool,
) -> Result<()> {
    let (stations, trips) = load_all(source).await?;
    let context = TrafficContext::new(stations, trips);
    if context.is_empty() {
        warn!("No stations or trips loaded, frame will be empty");
    }

    let frame = context.frame(selection);
    let summary = TrafficSummary::from_frame(&frame);
    info!(
        label = %frame.label,
        trips = summary.trips_considered,
        busiest = summary.busiest_station.as_deref().unwrap_or("-"),
        busiest_traffic = summary.busiest_traffic,
        matched_pct = summary.matched_endpoints_pct,
        "Frame computed"
    );

    if json {
        print_json(&frame)?;
    } else {
        append_frame(output, &frame)?;
        info!(output, rows = frame.stations.len(), "Frame written");
    }
    Ok(())
}

/// Feeds every slider position through the controller, as the slider would.
#[tracing::instrument(skip(source))]
async fn sweep<S: DataSource>(source: &S, step: u16, output: &str) -> Result<()> {
    if step == 0 {
        bail!("--step must be at least 1 minute");
    }

    let mut controller = Controller::new(CsvRenderer::new(output));
    let event = load_event(source).await;
    let failed = matches!(event, Event::LoadFailed(_));
    controller.handle(event)?;
    if failed {
        bail!("Could not load traffic data, see log for details");
    }

    if controller.context().is_empty() {
        warn!("No stations or trips loaded, sweep frames will be empty");
    }

    // Loading already drew the unfiltered frame.
    for selection in slider_positions(step)
        .into_iter()
        .filter(|s| s.is_active())
    {
        controller.handle(Event::SelectionChanged(selection))?;

        if let Some(frame) = controller.last_frame() {
            let summary = TrafficSummary::from_frame(frame);
            info!(
                label = %frame.label,
                trips = summary.trips_considered,
                busiest = summary.busiest_station.as_deref().unwrap_or("-"),
                "Slider position processed"
            );
        }
    }

    info!(
        output,
        frames = controller.renderer().frames_written(),
        "Sweep complete"
    );
    Ok(())
}
