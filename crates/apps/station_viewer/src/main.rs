mod session;

use std::env;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scene::ViewConfig;
use scene::panel::describe;
use serde::Serialize;
use stations::StationDirectory;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless driver for the station overlay view")]
struct Args {
    /// Station feed (JSON). Defaults to $STATION_FILE, then data/stations.json
    #[arg(long)]
    stations: Option<PathBuf>,

    /// View config (JSON); missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width override (px)
    #[arg(long)]
    width: Option<f64>,

    /// Viewport height override (px)
    #[arg(long)]
    height: Option<f64>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List stations with kind and status
    List,

    /// Print the detail panel for one station
    Describe {
        /// Station id
        id: String,
    },

    /// Replay a session script and print the resulting report
    Run {
        /// Session script (JSON array of steps). Defaults to $STATION_SESSION
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct StationSummary<'a> {
    id: &'a str,
    name: &'a str,
    kind: &'a str,
    status: &'a str,
    lng: f64,
    lat: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(Args::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main(args: Args) -> Result<(), String> {
    let config = load_config(&args)?;
    let stations_path = args
        .stations
        .clone()
        .or_else(|| env::var("STATION_FILE").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data/stations.json"));
    let feed = fs::read_to_string(&stations_path)
        .map_err(|e| format!("read {stations_path:?}: {e}"))?;
    let directory = StationDirectory::from_json_str(&feed).map_err(|e| e.to_string())?;
    info!(path = ?stations_path, count = directory.len(), "stations loaded");

    match &args.command {
        Command::List => {
            let list: Vec<StationSummary<'_>> = directory
                .iter()
                .map(|s| StationSummary {
                    id: &s.id,
                    name: &s.name,
                    kind: s.kind.as_str(),
                    status: s.status.as_str(),
                    lng: s.position.lon_deg,
                    lat: s.position.lat_deg,
                })
                .collect();
            print_json(&list, args.pretty)
        }
        Command::Describe { id } => {
            let station = directory
                .get(id)
                .ok_or_else(|| format!("unknown station: {id}"))?;
            print_json(&describe(station), args.pretty)
        }
        Command::Run { script } => {
            let script_path = script
                .clone()
                .or_else(|| env::var("STATION_SESSION").ok().map(PathBuf::from))
                .ok_or_else(|| "run requires --script or STATION_SESSION".to_string())?;
            let json = fs::read_to_string(&script_path)
                .map_err(|e| format!("read {script_path:?}: {e}"))?;
            let steps = session::parse_script(&json)?;
            info!(path = ?script_path, steps = steps.len(), "replaying session");
            let report = session::run(&config, directory, &steps);
            print_json(&report, args.pretty)
        }
    }
}

fn load_config(args: &Args) -> Result<ViewConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let json =
                fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
            ViewConfig::from_json_str(&json).map_err(|e| e.to_string())?
        }
        None => ViewConfig::default(),
    };
    if let Some(w) = args.width {
        config.viewport_width_px = w;
    }
    if let Some(h) = args.height {
        config.viewport_height_px = h;
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| format!("json: {e}"))?;
    println!("{out}");
    Ok(())
}
