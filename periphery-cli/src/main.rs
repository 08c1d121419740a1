use anyhow::Result;
use clap::{Parser, Subcommand};
use periphery_cli::{commands, input};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "periphery-cli")]
#[command(about = "Compute envelopes and replay synchronized track gestures")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the min/max envelope of an observation file
    Envelope {
        #[arg(long, short)]
        input: PathBuf,

        /// Track config supplying window and slide
        #[arg(long, short)]
        config: Option<PathBuf>,

        #[arg(long)]
        window_ms: Option<i64>,

        #[arg(long)]
        slide_ms: Option<i64>,
    },
    /// Partition observations into focus and context panels
    Panels {
        #[arg(long, short)]
        input: PathBuf,

        #[arg(long, short)]
        config: PathBuf,
    },
    /// Replay recorded zoom gestures across several tracks
    Replay {
        #[arg(long, short)]
        config: PathBuf,

        #[arg(long, short)]
        gestures: PathBuf,

        #[arg(long, default_value = "2")]
        tracks: u32,
    },
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Envelope {
            input: observations_path,
            config,
            window_ms,
            slide_ms,
        } => {
            let mut track = match config {
                Some(path) => input::load_config(&path)?.track,
                None => shared::TrackConfig::default(),
            };
            if let Some(window) = window_ms {
                track.window_size_ms = window;
            }
            if let Some(slide) = slide_ms {
                track.slide_ms = slide;
            }
            track.validate()?;
            let observations = input::load_observations(&observations_path)?;
            print_json(&commands::envelope(&observations, &track)?)
        }
        Commands::Panels {
            input: observations_path,
            config,
        } => {
            let config = input::load_config(&config)?;
            let observations = input::load_observations(&observations_path)?;
            print_json(&commands::panels(&observations, &config)?)
        }
        Commands::Replay {
            config,
            gestures,
            tracks,
        } => {
            let config = input::load_config(&config)?;
            let steps = input::load_gestures(&gestures)?;
            log::info!("replaying {} step(s) across {tracks} track(s)", steps.len());
            print_json(&commands::replay(&config, &steps, tracks)?)
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
