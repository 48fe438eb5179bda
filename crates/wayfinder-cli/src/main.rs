use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wayfinder_cli::output::OutputFormat;
use wayfinder_lib::{
    load_location_map, partial_romania_map, Error as LibError, FinderConfig, LocationMap,
};

mod commands;

use commands::find::{handle_find, FindArgs};
use commands::map::{handle_locations, handle_random, handle_sld};
use commands::route::{handle_route, RouteArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Location map routing and entity search")]
struct Cli {
    /// JSON map description; defaults to the built-in Romania road map.
    #[arg(long, global = true)]
    map: Option<PathBuf>,

    /// Finder configuration file (JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every location of the map.
    Locations,
    /// Plan a route between two locations.
    Route(RouteArgs),
    /// Straight-line distance between two placed locations.
    Sld {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
    },
    /// Pick a random destination.
    Random {
        /// Seed for a reproducible pick.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Search map entities around a position with a widening radius.
    Find(FindArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Command::Locations => handle_locations(&load_map(cli.map.as_deref())?, cli.format),
        Command::Route(args) => handle_route(&load_map(cli.map.as_deref())?, args, cli.format),
        Command::Sld { from, to } => {
            handle_sld(&load_map(cli.map.as_deref())?, from, to, cli.format)
        }
        Command::Random { seed } => {
            handle_random(&load_map(cli.map.as_deref())?, *seed, cli.format)
        }
        Command::Find(args) => handle_find(args, &load_config(cli.config.as_deref())?, cli.format),
    }
}

fn load_map(path: Option<&Path>) -> Result<LocationMap> {
    match path {
        Some(path) => load_location_map(path)
            .with_context(|| format!("failed to load map from {}", path.display())),
        None => Ok(partial_romania_map()),
    }
}

fn load_config(path: Option<&Path>) -> Result<FinderConfig> {
    match path {
        Some(path) => FinderConfig::load(path).with_context(|| {
            format!(
                "failed to load finder configuration from {}",
                path.display()
            )
        }),
        None => match FinderConfig::load_default() {
            Err(LibError::ProjectDirsUnavailable) => {
                warn!("no configuration directory available; using default finder settings");
                Ok(FinderConfig::default())
            }
            other => other.context("failed to load the default finder configuration"),
        },
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
