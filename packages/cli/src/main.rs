#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command line front end for the SafeNet alert store.
//!
//! Stands in for the browser screens: it replays scripted sessions against a
//! fresh [`AlertStore`], classifies single alerts, and shows the effective
//! configuration. Logging goes through `pretty_env_logger`, controlled by
//! `RUST_LOG`.

mod report;
mod scenario;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use safenet_alert::{ConfigError, SafenetConfig, Verdict, Verifier};
use safenet_alert_models::Alert;
use safenet_store::AlertStore;

use crate::scenario::Scenario;

/// Environment variable naming a config file when `--config` is absent.
const CONFIG_ENV: &str = "SAFENET_CONFIG";

/// Errors surfaced by the CLI.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Alert JSON was malformed, or the snapshot could not be rendered.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Scenario TOML was malformed.
    #[error("Invalid scenario: {0}")]
    Scenario(#[from] toml::de::Error),

    /// A scenario step carried a time that is not `HH:MM`.
    #[error("Invalid time '{value}': {source}")]
    InvalidTime {
        /// The offending text.
        value: String,
        /// Parse failure from chrono.
        source: chrono::ParseError,
    },
}

#[derive(Parser)]
#[command(name = "safenet", about = "SafeNet SOS alert simulator")]
struct Cli {
    /// Config file (overrides the `SAFENET_CONFIG` env var)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario file and print the final store snapshot as JSON
    Simulate {
        /// Path to the scenario TOML
        scenario: PathBuf,

        /// Print a plain-text dashboard summary instead of JSON
        #[arg(long)]
        summary: bool,
    },
    /// Classify one alert (JSON file) against an empty store
    Verify {
        /// Path to the alert JSON
        alert: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate { scenario, summary } => {
            let mut store = AlertStore::with_config(&config);
            Scenario::load(&scenario)?.run(&mut store)?;
            if summary {
                println!("{}", report::render(&store));
            } else {
                println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
            }
        }
        Commands::Verify { alert } => {
            let text = std::fs::read_to_string(&alert).map_err(|source| CliError::Io {
                path: alert.clone(),
                source,
            })?;
            let alert: Alert = serde_json::from_str(&text).map_err(CliError::from)?;

            match Verifier::new(config.verification).verify(&alert, &[]) {
                Verdict::Legitimate => println!("Alert {}: legitimate", alert.id),
                Verdict::Spam(reason) => println!("Alert {}: spam ({reason})", alert.id),
            }
        }
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

/// Resolves configuration from `--config`, then `SAFENET_CONFIG`, then the
/// embedded defaults.
fn load_config(flag: Option<&Path>) -> Result<SafenetConfig, CliError> {
    let path = flag
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

    let config = match path {
        Some(path) => SafenetConfig::load(&path)?,
        None => {
            log::debug!("No config file given; using embedded defaults");
            SafenetConfig::embedded()?
        }
    };

    Ok(config)
}
