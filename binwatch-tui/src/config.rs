//! Command line flags and the optional `binwatch.toml` file.
//!
//! Settings are layered, later sources winning:
//! 1. built-in defaults
//! 2. the config file (`--config`, or `./binwatch.toml` when present)
//! 3. command line flags
//!
//! ```toml
//! [refresh]
//! latency_ms = 1500
//! seed = 42
//!
//! [logging]
//! file = "binwatch.log"
//! level = "debug"
//!
//! [[bins]]
//! id = "BIN-100"
//! category = "plastic"
//! fill_level = 40
//! location = "Lobby"
//! last_updated = { minutes_ago = 2 }
//!
//! [[locations]]
//! id = "BIN-100"
//! position = { lat = 40.7580, lng = -73.9855 }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, ensure};
use binwatch_core::{BinLocation, BinRecord, DEFAULT_REFRESH_LATENCY};
use clap::Parser;
use serde::Deserialize;
use tracing::Level;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "binwatch.toml";
const MAX_LATENCY_MS: u64 = 60_000;

#[derive(Debug, Parser)]
#[command(
    name = "binwatch",
    version,
    about = "Terminal dashboard for smart waste bin fill levels"
)]
pub(crate) struct Cli {
    /// Config file to load instead of ./binwatch.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Seed for a reproducible refresh simulation
    #[arg(long)]
    pub seed: Option<u64>,
    /// Simulated refresh latency in milliseconds
    #[arg(long, value_name = "MS")]
    pub latency_ms: Option<u64>,
    /// Write JSON logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    #[serde(default)]
    refresh: RefreshSection,
    #[serde(default)]
    logging: LoggingSection,
    #[serde(default)]
    bins: Vec<BinRecord>,
    #[serde(default)]
    locations: Vec<BinLocation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RefreshSection {
    latency_ms: Option<u64>,
    seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingSection {
    file: Option<PathBuf>,
    level: Option<String>,
}

/// Effective settings after merging every layer.
#[derive(Debug)]
pub(crate) struct Settings {
    pub latency: Duration,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
    /// Operator-defined bins; empty means the built-in demo set
    pub bins: Vec<BinRecord>,
    /// Map positions for operator-defined bins
    pub locations: Vec<BinLocation>,
}

impl Settings {
    pub(crate) fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => load_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    load_file(default_path)?
                } else {
                    FileConfig::default()
                }
            }
        };
        Self::merge(file, cli)
    }

    fn merge(file: FileConfig, cli: &Cli) -> Result<Self> {
        let latency = match cli.latency_ms.or(file.refresh.latency_ms) {
            Some(millis) => {
                ensure!(
                    millis <= MAX_LATENCY_MS,
                    "refresh latency {millis} ms exceeds {MAX_LATENCY_MS} ms"
                );
                Duration::from_millis(millis)
            }
            None => DEFAULT_REFRESH_LATENCY,
        };

        let log_level = match cli.log_level.as_deref().or(file.logging.level.as_deref()) {
            Some(level) => level
                .parse::<Level>()
                .with_context(|| format!("invalid log level '{level}'"))?,
            None => Level::INFO,
        };

        Ok(Self {
            latency,
            seed: cli.seed.or(file.refresh.seed),
            log_file: cli.log_file.clone().or(file.logging.file),
            log_level,
            bins: file.bins,
            locations: file.locations,
        })
    }
}

fn load_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    parse(&content).with_context(|| format!("failed to parse config file '{}'", path.display()))
}

pub(crate) fn parse(content: &str) -> Result<FileConfig> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use binwatch_core::{BinCategory, LastUpdated};

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("binwatch").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_without_file_or_flags() {
        let settings = Settings::merge(FileConfig::default(), &cli(&[])).expect("defaults are valid");

        assert_eq!(settings.latency, DEFAULT_REFRESH_LATENCY);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.log_level, Level::INFO);
        assert!(settings.log_file.is_none());
        assert!(settings.bins.is_empty());
    }

    #[test]
    fn flags_override_file() {
        let file = parse(
            r#"
            [refresh]
            latency_ms = 800
            seed = 1

            [logging]
            level = "warn"
            "#,
        )
        .expect("valid config");
        let settings = Settings::merge(file, &cli(&["--seed", "9", "--log-level", "debug"]))
            .expect("valid settings");

        assert_eq!(settings.latency, Duration::from_millis(800));
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.log_level, Level::DEBUG);
    }

    #[test]
    fn bins_are_read_from_file() {
        let file = parse(
            r#"
            [[bins]]
            id = "BIN-100"
            category = "sanitary-waste"
            fill_level = 88
            location = "Clinic"
            last_updated = { minutes_ago = 7 }

            [[bins]]
            id = "BIN-101"
            category = "metal"
            fill_level = 3
            location = "Workshop"
            "#,
        )
        .expect("valid config");
        let settings = Settings::merge(file, &cli(&[])).expect("valid settings");

        let [first, second] = settings.bins.as_slice() else {
            panic!("expected two bins, got {:?}", settings.bins);
        };
        assert_eq!(first.category(), BinCategory::SanitaryWaste);
        assert_eq!(first.fill_level().percent(), 88);
        assert_eq!(first.last_updated(), LastUpdated::MinutesAgo(7));
        assert_eq!(second.last_updated(), LastUpdated::JustNow);
    }

    #[test]
    fn locations_are_read_from_file() {
        let file = parse(
            r#"
            [[locations]]
            id = "BIN-100"
            position = { lat = 40.758, lng = -73.9855 }
            "#,
        )
        .expect("valid config");
        let settings = Settings::merge(file, &cli(&[])).expect("valid settings");

        let [location] = settings.locations.as_slice() else {
            panic!("expected one location, got {:?}", settings.locations);
        };
        assert_eq!(location.id.0, "BIN-100");
        assert_eq!(location.position.lat, 40.758);
    }

    #[test]
    fn misspelled_bin_key_is_rejected() {
        let result = parse(
            r#"
            [[bins]]
            id = "BIN-100"
            category = "plastic"
            fill_level = 10
            location = "Lobby"
            last_update = { minutes_ago = 2 }
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn out_of_range_fill_level_is_rejected() {
        let result = parse(
            r#"
            [[bins]]
            id = "BIN-100"
            category = "plastic"
            fill_level = 140
            location = "Lobby"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_category_is_rejected() {
        let result = parse(
            r#"
            [[bins]]
            id = "BIN-100"
            category = "glass"
            fill_level = 10
            location = "Lobby"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn excessive_latency_is_rejected() {
        let result = Settings::merge(FileConfig::default(), &cli(&["--latency-ms", "120000"]));
        assert!(result.is_err());
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let result = Settings::merge(FileConfig::default(), &cli(&["--log-level", "chatty"]));
        assert!(result.is_err());
    }
}
