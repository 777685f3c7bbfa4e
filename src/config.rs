//! Runtime configuration for gpu-device-attrs.
//!
//! Configuration can be loaded from a JSON file or constructed programmatically.
//! Command-line flags override values from the file. Attribute namespaces are
//! compile-time constants and not configurable.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gpu-device-attrs",
    about = "Derive allocator device attributes from discovered GPU facts"
)]
pub struct Cli {
    /// Path to configuration file (JSON).
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Path to the discovered GPU facts (JSON array). Overrides the config file.
    #[arg(short, long)]
    pub facts: Option<PathBuf>,

    /// Also emit the attributes shared by partitions of each GPU.
    #[arg(long)]
    pub partitions: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub json_logs: bool,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where to read discovered facts from.
    pub facts: FactsConfig,

    /// Output settings.
    pub output: OutputConfig,
}

/// Fact source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactsConfig {
    /// Path to the JSON array written by discovery.
    pub path: PathBuf,
}

impl Default for FactsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("gpus.json"),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON.
    pub pretty: bool,

    /// Include partition-shared attribute sets.
    pub partitions: bool,
}

impl Config {
    /// Load configuration from a JSON file, falling back to defaults for
    /// missing fields. A missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("decoding config {}", path.display()))
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(facts) = &cli.facts {
            self.facts.path = facts.clone();
        }
        self.output.pretty |= cli.pretty;
        self.output.partitions |= cli.partitions;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.facts.path, PathBuf::from("gpus.json"));
        assert!(!cfg.output.pretty);
        assert!(!cfg.output.partitions);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "output": { "partitions": true } }"#).unwrap();

        let cfg = Config::load(file.path()).unwrap();
        assert!(cfg.output.partitions);
        assert!(!cfg.output.pretty);
        assert_eq!(cfg.facts.path, PathBuf::from("gpus.json"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_load_invalid_file_names_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("decoding config"), "{message}");
        assert!(message.contains(&file.path().display().to_string()), "{message}");
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(["gpu-device-attrs", "--facts", "/tmp/facts.json", "--pretty"]);
        let cfg = Config::default().with_cli(&cli);
        assert_eq!(cfg.facts.path, PathBuf::from("/tmp/facts.json"));
        assert!(cfg.output.pretty);
        assert!(!cfg.output.partitions);
    }
}
