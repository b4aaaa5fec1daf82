// Configuration module for the bracket simulator.
// Supports a YAML configuration file for data locations and simulation
// settings; every field falls back to a sensible default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Six-line team records, one blank line between teams.
    #[serde(default = "default_teams_file")]
    pub teams_file: String,

    /// 64 team names in round-of-64 bracket order, one per line.
    #[serde(default = "default_seeding_file")]
    pub seeding_file: String,

    /// Directory holding one saved prediction record per player.
    #[serde(default = "default_saves_dir")]
    pub saves_dir: String,

    /// Number of simulations behind the championship odds table.
    #[serde(default = "default_odds_runs")]
    pub odds_runs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            teams_file: default_teams_file(),
            seeding_file: default_seeding_file(),
            saves_dir: default_saves_dir(),
            odds_runs: default_odds_runs(),
        }
    }
}

fn default_teams_file() -> String {
    "teamInfo.txt".to_string()
}

fn default_seeding_file() -> String {
    "initialMatches.txt".to_string()
}

fn default_saves_dir() -> String {
    "saves".to_string()
}

fn default_odds_runs() -> usize {
    10_000
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &str) -> Result<Self, String> {
        if !Path::new(path).exists() {
            return Err(format!("Config file not found: {}", path));
        }

        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;

        serde_yaml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load configuration from file if it exists, otherwise use defaults
    pub fn load_or_default(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::from_file(p).unwrap_or_else(|e| {
                eprintln!("Warning: {}", e);
                eprintln!("Using default configuration.");
                Self::default()
            }),
            None => {
                for default_path in &["config.yaml", "config.yml", ".madness-config.yaml"] {
                    if Path::new(default_path).exists() {
                        if let Ok(config) = Self::from_file(default_path) {
                            println!("Loaded configuration from {}", default_path);
                            return config;
                        }
                    }
                }
                Self::default()
            }
        }
    }
}
