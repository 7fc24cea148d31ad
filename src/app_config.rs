use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::file_utils::FileManager;
use crate::locale::LocaleConfig;

/// Application configuration module
/// This module handles loading and validating the generator settings.
/// Every field has a default, so an absent config file means stock behavior.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the XML fixtures
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory receiving the SQL scripts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Fixture file names
    #[serde(default)]
    pub inputs: InputFiles,

    /// Collation context for the status comparison
    #[serde(default)]
    pub locale: LocaleConfig,

    /// Fixed shuffle seed; the wall clock is used when absent
    #[serde(default)]
    pub shuffle_seed: Option<u64>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Names of the three input fixtures, relative to `input_dir`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InputFiles {
    #[serde(default = "default_countries_file")]
    pub countries: String,

    #[serde(default = "default_genres_file")]
    pub genres: String,

    #[serde(default = "default_series_file")]
    pub series: String,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            countries: default_countries_file(),
            genres: default_genres_file(),
            series: default_series_file(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("xml")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_countries_file() -> String {
    "countries.xml".to_string()
}

fn default_genres_file() -> String {
    "genres.xml".to_string()
}

fn default_series_file() -> String {
    "tvseries.xml".to_string()
}

impl Config {
    /// Load a JSON config file; a missing file yields the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Ok(Config::default());
        }

        let file = File::open(path)
            .map_err(|e| AppError::Config(format!("Failed to open config file {:?}: {}", path, e)))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| AppError::Config(format!("Failed to parse config file {:?}: {}", path, e)))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> AppResult<()> {
        if self.locale.airing_status.trim().is_empty() {
            return Err(AppError::Config("airing status reference must not be empty".to_string()));
        }

        let inputs = [&self.inputs.countries, &self.inputs.genres, &self.inputs.series];
        if inputs.iter().any(|name| name.trim().is_empty()) {
            return Err(AppError::Config("input file names must not be empty".to_string()));
        }

        Ok(())
    }

    pub fn countries_path(&self) -> PathBuf {
        self.input_dir.join(&self.inputs.countries)
    }

    pub fn genres_path(&self) -> PathBuf {
        self.input_dir.join(&self.inputs.genres)
    }

    pub fn series_path(&self) -> PathBuf {
        self.input_dir.join(&self.inputs.series)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            inputs: InputFiles::default(),
            locale: LocaleConfig::default(),
            shuffle_seed: None,
            log_level: LogLevel::default(),
        }
    }
}
