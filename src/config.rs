//! Where the datasets live and how big they are.

use std::path::{Path, PathBuf};

pub const FLIGHTS_URL: &str =
    "https://storage.googleapis.com/dask-tutorial-data/nycflights.tar.gz";
pub const WEATHER_URL: &str =
    "https://storage.googleapis.com/dask-tutorial-data/weather-small.zip";

/// Base directory and remote sources for every dataset.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub flights_url: String,
    pub weather_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config::new("data")
    }
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: data_dir.into(),
            flights_url: FLIGHTS_URL.to_string(),
            weather_url: WEATHER_URL.to_string(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn flights_archive(&self) -> PathBuf {
        self.data_dir.join("nycflights.tar.gz")
    }

    pub fn flights_dir(&self) -> PathBuf {
        self.data_dir.join("nycflights")
    }

    pub fn flights_json_dir(&self) -> PathBuf {
        self.data_dir.join("flightjson")
    }

    pub fn array_file(&self) -> PathBuf {
        self.data_dir.join("random.hdf5")
    }

    pub fn weather_archive(&self) -> PathBuf {
        self.data_dir.join("weather-small.zip")
    }

    pub fn weather_small_dir(&self) -> PathBuf {
        self.data_dir.join("weather-small")
    }

    pub fn weather_big_dir(&self) -> PathBuf {
        self.data_dir.join("weather-big")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Selects the reduced variant of each dataset for fast iteration.
pub enum Size {
    Small,
    Full,
}

impl Size {
    pub fn from_flag(small: bool) -> Self {
        if small {
            Size::Small
        } else {
            Size::Full
        }
    }
}

// -- Tests -------------------------------------------------------------------
