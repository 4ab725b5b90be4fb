//! Command line interface.

use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{Config, Size};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
/// Downloads and prepares the tutorial datasets
pub struct Cli {
    /// Use the reduced variant of each dataset
    #[arg(short, long)]
    pub small: bool,

    /// Which dataset to prepare
    #[arg(long, value_enum, default_value_t = DatasetChoice::All)]
    pub dataset: DatasetChoice,

    /// Base directory the datasets are written to
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DatasetChoice {
    All,
    Flights,
    Array,
    Weather,
}

impl DatasetChoice {
    pub fn includes(self, other: DatasetChoice) -> bool {
        self == DatasetChoice::All || self == other
    }
}

impl Cli {
    pub fn config(&self) -> Config {
        Config::new(&self.data_dir)
    }

    pub fn size(&self) -> Size {
        Size::from_flag(self.small)
    }
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Style for a transfer whose size is known up front.
pub fn byte_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {eta}")
        .unwrap()
        .progress_chars("=> ")
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    ProgressBar::new(size).with_message(message).with_style(
        ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    )
}

// -- Tests -------------------------------------------------------------------
