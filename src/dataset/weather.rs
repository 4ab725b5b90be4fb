//! Weather rasters: the small grids from the zip archive, upscaled into big ones.
//!
//! Grids are converted one file at a time. A failure on one file is recorded in
//! the [`WeatherReport`] and the remaining files are still converted; the next
//! run only retries the files whose output is missing.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::{
    cli::{create_progress_bar, create_spinner},
    config::{Config, Size},
    download::{download_file, ensure_dir, extract_zip},
    resize::{grown_shape, resize},
    storage::{hdf5_store, Store},
};

use super::list_files;

/// Name of the grid inside every raster file.
pub const GRID_NAME: &str = "t2m";

/// Storage block size of the big rasters.
pub const CHUNK: (usize, usize) = (500, 500);

/// Percent growth applied to both axes.
pub fn growth(size: Size) -> u32 {
    match size {
        Size::Small => 400,
        Size::Full => 1200,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Written { shape: (usize, usize) },
    AlreadyPresent,
    Failed(String),
}

#[derive(Debug, Default)]
/// Outcome of every small raster, in file name order.
pub struct WeatherReport {
    pub outcomes: Vec<(PathBuf, FileOutcome)>,
}

impl WeatherReport {
    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Written { .. }))
    }

    pub fn already_present(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::AlreadyPresent))
    }

    pub fn failures(&self) -> Vec<(&Path, &str)> {
        self.outcomes
            .iter()
            .filter_map(|(path, outcome)| match outcome {
                FileOutcome::Failed(msg) => Some((path.as_path(), msg.as_str())),
                _ => None,
            })
            .collect()
    }

    fn count(&self, f: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| f(o)).count()
    }

    pub fn print_summary(&self) {
        println!(
            "Weather grids: {} written, {} already present, {} failed",
            self.written(),
            self.already_present(),
            self.failures().len()
        );
        for (path, msg) in self.failures() {
            eprintln!("  {}: {}", path.display(), msg);
        }
    }
}

/// Ensures every small weather raster has an upscaled counterpart.
pub async fn materialize_weather(config: &Config, size: Size) -> Result<WeatherReport> {
    let store = hdf5_store()?;

    materialize_weather_with(config, size, store.as_ref()).await
}

/// Same as [`materialize_weather`], reading and writing through `store`.
pub async fn materialize_weather_with(config: &Config, size: Size, store: &dyn Store) -> Result<WeatherReport> {
    let growth = growth(size);
    ensure_dir(config.data_dir())?;

    let archive = config.weather_archive();
    if !archive.exists() {
        let bar = create_spinner("Downloading weather data...".to_string());
        download_file(&config.weather_url, &archive, &bar).await?;
        bar.finish_with_message("Downloading weather data... done");
    }

    let small_dir = config.weather_small_dir();
    if !small_dir.exists() {
        let bar = create_spinner(format!("Extracting to {}", small_dir.display()));
        extract_zip(&archive, config.data_dir()).await?;
        bar.finish_with_message(format!("Extracting to {}... done", small_dir.display()));
    }

    let inputs = list_files(&small_dir, "hdf5")?;
    let big_dir = config.weather_big_dir();
    ensure_dir(&big_dir)?;

    let pairs: Vec<(PathBuf, PathBuf)> = inputs
        .into_iter()
        .filter_map(|input| {
            let name = input.file_name()?.to_owned();
            Some((input, big_dir.join(name)))
        })
        .collect();

    let mut report = WeatherReport::default();

    if pairs.iter().all(|(_, output)| output.exists()) {
        report.outcomes = pairs
            .into_iter()
            .map(|(input, _)| (input, FileOutcome::AlreadyPresent))
            .collect();
        return Ok(report);
    }

    let pb = create_progress_bar(pairs.len() as u64, "Resizing weather grids".to_string());
    for (input, output) in pairs {
        let outcome = if output.exists() {
            FileOutcome::AlreadyPresent
        } else {
            match convert(store, &input, &output, growth) {
                Ok(shape) => FileOutcome::Written { shape },
                Err(e) => FileOutcome::Failed(format!("{:#}", e)),
            }
        };
        report.outcomes.push((input, outcome));
        pb.inc(1);
    }
    pb.finish_with_message("Weather grids resized");

    report.print_summary();

    Ok(report)
}

// Reads one small grid, grows it and writes the big one. Returns the new shape.
fn convert(store: &dyn Store, input: &Path, output: &Path, growth: u32) -> Result<(usize, usize)> {
    let grid = store.read_grid(input, GRID_NAME)?;
    let shape = grown_shape(grid.dim(), growth);
    let big = resize(&grid, shape)?;

    let chunk = (CHUNK.0.min(shape.0), CHUNK.1.min(shape.1));
    store.write_grid(output, GRID_NAME, &big, chunk)?;

    Ok(shape)
}

// -- Tests -------------------------------------------------------------------
