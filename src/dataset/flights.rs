//! NYC flight records: tarball, extracted CSVs, and a JSON subset of each.

use std::fs;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::{
    cli::create_spinner,
    config::{Config, Size},
    download::{download_file, ensure_dir, extract_tar},
    ndjson::csv_head_to_ndjson,
};

use super::list_files;

/// Records kept from each CSV for the JSON exercises.
pub const RECORD_LIMIT: usize = 10_000;

/// Ensures the flight archive, its extracted CSVs and the JSON subset exist.
///
/// `_size` has no effect on this dataset.
pub async fn materialize_flights(config: &Config, _size: Size) -> Result<()> {
    ensure_dir(config.data_dir())?;

    let archive = config.flights_archive();
    if !archive.exists() {
        let bar = create_spinner("- Downloading NYC Flights dataset...".to_string());
        download_file(&config.flights_url, &archive, &bar).await?;
        bar.finish_with_message("- Downloading NYC Flights dataset... done");
    }

    let flight_dir = config.flights_dir();
    if !flight_dir.exists() {
        let bar = create_spinner("- Extracting flight data...".to_string());
        extract_tar(&archive, config.data_dir()).await?;
        bar.finish_with_message("- Extracting flight data... done");
    }

    let json_dir = config.flights_json_dir();
    if !json_dir.exists() {
        let bar = create_spinner("- Creating json data...".to_string());
        fs::create_dir(&json_dir).with_context(|| format!("creating {}", json_dir.display()))?;

        for csv in list_files(&flight_dir, "csv")? {
            let stem = csv
                .file_stem()
                .with_context(|| format!("no file name in {}", csv.display()))?;
            let json = json_dir.join(format!("{}.json", stem.to_string_lossy()));
            csv_head_to_ndjson(&csv, &json, RECORD_LIMIT)?;
        }

        bar.finish_with_message("- Creating json data... done");
    }

    println!("** Finished! **");

    Ok(())
}

/// Scheduled departure built from the flight date and an `hhmm` departure time.
///
/// Hours and minutes are added as offsets, so `2400` is midnight of the next day.
pub fn departure_timestamp(year: i32, month: u32, day: u32, crs_dep_time: u32) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let hours = TimeDelta::try_hours(i64::from(crs_dep_time / 100))?;
    let minutes = TimeDelta::try_minutes(i64::from(crs_dep_time % 100))?;

    date.and_hms_opt(0, 0, 0)?
        .checked_add_signed(hours)?
        .checked_add_signed(minutes)
}

// -- Tests -------------------------------------------------------------------
