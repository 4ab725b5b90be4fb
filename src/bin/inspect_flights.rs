//! Flight JSON Inspection Utility
//!
//! Reads the prepared `flightjson/*.json` files and shows:
//! - How many records each file holds
//! - The columns of the first record
//! - Scheduled departure timestamps built from the date columns and `CRSDepTime`

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use prep_data::{dataset::list_files, departure_timestamp, Config};
use serde_json::Value;

#[derive(Parser)]
#[command(version, about = "Inspect the prepared flight JSON files", long_about = None)]
struct Args {
    /// Base directory the datasets were written to
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Records sampled from each file
    #[arg(long, default_value_t = 5)]
    rows: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::new(&args.data_dir);
    let json_dir = config.flights_json_dir();

    println!("🔍 Flight JSON Inspection Utility\n");

    let files = list_files(&json_dir, "json")
        .with_context(|| format!("run `prep-data --dataset flights` first to create {}", json_dir.display()))?;

    if files.is_empty() {
        println!("❌ No JSON files in {}", json_dir.display());
        return Ok(());
    }

    for path in &files {
        examine_file(path, args.rows)?;
    }

    Ok(())
}

fn examine_file(path: &Path, rows: usize) -> Result<()> {
    let reader = BufReader::new(File::open(path)?);
    let lines: Vec<String> = reader.lines().collect::<Result<Vec<_>, _>>()?;
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();

    println!("📄 {}: {} records", name, lines.len());

    let Some(first) = lines.first() else {
        return Ok(());
    };
    if let Value::Object(record) = serde_json::from_str::<Value>(first)? {
        let columns: Vec<&str> = record.keys().map(String::as_str).collect();
        println!("  • Columns: {}", columns.join(", "));
    }

    for line in lines.iter().take(rows) {
        let record: Value = serde_json::from_str(line)?;
        match scheduled_departure(&record) {
            Some(ts) => println!("  • {} {}", ts, origin_and_dest(&record)),
            None => println!("  • (no departure time) {}", origin_and_dest(&record)),
        }
    }
    println!();

    Ok(())
}

fn scheduled_departure(record: &Value) -> Option<chrono::NaiveDateTime> {
    let field = |key: &str| record.get(key).and_then(Value::as_u64);

    departure_timestamp(
        i32::try_from(field("Year")?).ok()?,
        u32::try_from(field("Month")?).ok()?,
        u32::try_from(field("DayofMonth")?).ok()?,
        u32::try_from(field("CRSDepTime")?).ok()?,
    )
}

fn origin_and_dest(record: &Value) -> String {
    let text = |key: &str| record.get(key).and_then(Value::as_str).unwrap_or("?").to_string();

    format!("{} → {}", text("Origin"), text("Dest"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_build_departure_from_record() {
        let record = json!({"Year": 1990, "Month": 1, "DayofMonth": 3, "CRSDepTime": 1645});

        assert_eq!(
            scheduled_departure(&record).unwrap().to_string(),
            "1990-01-03 16:45:00"
        );
    }

    #[test]
    fn should_skip_record_without_departure() {
        let record = json!({"Year": 1990, "Month": 1, "DayofMonth": 3, "CRSDepTime": null});

        assert!(scheduled_departure(&record).is_none());
    }

    #[test]
    fn should_format_route() {
        let record = json!({"Origin": "EWR", "Dest": "LAX"});

        assert_eq!(origin_and_dest(&record), "EWR → LAX");
    }
}
