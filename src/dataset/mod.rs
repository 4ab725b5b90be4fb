//! The three tutorial datasets. Each step is skipped when its output path exists.

pub mod array;
pub mod flights;
pub mod weather;

use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

pub use array::{materialize_array, ArrayPlan};
pub use flights::{departure_timestamp, materialize_flights};
pub use weather::{materialize_weather, FileOutcome, WeatherReport};

/// Lists the files in `dir` with extension `ext`, sorted by name.
pub fn list_files(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = dir
        .read_dir()
        .with_context(|| format!("listing {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, io::Error>>()?
        .into_iter()
        .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == ext))
        .collect();
    files.sort();

    Ok(files)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn should_list_matching_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["2014-01-03.hdf5", "2014-01-01.hdf5", "readme.txt", "2014-01-02.hdf5"] {
            fs::write(temp_dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(temp_dir.path().join("nested.hdf5")).unwrap();

        let files = list_files(temp_dir.path(), "hdf5").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["2014-01-01.hdf5", "2014-01-02.hdf5", "2014-01-03.hdf5"]);
    }

    #[test]
    fn should_fail_listing_missing_dir() {
        let temp_dir = TempDir::new().unwrap();

        assert!(list_files(&temp_dir.path().join("missing"), "csv").is_err());
    }
}
