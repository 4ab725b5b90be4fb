//! Array container access.
//!
//! The datasets are stored as HDF5, which needs the system library. Support
//! is compiled in with the `hdf5` feature; without it [`hdf5_store`] reports
//! the missing capability before any work is done.

use std::path::Path;

use anyhow::Result;
use ndarray::Array2;

#[cfg(not(feature = "hdf5"))]
use crate::error::PrepError;

/// Writes consecutive slices of a one-dimensional `f32` dataset.
pub trait ArrayWriter {
    fn write_at(&mut self, offset: usize, values: &[f32]) -> Result<()>;
}

/// A container file format holding named n-dimensional datasets.
pub trait Store {
    /// Creates `path` with an empty `f32` dataset `name` of length `len`.
    fn create_array(&self, path: &Path, name: &str, len: usize) -> Result<Box<dyn ArrayWriter>>;

    fn read_grid(&self, path: &Path, name: &str) -> Result<Array2<f64>>;

    /// Creates `path` holding `grid` as dataset `name`, stored in `chunk` blocks.
    fn write_grid(&self, path: &Path, name: &str, grid: &Array2<f64>, chunk: (usize, usize)) -> Result<()>;
}

/// Returns the HDF5 store.
#[cfg(feature = "hdf5")]
pub fn hdf5_store() -> Result<Box<dyn Store>> {
    Ok(Box::new(hdf5_backend::Hdf5Store))
}

/// Fails: this build has no HDF5 support.
#[cfg(not(feature = "hdf5"))]
pub fn hdf5_store() -> Result<Box<dyn Store>> {
    Err(PrepError::MissingCapability {
        capability: "HDF5",
        feature: "hdf5",
    }
    .into())
}

#[cfg(feature = "hdf5")]
mod hdf5_backend {
    use std::path::Path;

    use anyhow::{Context, Result};
    use hdf5::{Dataset, File};
    use ndarray::{s, Array2, ArrayView1};

    use super::{ArrayWriter, Store};

    pub struct Hdf5Store;

    struct Hdf5Array {
        // Keeps the file handle open for the dataset's lifetime
        _file: File,
        dataset: Dataset,
    }

    impl ArrayWriter for Hdf5Array {
        fn write_at(&mut self, offset: usize, values: &[f32]) -> Result<()> {
            let end = offset + values.len();
            self.dataset
                .write_slice(ArrayView1::from(values), s![offset..end])?;

            Ok(())
        }
    }

    impl Store for Hdf5Store {
        fn create_array(&self, path: &Path, name: &str, len: usize) -> Result<Box<dyn ArrayWriter>> {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let dataset = file.new_dataset::<f32>().shape(len).create(name)?;

            Ok(Box::new(Hdf5Array { _file: file, dataset }))
        }

        fn read_grid(&self, path: &Path, name: &str) -> Result<Array2<f64>> {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            let grid = file.dataset(name)?.read_2d::<f64>()?;

            Ok(grid)
        }

        fn write_grid(&self, path: &Path, name: &str, grid: &Array2<f64>, chunk: (usize, usize)) -> Result<()> {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let dataset = file
                .new_dataset::<f64>()
                .chunk(chunk)
                .shape(grid.dim())
                .create(name)?;
            dataset.write(grid.view())?;

            Ok(())
        }
    }
}


// -- Tests -------------------------------------------------------------------
