//! Downloads and prepares the sample datasets used by the parallel
//! dataframe/array tutorial.
//!
//! Each dataset is produced by a chain of steps (fetch, extract, transform),
//! and each step is skipped when its output path already exists.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod download;
pub mod error;
pub mod ndjson;
pub mod resize;
pub mod storage;

pub use config::{Config, Size};
pub use dataset::{departure_timestamp, materialize_array, materialize_flights, materialize_weather};
pub use error::PrepError;
