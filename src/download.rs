//! Fetches dataset archives and unpacks them into the data directory.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use futures::StreamExt;
use indicatif::ProgressBar;
use tar::Archive;
use zip::ZipArchive;

use crate::{cli::byte_progress_style, error::PrepError};

/// Streams the body at `url` into `file_path`, reporting bytes on `progress_bar`.
///
/// A non-success status is a [`PrepError::Download`] and leaves no file behind.
/// An interrupted transfer leaves the partial file in place.
pub async fn download_file(url: &str, file_path: &Path, progress_bar: &ProgressBar) -> Result<()> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("requesting {}", url))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PrepError::Download {
            url: url.to_string(),
            status: status.as_u16(),
        }
        .into());
    }

    if let Some(total) = response.content_length().filter(|&n| n > 0) {
        progress_bar.set_length(total);
        progress_bar.set_style(byte_progress_style());
    }

    let mut out = BufWriter::new(
        File::create(file_path).with_context(|| format!("creating {}", file_path.display()))?,
    );
    let mut body = response.bytes_stream();

    while let Some(chunk) = body.next().await {
        let chunk = chunk.with_context(|| format!("reading body of {}", url))?;
        out.write_all(&chunk)?;
        progress_bar.inc(chunk.len() as u64);
    }

    out.flush()?;

    Ok(())
}

/// Unpacks a gzip-compressed tarball under `working_dir`.
pub async fn extract_tar(tar_gz_path: &Path, working_dir: &Path) -> Result<()> {
    let file = File::open(tar_gz_path).with_context(|| format!("opening {}", tar_gz_path.display()))?;

    Archive::new(GzDecoder::new(file))
        .unpack(working_dir)
        .with_context(|| format!("unpacking {}", tar_gz_path.display()))
}

/// Extracts every entry of a zip archive under `working_dir`.
///
/// Entries whose names would escape `working_dir` are skipped.
pub async fn extract_zip(zip_path: &Path, working_dir: &Path) -> Result<()> {
    let file = File::open(zip_path).with_context(|| format!("opening {}", zip_path.display()))?;
    let mut archive = ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let out_path = match entry.enclosed_name() {
            Some(path) => working_dir.join(path),
            None => continue,
        };

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out_file = File::create(&out_path)?;
        io::copy(&mut entry, &mut out_file)?;
    }

    Ok(())
}

/// Creates `dir` if it is missing. Returns true when it had to be created.
pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.exists() {
        return Ok(false);
    }
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    Ok(true)
}

// -- Tests -------------------------------------------------------------------
