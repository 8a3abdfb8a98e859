//! core/playback/fetch.rs
//! Remote source staging: download the URL to a temp file before decode.

use std::io;

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("temp file: {0}")]
    Io(#[from] io::Error),
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
}

/// Download `url` into a fresh temp file.
///
/// Blocking; runs on the engine thread. The file is deleted when the returned
/// handle is dropped, so the caller keeps it alive for as long as playback
/// needs it.
pub fn fetch_to_temp(url: &str) -> Result<NamedTempFile, FetchError> {
    log::info!("fetching remote source {url}");

    let mut file = NamedTempFile::new()?;
    let mut response = reqwest::blocking::get(url)?.error_for_status()?;
    let bytes = io::copy(&mut response, file.as_file_mut())?;

    log::debug!("staged {bytes} bytes at {}", file.path().display());
    Ok(file)
}
