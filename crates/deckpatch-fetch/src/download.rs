use std::io;
use std::path::Path;

use deckpatch_verify::{Sha256Hasher, VerificationError, VerifiedReader};
use tempfile::TempPath;
use tracing::{debug, info};

use crate::error::{FetchError, Result};
use crate::options::FetchOptions;

/// A downloaded archive on disk. Deleted on drop.
#[derive(Debug)]
pub struct DownloadedArchive {
    path: TempPath,
    sha256: String,
    bytes: u64,
}

impl DownloadedArchive {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

/// Fetch `url` into a fresh temporary `.zip` file.
pub fn download(url: &str, options: &FetchOptions) -> Result<DownloadedArchive> {
    check_scheme(url)?;

    let client = reqwest::blocking::Client::builder()
        .user_agent(options.user_agent.as_str())
        .timeout(options.timeout)
        .build()
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    debug!(url, "requesting");
    let response = client.get(url).send().map_err(|source| FetchError::Request {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let mut file = tempfile::Builder::new()
        .prefix("deckpatch-download-")
        .suffix(".zip")
        .tempfile()
        .map_err(FetchError::TempFile)?;

    let mut reader = VerifiedReader::new(response, Sha256Hasher::new());
    io::copy(&mut reader, file.as_file_mut()).map_err(FetchError::Body)?;
    let bytes = reader.bytes_read();

    let sha256 = match &options.expected_sha256 {
        Some(expected) => {
            let actual = reader.finalize_hex();
            if !actual.eq_ignore_ascii_case(expected) {
                return Err(VerificationError::Mismatch {
                    expected: expected.clone(),
                    actual,
                }
                .into());
            }
            actual
        }
        None => reader.finalize_hex(),
    };

    let path = file.into_temp_path();
    info!(url, bytes, %sha256, path = %path.display(), "downloaded");
    Ok(DownloadedArchive { path, sha256, bytes })
}

fn check_scheme(url: &str) -> Result<()> {
    let lower = url.trim().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Ok(())
    } else {
        Err(FetchError::InvalidUrl(url.to_string()))
    }
}
