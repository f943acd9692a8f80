//! Lookup Database Provisioner
//!
//! Ensures the two GeoLite2 database files exist locally, downloading each
//! from its configured URL when absent.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::domain::errors::GeoError;

/// City database file name inside the database directory.
pub const CITY_DB_FILE: &str = "GeoLite2-City.mmdb";

/// ASN database file name inside the database directory.
pub const ASN_DB_FILE: &str = "GeoLite2-ASN.mmdb";

/// Downloads missing database files over blocking HTTP.
///
/// A file that already exists is taken as-is; there is no checksum or
/// freshness check. Downloads are staged in a temp file next to the
/// destination and renamed into place only after the full body has been
/// written, so a present file is always a complete one.
pub struct DatabaseProvisioner {
    client: reqwest::blocking::Client,
}

impl DatabaseProvisioner {
    /// Create a provisioner whose requests are bounded by `timeout`.
    ///
    /// `None` disables the request deadline.
    pub fn new(timeout: Option<Duration>) -> Result<Self, GeoError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GeoError::HttpClient)?;
        Ok(Self { client })
    }

    /// Make sure both database files exist under `dir`.
    ///
    /// Creates the directory tree first, then fetches only the files that
    /// are missing; present files cause no network traffic.
    pub fn ensure(&self, dir: &Path, city_url: &str, asn_url: &str) -> Result<(), GeoError> {
        create_db_dir(dir).map_err(|source| GeoError::Config {
            path: dir.to_path_buf(),
            source,
        })?;

        self.ensure_file(&dir.join(CITY_DB_FILE), city_url)?;
        self.ensure_file(&dir.join(ASN_DB_FILE), asn_url)?;
        Ok(())
    }

    fn ensure_file(&self, dest: &Path, url: &str) -> Result<(), GeoError> {
        if dest.exists() {
            debug!("database {} already present, skipping download", dest.display());
            return Ok(());
        }
        self.download(dest, url)
    }

    fn download(&self, dest: &Path, url: &str) -> Result<(), GeoError> {
        info!("downloading {} to {}", url, dest.display());

        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|source| GeoError::Download {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::DownloadStatus {
                url: url.to_string(),
                status,
            });
        }

        // Stage in the destination directory so the final rename cannot
        // cross filesystems and the destination name never refers to a
        // partially written file.
        let dir = dest.parent().unwrap_or_else(|| Path::new("."));
        let mut staged = NamedTempFile::new_in(dir).map_err(|source| GeoError::Store {
            path: dest.to_path_buf(),
            source,
        })?;

        let bytes = response
            .copy_to(&mut staged)
            .map_err(|source| GeoError::Download {
                url: url.to_string(),
                source,
            })?;

        staged.persist(dest).map_err(|e| GeoError::Store {
            path: dest.to_path_buf(),
            source: e.error,
        })?;

        info!("downloaded {} ({} bytes)", dest.display(), bytes);
        Ok(())
    }
}

#[cfg(unix)]
fn create_db_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o755).create(dir)
}

#[cfg(not(unix))]
fn create_db_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}
