use std::path::PathBuf;
use std::time::Duration;

use crate::domain::errors::GeoError;

/// Default download location for the city database.
pub const DEFAULT_CITY_DB_URL: &str =
    "https://github.com/P3TERX/GeoLite.mmdb/raw/download/GeoLite2-City.mmdb";

/// Default download location for the ASN database.
pub const DEFAULT_ASN_DB_URL: &str =
    "https://github.com/P3TERX/GeoLite.mmdb/raw/download/GeoLite2-ASN.mmdb";

/// Default deadline for each database download.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 300;

/// Default language for localized names.
pub const DEFAULT_LOCALE: &str = "en";

#[derive(Debug, Clone)]
pub struct GeoConfig {
    /// Directory holding the two database files. `None` resolves to
    /// `~/.geo-enrich/geoip` at open time, so tests can point the resolver
    /// at a scratch directory instead of the real home.
    pub db_dir: Option<PathBuf>,
    pub city_db_url: String,
    pub asn_db_url: String,
    /// Deadline for each database download; `None` waits indefinitely.
    pub download_timeout: Option<Duration>,
    /// Language for localized names; "en" is also the fallback.
    pub locale: String,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            db_dir: None,
            city_db_url: DEFAULT_CITY_DB_URL.to_string(),
            asn_db_url: DEFAULT_ASN_DB_URL.to_string(),
            download_timeout: Some(Duration::from_secs(DEFAULT_DOWNLOAD_TIMEOUT_SECS)),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl GeoConfig {
    /// The directory the databases live in, deriving the default under the
    /// user's home directory when none was configured.
    pub fn resolved_db_dir(&self) -> Result<PathBuf, GeoError> {
        match &self.db_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(".geo-enrich").join("geoip"))
                .ok_or(GeoError::HomeDir),
        }
    }
}

/// Load configuration from environment variables, falling back to the
/// defaults for anything absent or unparsable.
pub fn load_config() -> GeoConfig {
    let db_dir = std::env::var("GEO_ENRICH_DB_DIR").ok().map(PathBuf::from);

    let city_db_url = std::env::var("GEO_ENRICH_CITY_DB_URL")
        .unwrap_or_else(|_| DEFAULT_CITY_DB_URL.to_string());

    let asn_db_url = std::env::var("GEO_ENRICH_ASN_DB_URL")
        .unwrap_or_else(|_| DEFAULT_ASN_DB_URL.to_string());

    // 0 disables the deadline entirely.
    let download_timeout = match std::env::var("GEO_ENRICH_DOWNLOAD_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_DOWNLOAD_TIMEOUT_SECS)
    {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    let locale =
        std::env::var("GEO_ENRICH_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string());

    GeoConfig {
        db_dir,
        city_db_url,
        asn_db_url,
        download_timeout,
        locale,
    }
}
