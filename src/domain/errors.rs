//! Error types surfaced by provisioning, construction, and lookups.
//!
//! Nothing is retried or recovered internally; every failure keeps its
//! originating cause and is returned to the caller.

use std::net::{AddrParseError, IpAddr};
use std::path::PathBuf;

use maxminddb::MaxMindDBError;

/// Which of the two lookup databases an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    City,
    Asn,
}

impl std::fmt::Display for DbKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbKind::City => write!(f, "city"),
            DbKind::Asn => write!(f, "ASN"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// No explicit database directory was configured and the home
    /// directory could not be determined.
    #[error("cannot determine home directory for default database path")]
    HomeDir,

    #[error("cannot create database directory {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to construct HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to download {url}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} downloading {url}")]
    DownloadStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to store downloaded database at {}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open {kind} database at {}", path.display())]
    DatabaseOpen {
        kind: DbKind,
        path: PathBuf,
        #[source]
        source: MaxMindDBError,
    },

    #[error("invalid IP address {addr:?}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("city lookup failed for {addr}")]
    CityLookup {
        addr: IpAddr,
        #[source]
        source: MaxMindDBError,
    },

    #[error("ASN lookup failed for {addr}")]
    AsnLookup {
        addr: IpAddr,
        #[source]
        source: MaxMindDBError,
    },

    /// The resolver was closed; its database handles are gone.
    #[error("resolver is closed")]
    Closed,
}
