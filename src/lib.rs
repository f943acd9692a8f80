//! geo-enrich Library
//!
//! IP-to-geolocation and network-ownership enrichment for host scanning
//! pipelines. This module exposes the resolver components for use as a
//! library and in integration tests.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use adapters::outbound::{DatabaseProvisioner, MaxMindGeoResolver};
pub use config::{load_config, GeoConfig};
pub use domain::entities::GeoRecord;
pub use domain::errors::{DbKind, GeoError};
pub use domain::ports::GeoResolver;
pub use domain::services::localized_name;
