//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the enrichment domain.
//! They have no external dependencies and contain only business logic.

use serde::{Deserialize, Serialize};

/// Geographic location and network ownership resolved for one IP address.
///
/// A pure projection of the lookup result: no identity beyond the queried
/// address, cheap to clone, and serialized with absent fields omitted so
/// scan reports stay compact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoRecord {
    /// Continent name in the configured locale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    /// Two-letter continent code (EU, NA, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent_code: Option<String>,
    /// Country name in the configured locale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 country code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Name of the most specific subdivision, when the database has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// ISO 3166-2 subdivision code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    /// City name in the configured locale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// IANA timezone name (e.g. "Europe/Berlin")
    #[serde(rename = "timezone", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Radius in kilometers around the coordinates within which the
    /// address is expected to lie
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_radius: Option<u16>,

    /// Autonomous system number announcing the address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<u32>,
    /// Organization registered for the autonomous system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn_org: Option<String>,

    // The GeoLite2 City/ASN pair carries none of the following; the fields
    // are reserved for databases that do.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_type: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_anonymous: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_anonymous_vpn: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_hosting: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_proxy: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_tor_exit_node: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}
