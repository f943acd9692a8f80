//! MaxMind GeoIP Resolver
//!
//! Implements the GeoResolver port over a pair of local GeoLite2 databases
//! (city/location and ASN), provisioned on first use.

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use maxminddb::{geoip2, Reader};
use parking_lot::RwLock;
use tracing::{debug, info};

use super::provisioner::{DatabaseProvisioner, ASN_DB_FILE, CITY_DB_FILE};
use crate::config::GeoConfig;
use crate::domain::entities::GeoRecord;
use crate::domain::errors::{DbKind, GeoError};
use crate::domain::ports::GeoResolver;
use crate::domain::services::localized_name;

/// Open readers for the two lookup databases.
///
/// Kept as one value behind the lock so the resolver is always either
/// fully open or fully closed; a state with a single usable handle is
/// unrepresentable.
struct DbHandles {
    city: Reader<Vec<u8>>,
    asn: Reader<Vec<u8>>,
}

/// GeoIP resolver backed by local MaxMind GeoLite2 databases.
///
/// Construction provisions the database files (downloading any that are
/// missing) and opens both read-only handles. The resolver is a passive,
/// thread-safe object: any number of callers may run lookups concurrently,
/// while `close` waits out in-flight lookups and releases both handles.
pub struct MaxMindGeoResolver {
    handles: RwLock<Option<DbHandles>>,
    db_dir: PathBuf,
    locale: String,
}

impl MaxMindGeoResolver {
    /// Provision and open both databases.
    ///
    /// Files downloaded before a later step fails stay on disk, so a retry
    /// does not fetch them again.
    pub fn open(config: &GeoConfig) -> Result<Self, GeoError> {
        let db_dir = config.resolved_db_dir()?;

        let provisioner = DatabaseProvisioner::new(config.download_timeout)?;
        provisioner.ensure(&db_dir, &config.city_db_url, &config.asn_db_url)?;

        let city_path = db_dir.join(CITY_DB_FILE);
        let city = Reader::open_readfile(&city_path).map_err(|source| GeoError::DatabaseOpen {
            kind: DbKind::City,
            path: city_path,
            source,
        })?;

        // A failure here drops the city reader on the way out; no handle
        // outlives a failed construction.
        let asn_path = db_dir.join(ASN_DB_FILE);
        let asn = Reader::open_readfile(&asn_path).map_err(|source| GeoError::DatabaseOpen {
            kind: DbKind::Asn,
            path: asn_path,
            source,
        })?;

        info!("geo databases ready in {}", db_dir.display());

        Ok(Self {
            handles: RwLock::new(Some(DbHandles { city, asn })),
            db_dir,
            locale: config.locale.clone(),
        })
    }

    /// Directory holding the two database files.
    pub fn db_dir(&self) -> &Path {
        &self.db_dir
    }

    fn build_record(&self, city: geoip2::City<'_>, asn: geoip2::Asn<'_>) -> GeoRecord {
        let subdivision = city.subdivisions.as_ref().and_then(|subs| subs.first());
        let location = city.location.as_ref();

        GeoRecord {
            continent: localized_name(
                city.continent.as_ref().and_then(|c| c.names.as_ref()),
                &self.locale,
            ),
            continent_code: city
                .continent
                .as_ref()
                .and_then(|c| c.code)
                .map(str::to_owned),
            country: localized_name(
                city.country.as_ref().and_then(|c| c.names.as_ref()),
                &self.locale,
            ),
            country_code: city
                .country
                .as_ref()
                .and_then(|c| c.iso_code)
                .map(str::to_owned),
            region: localized_name(subdivision.and_then(|s| s.names.as_ref()), &self.locale),
            region_code: subdivision.and_then(|s| s.iso_code).map(str::to_owned),
            city: localized_name(
                city.city.as_ref().and_then(|c| c.names.as_ref()),
                &self.locale,
            ),
            postal_code: city.postal.as_ref().and_then(|p| p.code).map(str::to_owned),
            latitude: location.and_then(|l| l.latitude),
            longitude: location.and_then(|l| l.longitude),
            time_zone: location.and_then(|l| l.time_zone).map(str::to_owned),
            accuracy_radius: location.and_then(|l| l.accuracy_radius),
            asn: asn.autonomous_system_number,
            asn_org: asn.autonomous_system_organization.map(str::to_owned),
            // isp, domain, network_type, and the risk flags stay at their
            // defaults; the GeoLite2 pair has no data for them.
            ..GeoRecord::default()
        }
    }
}

impl std::fmt::Debug for MaxMindGeoResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaxMindGeoResolver")
            .field("db_dir", &self.db_dir)
            .field("locale", &self.locale)
            .field("open", &self.handles.read().is_some())
            .finish()
    }
}

impl GeoResolver for MaxMindGeoResolver {
    fn lookup(&self, addr: &str) -> Result<GeoRecord, GeoError> {
        // Reject garbage before going anywhere near the databases.
        let ip: IpAddr = addr.parse().map_err(|source| GeoError::InvalidAddress {
            addr: addr.to_string(),
            source,
        })?;

        let guard = self.handles.read();
        let handles = guard.as_ref().ok_or(GeoError::Closed)?;

        let city: geoip2::City = handles
            .city
            .lookup(ip)
            .map_err(|source| GeoError::CityLookup { addr: ip, source })?;

        let asn: geoip2::Asn = handles
            .asn
            .lookup(ip)
            .map_err(|source| GeoError::AsnLookup { addr: ip, source })?;

        Ok(self.build_record(city, asn))
    }

    fn close(&self) {
        let mut guard = self.handles.write();
        if guard.take().is_some() {
            debug!("geo databases closed");
        }
    }
}
