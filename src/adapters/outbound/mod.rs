mod maxmind_geo_resolver;
mod provisioner;

pub use maxmind_geo_resolver::MaxMindGeoResolver;
pub use provisioner::{DatabaseProvisioner, ASN_DB_FILE, CITY_DB_FILE};
