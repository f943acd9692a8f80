mod geo_resolver;

pub use geo_resolver::GeoResolver;
