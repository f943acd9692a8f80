//! GeoIP Resolver Port
//!
//! Defines the interface for resolving IP addresses to geographic location
//! and network-ownership metadata.

use crate::domain::entities::GeoRecord;
use crate::domain::errors::GeoError;

/// Resolver for IP address to geographic and network-ownership metadata.
///
/// This is an outbound port that abstracts the lookup databases.
/// Implementations may use MaxMind GeoLite2, IP2Location, or other sources.
/// Implementations are passive and thread-safe: callers may run any number
/// of lookups concurrently from their own threads.
pub trait GeoResolver: Send + Sync {
    /// Resolve a textual IPv4 or IPv6 address to a metadata record.
    fn lookup(&self, addr: &str) -> Result<GeoRecord, GeoError>;

    /// Release the underlying database handles.
    ///
    /// Idempotent. Lookups issued after close fail with
    /// [`GeoError::Closed`].
    fn close(&self);
}
