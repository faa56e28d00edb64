//! Defines the traits that connect the calculation engine to a
//! time-zone source.
//!
//! Keeping zone acquisition behind a trait is what makes the engine
//! unit-testable without network access: tests substitute a local
//! fixture where production wires in the HTTP resolver.

use crate::{GeoCoordinate, Result, TimeZoneInfo};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Represents how configuration information is given to a zone
/// source. Since sources can have different requirements, the config
/// structure needs to be as general as possible. A `SourceConfig`
/// type is a map with `String` keys and `toml::Value` values.
pub type SourceConfig = toml::value::Table;

/// Something that can produce the time zone in effect at a point on a
/// date. Implementations hold no per-request state; concurrent calls
/// must be independent.

#[async_trait]
pub trait Source: Send + Sync {
    /// Obtains the zone valid at `coordinate` on `date`. Failures are
    /// reported through the sunline error taxonomy:
    /// `NetworkUnavailable` when no connection is present and
    /// `LookupFailed` when the source replied with something unusable.

    async fn resolve(
        &self,
        coordinate: &GeoCoordinate,
        date: NaiveDate,
    ) -> Result<TimeZoneInfo>;
}

/// Reports whether the device currently has network connectivity.
/// Checked before any remote lookup so that an offline device fails
/// fast with a distinguishable error instead of waiting out an HTTP
/// timeout.

#[async_trait]
pub trait Connectivity: Send + Sync {
    async fn is_online(&self) -> bool;
}
