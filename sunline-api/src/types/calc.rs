use super::{CivilDateTime, GeoCoordinate, TimeZoneInfo};

/// One calculation's worth of input. A request is built fresh for each
/// user-triggered recomputation, handed to the engine, and discarded
/// once its result (or failure) has been delivered; requests are never
/// retried and never shared.

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    pub coordinate: GeoCoordinate,
    pub date_time: CivilDateTime,

    /// The zone to use when the caller already knows it. Ignored when
    /// `use_remote_zone_lookup` is set.
    pub explicit_zone: Option<TimeZoneInfo>,

    /// When set, the engine resolves the zone through its remote
    /// source before computing.
    pub use_remote_zone_lookup: bool,
}

impl CalculationRequest {
    /// A request whose zone is already known.

    pub fn with_zone(
        coordinate: GeoCoordinate,
        date_time: CivilDateTime,
        zone: TimeZoneInfo,
    ) -> CalculationRequest {
        CalculationRequest {
            coordinate,
            date_time,
            explicit_zone: Some(zone),
            use_remote_zone_lookup: false,
        }
    }

    /// A request that asks the engine to resolve the zone remotely.

    pub fn with_lookup(
        coordinate: GeoCoordinate,
        date_time: CivilDateTime,
    ) -> CalculationRequest {
        CalculationRequest {
            coordinate,
            date_time,
            explicit_zone: None,
            use_remote_zone_lookup: true,
        }
    }
}

/// Where the sun sits for a request's place and moment. Azimuth is in
/// degrees clockwise from true north, within [0, 360). Altitude is in
/// degrees above (positive) or below (negative) the horizon, within
/// [-90, 90]. A negative altitude is still reported -- whether to draw
/// anything for a sun below the horizon is the caller's policy.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationResult {
    pub azimuth: f64,
    pub altitude: f64,
}
