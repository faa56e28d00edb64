use sunline_api::GeoCoordinate;

/// Projects the point reached by traveling `distance` from `origin`
/// along `bearing` (degrees clockwise from north).
///
/// `distance` is a planar span expressed in degrees -- the map layer
/// passes the visible region's longitude span so the drawn azimuth
/// line always crosses the viewport. This is a flat-projection step,
/// not a great-circle solution: at the scale of a single viewport the
/// difference is invisible and the arithmetic is cheaper. The result
/// is bounded (latitude clamped, longitude wrapped) so it is always a
/// renderable coordinate.

pub fn destination_point(
    origin: &GeoCoordinate,
    bearing: f64,
    distance: f64,
) -> GeoCoordinate {
    let (sin_b, cos_b) = bearing.to_radians().sin_cos();

    GeoCoordinate::bounded(
        origin.latitude() + distance * cos_b,
        origin.longitude() + distance * sin_b,
    )
}
