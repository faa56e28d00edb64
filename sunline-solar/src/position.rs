// The formulas in this module were obtained from
//
//	https://www.sciencedirect.com/science/article/pii/S0960148121004031
//
// which compares published solar position algorithms and includes the
// reference implementation this code follows.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use sunline_api::{
    CalculationResult, CivilDateTime, Error, GeoCoordinate, Result,
    TimeZoneInfo,
};
use tracing::debug;

// Collapses a civil wall-clock time plus its zone offset into the
// single UTC instant the position formulas work in.

fn to_utc(
    date_time: &CivilDateTime,
    zone: &TimeZoneInfo,
) -> Result<DateTime<Utc>> {
    date_time
        .naive()
        .checked_sub_signed(Duration::seconds(
            zone.offset_seconds() as i64
        ))
        .map(|v| Utc.from_utc_datetime(&v))
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "{:?} with offset {} s is outside the supported range",
                date_time,
                zone.offset_seconds()
            ))
        })
}

/// Computes the sun's azimuth and altitude as seen from `coordinate`
/// at the wall-clock moment `date_time` in `zone`.
///
/// Azimuth is returned in degrees clockwise from true north, within
/// [0, 360); altitude in degrees relative to the horizon, within
/// [-90, 90]. A sun below the horizon comes back with a negative
/// altitude rather than an error -- suppressing the drawn line in
/// that case is up to the caller.

pub fn position(
    coordinate: &GeoCoordinate,
    date_time: &CivilDateTime,
    zone: &TimeZoneInfo,
) -> Result<CalculationResult> {
    let time = to_utc(date_time, zone)?;

    // Convert time-of-day to a floating point value in the range 0.0
    // through 23.999.

    let gmtime: f64 = time.hour() as f64
        + ((time.minute() * 60 + time.second()) as f64 / 3600.0);

    // Calculate the number of days since the "base date" used by
    // these formulas (Jan 1st, 2000 UTC). The number of leap years
    // will be correct until 2100.

    let leap_days: f64 = ((time.year() - 2000) / 4 + 1) as f64;
    let n: f64 = leap_days
        + (time.year() - 2000) as f64 * 365.0
        + time.ordinal0() as f64
        + gmtime / 24.0
        - 1.5;

    // Mean longitude and mean anomaly of the sun.

    let mean_lon: f64 = (280.466 + 0.9856474 * n).rem_euclid(360.0);
    let mean_anom: f64 =
        (357.528 + 0.9856003 * n).rem_euclid(360.0).to_radians();

    // Ecliptic longitude, corrected for the orbit's eccentricity.

    let (sin_ecl, cos_ecl) = (mean_lon
        + 1.915 * mean_anom.sin()
        + 0.020 * (2.0 * mean_anom).sin())
    .rem_euclid(360.0)
    .to_radians()
    .sin_cos();

    // Obliquity of the ecliptic.

    let (sin_obl, cos_obl) =
        (23.440 - 0.0000004 * n).to_radians().sin_cos();

    // Right ascension and declination.

    let ra: f64 = f64::atan2(cos_obl * sin_ecl, cos_ecl)
        .to_degrees()
        .rem_euclid(360.0);
    let decl: f64 = f64::asin(sin_obl * sin_ecl);
    let (sin_decl, cos_decl) = decl.sin_cos();

    // Equation of time (in degrees of rotation), then the sub-solar
    // longitude and the observer-relative hour angle.

    let eot: f64 = (mean_lon - ra + 180.0).rem_euclid(360.0) - 180.0;
    let sun_lon: f64 = -15.0 * (gmtime - 12.0 + eot / 15.0);

    let (sin_ha, cos_ha) =
        (sun_lon - coordinate.longitude()).to_radians().sin_cos();
    let (sin_lat, cos_lat) =
        coordinate.latitude().to_radians().sin_cos();

    // Project the sun direction into the observer's horizontal frame.

    let sx: f64 = cos_decl * sin_ha;
    let sy: f64 = cos_lat * sin_decl - sin_lat * cos_decl * cos_ha;
    let sz: f64 = sin_lat * sin_decl + cos_lat * cos_decl * cos_ha;

    // The clamp guards against |sz| creeping past 1.0 through float
    // rounding when the sun is at the zenith or nadir.

    let altitude: f64 = f64::asin(sz.clamp(-1.0, 1.0)).to_degrees();
    let azimuth: f64 =
        (f64::atan2(-sx, -sy).to_degrees() + 180.0).rem_euclid(360.0);

    debug!("alt: {:.2}, az: {:.2}", altitude, azimuth);

    Ok(CalculationResult { azimuth, altitude })
}

#[cfg(test)]
mod tests {
    use super::position;
    use sunline_api::{CivilDateTime, GeoCoordinate, TimeZoneInfo};

    fn close_enough(a: f64, b: f64, delta: f64) -> bool {
        (a - b).abs() <= delta
    }

    fn utc() -> TimeZoneInfo {
        TimeZoneInfo::fixed("Etc/UTC", 0)
    }

    struct TestData {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        offset: i32,
        lat: f64,
        lng: f64,
        az: f64,
        alt: f64,
    }

    #[test]
    fn test_position() {
        // The expected values were obtained from
        // https://gml.noaa.gov/grad/solcalc/ -- the first group is
        // noon UTC on Jan 1st, 2000 at several latitudes, the second
        // is two hours either side of noon on Jul 1st, 2010, and the
        // remainder repeat earlier rows as local civil times in
        // non-zero zone offsets (same instant, so same answer).

        const TEST_DATA: &[TestData] = &[
            TestData {
                year: 2000,
                month: 1,
                day: 1,
                hour: 12,
                offset: 0,
                lat: 45.0,
                lng: 0.0,
                az: 179.18,
                alt: 22.0,
            },
            TestData {
                year: 2000,
                month: 1,
                day: 1,
                hour: 12,
                offset: 0,
                lat: 0.0,
                lng: 0.0,
                az: 178.06,
                alt: 66.96,
            },
            TestData {
                year: 2000,
                month: 1,
                day: 1,
                hour: 12,
                offset: 0,
                lat: -45.0,
                lng: 0.0,
                az: 2.03,
                alt: 68.03,
            },
            TestData {
                year: 2000,
                month: 1,
                day: 1,
                hour: 18,
                offset: 0,
                lat: 45.0,
                lng: -90.0,
                az: 179.15,
                alt: 22.02,
            },
            TestData {
                year: 2000,
                month: 1,
                day: 1,
                hour: 6,
                offset: 0,
                lat: 0.0,
                lng: 90.0,
                az: 178.13,
                alt: 66.94,
            },
            TestData {
                year: 2010,
                month: 7,
                day: 1,
                hour: 10,
                offset: 0,
                lat: 45.0,
                lng: 0.0,
                az: 120.65,
                alt: 56.65,
            },
            TestData {
                year: 2010,
                month: 7,
                day: 1,
                hour: 14,
                offset: 0,
                lat: 0.0,
                lng: 0.0,
                az: 311.29,
                alt: 53.55,
            },
            TestData {
                year: 2010,
                month: 7,
                day: 1,
                hour: 14,
                offset: 0,
                lat: -45.0,
                lng: 0.0,
                az: 332.18,
                alt: 17.0,
            },
            // 14:00 at UTC+4 is 10:00 UTC.
            TestData {
                year: 2010,
                month: 7,
                day: 1,
                hour: 14,
                offset: 4 * 3600,
                lat: 45.0,
                lng: 0.0,
                az: 120.65,
                alt: 56.65,
            },
            // 13:00 at UTC-5 is 18:00 UTC.
            TestData {
                year: 2000,
                month: 1,
                day: 1,
                hour: 13,
                offset: -5 * 3600,
                lat: 45.0,
                lng: -90.0,
                az: 179.15,
                alt: 22.02,
            },
        ];

        for data in TEST_DATA {
            let coord = GeoCoordinate::new(data.lat, data.lng).unwrap();
            let dt = CivilDateTime::new(
                data.year, data.month, data.day, data.hour, 0, 0,
            )
            .unwrap();
            let zone = TimeZoneInfo::fixed("test", data.offset);
            let pos = position(&coord, &dt, &zone).unwrap();

            assert!(
                close_enough(pos.altitude, data.alt, 0.2),
                "altitude: {} <> {}",
                pos.altitude,
                data.alt
            );
            assert!(
                close_enough(pos.azimuth, data.az, 0.2),
                "azimuth: {} <> {}",
                pos.azimuth,
                data.az
            );
        }
    }

    #[test]
    fn test_equinox_noon_altitude() {
        // Near solar noon on an equinox, altitude is close to 90
        // degrees minus the observer's absolute latitude. The sun
        // isn't exactly at the zenith at 12:00 (the equation of time
        // is about -8 minutes in late March), hence the loose
        // tolerance.

        for lat in [0.0, 45.0, -30.0] {
            let coord = GeoCoordinate::new(lat, 0.0).unwrap();
            let dt =
                CivilDateTime::new(2000, 3, 20, 12, 0, 0).unwrap();
            let pos = position(&coord, &dt, &utc()).unwrap();

            assert!(
                close_enough(pos.altitude, 90.0 - lat.abs(), 3.0),
                "lat {}: altitude {} too far from {}",
                lat,
                pos.altitude,
                90.0 - lat.abs()
            );
        }
    }

    #[test]
    fn test_below_horizon_reported() {
        // Midnight at mid-northern latitude in January: the sun is
        // well below the horizon and the value says so.

        let coord = GeoCoordinate::new(45.0, 0.0).unwrap();
        let dt = CivilDateTime::new(2000, 1, 1, 0, 0, 0).unwrap();
        let pos = position(&coord, &dt, &utc()).unwrap();

        assert!(pos.altitude < -40.0);
    }

    #[test]
    fn test_output_ranges() {
        // Sweep a coarse grid of places and hours; every output must
        // land in the documented ranges.

        for lat in [-90.0, -60.0, -30.0, 0.0, 30.0, 60.0, 90.0] {
            for lng in [-180.0, -120.0, -60.0, 0.0, 60.0, 120.0, 180.0]
            {
                for hour in [0, 6, 12, 18] {
                    let coord = GeoCoordinate::new(lat, lng).unwrap();
                    let dt =
                        CivilDateTime::new(2014, 5, 5, hour, 30, 0)
                            .unwrap();
                    let pos = position(&coord, &dt, &utc()).unwrap();

                    assert!(
                        (0.0..360.0).contains(&pos.azimuth),
                        "azimuth {} out of range",
                        pos.azimuth
                    );
                    assert!(
                        (-90.0..=90.0).contains(&pos.altitude),
                        "altitude {} out of range",
                        pos.altitude
                    );
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let coord = GeoCoordinate::new(51.5, -0.12).unwrap();
        let dt = CivilDateTime::new(2014, 8, 7, 15, 42, 10).unwrap();
        let zone = TimeZoneInfo::fixed("Europe/London", 3600);

        let a = position(&coord, &dt, &zone).unwrap();
        let b = position(&coord, &dt, &zone).unwrap();

        assert_eq!(a.azimuth.to_bits(), b.azimuth.to_bits());
        assert_eq!(a.altitude.to_bits(), b.altitude.to_bits());
    }
}
