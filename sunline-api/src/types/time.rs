use super::Error;
use crate::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;

/// A wall-clock moment on the Gregorian calendar: year, month, day,
/// hour, minute, second. It carries no zone of its own -- the zone
/// travels separately and may be unknown until resolved.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilDateTime(NaiveDateTime);

impl CivilDateTime {
    /// Creates a civil date-time, rejecting calendar combinations that
    /// don't exist (month 13, Feb 30th, hour 24, and so on).

    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<CivilDateTime> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .map(CivilDateTime)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02} is not a valid \
                     civil time",
                    year, month, day, hour, minute, second
                ))
            })
    }

    /// The calendar date portion. Time-zone resolution keys off the
    /// date alone.

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }
}

/// A time zone pinned to a specific moment: the IANA identifier plus
/// the UTC offset (seconds east, DST included) in effect there. The
/// offset is a property of (zone, instant), not a constant, so values
/// of this type are only meaningful for the request that produced
/// them.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeZoneInfo {
    id: String,
    offset_secs: i32,
}

impl TimeZoneInfo {
    /// Builds a zone from an already-known offset. Used when the
    /// caller supplies the zone explicitly instead of asking for a
    /// remote lookup.

    pub fn fixed(id: &str, offset_secs: i32) -> TimeZoneInfo {
        TimeZoneInfo {
            id: String::from(id),
            offset_secs,
        }
    }

    /// Evaluates `tz` at midnight (UTC) of the given date and captures
    /// the offset in effect there. DST state is taken from that
    /// reference instant, not from the requested hour; zone identity
    /// rarely changes within a day.

    pub fn for_date(tz: Tz, date: NaiveDate) -> TimeZoneInfo {
        let reference = date.and_time(NaiveTime::MIN);
        let offset = tz.offset_from_utc_datetime(&reference).fix();

        TimeZoneInfo {
            id: String::from(tz.name()),
            offset_secs: offset.local_minus_utc(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn offset_seconds(&self) -> i32 {
        self.offset_secs
    }
}

#[cfg(test)]
mod tests {
    use super::{CivilDateTime, TimeZoneInfo};
    use chrono::NaiveDate;
    use chrono_tz::Tz;

    #[test]
    fn test_civil_validation() {
        assert!(CivilDateTime::new(2014, 2, 30, 0, 0, 0).is_err());
        assert!(CivilDateTime::new(2014, 13, 1, 0, 0, 0).is_err());
        assert!(CivilDateTime::new(2014, 6, 15, 24, 0, 0).is_err());
        assert!(CivilDateTime::new(2014, 6, 15, 12, 60, 0).is_err());

        // Leap day is only valid in a leap year.

        assert!(CivilDateTime::new(2012, 2, 29, 0, 0, 0).is_ok());
        assert!(CivilDateTime::new(2014, 2, 29, 0, 0, 0).is_err());
    }

    #[test]
    fn test_offset_tracks_dst() {
        let tz = "America/New_York".parse::<Tz>().unwrap();

        // Standard time in January, daylight time in July.

        let winter = TimeZoneInfo::for_date(
            tz,
            NaiveDate::from_ymd_opt(2014, 1, 1).unwrap(),
        );
        let summer = TimeZoneInfo::for_date(
            tz,
            NaiveDate::from_ymd_opt(2014, 7, 1).unwrap(),
        );

        assert_eq!(winter.offset_seconds(), -5 * 3600);
        assert_eq!(summer.offset_seconds(), -4 * 3600);
        assert_eq!(winter.id(), "America/New_York");
    }

    #[test]
    fn test_fixed_zone() {
        let z = TimeZoneInfo::fixed("Etc/GMT-4", 4 * 3600);

        assert_eq!(z.id(), "Etc/GMT-4");
        assert_eq!(z.offset_seconds(), 14400);
    }
}
