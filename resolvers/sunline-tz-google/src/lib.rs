//! Resolves the IANA time zone in effect at a coordinate by asking a
//! remote lookup service (by default, the Google time-zone endpoint
//! the original mobile plugin used).
//!
//! The resolver holds no state beyond its HTTP client and makes one
//! request per resolution -- no caching, no retry. Concurrent calls
//! are independent.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde_derive::Deserialize;
use std::time::Duration;
use sunline_api::{zone, Error, GeoCoordinate, Result, TimeZoneInfo};
use tokio::{net::TcpStream, time};
use tracing::{debug, warn};

const DEFAULT_URL: &str =
    "https://maps.googleapis.com/maps/api/timezone/json";
const DEFAULT_TIMEOUT: u64 = 5;
const DEFAULT_PROBE: &str = "maps.googleapis.com:443";

// How long the connectivity probe waits before declaring the device
// offline. Kept well under the HTTP timeout.

const PROBE_DEADLINE: Duration = Duration::from_secs(2);

/// Connectivity check that attempts a TCP connect to a well-known
/// host. UI layers that already track the platform's network state
/// can substitute their own report via `set_connectivity`.

pub struct TcpProbe {
    addr: String,
}

impl TcpProbe {
    pub fn new(addr: &str) -> TcpProbe {
        TcpProbe {
            addr: String::from(addr),
        }
    }
}

#[async_trait]
impl zone::Connectivity for TcpProbe {
    async fn is_online(&self) -> bool {
        matches!(
            time::timeout(PROBE_DEADLINE, TcpStream::connect(&self.addr))
                .await,
            Ok(Ok(_))
        )
    }
}

// The portion of the lookup service's JSON reply we care about. The
// service sends more fields (raw offset, DST offset, status) but the
// zone identifier is the only one this resolver trusts; offsets are
// re-derived from the zone database so DST is evaluated consistently.

#[derive(Deserialize)]
struct Reply {
    #[serde(rename = "timeZoneId")]
    time_zone_id: Option<String>,
}

// Builds the timestamp the lookup is keyed on: midnight of the date,
// taken as a UTC instant. The zone's DST state gets evaluated at this
// reference timestamp rather than at the requested hour; zone
// identity rarely changes within a day.

fn reference_timestamp(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

// Maps a transport-level status onto the error taxonomy. Anything
// other than success is a failed lookup; there is no retry.

fn check_status(status: reqwest::StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::LookupFailed(format!(
            "lookup service returned {}",
            status
        )))
    }
}

// Extracts and validates the zone identifier from a reply body.
// Malformed JSON, a missing field, and an identifier the zone
// database doesn't know are all the same failure to the caller.

fn decode_reply(body: &str) -> Result<Tz> {
    let reply: Reply = serde_json::from_str(body).map_err(|e| {
        Error::LookupFailed(format!("malformed reply -- {}", &e))
    })?;

    let id = reply.time_zone_id.ok_or_else(|| {
        Error::LookupFailed(String::from(
            "reply is missing the time zone id",
        ))
    })?;

    id.parse::<Tz>().map_err(|_| {
        Error::LookupFailed(format!(
            "unrecognized zone identifier '{}'",
            &id
        ))
    })
}

pub struct Instance {
    con: reqwest::Client,
    url: String,
    probe: Box<dyn zone::Connectivity>,
}

impl Instance {
    pub const NAME: &'static str = "tz-google";

    pub const SUMMARY: &'static str =
        "resolves IANA time zones through a remote lookup service";

    fn get_cfg_url(cfg: &zone::SourceConfig) -> Result<String> {
        match cfg.get("url") {
            Some(toml::value::Value::String(val)) => Ok(val.to_string()),
            Some(_) => Err(Error::ConfigError(String::from(
                "'url' config parameter should be a string",
            ))),
            None => Ok(String::from(DEFAULT_URL)),
        }
    }

    fn get_cfg_timeout(cfg: &zone::SourceConfig) -> Result<Duration> {
        match cfg.get("timeout") {
            Some(toml::value::Value::Integer(val)) => {
                if (1..=300).contains(val) {
                    Ok(Duration::from_secs(*val as u64))
                } else {
                    Err(Error::ConfigError(String::from(
                        "'timeout' out of range",
                    )))
                }
            }
            Some(_) => Err(Error::ConfigError(String::from(
                "'timeout' config parameter should be a positive integer",
            ))),
            None => Ok(Duration::from_secs(DEFAULT_TIMEOUT)),
        }
    }

    fn get_cfg_probe(cfg: &zone::SourceConfig) -> Result<String> {
        match cfg.get("probe") {
            Some(toml::value::Value::String(val)) => Ok(val.to_string()),
            Some(_) => Err(Error::ConfigError(String::from(
                "'probe' config parameter should be a host:port string",
            ))),
            None => Ok(String::from(DEFAULT_PROBE)),
        }
    }

    /// Creates a resolver from its configuration table. The request
    /// timeout is explicit here rather than left to the client's
    /// defaults.

    pub fn create_instance(cfg: &zone::SourceConfig) -> Result<Instance> {
        let url = Instance::get_cfg_url(cfg)?;
        let timeout = Instance::get_cfg_timeout(cfg)?;
        let probe = Instance::get_cfg_probe(cfg)?;

        match reqwest::Client::builder().timeout(timeout).build() {
            Ok(con) => Ok(Instance {
                con,
                url,
                probe: Box::new(TcpProbe::new(&probe)),
            }),
            Err(e) => Err(Error::ConfigError(format!(
                "couldn't build client connection -- {}",
                &e
            ))),
        }
    }

    /// Replaces the connectivity check. Useful when the embedding
    /// layer already knows the device's network state, and in tests.

    pub fn set_connectivity(
        &mut self,
        probe: Box<dyn zone::Connectivity>,
    ) {
        self.probe = probe
    }
}

#[async_trait]
impl zone::Source for Instance {
    async fn resolve(
        &self,
        coordinate: &GeoCoordinate,
        date: NaiveDate,
    ) -> Result<TimeZoneInfo> {
        // Fail fast when offline so the caller gets an actionable
        // "check your connection" state instead of an HTTP timeout.

        if !self.probe.is_online().await {
            warn!("device offline");
            return Err(Error::NetworkUnavailable);
        }

        let timestamp = reference_timestamp(date);

        debug!(
            "looking up zone for {:.4},{:.4} at {}",
            coordinate.latitude(),
            coordinate.longitude(),
            timestamp
        );

        let reply = self
            .con
            .get(&self.url)
            .query(&[
                (
                    "location",
                    format!(
                        "{},{}",
                        coordinate.latitude(),
                        coordinate.longitude()
                    ),
                ),
                ("timestamp", timestamp.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                Error::LookupFailed(format!(
                    "couldn't reach lookup service -- {}",
                    &e
                ))
            })?;

        check_status(reply.status())?;

        let body = reply.text().await.map_err(|e| {
            Error::LookupFailed(format!(
                "couldn't read reply body -- {}",
                &e
            ))
        })?;

        let tz = decode_reply(&body)?;

        debug!("resolved zone: {}", tz.name());

        Ok(TimeZoneInfo::for_date(tz, date))
    }
}
