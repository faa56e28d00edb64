//! Defines fundamental types used throughout the sunline codebase.

use std::fmt;
use tokio::sync::oneshot;

/// Enumerates all the errors that can be reported by the calculation
/// engine. Every failure is terminal for the request that produced it;
/// nothing in the core retries. If retrying makes sense, the caller
/// issues a fresh request.

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Error {
    /// A coordinate or date-time was outside its valid domain, or a
    /// request was missing a required field. This is a caller bug and
    /// is surfaced immediately.
    InvalidInput(String),

    /// No network connectivity was present when a remote time-zone
    /// resolution was attempted. No lookup request was made.
    NetworkUnavailable,

    /// The remote lookup completed at the transport level but its
    /// response was unusable. The string describes what was wrong.
    LookupFailed(String),

    /// A time zone was required but could not be obtained. Wraps the
    /// resolver failure that caused it.
    ZoneUnresolved(Box<Error>),

    /// A request's reply channel was closed before a result could be
    /// delivered, or a superseded request was dropped.
    Canceled(String),

    /// A bad parameter was given in a configuration or a
    /// configuration was missing a required parameter.
    ConfigError(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidInput(v) => write!(f, "invalid input: {}", &v),
            Error::NetworkUnavailable => write!(f, "network unavailable"),
            Error::LookupFailed(v) => {
                write!(f, "time zone lookup failed: {}", &v)
            }
            Error::ZoneUnresolved(e) => {
                write!(f, "time zone could not be determined -- {}", &e)
            }
            Error::Canceled(v) => write!(f, "request canceled: {}", &v),
            Error::ConfigError(v) => write!(f, "config error: {}", &v),
        }
    }
}

// Defining this trait implementation allows code that awaits a reply
// in a `oneshot` to translate the channel error into a sunline error
// with `?`. A superseded request shows up this way: its sender is
// dropped, so the receiver resolves to this error.

impl From<oneshot::error::RecvError> for Error {
    fn from(_error: oneshot::error::RecvError) -> Self {
        Error::Canceled(String::from("request dropped"))
    }
}

mod calc;
mod geo;
mod time;

pub use calc::{CalculationRequest, CalculationResult};
pub use geo::GeoCoordinate;
pub use time::{CivilDateTime, TimeZoneInfo};
