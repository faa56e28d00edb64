//! This crate is shared by the components of the `sunline` workspace.
//!
//! The types and traits defined here are useful for those wishing to
//! embed the calculation engine in a UI layer or to provide an
//! alternate time-zone source for it.

mod types;

// Pull types down to the `sunline-api` namespace.

pub use types::{
    CalculationRequest, CalculationResult, CivilDateTime, Error,
    GeoCoordinate, TimeZoneInfo,
};

/// A specialization of `std::result::Result<>` where the error value
/// is `types::Error`.

pub type Result<T> = std::result::Result<T, Error>;

pub mod zone;
