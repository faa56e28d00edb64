//! Solar geometry for the sunline workspace.
//!
//! Two pure entry points: [`position`] computes where the sun sits for
//! a place, a civil moment, and a zone; [`destination_point`] projects
//! the far end of the azimuth line a map layer draws from the chosen
//! location. Neither performs I/O and both are deterministic --
//! identical inputs give identical outputs.

mod position;
mod projection;

pub use position::position;
pub use projection::destination_point;
