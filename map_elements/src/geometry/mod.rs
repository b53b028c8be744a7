//! Geographic coordinate primitives used throughout the crate.

mod coords;
mod latlng;

pub use coords::LineCoords;
pub use latlng::LatLng;
