//! Reactive map elements over imperative vector shapes.
//!
//! The core type is [`element::PolylineElement`]: it owns one headless
//! [`shape::Polyline`] hosted on a [`map::MapSurface`], mirrors every settable
//! property with a change-notification channel and re-exposes the shape's
//! native lifecycle and interaction events as element channels.

pub mod annotations;
pub mod element;
pub mod events;
pub mod geometry;
pub mod gis;
pub mod map;
pub mod shape;
pub mod styles;

pub use element::PolylineElement;
pub use map::MapSurface;
