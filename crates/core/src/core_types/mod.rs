//! Core types and utilities

pub mod heading;
pub mod region;
pub mod vec2;
pub mod wind;

pub use heading::{normalize_degrees, wrap_delta};
pub use region::{GridPoint, Region};
pub use vec2::Vec2;
pub use wind::Wind;
