//! PanShake Project Model
//!
//! Defines the data contracts the shake generator works against:
//! - **Geometry:** Vertices and four-corner pan/crop bounds
//! - **Motion:** Frame-anchored pan/crop keyframes of a video event
//! - **Project:** Tracks, video events, media dimensions, selection
//!
//! All coordinates are in source video pixels.

pub mod geometry;
pub mod motion;
pub mod project;

pub use geometry::*;
pub use motion::*;
pub use project::*;
