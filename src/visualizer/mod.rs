//! Visualization primitives: colors, default skeleton tables, the figure
//! scene, and the optional interactive viewer.

/// Color definitions and palettes.
pub mod color;

/// In-memory figure scene and rasterization.
pub mod figure;

/// Default skeleton topology tables.
pub mod skeleton;

#[cfg(feature = "visualize")]
pub mod viewer;

pub use color::Color;
pub use figure::{Camera, Element, Figure, Marker, Segment};

#[cfg(feature = "visualize")]
pub use viewer::Viewer;
