#![allow(clippy::multiple_crate_versions)]

//! # pose-viz
//!
//! Renders 3D human-pose keypoint sequences as annotated skeletal figures,
//! for visual inspection of per-frame, per-person pose estimates.
//!
//! The input is a pose-sequence artifact: a JSON record produced by an
//! external detection + 2D→3D lifting pipeline, holding skeleton topology,
//! per-joint and per-link colors, and per-frame, per-person keypoints with
//! confidence scores. This crate loads and validates that record, applies a
//! confidence-based visibility filter, and projects the filtered skeleton
//! into a fixed, comparable viewing frame.
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use pose_viz::{PoseSequence, RenderConfig, render_frame};
//!
//! fn main() -> pose_viz::Result<()> {
//!     let sequence = PoseSequence::load("vis_results/results_0.json")?;
//!
//!     // Draw every person detected in frame 5.
//!     let figure = render_frame(&sequence, 5, &RenderConfig::full_frame())?;
//!     figure.save("frame5.png", 960)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Render frame 5 of an artifact to an image
//! pose-viz render --input results.json --frame 5 --output frame5.png
//!
//! # Render only the second person, in the single-person viewing frame
//! pose-viz render -i results.json -f 100 --person 1 --show
//! ```
//!
//! ## Rendering contract
//!
//! - A joint is drawn only when its confidence score exceeds the visibility
//!   threshold (0.3 by default); below-threshold joints are omitted, not
//!   faded.
//! - A skeleton link is drawn only when *both* endpoint scores exceed the
//!   threshold.
//! - Per person, links are drawn before joints, so joints sit above
//!   connecting lines.
//! - The camera is fixed (elevation 10°, azimuth 45°) and the viewing box
//!   and aspect ratio come from [`RenderConfig`] presets, so figures from
//!   different frames and sequences are visually comparable.
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`sequence`] | Validated pose-sequence model and the artifact loader |
//! | [`artifact`] | Raw serde shapes of the JSON artifact |
//! | [`render`] | [`render_frame`] / [`render_person`] entry points |
//! | [`config`] | [`RenderConfig`] and viewing-box presets |
//! | [`visualizer`] | Colors, figure scene, rasterization, window viewer |
//! | [`error`] | Error types ([`PoseVizError`], [`Result`]) |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `visualize` | Interactive window display (default) |

// Modules
pub mod artifact;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod sequence;
pub mod visualizer;

// Re-export main types for convenience
pub use config::{RenderConfig, ViewBounds};
pub use error::{PoseVizError, Result};
pub use render::{render_frame, render_person};
pub use sequence::{FrameRecord, PersonPose, PoseSequence, SkeletonMeta};
pub use visualizer::{Camera, Color, Element, Figure, Marker, Segment};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pose-viz");
    }
}
