//! Render configuration.
//!
//! This module defines the [`RenderConfig`] struct, which controls the
//! confidence-based visibility filter and the fixed viewing frame used by
//! the skeleton renderer. The two presets correspond to the two render
//! modes: a wider box for whole-frame composition and a tighter, taller box
//! for a single person.

/// Axis-aligned 3D viewing box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    /// Inclusive x range (min, max).
    pub x: (f32, f32),
    /// Inclusive y range (min, max).
    pub y: (f32, f32),
    /// Inclusive z range (min, max).
    pub z: (f32, f32),
}

impl ViewBounds {
    /// Viewing box for all-persons-in-frame rendering.
    pub const FULL_FRAME: Self = Self {
        x: (-0.8, 0.8),
        y: (-0.8, 0.8),
        z: (0.0, 2.0),
    };

    /// Viewing box for single-person rendering.
    pub const SINGLE_PERSON: Self = Self {
        x: (-0.5, 0.5),
        y: (-0.5, 0.5),
        z: (0.0, 1.6),
    };
}

/// Configuration for skeleton rendering.
///
/// Keeps the visibility threshold and viewing frame as explicit, named
/// parameters so the drawing pipeline is a pure function of its inputs.
/// Uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use pose_viz::{RenderConfig, ViewBounds};
///
/// let config = RenderConfig::single_person()
///     .with_visibility_threshold(0.5)
///     .with_view_bounds(ViewBounds::FULL_FRAME);
/// ```
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Minimum confidence score for a joint to be drawn (exclusive).
    /// Joints at or below this value are omitted entirely, and any link
    /// touching them is omitted as well.
    pub visibility_threshold: f32,
    /// Axis-aligned viewing box the skeleton is projected into.
    pub view_bounds: ViewBounds,
    /// Relative axis scaling of the viewing box (x : y : z).
    pub aspect_ratio: [f32; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::full_frame()
    }
}

impl RenderConfig {
    /// Default visibility cutoff used by both render modes.
    pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.3;

    /// Preset for all-persons-in-frame rendering: x, y in [-0.8, 0.8],
    /// z in [0, 2], aspect 1:1:1.
    #[must_use]
    pub const fn full_frame() -> Self {
        Self {
            visibility_threshold: Self::DEFAULT_VISIBILITY_THRESHOLD,
            view_bounds: ViewBounds::FULL_FRAME,
            aspect_ratio: [1.0, 1.0, 1.0],
        }
    }

    /// Preset for single-person rendering: x, y in [-0.5, 0.5], z in
    /// [0, 1.6], aspect 1:1:1.6.
    #[must_use]
    pub const fn single_person() -> Self {
        Self {
            visibility_threshold: Self::DEFAULT_VISIBILITY_THRESHOLD,
            view_bounds: ViewBounds::SINGLE_PERSON,
            aspect_ratio: [1.0, 1.0, 1.6],
        }
    }

    /// Set the visibility threshold.
    ///
    /// # Arguments
    ///
    /// * `threshold` - The minimum confidence score (0.0 to 1.0).
    ///
    /// # Returns
    ///
    /// * The modified `RenderConfig`.
    #[must_use]
    pub const fn with_visibility_threshold(mut self, threshold: f32) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    /// Set the viewing box.
    ///
    /// # Arguments
    ///
    /// * `bounds` - The axis-aligned viewing box.
    ///
    /// # Returns
    ///
    /// * The modified `RenderConfig`.
    #[must_use]
    pub const fn with_view_bounds(mut self, bounds: ViewBounds) -> Self {
        self.view_bounds = bounds;
        self
    }

    /// Set the axis aspect ratio.
    ///
    /// # Arguments
    ///
    /// * `aspect` - Relative axis scaling (x : y : z).
    ///
    /// # Returns
    ///
    /// * The modified `RenderConfig`.
    #[must_use]
    pub const fn with_aspect_ratio(mut self, aspect: [f32; 3]) -> Self {
        self.aspect_ratio = aspect;
        self
    }
}
