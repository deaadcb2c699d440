//! In-memory renderable figure.
//!
//! A [`Figure`] is an ordered 3D scene of line segments and point markers
//! plus a fixed camera and viewing box. Rendering records elements in draw
//! order (per person: links first, then joints), and rasterization replays
//! that order, so later elements paint over earlier ones.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::RgbImage;
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut};

use crate::config::ViewBounds;
use crate::error::Result;
use crate::visualizer::Color;

/// Assets URL for downloading fonts
const ASSETS_URL: &str = "https://github.com/ultralytics/assets/releases/download/v0.0.0";

/// Fixed camera orientation in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Elevation above the x/y plane.
    pub elevation: f32,
    /// Rotation around the z axis.
    pub azimuth: f32,
}

impl Camera {
    /// The viewing angle every figure uses, for cross-sequence comparability.
    pub const DEFAULT: Self = Self {
        elevation: 10.0,
        azimuth: 45.0,
    };
}

impl Default for Camera {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A point marker at a joint position.
#[derive(Debug, Clone, Copy)]
pub struct Marker {
    /// 3D position.
    pub position: [f32; 3],
    /// Normalized RGB color in [0, 1].
    pub color: [f32; 3],
}

/// A line segment between two joint positions.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    /// 3D start position.
    pub start: [f32; 3],
    /// 3D end position.
    pub end: [f32; 3],
    /// Normalized RGB color in [0, 1].
    pub color: [f32; 3],
}

/// One drawable element, in recorded draw order.
#[derive(Debug, Clone, Copy)]
pub enum Element {
    /// A skeleton link.
    Segment(Segment),
    /// A joint.
    Marker(Marker),
}

/// An in-memory renderable 3D figure.
#[derive(Debug, Clone)]
pub struct Figure {
    /// Title annotation drawn onto the rasterized image.
    pub title: String,
    /// Camera orientation.
    pub camera: Camera,
    /// Axis-aligned viewing box.
    pub bounds: ViewBounds,
    /// Relative axis scaling (x : y : z).
    pub aspect: [f32; 3],
    /// Drawable elements in draw order.
    pub elements: Vec<Element>,
}

impl Figure {
    /// Create an empty figure with the default camera.
    #[must_use]
    pub fn new(title: impl Into<String>, bounds: ViewBounds, aspect: [f32; 3]) -> Self {
        Self {
            title: title.into(),
            camera: Camera::DEFAULT,
            bounds,
            aspect,
            elements: Vec::new(),
        }
    }

    /// Append a line segment.
    pub fn push_segment(&mut self, start: [f32; 3], end: [f32; 3], color: [f32; 3]) {
        self.elements
            .push(Element::Segment(Segment { start, end, color }));
    }

    /// Append a point marker.
    pub fn push_marker(&mut self, position: [f32; 3], color: [f32; 3]) {
        self.elements.push(Element::Marker(Marker { position, color }));
    }

    /// Iterate over all markers, in draw order.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.elements.iter().filter_map(|e| match e {
            Element::Marker(m) => Some(m),
            Element::Segment(_) => None,
        })
    }

    /// Iterate over all segments, in draw order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.elements.iter().filter_map(|e| match e {
            Element::Segment(s) => Some(s),
            Element::Marker(_) => None,
        })
    }

    /// Rasterize the figure to a square RGB image of the given edge length.
    ///
    /// Projection is orthographic with the figure's fixed camera; the
    /// viewing box is auto-fitted with a margin, so output images across
    /// frames and sequences are directly comparable. The title is drawn
    /// when a font can be resolved and silently skipped otherwise.
    #[must_use]
    pub fn rasterize(&self, size: u32) -> RgbImage {
        let size = size.max(64);
        let mut img = RgbImage::from_pixel(size, size, Color::WHITE.to_rgb8());

        let proj = Projection::new(self.camera, self.bounds, self.aspect);
        let canvas = CanvasFit::new(&proj, size);

        self.draw_bounds_box(&mut img, &proj, &canvas);

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let marker_radius = (size / 160).max(3) as i32;
        for element in &self.elements {
            match element {
                Element::Segment(s) => {
                    let a = canvas.to_pixel(proj.project(s.start));
                    let b = canvas.to_pixel(proj.project(s.end));
                    let rgb = rgb_from_normalized(s.color);
                    // linewidth 2
                    draw_line_segment_mut(&mut img, a, b, rgb);
                    draw_line_segment_mut(&mut img, (a.0, a.1 + 1.0), (b.0, b.1 + 1.0), rgb);
                }
                Element::Marker(m) => {
                    let (x, y) = canvas.to_pixel(proj.project(m.position));
                    #[allow(clippy::cast_possible_truncation)]
                    draw_filled_circle_mut(
                        &mut img,
                        (x.round() as i32, y.round() as i32),
                        marker_radius,
                        rgb_from_normalized(m.color),
                    );
                }
            }
        }

        if !self.title.is_empty()
            && let Some(font) = load_font()
        {
            #[allow(clippy::cast_precision_loss)]
            let scale = PxScale::from(size as f32 / 32.0);
            draw_text_mut(
                &mut img,
                Color::BLACK.to_rgb8(),
                12,
                10,
                scale,
                &font,
                &self.title,
            );
        }

        img
    }

    /// Rasterize and save the figure; format is chosen by file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written.
    pub fn save<P: AsRef<Path>>(&self, path: P, size: u32) -> Result<()> {
        let img = self.rasterize(size);
        img.save(path.as_ref())?;
        Ok(())
    }

    /// Draw the wireframe of the viewing box for spatial context.
    fn draw_bounds_box(&self, img: &mut RgbImage, proj: &Projection, canvas: &CanvasFit) {
        let grid = Color::GRID.to_rgb8();
        for (a, b) in box_edges(self.bounds) {
            let pa = canvas.to_pixel(proj.project(a));
            let pb = canvas.to_pixel(proj.project(b));
            draw_line_segment_mut(img, pa, pb, grid);
        }
    }
}

/// Orthographic projection with the matplotlib-style camera convention:
/// rotate about +z by the azimuth, then tilt by the elevation.
struct Projection {
    bounds: ViewBounds,
    aspect: [f32; 3],
    sin_az: f32,
    cos_az: f32,
    sin_el: f32,
    cos_el: f32,
}

impl Projection {
    fn new(camera: Camera, bounds: ViewBounds, aspect: [f32; 3]) -> Self {
        let (sin_az, cos_az) = camera.azimuth.to_radians().sin_cos();
        let (sin_el, cos_el) = camera.elevation.to_radians().sin_cos();
        Self {
            bounds,
            aspect,
            sin_az,
            cos_az,
            sin_el,
            cos_el,
        }
    }

    /// Project a world point to abstract 2D view coordinates.
    fn project(&self, p: [f32; 3]) -> (f32, f32) {
        let nx = (normalize(p[0], self.bounds.x) - 0.5) * self.aspect[0];
        let ny = (normalize(p[1], self.bounds.y) - 0.5) * self.aspect[1];
        let nz = (normalize(p[2], self.bounds.z) - 0.5) * self.aspect[2];

        let xr = nx * self.cos_az + ny * self.sin_az;
        let yr = -nx * self.sin_az + ny * self.cos_az;

        let u = yr;
        let v = nz * self.cos_el - xr * self.sin_el;
        (u, v)
    }
}

/// Map a coordinate into [0, 1] within an axis range.
fn normalize(value: f32, range: (f32, f32)) -> f32 {
    let span = range.1 - range.0;
    if span.abs() < f32::EPSILON {
        0.5
    } else {
        (value - range.0) / span
    }
}

/// Pixel mapping that centers the projected viewing box with a margin.
struct CanvasFit {
    scale: f32,
    min_u: f32,
    min_v: f32,
    offset_x: f32,
    offset_y: f32,
    height: f32,
}

impl CanvasFit {
    #[allow(clippy::cast_precision_loss)]
    fn new(proj: &Projection, size: u32) -> Self {
        let mut min_u = f32::INFINITY;
        let mut max_u = f32::NEG_INFINITY;
        let mut min_v = f32::INFINITY;
        let mut max_v = f32::NEG_INFINITY;
        for (a, b) in box_edges(proj.bounds) {
            for p in [a, b] {
                let (u, v) = proj.project(p);
                min_u = min_u.min(u);
                max_u = max_u.max(u);
                min_v = min_v.min(v);
                max_v = max_v.max(v);
            }
        }

        let size = size as f32;
        let span = (max_u - min_u).max(max_v - min_v).max(f32::EPSILON);
        let scale = size * 0.86 / span;
        let offset_x = (size - (max_u - min_u) * scale) / 2.0;
        let offset_y = (size - (max_v - min_v) * scale) / 2.0;

        Self {
            scale,
            min_u,
            min_v,
            offset_x,
            offset_y,
            height: size,
        }
    }

    fn to_pixel(&self, (u, v): (f32, f32)) -> (f32, f32) {
        let x = self.offset_x + (u - self.min_u) * self.scale;
        // Image rows grow downward; view v grows upward.
        let y = self.height - (self.offset_y + (v - self.min_v) * self.scale);
        (x, y)
    }
}

/// The 12 edges of the viewing box.
fn box_edges(b: ViewBounds) -> [([f32; 3], [f32; 3]); 12] {
    let (x0, x1) = b.x;
    let (y0, y1) = b.y;
    let (z0, z1) = b.z;
    [
        // bottom face
        ([x0, y0, z0], [x1, y0, z0]),
        ([x1, y0, z0], [x1, y1, z0]),
        ([x1, y1, z0], [x0, y1, z0]),
        ([x0, y1, z0], [x0, y0, z0]),
        // top face
        ([x0, y0, z1], [x1, y0, z1]),
        ([x1, y0, z1], [x1, y1, z1]),
        ([x1, y1, z1], [x0, y1, z1]),
        ([x0, y1, z1], [x0, y0, z1]),
        // verticals
        ([x0, y0, z0], [x0, y0, z1]),
        ([x1, y0, z0], [x1, y0, z1]),
        ([x1, y1, z0], [x1, y1, z1]),
        ([x0, y1, z0], [x0, y1, z1]),
    ]
}

/// Convert a normalized [0, 1] color back to an `image` pixel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rgb_from_normalized(c: [f32; 3]) -> image::Rgb<u8> {
    image::Rgb([
        (c[0] * 255.0).round() as u8,
        (c[1] * 255.0).round() as u8,
        (c[2] * 255.0).round() as u8,
    ])
}

/// Resolve a font for the title: config-dir cache, common system locations,
/// then a one-time download into the cache. Returns `None` when nothing is
/// available; callers skip text in that case.
fn load_font() -> Option<FontVec> {
    let path = check_font("Arial.ttf")?;
    let mut buffer = Vec::new();
    File::open(path).ok()?.read_to_end(&mut buffer).ok()?;
    FontVec::try_from_vec(buffer).ok()
}

/// Check if font exists locally or download it
fn check_font(font: &str) -> Option<PathBuf> {
    let font_name = Path::new(font).file_name()?.to_string_lossy();
    let config_dir = dirs::config_dir()?.join("pose-viz");
    let font_path = config_dir.join(font_name.as_ref());

    if font_path.exists() {
        return Some(font_path);
    }

    // Common system fonts are good enough for a title.
    for candidate in [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return Some(p);
        }
    }

    if let Err(e) = fs::create_dir_all(&config_dir) {
        eprintln!("Failed to create config directory: {e}");
        return None;
    }

    let url = format!("{ASSETS_URL}/{font_name}");
    match ureq::get(&url).call() {
        Ok(response) => {
            let mut file = match File::create(&font_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Failed to create font file: {e}");
                    return None;
                }
            };

            let mut reader = response.into_body().into_reader();
            if let Err(e) = io::copy(&mut reader, &mut file) {
                eprintln!("Failed to download font: {e}");
                let _ = fs::remove_file(&font_path);
                return None;
            }

            Some(font_path)
        }
        Err(e) => {
            eprintln!("Failed to download font from {url}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_order_preserved() {
        let mut fig = Figure::new("t", ViewBounds::FULL_FRAME, [1.0, 1.0, 1.0]);
        fig.push_segment([0.0; 3], [1.0; 3], [1.0, 0.0, 0.0]);
        fig.push_marker([0.0; 3], [0.0, 1.0, 0.0]);
        fig.push_segment([0.0; 3], [0.5; 3], [0.0, 0.0, 1.0]);

        assert!(matches!(fig.elements[0], Element::Segment(_)));
        assert!(matches!(fig.elements[1], Element::Marker(_)));
        assert!(matches!(fig.elements[2], Element::Segment(_)));
        assert_eq!(fig.segments().count(), 2);
        assert_eq!(fig.markers().count(), 1);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let proj = Projection::new(Camera::DEFAULT, ViewBounds::FULL_FRAME, [1.0, 1.0, 1.0]);
        let a = proj.project([0.2, -0.1, 1.0]);
        let b = proj.project([0.2, -0.1, 1.0]);
        assert_eq!(a, b);

        // Distinct points stay distinct on screen.
        let c = proj.project([0.0, 0.0, 0.0]);
        let d = proj.project([0.0, 0.0, 2.0]);
        assert!((c.1 - d.1).abs() > 1e-3);
    }

    #[test]
    fn test_higher_z_maps_higher_on_canvas() {
        let proj = Projection::new(Camera::DEFAULT, ViewBounds::FULL_FRAME, [1.0, 1.0, 1.0]);
        let canvas = CanvasFit::new(&proj, 640);
        let low = canvas.to_pixel(proj.project([0.0, 0.0, 0.0]));
        let high = canvas.to_pixel(proj.project([0.0, 0.0, 2.0]));
        assert!(high.1 < low.1);
    }

    #[test]
    fn test_rasterize_draws_marker_pixels() {
        let mut fig = Figure::new("", ViewBounds::FULL_FRAME, [1.0, 1.0, 1.0]);
        fig.push_marker([0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let img = fig.rasterize(256);
        assert_eq!(img.dimensions(), (256, 256));
        let red = img.pixels().filter(|p| p.0 == [255, 0, 0]).count();
        assert!(red > 0, "marker should leave red pixels");
    }

    #[test]
    fn test_rasterize_empty_figure_is_background_and_grid() {
        let fig = Figure::new("", ViewBounds::SINGLE_PERSON, [1.0, 1.0, 1.6]);
        let img = fig.rasterize(128);
        assert!(
            img.pixels()
                .all(|p| p.0 == [255, 255, 255] || p.0 == [200, 200, 200])
        );
    }
}
