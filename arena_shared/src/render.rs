//! Rendering abstraction.
//!
//! Shapes only produce [`Segment`] values. Whatever turns segments into
//! pixels implements [`RenderBackend`] and owns its own drawing resources.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::radar::RadarFrame;
use crate::random::RandomSource;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Self = Self::rgb(0xff, 0, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 0xff);
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    /// Horizon ring.
    pub const DARK_GOLDENROD: Self = Self::rgb(0xb8, 0x86, 0x0b);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Low 24 bits as `0xRRGGBB`.
    pub const fn from_u32(v: u32) -> Self {
        Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Any 24-bit color.
    pub fn random(rng: &mut dyn RandomSource) -> Self {
        Self::from_u32((rng.next_unit() * f64::from(0xff_ffff_u32)) as u32)
    }

    /// Greenish color used for trees.
    pub fn random_foliage(rng: &mut dyn RandomSource) -> Self {
        let mut channel = |base: f64| (rng.next_unit() * 64.0 + base) as u8;
        let r = channel(16.0);
        let g = channel(128.0);
        let b = channel(16.0);
        Self::rgb(r, g, b)
    }

    /// CSS hex form, e.g. `#b8860b`.
    pub fn to_css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Pixel position after the perspective divide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One projected edge of a wireframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
    pub color: Color,
}

/// A 1-pixel-high rectangle laid along a segment, for hosts whose only
/// primitive is a rotated filled rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentRect {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees.
    pub angle: f64,
    pub color: Color,
}

impl Segment {
    pub fn new(from: ScreenPoint, to: ScreenPoint, color: Color) -> Self {
        Self { from, to, color }
    }

    /// `from - to`, widened before subtracting.
    fn delta(&self) -> (f64, f64) {
        (
            f64::from(self.from.x) - f64::from(self.to.x),
            f64::from(self.from.y) - f64::from(self.to.y),
        )
    }

    pub fn length(&self) -> f64 {
        let (dx, dy) = self.delta();
        dx.hypot(dy)
    }

    pub fn midpoint(&self) -> (f64, f64) {
        (
            (f64::from(self.from.x) + f64::from(self.to.x)) / 2.0,
            (f64::from(self.from.y) + f64::from(self.to.y)) / 2.0,
        )
    }

    /// `atan2(x1 - x2, -(y1 - y2))` in degrees.
    pub fn heading_degrees(&self) -> f64 {
        let (dx, dy) = self.delta();
        dx.atan2(-dy).to_degrees()
    }

    pub fn to_rect(&self) -> SegmentRect {
        let (center_x, center_y) = self.midpoint();
        SegmentRect {
            center_x,
            center_y,
            width: self.length(),
            height: 1.0,
            angle: self.heading_degrees() - 90.0,
            color: self.color,
        }
    }
}

/// A minimal rendering API.
pub trait RenderBackend {
    fn begin_frame(&mut self);
    fn draw_segment(&mut self, segment: &Segment);
    fn draw_radar(&mut self, radar: &RadarFrame);
    fn end_frame(&mut self);

    fn draw_segments(&mut self, segments: &[Segment]) {
        for s in segments {
            self.draw_segment(s);
        }
    }
}

/// A no-op renderer useful for headless runs.
#[derive(Default)]
pub struct NullRenderer;

impl RenderBackend for NullRenderer {
    fn begin_frame(&mut self) {}
    fn draw_segment(&mut self, _segment: &Segment) {}
    fn draw_radar(&mut self, _radar: &RadarFrame) {}
    fn end_frame(&mut self) {}
}

/// Keeps everything drawn during the last frame.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub segments: Vec<Segment>,
    pub radar: Option<RadarFrame>,
    pub frames: u64,
}

impl RenderBackend for RecordingRenderer {
    fn begin_frame(&mut self) {
        self.segments.clear();
        self.radar = None;
    }

    fn draw_segment(&mut self, segment: &Segment) {
        self.segments.push(*segment);
    }

    fn draw_radar(&mut self, radar: &RadarFrame) {
        self.radar = Some(radar.clone());
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_css_is_zero_padded() {
        assert_eq!(Color::from_u32(0x00_0a_ff).to_css(), "#000aff");
        assert_eq!(Color::DARK_GOLDENROD.to_css(), "#b8860b");
    }

    #[test]
    fn horizontal_segment_rect() {
        let s = Segment::new(ScreenPoint::new(0, 10), ScreenPoint::new(20, 10), Color::RED);
        let rect = s.to_rect();
        assert_eq!((rect.center_x, rect.center_y), (10.0, 10.0));
        assert_eq!(rect.width, 20.0);
        // heading is atan2(-20, 0) = -90 degrees
        assert!((s.heading_degrees() + 90.0).abs() < 1e-12);
        assert!((rect.angle + 180.0).abs() < 1e-12);
    }

    #[test]
    fn extreme_endpoints_do_not_overflow() {
        let s = Segment::new(
            ScreenPoint::new(i32::MIN, i32::MAX),
            ScreenPoint::new(-564, 175),
            Color::DARK_GOLDENROD,
        );
        let rect = s.to_rect();
        assert_eq!(rect.center_x, (f64::from(i32::MIN) - 564.0) / 2.0);
        assert_eq!(rect.center_y, (f64::from(i32::MAX) + 175.0) / 2.0);
        assert!(rect.width > f64::from(i32::MAX));
        assert!(rect.angle.is_finite());
    }

    #[test]
    fn vertical_segment_heading() {
        let s = Segment::new(ScreenPoint::new(5, 0), ScreenPoint::new(5, 30), Color::WHITE);
        // atan2(0, 30) = 0
        assert_eq!(s.heading_degrees(), 0.0);
        assert_eq!(s.length(), 30.0);
    }
}
