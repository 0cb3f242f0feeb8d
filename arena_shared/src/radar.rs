//! Top-down radar.
//!
//! Plots every enemy in the camera's right/front plane on a small square
//! panel. Sampling happens before the camera refreshes its matrices for the
//! frame, so `cv` is the value computed on the previous frame.

use serde::{Deserialize, Serialize};

use crate::coord::Camera;
use crate::math::Vector;
use crate::render::{Color, ScreenPoint, Segment};

/// Radar geometry, in world units and panel pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarConfig {
    /// World distance that maps onto `half_extent` pixels.
    pub range: f64,
    pub half_extent: f64,
    /// Panel side in pixels.
    pub size: f64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            range: 450.0,
            half_extent: 16.0,
            size: 48.0,
        }
    }
}

/// One enemy blip in panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarPlot {
    pub x: f64,
    pub y: f64,
}

/// Everything the radar shows for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarFrame {
    pub plots: Vec<RadarPlot>,
    pub cross_hair: [Segment; 2],
}

#[derive(Debug, Clone)]
pub struct Radar {
    cfg: RadarConfig,
    frame: RadarFrame,
}

impl Radar {
    pub fn new(cfg: RadarConfig) -> Self {
        let size = cfg.size as i32;
        let mid = size / 2;
        Self {
            cfg,
            frame: RadarFrame {
                plots: Vec::new(),
                cross_hair: [
                    Segment::new(ScreenPoint::new(mid, 0), ScreenPoint::new(mid, size), Color::WHITE),
                    Segment::new(ScreenPoint::new(0, mid), ScreenPoint::new(size, mid), Color::WHITE),
                ],
            },
        }
    }

    /// Replaces the plots with the given world positions.
    pub fn sample<'a>(
        &mut self,
        camera: &Camera,
        positions: impl IntoIterator<Item = &'a Vector>,
    ) -> &RadarFrame {
        let c = &self.cfg;
        let mid = c.size / 2.0;
        let r = &camera.coord.r;
        self.frame.plots.clear();
        for p in positions {
            let x = (p.dot_product(r) - camera.cv.x) / c.range * c.half_extent;
            let y = (p.dot_product(&camera.front) - camera.cv.z) / c.range * c.half_extent;
            self.frame.plots.push(RadarPlot {
                x: x + mid,
                y: y + mid,
            });
        }
        &self.frame
    }

    pub fn frame(&self) -> &RadarFrame {
        &self.frame
    }
}

impl Default for Radar {
    fn default() -> Self {
        Self::new(RadarConfig::default())
    }
}
