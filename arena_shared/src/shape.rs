//! Drawable wireframes and the projection pipeline.
//!
//! Per draw: model matrix (translation · rotation), then the camera's view
//! matrix, then the caller's screen · projection matrix, chained in that
//! order. Transformed vertices are perspective-divided and joined into
//! segments.

use crate::coord::Coord3D;
use crate::math::Matrix;
use crate::render::{Color, ScreenPoint, Segment};
use crate::vertex::VertexTable;

/// A positioned wireframe.
#[derive(Debug, Clone)]
pub struct Shape {
    pub coord: Coord3D,
    pub color: Color,
    vt: VertexTable,
    rvt: VertexTable,
    composed: Matrix,
    segments: Vec<Segment>,
}

impl Shape {
    pub fn new(coord: Coord3D, vt: &VertexTable, color: Color) -> Self {
        let mut s = Self {
            coord,
            color,
            vt: VertexTable::new(),
            rvt: VertexTable::new(),
            composed: Matrix::IDENTITY,
            segments: Vec::new(),
        };
        s.set_vt(vt);
        s.coord.update_mat();
        s
    }

    /// Replaces the local wireframe and resizes the reusable buffer.
    pub fn set_vt(&mut self, vt: &VertexTable) {
        self.vt = vt.clone();
        self.rvt = vt.clone();
        self.segments = Vec::with_capacity(vt.len().saturating_sub(1));
    }

    pub fn vertex_table(&self) -> &VertexTable {
        &self.vt
    }

    /// Segments produced by the last [`Shape::draw`].
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Projects the wireframe and returns the visible segments.
    ///
    /// `view` is the camera's view matrix; `screen_proj` is the screen
    /// matrix already composed with the projection.
    pub fn draw(&mut self, view: &Matrix, screen_proj: &Matrix) -> &[Segment] {
        self.segments.clear();

        self.coord.update_mat();
        self.composed = self.coord.model_matrix();
        self.composed.chain(view);
        self.composed.chain(screen_proj);
        self.rvt.apply_fast(&self.vt, &self.composed);

        project_polyline(&self.rvt, self.color, &mut self.segments);
        &self.segments
    }

    pub fn clear_segments(&mut self) {
        self.segments.clear();
    }
}

/// Perspective divide for one clip-space vertex.
///
/// `None` when the vertex is behind the projection plane (`w < 0`) or the
/// divide does not land inside the `i32` pixel range (this covers
/// non-finite results).
pub fn perspective_divide(x: f64, y: f64, w: f64) -> Option<ScreenPoint> {
    if w < 0.0 {
        return None;
    }
    let sx = to_pixel(x / w)?;
    let sy = to_pixel(y / w)?;
    Some(ScreenPoint::new(sx, sy))
}

fn to_pixel(v: f64) -> Option<i32> {
    let v = v.round();
    (v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX)).then_some(v as i32)
}

/// Appends one segment per pair of consecutive visible vertices.
///
/// Hidden vertices are skipped, so the edges that touch them disappear
/// rather than being clipped.
pub fn project_polyline(rvt: &VertexTable, color: Color, out: &mut Vec<Segment>) {
    let mut prev: Option<ScreenPoint> = None;
    for v in rvt {
        let Some(p) = perspective_divide(v.x, v.y, v.w) else {
            continue;
        };
        if let Some(from) = prev {
            out.push(Segment::new(from, p, color));
        }
        prev = Some(p);
    }
}
