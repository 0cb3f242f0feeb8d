//! Vertex tables.
//!
//! A table is a polyline: consecutive vertices are joined by an edge when the
//! owning shape is drawn, starting from vertex 0.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::math::{Matrix, Vector};

/// Ordered vertex list in one coordinate space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VertexTable {
    vertices: Vec<Vector>,
}

impl VertexTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table of positions from `[x, y, z]` triples.
    pub fn from_points(points: &[[f64; 3]]) -> Self {
        Self {
            vertices: points.iter().map(|&[x, y, z]| Vector::new(x, y, z)).collect(),
        }
    }

    pub fn push(&mut self, v: Vector) {
        self.vertices.push(v);
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vector> {
        self.vertices.iter()
    }

    pub fn as_slice(&self) -> &[Vector] {
        &self.vertices
    }

    /// Returns a new table with every vertex transformed by `m`.
    pub fn apply(&self, m: &Matrix) -> VertexTable {
        VertexTable {
            vertices: self.vertices.iter().map(|v| m.apply(v)).collect(),
        }
    }

    /// Writes `m · src[i]` into the receiver's own storage.
    ///
    /// Storage is only reallocated when the receiver's length differs from
    /// `src`, so a table sized once at construction is reused every frame.
    pub fn apply_fast(&mut self, src: &VertexTable, m: &Matrix) -> &mut Self {
        if self.vertices.len() != src.vertices.len() {
            self.vertices.resize(src.vertices.len(), Vector::ORIGIN);
        }
        let m = &m.m;
        for (dst, s) in self.vertices.iter_mut().zip(&src.vertices) {
            dst.x = m[0][0] * s.x + m[0][1] * s.y + m[0][2] * s.z + m[0][3] * s.w;
            dst.y = m[1][0] * s.x + m[1][1] * s.y + m[1][2] * s.z + m[1][3] * s.w;
            dst.z = m[2][0] * s.x + m[2][1] * s.y + m[2][2] * s.z + m[2][3] * s.w;
            dst.w = m[3][0] * s.x + m[3][1] * s.y + m[3][2] * s.z + m[3][3] * s.w;
        }
        self
    }

    /// Returns a copy scaled about the origin. `w` is kept.
    pub fn scale(&self, fact: f64) -> VertexTable {
        VertexTable {
            vertices: self
                .vertices
                .iter()
                .map(|v| Vector::with_w(v.x * fact, v.y * fact, v.z * fact, v.w))
                .collect(),
        }
    }
}

impl Index<usize> for VertexTable {
    type Output = Vector;

    fn index(&self, i: usize) -> &Vector {
        &self.vertices[i]
    }
}

impl<'a> IntoIterator for &'a VertexTable {
    type Item = &'a Vector;
    type IntoIter = std::slice::Iter<'a, Vector>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}

impl FromIterator<Vector> for VertexTable {
    fn from_iter<I: IntoIterator<Item = Vector>>(iter: I) -> Self {
        Self {
            vertices: iter.into_iter().collect(),
        }
    }
}
