//! Math types.
//!
//! Homogeneous 4-component vectors and row-major 4x4 matrices. Everything is
//! `f64` and stack-allocated; nothing here allocates per call.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Errors raised by degenerate geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Normalizing a vector whose x/y/z magnitude is zero.
    ZeroLength,
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::ZeroLength => write!(f, "cannot normalize a zero-length vector"),
        }
    }
}

impl std::error::Error for MathError {}

/// Homogeneous point or direction.
///
/// `w` is 1 for positions and conventionally 0 for directions. Nothing
/// enforces the distinction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Vector {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Vector {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a position (`w = 1`).
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    pub const fn with_w(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Euclidean magnitude of the x/y/z triple.
    pub fn distance(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Scales x/y/z to unit length in place.
    ///
    /// Fails on a zero-length vector and leaves the receiver untouched.
    pub fn normalize(&mut self) -> Result<(), MathError> {
        let dist = self.distance();
        if dist == 0.0 || !dist.is_finite() {
            return Err(MathError::ZeroLength);
        }
        self.x /= dist;
        self.y /= dist;
        self.z /= dist;
        Ok(())
    }

    pub fn normalized(mut self) -> Result<Self, MathError> {
        self.normalize()?;
        Ok(self)
    }

    /// Dot product over x/y/z only.
    pub fn dot_product(&self, rhs: &Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Cross product over x/y/z. The result is a direction (`w = 0`).
    pub fn cross(&self, rhs: &Self) -> Self {
        Self::with_w(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
            0.0,
        )
    }

    /// Multiplies all four components in place.
    pub fn scale(&mut self, factor: f64) {
        self.x *= factor;
        self.y *= factor;
        self.z *= factor;
        self.w *= factor;
    }

    /// Adds `scalar * dir` to x/y/z, leaving `w` alone.
    pub fn add_scaled(&mut self, dir: &Self, scalar: f64) {
        self.x += scalar * dir.x;
        self.y += scalar * dir.y;
        self.z += scalar * dir.z;
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{},{})", self.x, self.y, self.z, self.w)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
        self.w += rhs.w;
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
        self.w -= rhs.w;
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(mut self, rhs: f64) -> Self {
        self.scale(rhs);
        self
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

/// 4x4 matrix (row-major). Defaults to identity.
///
/// The rotation builders replace the whole matrix; they do not compose into
/// it. Two products exist and they are not interchangeable:
/// [`Matrix::composition`] is the general `self · rhs`, while
/// [`Matrix::chain`] appends a later stage of the render chain in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub m: [[f64; 4]; 4],
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const fn from_rows(m: [[f64; 4]; 4]) -> Self {
        Self { m }
    }

    /// Resets to identity.
    pub fn initialize(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Returns `self · v`.
    pub fn apply(&self, v: &Vector) -> Vector {
        let m = &self.m;
        Vector::with_w(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3] * v.w,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3] * v.w,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3] * v.w,
            m[3][0] * v.x + m[3][1] * v.y + m[3][2] * v.z + m[3][3] * v.w,
        )
    }

    /// Returns `self · rhs`: `rhs` is applied first, then `self`.
    pub fn composition(&self, rhs: &Matrix) -> Matrix {
        let mut r = [[0.0; 4]; 4];
        for (i, row) in r.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Matrix { m: r }
    }

    /// Rewrites `self` to `outer · self` in place.
    ///
    /// Only used to build the model → view → projection → screen chain, one
    /// stage after another.
    pub fn chain(&mut self, outer: &Matrix) {
        let mut tmp = [[0.0; 4]; 4];
        for (i, row) in tmp.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[k][j] * outer.m[i][k]).sum();
            }
        }
        self.m = tmp;
    }

    pub fn transpose(&self) -> Matrix {
        let mut r = [[0.0; 4]; 4];
        for (i, row) in r.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[j][i];
            }
        }
        Matrix { m: r }
    }

    pub fn rotate_x(&mut self, t: f64) {
        let (sin_t, cos_t) = t.sin_cos();
        self.m = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, cos_t, -sin_t, 0.0],
            [0.0, sin_t, cos_t, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
    }

    pub fn rotate_y(&mut self, t: f64) {
        let (sin_t, cos_t) = t.sin_cos();
        self.m = [
            [cos_t, 0.0, sin_t, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-sin_t, 0.0, cos_t, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
    }

    pub fn rotate_z(&mut self, t: f64) {
        let (sin_t, cos_t) = t.sin_cos();
        self.m = [
            [cos_t, -sin_t, 0.0, 0.0],
            [sin_t, cos_t, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
    }

    /// Rotation by `t` radians about the unit axis `v` (Rodrigues).
    pub fn rotate_with_vector(&mut self, t: f64, v: &Vector) {
        let (sin_t, cos_t) = t.sin_cos();
        let cos_tr = 1.0 - cos_t;
        let (x, y, z) = (v.x, v.y, v.z);
        self.m = [
            [
                x * x * cos_tr + cos_t,
                x * y * cos_tr - z * sin_t,
                z * x * cos_tr + y * sin_t,
                0.0,
            ],
            [
                x * y * cos_tr + z * sin_t,
                y * y * cos_tr + cos_t,
                y * z * cos_tr - x * sin_t,
                0.0,
            ],
            [
                z * x * cos_tr - y * sin_t,
                y * z * cos_tr + x * sin_t,
                z * z * cos_tr + cos_t,
                0.0,
            ],
            [0.0, 0.0, 0.0, 1.0],
        ];
    }

    pub fn rotation_y(t: f64) -> Matrix {
        let mut m = Matrix::IDENTITY;
        m.rotate_y(t);
        m
    }

    /// Perspective projection used by the arena.
    ///
    /// `S = 1/tan(fov/2)` and `Sz = far/(far - near)`. Points in front of the
    /// camera come out with `w > 0`.
    pub fn perspective(fov_deg: f64, near: f64, far: f64) -> Matrix {
        let s = 1.0 / (fov_deg / 2.0).to_radians().tan();
        let sz = far / (far - near);
        Matrix::from_rows([
            [s, 0.0, 0.0, 0.0],
            [0.0, s, 0.0, 0.0],
            [0.0, 0.0, sz, 1.0],
            [0.0, 0.0, -sz * near, 0.0],
        ])
    }

    /// Maps normalized device coordinates onto a `width` x `height` pixel
    /// surface centered on the middle, Y pointing down.
    pub fn viewport(width: f64, height: f64) -> Matrix {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Matrix::from_rows([
            [hw, 0.0, 0.0, hw],
            [0.0, -hh, 0.0, hh],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.m {
            write!(f, "|")?;
            for cell in row {
                write!(f, " {cell} ")?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_matrix_close(a: &Matrix, b: &Matrix, eps: f64) {
        for i in 0..4 {
            for j in 0..4 {
                assert!(
                    (a.m[i][j] - b.m[i][j]).abs() < eps,
                    "mismatch at [{i}][{j}]: {} vs {}",
                    a.m[i][j],
                    b.m[i][j]
                );
            }
        }
    }

    #[test]
    fn distance_of_3_4_0_is_5() {
        assert_eq!(Vector::with_w(3.0, 4.0, 0.0, 1.0).distance(), 5.0);
    }

    #[test]
    fn normalize_gives_unit_collinear_vector() {
        let v = Vector::new(2.0, -3.0, 6.0);
        let n = v.normalized().unwrap();
        assert!((n.distance() - 1.0).abs() < 1e-12);
        let c = v.cross(&n);
        assert!(c.distance() < 1e-12);
        assert!(v.dot_product(&n) > 0.0);
    }

    #[test]
    fn normalize_zero_vector_fails() {
        let mut v = Vector::ORIGIN;
        assert_eq!(v.normalize(), Err(MathError::ZeroLength));
        assert_eq!(v, Vector::ORIGIN);
    }

    #[test]
    fn arithmetic_touches_all_four_components() {
        let mut a = Vector::with_w(1.0, 2.0, 3.0, 1.0);
        a += Vector::with_w(1.0, 1.0, 1.0, 1.0);
        assert_eq!(a, Vector::with_w(2.0, 3.0, 4.0, 2.0));
        a.scale(0.5);
        assert_eq!(a, Vector::with_w(1.0, 1.5, 2.0, 1.0));
        let b = a - Vector::new(1.0, 1.5, 2.0);
        assert_eq!(b, Vector::with_w(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn composition_is_associative() {
        let mut a = Matrix::IDENTITY;
        a.rotate_x(0.3);
        let mut b = Matrix::IDENTITY;
        b.rotate_y(-1.1);
        let mut c = Matrix::IDENTITY;
        c.rotate_with_vector(0.7, &Vector::new(1.0, 2.0, 2.0).normalized().unwrap());

        let left = a.composition(&b).composition(&c);
        let right = a.composition(&b.composition(&c));
        assert_matrix_close(&left, &right, 1e-12);
    }

    #[test]
    fn chain_prepends_outer_stage() {
        let mut inner = Matrix::IDENTITY;
        inner.rotate_z(0.4);
        let mut outer = Matrix::IDENTITY;
        outer.rotate_x(1.2);

        let mut chained = inner;
        chained.chain(&outer);
        assert_matrix_close(&chained, &outer.composition(&inner), 1e-12);
    }

    #[test]
    fn rotate_with_vector_matches_axis_builders() {
        let mut about_y = Matrix::IDENTITY;
        about_y.rotate_with_vector(0.9, &Vector::Y);
        assert_matrix_close(&about_y, &Matrix::rotation_y(0.9), 1e-12);

        let mut about_x = Matrix::IDENTITY;
        about_x.rotate_with_vector(-0.5, &Vector::X);
        let mut x = Matrix::IDENTITY;
        x.rotate_x(-0.5);
        assert_matrix_close(&about_x, &x, 1e-12);
    }

    #[test]
    fn rotation_transpose_is_inverse() {
        let mut r = Matrix::IDENTITY;
        r.rotate_with_vector(1.3, &Vector::new(0.0, 0.6, 0.8));
        assert_matrix_close(&r.composition(&r.transpose()), &Matrix::IDENTITY, 1e-12);
    }

    #[test]
    fn viewport_centers_origin() {
        let p = Matrix::viewport(320.0, 320.0).apply(&Vector::ORIGIN);
        assert_eq!((p.x, p.y), (160.0, 160.0));
    }
}
