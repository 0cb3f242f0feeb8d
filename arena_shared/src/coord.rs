//! Positioned, oriented entities.
//!
//! A [`Coord3D`] is a position plus a right/up/forward basis. The basis is
//! rotated in place every frame, so it is re-orthonormalized periodically to
//! keep floating-point drift bounded over long sessions.

use tracing::warn;

use crate::math::{MathError, Matrix, Vector};
use crate::physics::{spheres_overlap, Sphere};

/// Basis rotations between two Gram-Schmidt passes.
pub const REORTHONORMALIZE_EVERY: u32 = 64;

/// Position and orientation of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Coord3D {
    /// World position.
    pub d_vec: Vector,
    /// Right.
    pub r: Vector,
    /// Up.
    pub u: Vector,
    /// Forward.
    pub f: Vector,
    /// Orientation: columns are `r`, `u`, `f`.
    pub rot_mat: Matrix,
    /// Translation to `d_vec`.
    pub mov_mat: Matrix,
    /// Bounding sphere in local space.
    pub sphere: Sphere,
    rotations_since_fix: u32,
}

impl Default for Coord3D {
    fn default() -> Self {
        Self::new(Vector::ORIGIN)
    }
}

impl Coord3D {
    /// Creates an entity at `position` with the world basis.
    pub fn new(position: Vector) -> Self {
        let mut c = Self {
            d_vec: position,
            r: Vector::X,
            u: Vector::Y,
            f: Vector::Z,
            rot_mat: Matrix::IDENTITY,
            mov_mat: Matrix::IDENTITY,
            sphere: Sphere::default(),
            rotations_since_fix: 0,
        };
        c.update_mat();
        c
    }

    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self::new(Vector::new(x, y, z))
    }

    /// Rotates the basis about the world Y axis. The position is untouched.
    pub fn rotate_y(&mut self, t: f64) {
        self.rotate(&Matrix::rotation_y(t));
    }

    /// Rotates the basis about an arbitrary unit axis.
    pub fn rotate_about(&mut self, axis: &Vector, t: f64) {
        let mut m = Matrix::IDENTITY;
        m.rotate_with_vector(t, axis);
        self.rotate(&m);
    }

    fn rotate(&mut self, m: &Matrix) {
        self.r = m.apply(&self.r);
        self.u = m.apply(&self.u);
        self.f = m.apply(&self.f);

        self.rotations_since_fix += 1;
        if self.rotations_since_fix >= REORTHONORMALIZE_EVERY {
            if let Err(err) = self.orthonormalize() {
                warn!(%err, "degenerate basis; resetting to world axes");
                self.reset_basis();
            }
        }
    }

    /// Gram-Schmidt over `f`, then `u`, keeping the frame right-handed.
    ///
    /// On failure the basis is left as it was.
    pub fn orthonormalize(&mut self) -> Result<(), MathError> {
        let f = self.f.normalized()?;
        let r = self.u.cross(&f).normalized()?;
        let u = f.cross(&r);
        self.f = f;
        self.r = r;
        self.u = u;
        self.rotations_since_fix = 0;
        Ok(())
    }

    pub fn reset_basis(&mut self) {
        self.r = Vector::X;
        self.u = Vector::Y;
        self.f = Vector::Z;
        self.rotations_since_fix = 0;
    }

    pub fn move_r(&mut self, scalar: f64) {
        let r = self.r;
        self.d_vec.add_scaled(&r, scalar);
    }

    pub fn move_u(&mut self, scalar: f64) {
        let u = self.u;
        self.d_vec.add_scaled(&u, scalar);
    }

    pub fn move_f(&mut self, scalar: f64) {
        let f = self.f;
        self.d_vec.add_scaled(&f, scalar);
    }

    /// Translates by `v` (x/y/z only).
    pub fn move_position(&mut self, v: &Vector) {
        self.d_vec.add_scaled(v, 1.0);
    }

    /// Moves to `v` (x/y/z only).
    pub fn set_position(&mut self, v: &Vector) {
        self.d_vec.x = v.x;
        self.d_vec.y = v.y;
        self.d_vec.z = v.z;
    }

    /// Copies another basis (x/y/z only).
    pub fn set_attitude(&mut self, r: &Vector, u: &Vector, f: &Vector) {
        for (dst, src) in [(&mut self.r, r), (&mut self.u, u), (&mut self.f, f)] {
            dst.x = src.x;
            dst.y = src.y;
            dst.z = src.z;
        }
    }

    /// Rebuilds `mov_mat` and `rot_mat` from the current pose.
    pub fn update_mat(&mut self) {
        self.mov_mat.initialize();
        self.mov_mat.m[0][3] = self.d_vec.x;
        self.mov_mat.m[1][3] = self.d_vec.y;
        self.mov_mat.m[2][3] = self.d_vec.z;

        self.rot_mat.initialize();
        for (col, axis) in [self.r, self.u, self.f].iter().enumerate() {
            self.rot_mat.m[0][col] = axis.x;
            self.rot_mat.m[1][col] = axis.y;
            self.rot_mat.m[2][col] = axis.z;
        }
    }

    /// Object → world: translation after rotation.
    pub fn model_matrix(&self) -> Matrix {
        self.mov_mat.composition(&self.rot_mat)
    }

    /// Sphere-sphere test against another entity.
    pub fn sphere_hit(&self, other: &Coord3D) -> bool {
        spheres_overlap(&self.d_vec, &self.sphere, &other.d_vec, &other.sphere)
    }
}

/// The viewer. Its basis doubles as the view basis.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub coord: Coord3D,
    /// `-f`: the direction the view matrix looks down.
    pub front: Vector,
    /// Position expressed in the camera's own axes.
    pub cv: Vector,
}

impl Camera {
    pub fn new(position: Vector) -> Self {
        let mut c = Self {
            coord: Coord3D::new(position),
            front: Vector::with_w(0.0, 0.0, -1.0, 1.0),
            cv: Vector::ORIGIN,
        };
        c.update_mat();
        c
    }

    /// Rebuilds the view matrix into `coord.rot_mat`.
    ///
    /// Rows are `r`, `u`, `front`; the translation column is `-cv`.
    pub fn update_mat(&mut self) {
        let c = &mut self.coord;
        self.front = -c.f;
        self.cv.x = c.d_vec.dot_product(&c.r);
        self.cv.y = c.d_vec.dot_product(&c.u);
        self.cv.z = c.d_vec.dot_product(&self.front);

        let m = &mut c.rot_mat.m;
        for (row, axis) in [c.r, c.u, self.front].iter().enumerate() {
            m[row][0] = axis.x;
            m[row][1] = axis.y;
            m[row][2] = axis.z;
        }
        m[0][3] = -self.cv.x;
        m[1][3] = -self.cv.y;
        m[2][3] = -self.cv.z;
    }

    /// The view matrix built by the last [`Camera::update_mat`].
    pub fn view_matrix(&self) -> &Matrix {
        &self.coord.rot_mat
    }
}
