//! Oriented frames along a pipe centerline.
//!
//! A frame's local +Z axis ("forward") is tangent to the path and points
//! back toward the start of the pipe. Ring vertices live in the local XY
//! plane, vertex 0 on local +Y.

use nalgebra::{Point3, UnitQuaternion, Vector3};

/// World-up used to orient the first frame of every pipe.
pub const WORLD_UP: Vector3<f64> = Vector3::new(0.0, 1.0, 0.0);

/// A position plus a rotation defining a local basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedFrame {
    /// Frame origin on the centerline.
    pub position: Point3<f64>,
    /// Rotation from local to world space.
    pub rotation: UnitQuaternion<f64>,
}

impl OrientedFrame {
    /// Create a frame from a position and rotation.
    #[must_use]
    pub const fn new(position: Point3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self { position, rotation }
    }

    /// Create a frame looking along `forward`, rolled so local +Y is as
    /// close to `up` as possible.
    #[must_use]
    pub fn looking(position: Point3<f64>, forward: &Vector3<f64>, up: &Vector3<f64>) -> Self {
        Self::new(position, look_rotation(forward, up))
    }

    /// Local +Z in world space.
    #[inline]
    #[must_use]
    pub fn forward(&self) -> Vector3<f64> {
        self.rotation * Vector3::z()
    }

    /// Local +Y in world space (direction of ring vertex 0).
    #[inline]
    #[must_use]
    pub fn up(&self) -> Vector3<f64> {
        self.rotation * Vector3::y()
    }

    /// Transform a local point to world space.
    #[inline]
    #[must_use]
    pub fn local_to_world_point(&self, local: &Vector3<f64>) -> Point3<f64> {
        self.position + self.rotation * local
    }

    /// Transform a local direction to world space (rotation only).
    #[inline]
    #[must_use]
    pub fn local_to_world_vector(&self, local: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * local
    }

    /// Copy of this frame moved `distance` along its forward axis.
    ///
    /// The receiver is left untouched.
    #[must_use]
    pub fn offset_along_forward(&self, distance: f64) -> Self {
        Self {
            position: self.position + self.forward() * distance,
            rotation: self.rotation,
        }
    }
}

/// Rotation mapping local +Z onto `forward` and local +Y toward `up`.
///
/// The length of `up` is irrelevant. Falls back to a perpendicular axis
/// when `up` is parallel to `forward` or has no length, and to +Z when
/// `forward` has no length.
#[must_use]
pub fn look_rotation(forward: &Vector3<f64>, up: &Vector3<f64>) -> UnitQuaternion<f64> {
    let forward = forward
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::z);

    let up = match up.try_normalize(f64::MIN_POSITIVE) {
        Some(up) if forward.cross(&up).norm_squared() > 1e-12 => up,
        _ => find_perpendicular(forward),
    };

    UnitQuaternion::face_towards(&forward, &up)
}

/// Find a unit vector perpendicular to the given vector.
pub(crate) fn find_perpendicular(v: Vector3<f64>) -> Vector3<f64> {
    // Choose the axis most perpendicular to v
    let abs_x = v.x.abs();
    let abs_y = v.y.abs();
    let abs_z = v.z.abs();

    let axis = if abs_x <= abs_y && abs_x <= abs_z {
        Vector3::x()
    } else if abs_y <= abs_z {
        Vector3::y()
    } else {
        Vector3::z()
    };

    v.cross(&axis)
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::y)
}
