/// Rotation matrices and rotation state
use nalgebra::{Matrix3, Point3};

/// Per-frame increments applied by the frame loop (radians per frame)
pub const SPIN_RATE: RotationAngles = RotationAngles {
    x: 0.01,
    y: 0.008,
    z: 0.005,
};

/// Accumulated rotation around three axes (in radians).
///
/// Angles grow without wrapping; the trigonometric functions are periodic
/// so the drawn orientation is unaffected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationAngles {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationAngles {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// The state one frame later when spinning at `rate`
    pub fn advanced(self, rate: &RotationAngles) -> Self {
        let mut next = self;
        next.rotate(rate.x, rate.y, rate.z);
        next
    }
}

impl Default for RotationAngles {
    fn default() -> Self {
        Self::zero()
    }
}

/// Rotation matrix builders
pub struct Transform;

impl Transform {
    /// Rotation about the X axis; x is left unchanged
    #[rustfmt::skip]
    pub fn rotation_x(angle: f64) -> Matrix3<f64> {
        let (s, c) = angle.sin_cos();
        Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, c, -s,
            0.0, s, c,
        )
    }

    /// Rotation about the Y axis; y is left unchanged
    #[rustfmt::skip]
    pub fn rotation_y(angle: f64) -> Matrix3<f64> {
        let (s, c) = angle.sin_cos();
        Matrix3::new(
            c, 0.0, s,
            0.0, 1.0, 0.0,
            -s, 0.0, c,
        )
    }

    /// Rotation about the Z axis; z is left unchanged
    #[rustfmt::skip]
    pub fn rotation_z(angle: f64) -> Matrix3<f64> {
        let (s, c) = angle.sin_cos();
        Matrix3::new(
            c, -s, 0.0,
            s, c, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    /// The X, Y and Z rotation matrices for a set of angles, in that order
    pub fn axis_rotations(angles: &RotationAngles) -> [Matrix3<f64>; 3] {
        [
            Self::rotation_x(angles.x),
            Self::rotation_y(angles.y),
            Self::rotation_z(angles.z),
        ]
    }

    /// Combined rotation for a set of angles.
    ///
    /// X is applied first, then Y, then Z.
    pub fn rotation_matrix(angles: &RotationAngles) -> Matrix3<f64> {
        let [rx, ry, rz] = Self::axis_rotations(angles);
        rz * ry * rx
    }

    /// Rotate a single point, applying X, then Y, then Z
    pub fn rotate_point(angles: &RotationAngles, point: &Point3<f64>) -> Point3<f64> {
        let [rx, ry, rz] = Self::axis_rotations(angles);
        let rotated = rx * point.coords;
        let rotated = ry * rotated;
        let rotated = rz * rotated;
        Point3::from(rotated)
    }
}
