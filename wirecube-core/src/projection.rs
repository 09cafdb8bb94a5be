/// Orthographic projection onto the drawing surface
use nalgebra::Point3;

use crate::geometry::Wireframe;
use crate::transform::{RotationAngles, Transform};

/// Pixels per model-space unit used by the demo
pub const DEFAULT_SCALE: f64 = 200.0;

/// A vertex position on the drawing surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Orthographic projector for a surface of fixed size.
///
/// Depth is dropped entirely: `screen = model.xy * scale + centre`.
/// The centre is the integer half of each surface dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub scale: f64,
    pub width: u32,
    pub height: u32,
}

impl Projection {
    pub fn new(scale: f64, width: u32, height: u32) -> Self {
        Self {
            scale,
            width,
            height,
        }
    }

    /// Screen-space position of the model origin
    pub fn center(&self) -> ProjectedPoint {
        ProjectedPoint::new(f64::from(self.width / 2), f64::from(self.height / 2))
    }

    /// Project an already rotated point, discarding its z coordinate
    pub fn project(&self, point: &Point3<f64>) -> ProjectedPoint {
        let center = self.center();
        ProjectedPoint::new(
            point.x * self.scale + center.x,
            point.y * self.scale + center.y,
        )
    }

    /// Rotate every vertex by `angles` and project it.
    ///
    /// Output index `i` always belongs to vertex `i`, and the whole set is
    /// computed from the one angle triple passed in.
    pub fn project_wireframe<const V: usize, const E: usize>(
        &self,
        wireframe: &Wireframe<V, E>,
        angles: &RotationAngles,
    ) -> [ProjectedPoint; V] {
        let [rx, ry, rz] = Transform::axis_rotations(angles);
        let vertices = *wireframe.vertices();
        vertices.map(|vertex| {
            let rotated = rz * (ry * (rx * vertex.position.coords));
            self.project(&Point3::from(rotated))
        })
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE, 800, 600)
    }
}
