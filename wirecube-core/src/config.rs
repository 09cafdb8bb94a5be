/// Fixed scene settings
use crate::projection::{Projection, DEFAULT_SCALE};
use crate::render::{Color, Stroke, WireframeRenderer};
use crate::transform::{RotationAngles, SPIN_RATE};

/// Everything the demo needs to know about its scene.
///
/// There is no runtime configuration; `Default` carries the only values
/// the program uses.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub spin: RotationAngles,
    pub target_fps: u32,
    pub background: Color,
    pub stroke: Stroke,
}

impl SceneConfig {
    pub fn projection(&self) -> Projection {
        Projection::new(self.scale, self.width, self.height)
    }

    pub fn renderer(&self) -> WireframeRenderer {
        WireframeRenderer::new(self.background, self.stroke)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "3D Rotating Cube",
            width: 800,
            height: 600,
            scale: DEFAULT_SCALE,
            spin: SPIN_RATE,
            target_fps: 60,
            background: Color::BLACK,
            stroke: Stroke::new(Color::BLUE, 2),
        }
    }
}
