/// Drawing surface contract and the wireframe render stage
use crate::geometry::Wireframe;
use crate::projection::ProjectedPoint;

/// An opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colour and thickness used for every edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub color: Color,
    pub width: u32,
}

impl Stroke {
    pub const fn new(color: Color, width: u32) -> Self {
        Self { color, width }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(Color::BLUE, 2)
    }
}

/// A fixed-size target that can be cleared and drawn on.
///
/// Drawing never fails. Coordinates outside the surface are clipped or
/// ignored by the implementation.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn clear(&mut self, color: Color);
    fn draw_line(&mut self, color: Color, a: ProjectedPoint, b: ProjectedPoint, width: u32);
}

/// Draws a projected wireframe onto a [`Surface`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireframeRenderer {
    pub background: Color,
    pub stroke: Stroke,
}

impl WireframeRenderer {
    pub fn new(background: Color, stroke: Stroke) -> Self {
        Self { background, stroke }
    }

    /// Clear the surface and draw one line per edge, in edge order.
    ///
    /// `points[i]` must be the projection of vertex `i` for this frame.
    pub fn draw_frame<S, const V: usize, const E: usize>(
        &self,
        surface: &mut S,
        wireframe: &Wireframe<V, E>,
        points: &[ProjectedPoint; V],
    ) where
        S: Surface + ?Sized,
    {
        surface.clear(self.background);
        for edge in wireframe.edges() {
            let (a, b) = edge.endpoints();
            surface.draw_line(self.stroke.color, points[a], points[b], self.stroke.width);
        }
    }
}

impl Default for WireframeRenderer {
    fn default() -> Self {
        Self::new(Color::BLACK, Stroke::default())
    }
}
