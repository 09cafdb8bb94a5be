/// Geometry primitives for wireframe rendering
use nalgebra::Point3;

/// A corner of a wireframe in model space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f64>,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }
}

/// A line between two vertices, referenced by index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.a, self.b)
    }
}

/// A fixed set of vertices joined by edges.
///
/// Both sequences are sized at compile time and never change after
/// construction, so per-frame work can stay on the stack.
#[derive(Debug, Clone)]
pub struct Wireframe<const V: usize, const E: usize> {
    vertices: [Vertex; V],
    edges: [Edge; E],
}

/// The eight-corner, twelve-edge cube drawn by the demo
pub type CubeWireframe = Wireframe<8, 12>;

impl<const V: usize, const E: usize> Wireframe<V, E> {
    /// Panics if an edge points outside the vertex set or loops back on itself.
    pub fn new(vertices: [Vertex; V], edges: [Edge; E]) -> Self {
        for edge in &edges {
            assert!(
                edge.a < V && edge.b < V,
                "edge ({}, {}) references a vertex outside 0..{}",
                edge.a,
                edge.b,
                V
            );
            assert_ne!(edge.a, edge.b, "edge joins vertex {} to itself", edge.a);
        }
        Self { vertices, edges }
    }

    pub fn vertices(&self) -> &[Vertex; V] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge; E] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        V
    }

    pub fn edge_count(&self) -> usize {
        E
    }
}

impl CubeWireframe {
    /// Unit cube spanning [-1, 1] on every axis.
    ///
    /// Vertices 0-3 are the back face (z = -1) and 4-7 the front face,
    /// each wound in the same order so edge `i -> i + 4` joins matching corners.
    pub fn cube() -> Self {
        let vertices = [
            Vertex::new(-1.0, -1.0, -1.0),
            Vertex::new(1.0, -1.0, -1.0),
            Vertex::new(1.0, 1.0, -1.0),
            Vertex::new(-1.0, 1.0, -1.0),
            Vertex::new(-1.0, -1.0, 1.0),
            Vertex::new(1.0, -1.0, 1.0),
            Vertex::new(1.0, 1.0, 1.0),
            Vertex::new(-1.0, 1.0, 1.0),
        ];

        let edges = [
            // Back face
            Edge::new(0, 1),
            Edge::new(1, 2),
            Edge::new(2, 3),
            Edge::new(3, 0),
            // Front face
            Edge::new(4, 5),
            Edge::new(5, 6),
            Edge::new(6, 7),
            Edge::new(7, 4),
            // Connectors
            Edge::new(0, 4),
            Edge::new(1, 5),
            Edge::new(2, 6),
            Edge::new(3, 7),
        ];

        Self::new(vertices, edges)
    }
}

impl Default for CubeWireframe {
    fn default() -> Self {
        Self::cube()
    }
}
