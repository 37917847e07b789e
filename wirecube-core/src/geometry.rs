/// Wireframe cube model
use crate::color::Color;
use crate::matrix::Matrix;
use crate::transform::{identity, transform_point};
use crate::vector::Vector3;

/// Vertex index pairs for the 12 cube edges: front face, back face, then the
/// edges joining corresponding front and back corners.
pub const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// An axis-aligned box centred on the origin, drawn as a wireframe.
///
/// Vertex order is the front face (`+z`) top-left, top-right, bottom-right,
/// bottom-left, followed by the back face (`-z`) in the same pattern.
///
/// World-space vertices are only refreshed by [`Cube::recompute_world_vertices`];
/// call it after [`Cube::set_transform`] and before drawing.
#[derive(Debug, Clone)]
pub struct Cube {
    vertices: [Vector3; 8],
    transform: Matrix,
    transformed: [Vector3; 8],
}

impl Cube {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);
        let vertices = [
            // Front face
            Vector3::new(-hw, hh, hd),
            Vector3::new(hw, hh, hd),
            Vector3::new(hw, -hh, hd),
            Vector3::new(-hw, -hh, hd),
            // Back face
            Vector3::new(-hw, hh, -hd),
            Vector3::new(hw, hh, -hd),
            Vector3::new(hw, -hh, -hd),
            Vector3::new(-hw, -hh, -hd),
        ];

        Self {
            vertices,
            transform: identity(),
            transformed: vertices,
        }
    }

    pub fn set_transform(&mut self, transform: Matrix) {
        self.transform = transform;
    }

    pub fn recompute_world_vertices(&mut self) {
        for (world, local) in self.transformed.iter_mut().zip(self.vertices.iter()) {
            *world = transform_point(*local, self.transform);
        }
    }

    /// Emit every edge of the world-space cube to `line`.
    pub fn draw_edges<F>(&self, color: Color, mut line: F)
    where
        F: FnMut(Vector3, Vector3, Color),
    {
        for &(start, end) in EDGES.iter() {
            line(self.transformed[start], self.transformed[end], color);
        }
    }

    /// Emit every world-space corner to `point`.
    pub fn draw_vertices<F>(&self, color: Color, mut point: F)
    where
        F: FnMut(Vector3, Color),
    {
        for &vertex in self.transformed.iter() {
            point(vertex, color);
        }
    }

    pub fn local_vertices(&self) -> &[Vector3; 8] {
        &self.vertices
    }

    pub fn world_vertices(&self) -> &[Vector3; 8] {
        &self.transformed
    }

    pub fn transform(&self) -> Matrix {
        self.transform
    }

    /// Width, height and depth of the box.
    pub fn dimensions(&self) -> (f32, f32, f32) {
        let corner = self.vertices[1] - self.vertices[7];
        (corner.x, corner.y, corner.z)
    }
}
