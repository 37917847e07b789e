/// wirecube core library - matrix math and the wireframe cube model
///
/// Everything here is pure value code with no rendering dependency: drawing
/// goes through caller-supplied closures so any front end (or a test stub)
/// can receive the cube's edges.

pub mod color;
pub mod geometry;
pub mod matrix;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use color::Color;
pub use geometry::{Cube, EDGES};
pub use matrix::Matrix;
pub use transform::RotationState;
pub use vector::Vector3;
