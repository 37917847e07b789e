/// Matrix construction, composition and point transformation
use crate::matrix::Matrix;
use crate::vector::Vector3;

/// The identity transform.
pub fn identity() -> Matrix {
    Matrix::IDENTITY
}

/// Compose two transforms so that `a` is applied first, then `b`.
///
/// `out[c*4 + r] = Σk a[c*4 + k] * b[k*4 + r]` over the column-major storage,
/// which is the product `B * A` in column-vector notation. Order matters:
/// `multiply(rotate_x(t), rotate_y(t))` and `multiply(rotate_y(t), rotate_x(t))`
/// are different transforms.
pub fn multiply(a: Matrix, b: Matrix) -> Matrix {
    let a = a.to_cols_array();
    let b = b.to_cols_array();
    let mut out = [0.0; 16];
    for c in 0..4 {
        for r in 0..4 {
            out[c * 4 + r] = (0..4).map(|k| a[c * 4 + k] * b[k * 4 + r]).sum();
        }
    }
    Matrix::from_cols_array(out)
}

/// Right-handed rotation about the X axis (radians).
pub fn rotate_x(angle: f32) -> Matrix {
    let (sin, cos) = angle.sin_cos();
    Matrix::from_rows([
        [1., 0., 0., 0.],
        [0., cos, -sin, 0.],
        [0., sin, cos, 0.],
        [0., 0., 0., 1.],
    ])
}

/// Right-handed rotation about the Y axis (radians).
pub fn rotate_y(angle: f32) -> Matrix {
    let (sin, cos) = angle.sin_cos();
    Matrix::from_rows([
        [cos, 0., sin, 0.],
        [0., 1., 0., 0.],
        [-sin, 0., cos, 0.],
        [0., 0., 0., 1.],
    ])
}

/// Apply `m` to the point `v` with an implied homogeneous w of 1.
pub fn transform_point(v: Vector3, m: Matrix) -> Vector3 {
    let [c0, c1, c2, c3] = [m.column(0), m.column(1), m.column(2), m.column(3)];
    Vector3::new(
        v.x * c0[0] + v.y * c1[0] + v.z * c2[0] + c3[0],
        v.x * c0[1] + v.y * c1[1] + v.z * c2[1] + c3[1],
        v.x * c0[2] + v.y * c1[2] + v.z * c2[2] + c3[2],
    )
}

/// Accumulated rotation about the X and Y axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Turn a mouse drag into rotation: horizontal motion yaws about Y,
    /// vertical motion pitches about X.
    pub fn apply_drag(&mut self, delta_x: f32, delta_y: f32, sensitivity: f32) {
        self.rotate(delta_y * sensitivity, delta_x * sensitivity);
    }

    /// Rotation about X followed by rotation about Y.
    pub fn matrix(&self) -> Matrix {
        multiply(rotate_x(self.x), rotate_y(self.y))
    }
}
