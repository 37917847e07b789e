/// Camera and projection onto the terminal grid
use nalgebra::{Matrix4, Point3, Vector3 as NVector3, Vector4};
use wirecube_core::Vector3;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 0.5;

/// Perspective camera looking at a target point
///
/// The combined view-projection matrix is cached and rebuilt whenever the
/// camera changes, so projecting a point is a single matrix-vector product.
pub struct Camera {
    position: Point3<f32>,
    target: Point3<f32>,
    up: NVector3<f32>,
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
    view_projection: Matrix4<f32>,
}

impl Camera {
    /// Camera for a grid of `width` x `height` cells.
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            position: Point3::new(2.0, 2.0, 4.0),
            target: Point3::origin(),
            up: NVector3::y(),
            fov: 45f32.to_radians(),
            aspect: Self::grid_aspect(width, height),
            near: 0.1,
            far: 100.0,
            view_projection: Matrix4::identity(),
        };
        camera.refresh();
        camera
    }

    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = Point3::new(position.x, position.y, position.z);
        self.refresh();
        self
    }

    pub fn with_fov_degrees(mut self, fov: f32) -> Self {
        self.fov = fov.to_radians();
        self.refresh();
        self
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = Self::grid_aspect(width, height);
        self.refresh();
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    fn grid_aspect(width: u32, height: u32) -> f32 {
        width.max(1) as f32 * CELL_ASPECT / height.max(1) as f32
    }

    fn refresh(&mut self) {
        self.view_projection = self.projection_matrix() * self.view_matrix();
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.view_projection
    }

    /// Project a world-space point to cell coordinates.
    ///
    /// Returns `(column, row, depth)` with depth growing away from the
    /// camera, or `None` when the point is outside the view volume or the
    /// camera is degenerate (e.g. looking along its up vector).
    pub fn project_to_screen(
        &self,
        point: Vector3,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = self.view_projection * Vector4::new(point.x, point.y, point.z, 1.0);

        // Behind the camera or degenerate
        if clip.w.is_nan() || clip.w < 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if !ndc.iter().all(|v| v.is_finite()) {
            return None;
        }
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z.abs() > 1.0 {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(80, 24)
    }
}
