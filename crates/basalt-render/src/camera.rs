//! First-person 3D camera

use basalt_core::{mat4_mul, Transform, Vec3};

/// A first-person camera that follows the player transform
pub struct Camera {
    /// Camera position
    pub position: Vec3,
    /// Target point the camera looks at
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::FORWARD,
            up: Vec3::UP,
            fov: 70.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get camera position as an array for GPU upload
    pub fn position_array(&self) -> [f32; 3] {
        [self.position.x, self.position.y, self.position.z]
    }

    /// Place the camera at a transform, looking along its facing direction
    pub fn follow(&mut self, transform: &Transform) {
        self.position = transform.position;
        self.target = transform.position + transform.forward();
    }

    /// Get the view matrix (4x4, column-major)
    pub fn view_matrix(&self) -> [[f32; 4]; 4] {
        let f = (self.target - self.position).normalized();
        let s = f.cross(&self.up).normalized();
        let u = s.cross(&f);

        [
            [s.x, u.x, -f.x, 0.0],
            [s.y, u.y, -f.y, 0.0],
            [s.z, u.z, -f.z, 0.0],
            [
                -s.dot(&self.position),
                -u.dot(&self.position),
                f.dot(&self.position),
                1.0,
            ],
        ]
    }

    /// Get the perspective projection matrix (4x4, column-major)
    pub fn projection_matrix(&self) -> [[f32; 4]; 4] {
        let fov_rad = self.fov.to_radians();
        let f = 1.0 / (fov_rad / 2.0).tan();
        let depth = self.far - self.near;

        [
            [f / self.aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, -(self.far + self.near) / depth, -1.0],
            [0.0, 0.0, -(2.0 * self.far * self.near) / depth, 0.0],
        ]
    }

    /// Get combined view-projection matrix
    pub fn view_projection_matrix(&self) -> [[f32; 4]; 4] {
        let view = self.view_matrix();
        let proj = self.projection_matrix();
        mat4_mul(&proj, &view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_tracks_transform_facing() {
        let mut camera = Camera::new();
        let mut t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        t.yaw_by(90.0);

        camera.follow(&t);
        assert_eq!(camera.position, Vec3::new(1.0, 2.0, 3.0));

        let dir = (camera.target - camera.position).normalized();
        assert!((dir.x - -1.0).abs() < 1e-5);
        assert!(dir.z.abs() < 1e-5);
    }

    #[test]
    fn identity_view_at_origin() {
        let camera = Camera::new();
        let view = camera.view_matrix();
        // Looking down -Z from the origin: view is the identity
        for (i, col) in view.iter().enumerate() {
            for (j, v) in col.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((v - expected).abs() < 1e-5, "view[{i}][{j}] = {v}");
            }
        }
    }

    #[test]
    fn projection_is_finite() {
        let camera = Camera::new();
        let proj = camera.projection_matrix();
        for col in &proj {
            for v in col {
                assert!(v.is_finite());
            }
        }
        assert_eq!(proj[2][3], -1.0);
    }
}
