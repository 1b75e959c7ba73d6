//! Spatial and common types

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: -1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Self::ZERO
        }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// A 2D integer vector, used for relative mouse-motion accumulation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl AddAssign for Vec2i {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2i {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Pitch is limited to just short of straight up/down so the view direction
/// and the up vector never become collinear.
const PITCH_LIMIT_DEG: f32 = 89.0;

/// A 3D transform with position, rotation (Euler angles), and scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation in degrees (Euler angles: pitch, yaw, roll)
    pub rotation: Vec3,
    pub scale: Vec3,
    /// Optional quaternion rotation [x, y, z, w]. When present, takes precedence
    /// over Euler angles in to_matrix() to avoid gimbal lock. Set by the
    /// physics write-back for simulated bodies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_quat: Option<[f32; 4]>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation_quat: None,
        }
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
        rotation_quat: None,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Move the transform by a world-space delta
    pub fn translate(&mut self, delta: Vec3) {
        self.position = self.position + delta;
    }

    /// Rotate about the world up axis by `degrees`
    pub fn yaw_by(&mut self, degrees: f32) {
        self.rotation.y += degrees;
    }

    /// Tilt about the local right axis by `degrees`, clamped short of vertical
    pub fn pitch_by(&mut self, degrees: f32) {
        self.rotation.x = (self.rotation.x + degrees).clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
    }

    /// Unit vector the transform is facing, derived from yaw and pitch.
    /// Identity rotation faces [`Vec3::FORWARD`] (negative Z).
    pub fn forward(&self) -> Vec3 {
        let pitch = self.rotation.x.to_radians();
        let yaw = self.rotation.y.to_radians();
        Vec3::new(
            -yaw.sin() * pitch.cos(),
            pitch.sin(),
            -yaw.cos() * pitch.cos(),
        )
    }

    /// Unit vector to the transform's right, perpendicular to forward and world up
    pub fn right(&self) -> Vec3 {
        self.forward().cross(&Vec3::UP).normalized()
    }

    /// Convert to a 4x4 transformation matrix (column-major)
    pub fn to_matrix(&self) -> [[f32; 4]; 4] {
        let (r00, r01, r02, r10, r11, r12, r20, r21, r22) =
            if let Some([x, y, z, w]) = self.rotation_quat {
                // Build rotation matrix directly from quaternion (no gimbal lock)
                (
                    1.0 - 2.0 * (y * y + z * z),
                    2.0 * (x * y - w * z),
                    2.0 * (x * z + w * y),
                    2.0 * (x * y + w * z),
                    1.0 - 2.0 * (x * x + z * z),
                    2.0 * (y * z - w * x),
                    2.0 * (x * z - w * y),
                    2.0 * (y * z + w * x),
                    1.0 - 2.0 * (x * x + y * y),
                )
            } else {
                // Euler angles path (ZYX order)
                let (px, py, pz) = (
                    self.rotation.x.to_radians(),
                    self.rotation.y.to_radians(),
                    self.rotation.z.to_radians(),
                );

                let (sx, cx) = (px.sin(), px.cos());
                let (sy, cy) = (py.sin(), py.cos());
                let (sz, cz) = (pz.sin(), pz.cos());

                (
                    cy * cz,
                    sx * sy * cz - cx * sz,
                    cx * sy * cz + sx * sz,
                    cy * sz,
                    sx * sy * sz + cx * cz,
                    cx * sy * sz - sx * cz,
                    -sy,
                    sx * cy,
                    cx * cy,
                )
            };

        [
            [r00 * self.scale.x, r10 * self.scale.x, r20 * self.scale.x, 0.0],
            [r01 * self.scale.y, r11 * self.scale.y, r21 * self.scale.y, 0.0],
            [r02 * self.scale.z, r12 * self.scale.z, r22 * self.scale.z, 0.0],
            [self.position.x, self.position.y, self.position.z, 1.0],
        ]
    }
}

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Multiply two 4x4 column-major matrices
pub fn mat4_mul(a: &[[f32; 4]; 4], b: &[[f32; 4]; 4]) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let v1 = Vec3::new(1.0, 2.0, 3.0);
        let v2 = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(v1 + v2, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(v2 - v1, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(v1 * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-v1, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_vec2i_accumulation() {
        let mut p = Vec2i::ZERO;
        p += Vec2i::new(3, -2);
        p += Vec2i::new(1, 1);
        assert_eq!(p, Vec2i::new(4, -1));
        assert_eq!(p - Vec2i::new(3, -2), Vec2i::new(1, 1));
    }

    #[test]
    fn test_identity_faces_negative_z() {
        let t = Transform::default();
        let f = t.forward();
        assert!((f.x - 0.0).abs() < 1e-6);
        assert!((f.y - 0.0).abs() < 1e-6);
        assert!((f.z - -1.0).abs() < 1e-6);

        let r = t.right();
        assert!((r.x - 1.0).abs() < 1e-6);
        assert!((r.z - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_yaw_quarter_turn() {
        let mut t = Transform::default();
        t.yaw_by(90.0);
        let f = t.forward();
        // Positive yaw about +Y swings -Z toward -X
        assert!((f.x - -1.0).abs() < 1e-6);
        assert!(f.z.abs() < 1e-6);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut t = Transform::default();
        t.pitch_by(120.0);
        assert_eq!(t.rotation.x, 89.0);
        t.pitch_by(-300.0);
        assert_eq!(t.rotation.x, -89.0);
    }

    #[test]
    fn test_forward_right_orthogonal() {
        let mut t = Transform::default();
        t.yaw_by(37.0);
        t.pitch_by(20.0);
        assert!(t.forward().dot(&t.right()).abs() < 1e-5);
        assert!((t.forward().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_transform_default() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
    }
}
