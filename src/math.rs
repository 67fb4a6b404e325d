//! Vector math for the interaction core
//!
//! Small hand-rolled vectors; the editor only needs component-wise
//! arithmetic, squared distances and grid quantization.

use std::ops::{Add, Sub, Mul, Neg};
use serde::{Serialize, Deserialize};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Squared distance to another point
    pub fn distance_sq(self, other: Vec3) -> f32 {
        (self - other).dot(self - other)
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Integer step vector (grid cells moved per axis)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IVec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl IVec3 {
    pub fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }

    /// Back to world units for a given grid spacing
    pub fn scale(self, grid: f32) -> Vec3 {
        Vec3 {
            x: self.x as f32 * grid,
            y: self.y as f32 * grid,
            z: self.z as f32 * grid,
        }
    }
}

/// Round a value to the nearest multiple of `grid`
pub fn round_to_grid(value: f32, grid: f32) -> f32 {
    (value / grid).round() * grid
}

/// Quantize an offset into whole grid steps per axis
pub fn snap_steps(delta: Vec3, grid: f32) -> IVec3 {
    IVec3 {
        x: (delta.x / grid).round() as i32,
        y: (delta.y / grid).round() as i32,
        z: (delta.z / grid).round() as i32,
    }
}

/// Lock a drag offset to the dominant horizontal axis.
///
/// Uses a 22.5 degree cone: if one of X/Z clearly dominates the other is
/// zeroed, otherwise both components are equalized into a diagonal of the
/// same total magnitude. Y passes through untouched.
pub fn axis_align(offset: Vec3) -> Vec3 {
    let threshold = (std::f32::consts::PI / 8.0).tan();

    let x_score = offset.x.abs();
    let z_score = offset.z.abs();

    let mut out = offset;

    if x_score * threshold > z_score {
        out.z = 0.0;
    } else if z_score * threshold > x_score {
        out.x = 0.0;
    } else {
        let avg = (x_score + z_score) * 0.5;
        out.x = offset.x.signum() * avg;
        out.z = offset.z.signum() * avg;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_sq() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(4.0, 4.0, 0.0);
        assert!((a.distance_sq(b) - 25.0).abs() < 0.001);
    }

    #[test]
    fn test_round_to_grid() {
        assert!((round_to_grid(1.13, 0.25) - 1.25).abs() < 0.001);
        assert!((round_to_grid(-0.6, 0.5) - -0.5).abs() < 0.001);
    }

    #[test]
    fn test_snap_steps_subthreshold() {
        let steps = snap_steps(Vec3::new(0.1, 0.0, 0.05), 0.5);
        assert!(steps.is_zero());
    }

    #[test]
    fn test_snap_steps_rounds_per_axis() {
        let steps = snap_steps(Vec3::new(0.6, 1.1, -0.3), 0.5);
        assert_eq!(steps, IVec3 { x: 1, y: 2, z: -1 });
    }

    #[test]
    fn test_axis_align_x_dominant() {
        // 3*tan(22.5) ~ 1.24 > 1, so Z collapses
        let out = axis_align(Vec3::new(3.0, 0.5, 1.0));
        assert!((out.x - 3.0).abs() < 0.001);
        assert!((out.y - 0.5).abs() < 0.001);
        assert!(out.z.abs() < 0.001);
    }

    #[test]
    fn test_axis_align_z_dominant() {
        let out = axis_align(Vec3::new(-1.0, 0.0, 3.0));
        assert!(out.x.abs() < 0.001);
        assert!((out.z - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_axis_align_diagonal() {
        // Near-diagonal equalizes; (1, 1) is already equal magnitude
        let out = axis_align(Vec3::new(1.0, 0.0, 1.0));
        assert!((out.x - 1.0).abs() < 0.001);
        assert!((out.z - 1.0).abs() < 0.001);

        let out = axis_align(Vec3::new(-1.0, 0.0, 1.2));
        assert!((out.x - -1.1).abs() < 0.001);
        assert!((out.z - 1.1).abs() < 0.001);
    }
}
