use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg};

/// A simple 3D vector with value semantics. Every operation returns a new vector.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")] // Written as `[x, y, z]` in config files
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Creates a new Vec3.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    /// Creates a zero vector.
    pub const fn zero() -> Self {
        Vec3 { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Componentwise sum.
    pub fn add(&self, other: Vec3) -> Self {
        Vec3 { x: self.x + other.x, y: self.y + other.y, z: self.z + other.z }
    }

    /// Scales the vector by a scalar value.
    pub fn scale(&self, scalar: f64) -> Self {
        Vec3 { x: self.x * scalar, y: self.y * scalar, z: self.z * scalar }
    }

    /// Right-handed cross product `self × other`. Not commutative.
    pub fn cross(&self, other: Vec3) -> Self {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Calculates the dot product with another vector.
    pub fn dot(&self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Calculates the squared length (magnitude) of the vector.
    pub fn length_squared(&self) -> f64 {
        self.dot(*self)
    }

    /// Calculates the length (magnitude) of the vector.
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// True when no component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

// Operators delegate to the named methods so both spellings round identically.
impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Vec3::add(&self, other)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        self.scale(scalar)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Vec3::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Values chosen so the algebraic laws hold exactly in binary floating point.
    const A: Vec3 = Vec3::new(1.5, -2.0, 3.25);
    const B: Vec3 = Vec3::new(-4.0, 0.5, 2.0);
    const C: Vec3 = Vec3::new(0.25, 8.0, -1.0);

    #[test]
    fn add_is_commutative_and_associative() {
        assert_eq!(A.add(B), B.add(A));
        assert_eq!(A.add(B).add(C), A.add(B.add(C)));
    }

    #[test]
    fn scale_distributes_over_scalar_sum() {
        let (s, t) = (2.5, -0.75);
        assert_eq!(A.scale(s + t), A.scale(s).add(A.scale(t)));
    }

    #[test]
    fn cross_is_anticommutative() {
        assert_eq!(A.cross(B), B.cross(A).scale(-1.0));
        assert_eq!(A.cross(B), -B.cross(A));
    }

    #[test]
    fn cross_with_self_is_zero() {
        for v in [A, B, C, Vec3::new(1e5, -3e-7, 42.0)] {
            assert_eq!(v.cross(v), Vec3::zero());
        }
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        let z = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(x.cross(y), z);
        assert_eq!(y.cross(z), x);
        assert_eq!(z.cross(x), y);
        // v x B for v along x and B along z points along -y
        assert_eq!(Vec3::new(1e5, 0.0, 0.0).cross(z), Vec3::new(0.0, -1e5, 0.0));
    }

    #[test]
    fn operations_do_not_mutate_operands() {
        let a = A;
        let _ = a.add(B);
        let _ = a.scale(3.0);
        let _ = a.cross(C);
        assert_eq!(a, A);
    }

    #[test]
    fn operators_match_named_methods() {
        assert_eq!(A + B, A.add(B));
        assert_eq!(A * 2.0, A.scale(2.0));
    }

    #[test]
    fn length_and_finiteness() {
        assert_relative_eq!(Vec3::new(3.0, 4.0, 12.0).length(), 13.0);
        assert!(A.is_finite());
        assert!(!Vec3::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Vec3::new(0.0, 0.0, f64::INFINITY).is_finite());
    }
}
