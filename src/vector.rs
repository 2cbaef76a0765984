use std::ops::Neg;

/// A 3-component real vector. `x` runs along grid columns, `y` along grid
/// rows and `z` is vertical.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.,
        y: 0.,
        z: 0.,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 { x, y, z }
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn sum_of_squares(&self) -> f64 {
        self.dot(self)
    }

    pub fn norm(&self) -> f64 {
        self.sum_of_squares().sqrt()
    }

    pub fn scale(&self, factor: f64) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// True when the sum of squares of the components is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.sum_of_squares() == 0.
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(components: [f64; 3]) -> Vec3 {
        Vec3::new(components[0], components[1], components[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> [f64; 3] {
        [v.x, v.y, v.z]
    }
}
