use crate::raster::Raster;

pub fn assert_eq_approx<T>(a: T, b: T, tolerance: T)
where
    T: PartialOrd + std::ops::Sub<Output = T> + Copy + std::fmt::Debug + Abs,
{
    if !((a - b).abs() <= tolerance) {
        panic!(
            "assertion failed: `(left ~= right)`\n  left: `{:?}`,\n right: `{:?}`",
            a, b
        );
    }
}

/// Asserts that two rasters have the same shape and that every pair of
/// cells is within `tolerance` of each other.
pub fn assert_rasters_eq_approx(a: &Raster<f64>, b: &Raster<f64>, tolerance: f64) {
    if a.shape() != b.shape() {
        panic!(
            "raster shapes differ\n  left: `{:?}`,\n right: `{:?}`",
            a.shape(),
            b.shape()
        );
    }

    for y in 0..a.height {
        for x in 0..a.width {
            let (left, right) = (a.get(x, y), b.get(x, y));
            if !((left - right).abs() <= tolerance) {
                panic!(
                    "rasters differ at ({}, {})\n  left: `{:?}`,\n right: `{:?}`",
                    x, y, left, right
                );
            }
        }
    }
}

pub trait Abs {
    fn abs(self) -> Self;
}

impl Abs for f32 {
    fn abs(self) -> Self {
        f32::abs(self)
    }
}

impl Abs for f64 {
    fn abs(self) -> Self {
        f64::abs(self)
    }
}
