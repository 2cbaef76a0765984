//! Surface normal estimation for a height grid.
//!
//! Slopes are estimated on a unit-spaced grid: the caller folds the real
//! grid spacing (and any vertical exaggeration) into the heights first.
//! Interior cells use central differences, boundary cells use one-sided
//! differences against their single inner neighbour.

use crate::raster::Raster;
use crate::vector::Vec3;

/// Derivative of `f` at index `i` along an axis of `len` samples, where
/// `f(k)` returns the sample at index `k` of that axis.
fn axis_derivative<F>(i: usize, len: usize, f: F) -> f64
where
    F: Fn(usize) -> f64,
{
    if len < 2 {
        0.
    } else if i == 0 {
        f(1) - f(0)
    } else if i == len - 1 {
        f(len - 1) - f(len - 2)
    } else {
        (f(i + 1) - f(i - 1)) / 2.
    }
}

/// Returns `(dz/dx, dz/dy)` at a single cell, `x` being the column and `y`
/// the row.
pub fn gradient_at(heights: &Raster<f64>, x: usize, y: usize) -> (f64, f64) {
    let dzdx = axis_derivative(x, heights.width, |k| heights.get(k, y));
    let dzdy = axis_derivative(y, heights.height, |k| heights.get(x, k));
    (dzdx, dzdy)
}

/// Computes the `(dz/dx, dz/dy)` rasters of a height grid.
pub fn gradient(heights: &Raster<f64>) -> (Raster<f64>, Raster<f64>) {
    let mut dzdx = Raster::new(heights.width, heights.height);
    let mut dzdy = Raster::new(heights.width, heights.height);

    for y in 0..heights.height {
        for x in 0..heights.width {
            let (p, q) = gradient_at(heights, x, y);
            dzdx.set(x, y, p);
            dzdy.set(x, y, q);
        }
    }

    (dzdx, dzdy)
}

/// Upward unit normal of a surface with the given slopes.
pub fn surface_normal(dzdx: f64, dzdy: f64) -> Vec3 {
    let length = (dzdx * dzdx + dzdy * dzdy + 1.).sqrt();
    Vec3::new(-dzdx / length, -dzdy / length, 1. / length)
}

pub fn surface_normal_at(heights: &Raster<f64>, x: usize, y: usize) -> Vec3 {
    let (dzdx, dzdy) = gradient_at(heights, x, y);
    surface_normal(dzdx, dzdy)
}

/// Normals of the surface `scale * heights`, one per cell.
pub fn surface_normals(heights: &Raster<f64>, scale: f64) -> Raster<Vec3> {
    let scaled = heights.map(|h| h * scale);
    let mut normals = Raster::new(scaled.width, scaled.height);

    for y in 0..scaled.height {
        for x in 0..scaled.width {
            normals.set(x, y, surface_normal_at(&scaled, x, y));
        }
    }

    normals
}
