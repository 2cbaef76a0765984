use crate::hillshading::light::{resolve_light_direction, ResolvedLight};
use crate::hillshading::normals::surface_normal_at;
use crate::hillshading::parameters::HillshadingParameters;
use crate::raster::Raster;
use crate::vector::Vec3;
use log::{debug, trace};
use rayon::prelude::*;

/// The result of a hillshading run.
#[derive(Debug, Clone, PartialEq)]
pub struct Hillshade {
    /// Illumination of every cell, same shape as the height grid.
    pub shading: Raster<f64>,
    /// The light direction that was actually used.
    pub light_direction: Vec3,
    /// The shade of a perfectly flat surface under `light_direction`.
    pub flat_reflection: f64,
}

/// Shade of a surface with the given normal: the dot product with the light
/// direction, with surfaces facing away from the light set to 0. NaN is
/// passed through.
pub fn shade(normal: &Vec3, light: &Vec3) -> f64 {
    let illumination = normal.dot(light);
    if illumination < 0. {
        0.
    } else {
        illumination
    }
}

fn shade_row(scaled: &Raster<f64>, y: usize, light: &Vec3, row: &mut [f64]) {
    for (x, cell) in row.iter_mut().enumerate() {
        *cell = shade(&surface_normal_at(scaled, x, y), light);
    }
}

/// Computes the hillshade of a height grid.
///
/// Heights are multiplied by `exaggeration / spacing`, a unit normal is
/// estimated for every cell and shaded against the light resolved from
/// `parameters`. The parameters are used as given; call
/// [`HillshadingParameters::validate`] first if they come from an untrusted
/// source.
///
/// # Example
///
/// ```
/// use relief::hillshading::parameters::HillshadingParameters;
/// use relief::hillshading::shading::hillshade;
/// use relief::raster::Raster;
///
/// let heights = Raster::filled(3, 3, 10.0);
/// let result = hillshade(&heights, &HillshadingParameters::default());
/// assert!((result.flat_reflection - 0.5_f64.sqrt()).abs() < 1e-12);
/// assert!((result.shading.get(1, 1) - result.flat_reflection).abs() < 1e-12);
/// ```
pub fn hillshade(
    heights: &Raster<f64>,
    parameters: &HillshadingParameters,
) -> Hillshade {
    let ResolvedLight {
        direction: light,
        flat_reflection,
    } = resolve_light_direction(
        parameters.azimuth,
        parameters.altitude,
        parameters.light_direction,
        parameters.normalization,
    );

    debug!(
        "hillshading {}x{} grid, light direction {:?}, flat reflection {}",
        heights.width, heights.height, light, flat_reflection
    );

    let scale = parameters.height_scale();
    let scaled = heights.map(|h| h * scale);
    let mut shading: Raster<f64> = Raster::new(heights.width, heights.height);

    if heights.width > 0 && heights.height > 0 {
        let width = heights.width;
        if parameters.parallel {
            trace!("shading rows in parallel");
            shading
                .data_mut()
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| shade_row(&scaled, y, &light, row));
        } else {
            trace!("shading rows sequentially");
            shading
                .data_mut()
                .chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| shade_row(&scaled, y, &light, row));
        }
    }

    Hillshade {
        shading,
        light_direction: light,
        flat_reflection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hillshading::parameters::LightNormalization;
    use crate::testing::{assert_eq_approx, assert_rasters_eq_approx};
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn shade_clamps_light_from_behind() {
        let up = Vec3::new(0., 0., 1.);
        assert_eq!(shade(&up, &Vec3::new(0., 0., 0.5)), 0.5);
        assert_eq!(shade(&up, &Vec3::new(0., 0., -0.5)), 0.);
        assert_eq!(shade(&Vec3::new(1., 0., 0.), &Vec3::new(-1., 0., 0.)), 0.);
    }

    #[test]
    fn shade_passes_nan_through() {
        let nan_normal = Vec3::new(f64::NAN, 0., 1.);
        assert!(shade(&nan_normal, &Vec3::new(0.5, 0.5, 0.5)).is_nan());
    }

    #[test]
    fn flat_grid_of_height_10() {
        let heights = Raster::filled(3, 3, 10.);
        let result = hillshade(&heights, &HillshadingParameters::default());

        assert_eq_approx(result.flat_reflection, FRAC_1_SQRT_2, 1e-12);
        for &value in result.shading.data() {
            assert_eq_approx(value, FRAC_1_SQRT_2, 1e-12);
        }
    }

    /// A ramp rising one unit per row, lit exactly along its normal.
    #[test]
    fn ramp_lit_face_on_is_fully_illuminated() {
        let heights = Raster::from_rows(vec![
            vec![0., 0., 0.],
            vec![1., 1., 1.],
            vec![2., 2., 2.],
        ])
        .unwrap();

        let result = hillshade(&heights, &HillshadingParameters::new(180., 45.));
        assert_eq_approx(result.shading.get(1, 1), 1., 1e-12);
        for &value in result.shading.data() {
            assert_eq_approx(value, 1., 1e-12);
        }
    }

    #[test]
    fn ramp_lit_from_behind_is_dark() {
        let heights = Raster::from_rows(vec![
            vec![0., 0., 0.],
            vec![2., 2., 2.],
            vec![4., 4., 4.],
        ])
        .unwrap();

        // the ramp climbs towards the light faster than the light rises
        let result = hillshade(&heights, &HillshadingParameters::new(0., 20.));
        assert!(result.shading.data().iter().all(|&value| value == 0.));
    }

    #[test]
    fn explicit_light_vector_is_reported() {
        let heights = Raster::filled(4, 2, 0.);
        let parameters = HillshadingParameters {
            light_direction: Vec3::new(0., 0., -2.),
            ..Default::default()
        };

        let result = hillshade(&heights, &parameters);
        assert_eq!(result.light_direction, Vec3::new(-0., -0., 0.5));
        assert_eq!(result.flat_reflection, 0.5);
        assert!(result.shading.data().iter().all(|&value| value == 0.5));
    }

    #[test]
    fn euclidean_normalization_saturates_face_on() {
        let heights = Raster::from_rows(vec![vec![0., 1.], vec![0., 1.]]).unwrap();
        let parameters = HillshadingParameters {
            light_direction: Vec3::new(-3., 0., 3.),
            normalization: LightNormalization::Euclidean,
            ..Default::default()
        };

        let result = hillshade(&heights, &parameters);
        for &value in result.shading.data() {
            assert_eq_approx(value, 1., 1e-12);
        }
    }

    #[test]
    fn spacing_and_exaggeration_cancel_out() {
        let heights = Raster::from_rows(vec![
            vec![1250., 1256., 1265.],
            vec![1271., 1280., 1297.],
            vec![1274., 1303., 1318.],
        ])
        .unwrap();

        let reference = hillshade(
            &heights,
            &HillshadingParameters {
                spacing: 30.,
                exaggeration: 1.,
                ..Default::default()
            },
        );
        let scaled = hillshade(
            &heights,
            &HillshadingParameters {
                spacing: 60.,
                exaggeration: 2.,
                ..Default::default()
            },
        );
        assert_rasters_eq_approx(&reference.shading, &scaled.shading, 1e-12);
    }

    #[test]
    fn nan_height_contaminates_its_neighbourhood_only() {
        let mut heights = Raster::filled(5, 5, 100.);
        heights.set(0, 0, f64::NAN);

        let result = hillshade(&heights, &HillshadingParameters::default());
        assert!(result.shading.get(0, 0).is_nan());
        assert!(result.shading.get(1, 0).is_nan());
        assert!(result.shading.get(0, 1).is_nan());
        assert_eq_approx(result.shading.get(4, 4), FRAC_1_SQRT_2, 1e-12);
    }

    #[test]
    fn sequential_and_parallel_results_are_identical() {
        let heights = Raster::from_vec(
            7,
            5,
            (0..35).map(|i| ((i * 37) % 11) as f64 * 3.5).collect(),
        )
        .unwrap();

        let parallel = hillshade(&heights, &HillshadingParameters::default());
        let sequential = hillshade(
            &heights,
            &HillshadingParameters {
                parallel: false,
                ..Default::default()
            },
        );
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn empty_grid_gives_empty_shading() {
        let heights: Raster<f64> = Raster::new(0, 4);
        let result = hillshade(&heights, &HillshadingParameters::default());
        assert_eq!(result.shading.shape(), (4, 0));
    }
}
