use crate::hillshading::parameters::LightNormalization;
use crate::trig::deg_to_rad;
use crate::vector::Vec3;
use log::trace;

/// The light direction used for shading, together with the shade a flat
/// horizontal surface receives under it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLight {
    pub direction: Vec3,
    pub flat_reflection: f64,
}

/// Unit vector pointing towards a light source at the given compass azimuth
/// and elevation (both in degrees). No range checks are made.
pub fn light_from_angles(azimuth_deg: f64, altitude_deg: f64) -> Vec3 {
    let azimuth = deg_to_rad(azimuth_deg);
    let altitude = deg_to_rad(altitude_deg);

    Vec3::new(
        azimuth.sin() * altitude.cos(),
        azimuth.cos() * altitude.cos(),
        altitude.sin(),
    )
}

/// Resolves the light direction for one hillshading run.
///
/// If `vector` is all zeros the direction is derived from the azimuth and
/// altitude, otherwise `vector` wins and is scaled according to
/// `normalization`. Either way the result is flipped if needed so that its
/// vertical component is non-negative (the light always comes from above),
/// and that vertical component is reported as the flat reflection.
pub fn resolve_light_direction(
    azimuth_deg: f64,
    altitude_deg: f64,
    vector: Vec3,
    normalization: LightNormalization,
) -> ResolvedLight {
    let mut direction = if vector.is_zero() {
        trace!(
            "light from azimuth {} and altitude {}",
            azimuth_deg,
            altitude_deg
        );
        light_from_angles(azimuth_deg, altitude_deg)
    } else {
        trace!("light from explicit vector {:?}", vector);
        match normalization {
            LightNormalization::SumOfSquares => {
                vector.scale(1. / vector.sum_of_squares())
            }
            LightNormalization::Euclidean => vector.scale(1. / vector.norm()),
        }
    };

    if direction.z < 0. {
        direction = -direction;
    }

    ResolvedLight {
        direction,
        flat_reflection: direction.z,
    }
}
