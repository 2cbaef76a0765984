use crate::errors::ReliefError;
use crate::vector::Vec3;
use serde_json::Value;

/// How an explicitly supplied light vector is scaled before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightNormalization {
    /// Divide by the sum of squares of the components. Keeps the direction
    /// but not unit length, and matches the output scale of the established
    /// hillshading formula.
    #[default]
    SumOfSquares,
    /// Divide by the Euclidean norm, yielding a unit vector.
    Euclidean,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HillshadingParameters {
    /// Distance between adjacent grid samples, along both axes.
    pub spacing: f64,
    /// Compass direction of the light source, in degrees.
    pub azimuth: f64,
    /// Elevation of the light source above the horizon, in degrees.
    pub altitude: f64,
    /// Explicit light direction. The all-zero vector means "use azimuth and
    /// altitude instead".
    pub light_direction: Vec3,
    /// Multiplier applied to heights before slopes are estimated.
    pub exaggeration: f64,
    pub normalization: LightNormalization,
    /// Shade rows on the rayon thread pool.
    pub parallel: bool,
}

impl Default for HillshadingParameters {
    fn default() -> Self {
        Self {
            spacing: 1.0,
            azimuth: 45.0,
            altitude: 45.0,
            light_direction: Vec3::ZERO,
            exaggeration: 1.0,
            normalization: LightNormalization::SumOfSquares,
            parallel: true,
        }
    }
}

impl HillshadingParameters {
    pub fn new(azimuth: f64, altitude: f64) -> Self {
        Self {
            azimuth,
            altitude,
            ..Self::default()
        }
    }

    /// The single factor the heights are multiplied by before normals are
    /// estimated on a unit-spaced grid.
    pub fn height_scale(&self) -> f64 {
        self.exaggeration / self.spacing
    }

    /// Checks that all numbers are finite and that spacing and exaggeration
    /// are positive.
    pub fn validate(&self) -> Result<(), ReliefError> {
        for (name, value) in [
            ("spacing", self.spacing),
            ("azimuth", self.azimuth),
            ("altitude", self.altitude),
            ("exaggeration", self.exaggeration),
            ("light_direction.x", self.light_direction.x),
            ("light_direction.y", self.light_direction.y),
            ("light_direction.z", self.light_direction.z),
        ] {
            if !value.is_finite() {
                return Err(ReliefError::new(&format!(
                    "'{}' must be a finite number, got {}",
                    name, value
                )));
            }
        }

        if self.spacing <= 0. {
            return Err(ReliefError::new(&format!(
                "'spacing' must be positive, got {}",
                self.spacing
            )));
        }

        if self.exaggeration <= 0. {
            return Err(ReliefError::new(&format!(
                "'exaggeration' must be positive, got {}",
                self.exaggeration
            )));
        }

        Ok(())
    }

    /// Reads parameters from a JSON object. Keys that are left out keep
    /// their default values.
    ///
    /// # Example
    ///
    /// ```
    /// use relief::hillshading::parameters::HillshadingParameters;
    ///
    /// let parameters = HillshadingParameters::from_json(
    ///     r#"{ "azimuth": 315, "altitude": 30, "exaggeration": 2.5 }"#,
    /// )
    /// .unwrap();
    /// assert_eq!(parameters.azimuth, 315.0);
    /// assert_eq!(parameters.spacing, 1.0);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ReliefError> {
        let json_data: Value = match serde_json::from_str(json) {
            Ok(data) => data,
            Err(e) => {
                return Err(ReliefError::new(&format!(
                    "Failed to parse hillshading parameters: {}",
                    e
                )))
            }
        };

        let object = json_data.as_object().ok_or_else(|| {
            ReliefError::new("Hillshading parameters must be a JSON object")
        })?;

        let mut parameters = Self::default();

        for (key, value) in object {
            match key.as_str() {
                "spacing" => parameters.spacing = number(key, value)?,
                "azimuth" => parameters.azimuth = number(key, value)?,
                "altitude" => parameters.altitude = number(key, value)?,
                "exaggeration" => parameters.exaggeration = number(key, value)?,
                "light_direction" => {
                    parameters.light_direction = vector(key, value)?
                }
                "normalization" => {
                    parameters.normalization = normalization(key, value)?
                }
                "parallel" => {
                    parameters.parallel = value.as_bool().ok_or_else(|| {
                        ReliefError::new(&format!(
                            "'{}' must be a boolean",
                            key
                        ))
                    })?
                }
                _ => {
                    return Err(ReliefError::new(&format!(
                        "Unknown hillshading parameter '{}' (expected one of: {})",
                        key,
                        KNOWN_KEYS.join(", ")
                    )))
                }
            }
        }

        parameters.validate()?;
        Ok(parameters)
    }
}

const KNOWN_KEYS: [&str; 7] = [
    "spacing",
    "azimuth",
    "altitude",
    "light_direction",
    "exaggeration",
    "normalization",
    "parallel",
];

fn number(key: &str, value: &Value) -> Result<f64, ReliefError> {
    value.as_f64().ok_or_else(|| {
        ReliefError::new(&format!("'{}' must be a number", key))
    })
}

fn vector(key: &str, value: &Value) -> Result<Vec3, ReliefError> {
    let components = match value.as_array() {
        Some(components) if components.len() == 3 => components,
        _ => {
            return Err(ReliefError::new(&format!(
                "'{}' must be an array of 3 numbers",
                key
            )))
        }
    };

    let mut v = [0.; 3];
    for (i, component) in components.iter().enumerate() {
        v[i] = number(key, component)?;
    }
    Ok(Vec3::from(v))
}

fn normalization(
    key: &str,
    value: &Value,
) -> Result<LightNormalization, ReliefError> {
    match value.as_str() {
        Some("sum_of_squares") => Ok(LightNormalization::SumOfSquares),
        Some("euclidean") => Ok(LightNormalization::Euclidean),
        _ => Err(ReliefError::new(&format!(
            "'{}' must be \"sum_of_squares\" or \"euclidean\"",
            key
        ))),
    }
}
