//! Magnetic fields of circular current loops

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod coil;
pub mod grid;
pub mod superposition;

pub use coil::{field_of_loop, field_of_loop_with, AzimuthConvention, CurrentLoop, LoopEvaluator};
pub use superposition::{total_field, total_field_with};

/// Stores the magnetic field at a sampled location.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MagneticFieldSampler {
    /// Vector representing the magnetic field components along x,y,z, in units of `mu_0 I / (2 pi d)`.
    pub field: Vector3<f64>,

    /// Magnitude of the magnetic field, in the same units.
    pub magnitude: f64,
}

impl MagneticFieldSampler {
    /// Wraps a field vector, caching its magnitude. A NaN magnitude is stored as zero.
    pub fn from_field(field: Vector3<f64>) -> Self {
        let magnitude = field.norm();
        MagneticFieldSampler {
            field,
            magnitude: if magnitude.is_nan() { 0.0 } else { magnitude },
        }
    }
}

impl fmt::Display for MagneticFieldSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:?},{:?},{:?})",
            self.field[0], self.field[1], self.field[2]
        )
    }
}

impl Default for MagneticFieldSampler {
    fn default() -> Self {
        MagneticFieldSampler {
            field: Vector3::new(0.0, 0.0, 0.0),
            magnitude: 0.0,
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_sampler_magnitude() {
        let sampler = MagneticFieldSampler::from_field(Vector3::new(3.0, 0.0, -4.0));
        assert_approx_eq!(sampler.magnitude, 5.0);
        assert_eq!(format!("{}", sampler), "(3.0,0.0,-4.0)");
    }

    #[test]
    fn test_sampler_nan_magnitude_is_zero() {
        let sampler = MagneticFieldSampler::from_field(Vector3::new(f64::NAN, 0.0, 0.0));
        assert_eq!(sampler.magnitude, 0.0);
        assert_eq!(MagneticFieldSampler::default().magnitude, 0.0);
    }
}
