//! Magnetic field from a circular coil

use nalgebra::{Matrix3, Vector3};
use rayon::prelude::*;
use std::f64::consts::PI;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FieldError;
use crate::frame::{build_frame, Frame};
use crate::maths::ellip_ke;

/// A circular current loop made of a single turn of wire.
///
/// Lengths are in units of an arbitrary length `d`; the field of a loop is returned in units of
/// `mu_0 I / (2 pi d)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentLoop {
    /// Radius of the loop.
    pub radius: f64,
    /// Position of the loop centre.
    pub centre: Vector3<f64>,
    /// A vector orthogonal to the loop plane, not necessarily normalised.
    /// The current is positive if it is right-hand oriented with respect to the normal.
    pub normal: Vector3<f64>,
}

impl CurrentLoop {
    pub fn new(radius: f64, centre: Vector3<f64>, normal: Vector3<f64>) -> Self {
        CurrentLoop {
            radius,
            centre,
            normal,
        }
    }
}

/// How the azimuth of a point is measured in the plane of the loop.
///
/// `x` and `y` are the coordinates along the first and second tangent of the loop [Frame].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AzimuthConvention {
    /// `theta = atan(x / y)`, and `theta = 0` whenever `y == 0`.
    #[default]
    Legacy,
    /// `theta = atan2(y, x)`: `(cos theta, sin theta)` is the radial unit vector.
    Cylindrical,
}

impl AzimuthConvention {
    fn azimuth(self, x: f64, y: f64) -> f64 {
        match self {
            AzimuthConvention::Legacy => {
                if y == 0.0 {
                    0.0
                } else {
                    (x / y).atan()
                }
            }
            AzimuthConvention::Cylindrical => y.atan2(x),
        }
    }
}

/// A validated [CurrentLoop] together with its frame, ready to be evaluated at many points.
#[derive(Clone, Copy, Debug)]
pub struct LoopEvaluator {
    radius: f64,
    centre: Vector3<f64>,
    frame: Frame,
    to_local: Matrix3<f64>,
    to_lab: Matrix3<f64>,
    convention: AzimuthConvention,
}

/// Below this fraction of the distance to the wire, measured from the axis, the field is taken from
/// its power series in `rho`. Closer in, the closed form loses all precision to cancellation.
const NEAR_AXIS: f64 = 1e-3;

impl LoopEvaluator {
    /// Checks the loop geometry and builds its frame.
    pub fn new(
        current_loop: &CurrentLoop,
        convention: AzimuthConvention,
    ) -> Result<Self, FieldError> {
        let radius = current_loop.radius;
        let centre = current_loop.centre;
        if !(radius > 0.0 && radius.is_finite()) || !centre.iter().all(|c| c.is_finite()) {
            return Err(FieldError::InvalidLoopGeometry { radius, centre });
        }
        let frame = build_frame(current_loop.normal)?;
        Ok(LoopEvaluator {
            radius,
            centre,
            frame,
            to_local: frame.to_local_matrix(),
            to_lab: frame.to_lab_matrix(),
            convention,
        })
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Field of the loop at `location`, in the lab frame.
    ///
    /// `location` must be finite; callers validate their point sets with [validate_points].
    pub fn field_at(&self, location: &Vector3<f64>) -> Vector3<f64> {
        let local = self.to_local * (location - self.centre);
        self.to_lab * self.local_field(&local)
    }

    /// Field in the loop frame, from eqns (1) and (2) of Phys. Rev. A 35, 1535 (1987).
    fn local_field(&self, local: &Vector3<f64>) -> Vector3<f64> {
        let radius = self.radius;
        let (x, y, z) = (local.x, local.y, local.z);
        let rho = (x.powi(2) + y.powi(2)).sqrt();
        let theta = self.convention.azimuth(x, y);

        let axis_sq = radius.powi(2) + z.powi(2);
        let (brho, bz) = if rho <= NEAR_AXIS * axis_sq.sqrt() {
            near_axis_field(radius, rho, z)
        } else {
            let far_sq = (radius + rho).powi(2) + z.powi(2);
            let near_sq = (radius - rho).powi(2) + z.powi(2);
            let (kk, ek) = ellip_ke(4.0 * radius * rho / far_sq);

            let bz = 1.0 / far_sq.sqrt()
                * (kk + ek * (radius.powi(2) - rho.powi(2) - z.powi(2)) / near_sq);
            let brho = z / (rho * far_sq.sqrt())
                * (-kk + ek * (radius.powi(2) + rho.powi(2) + z.powi(2)) / near_sq);

            // On the wire both components blow up.
            (finite_or_zero(brho), finite_or_zero(bz))
        };

        Vector3::new(theta.cos() * brho, theta.sin() * brho, bz)
    }
}

/// Radial and axial field close to the axis, expanded to third order in `rho` from the on-axis
/// field `B0(z) = pi R^2 / (R^2 + z^2)^(3/2)`:
///
/// `Brho = -rho/2 B0' + rho^3/16 B0'''` and `Bz = B0 - rho^2/4 B0''`.
///
/// The radial part is exactly zero on the axis.
fn near_axis_field(radius: f64, rho: f64, z: f64) -> (f64, f64) {
    let r_sq = radius.powi(2);
    let s = r_sq + z.powi(2);
    let on_axis = PI * r_sq / s.powf(1.5);
    let rho_sq = rho.powi(2);
    let brho = 1.5 * on_axis * z * rho / s
        * (1.0 + 0.625 * rho_sq * (3.0 * r_sq - 4.0 * z.powi(2)) / s.powi(2));
    let bz = on_axis * (1.0 - 0.75 * rho_sq * (4.0 * z.powi(2) - r_sq) / s.powi(2));
    (brho, bz)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Fails on the first (lowest index) observation point with a non-finite coordinate.
pub fn validate_points(points: &[Vector3<f64>]) -> Result<(), FieldError> {
    match points
        .iter()
        .position(|point| !point.iter().all(|c| c.is_finite()))
    {
        Some(index) => Err(FieldError::InvalidInput {
            index,
            point: points[index],
        }),
        None => Ok(()),
    }
}

/// Calculates the field of a single loop at each of `points`, using the legacy azimuth convention.
///
/// The returned vector has one entry per point, in the same order.
pub fn field_of_loop(
    points: &[Vector3<f64>],
    current_loop: &CurrentLoop,
) -> Result<Vec<Vector3<f64>>, FieldError> {
    field_of_loop_with(points, current_loop, AzimuthConvention::default())
}

/// As [field_of_loop], with an explicit [AzimuthConvention].
pub fn field_of_loop_with(
    points: &[Vector3<f64>],
    current_loop: &CurrentLoop,
    convention: AzimuthConvention,
) -> Result<Vec<Vector3<f64>>, FieldError> {
    let evaluator = LoopEvaluator::new(current_loop, convention)?;
    validate_points(points)?;
    debug!(
        "evaluating loop of radius {} at {} points",
        current_loop.radius,
        points.len()
    );
    Ok(points
        .par_iter()
        .map(|point| evaluator.field_at(point))
        .collect())
}
