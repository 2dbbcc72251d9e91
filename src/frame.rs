//! Orthonormal reference frame attached to a loop normal

use nalgebra::{Matrix3, Vector3};

use crate::error::FieldError;

/// A right-handed orthonormal basis `(normal, tangent1, tangent2)`.
///
/// `normal × tangent1 = tangent2`, so that in the local coordinates `(tangent1, tangent2, normal)`
/// the normal plays the role of the `z` axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub normal: Vector3<f64>,
    pub tangent1: Vector3<f64>,
    pub tangent2: Vector3<f64>,
}

impl Frame {
    /// Change-of-basis matrix whose rows are `(tangent1, tangent2, normal)`.
    ///
    /// Multiplying a lab-frame vector by this matrix gives its local components.
    pub fn to_local_matrix(&self) -> Matrix3<f64> {
        Matrix3::from_rows(&[
            self.tangent1.transpose(),
            self.tangent2.transpose(),
            self.normal.transpose(),
        ])
    }

    /// Inverse of [Frame::to_local_matrix]. The basis is orthonormal, so this is the transpose.
    pub fn to_lab_matrix(&self) -> Matrix3<f64> {
        self.to_local_matrix().transpose()
    }
}

/// Builds the orthonormal frame attached to `direction`.
///
/// `direction` need not be normalised. The first tangent is the cross product of the normal with
/// the lab axis least parallel to it, so its length before normalisation is at least `sqrt(2/3)`.
/// The product is taken as `n × e` for the x and z axes and as `e × n` for the y axis, so that a
/// normal along x gets `tangent1 = -z` and one along z gets `tangent1 = y`.
pub fn build_frame(direction: Vector3<f64>) -> Result<Frame, FieldError> {
    // Rescale by the largest component first so that tiny or huge directions neither
    // underflow nor overflow when squared.
    let scale = direction.amax();
    if scale == 0.0 || !direction.iter().all(|c| c.is_finite()) {
        return Err(FieldError::DegenerateDirection { direction });
    }
    let normal = (direction / scale).normalize();

    let least_parallel = normal.iamin();
    let mut axis = Vector3::<f64>::zeros();
    axis[least_parallel] = 1.0;
    let tangent1 = if least_parallel == 1 {
        axis.cross(&normal)
    } else {
        normal.cross(&axis)
    }
    .normalize();
    let tangent2 = normal.cross(&tangent1);

    Ok(Frame {
        normal,
        tangent1,
        tangent2,
    })
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn assert_orthonormal(frame: &Frame) {
        assert_approx_eq!(frame.normal.norm(), 1.0, 1e-12);
        assert_approx_eq!(frame.tangent1.norm(), 1.0, 1e-12);
        assert_approx_eq!(frame.tangent2.norm(), 1.0, 1e-12);
        assert_approx_eq!(frame.normal.dot(&frame.tangent1), 0.0, 1e-9);
        assert_approx_eq!(frame.normal.dot(&frame.tangent2), 0.0, 1e-9);
        assert_approx_eq!(frame.tangent1.dot(&frame.tangent2), 0.0, 1e-9);
        let handed = frame.tangent1.cross(&frame.tangent2) - frame.normal;
        assert!(handed.norm() < 1e-9, "frame is not right-handed: {:?}", frame);
    }

    #[test]
    fn test_frame_for_lab_axes() {
        for direction in [Vector3::x(), Vector3::y(), Vector3::z(), -Vector3::z()] {
            let frame = build_frame(direction).expect("axis is a valid direction");
            assert_eq!(frame.normal, direction);
            assert_orthonormal(&frame);
        }
    }

    #[test]
    fn test_frame_tangents_for_lab_axes() {
        let cases = [
            (Vector3::x(), -Vector3::z(), Vector3::y()),
            (-Vector3::x(), Vector3::z(), Vector3::y()),
            (Vector3::y(), -Vector3::z(), -Vector3::x()),
            (Vector3::z(), Vector3::y(), -Vector3::x()),
        ];
        for (direction, tangent1, tangent2) in cases {
            let frame = build_frame(direction).expect("axis is a valid direction");
            assert!((frame.tangent1 - tangent1).norm() < 1e-15, "{:?}", frame);
            assert!((frame.tangent2 - tangent2).norm() < 1e-15, "{:?}", frame);
        }
    }

    #[test]
    fn test_frame_normalises_direction() {
        let frame = build_frame(Vector3::new(0.0, 3.0, 4.0)).expect("valid direction");
        assert_approx_eq!(frame.normal.y, 0.6);
        assert_approx_eq!(frame.normal.z, 0.8);
        assert_orthonormal(&frame);
    }

    #[test]
    fn test_frame_near_axis_directions() {
        let directions = [
            Vector3::new(1.0, 1e-17, 0.0),
            Vector3::new(1.0 - 1e-16, 0.0, 1e-9),
            Vector3::new(-1e-300, 1.0, 1e-300),
            Vector3::new(1e-200, 1e-200, 1e-200),
            Vector3::new(1e200, -1e200, 0.0),
        ];
        for direction in directions {
            let frame = build_frame(direction).expect("non-zero direction");
            assert_orthonormal(&frame);
        }
    }

    #[test]
    fn test_frame_random_directions() {
        let mut rng = StdRng::seed_from_u64(7);
        let normal = Normal::new(0.0, 1.0).expect("valid distribution");
        for _ in 0..1000 {
            let direction = Vector3::new(
                normal.sample(&mut rng),
                normal.sample(&mut rng),
                normal.sample(&mut rng),
            ) * 10f64.powi((normal.sample(&mut rng) * 3.0) as i32);
            let frame = build_frame(direction).expect("random direction is non-zero");
            assert_orthonormal(&frame);
            assert!((frame.normal - direction.normalize()).norm() < 1e-12);
        }
    }

    #[test]
    fn test_matrices_are_inverse() {
        let frame = build_frame(Vector3::new(0.3, -1.2, 0.5)).expect("valid direction");
        let product = frame.to_lab_matrix() * frame.to_local_matrix();
        assert!((product - Matrix3::identity()).norm() < 1e-12);

        let v = Vector3::new(1.0, 2.0, -3.0);
        let local = frame.to_local_matrix() * v;
        assert_approx_eq!(local.x, frame.tangent1.dot(&v), 1e-12);
        assert_approx_eq!(local.y, frame.tangent2.dot(&v), 1e-12);
        assert_approx_eq!(local.z, frame.normal.dot(&v), 1e-12);
        assert!((frame.to_lab_matrix() * local - v).norm() < 1e-12);
    }

    #[test]
    fn test_degenerate_direction_rejected() {
        assert_eq!(
            build_frame(Vector3::zeros()),
            Err(FieldError::DegenerateDirection {
                direction: Vector3::zeros()
            })
        );
        assert!(build_frame(Vector3::new(f64::NAN, 0.0, 1.0)).is_err());
        assert!(build_frame(Vector3::new(f64::INFINITY, 0.0, 0.0)).is_err());
    }
}
