//! Superposition of the fields of several loops

use nalgebra::Vector3;
use rayon::prelude::*;
use tracing::debug;

use super::coil::{validate_points, AzimuthConvention, CurrentLoop, LoopEvaluator};
use crate::error::FieldError;

/// Calculates the total field of `loops` at each of `points`, using the legacy azimuth convention.
///
/// An empty set of loops gives a zero field everywhere.
pub fn total_field(
    points: &[Vector3<f64>],
    loops: &[CurrentLoop],
) -> Result<Vec<Vector3<f64>>, FieldError> {
    total_field_with(points, loops, AzimuthConvention::default())
}

/// As [total_field], with an explicit [AzimuthConvention].
///
/// All loops and points are validated before any field is computed. Loop contributions are
/// accumulated in the order of `loops`, so results are reproducible regardless of the number
/// of threads.
pub fn total_field_with(
    points: &[Vector3<f64>],
    loops: &[CurrentLoop],
    convention: AzimuthConvention,
) -> Result<Vec<Vector3<f64>>, FieldError> {
    let evaluators = loops
        .iter()
        .map(|current_loop| LoopEvaluator::new(current_loop, convention))
        .collect::<Result<Vec<_>, _>>()?;
    validate_points(points)?;
    debug!(
        "superposing {} loops at {} points",
        evaluators.len(),
        points.len()
    );

    let mut field = vec![Vector3::zeros(); points.len()];
    for evaluator in evaluators.iter() {
        field
            .par_iter_mut()
            .zip(points.par_iter())
            .for_each(|(field, point)| *field += evaluator.field_at(point));
    }
    Ok(field)
}
