//! Csv field maps: one row per grid node.

use serde::Serialize;
use std::path::Path;

use crate::error::Error;
use crate::magnetic::grid::PrecalculatedMagneticFieldGrid;
use crate::magnetic::MagneticFieldSampler;

#[derive(Serialize)]
struct FieldRecord {
    x: f64,
    y: f64,
    z: f64,
    bx: f64,
    by: f64,
    bz: f64,
    magnitude: f64,
}

pub fn write_grid<P: AsRef<Path>>(
    grid: &PrecalculatedMagneticFieldGrid,
    path: P,
) -> Result<(), Error> {
    let mut writer = csv::Writer::from_path(path)?;
    for (position, sampler) in grid.positions().iter().zip(grid.samplers()) {
        writer.serialize(record(position, &sampler))?;
    }
    writer.flush()?;
    Ok(())
}

fn record(position: &nalgebra::Vector3<f64>, sampler: &MagneticFieldSampler) -> FieldRecord {
    FieldRecord {
        x: position.x,
        y: position.y,
        z: position.z,
        bx: sampler.field.x,
        by: sampler.field.y,
        bz: sampler.field.z,
        magnitude: sampler.magnitude,
    }
}
