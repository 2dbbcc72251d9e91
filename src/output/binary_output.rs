//! Writes binary field maps.
//!
//! The file starts with three little-endian `u64`, the number of nodes along x, y and z.
//! It is followed by the payload of every node, in grid order, as little-endian `f64`.

use byteorder::{LittleEndian, WriteBytesExt};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Error;
use crate::magnetic::grid::PrecalculatedMagneticFieldGrid;
use crate::magnetic::MagneticFieldSampler;

type Endianness = LittleEndian;

/// Trait used to output binary types.
pub trait Binary {
    fn data(&self) -> Vec<f64>;
}

impl Binary for MagneticFieldSampler {
    fn data(&self) -> Vec<f64> {
        vec![self.field.x, self.field.y, self.field.z, self.magnitude]
    }
}

/// Writes the position of each node followed by its [MagneticFieldSampler] payload: seven `f64` per node.
pub fn write_grid<P: AsRef<Path>>(
    grid: &PrecalculatedMagneticFieldGrid,
    path: P,
) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    for cells in grid.extent_cells.iter() {
        writer.write_u64::<Endianness>(*cells as u64)?;
    }
    for (position, sampler) in grid.positions().iter().zip(grid.samplers()) {
        for element in position.iter().copied().chain(sampler.data()) {
            writer.write_f64::<Endianness>(element)?;
        }
    }
    writer.flush()?;
    Ok(())
}
