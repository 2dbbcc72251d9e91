//! Json field maps, readable back as a [PrecalculatedMagneticFieldGrid].

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::Error;
use crate::magnetic::grid::PrecalculatedMagneticFieldGrid;

pub fn write_grid<P: AsRef<Path>>(
    grid: &PrecalculatedMagneticFieldGrid,
    path: P,
) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, grid)?;
    writer.flush()?;
    Ok(())
}

pub fn read_grid<P: AsRef<Path>>(path: P) -> Result<PrecalculatedMagneticFieldGrid, Error> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
