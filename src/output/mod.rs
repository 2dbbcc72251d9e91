//! Writes sampled field maps to file.

pub mod binary_output;
pub mod csv_output;
pub mod json_output;

use tracing::info;

use crate::configuration::OutputConfiguration;
use crate::error::Error;
use crate::magnetic::grid::PrecalculatedMagneticFieldGrid;

/// Writes `grid` to every file named in `output`.
pub fn write_outputs(
    grid: &PrecalculatedMagneticFieldGrid,
    output: &OutputConfiguration,
) -> Result<(), Error> {
    if let Some(path) = &output.json {
        json_output::write_grid(grid, path)?;
        info!("wrote json field map to {}", path.display());
    }
    if let Some(path) = &output.csv {
        csv_output::write_grid(grid, path)?;
        info!("wrote csv field map to {}", path.display());
    }
    if let Some(path) = &output.binary {
        binary_output::write_grid(grid, path)?;
        info!("wrote binary field map to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::magnetic::grid::SampleGrid;
    use crate::magnetic::{AzimuthConvention, CurrentLoop};
    use nalgebra::Vector3;

    #[test]
    fn test_write_all_outputs() {
        let directory = tempfile::tempdir().expect("temporary directory");
        let output = OutputConfiguration {
            json: Some(directory.path().join("field.json")),
            csv: Some(directory.path().join("field.csv")),
            binary: Some(directory.path().join("field.bin")),
        };
        let grid = PrecalculatedMagneticFieldGrid::sample(
            &SampleGrid::cube(Vector3::zeros(), 1.0, 3),
            &[CurrentLoop::new(0.5, Vector3::zeros(), Vector3::z())],
            AzimuthConvention::Legacy,
        )
        .expect("valid setup");
        write_outputs(&grid, &output).expect("outputs written");
        for path in [output.json, output.csv, output.binary].iter().flatten() {
            let metadata = std::fs::metadata(path).expect("file exists");
            assert!(metadata.len() > 0);
        }
    }

    #[test]
    fn test_no_outputs_is_fine() {
        let grid = PrecalculatedMagneticFieldGrid::sample(
            &SampleGrid::cube(Vector3::zeros(), 1.0, 2),
            &[],
            AzimuthConvention::Legacy,
        )
        .expect("valid setup");
        write_outputs(&grid, &OutputConfiguration::default()).expect("nothing to write");
    }
}
