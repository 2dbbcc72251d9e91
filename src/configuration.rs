//! Loads the description of a set of loops, the grid to sample them on, and where to write the results.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Error;
use crate::magnetic::grid::SampleGrid;
use crate::magnetic::{AzimuthConvention, CurrentLoop};

/// Files to write the sampled field to. Any of them may be omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfiguration {
    /// The whole sampled grid, as json.
    #[serde(default)]
    pub json: Option<PathBuf>,
    /// One row per grid node: position, field and magnitude.
    #[serde(default)]
    pub csv: Option<PathBuf>,
    /// Little-endian binary dump of the same data as the csv file.
    #[serde(default)]
    pub binary: Option<PathBuf>,
}

/// Everything needed to compute and store a field map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldConfiguration {
    pub loops: Vec<CurrentLoop>,
    pub grid: SampleGrid,
    #[serde(default)]
    pub azimuth: AzimuthConvention,
    #[serde(default)]
    pub output: OutputConfiguration,
}

impl FieldConfiguration {
    /// Two coaxial loops of radius 0.1 at `z = ±0.1`, sampled on a 31^3 grid spanning ±0.15.
    pub fn helmholtz() -> Self {
        let normal = Vector3::z();
        FieldConfiguration {
            loops: vec![
                CurrentLoop::new(0.1, Vector3::new(0.0, 0.0, 0.1), normal),
                CurrentLoop::new(0.1, Vector3::new(0.0, 0.0, -0.1), normal),
            ],
            grid: SampleGrid::cube(Vector3::zeros(), 0.3, 31).with_precision(1e-4),
            azimuth: AzimuthConvention::Legacy,
            output: OutputConfiguration::default(),
        }
    }

    /// Checks the grid. Loops are checked when the field is evaluated.
    pub fn validate(&self) -> Result<(), Error> {
        self.grid.validate()
    }
}

/// Reads a [FieldConfiguration] from a `.json` file, or from yaml for any other extension.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<FieldConfiguration, Error> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let is_json = path
        .extension()
        .map_or(false, |extension| extension.eq_ignore_ascii_case("json"));
    let configuration: FieldConfiguration = if is_json {
        serde_json::from_reader(reader)?
    } else {
        serde_yaml::from_reader(reader)?
    };
    configuration.validate()?;
    info!(
        "loaded {} loops from {}",
        configuration.loops.len(),
        path.display()
    );
    Ok(configuration)
}
