//! Define magnetic fields using grids.
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::coil::AzimuthConvention;
use super::superposition::total_field_with;
use super::{CurrentLoop, MagneticFieldSampler};
use crate::error::Error;
use crate::maths::snap;

/// A regular grid of observation points.
///
/// Along each axis the grid has `extent_cells` nodes spread evenly from `position - extent_spatial / 2`
/// to `position + extent_spatial / 2`, both ends included. An axis with a single node holds it at `position`.
///
/// # Fields
///
/// `extent_spatial`: Size of the grid, in units of d.
///
/// `position`: Position of the grid center, in units of d.
///
/// `extent_cells`: Number of nodes along the (x,y,z) axes.
///
/// `precision`: if set, node coordinates are rounded to a multiple of this length, so that nodes
/// meant to lie on a symmetry plane have exactly zero coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleGrid {
    pub extent_spatial: Vector3<f64>,
    pub position: Vector3<f64>,
    pub extent_cells: Vector3<usize>,
    #[serde(default)]
    pub precision: Option<f64>,
}

impl SampleGrid {
    /// A cube of `cells^3` nodes centred on `position` with side `side`.
    pub fn cube(position: Vector3<f64>, side: f64, cells: usize) -> Self {
        SampleGrid {
            extent_spatial: Vector3::repeat(side),
            position,
            extent_cells: Vector3::repeat(cells),
            precision: None,
        }
    }

    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.extent_cells.iter().any(|&n| n == 0) {
            return Err(Error::Configuration(
                "a grid needs at least one node along each axis".into(),
            ));
        }
        let nodes = self
            .extent_cells
            .iter()
            .try_fold(1usize, |count, &n| count.checked_mul(n))
            .filter(|&count| count <= isize::MAX as usize / std::mem::size_of::<Vector3<f64>>());
        if nodes.is_none() {
            return Err(Error::Configuration(format!(
                "grid of {} x {} x {} nodes is too large",
                self.extent_cells[0], self.extent_cells[1], self.extent_cells[2]
            )));
        }
        if !self.position.iter().all(|c| c.is_finite()) {
            return Err(Error::Configuration(
                "grid position must be finite".into(),
            ));
        }
        for axis in 0..3 {
            let extent = self.extent_spatial[axis];
            let single_node = self.extent_cells[axis] == 1 && extent == 0.0;
            let valid = extent.is_finite() && (extent > 0.0 || single_node);
            if !valid {
                return Err(Error::Configuration(format!(
                    "invalid grid extent {} along axis {}",
                    extent, axis
                )));
            }
        }
        if let Some(precision) = self.precision {
            if !(precision > 0.0 && precision.is_finite()) {
                return Err(Error::Configuration(format!(
                    "grid precision must be positive, got {}",
                    precision
                )));
            }
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.extent_cells.iter().product()
    }

    fn coordinate(&self, axis: usize, index: usize) -> f64 {
        let cells = self.extent_cells[axis];
        let value = if cells == 1 {
            self.position[axis]
        } else {
            let start = self.position[axis] - self.extent_spatial[axis] / 2.0;
            let step = self.extent_spatial[axis] / (cells - 1) as f64;
            start + index as f64 * step
        };
        match self.precision {
            Some(precision) => snap(value, precision),
            None => value,
        }
    }

    /// Positions of the grid nodes, ordered in priority z,y,x: items with dz=1 are adjacent.
    pub fn points(&self) -> Vec<Vector3<f64>> {
        let mut points = Vec::with_capacity(self.node_count());
        for i in 0..self.extent_cells[0] {
            let x = self.coordinate(0, i);
            for j in 0..self.extent_cells[1] {
                let y = self.coordinate(1, j);
                for k in 0..self.extent_cells[2] {
                    points.push(Vector3::new(x, y, self.coordinate(2, k)));
                }
            }
        }
        points
    }
}

/// A magnetic field sampled on the nodes of a [SampleGrid].
///
/// The grid is ordered as a linear array, with elements ordered in priority z,y,x;
/// items with dz=1 are adjacent in memory.
///
/// `grid`: `Vec<Vector3<f64>>` containing the field at each grid node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PrecalculatedMagneticFieldGrid {
    pub extent_spatial: Vector3<f64>,
    pub position: Vector3<f64>,
    pub extent_cells: Vector3<usize>,
    #[serde(default)]
    pub precision: Option<f64>,
    pub grid: Vec<Vector3<f64>>,
}

impl PrecalculatedMagneticFieldGrid {
    /// Evaluates the total field of `loops` on every node of `sample_grid`.
    pub fn sample(
        sample_grid: &SampleGrid,
        loops: &[CurrentLoop],
        convention: AzimuthConvention,
    ) -> Result<Self, Error> {
        sample_grid.validate()?;
        debug!(
            "sampling {} loops on a {}x{}x{} grid",
            loops.len(),
            sample_grid.extent_cells[0],
            sample_grid.extent_cells[1],
            sample_grid.extent_cells[2]
        );
        let grid = total_field_with(&sample_grid.points(), loops, convention)?;
        Ok(PrecalculatedMagneticFieldGrid {
            extent_spatial: sample_grid.extent_spatial,
            position: sample_grid.position,
            extent_cells: sample_grid.extent_cells,
            precision: sample_grid.precision,
            grid,
        })
    }

    pub fn sample_grid(&self) -> SampleGrid {
        SampleGrid {
            extent_spatial: self.extent_spatial,
            position: self.position,
            extent_cells: self.extent_cells,
            precision: self.precision,
        }
    }

    /// Positions of the nodes, in the same order as `grid`.
    pub fn positions(&self) -> Vec<Vector3<f64>> {
        self.sample_grid().points()
    }

    /// Index of the node nearest to `pos`. Positions outside the grid map to the closest boundary node.
    pub fn position_to_grid_index(&self, pos: &Vector3<f64>) -> usize {
        let mut cell_id = [0usize; 3];
        for axis in 0..3 {
            let cells = self.extent_cells[axis];
            let extent = self.extent_spatial[axis];
            if cells <= 1 || extent <= 0.0 {
                continue;
            }
            let start = self.position[axis] - extent / 2.0;
            let fraction = (pos[axis] - start) / extent;
            let nearest = (fraction * (cells - 1) as f64).round();
            cell_id[axis] = nearest.max(0.0).min((cells - 1) as f64) as usize;
        }
        self.extent_cells[2] * (self.extent_cells[1] * cell_id[0] + cell_id[1]) + cell_id[2]
    }

    /// Field at the node nearest to `pos`, or `None` if the grid holds no data.
    pub fn get_field(&self, pos: &Vector3<f64>) -> Option<Vector3<f64>> {
        self.grid.get(self.position_to_grid_index(pos)).copied()
    }

    pub fn samplers(&self) -> Vec<MagneticFieldSampler> {
        self.grid
            .iter()
            .map(|field| MagneticFieldSampler::from_field(*field))
            .collect()
    }

    pub fn max_magnitude(&self) -> f64 {
        self.samplers()
            .iter()
            .map(|sampler| sampler.magnitude)
            .fold(0.0, f64::max)
    }
}
