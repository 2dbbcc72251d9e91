extern crate loopfield as lib;

use lib::configuration::{load_file, FieldConfiguration};
use lib::magnetic::grid::PrecalculatedMagneticFieldGrid;
use lib::output::write_outputs;
use nalgebra::Vector3;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), lib::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let configuration = match std::env::args().nth(1) {
        Some(path) => load_file(path)?,
        None => {
            info!("no configuration given, using the helmholtz pair");
            FieldConfiguration::helmholtz()
        }
    };

    let grid = PrecalculatedMagneticFieldGrid::sample(
        &configuration.grid,
        &configuration.loops,
        configuration.azimuth,
    )?;
    let centre = grid.get_field(&configuration.grid.position).unwrap_or_else(Vector3::zeros);
    info!(
        "sampled {} nodes, max |B| = {:.6}, B at grid centre = ({:.6}, {:.6}, {:.6})",
        grid.grid.len(),
        grid.max_magnitude(),
        centre.x,
        centre.y,
        centre.z
    );

    write_outputs(&grid, &configuration.output)?;
    Ok(())
}
