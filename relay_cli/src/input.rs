use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, bail};
use geo_types::Point;
use relay_optimizer::problem::distance_matrix::DistanceMatrix;
use serde::Deserialize;

/// Problem file: `{ "points": [[lon, lat], ...], "vehicles": 2 }`.
#[derive(Debug, Deserialize)]
pub struct CliInput {
    #[serde(default)]
    pub points: Vec<[f64; 2]>,
    pub vehicles: Option<i64>,
}

impl CliInput {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
        let input = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid input file {}", path.display()))?;

        Ok(input)
    }

    pub fn points(&self) -> anyhow::Result<Vec<Point<f64>>> {
        self.points
            .iter()
            .enumerate()
            .map(|(index, &[lon, lat])| {
                if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
                    bail!("Point {index} is out of range: [{lon}, {lat}]");
                }
                Ok(Point::new(lon, lat))
            })
            .collect()
    }
}

pub fn read_matrix(path: &Path) -> anyhow::Result<DistanceMatrix> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let matrix = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid matrix file {}", path.display()))?;

    Ok(matrix)
}

pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)?;

    Ok(())
}
