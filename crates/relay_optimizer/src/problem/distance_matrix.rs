use relay_routing::router::RouterError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Distance = f64;

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("At least one point is required to build a distance matrix")]
    EmptyInput,

    #[error("Matrix is not square: row {row} has {found} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Flat matrix has {len} entries, expected {num_locations}x{num_locations}")]
    InvalidLength { len: usize, num_locations: usize },

    #[error("Invalid distance {value} from {from} to {to}")]
    InvalidDistance {
        from: usize,
        to: usize,
        value: Distance,
    },

    #[error("Router failed for {from} -> {to}: {source}")]
    Router {
        from: usize,
        to: usize,
        #[source]
        source: RouterError,
    },
}

#[derive(Deserialize)]
struct RawDistanceMatrix {
    distances: Vec<Distance>,
    num_locations: usize,
}

impl TryFrom<RawDistanceMatrix> for DistanceMatrix {
    type Error = MatrixError;

    fn try_from(raw: RawDistanceMatrix) -> Result<Self, Self::Error> {
        DistanceMatrix::from_flat(raw.distances, raw.num_locations)
    }
}

/// Pairwise travel costs between stops.
///
/// The matrix uses a flat structure: the cost from `from` to `to` lives at
/// `from * num_locations + to`. It is not required to be symmetric, the
/// diagonal is always zero and every other entry is finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDistanceMatrix")]
pub struct DistanceMatrix {
    distances: Vec<Distance>,
    num_locations: usize,
}

impl DistanceMatrix {
    pub fn new(rows: Vec<Vec<Distance>>) -> Result<Self, MatrixError> {
        let num_locations = rows.len();

        for (row, values) in rows.iter().enumerate() {
            if values.len() != num_locations {
                return Err(MatrixError::NotSquare {
                    row,
                    expected: num_locations,
                    found: values.len(),
                });
            }
        }

        Self::from_flat(rows.into_iter().flatten().collect(), num_locations)
    }

    pub fn from_flat(distances: Vec<Distance>, num_locations: usize) -> Result<Self, MatrixError> {
        if num_locations == 0 {
            return Err(MatrixError::EmptyInput);
        }

        if distances.len() != num_locations * num_locations {
            return Err(MatrixError::InvalidLength {
                len: distances.len(),
                num_locations,
            });
        }

        for (index, &value) in distances.iter().enumerate() {
            let from = index / num_locations;
            let to = index % num_locations;
            let is_valid = if from == to {
                value == 0.0
            } else {
                value.is_finite() && value >= 0.0
            };

            if !is_valid {
                return Err(MatrixError::InvalidDistance { from, to, value });
            }
        }

        Ok(Self {
            distances,
            num_locations,
        })
    }

    #[inline(always)]
    fn index(&self, from: usize, to: usize) -> usize {
        from * self.num_locations + to
    }

    #[inline(always)]
    pub fn distance(&self, from: usize, to: usize) -> Distance {
        self.distances[self.index(from, to)]
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.num_locations).all(|i| {
            (i + 1..self.num_locations).all(|j| self.distance(i, j) == self.distance(j, i))
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Distance]> {
        self.distances.chunks(self.num_locations)
    }
}
