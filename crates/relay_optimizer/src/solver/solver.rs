use jiff::{SignedDuration, Timestamp};
use rand::{SeedableRng, rngs::SmallRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, info, instrument};

use crate::problem::distance_matrix::{DistanceMatrix, MatrixError};

use super::{
    annealing::AnnealingOptimizer,
    annealing_params::ParamsError,
    construction::greedy::construct_greedy,
    observer::SolverObserver,
    score::SolutionScore,
    solution::Solution,
    solver_params::{Algorithm, SolverParams},
};

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("Vehicle count must be a positive integer, got {0}")]
    InvalidVehicleCount(i64),

    #[error("At most {max} vehicles are allowed, got {requested}")]
    TooManyVehicles { requested: i64, max: usize },

    #[error("At least one point (the depot) is required")]
    EmptyInput,

    #[error(transparent)]
    InvalidParams(#[from] ParamsError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("Solver task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Hard ceiling on the fleet size. Every vehicle owns a route, so the fleet
/// size bounds the memory a single solve allocates.
pub const MAX_VEHICLES: usize = 10_000;

/// Default fleet limit for callers that do not configure one.
pub const DEFAULT_MAX_VEHICLES: usize = 1_000;

/// Rejects zero and negative vehicle counts, and counts above `max_vehicles`
/// (itself capped at [`MAX_VEHICLES`]).
pub fn validate_vehicle_count(vehicle_count: i64, max_vehicles: usize) -> Result<usize, SolveError> {
    if vehicle_count <= 0 {
        return Err(SolveError::InvalidVehicleCount(vehicle_count));
    }

    let max = max_vehicles.min(MAX_VEHICLES);
    match usize::try_from(vehicle_count) {
        Ok(count) if count <= max => Ok(count),
        _ => Err(SolveError::TooManyVehicles {
            requested: vehicle_count,
            max,
        }),
    }
}

pub fn create_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SolveResult {
    pub solution: Solution,
    pub score: SolutionScore,
    pub algorithm: Algorithm,
    pub elapsed: SignedDuration,
}

/// Runs the selected algorithm on a ready matrix.
///
/// This never fails once the vehicle count and the parameters are valid.
#[instrument(skip_all, fields(algorithm = %params.algorithm), level = Level::DEBUG)]
pub fn solve<O>(
    matrix: &DistanceMatrix,
    vehicle_count: usize,
    params: &SolverParams,
    observer: &O,
) -> Result<SolveResult, SolveError>
where
    O: SolverObserver + ?Sized,
{
    if vehicle_count == 0 {
        return Err(SolveError::InvalidVehicleCount(0));
    }
    if vehicle_count > MAX_VEHICLES {
        return Err(SolveError::TooManyVehicles {
            requested: i64::try_from(vehicle_count).unwrap_or(i64::MAX),
            max: MAX_VEHICLES,
        });
    }
    params.algorithm.validate()?;

    let start = Timestamp::now();

    let solution = match params.algorithm.annealing_params() {
        None => construct_greedy(matrix, vehicle_count),
        Some(annealing_params) => {
            let mut rng = create_rng(params.seed);
            AnnealingOptimizer::new(annealing_params)
                .run(matrix, vehicle_count, &mut rng, observer)
                .best
                .solution
        }
    };

    debug_assert_eq!(
        solution.validate(matrix.num_locations(), vehicle_count),
        Ok(())
    );

    let elapsed = Timestamp::now().duration_since(start);
    let score = SolutionScore::evaluate(matrix, &solution);

    info!(
        "Solved {} stops with {} vehicles using {} in {:#}",
        matrix.num_locations().saturating_sub(1),
        vehicle_count,
        params.algorithm,
        elapsed
    );
    observer.on_finished(&score);

    Ok(SolveResult {
        solution,
        score,
        algorithm: params.algorithm,
        elapsed,
    })
}
