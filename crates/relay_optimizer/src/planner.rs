use std::sync::Arc;

use geo_types::Point;
use relay_routing::router::Router;
use tracing::{Level, info, instrument};

use crate::{
    problem::{
        distance_matrix::DistanceMatrix,
        matrix_builder::{DEFAULT_MATRIX_CONCURRENCY, build_distance_matrix},
    },
    solver::{
        observer::SolverObserver,
        solver::{DEFAULT_MAX_VEHICLES, SolveError, SolveResult, solve, validate_vehicle_count},
        solver_params::SolverParams,
    },
};

#[derive(Debug, Clone, Copy)]
pub struct PlanOptions {
    pub solver: SolverParams,
    /// Maximum number of router requests in flight while building the matrix.
    pub matrix_concurrency: usize,
    /// Largest accepted fleet.
    pub max_vehicles: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        PlanOptions {
            solver: SolverParams::default(),
            matrix_concurrency: DEFAULT_MATRIX_CONCURRENCY,
            max_vehicles: DEFAULT_MAX_VEHICLES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Plan {
    pub matrix: DistanceMatrix,
    pub result: SolveResult,
}

/// Full request pipeline: validate, build the matrix through `router`, solve.
///
/// The vehicle count, the points and the algorithm parameters are all checked
/// before the first router call. Solving runs on the blocking pool.
#[instrument(skip_all, fields(points = points.len(), vehicles = vehicle_count), level = Level::DEBUG)]
pub async fn plan<R, O>(
    router: &R,
    points: &[Point<f64>],
    vehicle_count: i64,
    options: &PlanOptions,
    observer: Arc<O>,
) -> Result<Plan, SolveError>
where
    R: Router,
    O: SolverObserver + ?Sized + 'static,
{
    let vehicle_count = validate_vehicle_count(vehicle_count, options.max_vehicles)?;
    if points.is_empty() {
        return Err(SolveError::EmptyInput);
    }
    options.solver.algorithm.validate()?;

    let matrix = build_distance_matrix(
        router,
        points,
        options.matrix_concurrency,
        observer.as_ref(),
    )
    .await?;

    info!("Distance matrix ready for {} points", points.len());

    solve_blocking(matrix, vehicle_count, options.solver, observer).await
}

/// Runs [`solve`] on the blocking pool so long annealing runs do not stall the
/// async runtime.
pub async fn solve_blocking<O>(
    matrix: DistanceMatrix,
    vehicle_count: usize,
    params: SolverParams,
    observer: Arc<O>,
) -> Result<Plan, SolveError>
where
    O: SolverObserver + ?Sized + 'static,
{
    tokio::task::spawn_blocking(move || {
        let result = solve(&matrix, vehicle_count, &params, observer.as_ref())?;
        Ok::<_, SolveError>(Plan { matrix, result })
    })
    .await?
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use relay_routing::{
        as_the_crow_flies::AsTheCrowFliesRouter,
        router::{RoutePath, RouterError},
    };

    use super::*;
    use crate::{
        solver::{
            annealing_params::Intensity, observer::NoopObserver, solver_params::Algorithm,
        },
        test_utils::RecordingObserver,
    };

    struct CountingRouter {
        calls: Mutex<usize>,
    }

    impl Router for CountingRouter {
        async fn route(&self, from: Point<f64>, to: Point<f64>) -> Result<RoutePath, RouterError> {
            *self.calls.lock() += 1;
            AsTheCrowFliesRouter.route(from, to).await
        }
    }

    fn points() -> Vec<Point<f64>> {
        vec![
            Point::new(21.0122, 52.2297),
            Point::new(21.0300, 52.2400),
            Point::new(20.9800, 52.2100),
            Point::new(21.0500, 52.2000),
        ]
    }

    #[tokio::test]
    async fn test_plan_greedy() {
        let observer = Arc::new(RecordingObserver::default());

        let plan = plan(
            &AsTheCrowFliesRouter,
            &points(),
            2,
            &PlanOptions::default(),
            observer.clone(),
        )
        .await
        .unwrap();

        assert_eq!(plan.matrix.num_locations(), 4);
        assert_eq!(plan.result.solution.validate(4, 2), Ok(()));
        assert_eq!(observer.matrix_progress.lock().last(), Some(&(12, 12)));
        assert_eq!(observer.finished.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_plan_annealing() {
        let options = PlanOptions {
            solver: SolverParams {
                algorithm: Algorithm::SimulatedAnnealing(Intensity::VeryFast),
                seed: Some(1),
            },
            ..PlanOptions::default()
        };

        let plan = plan(&AsTheCrowFliesRouter, &points(), 2, &options, Arc::new(NoopObserver))
            .await
            .unwrap();

        assert_eq!(plan.result.solution.validate(4, 2), Ok(()));
        assert!(plan.result.score.fitness >= 0.0);
    }

    #[tokio::test]
    async fn test_invalid_vehicle_count_skips_router() {
        let router = CountingRouter {
            calls: Mutex::new(0),
        };

        for vehicles in [0, -1] {
            let error = plan(&router, &points(), vehicles, &PlanOptions::default(), Arc::new(NoopObserver))
                .await
                .unwrap_err();

            assert!(matches!(error, SolveError::InvalidVehicleCount(v) if v == vehicles));
        }

        assert_eq!(*router.calls.lock(), 0);
    }

    #[tokio::test]
    async fn test_oversized_fleet_skips_router() {
        let router = CountingRouter {
            calls: Mutex::new(0),
        };
        let options = PlanOptions {
            max_vehicles: 3,
            ..PlanOptions::default()
        };

        let error = plan(&router, &points(), 4, &options, Arc::new(NoopObserver))
            .await
            .unwrap_err();

        assert!(matches!(error, SolveError::TooManyVehicles { requested: 4, max: 3 }));
        assert_eq!(*router.calls.lock(), 0);
    }

    #[tokio::test]
    async fn test_empty_points() {
        let error = plan(&AsTheCrowFliesRouter, &[], 2, &PlanOptions::default(), Arc::new(NoopObserver))
            .await
            .unwrap_err();

        assert!(matches!(error, SolveError::EmptyInput));
    }

    #[tokio::test]
    async fn test_depot_only_yields_empty_routes() {
        let plan = plan(
            &AsTheCrowFliesRouter,
            &points()[..1],
            3,
            &PlanOptions::default(),
            Arc::new(NoopObserver),
        )
        .await
        .unwrap();

        assert_eq!(plan.result.score.utilized_vehicles, 0);
        assert!(plan.result.solution.routes().iter().all(|route| route.len() == 1));
    }
}
