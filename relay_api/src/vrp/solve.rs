use std::sync::Arc;

use geo_types::Point;
use relay_optimizer::{
    planner::{PlanOptions, plan},
    solver::{observer::TracingObserver, solver_params::SolverParams},
};
use relay_routing::geometry::stitch_route_geometry;
use tracing::{Level, info, instrument};

use crate::{error::ApiError, state::AppState};

use super::api_solution::ApiSolution;

/// A parsed request, common to the GET and POST endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct VrpRequest {
    /// Longitude/latitude. The first point is the depot.
    pub points: Vec<Point<f64>>,
    pub vehicles: i64,
    pub solver: SolverParams,
    pub geometry: bool,
}

/// Validates a coordinate pair and turns it into a point.
pub fn parse_point(lon: f64, lat: f64) -> Result<Point<f64>, ApiError> {
    let valid = lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon);

    if !valid {
        return Err(ApiError::BadRequest(format!(
            "Invalid coordinate lat={lat}, lon={lon}"
        )));
    }

    Ok(Point::new(lon, lat))
}

#[instrument(skip_all, level = Level::DEBUG)]
pub async fn solve_vrp(state: &AppState, request: VrpRequest) -> Result<ApiSolution, ApiError> {
    let options = PlanOptions {
        solver: request.solver,
        matrix_concurrency: state.matrix_concurrency,
        max_vehicles: state.max_vehicles,
    };

    let plan = plan(
        &state.router,
        &request.points,
        request.vehicles,
        &options,
        Arc::new(TracingObserver),
    )
    .await?;

    let paths = if request.geometry {
        info!("Fetching route geometry");
        let mut paths = Vec::with_capacity(plan.result.solution.vehicle_count());

        for route in plan.result.solution.routes() {
            if route.is_empty() {
                paths.push(None);
                continue;
            }

            let line = stitch_route_geometry(&state.router, &request.points, route.stops()).await?;
            paths.push(Some(line));
        }

        Some(paths)
    } else {
        None
    };

    Ok(ApiSolution::from_result(&plan.result, paths))
}
