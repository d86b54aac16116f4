use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use relay_optimizer::solver::solver_params::{Algorithm, SolverParams};

use crate::{error::ApiError, state::AppState};

use super::{
    api_solution::ApiSolution,
    solve::{VrpRequest, parse_point, solve_vrp},
};

/// `GET /vrp?point=lat,lon&point=lat,lon&vehicles=2`
///
/// `point` repeats, in `lat,lon` order, the first one being the depot.
/// `cars` is accepted as an alias of `vehicles`.
pub async fn get_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ApiSolution>, ApiError> {
    let request = parse_query(&params)?;

    Ok(Json(solve_vrp(&state, request).await?))
}

fn parse_query(params: &[(String, String)]) -> Result<VrpRequest, ApiError> {
    let mut points = Vec::new();
    let mut vehicles = None;
    let mut solver = SolverParams::default();
    let mut geometry = true;

    for (key, value) in params {
        match key.as_str() {
            "point" => points.push(parse_lat_lon(value)?),
            "vehicles" | "cars" => {
                vehicles = Some(value.trim().parse::<i64>().map_err(|_| {
                    ApiError::BadRequest(format!("Invalid vehicle count '{value}'"))
                })?)
            }
            "algorithm" => {
                solver.algorithm = value
                    .parse::<Algorithm>()
                    .map_err(|error| ApiError::BadRequest(error.to_string()))?
            }
            "seed" => {
                solver.seed = Some(value.trim().parse().map_err(|_| {
                    ApiError::BadRequest(format!("Invalid seed '{value}'"))
                })?)
            }
            "geometry" => {
                geometry = value.trim().parse().map_err(|_| {
                    ApiError::BadRequest(format!("Invalid geometry flag '{value}'"))
                })?
            }
            _ => {}
        }
    }

    let vehicles = vehicles
        .ok_or_else(|| ApiError::BadRequest("Missing 'vehicles' parameter".to_owned()))?;

    Ok(VrpRequest {
        points,
        vehicles,
        solver,
        geometry,
    })
}

fn parse_lat_lon(value: &str) -> Result<geo_types::Point<f64>, ApiError> {
    let invalid = || ApiError::BadRequest(format!("Invalid point '{value}', expected lat,lon"));

    let (lat, lon) = value.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

    parse_point(lon, lat)
}

#[cfg(test)]
mod tests {
    use geo_types::Point;
    use relay_optimizer::solver::annealing_params::Intensity;

    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_query() {
        let request = parse_query(&params(&[
            ("point", "52.2297,21.0122"),
            ("point", "52.24, 21.03"),
            ("cars", "2"),
            ("algorithm", "annealing:fast"),
            ("seed", "5"),
            ("geometry", "false"),
        ]))
        .unwrap();

        assert_eq!(
            request,
            VrpRequest {
                points: vec![Point::new(21.0122, 52.2297), Point::new(21.03, 52.24)],
                vehicles: 2,
                solver: SolverParams {
                    algorithm: Algorithm::SimulatedAnnealing(Intensity::Fast),
                    seed: Some(5),
                },
                geometry: false,
            }
        );
    }

    #[test]
    fn test_defaults() {
        let request = parse_query(&params(&[("point", "1,2"), ("vehicles", "-1")])).unwrap();

        assert_eq!(request.vehicles, -1);
        assert_eq!(request.solver, SolverParams::default());
        assert!(request.geometry);
    }

    #[test]
    fn test_rejects_malformed_values() {
        let cases = [
            params(&[("point", "52.2"), ("vehicles", "1")]),
            params(&[("point", "95,10"), ("vehicles", "1")]),
            params(&[("point", "a,b"), ("vehicles", "1")]),
            params(&[("point", "1,2"), ("vehicles", "two")]),
            params(&[("point", "1,2")]),
            params(&[("point", "1,2"), ("vehicles", "1"), ("algorithm", "tabu")]),
        ];

        for case in cases {
            assert!(matches!(parse_query(&case), Err(ApiError::BadRequest(_))));
        }
    }
}
