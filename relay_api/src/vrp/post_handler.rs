use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use relay_optimizer::solver::solver_params::{Algorithm, SolverParams};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{error::ApiError, state::AppState};

use super::{
    api_solution::ApiSolution,
    solve::{VrpRequest, parse_point, solve_vrp},
};

#[derive(Deserialize, JsonSchema)]
pub struct PostVrpBody {
    /// `[longitude, latitude]` pairs. The first point is the depot.
    pub points: Vec<[f64; 2]>,
    pub vehicles: i64,
    /// `greedy` (default), `annealing` or `annealing:<intensity>`.
    pub algorithm: Option<String>,
    pub seed: Option<u64>,
    /// Fetch road geometry for every route. Defaults to true.
    pub geometry: Option<bool>,
}

impl TryFrom<PostVrpBody> for VrpRequest {
    type Error = ApiError;

    fn try_from(body: PostVrpBody) -> Result<Self, Self::Error> {
        let points = body
            .points
            .iter()
            .map(|&[lon, lat]| parse_point(lon, lat))
            .collect::<Result<Vec<_>, _>>()?;

        let algorithm = match &body.algorithm {
            Some(algorithm) => algorithm
                .parse::<Algorithm>()
                .map_err(|error| ApiError::BadRequest(error.to_string()))?,
            None => Algorithm::default(),
        };

        Ok(VrpRequest {
            points,
            vehicles: body.vehicles,
            solver: SolverParams {
                algorithm,
                seed: body.seed,
            },
            geometry: body.geometry.unwrap_or(true),
        })
    }
}

pub async fn post_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PostVrpBody>, JsonRejection>,
) -> Result<Json<ApiSolution>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let request = VrpRequest::try_from(body)?;

    Ok(Json(solve_vrp(&state, request).await?))
}
