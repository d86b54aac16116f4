use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relay_optimizer::{problem::distance_matrix::MatrixError, solver::solver::SolveError};
use relay_routing::router::RouterError;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// The routing engine failed or returned something unusable.
    BadGateway(String),
    InternalServerError(String),
}

impl From<SolveError> for ApiError {
    fn from(error: SolveError) -> Self {
        match error {
            SolveError::InvalidVehicleCount(_)
            | SolveError::TooManyVehicles { .. }
            | SolveError::EmptyInput
            | SolveError::InvalidParams(_)
            | SolveError::Matrix(MatrixError::EmptyInput) => ApiError::BadRequest(error.to_string()),
            SolveError::Matrix(MatrixError::Router { .. }) => ApiError::BadGateway(error.to_string()),
            SolveError::Matrix(MatrixError::InvalidDistance { .. }) => {
                ApiError::BadGateway(error.to_string())
            }
            SolveError::Matrix(_) | SolveError::Join(_) => {
                ApiError::InternalServerError(error.to_string())
            }
        }
    }
}

impl From<RouterError> for ApiError {
    fn from(error: RouterError) -> Self {
        match error {
            RouterError::UnknownStop(_) => ApiError::InternalServerError(error.to_string()),
            _ => ApiError::BadGateway(error.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::InternalServerError(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(message) => {
                error!("{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::BadGateway(message) => {
                error!("{message}");
                (StatusCode::BAD_GATEWAY, message).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use relay_optimizer::solver::annealing_params::ParamsError;

    use super::*;

    #[test]
    fn test_status_codes() {
        let status = |error: ApiError| error.into_response().status();

        assert_eq!(
            status(SolveError::InvalidVehicleCount(0).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(
                SolveError::TooManyVehicles {
                    requested: 20_000,
                    max: 1_000
                }
                .into()
            ),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(SolveError::InvalidParams(ParamsError::Iterations).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(
                SolveError::Matrix(MatrixError::Router {
                    from: 0,
                    to: 1,
                    source: RouterError::NoPath {
                        from: (0.0, 0.0),
                        to: (1.0, 1.0)
                    },
                })
                .into()
            ),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status(RouterError::UnknownStop(4).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
