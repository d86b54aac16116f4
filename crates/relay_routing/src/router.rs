use std::future::Future;

use geo_types::{LineString, Point};
use thiserror::Error;

/// A path between two points as reported by a routing engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath {
    /// Travel distance in meters.
    pub distance: f64,
    pub geometry: LineString<f64>,
}

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("No path found between {from:?} and {to:?}")]
    NoPath { from: (f64, f64), to: (f64, f64) },

    #[error("Stop {0} is not part of the point list")]
    UnknownStop(usize),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Shortest path lookup between two geographic points.
///
/// Points use `x = longitude` and `y = latitude`. Costs are not assumed to be
/// symmetric: `route(a, b)` and `route(b, a)` are two independent queries.
pub trait Router: Send + Sync {
    fn route(
        &self,
        from: Point<f64>,
        to: Point<f64>,
    ) -> impl Future<Output = Result<RoutePath, RouterError>> + Send;
}
