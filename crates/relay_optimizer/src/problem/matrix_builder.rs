use std::pin::pin;

use futures::{StreamExt, stream};
use geo_types::Point;
use relay_routing::router::Router;
use tracing::{Level, debug, instrument};

use crate::solver::observer::SolverObserver;

use super::distance_matrix::{DistanceMatrix, MatrixError};

pub const DEFAULT_MATRIX_CONCURRENCY: usize = 8;

/// Builds the distance matrix by asking `router` for every ordered pair of
/// distinct points.
///
/// Up to `concurrency` requests are in flight at once. Each ordered pair is
/// queried exactly once, so asymmetric road networks are preserved. The first
/// failing pair aborts the whole build.
#[instrument(skip_all, fields(points = points.len()), level = Level::DEBUG)]
pub async fn build_distance_matrix<R, O>(
    router: &R,
    points: &[Point<f64>],
    concurrency: usize,
    observer: &O,
) -> Result<DistanceMatrix, MatrixError>
where
    R: Router,
    O: SolverObserver + ?Sized,
{
    if points.is_empty() {
        return Err(MatrixError::EmptyInput);
    }

    let num_locations = points.len();
    let total = num_locations * num_locations - num_locations;
    let mut distances = vec![0.0; num_locations * num_locations];

    observer.on_matrix_progress(0, total);

    let pairs = (0..num_locations)
        .flat_map(|from| (0..num_locations).map(move |to| (from, to)))
        .filter(|(from, to)| from != to);

    let requests = stream::iter(pairs)
        .map(|(from, to)| async move {
            router
                .route(points[from], points[to])
                .await
                .map(|path| (from, to, path.distance))
                .map_err(|source| MatrixError::Router { from, to, source })
        })
        .buffer_unordered(concurrency.max(1));
    let mut results = pin!(requests);

    let mut completed = 0;
    while let Some(result) = results.next().await {
        let (from, to, distance) = result?;
        distances[from * num_locations + to] = distance;

        completed += 1;
        observer.on_matrix_progress(completed, total);
    }

    debug!("Built {num_locations}x{num_locations} matrix with {total} router calls");

    DistanceMatrix::from_flat(distances, num_locations)
}
