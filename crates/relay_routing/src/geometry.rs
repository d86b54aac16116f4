use geo_types::{Coord, LineString, Point};
use tracing::{Level, instrument};

use crate::router::{Router, RouterError};

/// Fetches the path of every consecutive leg of `stops` and joins them into a
/// single line.
///
/// `stops` are indices into `points`. The last vertex of a leg and the first
/// vertex of the next one are the same location, so the joint is kept once.
#[instrument(skip_all, level = Level::DEBUG)]
pub async fn stitch_route_geometry<R>(
    router: &R,
    points: &[Point<f64>],
    stops: &[usize],
) -> Result<LineString<f64>, RouterError>
where
    R: Router,
{
    let mut coordinates: Vec<Coord<f64>> = Vec::new();

    for leg in stops.windows(2) {
        let from = *points.get(leg[0]).ok_or(RouterError::UnknownStop(leg[0]))?;
        let to = *points.get(leg[1]).ok_or(RouterError::UnknownStop(leg[1]))?;

        let path = router.route(from, to).await?;
        let mut leg_coordinates = path.geometry.into_inner().into_iter().peekable();

        let shares_joint = matches!(
            (coordinates.last(), leg_coordinates.peek()),
            (Some(last), Some(first)) if last == first
        );
        if shares_joint {
            leg_coordinates.next();
        }

        coordinates.extend(leg_coordinates);
    }

    Ok(LineString::new(coordinates))
}
