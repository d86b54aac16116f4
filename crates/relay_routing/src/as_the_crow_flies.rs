use geo::{Distance, Haversine};
use geo_types::{LineString, Point};

use crate::router::{RoutePath, Router, RouterError};

/// Straight-line router using the haversine distance.
///
/// Useful when no routing engine is reachable, and in tests where the
/// distances must be reproducible.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsTheCrowFliesRouter;

impl AsTheCrowFliesRouter {
    pub fn distance(&self, from: Point<f64>, to: Point<f64>) -> f64 {
        let haversine = Haversine;
        haversine.distance(from, to)
    }
}

impl Router for AsTheCrowFliesRouter {
    async fn route(&self, from: Point<f64>, to: Point<f64>) -> Result<RoutePath, RouterError> {
        Ok(RoutePath {
            distance: self.distance(from, to),
            geometry: LineString::from(vec![from.0, to.0]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_distance_for_same_point() {
        let point = Point::new(21.0, 52.23);
        let path = AsTheCrowFliesRouter.route(point, point).await.unwrap();

        assert_eq!(path.distance, 0.0);
        assert_eq!(path.geometry.0.len(), 2);
    }

    #[tokio::test]
    async fn test_warsaw_distance() {
        // Roughly 1 degree of latitude
        let from = Point::new(21.0, 52.0);
        let to = Point::new(21.0, 53.0);
        let path = AsTheCrowFliesRouter.route(from, to).await.unwrap();

        assert!((path.distance - 111_195.0).abs() < 200.0, "{}", path.distance);
        assert_eq!(path.geometry.0.first().unwrap().x, 21.0);
        assert_eq!(path.geometry.0.last().unwrap().y, 53.0);
    }

    #[tokio::test]
    async fn test_distance_is_symmetric() {
        let a = Point::new(20.95, 52.2);
        let b = Point::new(21.05, 52.25);

        let ab = AsTheCrowFliesRouter.route(a, b).await.unwrap().distance;
        let ba = AsTheCrowFliesRouter.route(b, a).await.unwrap().distance;

        assert!((ab - ba).abs() < 1e-6);
    }
}
