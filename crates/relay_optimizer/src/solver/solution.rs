use fixedbitset::FixedBitSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index of a stop in the distance matrix.
pub type StopIdx = usize;

/// Every route starts at the depot.
pub const DEPOT: StopIdx = 0;

#[derive(Error, Debug, PartialEq)]
pub enum SolutionError {
    #[error("Expected {expected} routes, found {found}")]
    RouteCount { expected: usize, found: usize },

    #[error("Route {vehicle} does not start at the depot")]
    MissingDepot { vehicle: usize },

    #[error("Stop {stop} in route {vehicle} is out of range")]
    UnknownStop { vehicle: usize, stop: StopIdx },

    #[error("Stop {stop} is visited more than once")]
    DuplicateStop { stop: StopIdx },

    #[error("Stop {stop} is not visited")]
    MissingStop { stop: StopIdx },
}

/// One vehicle's visiting order. The first stop is always the depot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Route {
    stops: Vec<StopIdx>,
}

impl Route {
    pub fn new() -> Self {
        Route { stops: vec![DEPOT] }
    }

    pub fn stops(&self) -> &[StopIdx] {
        &self.stops
    }

    /// Number of stops including the depot.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// A route holding only the depot.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.stops.len() <= 1
    }

    pub fn last_stop(&self) -> StopIdx {
        self.stops.last().copied().unwrap_or(DEPOT)
    }

    pub fn push(&mut self, stop: StopIdx) {
        debug_assert_ne!(stop, DEPOT);
        self.stops.push(stop);
    }

    pub(crate) fn insert(&mut self, position: usize, stop: StopIdx) {
        debug_assert!(position >= 1 && position <= self.stops.len());
        self.stops.insert(position, stop);
    }

    pub(crate) fn remove(&mut self, position: usize) -> StopIdx {
        debug_assert!(position >= 1);
        self.stops.remove(position)
    }

    /// Removes the first `len` stops after the depot.
    pub(crate) fn drain_prefix(&mut self, len: usize) -> Vec<StopIdx> {
        self.stops.drain(1..1 + len).collect()
    }

    /// Inserts `segment` right after the depot, keeping its order.
    pub(crate) fn splice_after_depot(&mut self, segment: Vec<StopIdx>) {
        self.stops.splice(1..1, segment);
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::new()
    }
}

impl From<Vec<StopIdx>> for Route {
    fn from(stops: Vec<StopIdx>) -> Self {
        Route { stops }
    }
}

/// A complete assignment of stops to vehicles, one route per vehicle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Solution {
    routes: Vec<Route>,
}

impl Solution {
    /// `vehicle_count` routes holding only the depot.
    pub fn empty(vehicle_count: usize) -> Self {
        Solution {
            routes: vec![Route::new(); vehicle_count],
        }
    }

    pub fn from_routes(routes: Vec<Route>) -> Self {
        Solution { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route(&self, vehicle: usize) -> &Route {
        &self.routes[vehicle]
    }

    pub(crate) fn route_mut(&mut self, vehicle: usize) -> &mut Route {
        &mut self.routes[vehicle]
    }

    pub fn vehicle_count(&self) -> usize {
        self.routes.len()
    }

    /// Number of non-depot stops across all routes.
    pub fn assigned_stops(&self) -> usize {
        self.routes.iter().map(|route| route.len() - 1).sum()
    }

    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    /// Checks that the routes cover stops `1..num_locations` exactly once.
    pub fn validate(&self, num_locations: usize, vehicle_count: usize) -> Result<(), SolutionError> {
        if self.routes.len() != vehicle_count {
            return Err(SolutionError::RouteCount {
                expected: vehicle_count,
                found: self.routes.len(),
            });
        }

        let mut visited = FixedBitSet::with_capacity(num_locations);
        visited.insert(DEPOT);

        for (vehicle, route) in self.routes.iter().enumerate() {
            if route.stops.first() != Some(&DEPOT) {
                return Err(SolutionError::MissingDepot { vehicle });
            }

            for &stop in &route.stops[1..] {
                if stop >= num_locations {
                    return Err(SolutionError::UnknownStop { vehicle, stop });
                }
                if visited.put(stop) {
                    return Err(SolutionError::DuplicateStop { stop });
                }
            }
        }

        match visited.zeroes().next() {
            Some(stop) => Err(SolutionError::MissingStop { stop }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_solution() {
        let solution = Solution::empty(3);

        assert_eq!(solution.vehicle_count(), 3);
        assert!(solution.routes().iter().all(|route| route.stops() == [DEPOT]));
        assert_eq!(solution.assigned_stops(), 0);
        assert_eq!(solution.validate(1, 3), Ok(()));
    }

    #[test]
    fn test_validate_accepts_bijection() {
        let solution = Solution::from_routes(vec![vec![0, 3, 1].into(), vec![0, 2].into()]);

        assert_eq!(solution.validate(4, 2), Ok(()));
    }

    #[test]
    fn test_validate_duplicate() {
        let solution = Solution::from_routes(vec![vec![0, 1, 2].into(), vec![0, 2].into()]);

        assert_eq!(
            solution.validate(3, 2),
            Err(SolutionError::DuplicateStop { stop: 2 })
        );
    }

    #[test]
    fn test_validate_depot_revisit() {
        let solution = Solution::from_routes(vec![vec![0, 1, 0].into()]);

        assert_eq!(
            solution.validate(2, 1),
            Err(SolutionError::DuplicateStop { stop: 0 })
        );
    }

    #[test]
    fn test_validate_missing_stop() {
        let solution = Solution::from_routes(vec![vec![0, 1].into(), vec![0, 3].into()]);

        assert_eq!(
            solution.validate(4, 2),
            Err(SolutionError::MissingStop { stop: 2 })
        );
    }

    #[test]
    fn test_validate_route_shape() {
        let solution = Solution::from_routes(vec![vec![1, 0].into()]);
        assert_eq!(
            solution.validate(2, 1),
            Err(SolutionError::MissingDepot { vehicle: 0 })
        );

        let solution = Solution::from_routes(vec![vec![0, 5].into()]);
        assert_eq!(
            solution.validate(2, 1),
            Err(SolutionError::UnknownStop { vehicle: 0, stop: 5 })
        );

        assert_eq!(
            Solution::empty(2).validate(1, 3),
            Err(SolutionError::RouteCount {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_segment_helpers() {
        let mut source = Route::from(vec![0, 1, 2, 3]);
        let mut target = Route::from(vec![0, 4]);

        let segment = source.drain_prefix(2);
        target.splice_after_depot(segment);

        assert_eq!(source.stops(), [0, 3]);
        assert_eq!(target.stops(), [0, 1, 2, 4]);
    }
}
