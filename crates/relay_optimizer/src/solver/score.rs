use schemars::JsonSchema;
use serde::Serialize;

use crate::problem::distance_matrix::{Distance, DistanceMatrix};

use super::solution::{Route, Solution};

/// Keeps fitness values in the range the temperature schedule is tuned for.
pub const FITNESS_SCALE: f64 = 1000.0;

/// Length of a route, without returning to the depot.
pub fn route_distance(matrix: &DistanceMatrix, route: &Route) -> Distance {
    route
        .stops()
        .windows(2)
        .map(|leg| matrix.distance(leg[0], leg[1]))
        .sum()
}

pub fn fitness(total_distance: Distance, max_distance: Distance) -> f64 {
    (total_distance + max_distance) / FITNESS_SCALE
}

/// Aggregate metrics of a [`Solution`]. Recomputed from the routes alone.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SolutionScore {
    pub route_distances: Vec<Distance>,
    pub total_distance: Distance,
    pub max_distance: Distance,
    pub utilized_vehicles: usize,
    pub fitness: f64,
}

impl SolutionScore {
    pub fn evaluate(matrix: &DistanceMatrix, solution: &Solution) -> Self {
        let route_distances: Vec<Distance> = solution
            .routes()
            .iter()
            .map(|route| route_distance(matrix, route))
            .collect();

        let total_distance = route_distances.iter().sum();
        let max_distance = route_distances.iter().copied().fold(0.0, f64::max);
        let utilized_vehicles = solution
            .routes()
            .iter()
            .filter(|route| !route.is_empty())
            .count();

        SolutionScore {
            fitness: fitness(total_distance, max_distance),
            route_distances,
            total_distance,
            max_distance,
            utilized_vehicles,
        }
    }
}

/// Fitness only, without allocating the per route breakdown.
pub fn evaluate_fitness(matrix: &DistanceMatrix, solution: &Solution) -> f64 {
    let (total, max) = solution
        .routes()
        .iter()
        .map(|route| route_distance(matrix, route))
        .fold((0.0, 0.0), |(total, max): (f64, f64), distance| {
            (total + distance, max.max(distance))
        });

    fitness(total, max)
}
