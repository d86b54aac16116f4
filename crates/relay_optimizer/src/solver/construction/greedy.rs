use fixedbitset::FixedBitSet;
use tracing::{Level, instrument};

use crate::{
    problem::distance_matrix::{Distance, DistanceMatrix},
    solver::solution::{DEPOT, Solution, StopIdx},
};

/// Nearest candidate construction.
///
/// At every step, every `(vehicle, unvisited stop)` pair is priced as the
/// distance from the vehicle's last stop to the candidate stop. The cheapest
/// pair wins and the stop is appended to that vehicle. Pairs are scanned
/// vehicle first, then stop, both ascending, and only a strictly cheaper pair
/// replaces the current best, so ties go to the first pair scanned.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn construct_greedy(matrix: &DistanceMatrix, vehicle_count: usize) -> Solution {
    let num_locations = matrix.num_locations();
    let mut solution = Solution::empty(vehicle_count);

    if vehicle_count == 0 {
        return solution;
    }

    let mut visited = FixedBitSet::with_capacity(num_locations);
    visited.insert(DEPOT);

    for _ in 1..num_locations {
        let mut best: Option<(usize, StopIdx, Distance)> = None;

        for (vehicle, route) in solution.routes().iter().enumerate() {
            let frontier = route.last_stop();

            for stop in visited.zeroes() {
                let cost = matrix.distance(frontier, stop);
                if best.is_none_or(|(_, _, best_cost)| cost < best_cost) {
                    best = Some((vehicle, stop, cost));
                }
            }
        }

        let Some((vehicle, stop, _)) = best else {
            break;
        };

        solution.route_mut(vehicle).push(stop);
        visited.insert(stop);
    }

    solution
}
