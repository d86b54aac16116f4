use rand::{Rng, seq::SliceRandom};

use crate::solver::solution::{Solution, StopIdx};

/// Shuffles stops `1..num_locations` and deals each one to a uniformly chosen
/// vehicle, appending in shuffled order.
pub fn random_solution<R>(num_locations: usize, vehicle_count: usize, rng: &mut R) -> Solution
where
    R: Rng + ?Sized,
{
    let mut solution = Solution::empty(vehicle_count);

    if vehicle_count == 0 {
        return solution;
    }

    let mut stops: Vec<StopIdx> = (1..num_locations).collect();
    stops.shuffle(rng);

    for stop in stops {
        let vehicle = rng.random_range(0..vehicle_count);
        solution.route_mut(vehicle).push(stop);
    }

    solution
}
