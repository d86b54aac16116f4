use rand::Rng;

use super::solution::Solution;

/// Chance of picking a relocate move over a segment transfer.
pub const RELOCATE_PROBABILITY: f64 = 0.99;

/// A single local modification of a [`Solution`].
///
/// Positions are indices into a route's stops. Position 0 is the depot and is
/// never moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborhoodMove {
    /// Moves one stop. `to_position` is measured on the target route before
    /// the stop is removed, in `1..=target.len()`.
    Relocate {
        from_vehicle: usize,
        from_position: usize,
        to_vehicle: usize,
        to_position: usize,
    },
    /// Moves the first `len` stops of a route, in order, right after the depot
    /// of the target route.
    SegmentTransfer {
        from_vehicle: usize,
        to_vehicle: usize,
        len: usize,
    },
}

impl NeighborhoodMove {
    /// Draws a random move for `solution`, or `None` when no route holds a
    /// movable stop.
    pub fn sample<R>(solution: &Solution, rng: &mut R) -> Option<Self>
    where
        R: Rng + ?Sized,
    {
        if solution.assigned_stops() == 0 {
            return None;
        }

        if rng.random_bool(RELOCATE_PROBABILITY) {
            let (from_vehicle, to_vehicle) = sample_vehicles(solution, rng);
            let from_position = rng.random_range(1..solution.route(from_vehicle).len());
            let to_position = rng.random_range(1..=solution.route(to_vehicle).len());

            Some(NeighborhoodMove::Relocate {
                from_vehicle,
                from_position,
                to_vehicle,
                to_position,
            })
        } else {
            let (from_vehicle, to_vehicle) = sample_vehicles(solution, rng);
            let len = rng.random_range(1..solution.route(from_vehicle).len());

            Some(NeighborhoodMove::SegmentTransfer {
                from_vehicle,
                to_vehicle,
                len,
            })
        }
    }

    pub fn apply(&self, solution: &mut Solution) {
        match *self {
            NeighborhoodMove::Relocate {
                from_vehicle,
                from_position,
                to_vehicle,
                to_position,
            } => {
                let stop = solution.route_mut(from_vehicle).remove(from_position);

                // The removal shifted every later stop of the same route left.
                let to_position = if from_vehicle == to_vehicle && from_position < to_position {
                    to_position - 1
                } else {
                    to_position
                };

                solution.route_mut(to_vehicle).insert(to_position, stop);
            }
            NeighborhoodMove::SegmentTransfer {
                from_vehicle,
                to_vehicle,
                len,
            } => {
                let segment = solution.route_mut(from_vehicle).drain_prefix(len);
                solution.route_mut(to_vehicle).splice_after_depot(segment);
            }
        }
    }
}

/// Source vehicle is resampled until its route has a movable stop, which ends
/// as long as the solution has at least one assigned stop. The target is drawn
/// independently.
fn sample_vehicles<R>(solution: &Solution, rng: &mut R) -> (usize, usize)
where
    R: Rng + ?Sized,
{
    let vehicle_count = solution.vehicle_count();

    let from_vehicle = loop {
        let vehicle = rng.random_range(0..vehicle_count);
        if !solution.route(vehicle).is_empty() {
            break vehicle;
        }
    };
    let to_vehicle = rng.random_range(0..vehicle_count);

    (from_vehicle, to_vehicle)
}

/// Returns a modified copy of `solution`. The input is never touched.
pub fn neighbor<R>(solution: &Solution, rng: &mut R) -> Solution
where
    R: Rng + ?Sized,
{
    let mut candidate = solution.clone();

    if let Some(neighborhood_move) = NeighborhoodMove::sample(solution, rng) {
        neighborhood_move.apply(&mut candidate);
    }

    debug_assert_eq!(candidate.assigned_stops(), solution.assigned_stops());

    candidate
}
