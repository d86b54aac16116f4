use rand::Rng;
use tracing::{Level, debug, instrument};

use crate::problem::distance_matrix::DistanceMatrix;

use super::{
    annealing_params::AnnealingParams,
    construction::random_permutation::random_solution,
    neighborhood::neighbor,
    observer::{EpochReport, SolverObserver},
    score::evaluate_fitness,
    solution::Solution,
};

/// A solution together with its cached fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSolution {
    pub solution: Solution,
    pub fitness: f64,
}

impl ScoredSolution {
    pub fn new(matrix: &DistanceMatrix, solution: Solution) -> Self {
        ScoredSolution {
            fitness: evaluate_fitness(matrix, &solution),
            solution,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnnealingOutcome {
    pub best: ScoredSolution,
    pub epochs: usize,
    pub final_temperature: f64,
}

/// Simulated annealing over [`neighbor`] moves.
///
/// Two solutions are tracked. The walker follows the Metropolis criterion and
/// may move to worse solutions. The elite is replaced only by a strictly
/// better candidate and is what the run returns. Every epoch first cools the
/// temperature, then runs `iterations_per_epoch` candidates. If the elite
/// improved during the epoch the cooling is undone, so the schedule only moves
/// on after an epoch without progress.
#[derive(Debug, Clone)]
pub struct AnnealingOptimizer {
    params: AnnealingParams,
}

impl AnnealingOptimizer {
    pub fn new(params: AnnealingParams) -> Self {
        AnnealingOptimizer { params }
    }

    pub fn params(&self) -> &AnnealingParams {
        &self.params
    }

    /// Starts from a random solution.
    pub fn run<R, O>(
        &self,
        matrix: &DistanceMatrix,
        vehicle_count: usize,
        rng: &mut R,
        observer: &O,
    ) -> AnnealingOutcome
    where
        R: Rng + ?Sized,
        O: SolverObserver + ?Sized,
    {
        let initial = random_solution(matrix.num_locations(), vehicle_count, rng);
        self.run_from(matrix, initial, rng, observer)
    }

    #[instrument(skip_all, level = Level::DEBUG)]
    pub fn run_from<R, O>(
        &self,
        matrix: &DistanceMatrix,
        initial: Solution,
        rng: &mut R,
        observer: &O,
    ) -> AnnealingOutcome
    where
        R: Rng + ?Sized,
        O: SolverObserver + ?Sized,
    {
        let AnnealingParams {
            start_temperature,
            cooling_factor,
            iterations_per_epoch,
            finish_temperature,
        } = self.params;

        debug_assert_eq!(
            initial.validate(matrix.num_locations(), initial.vehicle_count()),
            Ok(())
        );

        let mut walker = ScoredSolution::new(matrix, initial);
        let mut elite = walker.clone();
        let mut temperature = start_temperature;
        let mut epoch = 0;

        // Nothing can move.
        if walker.solution.assigned_stops() == 0 {
            return AnnealingOutcome {
                best: elite,
                epochs: 0,
                final_temperature: temperature,
            };
        }

        while temperature > finish_temperature {
            temperature *= cooling_factor;
            let epoch_temperature = temperature;
            let elite_fitness_at_start = elite.fitness;

            let mut accepted_moves = 0;
            let mut accepted_worse_moves = 0;

            for _ in 0..iterations_per_epoch {
                let candidate = ScoredSolution::new(matrix, neighbor(&walker.solution, rng));

                if candidate.fitness < elite.fitness {
                    elite = candidate.clone();
                }

                let accept = candidate.fitness < walker.fitness
                    || ((walker.fitness - candidate.fitness) / temperature).exp()
                        > rng.random::<f64>();

                if accept {
                    accepted_moves += 1;
                    if candidate.fitness > walker.fitness {
                        accepted_worse_moves += 1;
                    }
                    walker = candidate;
                }
            }

            let improved = elite.fitness < elite_fitness_at_start;
            if improved {
                temperature /= cooling_factor;
            }

            observer.on_epoch(&EpochReport {
                epoch,
                epoch_temperature,
                temperature,
                elite_fitness: elite.fitness,
                walker_fitness: walker.fitness,
                improved,
                accepted_moves,
                accepted_worse_moves,
            });

            epoch += 1;
        }

        debug!(
            "Annealing finished after {epoch} epochs, best fitness {}",
            elite.fitness
        );

        AnnealingOutcome {
            best: elite,
            epochs: epoch,
            final_temperature: temperature,
        }
    }
}
