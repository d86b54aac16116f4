use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::score::SolutionScore;

/// Summary of one annealing epoch, reported after its inner iterations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EpochReport {
    pub epoch: usize,
    /// Temperature the epoch's iterations ran at.
    pub epoch_temperature: f64,
    /// Temperature carried into the next epoch. Equals the pre-cooling value
    /// when the elite improved.
    pub temperature: f64,
    pub elite_fitness: f64,
    pub walker_fitness: f64,
    pub improved: bool,
    pub accepted_moves: usize,
    /// Accepted candidates that were worse than the walker they replaced.
    pub accepted_worse_moves: usize,
}

/// Hooks called by the matrix builder and the solvers. All hooks default to
/// doing nothing.
pub trait SolverObserver: Send + Sync {
    fn on_matrix_progress(&self, _completed: usize, _total: usize) {}

    fn on_epoch(&self, _report: &EpochReport) {}

    fn on_finished(&self, _score: &SolutionScore) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SolverObserver for NoopObserver {}

/// Logs progress through `tracing`. Epochs go to DEBUG, the final score to INFO.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SolverObserver for TracingObserver {
    fn on_matrix_progress(&self, completed: usize, total: usize) {
        if completed == total {
            debug!("Distance matrix complete, {total} pairs");
        }
    }

    fn on_epoch(&self, report: &EpochReport) {
        debug!(
            epoch = report.epoch,
            temperature = report.epoch_temperature,
            elite = report.elite_fitness,
            walker = report.walker_fitness,
            accepted = report.accepted_moves,
            accepted_worse = report.accepted_worse_moves,
            improved = report.improved,
            "Epoch finished"
        );
    }

    fn on_finished(&self, score: &SolutionScore) {
        info!(
            total_distance = score.total_distance,
            max_distance = score.max_distance,
            utilized_vehicles = score.utilized_vehicles,
            fitness = score.fitness,
            "Solution found"
        );
    }
}

impl<T> SolverObserver for Arc<T>
where
    T: SolverObserver + ?Sized,
{
    fn on_matrix_progress(&self, completed: usize, total: usize) {
        (**self).on_matrix_progress(completed, total);
    }

    fn on_epoch(&self, report: &EpochReport) {
        (**self).on_epoch(report);
    }

    fn on_finished(&self, score: &SolutionScore) {
        (**self).on_finished(score);
    }
}
