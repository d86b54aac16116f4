use indicatif::{ProgressBar, ProgressStyle};
use relay_optimizer::solver::{
    observer::{EpochReport, SolverObserver},
    score::SolutionScore,
};

/// Drives a terminal progress bar from solver callbacks.
pub struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix:>8} [{bar:40}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        ProgressObserver { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        ProgressObserver::new()
    }
}

impl SolverObserver for ProgressObserver {
    fn on_matrix_progress(&self, completed: usize, total: usize) {
        if completed == 0 {
            self.bar.set_prefix("matrix");
            self.bar.set_length(total as u64);
        }
        self.bar.set_position(completed as u64);
    }

    fn on_epoch(&self, report: &EpochReport) {
        if report.epoch == 0 {
            self.bar.set_prefix("anneal");
            self.bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{prefix:>8} {spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
        }

        self.bar.set_message(format!(
            "epoch {} T={:.3} best={:.4} current={:.4}",
            report.epoch, report.epoch_temperature, report.elite_fitness, report.walker_fitness
        ));
        self.bar.tick();
    }

    fn on_finished(&self, _score: &SolutionScore) {
        self.bar.finish_and_clear();
    }
}
