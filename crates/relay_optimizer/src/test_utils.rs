use parking_lot::Mutex;
use rand::{Rng, RngCore, SeedableRng, rngs::SmallRng};

use crate::{
    problem::distance_matrix::DistanceMatrix,
    solver::{
        observer::{EpochReport, SolverObserver},
        score::SolutionScore,
    },
};

pub fn create_matrix(rows: Vec<Vec<f64>>) -> DistanceMatrix {
    DistanceMatrix::new(rows).unwrap()
}

/// Depot and stops A, B, C with depot->A=2, depot->B=5, depot->C=9, A->B=3,
/// A->C=6 and B->C=4, symmetric.
pub fn scenario_matrix() -> DistanceMatrix {
    create_matrix(vec![
        vec![0.0, 2.0, 5.0, 9.0],
        vec![2.0, 0.0, 3.0, 6.0],
        vec![5.0, 3.0, 0.0, 4.0],
        vec![9.0, 6.0, 4.0, 0.0],
    ])
}

/// Asymmetric matrix with integer distances in `1..100`.
pub fn random_matrix(num_locations: usize, seed: u64) -> DistanceMatrix {
    let mut rng = SmallRng::seed_from_u64(seed);

    let rows = (0..num_locations)
        .map(|from| {
            (0..num_locations)
                .map(|to| {
                    if from == to {
                        0.0
                    } else {
                        rng.random_range(1..100) as f64
                    }
                })
                .collect()
        })
        .collect();

    create_matrix(rows)
}

#[derive(Default)]
pub struct RecordingObserver {
    pub matrix_progress: Mutex<Vec<(usize, usize)>>,
    pub epochs: Mutex<Vec<EpochReport>>,
    pub finished: Mutex<Vec<SolutionScore>>,
}

impl SolverObserver for RecordingObserver {
    fn on_matrix_progress(&self, completed: usize, total: usize) {
        self.matrix_progress.lock().push((completed, total));
    }

    fn on_epoch(&self, report: &EpochReport) {
        self.epochs.lock().push(*report);
    }

    fn on_finished(&self, score: &SolutionScore) {
        self.finished.lock().push(score.clone());
    }
}

/// Rng whose raw draws are scripted. The script repeats once exhausted; an
/// empty script draws zeros.
pub struct MockRng {
    draws: std::iter::Cycle<std::vec::IntoIter<u64>>,
}

impl MockRng {
    pub fn new(draws: Vec<u64>) -> Self {
        MockRng {
            draws: draws.into_iter().cycle(),
        }
    }
}

impl RngCore for MockRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.draws.next().unwrap_or(0)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_rng() {
        let data = vec![1, 2, 3];
        let mut rng = MockRng::new(data.clone());

        for &expected in data.iter().cycle().take(7) {
            assert_eq!(rng.next_u64(), expected);
        }
        assert_eq!(MockRng::new(Vec::new()).next_u64(), 0);
    }

    #[test]
    fn test_random_matrix_is_valid() {
        let matrix = random_matrix(6, 1);

        assert_eq!(matrix.num_locations(), 6);
        assert_eq!(random_matrix(6, 1), matrix);
    }
}
