use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::annealing_params::{AnnealingParams, Intensity, ParamsError};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "AlgorithmRepr", into = "AlgorithmRepr")]
pub enum Algorithm {
    /// Deterministic nearest candidate construction.
    #[default]
    Greedy,
    SimulatedAnnealing(Intensity),
    /// Simulated annealing with a hand-tuned schedule.
    CustomAnnealing(AnnealingParams),
}

impl Algorithm {
    pub fn annealing_params(&self) -> Option<AnnealingParams> {
        match self {
            Algorithm::Greedy => None,
            Algorithm::SimulatedAnnealing(intensity) => Some(intensity.params()),
            Algorithm::CustomAnnealing(params) => Some(*params),
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        match self.annealing_params() {
            Some(params) => params.validate(),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Greedy => f.write_str("greedy"),
            Algorithm::SimulatedAnnealing(intensity) => write!(f, "annealing:{intensity}"),
            Algorithm::CustomAnnealing(_) => f.write_str("annealing:custom"),
        }
    }
}

/// Accepts `greedy`, `annealing` and `annealing:<intensity>`.
impl FromStr for Algorithm {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let (name, intensity) = match normalized.split_once(':') {
            Some((name, intensity)) => (name, Some(intensity)),
            None => (normalized.as_str(), None),
        };

        match (name, intensity) {
            ("greedy", None) => Ok(Algorithm::Greedy),
            ("annealing" | "simulated-annealing" | "sa", None) => {
                Ok(Algorithm::SimulatedAnnealing(Intensity::default()))
            }
            ("annealing" | "simulated-annealing" | "sa", Some(intensity)) => {
                Ok(Algorithm::SimulatedAnnealing(intensity.parse()?))
            }
            _ => Err(ParamsError::UnknownAlgorithm(s.to_owned())),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AlgorithmRepr {
    Name(String),
    Custom(AnnealingParams),
}

impl TryFrom<AlgorithmRepr> for Algorithm {
    type Error = ParamsError;

    fn try_from(repr: AlgorithmRepr) -> Result<Self, Self::Error> {
        match repr {
            AlgorithmRepr::Name(name) => name.parse(),
            AlgorithmRepr::Custom(params) => {
                params.validate()?;
                Ok(Algorithm::CustomAnnealing(params))
            }
        }
    }
}

impl From<Algorithm> for AlgorithmRepr {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::CustomAnnealing(params) => AlgorithmRepr::Custom(params),
            other => AlgorithmRepr::Name(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverParams {
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Fixes the random source for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
}
