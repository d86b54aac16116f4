use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const START_TEMPERATURE: f64 = 100.0;

#[derive(Error, Debug, PartialEq)]
pub enum ParamsError {
    #[error("Cooling factor must be in (0, 1), got {0}")]
    CoolingFactor(f64),

    #[error("Iterations per epoch must be positive")]
    Iterations,

    #[error("Temperatures must satisfy 0 < finish ({finish}) < start ({start})")]
    Temperatures { start: f64, finish: f64 },

    #[error("Unknown intensity {0}")]
    UnknownIntensity(String),

    #[error("Unknown algorithm {0}, expected greedy or annealing[:intensity]")]
    UnknownAlgorithm(String),
}

/// Preset annealing schedules, from quickest to most thorough.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Intensity {
    #[default]
    VeryFast,
    Fast,
    Moderate,
    Slow,
    Thorough,
}

impl Intensity {
    pub const ALL: [Intensity; 5] = [
        Intensity::VeryFast,
        Intensity::Fast,
        Intensity::Moderate,
        Intensity::Slow,
        Intensity::Thorough,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::VeryFast => "very-fast",
            Intensity::Fast => "fast",
            Intensity::Moderate => "moderate",
            Intensity::Slow => "slow",
            Intensity::Thorough => "thorough",
        }
    }

    pub fn params(&self) -> AnnealingParams {
        let (cooling_factor, iterations_per_epoch, finish_temperature) = match self {
            Intensity::VeryFast => (0.95, 5000, 1.0),
            Intensity::Fast => (0.97, 10000, 0.75),
            Intensity::Moderate => (0.98, 15000, 0.5),
            Intensity::Slow => (0.99, 20000, 0.25),
            Intensity::Thorough => (0.995, 25000, 0.1),
        };

        AnnealingParams {
            start_temperature: START_TEMPERATURE,
            cooling_factor,
            iterations_per_epoch,
            finish_temperature,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");

        Intensity::ALL
            .into_iter()
            .find(|intensity| intensity.as_str() == normalized)
            .ok_or_else(|| ParamsError::UnknownIntensity(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnnealingParams {
    pub start_temperature: f64,
    /// Multiplier applied to the temperature at the start of every epoch.
    pub cooling_factor: f64,
    pub iterations_per_epoch: usize,
    /// The search stops once the temperature falls to this value.
    pub finish_temperature: f64,
}

impl AnnealingParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(ParamsError::CoolingFactor(self.cooling_factor));
        }

        if self.iterations_per_epoch == 0 {
            return Err(ParamsError::Iterations);
        }

        if !(self.finish_temperature > 0.0 && self.finish_temperature < self.start_temperature)
            || !self.start_temperature.is_finite()
        {
            return Err(ParamsError::Temperatures {
                start: self.start_temperature,
                finish: self.finish_temperature,
            });
        }

        Ok(())
    }
}

impl Default for AnnealingParams {
    fn default() -> Self {
        Intensity::default().params()
    }
}

impl From<Intensity> for AnnealingParams {
    fn from(intensity: Intensity) -> Self {
        intensity.params()
    }
}
