//! Search configuration.
//!
//! `SolverConfig` is the immutable value handed to the solver.
//! `SolutionParameters` is a partial update: every field is optional and
//! omitted fields keep the value of the config it is applied to.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ShopError;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: u64 = 100_000;
/// Default wall-clock cap (seconds).
pub const DEFAULT_MAX_SECONDS: u64 = 30;
/// Default restart probability (percent) for hill climbing with restarts.
pub const DEFAULT_RESTART_PERCENT: f64 = 1.0;

/// Candidate-generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm {
    /// A fresh random order every iteration.
    #[default]
    Random,
    /// One swap away from the best order found so far.
    HillClimbing,
    /// Hill climbing on a local best, restarted from a random order with
    /// a configured probability.
    HillClimbingWithRestarts,
}

impl Algorithm {
    /// Canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "RANDOM",
            Self::HillClimbing => "HILL_CLIMBING",
            Self::HillClimbingWithRestarts => "HILL_CLIMBING_WITH_RESTARTS",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "RANDOM" => Ok(Self::Random),
            "HILL_CLIMBING" => Ok(Self::HillClimbing),
            "HILL_CLIMBING_WITH_RESTARTS" => Ok(Self::HillClimbingWithRestarts),
            _ => Err(ShopError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// How random orders are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RandomAlgorithm {
    /// Uniform Fisher–Yates shuffle.
    #[default]
    FisherYates,
    /// Catalog order, unshuffled. For reproducible benchmarking only.
    NoRandom,
}

impl RandomAlgorithm {
    /// Canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FisherYates => "FISHER_YATES",
            Self::NoRandom => "NO_RANDOM",
        }
    }
}

impl fmt::Display for RandomAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RandomAlgorithm {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "FISHER_YATES" | "FISHERYATES" => Ok(Self::FisherYates),
            "NO_RANDOM" | "NORANDOM" => Ok(Self::NoRandom),
            _ => Err(ShopError::UnknownRandomAlgorithm(s.to_string())),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace('-', "_")
}

/// Solver configuration.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use u_jobshop::search::{Algorithm, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_algorithm(Algorithm::HillClimbingWithRestarts)
///     .with_max_iterations(10_000)
///     .with_max_duration(Duration::from_secs(5))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Iteration cap. `None` disables the iteration criterion.
    pub max_iterations: Option<u64>,
    /// Wall-clock cap. `None` disables the time criterion.
    pub max_duration: Option<Duration>,
    /// Candidate-generation strategy.
    pub algorithm: Algorithm,
    /// Restart probability in percent (0..=100).
    pub restart_percent: f64,
    /// Random-order generator.
    pub random_algorithm: RandomAlgorithm,
    /// RNG seed. `None` seeds from the thread RNG.
    pub seed: Option<u64>,
    /// Iterations between progress log lines (0 = never).
    pub progress_interval: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
            max_duration: Some(Duration::from_secs(DEFAULT_MAX_SECONDS)),
            algorithm: Algorithm::Random,
            restart_percent: DEFAULT_RESTART_PERCENT,
            random_algorithm: RandomAlgorithm::FisherYates,
            seed: None,
            progress_interval: 1000,
        }
    }
}

impl SolverConfig {
    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max: u64) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Removes the iteration cap.
    pub fn without_max_iterations(mut self) -> Self {
        self.max_iterations = None;
        self
    }

    /// Sets the wall-clock cap.
    pub fn with_max_duration(mut self, max: Duration) -> Self {
        self.max_duration = Some(max);
        self
    }

    /// Removes the wall-clock cap.
    pub fn without_max_duration(mut self) -> Self {
        self.max_duration = None;
        self
    }

    /// Sets the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the restart probability (percent).
    pub fn with_restart_percent(mut self, percent: f64) -> Self {
        self.restart_percent = percent;
        self
    }

    /// Sets the random-order generator.
    pub fn with_random_algorithm(mut self, random_algorithm: RandomAlgorithm) -> Self {
        self.random_algorithm = random_algorithm;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the progress log interval.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Applies a partial update and validates the result.
    pub fn with_parameters(mut self, params: &SolutionParameters) -> Result<Self, ShopError> {
        if let Some(max) = params.max_number_of_simulations {
            self.max_iterations = Some(max);
        }
        if let Some(secs) = params.max_seconds_to_run {
            let max = Duration::try_from_secs_f64(secs).map_err(|e| {
                ShopError::InvalidConfig(format!("maxSecondsToRun {secs} is out of range: {e}"))
            })?;
            self.max_duration = Some(max);
        }
        if let Some(algorithm) = params.algorithm {
            self.algorithm = algorithm;
        }
        if let Some(percent) = params.hill_climbing_random_restart_percent {
            self.restart_percent = percent;
        }
        if let Some(random_algorithm) = params.random_algorithm {
            self.random_algorithm = random_algorithm;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ShopError> {
        if !(0.0..=100.0).contains(&self.restart_percent) {
            return Err(ShopError::InvalidConfig(format!(
                "restart percent must be within 0..=100, got {}",
                self.restart_percent
            )));
        }
        Ok(())
    }
}

/// Partial configuration update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionParameters {
    /// Iteration cap.
    pub max_number_of_simulations: Option<u64>,
    /// Wall-clock cap in seconds.
    pub max_seconds_to_run: Option<f64>,
    /// Candidate-generation strategy.
    pub algorithm: Option<Algorithm>,
    /// Restart probability in percent.
    pub hill_climbing_random_restart_percent: Option<f64>,
    /// Random-order generator.
    pub random_algorithm: Option<RandomAlgorithm>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawParameters {
    max_number_of_simulations: Option<u64>,
    max_seconds_to_run: Option<f64>,
    algorithm: Option<String>,
    hill_climbing_random_restart_percent: Option<f64>,
    random_algorithm: Option<String>,
}

impl SolutionParameters {
    /// Parses parameters from JSON with camelCase keys.
    ///
    /// Enum values are matched case-insensitively, so both
    /// `"HILL_CLIMBING"` and `"hill-climbing"` are accepted.
    ///
    /// # Errors
    /// `UnknownAlgorithm` / `UnknownRandomAlgorithm` for unrecognized enum
    /// values, `InvalidConfig` for malformed JSON or unknown keys.
    pub fn from_json(json: &str) -> Result<Self, ShopError> {
        let raw: RawParameters =
            serde_json::from_str(json).map_err(|e| ShopError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            max_number_of_simulations: raw.max_number_of_simulations,
            max_seconds_to_run: raw.max_seconds_to_run,
            algorithm: raw.algorithm.as_deref().map(str::parse::<Algorithm>).transpose()?,
            hill_climbing_random_restart_percent: raw.hill_climbing_random_restart_percent,
            random_algorithm: raw
                .random_algorithm
                .as_deref()
                .map(str::parse::<RandomAlgorithm>)
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SolverConfig::default();
        assert_eq!(c.max_iterations, Some(100_000));
        assert_eq!(c.max_duration, Some(Duration::from_secs(30)));
        assert_eq!(c.algorithm, Algorithm::Random);
        assert!((c.restart_percent - 1.0).abs() < 1e-10);
        assert_eq!(c.random_algorithm, RandomAlgorithm::FisherYates);
        assert!(c.seed.is_none());
    }

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!("RANDOM".parse::<Algorithm>().unwrap(), Algorithm::Random);
        assert_eq!(
            "hill-climbing".parse::<Algorithm>().unwrap(),
            Algorithm::HillClimbing
        );
        assert_eq!(
            "HILL_CLIMBING_WITH_RESTARTS".parse::<Algorithm>().unwrap(),
            Algorithm::HillClimbingWithRestarts
        );
        assert_eq!(
            "GENETIC_ALGORITHM".parse::<Algorithm>().unwrap_err(),
            ShopError::UnknownAlgorithm("GENETIC_ALGORITHM".into())
        );
        assert_eq!(
            "NORANDOM".parse::<RandomAlgorithm>().unwrap(),
            RandomAlgorithm::NoRandom
        );
        assert!(matches!(
            "LCG".parse::<RandomAlgorithm>(),
            Err(ShopError::UnknownRandomAlgorithm(_))
        ));
    }

    #[test]
    fn test_partial_update_keeps_omitted_fields() {
        let base = SolverConfig::default().with_seed(3);
        let params = SolutionParameters {
            max_number_of_simulations: Some(10_000),
            algorithm: Some(Algorithm::HillClimbingWithRestarts),
            ..Default::default()
        };
        let c = base.with_parameters(&params).unwrap();
        assert_eq!(c.max_iterations, Some(10_000));
        assert_eq!(c.algorithm, Algorithm::HillClimbingWithRestarts);
        assert_eq!(c.max_duration, Some(Duration::from_secs(30)));
        assert_eq!(c.seed, Some(3));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let params = SolutionParameters {
            hill_climbing_random_restart_percent: Some(150.0),
            ..Default::default()
        };
        assert!(matches!(
            SolverConfig::default().with_parameters(&params),
            Err(ShopError::InvalidConfig(_))
        ));

        for secs in [-1.0, f64::NAN, f64::INFINITY, 1e30] {
            let params = SolutionParameters {
                max_seconds_to_run: Some(secs),
                ..Default::default()
            };
            assert!(
                matches!(
                    SolverConfig::default().with_parameters(&params),
                    Err(ShopError::InvalidConfig(_))
                ),
                "maxSecondsToRun = {secs}"
            );
        }
    }

    #[test]
    fn test_parameters_from_json() {
        let params = SolutionParameters::from_json(
            r#"{"maxNumberOfSimulations": 500, "maxSecondsToRun": 2.5,
                "algorithm": "HILL_CLIMBING", "randomAlgorithm": "NO_RANDOM"}"#,
        )
        .unwrap();
        assert_eq!(params.max_number_of_simulations, Some(500));
        assert_eq!(params.algorithm, Some(Algorithm::HillClimbing));
        assert_eq!(params.random_algorithm, Some(RandomAlgorithm::NoRandom));
        assert!(params.hill_climbing_random_restart_percent.is_none());

        let c = SolverConfig::default().with_parameters(&params).unwrap();
        assert_eq!(c.max_duration, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_parameters_from_json_errors() {
        assert_eq!(
            SolutionParameters::from_json(r#"{"algorithm": "SIMULATED_ANNEALING"}"#).unwrap_err(),
            ShopError::UnknownAlgorithm("SIMULATED_ANNEALING".into())
        );
        assert!(matches!(
            SolutionParameters::from_json(r#"{"maxIterations": 5}"#),
            Err(ShopError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let c = SolverConfig::default()
            .with_algorithm(Algorithm::HillClimbing)
            .with_seed(1);
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"HILL_CLIMBING\""));
        let back: SolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
