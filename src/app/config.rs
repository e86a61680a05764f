//! Configuration types for agent creation.

use std::{fmt, fs::File, io::BufReader, path::Path};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    agents::{DEFAULT_STEP_COST, DEFAULT_TERMINAL_BONUS},
    q_learning::{Decay, Hyperparameters},
};

/// Which agent to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Q-learning over all 500 states and 6 actions
    Flat,
    /// Rule-based pickup/dropoff, Q-learned movement over all 500 states
    Heuristic,
    /// Rule-based pickup/dropoff, Q-learned movement over the 100-state sub-problem
    #[default]
    Decomposed,
}

impl AgentKind {
    /// Hyperparameters the agent is tuned with out of the box
    pub fn default_hyperparameters(self) -> Hyperparameters {
        match self {
            AgentKind::Flat => Hyperparameters::new(
                Decay::new(0.1, 0.99999, 0.01),
                Decay::constant(1.0),
                Decay::new(0.0, 1.0, 0.0),
            ),
            AgentKind::Heuristic | AgentKind::Decomposed => Hyperparameters::default(),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentKind::Flat => "flat",
            AgentKind::Heuristic => "heuristic",
            AgentKind::Decomposed => "decomposed",
        };
        f.write_str(name)
    }
}

/// Configuration for creating a taxi agent.
///
/// # Examples
///
/// ```
/// use taxi_decomp::app::{AgentConfig, AgentKind};
///
/// let config = AgentConfig::new(AgentKind::Decomposed)
///     .with_seed(42)
///     .with_rewards(20.0, -1.0);
/// assert_eq!(config.hyperparameters().alpha.value, 0.1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub kind: AgentKind,
    /// Overrides the kind's default hyperparameters
    pub hyperparameters: Option<Hyperparameters>,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Navigator reward on reaching a pickup/dropoff square (decomposed only)
    pub terminal_bonus: f64,
    /// Navigator reward for any other move (decomposed only)
    pub step_cost: f64,
}

impl AgentConfig {
    pub fn new(kind: AgentKind) -> Self {
        Self {
            kind,
            hyperparameters: None,
            seed: None,
            terminal_bonus: DEFAULT_TERMINAL_BONUS,
            step_cost: DEFAULT_STEP_COST,
        }
    }

    /// Read a configuration from a JSON file; missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_hyperparameters(mut self, hyperparameters: Hyperparameters) -> Self {
        self.hyperparameters = Some(hyperparameters);
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_rewards(mut self, terminal_bonus: f64, step_cost: f64) -> Self {
        self.terminal_bonus = terminal_bonus;
        self.step_cost = step_cost;
        self
    }

    /// Effective hyperparameters: the override, or the kind's defaults
    pub fn hyperparameters(&self) -> Hyperparameters {
        self.hyperparameters
            .unwrap_or_else(|| self.kind.default_hyperparameters())
    }

    pub fn validate(&self) -> Result<()> {
        self.hyperparameters().validate()?;
        if !self.terminal_bonus.is_finite() || !self.step_cost.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: "terminal_bonus and step_cost must be finite".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(AgentKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_defaults() {
        let flat = AgentConfig::new(AgentKind::Flat).hyperparameters();
        assert_eq!(flat.gamma.min, 1.0);

        let decomposed = AgentConfig::new(AgentKind::Decomposed).hyperparameters();
        assert_eq!(decomposed.alpha, Decay::new(0.1, 0.99999, 0.01));
        assert_eq!(decomposed.gamma.min, 0.0);
    }

    #[test]
    fn test_override_wins() {
        let custom = Hyperparameters::new(
            Decay::constant(0.5),
            Decay::constant(0.9),
            Decay::new(0.1, 0.99, 0.01),
        );
        let config = AgentConfig::new(AgentKind::Heuristic).with_hyperparameters(custom);
        assert_eq!(config.hyperparameters(), custom);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: AgentConfig = serde_json::from_str(r#"{"kind": "flat", "seed": 3}"#).unwrap();
        assert_eq!(config.kind, AgentKind::Flat);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.terminal_bonus, DEFAULT_TERMINAL_BONUS);
        assert!(config.hyperparameters.is_none());
    }

    #[test]
    fn test_load_reports_missing_file_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        match AgentConfig::load(&path) {
            Err(Error::Io { operation, .. }) => {
                assert!(operation.contains("missing.json"), "{operation}");
            }
            other => panic!("expected an IO error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.json");
        std::fs::write(&path, r#"{"kind": "heuristic", "step_cost": -2.0}"#).unwrap();
        let config = AgentConfig::load(&path).unwrap();
        assert_eq!(config.kind, AgentKind::Heuristic);
        assert_eq!(config.step_cost, -2.0);
    }

    #[test]
    fn test_validate_rejects_non_finite_rewards() {
        let config = AgentConfig::default().with_rewards(f64::NAN, -1.0);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
