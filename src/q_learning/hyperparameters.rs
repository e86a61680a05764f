//! Decaying learning hyperparameters
//!
//! Each step an agent replaces its [`Hyperparameters`] with
//! [`Hyperparameters::decayed`]; the values are never mutated in place.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A scalar in `[0, 1]` with multiplicative decay towards a floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decay {
    pub value: f64,
    pub decay: f64,
    pub min: f64,
}

impl Decay {
    pub const fn new(value: f64, decay: f64, min: f64) -> Self {
        Self { value, decay, min }
    }

    /// A value that never changes
    pub const fn constant(value: f64) -> Self {
        Self::new(value, 1.0, value)
    }

    /// `clamp(value * decay, min, 1)`
    pub fn decayed(self) -> Self {
        Self {
            value: (self.value * self.decay).max(self.min).min(1.0),
            ..self
        }
    }

    /// Value after `steps` decays, computed in closed form
    pub fn after(self, steps: i32) -> f64 {
        (self.value * self.decay.powi(steps)).max(self.min).min(1.0)
    }

    fn validate(self, name: &str) -> Result<()> {
        let in_unit = |x: f64| (0.0..=1.0).contains(&x);
        if !in_unit(self.value) {
            return Err(Error::InvalidConfiguration {
                message: format!("{name} must be in [0, 1], got {}", self.value),
            });
        }
        if !in_unit(self.decay) {
            return Err(Error::InvalidConfiguration {
                message: format!("{name}_decay must be in [0, 1], got {}", self.decay),
            });
        }
        if !in_unit(self.min) {
            return Err(Error::InvalidConfiguration {
                message: format!("{name}_min must be in [0, 1], got {}", self.min),
            });
        }
        Ok(())
    }
}

/// Learning rate, discount factor and exploration rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    /// Learning rate α
    pub alpha: Decay,
    /// Discount factor γ
    pub gamma: Decay,
    /// Exploration rate ε
    pub epsilon: Decay,
}

impl Hyperparameters {
    pub const fn new(alpha: Decay, gamma: Decay, epsilon: Decay) -> Self {
        Self {
            alpha,
            gamma,
            epsilon,
        }
    }

    /// Hyperparameters for the next step
    pub fn decayed(&self) -> Self {
        Self {
            alpha: self.alpha.decayed(),
            gamma: self.gamma.decayed(),
            epsilon: self.epsilon.decayed(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.alpha.validate("alpha")?;
        self.gamma.validate("gamma")?;
        self.epsilon.validate("epsilon")
    }
}

impl Default for Hyperparameters {
    /// Slowly decaying learning rate, undiscounted, greedy
    fn default() -> Self {
        Self {
            alpha: Decay::new(0.1, 0.99999, 0.01),
            gamma: Decay::new(1.0, 1.0, 0.0),
            epsilon: Decay::new(0.0, 1.0, 0.0),
        }
    }
}

impl fmt::Display for Hyperparameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, decay) in [
            ("alpha", self.alpha),
            ("gamma", self.gamma),
            ("epsilon", self.epsilon),
        ] {
            writeln!(
                f,
                "{name}: {}, {name}_decay: {}, {name}_min: {}",
                decay.value, decay.decay, decay.min
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_is_clamped_to_floor() {
        let alpha = Decay::new(0.1, 0.5, 0.04);
        assert!((alpha.decayed().value - 0.05).abs() < 1e-12);
        assert!((alpha.decayed().decayed().value - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_decay_is_clamped_to_one() {
        // Floor above the value lifts it, but never past 1
        let gamma = Decay::new(0.5, 1.0, 1.0);
        assert_eq!(gamma.decayed().value, 1.0);
    }

    #[test]
    fn test_decayed_keeps_schedule() {
        let epsilon = Decay::new(0.8, 0.9, 0.1);
        let next = epsilon.decayed();
        assert_eq!(next.decay, 0.9);
        assert_eq!(next.min, 0.1);
    }

    #[test]
    fn test_hyperparameters_decay_independently() {
        let params = Hyperparameters::new(
            Decay::new(1.0, 0.5, 0.0),
            Decay::constant(0.9),
            Decay::new(0.2, 0.1, 0.1),
        );
        let next = params.decayed();
        assert_eq!(next.alpha.value, 0.5);
        assert_eq!(next.gamma.value, 0.9);
        assert!((next.epsilon.value - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut params = Hyperparameters::default();
        assert!(params.validate().is_ok());

        params.alpha.value = 1.5;
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));

        let mut params = Hyperparameters::default();
        params.epsilon.decay = -0.1;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_display_lists_each_schedule() {
        let text = Hyperparameters::default().to_string();
        assert!(text.contains("alpha: 0.1, alpha_decay: 0.99999, alpha_min: 0.01"));
        assert!(text.contains("gamma: 1, gamma_decay: 1, gamma_min: 0"));
        assert!(text.contains("epsilon: 0, epsilon_decay: 1, epsilon_min: 0"));
    }
}
