//! Episode driver for taxi agents

use std::collections::VecDeque;

use serde::Serialize;

use crate::{
    Error, Result,
    ports::{Agent, Environment, Observer, Transition},
};

/// Training configuration
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub num_episodes: usize,

    /// Number of trailing episodes in the moving average
    pub window: usize,

    /// Random seed for the agent and the environment
    pub seed: Option<u64>,
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(Error::InvalidConfiguration {
                message: "moving-average window must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_episodes: 20_000,
            window: 100,
            seed: None,
        }
    }
}

/// Mean of the last `window` values
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window: usize,
    values: VecDeque<f64>,
    sum: f64,
}

impl MovingAverage {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            values: VecDeque::with_capacity(window),
            sum: 0.0,
        }
    }

    /// Add a value and return the average once the window is full
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.values.len() == self.window {
            if let Some(oldest) = self.values.pop_front() {
                self.sum -= oldest;
            }
        }
        self.values.push_back(value);
        self.sum += value;
        self.average()
    }

    /// `None` until `window` values have been pushed
    pub fn average(&self) -> Option<f64> {
        if self.window > 0 && self.values.len() == self.window {
            Some(self.sum / self.window as f64)
        } else {
            None
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize)]
pub struct TrainingResult {
    /// Episodes played
    pub episodes: usize,

    /// Environment steps over all episodes
    pub total_steps: usize,

    /// Best moving-average return seen, once the window filled
    pub best_average: Option<f64>,

    /// Moving-average return after the last episode
    pub final_average: Option<f64>,

    /// Mean return over all episodes
    pub mean_return: f64,
}

/// Result of running the greedy policy without learning
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    pub episodes: usize,
    pub total_steps: usize,
    pub mean_return: f64,
}

struct EpisodeSummary {
    episode_return: f64,
    steps: usize,
}

/// Training pipeline for a single agent in a single environment
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train the agent for the configured number of episodes
    ///
    /// Each episode runs until the environment reports `done`; the driver
    /// itself imposes no step limit.
    pub fn run(
        &mut self,
        env: &mut dyn Environment,
        agent: &mut dyn Agent,
    ) -> Result<TrainingResult> {
        self.config.validate()?;
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed);
            env.set_rng_seed(seed.wrapping_add(1));
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        let mut moving_average = MovingAverage::new(self.config.window);
        let mut best_average: Option<f64> = None;
        let mut total_steps = 0;
        let mut return_sum = 0.0;

        for episode in 0..self.config.num_episodes {
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }

            let summary = self.train_episode(episode, env, agent)?;
            total_steps += summary.steps;
            return_sum += summary.episode_return;

            let average = moving_average.push(summary.episode_return);
            tracing::debug!(
                episode,
                episode_return = summary.episode_return,
                steps = summary.steps,
                "episode finished"
            );
            if let Some(average) = average {
                if best_average.is_none_or(|best| average > best) {
                    tracing::info!(episode, average, "new best moving average");
                    best_average = Some(average);
                }
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode, summary.episode_return, average)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let episodes = self.config.num_episodes;
        Ok(TrainingResult {
            episodes,
            total_steps,
            best_average,
            final_average: moving_average.average(),
            mean_return: if episodes > 0 {
                return_sum / episodes as f64
            } else {
                0.0
            },
        })
    }

    /// Play `episodes` episodes with the agent's greedy policy, without learning
    pub fn evaluate(
        &self,
        env: &mut dyn Environment,
        agent: &dyn Agent,
        episodes: usize,
    ) -> Result<EvaluationResult> {
        if let Some(seed) = self.config.seed {
            env.set_rng_seed(seed.wrapping_add(2));
        }

        let mut total_steps = 0;
        let mut return_sum = 0.0;
        for _ in 0..episodes {
            let mut state = env.reset();
            loop {
                let outcome = env.step(agent.greedy_action(state)?)?;
                return_sum += outcome.reward;
                total_steps += 1;
                state = outcome.next_state;
                if outcome.done {
                    break;
                }
            }
        }

        Ok(EvaluationResult {
            episodes,
            total_steps,
            mean_return: if episodes > 0 {
                return_sum / episodes as f64
            } else {
                0.0
            },
        })
    }

    fn train_episode(
        &mut self,
        episode: usize,
        env: &mut dyn Environment,
        agent: &mut dyn Agent,
    ) -> Result<EpisodeSummary> {
        let mut state = env.reset();
        let mut episode_return = 0.0;
        let mut steps = 0;

        loop {
            let action = agent.select_action(state)?;
            let outcome = env.step(action)?;
            let transition = Transition::new(
                state,
                action,
                outcome.reward,
                outcome.next_state,
                outcome.done,
            );
            agent.step(&transition)?;

            for observer in &mut self.observers {
                observer.on_step(episode, steps, &transition)?;
            }

            episode_return += outcome.reward;
            steps += 1;
            state = outcome.next_state;
            if outcome.done {
                return Ok(EpisodeSummary {
                    episode_return,
                    steps,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        agents::DecomposedAgent,
        q_learning::Hyperparameters,
        taxi::TaxiEnv,
    };

    #[test]
    fn test_moving_average_fills_before_reporting() {
        let mut average = MovingAverage::new(3);
        assert_eq!(average.push(1.0), None);
        assert_eq!(average.push(2.0), None);
        assert_eq!(average.push(3.0), Some(2.0));
        assert_eq!(average.push(6.0), Some(11.0 / 3.0));
    }

    #[test]
    fn test_training_pipeline() {
        let config = TrainingConfig {
            num_episodes: 10,
            window: 5,
            seed: Some(42),
        };

        let mut pipeline = TrainingPipeline::new(config);
        assert_eq!(pipeline.config().num_episodes, 10);
        assert_eq!(pipeline.config().seed, Some(42));
        let mut env = TaxiEnv::new();
        let mut agent = DecomposedAgent::new(Hyperparameters::default()).unwrap();

        let result = pipeline.run(&mut env, &mut agent).unwrap();

        assert_eq!(result.episodes, 10);
        assert!(result.total_steps >= 10);
        assert!(result.best_average.is_some());
        assert!(result.best_average >= result.final_average);
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let config = TrainingConfig {
            num_episodes: 1,
            window: 0,
            seed: None,
        };
        let mut pipeline = TrainingPipeline::new(config);
        let mut env = TaxiEnv::new();
        let mut agent = DecomposedAgent::new(Hyperparameters::default()).unwrap();
        assert!(matches!(
            pipeline.run(&mut env, &mut agent),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
