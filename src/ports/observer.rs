//! Observer port - abstraction for training observation
//!
//! This port defines the interface for observing training events,
//! so progress reporting and metrics stay out of the episode loop.

use crate::{Result, ports::Transition};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(episode, step, transition)` - For each transition
///    - `on_episode_end(episode, episode_return, moving_average)`
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use taxi_decomp::ports::Observer;
///
/// struct EpisodeCounter {
///     episodes: usize,
/// }
///
/// impl Observer for EpisodeCounter {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         _episode_return: f64,
///         _moving_average: Option<f64>,
///     ) -> taxi_decomp::Result<()> {
///         self.episodes += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after the agent has learned from a transition.
    fn on_step(&mut self, _episode: usize, _step: usize, _transition: &Transition) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends.
    ///
    /// `moving_average` is `None` until the averaging window is full.
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _episode_return: f64,
        _moving_average: Option<f64>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
