//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! the episode loop to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Result, ports::Observer};

/// Progress bar observer - Shows training progress and the moving average
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    best_average: Option<f64>,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            best_average: None,
        }
    }

    fn message(&self, average: Option<f64>) -> String {
        match (average, self.best_average) {
            (Some(average), Some(best)) => format!("avg {average:.2}, best {best:.2}"),
            _ => "filling window".to_string(),
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        _episode_return: f64,
        moving_average: Option<f64>,
    ) -> Result<()> {
        if let Some(average) = moving_average {
            self.best_average = Some(self.best_average.map_or(average, |best| best.max(average)));
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message(moving_average));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message(self.best_average));
        }
        Ok(())
    }
}

/// Metrics observer - Tracks per-episode returns and lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    returns: Vec<f64>,
    lengths: Vec<usize>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returns(&self) -> &[f64] {
        &self.returns
    }

    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Get mean return over all episodes
    pub fn mean_return(&self) -> f64 {
        if self.returns.is_empty() {
            0.0
        } else {
            self.returns.iter().sum::<f64>() / self.returns.len() as f64
        }
    }

    /// Get average episode length
    pub fn avg_episode_length(&self) -> f64 {
        if self.lengths.is_empty() {
            0.0
        } else {
            self.lengths.iter().sum::<usize>() as f64 / self.lengths.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            episodes: self.returns.len(),
            total_steps: self.lengths.iter().sum(),
            mean_return: self.mean_return(),
            avg_episode_length: self.avg_episode_length(),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub total_steps: usize,
    pub mean_return: f64,
    pub avg_episode_length: f64,
}

impl Observer for MetricsObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.lengths.push(0);
        Ok(())
    }

    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        _transition: &crate::ports::Transition,
    ) -> Result<()> {
        if let Some(last) = self.lengths.last_mut() {
            *last += 1;
        }
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        _episode: usize,
        episode_return: f64,
        _moving_average: Option<f64>,
    ) -> Result<()> {
        self.returns.push(episode_return);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Transition;

    #[test]
    fn test_metrics_observer_counts_steps() {
        let mut metrics = MetricsObserver::new();
        let transition = Transition::new(0, 0, -1.0, 1, false);

        metrics.on_episode_start(0).unwrap();
        metrics.on_step(0, 0, &transition).unwrap();
        metrics.on_step(0, 1, &transition).unwrap();
        metrics.on_episode_end(0, -2.0, None).unwrap();

        metrics.on_episode_start(1).unwrap();
        metrics.on_step(1, 0, &transition).unwrap();
        metrics.on_episode_end(1, 4.0, None).unwrap();

        assert_eq!(metrics.returns(), &[-2.0, 4.0]);
        assert_eq!(metrics.lengths(), &[2, 1]);

        let summary = metrics.summary();
        assert_eq!(summary.episodes, 2);
        assert_eq!(summary.total_steps, 3);
        assert_eq!(summary.mean_return, 1.0);
        assert_eq!(summary.avg_episode_length, 1.5);
    }

    #[test]
    fn test_progress_observer_tracks_best_average() {
        let mut progress = ProgressObserver::new();
        progress.on_episode_end(0, 1.0, None).unwrap();
        assert_eq!(progress.best_average, None);
        progress.on_episode_end(1, 1.0, Some(-3.0)).unwrap();
        progress.on_episode_end(2, 1.0, Some(-5.0)).unwrap();
        assert_eq!(progress.best_average, Some(-3.0));
    }
}
