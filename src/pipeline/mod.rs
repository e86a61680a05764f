//! Training and evaluation pipeline
//!
//! This module provides the episode driver that connects an
//! [`Environment`](crate::ports::Environment) to an
//! [`Agent`](crate::ports::Agent), plus observers for progress and metrics.

pub mod observers;
pub mod training;

// Re-export observer implementations (adapters)
pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver};
pub use training::{
    EvaluationResult, MovingAverage, TrainingConfig, TrainingPipeline, TrainingResult,
};

pub use crate::ports::{Agent, Environment, Observer};
