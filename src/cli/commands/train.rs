//! Train command - Train a taxi agent and report its best moving average

use std::{
    fs::File,
    path::{MAIN_SEPARATOR, Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    app::{AgentConfig, AgentKind, create_agent},
    cli::output::{
        format_average, format_number, print_hyperparameters, print_kv, print_section,
        print_subsection,
    },
    pipeline::{EvaluationResult, ProgressObserver, TrainingConfig, TrainingPipeline, TrainingResult},
    q_learning::Decay,
    taxi::TaxiEnv,
};

#[derive(Parser, Debug)]
#[command(about = "Train an agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Type of agent to train (defaults to the config file's, else decomposed)
    #[arg(value_enum)]
    pub agent: Option<AgentKind>,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 20_000)]
    pub episodes: usize,

    /// Episodes in the moving-average window
    #[arg(long, short = 'w', default_value_t = 100)]
    pub window: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON agent configuration file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Initial learning rate
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Per-step learning rate decay
    #[arg(long)]
    pub alpha_decay: Option<f64>,

    /// Learning rate floor
    #[arg(long)]
    pub alpha_min: Option<f64>,

    /// Initial discount factor
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Per-step discount decay
    #[arg(long)]
    pub gamma_decay: Option<f64>,

    /// Discount floor
    #[arg(long)]
    pub gamma_min: Option<f64>,

    /// Initial exploration rate
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Per-step exploration decay
    #[arg(long)]
    pub epsilon_decay: Option<f64>,

    /// Exploration floor
    #[arg(long)]
    pub epsilon_min: Option<f64>,

    /// Navigator reward for reaching a pickup/dropoff square (decomposed agent)
    #[arg(long)]
    pub terminal_bonus: Option<f64>,

    /// Navigator reward per move (decomposed agent)
    #[arg(long)]
    pub step_cost: Option<f64>,

    /// Greedy evaluation episodes to run after training
    #[arg(long, default_value_t = 0)]
    pub eval_episodes: usize,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

/// What a training run produced
#[derive(Debug, Clone, Serialize)]
pub struct TrainOutcome {
    pub config: AgentConfig,
    pub training: TrainingResult,
    pub evaluation: Option<EvaluationResult>,
}

/// Directory targets get a default file name, anything else a `.json` extension
fn summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    if raw.as_os_str().to_string_lossy().ends_with(MAIN_SEPARATOR)
        || normalized.file_name().is_none()
    {
        normalized.push("training_summary.json");
        return normalized;
    }
    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

fn write_summary(raw: &Path, outcome: &TrainOutcome) -> Result<PathBuf> {
    let path = summary_path(raw);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, outcome).context("Failed to write summary")?;
    Ok(path)
}

fn override_decay(decay: &mut Decay, value: Option<f64>, rate: Option<f64>, min: Option<f64>) {
    if let Some(value) = value {
        decay.value = value;
    }
    if let Some(rate) = rate {
        decay.decay = rate;
    }
    if let Some(min) = min {
        decay.min = min;
    }
}

/// Resolve the agent configuration: CLI flags over config file over defaults
pub fn resolve_config(args: &TrainArgs) -> Result<AgentConfig> {
    let mut config = match &args.config {
        Some(path) => AgentConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AgentConfig::default(),
    };

    // Explicit hyperparameters from the file survive a kind override
    if let Some(kind) = args.agent {
        config.kind = kind;
    }

    let mut hyperparameters = config.hyperparameters();
    override_decay(
        &mut hyperparameters.alpha,
        args.alpha,
        args.alpha_decay,
        args.alpha_min,
    );
    override_decay(
        &mut hyperparameters.gamma,
        args.gamma,
        args.gamma_decay,
        args.gamma_min,
    );
    override_decay(
        &mut hyperparameters.epsilon,
        args.epsilon,
        args.epsilon_decay,
        args.epsilon_min,
    );
    config.hyperparameters = Some(hyperparameters);

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(bonus) = args.terminal_bonus {
        config.terminal_bonus = bonus;
    }
    if let Some(cost) = args.step_cost {
        config.step_cost = cost;
    }

    config.validate().context("Invalid agent configuration")?;
    Ok(config)
}

/// Train an agent built from an already resolved `config`, without printing
pub fn run(args: &TrainArgs, config: AgentConfig) -> Result<TrainOutcome> {
    let mut agent = create_agent(&config).context("Failed to create agent")?;
    let mut env = TaxiEnv::new();

    let training_config = TrainingConfig {
        num_episodes: args.episodes,
        window: args.window,
        seed: config.seed,
    };
    let mut pipeline = TrainingPipeline::new(training_config);
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let training = pipeline
        .run(&mut env, agent.as_mut())
        .context("Training failed")?;

    let evaluation = if args.eval_episodes > 0 {
        Some(
            pipeline
                .evaluate(&mut env, agent.as_ref(), args.eval_episodes)
                .context("Evaluation failed")?,
        )
    } else {
        None
    };

    let outcome = TrainOutcome {
        config,
        training,
        evaluation,
    };
    if let Some(raw) = &args.summary {
        let path = write_summary(raw, &outcome)?;
        tracing::info!(path = %path.display(), "wrote training summary");
    }
    Ok(outcome)
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    print_section(&format!("Training {} agent", config.kind));
    print_kv("Episodes", &format_number(args.episodes));
    print_kv("Window", &format_number(args.window));
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }
    if config.kind == AgentKind::Decomposed {
        print_kv("Terminal bonus", &config.terminal_bonus.to_string());
        print_kv("Step cost", &config.step_cost.to_string());
    }
    print_subsection("Hyperparameters");
    print_hyperparameters(&config.hyperparameters());

    let outcome = run(&args, config)?;

    print_subsection("Results");
    print_kv("Total steps", &format_number(outcome.training.total_steps));
    print_kv("Mean return", &format!("{:.2}", outcome.training.mean_return));
    print_kv(
        "Final average",
        &format_average(outcome.training.final_average),
    );
    print_kv("Best average", &format_average(outcome.training.best_average));

    if let Some(evaluation) = &outcome.evaluation {
        print_subsection("Greedy evaluation");
        print_kv("Episodes", &format_number(evaluation.episodes));
        print_kv("Mean return", &format!("{:.2}", evaluation.mean_return));
        print_kv(
            "Mean length",
            &format!(
                "{:.2}",
                evaluation.total_steps as f64 / evaluation.episodes as f64
            ),
        );
    }

    if let Some(raw) = &args.summary {
        println!("\nSummary written to {}", summary_path(raw).display());
    }

    Ok(())
}
