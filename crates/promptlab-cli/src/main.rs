//! promptlab - LLM generation-parameter sweep lab CLI
//!
//! The `promptlab` command runs temperature/top-p grid sweeps for a
//! prompt, scores every response, and keeps a ranked history on disk.
//!
//! ## Commands
//!
//! - `create`: run a sweep for a prompt and store the ranked result
//! - `list`: show stored experiments, newest first
//! - `show`: print one experiment with its ranked responses
//! - `delete`: remove an experiment by id

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use uuid::Uuid;

use promptlab_core::{
    Experiment, ExperimentService, JsonExperimentStore, OfflineCompletionProvider, RangeSpec,
    SweepRequest,
};

#[derive(Parser)]
#[command(name = "promptlab")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "LLM generation-parameter sweep lab", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Data directory holding experiments.json
    #[arg(
        long,
        global = true,
        env = "PROMPTLAB_DATA_DIR",
        default_value = ".promptlab"
    )]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a parameter sweep for a prompt and store the ranked result
    Create {
        /// Prompt to sweep
        prompt: String,

        #[command(flatten)]
        grid: GridArgs,

        /// Responses per (temperature, top_p) cell (clamped to 1..=4)
        #[arg(long, default_value = "2")]
        variants: u32,

        /// Completion token cap (clamped to 120..=800)
        #[arg(long, default_value = "400")]
        max_tokens: u32,

        /// Seed for the offline completion generator
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Concurrent provider calls
        #[arg(long, default_value = "4")]
        concurrency: usize,
    },

    /// List stored experiments, newest first
    List,

    /// Show one experiment with its ranked responses
    Show {
        /// Experiment id
        id: Uuid,

        /// Print the raw experiment JSON instead of the rendered view
        #[arg(long)]
        raw: bool,
    },

    /// Delete an experiment (unknown ids are ignored)
    Delete {
        /// Experiment id
        id: Uuid,
    },
}

#[derive(Args)]
struct GridArgs {
    /// Temperature range start
    #[arg(long, default_value = "0.2")]
    temp_min: f64,

    /// Temperature range end
    #[arg(long, default_value = "0.8")]
    temp_max: f64,

    /// Temperature range step
    #[arg(long, default_value = "0.3")]
    temp_step: f64,

    /// Top-p range start
    #[arg(long, default_value = "0.7")]
    top_p_min: f64,

    /// Top-p range end
    #[arg(long, default_value = "1.0")]
    top_p_max: f64,

    /// Top-p range step
    #[arg(long, default_value = "0.15")]
    top_p_step: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    promptlab_core::init_tracing(cli.json, level);

    let store = Arc::new(JsonExperimentStore::new(&cli.data_dir));

    match cli.command {
        Commands::Create {
            prompt,
            grid,
            variants,
            max_tokens,
            seed,
            concurrency,
        } => cmd_create(store, &prompt, &grid, variants, max_tokens, seed, concurrency).await,
        Commands::List => cmd_list(store).await,
        Commands::Show { id, raw } => cmd_show(store, id, raw).await,
        Commands::Delete { id } => cmd_delete(store, id).await,
    }
}

fn open_service(
    store: Arc<JsonExperimentStore>,
    seed: u64,
    concurrency: usize,
) -> ExperimentService {
    let provider = Arc::new(OfflineCompletionProvider::new(seed));
    ExperimentService::new(store, provider).with_concurrency(concurrency)
}

/// Run a sweep and print the ranked outcome
async fn cmd_create(
    store: Arc<JsonExperimentStore>,
    prompt: &str,
    grid: &GridArgs,
    variants: u32,
    max_tokens: u32,
    seed: u64,
    concurrency: usize,
) -> Result<()> {
    let service = open_service(store, seed, concurrency);

    let request = SweepRequest {
        prompt: prompt.to_string(),
        temperature_range: RangeSpec::new(grid.temp_min, grid.temp_max, grid.temp_step),
        top_p_range: RangeSpec::new(grid.top_p_min, grid.top_p_max, grid.top_p_step),
        variants_per_combo: variants,
        max_tokens,
    };

    info!("Running parameter sweep");
    let experiment = service.create(request).await.context("Sweep failed")?;

    println!("Experiment {}", experiment.id);
    println!("  {}", experiment.summary);
    println!(
        "  Grid: {} temperatures x {} top_p values x {} variants = {} responses",
        experiment.temperatures.len(),
        experiment.top_ps.len(),
        experiment.variants_per_combo,
        experiment.responses.len()
    );
    for (rank, variant) in experiment.responses.iter().take(3).enumerate() {
        println!(
            "  #{} [{:.3}] T={:.2} top_p={:.2}  {}",
            rank + 1,
            variant.metrics.overall,
            variant.parameters.temperature,
            variant.parameters.top_p,
            variant.analysis
        );
    }

    Ok(())
}

/// List stored experiments, newest first
async fn cmd_list(store: Arc<JsonExperimentStore>) -> Result<()> {
    let service = open_service(store, 0, 1);
    let experiments = service.list().await?;

    if experiments.is_empty() {
        println!("No experiments stored yet");
        return Ok(());
    }

    println!("{} experiment(s):", experiments.len());
    for experiment in &experiments {
        println!(
            "  {}  {}  \"{}\"  ({} responses)",
            experiment.id,
            experiment.created_at.format("%Y-%m-%d %H:%M:%S"),
            truncate(&experiment.prompt, 48),
            experiment.responses.len()
        );
        println!("      {}", experiment.summary);
    }

    Ok(())
}

/// Print one experiment with its ranked responses
async fn cmd_show(store: Arc<JsonExperimentStore>, id: Uuid, raw: bool) -> Result<()> {
    let service = open_service(store, 0, 1);
    let experiment = match service.get(id).await? {
        Some(experiment) => experiment,
        None => bail!("no experiment with id {id}"),
    };

    if raw {
        println!("{}", serde_json::to_string_pretty(&experiment)?);
        return Ok(());
    }

    print_experiment(&experiment);
    Ok(())
}

/// Delete an experiment by id
async fn cmd_delete(store: Arc<JsonExperimentStore>, id: Uuid) -> Result<()> {
    let service = open_service(store, 0, 1);
    service.delete(id).await?;
    println!("Deleted experiment {id}");
    Ok(())
}

fn print_experiment(experiment: &Experiment) {
    println!("Experiment {}", experiment.id);
    println!("  Created:  {}", experiment.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Prompt:   {}", experiment.prompt);
    println!("  Summary:  {}", experiment.summary);
    println!(
        "  Grid:     T {:?} x top_p {:?}, {} variant(s) per cell, max_tokens {}",
        experiment.temperatures,
        experiment.top_ps,
        experiment.variants_per_combo,
        experiment.max_tokens
    );
    println!();

    for (rank, variant) in experiment.responses.iter().enumerate() {
        println!(
            "  #{} [{:.3}] T={:.2} top_p={:.2} read {:.1}s  {}",
            rank + 1,
            variant.metrics.overall,
            variant.parameters.temperature,
            variant.parameters.top_p,
            variant.metrics.reading_time_seconds,
            variant.analysis
        );
    }

    if let Some(best) = experiment.responses.first() {
        println!();
        println!("Best response ({}):", best.id);
        for line in best.text.lines() {
            println!("  {line}");
        }
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let head: String = text.chars().take(limit.saturating_sub(3)).collect();
    format!("{head}...")
}
