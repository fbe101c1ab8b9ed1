use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::config::{Config, DelayOrder};
use crate::report::RunReport;
use crate::scenario::{self, Scenario};
use crate::scheduler::{realtime, VirtualScheduler};
use crate::simulator::{CaptureSimulator, ExecutionLog};
use crate::types::BindingPolicy;

#[derive(Parser)]
#[command(name = "capturelab")]
#[command(about = "capturelab - Loop variable capture under deferred execution", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter (overrides RUST_LOG and config file)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output flags shared by every command that produces a log
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Wait out the real delays instead of advancing a virtual clock
    #[arg(long)]
    pub realtime: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single capture loop
    Run {
        /// Number of loop iterations (default from config)
        #[arg(short = 'n', long)]
        iterations: Option<i64>,

        /// Binding policy: shared, per-iteration, argument-copy
        #[arg(short = 'p', long)]
        policy: Option<BindingPolicy>,

        /// Base delay in milliseconds
        #[arg(short = 'd', long = "delay-ms")]
        delay_ms: Option<u64>,

        /// Delay layout across iterations
        #[arg(long, value_enum)]
        order: Option<DelayOrder>,

        /// Per-iteration delay step for ascending/descending orders
        #[arg(long = "step-ms")]
        step_ms: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run a built-in demonstration scenario
    Demo {
        /// Scenario name (see `list`)
        name: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run a scenario loaded from a TOML file
    Scenario {
        /// Path to the scenario file
        path: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List built-in scenarios
    List,
}

/// Run the CLI by parsing process arguments
pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli).await
}

/// Run the CLI with provided arguments
pub async fn run_cli_from_args(args: Vec<String>) -> Result<()> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli).await
}

/// Install the stderr tracing subscriber
///
/// Precedence: `--log-level`, then `RUST_LOG`, then the config file.
pub fn init_logging(cli_level: Option<&str>, config: &Config) {
    use tracing_subscriber::EnvFilter;

    let filter = match cli_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
    };

    // A subscriber may already be installed by an embedding application
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run_cli_with_args(cli: Cli) -> Result<()> {
    // Load and validate configuration before executing any command
    let config = Config::builder().config_path(cli.config.clone()).build()?;
    init_logging(cli.log_level.as_deref(), &config);

    match cli.command {
        Commands::Run {
            iterations,
            policy,
            delay_ms,
            order,
            step_ms,
            output,
        } => {
            let mut simulation = config.simulation.clone();
            if let Some(iterations) = iterations {
                simulation.iterations = iterations;
            }
            if let Some(policy) = policy {
                simulation.policy = policy;
            }
            if let Some(delay_ms) = delay_ms {
                simulation.delay_ms = delay_ms;
            }
            if let Some(order) = order {
                simulation.order = order;
            }
            if let Some(step_ms) = step_ms {
                simulation.step_ms = step_ms;
            }

            let started_at = Utc::now();
            let mut scheduler = VirtualScheduler::new();
            let log = CaptureSimulator::new().run(
                &mut scheduler,
                simulation.iterations,
                simulation.policy,
                simulation.delay_plan(),
            )?;

            drain(&mut scheduler, output.realtime).await;

            let name = format!("run {} x{}", simulation.policy, simulation.iterations);
            print_report(&RunReport::new(name, started_at, &log), output.json)?;
        }

        Commands::Demo { name, output } => {
            let scenario = scenario::builtin(&name)?;
            run_scenario(&scenario, &output).await?;
        }

        Commands::Scenario { path, output } => {
            let scenario = Scenario::from_file(&path)
                .with_context(|| format!("Failed to load scenario {}", path.display()))?;
            run_scenario(&scenario, &output).await?;
        }

        Commands::List => {
            let scenarios = scenario::catalogue();
            println!("Found {} scenario(s):\n", scenarios.len());

            for scenario in scenarios {
                println!("{:<18} {}", scenario.name, scenario.description);
                for spec in &scenario.loops {
                    println!(
                        "  - {:<18} {:>3} x {:<14} {}",
                        spec.label, spec.iterations, spec.policy, spec.delays
                    );
                }
            }
        }
    }

    Ok(())
}

async fn run_scenario(scenario: &Scenario, output: &OutputArgs) -> Result<ExecutionLog> {
    let started_at = Utc::now();
    let mut scheduler = VirtualScheduler::new();
    let log = scenario.run(&mut scheduler)?;

    drain(&mut scheduler, output.realtime).await;

    print_report(&RunReport::new(&scenario.name, started_at, &log), output.json)?;
    Ok(log)
}

async fn drain(scheduler: &mut VirtualScheduler, realtime: bool) {
    let fired = if realtime {
        realtime::run_realtime(scheduler).await
    } else {
        scheduler.run_until_idle()
    };
    info!(fired, realtime, "Scheduler drained");
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
