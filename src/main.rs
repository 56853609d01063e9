use std::fs;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use log::info;
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;

use u_tick::models::SimParams;
use u_tick::models::WorkloadConfig;
use u_tick::models::MAX_PRIORITY;
use u_tick::scheduler::Policy;
use u_tick::scheduler::Simulator;
use u_tick::scheduler::SweepConfig;
use u_tick::validation::validate_workload;

/// u-tick: discrete-tick scheduling simulator
///
/// Simulates one processor servicing a set of tasks under strict priority
/// scheduling (round-robin inside a priority level) and FIFO round-robin,
/// and prints the execution timeline with downtime and utilization.
///
/// Without --workload or --random the built-in six-task dataset is used.
#[derive(Debug, Parser)]
struct Opts {
    /// JSON workload file ({"input_time", "tick_length", "tasks": [{"priority", "periods"}]}).
    #[clap(short = 'w', long, conflicts_with = "random")]
    workload: Option<PathBuf>,

    /// Generate this many random tasks instead of loading a workload.
    #[clap(short = 'r', long)]
    random: Option<usize>,

    /// Seed for --random.
    #[clap(long, default_value = "0")]
    seed: u64,

    /// Highest priority drawn by --random.
    #[clap(long, default_value = "3")]
    max_priority: u8,

    /// Override the input time between processing periods.
    #[clap(short = 'i', long)]
    input_time: Option<u32>,

    /// Override the processing units per tick.
    #[clap(short = 't', long)]
    tick_length: Option<u32>,

    /// Enable verbose output. Specify multiple times to increase verbosity.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the workload configuration as JSON.
    Show,
    /// Simulate and print the execution timeline.
    Run {
        /// Policy to simulate.
        #[clap(short = 'p', long, value_enum, default_value = "both")]
        policy: PolicyArg,
    },
    /// Print utilization and downtime over a tick length x input time grid.
    Sweep {
        /// Smallest tick length.
        #[clap(long, default_value = "1")]
        min_tick: u32,
        /// Largest tick length.
        #[clap(long, default_value = "10")]
        max_tick: u32,
        /// Smallest input time.
        #[clap(long, default_value = "0")]
        min_input: u32,
        /// Largest input time.
        #[clap(long, default_value = "9")]
        max_input: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Priority,
    Fifo,
    Both,
}

fn load_config(opts: &Opts) -> Result<WorkloadConfig> {
    let mut config = if let Some(path) = &opts.workload {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read workload {}", path.display()))?;
        WorkloadConfig::from_json(&text)
            .with_context(|| format!("Failed to parse workload {}", path.display()))?
    } else if let Some(count) = opts.random {
        let mut rng = StdRng::seed_from_u64(opts.seed);
        let max_priority = opts.max_priority.min(MAX_PRIORITY);
        WorkloadConfig::random(SimParams::default(), count, max_priority, &mut rng)
    } else {
        WorkloadConfig::default_dataset()
    };

    if let Some(input_time) = opts.input_time {
        config.params.input_time = input_time;
    }
    if let Some(tick_length) = opts.tick_length {
        config.params.tick_length = tick_length;
    }

    if let Err(errors) = validate_workload(&config) {
        for error in &errors {
            warn!("{error}");
        }
        bail!("Invalid workload: {} problem(s)", errors.len());
    }
    if config.tasks.is_empty() {
        warn!("Workload has no tasks; timelines will be empty");
    }
    Ok(config)
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let llv = match opts.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let config = load_config(&opts)?;
    info!(
        "Loaded {} task(s), total work {} unit(s)",
        config.tasks.len(),
        config.total_work()
    );
    let mut sim = Simulator::from_config(&config);

    match opts.command {
        Command::Show => {
            println!("{}", config.to_json().context("Failed to serialize workload")?);
        }
        Command::Run { policy } => {
            let policies: &[Policy] = match policy {
                PolicyArg::Priority => &[Policy::Priority],
                PolicyArg::Fifo => &[Policy::Fifo],
                PolicyArg::Both => &[Policy::Priority, Policy::Fifo],
            };
            for &policy in policies {
                let report = sim
                    .run(policy, &config.params)
                    .with_context(|| format!("{policy} run failed"))?;
                println!("{}\n", report.render());
            }
        }
        Command::Sweep {
            min_tick,
            max_tick,
            min_input,
            max_input,
        } => {
            if min_tick == 0 || min_tick > max_tick || min_input > max_input {
                bail!("Empty or invalid sweep ranges");
            }
            let sweep = SweepConfig::new(min_tick..=max_tick, min_input..=max_input);
            let report = sim.sweep(&sweep).context("Sweep failed")?;
            print!("{report}");
        }
    }

    Ok(())
}
