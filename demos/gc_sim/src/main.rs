use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use marksweep::{Config, GcError, ProgramState, SweepPolicy};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Policy {
    /// Only report which chunks are garbage.
    Report,
    /// Free garbage chunks and compact the heap.
    Reclaim,
}

impl From<Policy> for SweepPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Report => SweepPolicy::Report,
            Policy::Reclaim => SweepPolicy::Reclaim,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Scenario {
    /// Three rooted chunks in a chain plus an unrooted two-chunk cycle.
    Drawing,
    /// A cycle through rooted chunks, a nulled helper root, and an unrooted cycle.
    Cycle,
}

/// Builds a small program, then runs one mark and sweep collection over it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(long, value_enum, default_value_t = Policy::Report)]
    policy: Policy,

    #[arg(long, value_enum, default_value_t = Scenario::Drawing)]
    scenario: Scenario,

    /// Maximum number of chunks on the heap.
    #[arg(long)]
    heap_capacity: Option<usize>,

    /// Maximum number of variables on the stack.
    #[arg(long)]
    stack_capacity: Option<usize>,
}

fn build_drawing(state: &mut ProgramState) -> Result<(), GcError> {
    state.mutate(|mu| -> Result<(), GcError> {
        let alpha = mu.alloc("alpha")?;
        mu.set_var("a", Some(alpha))?;

        let beta = mu.alloc("beta")?;
        mu.set_var("b", Some(beta))?;
        mu.append_reference(alpha, beta)?;

        let gamma = mu.alloc("gamma")?;
        mu.set_var("c", Some(gamma))?;
        mu.append_reference(beta, gamma)?;

        let delta = mu.alloc("delta")?;
        mu.append_reference(gamma, delta)?;

        let left = mu.alloc("cycle_left")?;
        let right = mu.alloc("cycle_right")?;
        mu.append_reference(left, right)?;
        mu.append_reference(right, left)?;

        Ok(())
    })
}

fn build_cycle(state: &mut ProgramState) -> Result<(), GcError> {
    state.mutate(|mu| -> Result<(), GcError> {
        let alpha = mu.alloc_with_capacity("alpha", 2)?;
        let beta = mu.alloc_with_capacity("beta", 2)?;
        let gamma = mu.alloc_with_capacity("gamma", 2)?;
        let delta = mu.alloc_with_capacity("delta", 1)?;
        let cycle1 = mu.alloc_with_capacity("cycle1", 1)?;
        let cycle2 = mu.alloc_with_capacity("cycle2", 1)?;

        mu.set_var("rootA", Some(alpha))?;
        mu.set_var("rootB", Some(beta))?;
        mu.set_var("helper", Some(gamma))?;

        mu.connect(alpha, 0, Some(beta))?;
        mu.connect(beta, 0, Some(delta))?;
        mu.connect(beta, 1, Some(gamma))?;
        mu.connect(gamma, 0, Some(alpha))?;
        mu.connect(delta, 0, Some(gamma))?;

        mu.connect(cycle1, 0, Some(cycle2))?;
        mu.connect(cycle2, 0, Some(cycle1))?;

        mu.set_var("helper", None)
    })
}

fn main() -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_env("GC_SIM_LOG");
    builder.format_timestamp(None);
    builder.init();

    let args = Args::parse();

    let defaults = Config::default();
    let config = Config {
        heap_capacity: args.heap_capacity.or(defaults.heap_capacity),
        stack_capacity: args.stack_capacity.or(defaults.stack_capacity),
        sweep_policy: args.policy.into(),
    };

    let mut state = ProgramState::new(config);

    match args.scenario {
        Scenario::Drawing => build_drawing(&mut state),
        Scenario::Cycle => build_cycle(&mut state),
    }
    .with_context(|| format!("failed to build the {:?} scenario", args.scenario))?;

    println!("Initial program state:");
    println!("{}", state);

    info!("running {:?} collection", config.sweep_policy);
    println!("Running mark-and-sweep garbage collector...");
    let collection = state.collect();
    println!("{}", collection);

    println!("Program state after GC:");
    println!("{}", state);

    let metrics = state.metrics();
    info!(
        "marked: {}, freed: {}, heap size: {}",
        metrics.last_marked, metrics.last_freed, metrics.heap_size
    );

    Ok(())
}
