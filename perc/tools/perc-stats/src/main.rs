#![forbid(unsafe_code)]

use std::{thread, time::Duration};

use clap::{Parser, ValueEnum};
use perc::{
    GridSnapshot, Observer, QuickFind, SelectionStrategy, Simulation, Stats, WeightedQuickUnion,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

////////////////////////////////////////////////////////////////////////////////

/// Estimates the percolation threshold of an n-by-n grid.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Grid side length
    n: usize,

    /// Number of independent trials
    t: usize,

    /// Base seed, makes the run reproducible
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = Strategy::Rejection)]
    strategy: Strategy,

    #[arg(long, value_enum, default_value_t = UnionFind::Weighted)]
    union_find: UnionFind,

    /// Run trials on all cores
    #[arg(long)]
    parallel: bool,

    /// Print every step of the first trial to stderr
    #[arg(long)]
    draw: bool,

    /// Pause between drawn steps, in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Strategy {
    Rejection,
    Shuffled,
}

impl From<Strategy> for SelectionStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Rejection => SelectionStrategy::Rejection,
            Strategy::Shuffled => SelectionStrategy::Shuffled,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum UnionFind {
    QuickFind,
    Weighted,
}

////////////////////////////////////////////////////////////////////////////////

struct TextRenderer {
    delay: Duration,
}

impl Observer for TextRenderer {
    fn on_trial_step(&mut self, snapshot: &GridSnapshot) {
        eprintln!("{snapshot}\n");
        thread::sleep(self.delay);
    }
}

fn report(stats: &Stats) {
    println!("mean                    = {}", stats.mean());
    match stats.stddev() {
        Some(stddev) => println!("stddev                  = {stddev}"),
        None => println!("stddev                  = undefined"),
    }
    match stats.confidence_interval() {
        Some((lo, hi)) => println!("95% confidence interval = [{lo}, {hi}]"),
        None => println!("95% confidence interval = undefined"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(n = args.n, t = args.t, "starting simulation");

    let mut simulation = Simulation::new(args.n, args.t)
        .strategy(args.strategy.into())
        .parallel(args.parallel);
    if let Some(seed) = args.seed {
        simulation = simulation.seed(seed);
    }

    let mut renderer = TextRenderer {
        delay: Duration::from_millis(args.delay_ms),
    };
    let observer: Option<&mut dyn Observer> = if args.draw {
        Some(&mut renderer)
    } else {
        None
    };

    let stats = match args.union_find {
        UnionFind::QuickFind => simulation.run_with::<QuickFind>(observer)?,
        UnionFind::Weighted => simulation.run_with::<WeightedQuickUnion>(observer)?,
    };
    report(&stats);

    Ok(())
}
