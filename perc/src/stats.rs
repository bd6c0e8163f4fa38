use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use crate::{
    error::{Error, Result},
    observer::Observer,
    trial::{run_trial, SelectionStrategy},
    union_find::{DisjointSet, WeightedQuickUnion},
};

////////////////////////////////////////////////////////////////////////////////

const CONFIDENCE_95: f64 = 1.96;

/// Open fractions collected over a run, in trial order.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    samples: Vec<f64>,
    mean: f64,
    stddev: Option<f64>,
}

impl Stats {
    /// # Errors
    ///
    /// [`Error::InvalidTrialCount`] if `samples` is empty.
    pub fn from_samples(samples: Vec<f64>) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::InvalidTrialCount(0));
        }

        let count = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / count;
        let stddev = if samples.len() > 1 {
            let squares = samples.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>();
            Some((squares / (count - 1.0)).sqrt())
        } else {
            None
        };

        Ok(Self {
            samples,
            mean,
            stddev,
        })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation. Undefined for a single trial.
    pub fn stddev(&self) -> Option<f64> {
        self.stddev
    }

    /// Bounds of the 95% confidence interval of the mean.
    pub fn confidence_interval(&self) -> Option<(f64, f64)> {
        let margin = CONFIDENCE_95 * self.stddev? / (self.len() as f64).sqrt();
        Some((self.mean - margin, self.mean + margin))
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Monte Carlo estimate of the percolation threshold of a square grid.
#[derive(Debug, Clone)]
pub struct Simulation {
    side: usize,
    trials: usize,
    seed: Option<u64>,
    strategy: SelectionStrategy,
    parallel: bool,
}

impl Simulation {
    pub fn new(side: usize, trials: usize) -> Self {
        Self {
            side,
            trials,
            seed: None,
            strategy: SelectionStrategy::default(),
            parallel: false,
        }
    }

    /// Makes the run reproducible: trial `i` draws from a generator seeded
    /// with `seed + i`, regardless of `parallel`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Runs every trial but the first on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn run(&self) -> Result<Stats> {
        self.run_with::<WeightedQuickUnion>(None)
    }

    /// Runs all trials with the given disjoint-set strategy. `observer`
    /// only watches the first trial, which always runs on the calling
    /// thread.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTrialCount`] if there are no trials,
    /// [`Error::InvalidSize`] if the side length is zero.
    pub fn run_with<U: DisjointSet>(&self, observer: Option<&mut dyn Observer>) -> Result<Stats> {
        if self.trials == 0 {
            return Err(Error::InvalidTrialCount(self.trials));
        }
        let base_seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());
        debug!(
            "running {} trials on a {}x{} grid ({:?}, seed {base_seed}, parallel: {})",
            self.trials, self.side, self.side, self.strategy, self.parallel,
        );

        let first = self.trial::<U>(base_seed, 0, observer)?;
        let rest = if self.parallel {
            (1..self.trials)
                .into_par_iter()
                .map(|i| self.trial::<U>(base_seed, i, None))
                .collect::<Result<Vec<_>>>()?
        } else {
            (1..self.trials)
                .map(|i| self.trial::<U>(base_seed, i, None))
                .collect::<Result<Vec<_>>>()?
        };

        let mut samples = Vec::with_capacity(self.trials);
        samples.push(first);
        samples.extend(rest);

        let stats = Stats::from_samples(samples)?;
        info!(
            "mean {:.6}, stddev {:?} over {} trials",
            stats.mean(),
            stats.stddev(),
            stats.len()
        );
        Ok(stats)
    }

    fn trial<U: DisjointSet>(
        &self,
        base_seed: u64,
        index: usize,
        observer: Option<&mut dyn Observer>,
    ) -> Result<f64> {
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(index as u64));
        run_trial::<U, _>(self.side, self.strategy, &mut rng, observer)
    }
}

////////////////////////////////////////////////////////////////////////////////
