use std::time::Duration;
use clap::Args;
use anyhow::Result;
use anyhow::bail;
use log::debug;

use raf_algorithms::{HeuristicParams, RafAlgorithm, MIN_RAF_GENERATING_ELEMENT, clock_seed};

/// Parameters of the randomized searches.
#[derive(Debug, Args)]
pub struct HeuristicArguments {
    /// Number of random reaction orderings to try (must be > 0).
    #[arg(long, default_value_t = 10)]
    pub trials: usize,

    /// Base random seed; trial i uses seed + i. Defaults to the clock.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target molecule of a generating-element search (repeatable).
    #[arg(long = "target", value_name = "MOLECULE")]
    pub targets: Vec<String>,
}

impl HeuristicArguments {
    /// Validate that all parameters make sense for `algorithm`.
    pub fn validate(&self, algorithm: &dyn RafAlgorithm) -> Result<()> {
        if self.trials == 0 {
            bail!("trials must be > 0");
        }
        if algorithm.name() == MIN_RAF_GENERATING_ELEMENT && self.targets.is_empty() {
            bail!("\"{}\" needs at least one --target", MIN_RAF_GENERATING_ELEMENT);
        }
        Ok(())
    }

    pub fn params(&self) -> HeuristicParams {
        let seed = self.seed.unwrap_or_else(clock_seed);
        debug!("Heuristic seed: {}", seed);
        HeuristicParams {
            trials: self.trials,
            targets: self.targets.clone(),
            ..HeuristicParams::with_seed(seed)
        }
    }
}

/// Parallelism and time budget.
#[derive(Debug, Args)]
pub struct RuntimeArguments {
    /// Number of worker threads (0 = one per core).
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Cancel the computation after this many seconds.
    #[arg(long, value_name = "SECONDS")]
    pub time_limit: Option<f64>,
}

impl RuntimeArguments {
    pub fn validate(&self) -> Result<()> {
        if let Some(t) = self.time_limit {
            if !(t > 0.0 && t.is_finite()) {
                bail!("time-limit must be a positive number of seconds (got {})", t);
            }
        }
        Ok(())
    }

    /// Configures the global rayon pool; call once, before any algorithm.
    pub fn init_thread_pool(&self) -> Result<()> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build_global()?;
        Ok(())
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit.map(Duration::from_secs_f64)
    }
}
