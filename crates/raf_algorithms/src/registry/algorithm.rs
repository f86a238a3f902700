use std::time::{SystemTime, UNIX_EPOCH};
use serde::{Serialize, Deserialize};
use raf_model::{MoleculeSet, MoleculeType, ReactionSystem};

use crate::{Canceled, Progress};

/// Tunables of the randomized algorithms. Exact algorithms ignore them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicParams {
    /// Number of random orderings to try.
    pub trials: usize,
    /// Base seed. Trial `i` uses `seed + i`.
    pub seed: u64,
    /// Molecules a generating-element search must keep reachable.
    pub targets: Vec<String>,
}

impl Default for HeuristicParams {
    fn default() -> Self {
        Self {
            trials: 10,
            seed: clock_seed(),
            targets: Vec::new(),
        }
    }
}

impl HeuristicParams {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Default::default() }
    }

    /// One seed per trial.
    pub fn seeds(&self) -> Vec<u64> {
        self.derived_seeds(self.trials)
    }

    /// `n` seeds derived from the base seed.
    pub fn derived_seeds(&self, n: usize) -> Vec<u64> {
        (0..n as u64).map(|i| self.seed.wrapping_add(i)).collect()
    }

    pub fn target_set(&self) -> MoleculeSet {
        self.targets.iter().map(|t| MoleculeType::new(t)).collect()
    }
}

/// Wall-clock nanoseconds, the default seed source.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// The systems an algorithm produced.
///
/// Exact algorithms produce exactly one system. Heuristics may produce
/// several equally good ones; `partial` is set when a heuristic was
/// canceled and these are only the best found so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmOutput {
    pub systems: Vec<ReactionSystem>,
    pub partial: bool,
}

impl AlgorithmOutput {
    pub fn complete(system: ReactionSystem) -> Self {
        Self { systems: vec![system], partial: false }
    }

    /// Canceled before anything was found.
    pub fn canceled() -> Self {
        Self { systems: Vec::new(), partial: true }
    }
}

/// One algorithm of the registry.
pub trait RafAlgorithm: Send + Sync {

    /// Display name, also the registry key.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Heuristics return partial results on cancellation instead of
    /// [`Canceled`].
    fn is_heuristic(&self) -> bool {
        false
    }

    fn apply(&self, input: &ReactionSystem, params: &HeuristicParams, progress: &dyn Progress)
        -> Result<AlgorithmOutput, Canceled>;
}
