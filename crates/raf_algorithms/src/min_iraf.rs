use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use raf_model::{MoleculeSet, ReactionRef, ReactionSet, ReactionSystem};

use crate::{AlgorithmOutput, Progress, Nested, max_raf, max_raf_core};
use crate::closure::result_system;

pub const MIN_IRAF: &str = "Min iRAF Heuristic";

/// Searches for small irreducible RAFs by random-order removal.
///
/// Starting from the maximal RAF, each seed shuffles its reactions and
/// walks them, dropping a reaction whenever the maximal RAF of the
/// remainder is still non-empty. All distinct smallest results across the
/// seeds are returned, ordered by reaction names.
///
/// This is a heuristic: the results are locally minimal, not guaranteed
/// to be the globally smallest irreducible RAFs. On cancellation the best
/// sets found so far are returned and the output is marked partial.
/// Without seeds no trial runs and the maximal RAF itself is returned.
pub fn min_iraf(input: &ReactionSystem, seeds: &[u64], progress: &dyn Progress) -> AlgorithmOutput {
    progress.set_tasks(MIN_IRAF, input.name());
    let Ok(raf) = max_raf(input, &Nested::new(progress)) else {
        warn!("{}: canceled before a max RAF was found", MIN_IRAF);
        return AlgorithmOutput::canceled();
    };
    if raf.is_empty() {
        return AlgorithmOutput::complete(result_system(MIN_IRAF, input.foods(), ReactionSet::new()));
    }
    progress.set_subtask("random removal trials");
    let (best, partial) = random_removal_trials(input.foods(), raf.reactions(), seeds, progress, |_| true);
    let output = named_results(MIN_IRAF, input.foods(), best, partial);
    info!("{}: {} result(s) of size {} from max RAF of size {}",
        MIN_IRAF, output.systems.len(),
        output.systems.first().map_or(0, |s| s.size()), raf.size());
    output
}

/// Runs one removal trial per seed in parallel and reduces them to the
/// distinct smallest reaction sets. A removal is only adopted if `accept`
/// holds for the maximal RAF of the remainder. The flag reports whether
/// any trial was cut short by cancellation.
pub(crate) fn random_removal_trials<F>(
    foods: &MoleculeSet,
    start: &ReactionSet,
    seeds: &[u64],
    progress: &dyn Progress,
    accept: F,
) -> (Vec<ReactionSet>, bool)
where
    F: Fn(&ReactionSet) -> bool + Sync,
{
    progress.set_maximum(seeds.len() as u64);
    progress.set_progress(0);
    let outcomes: Vec<(ReactionSet, bool)> = seeds
        .par_iter()
        .map(|&seed| {
            let outcome = removal_trial(foods, start, seed, progress, &accept);
            progress.increment_progress();
            outcome
        })
        .collect();

    let partial = outcomes.iter().any(|(_, canceled)| *canceled);
    if partial {
        warn!("Removal trials canceled, returning the best sets found so far");
    }
    let Some(smallest) = outcomes.iter().map(|(set, _)| set.len()).min() else {
        return (vec![start.clone()], partial);
    };
    let mut best: Vec<ReactionSet> = outcomes
        .into_iter()
        .map(|(set, _)| set)
        .filter(|set| set.len() == smallest)
        .collect();
    best.sort();
    best.dedup();
    (best, partial)
}

fn removal_trial<F>(
    foods: &MoleculeSet,
    start: &ReactionSet,
    seed: u64,
    progress: &dyn Progress,
    accept: &F,
) -> (ReactionSet, bool)
where
    F: Fn(&ReactionSet) -> bool,
{
    let mut order: Vec<ReactionRef> = start.iter().cloned().collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));
    let mut working = start.clone();
    for r in order {
        if working.len() <= 1 {
            break;
        }
        if progress.check_for_cancel().is_err() {
            return (working, true);
        }
        if !working.contains(&r) {
            continue;
        }
        let mut trial = working.clone();
        trial.remove(&r);
        let reduced = max_raf_core(foods, trial);
        if !reduced.is_empty() && accept(&reduced) {
            working = reduced;
        }
    }
    (working, false)
}

/// Numbers the systems when a search yields more than one.
pub(crate) fn named_results(name: &str, foods: &MoleculeSet, sets: Vec<ReactionSet>, partial: bool) -> AlgorithmOutput {
    let n = sets.len();
    let systems = sets
        .into_iter()
        .enumerate()
        .map(|(i, set)| {
            let label = if n > 1 { format!("{} {}", name, i + 1) } else { name.to_string() };
            result_system(&label, foods, set)
        })
        .collect();
    AlgorithmOutput { systems, partial }
}
