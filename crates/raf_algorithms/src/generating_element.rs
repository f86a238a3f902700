use log::info;
use raf_model::{MoleculeSet, ReactionSet, ReactionSystem};

use crate::{AlgorithmOutput, Progress, Nested, max_raf};
use crate::closure::{food_closure, result_system};
use crate::min_iraf::{named_results, random_removal_trials};

pub const MIN_RAF_GENERATING_ELEMENT: &str = "Min RAF Generating Element";

/// Searches for small RAFs that still generate every molecule in
/// `targets` from food.
///
/// If the maximal RAF cannot produce the targets the result is a single
/// empty system. Otherwise this runs the same random-order removal trials
/// as [`min_iraf`](crate::min_iraf), adopting a removal only while the
/// targets stay reachable. Like that search it is a heuristic and reports
/// partial results on cancellation. Without seeds the maximal RAF itself
/// is returned.
pub fn min_raf_generating_element(
    input: &ReactionSystem,
    targets: &MoleculeSet,
    seeds: &[u64],
    progress: &dyn Progress,
) -> AlgorithmOutput {
    let name = MIN_RAF_GENERATING_ELEMENT;
    progress.set_tasks(name, input.name());
    let Ok(raf) = max_raf(input, &Nested::new(progress)) else {
        return AlgorithmOutput::canceled();
    };
    let foods = input.foods();
    let generates = |set: &ReactionSet| targets.is_subset(&food_closure(foods, set));
    if raf.is_empty() || !generates(raf.reactions()) {
        info!("{}: max RAF does not generate the targets", name);
        return AlgorithmOutput::complete(result_system(name, foods, ReactionSet::new()));
    }
    progress.set_subtask("random removal trials");
    let (best, partial) = random_removal_trials(foods, raf.reactions(), seeds, progress, generates);
    info!("{}: {} result(s)", name, best.len());
    named_results(name, foods, best, partial)
}
