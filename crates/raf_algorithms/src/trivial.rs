use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use raf_model::{MoleculeSet, ReactionRef, ReactionSet, ReactionSystem};

use crate::{AlgorithmOutput, Canceled, Progress, Nested, max_raf, max_raf_core};
use crate::closure::{Inhibition, filter_reactions, result_system};

pub const TRIVIAL_CAFS: &str = "Trivial CAFs";
pub const TRIVIAL_RAFS: &str = "Trivial RAFs";
pub const REMOVE_TRIVIAL_RAFS: &str = "Remove Trivial RAFs";

/// Reactions that run on food alone, catalyzed by food.
pub fn trivial_cafs(input: &ReactionSystem, progress: &dyn Progress) -> Result<ReactionSystem, Canceled> {
    progress.set_tasks(TRIVIAL_CAFS, input.name());
    progress.check_for_cancel()?;
    let reactions = filter_reactions(input.foods(), input.reactions(), Inhibition::Ignore);
    Ok(result_system(TRIVIAL_CAFS, input.foods(), reactions))
}

/// Reactions that run on food alone, catalyzed by food or by their own
/// outputs.
pub fn trivial_rafs(input: &ReactionSystem, progress: &dyn Progress) -> Result<ReactionSystem, Canceled> {
    progress.set_tasks(TRIVIAL_RAFS, input.name());
    progress.check_for_cancel()?;
    let foods = input.foods();
    let reactions: ReactionSet = input
        .reactions()
        .iter()
        .filter(|r| {
            let mut available = foods.clone();
            available.extend(r.outputs_from(foods));
            r.has_all_inputs(foods) && r.is_catalyzed(&available)
        })
        .cloned()
        .collect();
    Ok(result_system(TRIVIAL_RAFS, foods, reactions))
}

/// The maximal RAF without its trivial reactions.
///
/// A reaction is trivial if some sequence of removals leaves it as the
/// only reaction of a RAF. This runs `seeds.len()` random removal orders
/// in parallel, so it samples rather than proves triviality. The outputs
/// of the trivial reactions are added to the food, as if they were
/// supplied from outside. On cancellation the trivial reactions found so
/// far are removed and the output is marked partial.
pub fn remove_trivial_rafs(input: &ReactionSystem, seeds: &[u64], progress: &dyn Progress) -> AlgorithmOutput {
    progress.set_tasks(REMOVE_TRIVIAL_RAFS, input.name());
    let Ok(raf) = max_raf(input, &Nested::new(progress)) else {
        return AlgorithmOutput::canceled();
    };
    let foods = input.foods();
    progress.set_subtask("searching trivial reactions");
    progress.set_maximum(seeds.len() as u64);
    progress.set_progress(0);
    let found: Vec<Result<Option<ReactionRef>, Canceled>> = seeds
        .par_iter()
        .map(|&seed| {
            let outcome = find_trivial(foods, raf.reactions(), seed, progress);
            progress.increment_progress();
            outcome
        })
        .collect();

    let partial = found.iter().any(|f| f.is_err());
    let trivial: ReactionSet = found.into_iter().filter_map(|f| f.ok().flatten()).collect();
    debug!("{}: trivial reactions {:?}", REMOVE_TRIVIAL_RAFS,
        trivial.iter().map(|r| r.name()).collect::<Vec<_>>());

    let mut augmented = foods.clone();
    for r in &trivial {
        augmented.extend(r.outputs());
    }
    let remaining: ReactionSet = raf.reactions().difference(&trivial).cloned().collect();
    info!("{}: removed {} of {} max RAF reactions", REMOVE_TRIVIAL_RAFS, trivial.len(), raf.size());
    AlgorithmOutput {
        systems: vec![result_system(REMOVE_TRIVIAL_RAFS, &augmented, remaining)],
        partial,
    }
}

/// Removes reactions in a random order until the maximal RAF of the
/// remainder is a single reaction. A maximal RAF of one reaction is
/// trivial as it stands.
fn find_trivial(foods: &MoleculeSet, raf: &ReactionSet, seed: u64, progress: &dyn Progress) -> Result<Option<ReactionRef>, Canceled> {
    if raf.len() == 1 {
        return Ok(raf.first().cloned());
    }
    let mut order: Vec<ReactionRef> = raf.iter().cloned().collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));
    let mut working = raf.clone();
    for r in order {
        progress.check_for_cancel()?;
        if !working.contains(&r) {
            continue;
        }
        let mut trial = working.clone();
        trial.remove(&r);
        let reduced = max_raf_core(foods, trial);
        if reduced.len() == 1 {
            return Ok(reduced.into_iter().next());
        }
        if !reduced.is_empty() {
            working = reduced;
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CancelAfter, Silent};
    use crate::testing::{molecules, names, rx, system};

    #[test]
    fn test_trivial_cafs_and_rafs() {
        let rs = system(&["A", "B"], [
            rx("caf", "A", "C", "B"),
            rx("self", "A", "D", "D"),
            rx("spont", "B", "E", ""),
            rx("network", "A", "F", "C"),
            rx("deep", "C", "G", "A"),
        ]);
        assert_eq!(names(&trivial_cafs(&rs, &Silent).unwrap()), vec!["caf", "spont"]);
        assert_eq!(names(&trivial_rafs(&rs, &Silent).unwrap()), vec!["caf", "self", "spont"]);
    }

    #[test]
    fn test_remove_trivial_rafs() {
        let rs = system(&["A"], [
            rx("r1", "A", "B", "A"),
            rx("r2", "A", "C", "D"),
            rx("r3", "C", "D", "A"),
            rx("r4", "A", "E", "X"),
        ]);
        let seeds: Vec<u64> = (0..2 * rs.size() as u64).collect();
        let out = remove_trivial_rafs(&rs, &seeds, &Silent);
        assert!(!out.partial);
        assert_eq!(out.systems.len(), 1);
        let result = &out.systems[0];
        assert_eq!(names(result), vec!["r2", "r3"]);
        assert_eq!(result.foods(), &molecules(&["A"]));
        assert_eq!(result.name(), REMOVE_TRIVIAL_RAFS);
    }

    #[test]
    fn test_remove_trivial_rafs_food_is_augmented() {
        let rs = system(&["A"], [
            rx("r1", "A", "B", "A"),
            rx("r2", "B", "C", "A"),
            rx("r3", "C", "D", "D"),
        ]);
        let seeds: Vec<u64> = (0..6).collect();
        let out = remove_trivial_rafs(&rs, &seeds, &Silent);
        let result = &out.systems[0];
        assert!(!result.reactions().iter().any(|r| r.name() == "r1"));
        assert_eq!(result.foods(), &molecules(&["A", "B"]));
    }

    #[test]
    fn test_single_reaction_raf_is_trivial() {
        let rs = system(&["A"], [rx("r1", "A", "B", "A")]);
        let out = remove_trivial_rafs(&rs, &[0, 1], &Silent);
        assert!(!out.partial);
        assert!(out.systems[0].is_empty());
    }

    #[test]
    fn test_remove_trivial_rafs_is_reproducible() {
        let rs = crate::testing::random_system(12, 30, 4, 5);
        let seeds: Vec<u64> = (100..160).collect();
        assert_eq!(remove_trivial_rafs(&rs, &seeds, &Silent), remove_trivial_rafs(&rs, &seeds, &Silent));
    }

    #[test]
    fn test_cancel_is_partial() {
        let rs = system(&["A"], [rx("r1", "A", "B", "A"), rx("r2", "A", "C", "A")]);
        let out = remove_trivial_rafs(&rs, &[0, 1, 2], &CancelAfter::new(1));
        assert!(out.partial);
        assert_eq!(names(&out.systems[0]), vec!["r1", "r2"]);
    }
}
