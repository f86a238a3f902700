use log::{debug, info};
use raf_model::{MoleculeSet, ReactionSet, ReactionSystem};

use crate::{Canceled, Progress};
use crate::closure::{Inhibition, food_closure, filter_reactions, result_system};

pub const MAX_RAF: &str = "Max RAF";

/// The maximal RAF: shrinks the reaction set until every reaction is
/// catalyzed within, and runnable from, the food closure of the remainder.
/// Inhibitors are ignored.
pub fn max_raf(input: &ReactionSystem, progress: &dyn Progress) -> Result<ReactionSystem, Canceled> {
    progress.set_tasks(MAX_RAF, input.name());
    let reactions = shrink_to_raf(input.foods(), input.reactions().clone(), progress)?;
    info!("{}: {} of {} reactions", MAX_RAF, reactions.len(), input.size());
    Ok(result_system(MAX_RAF, input.foods(), reactions))
}

/// The maximal RAF reaction set, for callers that run it many times as a
/// step of a larger search.
pub fn max_raf_core(foods: &MoleculeSet, mut current: ReactionSet) -> ReactionSet {
    while let Some(next) = tighten(foods, &current) {
        current = next;
    }
    current
}

fn shrink_to_raf(foods: &MoleculeSet, mut current: ReactionSet, progress: &dyn Progress) -> Result<ReactionSet, Canceled> {
    progress.set_maximum(current.len() as u64);
    loop {
        progress.check_for_cancel()?;
        match tighten(foods, &current) {
            Some(next) => {
                debug!("{}: {} -> {} reactions", MAX_RAF, current.len(), next.len());
                current = next;
                progress.set_progress(current.len() as u64);
            }
            None => return Ok(current),
        }
    }
}

/// One decreasing step, or `None` at the fixed point.
fn tighten(foods: &MoleculeSet, current: &ReactionSet) -> Option<ReactionSet> {
    let closure = food_closure(foods, current);
    let next = filter_reactions(&closure, current, Inhibition::Ignore);
    (next.len() < current.len()).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CancelAfter, Silent, max_caf};
    use crate::testing::{molecules, names, random_system, rx, system};

    #[test]
    fn test_single_food_catalyzed_reaction() {
        let rs = system(&["A", "B"], [rx("r1", "A B", "C", "A")]);
        let raf = max_raf(&rs, &Silent).unwrap();
        assert_eq!(names(&raf), vec!["r1"]);
        assert_eq!(raf.foods(), &molecules(&["A", "B"]));
    }

    #[test]
    fn test_missing_catalyst_gives_empty_result() {
        let rs = system(&["A"], [rx("r1", "A", "B", "B")]);
        assert!(max_raf(&rs, &Silent).unwrap().is_empty());
    }

    #[test]
    fn test_reflexive_pair() {
        let rs = system(&["A"], [
            rx("r1", "A", "B", "C"),
            rx("r2", "B", "C", "A"),
        ]);
        let raf = max_raf(&rs, &Silent).unwrap();
        assert_eq!(names(&raf), vec!["r1", "r2"]);
        assert_eq!(food_closure(raf.foods(), raf.reactions()), molecules(&["A", "B", "C"]));
    }

    #[test]
    fn test_drops_reactions_cascading() {
        let rs = system(&["A"], [
            rx("r1", "A", "B", "C"),
            rx("r2", "B", "C", "A"),
            rx("r3", "A", "D", "X"),
            rx("r4", "D", "E", "A"),
        ]);
        assert_eq!(names(&max_raf(&rs, &Silent).unwrap()), vec!["r1", "r2"]);
    }

    #[test]
    fn test_idempotent_and_contains_max_caf() {
        for seed in 0..8 {
            let rs = random_system(12, 30, 4, seed);
            let raf = max_raf(&rs, &Silent).unwrap();
            assert_eq!(max_raf(&raf, &Silent).unwrap(), raf);
            let caf = max_caf(&rs, &Silent).unwrap();
            assert!(caf.reactions().is_subset(raf.reactions()));
        }
    }

    #[test]
    fn test_core_matches_wrapper() {
        let rs = random_system(10, 25, 3, 7);
        let core = max_raf_core(rs.foods(), rs.reactions().clone());
        assert_eq!(&core, max_raf(&rs, &Silent).unwrap().reactions());
    }

    #[test]
    fn test_cancel() {
        let rs = system(&["A"], [rx("r1", "A", "B", "A")]);
        assert_eq!(max_raf(&rs, &CancelAfter::new(0)), Err(Canceled));
    }
}
