use log::info;
use raf_model::{ReactionSet, ReactionSystem};

use crate::{Canceled, Progress, Nested, max_caf, max_raf, reaction_importance};
use crate::closure::result_system;

pub const CORE_RAF: &str = "Core RAF";
pub const QUOTIENT_RAF: &str = "Quotient RAF";

/// The maximal RAF of the reactions whose removal destroys the whole
/// maximal RAF. This is the unique irreducible RAF if there is one, and
/// empty otherwise.
pub fn core_raf(input: &ReactionSystem, progress: &dyn Progress) -> Result<ReactionSystem, Canceled> {
    progress.set_tasks(CORE_RAF, input.name());
    let raf = max_raf(input, &Nested::new(progress))?;
    if raf.is_empty() {
        return Ok(result_system(CORE_RAF, input.foods(), ReactionSet::new()));
    }
    let importance = reaction_importance(&raf, max_raf, progress)?;
    let essential = ReactionSystem::with_reactions(
        CORE_RAF,
        input.foods().clone(),
        importance.into_iter().filter(|(_, p)| *p >= 100.0).map(|(r, _)| r),
    );
    let core = max_raf(&essential, &Nested::new(progress))?;
    info!("{}: {} essential reactions, core of size {}", CORE_RAF, essential.size(), core.size());
    Ok(result_system(CORE_RAF, input.foods(), core.reactions().clone()))
}

/// What is left of the maximal RAF once its maximal CAF is assumed to be
/// present: the CAF reactions are removed and their outputs join the food.
pub fn quotient_raf(input: &ReactionSystem, progress: &dyn Progress) -> Result<ReactionSystem, Canceled> {
    progress.set_tasks(QUOTIENT_RAF, input.name());
    let nested = Nested::new(progress);
    let raf = max_raf(input, &nested)?;
    let caf = max_caf(&raf, &nested)?;
    let mut foods = input.foods().clone();
    for r in caf.reactions() {
        foods.extend(r.outputs());
    }
    let remaining: ReactionSet = raf.reactions().difference(caf.reactions()).cloned().collect();
    info!("{}: {} max RAF reactions, {} in max CAF", QUOTIENT_RAF, raf.size(), caf.size());
    Ok(result_system(QUOTIENT_RAF, &foods, remaining))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CancelAfter, Silent};
    use crate::testing::{molecules, names, rx, system};

    #[test]
    fn test_core_of_a_chain() {
        let rs = system(&["A"], [
            rx("r1", "A", "B", "C"),
            rx("r2", "B", "C", "A"),
            rx("r3", "C", "D", "A"),
        ]);
        let core = core_raf(&rs, &Silent).unwrap();
        assert_eq!(names(&core), vec!["r1", "r2"]);
        assert_eq!(core.name(), CORE_RAF);
    }

    #[test]
    fn test_no_core_with_two_independent_rafs() {
        let rs = system(&["A"], [
            rx("r1", "A", "B", "A"),
            rx("r2", "A", "C", "A"),
        ]);
        assert!(core_raf(&rs, &Silent).unwrap().is_empty());
    }

    #[test]
    fn test_quotient() {
        let rs = system(&["A"], [
            rx("r1", "A", "B", "A"),
            rx("r2", "B", "C", "D"),
            rx("r3", "C", "D", "B"),
        ]);
        let q = quotient_raf(&rs, &Silent).unwrap();
        assert_eq!(names(&q), vec!["r2", "r3"]);
        assert_eq!(q.foods(), &molecules(&["B"]));
    }

    #[test]
    fn test_cancel() {
        let rs = system(&["A"], [rx("r1", "A", "B", "A")]);
        assert_eq!(core_raf(&rs, &CancelAfter::new(1)), Err(Canceled));
        assert_eq!(quotient_raf(&rs, &CancelAfter::new(1)), Err(Canceled));
    }
}
