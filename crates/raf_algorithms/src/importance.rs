//! Leave-one-out sensitivity of an algorithm's result.

use std::cmp::Ordering;
use log::info;
use rayon::prelude::*;
use raf_model::{MoleculeType, ReactionRef, ReactionSystem};

use crate::{Canceled, Progress, Nested};

/// Percentage of the original result lost when one input is removed.
fn percent_reduction(original: usize, reduced: usize) -> f64 {
    100.0 * original.saturating_sub(reduced) as f64 / original as f64
}

fn by_importance<K: Ord>(a: &(K, f64), b: &(K, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// For each food molecule: how much smaller `algorithm`'s result gets when
/// that molecule is removed from the food set.
///
/// Sorted by decreasing importance, ties by name. Molecules whose removal
/// does not shrink the result are omitted.
pub fn food_importance<A>(input: &ReactionSystem, algorithm: A, progress: &dyn Progress) -> Result<Vec<(MoleculeType, f64)>, Canceled>
where
    A: Fn(&ReactionSystem, &dyn Progress) -> Result<ReactionSystem, Canceled> + Sync,
{
    progress.set_tasks("Food importance", input.name());
    let nested = Nested::new(progress);
    let original = algorithm(input, &nested)?.size();
    if original == 0 {
        return Ok(Vec::new());
    }
    progress.set_maximum(input.food_size() as u64);
    progress.set_progress(0);
    let mut importance = input
        .foods()
        .par_iter()
        .map(|food| -> Result<(MoleculeType, f64), Canceled> {
            progress.check_for_cancel()?;
            let mut reduced = input.shallow_copy(input.name());
            let mut foods = input.foods().clone();
            foods.remove(food);
            reduced.set_foods(foods);
            let size = algorithm(&reduced, &nested)?.size();
            progress.increment_progress();
            Ok((food.clone(), percent_reduction(original, size)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    importance.retain(|(_, p)| *p > 0.0);
    importance.sort_by(by_importance);
    info!("Food importance: {} of {} food molecules matter", importance.len(), input.food_size());
    Ok(importance)
}

/// For each reaction of `algorithm`'s result: how much smaller the result
/// gets when that reaction is removed from the input.
///
/// Sorted by decreasing importance, ties by name. Reactions whose removal
/// does not shrink the result are omitted.
pub fn reaction_importance<A>(input: &ReactionSystem, algorithm: A, progress: &dyn Progress) -> Result<Vec<(ReactionRef, f64)>, Canceled>
where
    A: Fn(&ReactionSystem, &dyn Progress) -> Result<ReactionSystem, Canceled> + Sync,
{
    progress.set_tasks("Reaction importance", input.name());
    let nested = Nested::new(progress);
    let original = algorithm(input, &nested)?;
    if original.is_empty() {
        return Ok(Vec::new());
    }
    progress.set_maximum(original.size() as u64);
    progress.set_progress(0);
    let mut importance = original
        .reactions()
        .par_iter()
        .map(|r| -> Result<(ReactionRef, f64), Canceled> {
            progress.check_for_cancel()?;
            let mut reduced = input.shallow_copy(input.name());
            reduced.remove_reaction(r.name());
            let size = algorithm(&reduced, &nested)?.size();
            progress.increment_progress();
            Ok((r.clone(), percent_reduction(original.size(), size)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    importance.retain(|(_, p)| *p > 0.0);
    importance.sort_by(by_importance);
    info!("Reaction importance: {} of {} reactions matter", importance.len(), original.size());
    Ok(importance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CancelAfter, Silent, max_raf};
    use crate::testing::{rx, system};

    fn network() -> ReactionSystem {
        system(&["A", "X"], [
            rx("r1", "A", "B", "A"),
            rx("r2", "B", "C", "A"),
            rx("r3", "C", "D", "A"),
            rx("r4", "A", "E", "A"),
            rx("r5", "X", "Y", "X"),
        ])
    }

    #[test]
    fn test_reaction_importance() {
        let imp = reaction_importance(&network(), max_raf, &Silent).unwrap();
        let view: Vec<(&str, f64)> = imp.iter().map(|(r, p)| (r.name(), *p)).collect();
        assert_eq!(view, vec![
            ("r1", 60.0),
            ("r2", 40.0),
            ("r3", 20.0),
            ("r4", 20.0),
            ("r5", 20.0),
        ]);
    }

    #[test]
    fn test_food_importance() {
        let imp = food_importance(&network(), max_raf, &Silent).unwrap();
        let view: Vec<(&str, f64)> = imp.iter().map(|(m, p)| (m.name(), *p)).collect();
        assert_eq!(view, vec![("A", 80.0), ("X", 20.0)]);
    }

    #[test]
    fn test_empty_result_has_no_importance() {
        let rs = system(&["A"], [rx("r1", "A", "B", "B")]);
        assert!(reaction_importance(&rs, max_raf, &Silent).unwrap().is_empty());
        assert!(food_importance(&rs, max_raf, &Silent).unwrap().is_empty());
    }

    #[test]
    fn test_cancel() {
        assert_eq!(reaction_importance(&network(), max_raf, &CancelAfter::new(2)), Err(Canceled));
    }
}
