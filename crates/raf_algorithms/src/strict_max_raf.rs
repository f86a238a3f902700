use log::{debug, info};
use raf_model::{MoleculeSet, Reaction, ReactionSet, ReactionSystem};

use crate::{Canceled, Progress};
use crate::closure::{food_closure, result_system};

pub const STRICT_MAX_RAF: &str = "Strictly Autocatalytic Max RAF";

/// The maximal RAF in which every reaction is catalyzed by something the
/// network itself makes: some catalyst conjunction must be present in the
/// food closure and contain at least one non-food molecule. Spontaneous
/// reactions never qualify.
pub fn strict_max_raf(input: &ReactionSystem, progress: &dyn Progress) -> Result<ReactionSystem, Canceled> {
    progress.set_tasks(STRICT_MAX_RAF, input.name());
    let foods = input.foods();
    let mut current = input.reactions().clone();
    progress.set_maximum(current.len() as u64);
    loop {
        progress.check_for_cancel()?;
        let closure = food_closure(foods, &current);
        let next: ReactionSet = current
            .iter()
            .filter(|r| r.has_all_inputs(&closure) && is_autocatalyzed(r, foods, &closure))
            .cloned()
            .collect();
        debug!("{}: {} -> {} reactions", STRICT_MAX_RAF, current.len(), next.len());
        if next.len() == current.len() {
            break;
        }
        current = next;
        progress.set_progress(current.len() as u64);
    }
    info!("{}: {} of {} reactions", STRICT_MAX_RAF, current.len(), input.size());
    Ok(result_system(STRICT_MAX_RAF, foods, current))
}

fn is_autocatalyzed(r: &Reaction, foods: &MoleculeSet, closure: &MoleculeSet) -> bool {
    r.catalysts().iter().any(|c| {
        c.is_satisfied_by(closure) && c.elements().iter().any(|m| !foods.contains(m))
    })
}
