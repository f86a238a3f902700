use log::{debug, info};
use raf_model::ReactionSystem;

use crate::{Canceled, Progress};
use crate::closure::{Inhibition, extend_by_mentioned_products, filter_reactions, result_system};

pub const MAX_PSEUDO_RAF: &str = "Max Pseudo RAF";

/// Like [`max_raf`](crate::max_raf), but reactions are checked against
/// food plus everything the current reactions mention as outputs, so
/// reactants need not be food-generated.
pub fn max_pseudo_raf(input: &ReactionSystem, progress: &dyn Progress) -> Result<ReactionSystem, Canceled> {
    progress.set_tasks(MAX_PSEUDO_RAF, input.name());
    let mut current = input.reactions().clone();
    progress.set_maximum(current.len() as u64);
    loop {
        progress.check_for_cancel()?;
        let molecules = extend_by_mentioned_products(input.foods(), &current);
        let next = filter_reactions(&molecules, &current, Inhibition::Ignore);
        debug!("{}: {} -> {} reactions", MAX_PSEUDO_RAF, current.len(), next.len());
        if next.len() == current.len() {
            break;
        }
        current = next;
        progress.set_progress(current.len() as u64);
    }
    info!("{}: {} of {} reactions", MAX_PSEUDO_RAF, current.len(), input.size());
    Ok(result_system(MAX_PSEUDO_RAF, input.foods(), current))
}
