use log::{debug, info};
use raf_model::{ReactionSet, ReactionSystem};

use crate::{Canceled, Progress};
use crate::closure::{Inhibition, extend_by_mentioned_products, filter_reactions, result_system};

pub const MAX_CAF: &str = "Max CAF";

/// The maximal CAF: grows the reaction set forwards from food, ignoring
/// inhibitors.
pub fn max_caf(input: &ReactionSystem, progress: &dyn Progress) -> Result<ReactionSystem, Canceled> {
    progress.set_tasks(MAX_CAF, input.name());
    let reactions = max_caf_core(input, progress)?;
    info!("{}: {} of {} reactions", MAX_CAF, reactions.len(), input.size());
    Ok(result_system(MAX_CAF, input.foods(), reactions))
}

fn max_caf_core(input: &ReactionSystem, progress: &dyn Progress) -> Result<ReactionSet, Canceled> {
    let pool = input.reactions();
    let mut molecules = input.foods().clone();
    let mut current = filter_reactions(&molecules, pool, Inhibition::Ignore);
    progress.set_maximum(pool.len() as u64);
    while !current.is_empty() {
        progress.check_for_cancel()?;
        progress.set_progress(current.len() as u64);
        molecules = extend_by_mentioned_products(&molecules, &current);
        let next = filter_reactions(&molecules, pool, Inhibition::Ignore);
        debug!("{}: {} -> {} reactions", MAX_CAF, current.len(), next.len());
        if next.len() == current.len() {
            break;
        }
        current = next;
    }
    Ok(current)
}
