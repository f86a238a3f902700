use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use raf_model::{MoleculeSet, ReactionRef, ReactionSet, ReactionSystem};

use crate::{Canceled, Progress, Nested, max_raf};
use crate::closure::{Inhibition, extend_by_mentioned_products, filter_reactions, result_system};

pub const MU_CAF: &str = "Max muCAF";
pub const U_RAF: &str = "Max uRAF";

/// A maximal uninhibited CAF, built greedily in the random order given by
/// `seed`.
///
/// Repeatedly accepts the first remaining reaction that can run, is
/// catalyzed, is not inhibited by anything present, does not produce its
/// own inhibitor and does not produce an inhibitor of an accepted
/// reaction. The result depends on the order: different seeds sample
/// different locally maximal solutions.
pub fn mu_caf(input: &ReactionSystem, seed: u64, progress: &dyn Progress) -> Result<ReactionSystem, Canceled> {
    progress.set_tasks(MU_CAF, input.name());
    let mut order: Vec<ReactionRef> = input.reactions().iter().cloned().collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));
    progress.set_maximum(order.len() as u64);

    let mut molecules = input.foods().clone();
    let mut inhibitors = MoleculeSet::new();
    let mut pending = input.reactions().clone();
    let mut accepted = ReactionSet::new();
    loop {
        progress.check_for_cancel()?;
        let ready = filter_reactions(&molecules, &pending, Inhibition::Respect);
        let next = order.iter().find(|r| {
            if !ready.contains(*r) {
                return false;
            }
            let outputs = r.outputs_from(&molecules);
            !r.is_inhibited(&outputs) && outputs.is_disjoint(&inhibitors)
        });
        let Some(r) = next.cloned() else { break };
        pending.remove(&r);
        molecules.extend(r.outputs_from(&molecules));
        inhibitors.extend(r.inhibitors().iter().cloned());
        debug!("{}: accepted {}", MU_CAF, r.name());
        accepted.insert(r);
        progress.increment_progress();
    }
    info!("{}: {} of {} reactions (seed {})", MU_CAF, accepted.len(), input.size(), seed);
    Ok(result_system(MU_CAF, input.foods(), accepted))
}

/// The maximal RAF after removing every reaction inhibited by food or by
/// anything the maximal RAF can output.
pub fn u_raf(input: &ReactionSystem, progress: &dyn Progress) -> Result<ReactionSystem, Canceled> {
    progress.set_tasks(U_RAF, input.name());
    let nested = Nested::new(progress);
    let first = max_raf(input, &nested)?;
    if first.is_empty() {
        return Ok(result_system(U_RAF, input.foods(), ReactionSet::new()));
    }
    progress.check_for_cancel()?;
    let reachable = extend_by_mentioned_products(input.foods(), first.reactions());
    // Max RAF reactions all run and are catalyzed on `reachable`.
    let uninhibited = ReactionSystem::with_reactions(
        U_RAF,
        input.foods().clone(),
        filter_reactions(&reachable, first.reactions(), Inhibition::Respect),
    );
    debug!("{}: {} of {} max RAF reactions uninhibited", U_RAF, uninhibited.size(), first.size());
    let second = max_raf(&uninhibited, &nested)?;
    info!("{}: {} of {} reactions", U_RAF, second.size(), input.size());
    Ok(result_system(U_RAF, input.foods(), second.reactions().clone()))
}
