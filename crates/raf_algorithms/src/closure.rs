//! The set primitives every fixed-point algorithm is built from.

use raf_model::{MoleculeSet, ReactionSet, ReactionSystem};

/// Whether a reaction filter drops inhibited reactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inhibition {
    Ignore,
    Respect,
}

/// `molecules` plus everything the reactions can output, in a single pass.
/// No reaction is checked for readiness.
pub fn extend_by_mentioned_products(molecules: &MoleculeSet, reactions: &ReactionSet) -> MoleculeSet {
    let mut extended = molecules.clone();
    for r in reactions {
        extended.extend(r.outputs());
    }
    extended
}

/// The smallest superset of `foods` that is closed under running every
/// reaction whose inputs are present. Catalysts are not consulted.
pub fn food_closure(foods: &MoleculeSet, reactions: &ReactionSet) -> MoleculeSet {
    let mut closure = foods.clone();
    let mut pending: Vec<_> = reactions.iter().collect();
    loop {
        let before = closure.len();
        pending.retain(|r| {
            let produced = r.outputs_from(&closure);
            if produced.is_empty() {
                return true;
            }
            closure.extend(produced);
            // A `both` reaction may still open its second side later.
            !r.outputs().is_subset(&closure)
        });
        if closure.len() == before {
            return closure;
        }
    }
}

/// Reactions that can run on `molecules` and are catalyzed by them.
pub fn filter_reactions(molecules: &MoleculeSet, reactions: &ReactionSet, inhibition: Inhibition) -> ReactionSet {
    reactions
        .iter()
        .filter(|r| r.has_all_inputs(molecules) && r.is_catalyzed(molecules))
        .filter(|r| inhibition == Inhibition::Ignore || !r.is_inhibited(molecules))
        .cloned()
        .collect()
}

/// Wraps a result reaction set, with the food re-derived as the input food
/// actually mentioned by the result.
pub fn result_system(name: &str, input_foods: &MoleculeSet, reactions: ReactionSet) -> ReactionSystem {
    let mut system = ReactionSystem::with_reactions(name, MoleculeSet::new(), reactions);
    let foods = system.mentioned_foods(input_foods);
    system.set_foods(foods);
    system
}
