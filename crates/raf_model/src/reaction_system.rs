use std::fmt;
use std::sync::Arc;
use std::collections::BTreeSet;

use crate::MoleculeType;
use crate::MoleculeSet;
use crate::Reaction;
use crate::ModelError;

/// Reactions are shared between systems; trial systems built by the
/// algorithms clone the `Arc`, never the reaction.
pub type ReactionRef = Arc<Reaction>;

pub type ReactionSet = BTreeSet<ReactionRef>;

/// A named food set plus a set of reactions, both in canonical order.
///
/// A `ReactionSystem` is the input and the output of every algorithm. An
/// empty reaction set is a valid result ("no RAF exists"), not an error.
///
/// Equality compares food and reactions, the name is ignored.
#[derive(Debug, Clone, Default)]
pub struct ReactionSystem {
    name: String,
    foods: MoleculeSet,
    reactions: ReactionSet,
}

impl ReactionSystem {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// A system sharing the given reactions.
    pub fn with_reactions<I>(name: &str, foods: MoleculeSet, reactions: I) -> Self
    where
        I: IntoIterator<Item = ReactionRef>,
    {
        Self {
            name: name.to_string(),
            foods,
            reactions: reactions.into_iter().collect(),
        }
    }

    /// Builds a system from freshly constructed reactions, rejecting
    /// duplicate names.
    pub fn try_from_reactions<I>(name: &str, foods: MoleculeSet, reactions: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = Reaction>,
    {
        let mut system = Self::with_reactions(name, foods, []);
        for reaction in reactions {
            let rname = reaction.name().to_string();
            if !system.reactions.insert(Arc::new(reaction)) {
                return Err(ModelError::DuplicateReaction(rname));
            }
        }
        Ok(system)
    }

    /// New system with independent collections but shared reactions.
    pub fn shallow_copy(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            foods: self.foods.clone(),
            reactions: self.reactions.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn foods(&self) -> &MoleculeSet {
        &self.foods
    }

    pub fn set_foods(&mut self, foods: MoleculeSet) {
        self.foods = foods;
    }

    pub fn reactions(&self) -> &ReactionSet {
        &self.reactions
    }

    pub fn remove_reaction(&mut self, name: &str) -> Option<ReactionRef> {
        let found = self.reaction_by_name(name)?.clone();
        self.reactions.remove(&found);
        Some(found)
    }

    pub fn reaction_by_name(&self, name: &str) -> Option<&ReactionRef> {
        self.reactions.iter().find(|r| r.name() == name)
    }

    /// Number of reactions.
    pub fn size(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    pub fn food_size(&self) -> usize {
        self.foods.len()
    }

    pub fn reaction_names(&self) -> Vec<&str> {
        self.reactions.iter().map(|r| r.name()).collect()
    }

    /// Every molecule mentioned by the food set or any reaction.
    pub fn molecule_types(&self) -> MoleculeSet {
        let mut all = self.foods.clone();
        for r in &self.reactions {
            all.extend(r.molecules());
        }
        all
    }

    /// The molecules mentioned by the reactions that are also in `foods`.
    pub fn mentioned_foods(&self, foods: &MoleculeSet) -> MoleculeSet {
        let mut mentioned = MoleculeSet::new();
        for r in &self.reactions {
            mentioned.extend(r.molecules());
        }
        mentioned.intersection(foods).cloned().collect()
    }
}

impl PartialEq for ReactionSystem {
    fn eq(&self, other: &Self) -> bool {
        self.foods == other.foods && self.reactions == other.reactions
    }
}

impl Eq for ReactionSystem {}

impl fmt::Display for ReactionSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} ({} reactions, {} food)", self.name, self.size(), self.food_size())?;
        writeln!(f, "Food: {}", self.foods.iter()
            .map(|m| m.name())
            .collect::<Vec<_>>()
            .join(" "))?;
        for r in &self.reactions {
            writeln!(f, "{}", r)?;
        }
        Ok(())
    }
}
