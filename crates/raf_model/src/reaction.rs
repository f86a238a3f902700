use std::fmt;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};

use crate::MoleculeType;
use crate::Conjunction;
use crate::ModelError;
use crate::parse_catalysts;

pub type MoleculeSet = BTreeSet<MoleculeType>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
    Both,
}

impl Direction {
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Forward | Direction::Both)
    }

    pub fn is_reverse(self) -> bool {
        matches!(self, Direction::Reverse | Direction::Both)
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Forward => "=>",
            Direction::Reverse => "<=",
            Direction::Both => "<=>",
        }
    }
}

/// A catalyzed, possibly inhibited transformation between molecule sets.
///
/// Reactions are identified by name: equality, ordering and hashing only
/// look at the name. Catalysts are held in disjunctive normal form; an
/// empty catalyst set marks a spontaneous reaction.
#[derive(Debug, Clone)]
pub struct Reaction {
    name: String,
    reactants: MoleculeSet,
    products: MoleculeSet,
    catalysts: BTreeSet<Conjunction>,
    inhibitors: MoleculeSet,
    direction: Direction,
}

impl Reaction {
    /// Builds a reaction, normalizing the textual catalyst expression.
    pub fn new<'a, R, P, I>(
        name: &str,
        reactants: R,
        products: P,
        catalysts: &str,
        inhibitors: I,
        direction: Direction,
    ) -> Result<Self, ModelError>
    where
        R: IntoIterator<Item = &'a str>,
        P: IntoIterator<Item = &'a str>,
        I: IntoIterator<Item = &'a str>,
    {
        let catalysts = parse_catalysts(catalysts).map_err(|source| ModelError::Catalyst {
            reaction: name.to_string(),
            source,
        })?;
        Self::from_parts(
            name,
            reactants.into_iter().map(MoleculeType::new).collect(),
            products.into_iter().map(MoleculeType::new).collect(),
            catalysts,
            inhibitors.into_iter().map(MoleculeType::new).collect(),
            direction,
        )
    }

    /// Builds a reaction from already interned parts.
    pub fn from_parts(
        name: &str,
        reactants: MoleculeSet,
        products: MoleculeSet,
        catalysts: BTreeSet<Conjunction>,
        inhibitors: MoleculeSet,
        direction: Direction,
    ) -> Result<Self, ModelError> {
        if reactants.is_empty() {
            return Err(ModelError::NoReactants(name.to_string()));
        }
        if products.is_empty() {
            return Err(ModelError::NoProducts(name.to_string()));
        }
        if let Some(m) = reactants.iter().chain(&products).find(|m| m.is_conjunction()) {
            return Err(ModelError::ConjunctionMolecule(m.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            reactants,
            products,
            catalysts,
            inhibitors,
            direction,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reactants(&self) -> &MoleculeSet {
        &self.reactants
    }

    pub fn products(&self) -> &MoleculeSet {
        &self.products
    }

    pub fn catalysts(&self) -> &BTreeSet<Conjunction> {
        &self.catalysts
    }

    pub fn inhibitors(&self) -> &MoleculeSet {
        &self.inhibitors
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_spontaneous(&self) -> bool {
        self.catalysts.is_empty()
    }

    /// Every molecule appearing in any catalyst conjunction.
    pub fn catalyst_elements(&self) -> MoleculeSet {
        self.catalysts
            .iter()
            .flat_map(|c| c.elements().iter().cloned())
            .collect()
    }

    /// The catalyst expression in canonical DNF, e.g. `A&B,C`.
    pub fn catalyst_expression(&self) -> String {
        self.catalysts
            .iter()
            .map(|c| c.molecule().name())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// The (consumed, produced) pairs this reaction may run as.
    pub fn sides(&self) -> impl Iterator<Item = (&MoleculeSet, &MoleculeSet)> {
        let forward = self.direction.is_forward().then_some((&self.reactants, &self.products));
        let reverse = self.direction.is_reverse().then_some((&self.products, &self.reactants));
        forward.into_iter().chain(reverse)
    }

    /// Some permitted side has all its inputs in `molecules`.
    pub fn has_all_inputs(&self, molecules: &MoleculeSet) -> bool {
        self.sides()
            .any(|(consumed, _)| consumed.iter().all(|m| molecules.contains(m)))
    }

    /// Everything this reaction can produce in any permitted direction.
    pub fn outputs(&self) -> MoleculeSet {
        self.sides()
            .flat_map(|(_, produced)| produced.iter().cloned())
            .collect()
    }

    /// What the sides that can run on `molecules` produce.
    pub fn outputs_from(&self, molecules: &MoleculeSet) -> MoleculeSet {
        self.sides()
            .filter(|(consumed, _)| consumed.iter().all(|m| molecules.contains(m)))
            .flat_map(|(_, produced)| produced.iter().cloned())
            .collect()
    }

    /// A spontaneous reaction, or one with some conjunction fully present.
    pub fn is_catalyzed(&self, molecules: &MoleculeSet) -> bool {
        self.is_spontaneous() || self.catalysts.iter().any(|c| c.is_satisfied_by(molecules))
    }

    pub fn is_inhibited(&self, molecules: &MoleculeSet) -> bool {
        self.inhibitors.iter().any(|m| molecules.contains(m))
    }

    /// Every molecule referenced by this reaction.
    pub fn molecules(&self) -> MoleculeSet {
        let mut all: MoleculeSet = self.reactants.union(&self.products).cloned().collect();
        all.extend(self.catalyst_elements());
        all.extend(self.inhibitors.iter().cloned());
        all
    }

    /// Splits a `both` reaction into `name[+]` (forward) and `name[-]`
    /// (reverse) halves. Single-direction reactions come back unchanged.
    pub fn split_both(&self) -> Vec<Reaction> {
        if self.direction != Direction::Both {
            return vec![self.clone()];
        }
        let mut forward = self.clone();
        forward.name = format!("{}[+]", self.name);
        forward.direction = Direction::Forward;
        let mut reverse = self.clone();
        reverse.name = format!("{}[-]", self.name);
        reverse.direction = Direction::Reverse;
        vec![forward, reverse]
    }
}

impl PartialEq for Reaction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Reaction {}

impl PartialOrd for Reaction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Reaction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Reaction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state)
    }
}

fn join(set: &MoleculeSet, sep: &str) -> String {
    set.iter().map(|m| m.name()).collect::<Vec<_>>().join(sep)
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} [{}]", self.name, join(&self.reactants, " + "), self.catalyst_expression())?;
        if !self.inhibitors.is_empty() {
            write!(f, " {{{}}}", join(&self.inhibitors, ","))?;
        }
        write!(f, " {} {}", self.direction.arrow(), join(&self.products, " + "))
    }
}
