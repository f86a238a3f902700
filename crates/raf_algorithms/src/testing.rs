//! Builders for the small reaction systems used throughout the tests.

use raf_model::{Direction, MoleculeSet, MoleculeType, Reaction, ReactionSystem};

pub fn molecules(names: &[&str]) -> MoleculeSet {
    names.iter().map(|n| MoleculeType::new(n)).collect()
}

/// Reactants and products are whitespace separated.
pub fn rx_full(name: &str, reactants: &str, products: &str, catalysts: &str, inhibitors: &str, direction: Direction) -> Reaction {
    Reaction::new(
        name,
        reactants.split_whitespace(),
        products.split_whitespace(),
        catalysts,
        inhibitors.split_whitespace(),
        direction,
    ).unwrap()
}

pub fn rx(name: &str, reactants: &str, products: &str, catalysts: &str) -> Reaction {
    rx_full(name, reactants, products, catalysts, "", Direction::Forward)
}

pub fn rx_inh(name: &str, reactants: &str, products: &str, catalysts: &str, inhibitors: &str) -> Reaction {
    rx_full(name, reactants, products, catalysts, inhibitors, Direction::Forward)
}

pub fn rx_dir(name: &str, reactants: &str, products: &str, catalysts: &str, direction: Direction) -> Reaction {
    rx_full(name, reactants, products, catalysts, "", direction)
}

pub fn system<I>(foods: &[&str], reactions: I) -> ReactionSystem
where
    I: IntoIterator<Item = Reaction>,
{
    ReactionSystem::try_from_reactions("test", molecules(foods), reactions).unwrap()
}

pub fn names(rs: &ReactionSystem) -> Vec<&str> {
    rs.reaction_names()
}

/// A random network over `n_molecules` molecules with `n_reactions`
/// two-to-one reactions, each catalyzed by one or two single molecules.
pub fn random_system(n_molecules: usize, n_reactions: usize, n_food: usize, seed: u64) -> ReactionSystem {
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    let mut rng = StdRng::seed_from_u64(seed);
    let mol = |i: usize| format!("m{}", i);
    let foods: Vec<String> = (0..n_food).map(mol).collect();
    let reactions = (0..n_reactions).map(|i| {
        let a = mol(rng.random_range(0..n_molecules));
        let b = mol(rng.random_range(0..n_molecules));
        let p = mol(rng.random_range(0..n_molecules));
        let c1 = mol(rng.random_range(0..n_molecules));
        let c2 = mol(rng.random_range(0..n_molecules));
        let catalysts = if rng.random_bool(0.5) { c1 } else { format!("{},{}", c1, c2) };
        rx(&format!("r{}", i), &format!("{} {}", a, b), &p, &catalysts)
    }).collect::<Vec<_>>();
    let food_refs: Vec<&str> = foods.iter().map(|s| s.as_str()).collect();
    system(&food_refs, reactions)
}
