//! Dependency graphs between reactions and between molecules.
//!
//! Reactions are first arranged in construction levels: level 0 holds the
//! reactions that run on food, level k those that become runnable (inputs
//! present and catalyzed) once the outputs of all lower levels are added.
//! An edge `p -> r` means that `r` is never constructed when `p` is knocked
//! out. Knock-out dependencies are transitively closed, so the graph is
//! reported transitively reduced.

use std::collections::BTreeMap;
use ahash::AHashMap;
use log::{debug, info};
use ndarray::{Array1, Array2};
use nohash_hasher::IntSet;
use rayon::prelude::*;
use serde::Serialize;
use raf_model::{MoleculeSet, MoleculeType, Reaction, ReactionSystem};

use crate::{Canceled, Progress};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyNode<T> {
    pub id: T,
    pub level: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyGraph<T> {
    nodes: Vec<DependencyNode<T>>,
    edges: Vec<(T, T)>,
}

impl<T: Clone + Ord> DependencyGraph<T> {
    /// Nodes sorted by id.
    pub fn nodes(&self) -> &[DependencyNode<T>] {
        &self.nodes
    }

    /// Edges sorted by (source, target).
    pub fn edges(&self) -> &[(T, T)] {
        &self.edges
    }

    pub fn level_of(&self, id: &T) -> Option<usize> {
        self.nodes
            .binary_search_by(|n| n.id.cmp(id))
            .ok()
            .map(|i| self.nodes[i].level)
    }

    pub fn has_edge(&self, source: &T, target: &T) -> bool {
        self.edges.binary_search_by(|(s, t)| (s, t).cmp(&(source, target))).is_ok()
    }

    /// The number of distinct levels.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.level + 1).max().unwrap_or(0)
    }

    /// Transitive reduction of a closed dependency matrix.
    ///
    /// A dependency always points to a strictly higher level, so walking
    /// the targets of `p` in level order meets every `q` before anything
    /// that depends on `q`. A target is kept unless an earlier kept target
    /// already covers it.
    fn from_matrix(ids: Vec<T>, levels: Vec<usize>, depends: &Array2<bool>) -> Self {
        let n = ids.len();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&i| levels[i]);
        let mut edges = Vec::new();
        let mut covered = Array1::from_elem(n, false);
        for p in 0..n {
            covered.fill(false);
            for &q in &order {
                if !depends[[p, q]] || covered[q] {
                    continue;
                }
                edges.push((ids[p].clone(), ids[q].clone()));
                covered.zip_mut_with(&depends.row(q), |c, &d| *c |= d);
            }
        }
        edges.sort();
        let mut nodes: Vec<DependencyNode<T>> = ids
            .into_iter()
            .zip(levels)
            .map(|(id, level)| DependencyNode { id, level })
            .collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        Self { nodes, edges }
    }
}

/// What a forward construction from food reaches.
struct Construction {
    reaction_level: Vec<Option<usize>>,
    molecule_level: BTreeMap<MoleculeType, usize>,
}

impl Construction {
    fn run(foods: &MoleculeSet, reactions: &[Reaction], skip_reaction: Option<usize>, skip_molecule: Option<&MoleculeType>) -> Self {
        let mut molecule_level: BTreeMap<MoleculeType, usize> = foods
            .iter()
            .filter(|m| Some(*m) != skip_molecule)
            .map(|m| (m.clone(), 0))
            .collect();
        let mut reaction_level = vec![None; reactions.len()];
        let mut placed: IntSet<usize> = IntSet::default();
        if let Some(skip) = skip_reaction {
            placed.insert(skip);
        }
        for level in 0.. {
            let present: MoleculeSet = molecule_level.keys().cloned().collect();
            let batch: Vec<usize> = (0..reactions.len())
                .filter(|i| !placed.contains(i))
                .filter(|&i| reactions[i].has_all_inputs(&present) && reactions[i].is_catalyzed(&present))
                .collect();
            if batch.is_empty() {
                break;
            }
            for i in batch {
                placed.insert(i);
                reaction_level[i] = Some(level);
                for m in reactions[i].outputs_from(&present) {
                    if Some(&m) != skip_molecule {
                        molecule_level.entry(m).or_insert(level + 1);
                    }
                }
            }
        }
        Self { reaction_level, molecule_level }
    }

    fn reaches(&self, reaction: usize) -> bool {
        self.reaction_level[reaction].is_some()
    }
}

/// Single-direction reactions, with `both` reactions split into halves.
fn expanded_reactions(input: &ReactionSystem) -> Vec<Reaction> {
    input.reactions().iter().flat_map(|r| r.split_both()).collect()
}

/// Which constructible reactions require which others.
///
/// Nodes are the names of the reactions reachable from food, with `both`
/// reactions split into `name[+]` and `name[-]`. Knock-outs run in
/// parallel within each level.
pub fn reaction_dependency_graph(input: &ReactionSystem, progress: &dyn Progress) -> Result<DependencyGraph<String>, Canceled> {
    progress.set_tasks("Reaction dependencies", input.name());
    let reactions = expanded_reactions(input);
    let full = Construction::run(input.foods(), &reactions, None, None);
    let mut nodes: Vec<usize> = (0..reactions.len()).filter(|&i| full.reaches(i)).collect();
    nodes.sort_by_key(|&i| (full.reaction_level[i], i));
    let index: AHashMap<usize, usize> = nodes.iter().enumerate().map(|(k, &i)| (i, k)).collect();
    let depth = nodes.last().and_then(|&i| full.reaction_level[i]).map_or(0, |l| l + 1);
    debug!("Reaction dependencies: {} of {} reactions in {} levels", nodes.len(), reactions.len(), depth);

    progress.set_maximum(nodes.len() as u64);
    progress.set_progress(0);
    let mut depends = Array2::from_elem((nodes.len(), nodes.len()), false);
    for level in 0..depth {
        progress.set_subtask(&format!("level {} of {}", level + 1, depth));
        let batch: Vec<usize> = nodes.iter().copied().filter(|&i| full.reaction_level[i] == Some(level)).collect();
        let lost: Vec<(usize, Vec<usize>)> = batch
            .par_iter()
            .map(|&p| -> Result<(usize, Vec<usize>), Canceled> {
                progress.check_for_cancel()?;
                let knocked = Construction::run(input.foods(), &reactions, Some(p), None);
                let lost = nodes.iter().copied().filter(|&r| r != p && !knocked.reaches(r)).collect();
                progress.increment_progress();
                Ok((p, lost))
            })
            .collect::<Result<Vec<_>, _>>()?;
        for (p, targets) in lost {
            for r in targets {
                depends[[index[&p], index[&r]]] = true;
            }
        }
    }

    let ids = nodes.iter().map(|&i| reactions[i].name().to_string()).collect();
    let levels = nodes.iter().map(|&i| full.reaction_level[i].unwrap_or(0)).collect();
    let graph = DependencyGraph::from_matrix(ids, levels, &depends);
    info!("Reaction dependencies: {} nodes, {} edges", graph.nodes.len(), graph.edges.len());
    Ok(graph)
}

/// Which reachable molecules require which others. A molecule is knocked
/// out by removing it from food and never producing it.
pub fn molecule_dependency_graph(input: &ReactionSystem, progress: &dyn Progress) -> Result<DependencyGraph<MoleculeType>, Canceled> {
    progress.set_tasks("Molecule dependencies", input.name());
    let reactions = expanded_reactions(input);
    let full = Construction::run(input.foods(), &reactions, None, None);
    let nodes: Vec<(MoleculeType, usize)> = full.molecule_level.iter().map(|(m, &l)| (m.clone(), l)).collect();
    debug!("Molecule dependencies: {} reachable molecules", nodes.len());

    progress.set_maximum(nodes.len() as u64);
    progress.set_progress(0);
    let lost: Vec<Vec<usize>> = nodes
        .par_iter()
        .map(|(m, _)| -> Result<Vec<usize>, Canceled> {
            progress.check_for_cancel()?;
            let knocked = Construction::run(input.foods(), &reactions, None, Some(m));
            let lost = nodes
                .iter()
                .enumerate()
                .filter(|(_, (x, _))| x != m && !knocked.molecule_level.contains_key(x))
                .map(|(k, _)| k)
                .collect();
            progress.increment_progress();
            Ok(lost)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut depends = Array2::from_elem((nodes.len(), nodes.len()), false);
    for (p, targets) in lost.into_iter().enumerate() {
        for r in targets {
            depends[[p, r]] = true;
        }
    }
    let (ids, levels) = nodes.into_iter().unzip();
    let graph = DependencyGraph::from_matrix(ids, levels, &depends);
    info!("Molecule dependencies: {} nodes, {} edges", graph.nodes.len(), graph.edges.len());
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CancelAfter, Silent};
    use crate::testing::{rx, rx_dir, system};
    use raf_model::Direction;

    fn s(x: &str) -> String {
        x.to_string()
    }

    fn network() -> ReactionSystem {
        system(&["A", "F"], [
            rx("r1", "A", "B", "F"),
            rx("r2", "B", "C", "F"),
            rx("r3", "C", "D", "B"),
            rx("r4", "A", "E", "F"),
            rx("r5", "E C", "G", "F"),
            rx("r6", "X", "Y", "F"),
        ])
    }

    #[test]
    fn test_reaction_levels() {
        let g = reaction_dependency_graph(&network(), &Silent).unwrap();
        let ids: Vec<&str> = g.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2", "r3", "r4", "r5"]);
        assert_eq!(g.level_of(&s("r1")), Some(0));
        assert_eq!(g.level_of(&s("r4")), Some(0));
        assert_eq!(g.level_of(&s("r2")), Some(1));
        assert_eq!(g.level_of(&s("r3")), Some(2));
        assert_eq!(g.level_of(&s("r5")), Some(2));
        assert_eq!(g.level_of(&s("r6")), None);
        assert_eq!(g.depth(), 3);
    }

    #[test]
    fn test_reaction_edges_are_reduced() {
        let g = reaction_dependency_graph(&network(), &Silent).unwrap();
        assert_eq!(g.edges(), &[
            (s("r1"), s("r2")),
            (s("r2"), s("r3")),
            (s("r2"), s("r5")),
            (s("r4"), s("r5")),
        ]);
        assert!(!g.has_edge(&s("r1"), &s("r3")));
    }

    #[test]
    fn test_alternative_routes_are_not_dependencies() {
        let rs = system(&["A"], [
            rx("p1", "A", "B", "A"),
            rx("p2", "A", "B", "A"),
            rx("r", "B", "C", "A"),
        ]);
        let g = reaction_dependency_graph(&rs, &Silent).unwrap();
        assert!(g.edges().is_empty());
    }

    #[test]
    fn test_both_reactions_are_split() {
        let rs = system(&["A", "D"], [
            rx_dir("r", "A", "B", "", Direction::Both),
            rx_dir("s", "B", "C", "", Direction::Forward),
            rx_dir("t", "E", "D", "", Direction::Reverse),
        ]);
        let g = reaction_dependency_graph(&rs, &Silent).unwrap();
        let ids: Vec<&str> = g.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["r[+]", "r[-]", "s", "t"]);
        assert_eq!(g.level_of(&s("r[-]")), Some(1));
        assert_eq!(g.edges(), &[(s("r[+]"), s("r[-]")), (s("r[+]"), s("s"))]);
    }

    #[test]
    fn test_molecule_dependencies() {
        let g = molecule_dependency_graph(&network(), &Silent).unwrap();
        let m = MoleculeType::new;
        assert_eq!(g.level_of(&m("A")), Some(0));
        assert_eq!(g.level_of(&m("B")), Some(1));
        assert_eq!(g.level_of(&m("G")), Some(3));
        assert_eq!(g.level_of(&m("Y")), None);
        assert!(g.has_edge(&m("A"), &m("B")));
        assert!(g.has_edge(&m("B"), &m("C")));
        assert!(g.has_edge(&m("C"), &m("G")));
        assert!(g.has_edge(&m("E"), &m("G")));
        assert!(!g.has_edge(&m("A"), &m("C")));
        // F catalyzes almost everything and is food, so it is a root.
        assert!(g.has_edge(&m("F"), &m("B")));
        assert!(g.has_edge(&m("F"), &m("E")));
    }

    /// Closes `edges` over `n` nodes.
    fn closed(n: usize, edges: &[(usize, usize)]) -> Array2<bool> {
        let mut m = Array2::from_elem((n, n), false);
        for &(p, r) in edges {
            m[[p, r]] = true;
        }
        for q in 0..n {
            for p in 0..n {
                for r in 0..n {
                    if m[[p, q]] && m[[q, r]] {
                        m[[p, r]] = true;
                    }
                }
            }
        }
        m
    }

    fn naive_reduction(m: &Array2<bool>) -> Vec<(usize, usize)> {
        let n = m.nrows();
        let mut edges = Vec::new();
        for p in 0..n {
            for r in 0..n {
                if m[[p, r]] && !(0..n).any(|q| m[[p, q]] && m[[q, r]]) {
                    edges.push((p, r));
                }
            }
        }
        edges
    }

    #[test]
    fn test_reduction_of_a_diamond() {
        let base = [(0, 2), (1, 2), (2, 3), (2, 4), (3, 5), (4, 5)];
        let g = DependencyGraph::from_matrix((0..6).collect(), vec![0, 0, 1, 2, 2, 3], &closed(6, &base));
        assert_eq!(g.edges(), &base);
    }

    #[test]
    fn test_reduction_matches_pairwise_check() {
        use rand::{Rng, SeedableRng};
        use rand::rngs::StdRng;
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let n = 24;
            let levels: Vec<usize> = (0..n).map(|_| rng.random_range(0..6)).collect();
            let base: Vec<(usize, usize)> = (0..3 * n)
                .map(|_| (rng.random_range(0..n), rng.random_range(0..n)))
                .filter(|&(p, r)| levels[p] < levels[r])
                .collect();
            let m = closed(n, &base);
            let g = DependencyGraph::from_matrix((0..n).collect(), levels, &m);
            assert_eq!(g.edges(), &naive_reduction(&m)[..]);
        }
    }

    #[test]
    fn test_graph_serializes() {
        let g = reaction_dependency_graph(&network(), &Silent).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert!(json.contains("\"edges\":[[\"r1\",\"r2\"]"));
        assert!(json.contains("{\"id\":\"r5\",\"level\":2}"));
    }

    #[test]
    fn test_cancel() {
        assert_eq!(reaction_dependency_graph(&network(), &CancelAfter::new(0)), Err(Canceled));
        assert_eq!(molecule_dependency_graph(&network(), &CancelAfter::new(0)), Err(Canceled));
    }
}
