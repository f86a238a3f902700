use rayon::prelude::*;
use raf_model::{ReactionSet, ReactionSystem};

use crate::*;
use crate::min_iraf::named_results;

/// Wraps an exact `fn(&ReactionSystem, &dyn Progress)` algorithm.
macro_rules! exact_algorithm {
    ($ty:ident, $name:expr, $func:ident, $description:expr) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $ty;

        impl RafAlgorithm for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn description(&self) -> &'static str {
                $description
            }

            fn apply(&self, input: &ReactionSystem, _params: &HeuristicParams, progress: &dyn Progress)
                -> Result<AlgorithmOutput, Canceled> {
                Ok(AlgorithmOutput::complete($func(input, progress)?))
            }
        }
    };
}

exact_algorithm!(MaxCafAlgorithm, MAX_CAF, max_caf,
    "Computes the maximal CAF: the reactions constructible from food in forward order.");
exact_algorithm!(MaxRafAlgorithm, MAX_RAF, max_raf,
    "Computes the maximal RAF: every reaction is catalyzed and food-generated within the set.");
exact_algorithm!(MaxPseudoRafAlgorithm, MAX_PSEUDO_RAF, max_pseudo_raf,
    "Computes the maximal pseudo RAF, which does not require reactants to be food-generated.");
exact_algorithm!(StrictMaxRafAlgorithm, STRICT_MAX_RAF, strict_max_raf,
    "Computes the maximal RAF in which every reaction is catalyzed by a network product.");
exact_algorithm!(URafAlgorithm, U_RAF, u_raf,
    "Computes the maximal RAF without reactions inhibited by food or by anything it produces.");
exact_algorithm!(CoreRafAlgorithm, CORE_RAF, core_raf,
    "Computes the unique irreducible RAF, if it exists.");
exact_algorithm!(QuotientRafAlgorithm, QUOTIENT_RAF, quotient_raf,
    "Computes what remains of the maximal RAF once its maximal CAF is added to the food.");
exact_algorithm!(TrivialCafsAlgorithm, TRIVIAL_CAFS, trivial_cafs,
    "Finds the reactions that run on food and are catalyzed by food.");
exact_algorithm!(TrivialRafsAlgorithm, TRIVIAL_RAFS, trivial_rafs,
    "Finds the reactions that run on food and are catalyzed by food or their own products.");

/// Runs [`mu_caf`] once per seed and keeps the distinct largest results.
#[derive(Debug, Clone, Copy)]
pub struct MuCafAlgorithm;

impl RafAlgorithm for MuCafAlgorithm {
    fn name(&self) -> &'static str {
        MU_CAF
    }

    fn description(&self) -> &'static str {
        "Samples maximal uninhibited CAFs by greedy construction in random reaction orders."
    }

    fn apply(&self, input: &ReactionSystem, params: &HeuristicParams, progress: &dyn Progress)
        -> Result<AlgorithmOutput, Canceled> {
        let nested = Nested::new(progress);
        let found = params
            .seeds()
            .par_iter()
            .map(|&seed| mu_caf(input, seed, &nested).map(|rs| rs.reactions().clone()))
            .collect::<Result<Vec<ReactionSet>, _>>()?;
        let largest = found.iter().map(|set| set.len()).max().unwrap_or(0);
        let mut best: Vec<ReactionSet> = found.into_iter().filter(|set| set.len() == largest).collect();
        best.sort();
        best.dedup();
        if best.is_empty() {
            best.push(ReactionSet::new());
        }
        Ok(named_results(MU_CAF, input.foods(), best, false))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MinIrafAlgorithm;

impl RafAlgorithm for MinIrafAlgorithm {
    fn name(&self) -> &'static str {
        MIN_IRAF
    }

    fn description(&self) -> &'static str {
        "Heuristically searches for the smallest irreducible RAFs by random-order removal."
    }

    fn is_heuristic(&self) -> bool {
        true
    }

    fn apply(&self, input: &ReactionSystem, params: &HeuristicParams, progress: &dyn Progress)
        -> Result<AlgorithmOutput, Canceled> {
        Ok(min_iraf(input, &params.seeds(), progress))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RemoveTrivialRafsAlgorithm;

impl RafAlgorithm for RemoveTrivialRafsAlgorithm {
    fn name(&self) -> &'static str {
        REMOVE_TRIVIAL_RAFS
    }

    fn description(&self) -> &'static str {
        "Removes sampled trivial reactions from the maximal RAF and adds their outputs to the food."
    }

    fn is_heuristic(&self) -> bool {
        true
    }

    fn apply(&self, input: &ReactionSystem, params: &HeuristicParams, progress: &dyn Progress)
        -> Result<AlgorithmOutput, Canceled> {
        Ok(remove_trivial_rafs(input, &params.derived_seeds(2 * input.size()), progress))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MinRafGeneratingElementAlgorithm;

impl RafAlgorithm for MinRafGeneratingElementAlgorithm {
    fn name(&self) -> &'static str {
        MIN_RAF_GENERATING_ELEMENT
    }

    fn description(&self) -> &'static str {
        "Heuristically searches for the smallest RAFs that generate the target molecules."
    }

    fn is_heuristic(&self) -> bool {
        true
    }

    fn apply(&self, input: &ReactionSystem, params: &HeuristicParams, progress: &dyn Progress)
        -> Result<AlgorithmOutput, Canceled> {
        Ok(min_raf_generating_element(input, &params.target_set(), &params.seeds(), progress))
    }
}
