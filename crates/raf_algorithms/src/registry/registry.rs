use once_cell::sync::Lazy;

use crate::registry::RafAlgorithm;
use crate::registry::algorithms::*;

static ALL_ALGORITHMS: Lazy<Vec<&'static dyn RafAlgorithm>> = Lazy::new(|| {
    vec![
        &MaxCafAlgorithm,
        &MaxRafAlgorithm,
        &MaxPseudoRafAlgorithm,
        &StrictMaxRafAlgorithm,
        &MuCafAlgorithm,
        &URafAlgorithm,
        &CoreRafAlgorithm,
        &QuotientRafAlgorithm,
        &TrivialCafsAlgorithm,
        &TrivialRafsAlgorithm,
        &RemoveTrivialRafsAlgorithm,
        &MinIrafAlgorithm,
        &MinRafGeneratingElementAlgorithm,
    ]
});

pub fn all_algorithms() -> &'static [&'static dyn RafAlgorithm] {
    &ALL_ALGORITHMS
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Looks up an algorithm by display name, ignoring case and whitespace.
pub fn algorithm_by_name(name: &str) -> Option<&'static dyn RafAlgorithm> {
    let key = normalize(name);
    all_algorithms().iter().copied().find(|a| normalize(a.name()) == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeuristicParams, Silent, CancelAfter, Canceled};
    use crate::testing::{names, rx, rx_inh, system};

    #[test]
    fn test_names_are_unique_and_found() {
        let all = all_algorithms();
        assert_eq!(all.len(), 13);
        for a in all {
            let found = algorithm_by_name(a.name()).unwrap();
            assert_eq!(found.name(), a.name());
            assert!(!a.description().is_empty());
        }
        assert_eq!(algorithm_by_name("maxraf").unwrap().name(), "Max RAF");
        assert_eq!(algorithm_by_name("  MIN iRAF heuristic").unwrap().name(), "Min iRAF Heuristic");
        assert!(algorithm_by_name("Max XAF").is_none());
    }

    #[test]
    fn test_every_algorithm_runs() {
        let rs = system(&["A", "B"], [
            rx("r1", "A B", "C", "A"),
            rx("r2", "C", "D", "C"),
            rx_inh("r3", "A", "E", "D", "C"),
        ]);
        let params = HeuristicParams { trials: 4, seed: 1, targets: vec!["D".to_string()] };
        for a in all_algorithms() {
            let out = a.apply(&rs, &params, &Silent).unwrap();
            assert!(!out.partial, "{}", a.name());
            assert!(!out.systems.is_empty(), "{}", a.name());
            for s in &out.systems {
                assert!(s.name().starts_with(a.name()));
            }
        }
        let raf = algorithm_by_name("Max RAF").unwrap().apply(&rs, &params, &Silent).unwrap();
        assert_eq!(names(&raf.systems[0]), vec!["r1", "r2", "r3"]);
        let uraf = algorithm_by_name("Max uRAF").unwrap().apply(&rs, &params, &Silent).unwrap();
        assert_eq!(names(&uraf.systems[0]), vec!["r1", "r2"]);
    }

    #[test]
    fn test_cancellation_contracts() {
        let rs = system(&["A"], [rx("r1", "A", "B", "A"), rx("r2", "B", "C", "A")]);
        let params = HeuristicParams::with_seed(3);
        for a in all_algorithms() {
            let res = a.apply(&rs, &params, &CancelAfter::new(0));
            if a.is_heuristic() {
                assert!(res.unwrap().partial, "{}", a.name());
            } else {
                assert_eq!(res, Err(Canceled), "{}", a.name());
            }
        }
    }
}
