//! # raf_algorithms
//!
//! Fixed-point, heuristic and dependency algorithms over
//! [`ReactionSystem`](raf_model::ReactionSystem)s.
//!
//! Every algorithm is a plain function taking the input system and a
//! [`Progress`] handle. Exact algorithms return `Result<ReactionSystem,
//! Canceled>`; the randomized searches return an [`AlgorithmOutput`] that
//! is marked partial when they were canceled. The [`registry`] maps
//! display names such as `"Max RAF"` to a uniform [`RafAlgorithm`] entry
//! point.
//!
//! ```rust
//! use raf_model::ReactionSystem;
//! use raf_algorithms::{Silent, max_raf};
//!
//! let rs = ReactionSystem::from_json(r#"{
//!     "food": ["A"],
//!     "reactions": [
//!         { "name": "r1", "reactants": ["A"], "products": ["B"], "catalysts": "C" },
//!         { "name": "r2", "reactants": ["B"], "products": ["C"], "catalysts": "A" }
//!     ]
//! }"#).unwrap();
//! let raf = max_raf(&rs, &Silent).unwrap();
//! assert_eq!(raf.reaction_names(), vec!["r1", "r2"]);
//! ```

mod progress;
pub mod closure;
mod max_caf;
mod max_raf;
mod max_pseudo_raf;
mod strict_max_raf;
mod uninhibited;
mod min_iraf;
mod generating_element;
mod trivial;
mod derived;
mod importance;
mod dependency;
pub mod registry;

#[cfg(test)]
mod testing;

pub use progress::*;
pub use max_caf::*;
pub use max_raf::*;
pub use max_pseudo_raf::*;
pub use strict_max_raf::*;
pub use uninhibited::*;
pub use min_iraf::*;
pub use generating_element::*;
pub use trivial::*;
pub use derived::*;
pub use importance::*;
pub use dependency::*;
pub use registry::*;
