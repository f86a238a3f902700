//! # raf_model
//!
//! Molecules, catalyst expressions, reactions and reaction systems: the
//! data model shared by every RAF algorithm.

mod error;
mod molecule;
mod catalysts;
mod reaction;
mod reaction_system;
mod system_io;

pub use error::*;
pub use molecule::*;
pub use catalysts::*;
pub use reaction::*;
pub use reaction_system::*;
pub use system_io::*;
