pub mod algorithm;
pub mod algorithms;
pub mod registry;

pub use algorithm::*;
pub use algorithms::*;
pub use registry::*;
