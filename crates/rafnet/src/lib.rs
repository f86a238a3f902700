//! # rafnet
//!
//! Analysis of catalytic reaction networks under RAF theory.
//!
//! This crate re-exports the data model and the algorithms, and provides
//! the input, argument and progress plumbing shared by the `rafnet-*`
//! binaries.

pub mod input_parsers;
pub mod algorithm_parsers;
pub mod progress_bar;

pub mod model {
    pub use ::raf_model::*;
}

pub mod algorithms {
    pub use ::raf_algorithms::*;
}

use std::io::Write;
use env_logger::Builder;

/// Logging for the binaries: `-v` = info, `-vv` = debug, `RUST_LOG`
/// overrides both.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            writeln!(buf, "{}", record.args())
        })
        .init();
}
