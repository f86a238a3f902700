use std::fmt;
use std::error::Error;

use crate::CatalystError;

#[derive(Debug)]
pub enum ModelError {
    Catalyst { reaction: String, source: CatalystError },
    NoReactants(String),
    NoProducts(String),
    ConjunctionMolecule(String),
    DuplicateReaction(String),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalyst { reaction, source } =>
                write!(f, "Reaction '{reaction}': malformed catalysts: {source}"),
            Self::NoReactants(name) =>
                write!(f, "Reaction '{name}' has no reactants"),
            Self::NoProducts(name) =>
                write!(f, "Reaction '{name}' has no products"),
            Self::ConjunctionMolecule(name) =>
                write!(f, "Conjunction '{name}' cannot be a reactant or product"),
            Self::DuplicateReaction(name) =>
                write!(f, "Reaction name '{name}' is used more than once"),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Json(e) => write!(f, "JSON parse error: {}", e),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Catalyst { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ModelError {
    fn from(e: std::io::Error) -> Self { Self::Io(e) }
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self { Self::Json(e) }
}
