use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::MoleculeType;
use crate::Direction;
use crate::Reaction;
use crate::ReactionSystem;
use crate::ModelError;

#[derive(Debug, Serialize, Deserialize)]
pub struct SerializableReactionSystem {
    #[serde(default)]
    name: String,
    #[serde(default)]
    food: Vec<String>,
    #[serde(default)]
    reactions: Vec<SerializableReaction>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SerializableReaction {
    name: String,
    reactants: Vec<String>,
    products: Vec<String>,
    #[serde(default)]
    catalysts: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    inhibitors: Vec<String>,
    #[serde(default)]
    direction: Direction,
}

impl From<&Reaction> for SerializableReaction {
    fn from(r: &Reaction) -> Self {
        let names = |set: &crate::MoleculeSet| -> Vec<String> { set.iter().map(|m| m.name().to_string()).collect() };
        SerializableReaction {
            name: r.name().to_string(),
            reactants: names(r.reactants()),
            products: names(r.products()),
            catalysts: r.catalyst_expression(),
            inhibitors: names(r.inhibitors()),
            direction: r.direction(),
        }
    }
}

impl TryFrom<&SerializableReaction> for Reaction {
    type Error = ModelError;

    fn try_from(s: &SerializableReaction) -> Result<Self, Self::Error> {
        Reaction::new(
            &s.name,
            s.reactants.iter().map(|n| n.as_str()),
            s.products.iter().map(|n| n.as_str()),
            &s.catalysts,
            s.inhibitors.iter().map(|n| n.as_str()),
            s.direction,
        )
    }
}

impl ReactionSystem {
    pub fn to_serializable(&self) -> SerializableReactionSystem {
        SerializableReactionSystem {
            name: self.name().to_string(),
            food: self.foods().iter().map(|m| m.name().to_string()).collect(),
            reactions: self.reactions().iter().map(|r| SerializableReaction::from(&**r)).collect(),
        }
    }

    pub fn from_serializable(serial: &SerializableReactionSystem) -> Result<Self, ModelError> {
        let reactions = serial.reactions
            .iter()
            .map(Reaction::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let foods = serial.food.iter().map(|n| MoleculeType::new(n)).collect();
        ReactionSystem::try_from_reactions(&serial.name, foods, reactions)
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let serial: SerializableReactionSystem = serde_json::from_str(json)?;
        Self::from_serializable(&serial)
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(&self.to_serializable())?)
    }

    /// Load a reaction system from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = r#"{
        "name": "io-test",
        "food": ["A", "B"],
        "reactions": [
            { "name": "r1", "reactants": ["A", "B"], "products": ["C"], "catalysts": "(A,C)&B" },
            { "name": "r0", "reactants": ["C"], "products": ["D"], "catalysts": "D",
              "inhibitors": ["A"], "direction": "both" }
        ]
    }"#;

    #[test]
    fn test_load_normalizes_catalysts() {
        let rs = ReactionSystem::from_json(INPUT).unwrap();
        assert_eq!(rs.name(), "io-test");
        assert_eq!(rs.reaction_names(), vec!["r0", "r1"]);
        let r1 = rs.reaction_by_name("r1").unwrap();
        assert_eq!(r1.catalyst_expression(), "A&B,B&C");
        assert_eq!(r1.direction(), Direction::Forward);
        let r0 = rs.reaction_by_name("r0").unwrap();
        assert_eq!(r0.direction(), Direction::Both);
        assert_eq!(r0.inhibitors().len(), 1);
    }

    #[test]
    fn test_written_form_loads_back_equal() {
        let rs = ReactionSystem::from_json(INPUT).unwrap();
        let json = rs.to_json().unwrap();
        assert!(json.contains("\"direction\": \"both\""));
        let back = ReactionSystem::from_json(&json).unwrap();
        assert_eq!(rs, back);
        assert_eq!(back.reaction_by_name("r1").unwrap().catalyst_expression(), "A&B,B&C");
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        let bad = r#"{ "food": ["A"], "reactions": [
            { "name": "r", "reactants": ["A"], "products": ["B"], "catalysts": "A&(B" } ] }"#;
        assert!(matches!(ReactionSystem::from_json(bad), Err(ModelError::Catalyst { .. })));

        let bad = r#"{ "food": ["A"], "reactions": [
            { "name": "r", "reactants": ["A"], "products": ["B"], "direction": "sideways" } ] }"#;
        assert!(matches!(ReactionSystem::from_json(bad), Err(ModelError::Json(_))));
    }
}
