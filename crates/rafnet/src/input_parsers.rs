use std::fs::File;
use std::io::{stdin, BufRead, BufReader, Cursor, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use paste::paste;
use serde::Serialize;
use raf_model::{ReactionSystem, SerializableReactionSystem};

/// Reads a reaction system in its JSON form.
///
/// An unnamed system is called "input", so that results can refer to it.
pub fn read_reaction_system<R: BufRead>(mut reader: R) -> Result<ReactionSystem> {
    let mut data = String::new();
    reader.read_to_string(&mut data)?;
    let mut system = ReactionSystem::from_json(&data)
        .context("Failed to read reaction system")?;
    if system.name().is_empty() {
        system.set_name("input");
    }
    Ok(system)
}

/// Generate input adapters for a base parser function `fn base<R: BufRead>(R) -> Result<T>`.
///
/// This expands into:
/// - `base_string(&str)`
/// - `base_file<P: AsRef<Path>>(P)`
/// - `base_stdin()`
/// - `base_input(&str)`  (dispatches "-" → stdin, otherwise → file)
macro_rules! define_input_variants {
    ($base:ident, $ret:ty) => {
        paste! {
            /// Read from a string buffer.
            pub fn [<$base _string>](s: &str) -> $ret {
                $base(Cursor::new(s))
            }

            /// Read from a file path.
            pub fn [<$base _file>]<P: AsRef<Path>>(path: P) -> $ret {
                let path = path.as_ref();
                let file = File::open(path)
                    .with_context(|| format!("Cannot open {}", path.display()))?;
                $base(BufReader::new(file))
            }

            /// Read from stdin.
            pub fn [<$base _stdin>]() -> $ret {
                let reader = BufReader::new(stdin());
                $base(reader)
            }

            /// Read either from stdin ("-") or a file path.
            pub fn [<$base _input>](s: &str) -> $ret {
                if s == "-" {
                    [<$base _stdin>]()
                } else {
                    [<$base _file>](s)
                }
            }
        }
    };
}

define_input_variants!(read_reaction_system, Result<ReactionSystem>);

/// Writes `value` as pretty JSON to `path`, or to stdout for "-".
pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    if path == "-" {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", json)?;
    } else {
        std::fs::write(path, json + "\n")
            .with_context(|| format!("Cannot write {}", path))?;
    }
    Ok(())
}

/// The JSON form of several result systems.
pub fn serializable_systems(systems: &[ReactionSystem]) -> Vec<SerializableReactionSystem> {
    systems.iter().map(|s| s.to_serializable()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_reaction_system_string() {
        let input = r#"{ "food": ["A"], "reactions": [
            { "name": "r1", "reactants": ["A"], "products": ["B"], "catalysts": "A" } ] }"#;
        let rs = read_reaction_system_string(input).unwrap();
        assert_eq!(rs.name(), "input");
        assert_eq!(rs.size(), 1);
    }

    #[test]
    fn test_read_errors() {
        assert!(read_reaction_system_string("{ \"food\": [").is_err());
        assert!(read_reaction_system_file("/nonexistent/rafnet.json").is_err());
    }

    #[test]
    fn test_serializable_systems() {
        let input = r#"{ "name": "net", "food": ["A"], "reactions": [] }"#;
        let rs = read_reaction_system_string(input).unwrap();
        let json = serde_json::to_string(&serializable_systems(&[rs])).unwrap();
        assert!(json.starts_with("[{\"name\":\"net\""));
    }
}
