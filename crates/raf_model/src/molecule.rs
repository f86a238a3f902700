use std::fmt;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, Weak};
use ahash::AHashMap;
use log::debug;
use once_cell::sync::Lazy;
use serde::{Serialize, Serializer, Deserialize, Deserializer};

/// Separator of the elements of a catalyst conjunction, e.g. `A&B`.
pub const CONJUNCTION_SEPARATOR: char = '&';

/// An interned molecule name.
///
/// Two molecule types with equal names share the same allocation, so
/// cloning is cheap and equality usually resolves by pointer. Ordering is
/// lexicographic by name, which makes every set of molecule types
/// iterate in a canonical order.
///
/// A name containing [`CONJUNCTION_SEPARATOR`] denotes a *synthetic
/// conjunction molecule*: it only ever appears inside a catalyst
/// expression and stands for "all of these catalysts together".
///
/// # Example
/// ```rust
/// use raf_model::MoleculeType;
///
/// let a = MoleculeType::new("A");
/// let b = MoleculeType::new("A");
/// assert!(a.ptr_eq(&b));
/// assert!(!a.is_conjunction());
/// assert!(MoleculeType::new("A&B").is_conjunction());
/// ```
#[derive(Clone)]
pub struct MoleculeType(Arc<str>);

/// Registry size below which dead entries are left alone.
const PURGE_WATERMARK: usize = 1024;

struct MoleculeRegistry {
    by_name: AHashMap<String, Weak<str>>,
    next_purge: usize,
}

impl MoleculeRegistry {
    /// Drops entries whose molecule types are no longer alive once the map
    /// has grown to `next_purge`, then doubles the bound over the survivors.
    fn purge_if_due(&mut self) {
        if self.by_name.len() < self.next_purge {
            return;
        }
        let before = self.by_name.len();
        self.by_name.retain(|_, w| w.strong_count() > 0);
        self.next_purge = (2 * self.by_name.len()).max(PURGE_WATERMARK);
        debug!("Purged {} unused molecule types", before - self.by_name.len());
    }
}

static REGISTRY: Lazy<Mutex<MoleculeRegistry>> = Lazy::new(|| {
    Mutex::new(MoleculeRegistry {
        by_name: AHashMap::new(),
        next_purge: PURGE_WATERMARK,
    })
});

impl MoleculeType {
    /// Returns the canonical instance for `name`, creating it if needed.
    pub fn new(name: &str) -> Self {
        // A poisoned lock only means another thread panicked mid-insert;
        // the map itself is still consistent.
        let mut reg = REGISTRY.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = reg.by_name.get(name).and_then(|w| w.upgrade()) {
            return MoleculeType(existing);
        }
        reg.purge_if_due();
        let arc: Arc<str> = Arc::from(name);
        reg.by_name.insert(name.to_string(), Arc::downgrade(&arc));
        MoleculeType(arc)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_conjunction(&self) -> bool {
        self.0.contains(CONJUNCTION_SEPARATOR)
    }

    /// The individual molecules of a conjunction (or just `self`).
    pub fn conjunction_parts(&self) -> Vec<MoleculeType> {
        if self.is_conjunction() {
            self.0.split(CONJUNCTION_SEPARATOR).map(MoleculeType::new).collect()
        } else {
            vec![self.clone()]
        }
    }

    pub fn ptr_eq(&self, other: &MoleculeType) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for MoleculeType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for MoleculeType {}

impl PartialOrd for MoleculeType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MoleculeType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Hash for MoleculeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl fmt::Display for MoleculeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for MoleculeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoleculeType({})", self.0)
    }
}

impl From<&str> for MoleculeType {
    fn from(name: &str) -> Self {
        MoleculeType::new(name)
    }
}

impl Serialize for MoleculeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MoleculeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(MoleculeType::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_interning_shares_allocation() {
        let a = MoleculeType::new("mol_intern_x");
        let b = MoleculeType::new("mol_intern_x");
        assert!(a.ptr_eq(&b));
        assert_eq!(a, b);
        assert_eq!(a.name(), "mol_intern_x");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let set: BTreeSet<MoleculeType> = ["b", "C", "a", "b"].map(MoleculeType::new).into();
        let names: Vec<&str> = set.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["C", "a", "b"]);
    }

    #[test]
    fn test_conjunction_parts() {
        let c = MoleculeType::new("A&B&C");
        assert!(c.is_conjunction());
        let parts = c.conjunction_parts();
        assert_eq!(parts, ["A", "B", "C"].map(MoleculeType::new));

        let single = MoleculeType::new("A");
        assert_eq!(single.conjunction_parts(), vec![single.clone()]);
    }

    fn registry_len() -> usize {
        REGISTRY.lock().unwrap_or_else(|e| e.into_inner()).by_name.len()
    }

    #[test]
    fn test_dead_entries_are_purged() {
        let keep = MoleculeType::new("mol_purge_keep");
        for i in 0..8 * PURGE_WATERMARK {
            let _gone = MoleculeType::new(&format!("mol_purge_gone_{}", i));
        }
        // Other tests intern a few hundred names at most.
        assert!(registry_len() < 4 * PURGE_WATERMARK);
        let again = MoleculeType::new("mol_purge_keep");
        assert!(keep.ptr_eq(&again));
    }

    #[test]
    fn test_serde_roundtrip_reinterns() {
        let a = MoleculeType::new("mol_serde");
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "\"mol_serde\"");
        let back: MoleculeType = serde_json::from_str(&json).unwrap();
        assert!(back.ptr_eq(&a));
    }
}
