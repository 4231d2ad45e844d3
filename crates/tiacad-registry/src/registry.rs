//! The append-only, order-preserving map of named parts built during a
//! build.

use std::collections::HashMap;

use crate::error::{RegistryError, RegistryErrorKind, RegistryResult};
use crate::part::Part;

/// The registry of named parts. Insertion order is preserved for
/// deterministic export; names are never removed.
#[derive(Default)]
pub struct PartRegistry {
    order: Vec<String>,
    parts: HashMap<String, Part>,
}

impl PartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new part. Fails with `DuplicatePart` if the name is
    /// already taken.
    pub fn insert(&mut self, part: Part) -> RegistryResult<()> {
        if self.parts.contains_key(&part.name) {
            return Err(RegistryError::new(
                RegistryErrorKind::DuplicatePart,
                format!("a part named '{}' already exists", part.name),
            ));
        }
        self.order.push(part.name.clone());
        self.parts.insert(part.name.clone(), part);
        Ok(())
    }

    pub fn get(&self, name: &str) -> RegistryResult<&Part> {
        self.parts.get(name).ok_or_else(|| {
            RegistryError::new(
                RegistryErrorKind::UnknownPart,
                format!("no part named '{name}'"),
            )
        })
    }

    pub fn get_mut(&mut self, name: &str) -> RegistryResult<&mut Part> {
        self.parts.get_mut(name).ok_or_else(|| {
            RegistryError::new(
                RegistryErrorKind::UnknownPart,
                format!("no part named '{name}'"),
            )
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    /// Names in insertion order, for deterministic export ordering.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::PartMetadata;
    use tiacad_geom::Solid;
    use tiacad_spatial::PartKind;

    fn part(name: &str) -> Part {
        Part::new(name, Solid::empty(), PartKind::Other, PartMetadata::new("box"))
    }

    #[test]
    fn insert_preserves_order() {
        let mut registry = PartRegistry::new();
        registry.insert(part("a")).unwrap();
        registry.insert(part("b")).unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn duplicate_insert_errors() {
        let mut registry = PartRegistry::new();
        registry.insert(part("a")).unwrap();
        let err = registry.insert(part("a")).unwrap_err();
        assert_eq!(err.kind, RegistryErrorKind::DuplicatePart);
    }

    #[test]
    fn unknown_get_errors() {
        let registry = PartRegistry::new();
        let err = registry.get("missing").unwrap_err();
        assert_eq!(err.kind, RegistryErrorKind::UnknownPart);
    }
}
