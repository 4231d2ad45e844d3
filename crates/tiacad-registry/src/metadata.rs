//! Per-part appearance and provenance metadata, and the merge rules that
//! operations apply when they produce new parts from existing ones.

use tiacad_material::Material;

/// Color and material attached to a part, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Appearance {
    pub material: Option<Material>,
}

impl Appearance {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Metadata carried alongside a part's geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartMetadata {
    pub primitive_type: Option<String>,
    pub appearance: Appearance,
    pub source_operation: Option<String>,
}

impl PartMetadata {
    pub fn new(primitive_type: impl Into<String>) -> Self {
        Self {
            primitive_type: Some(primitive_type.into()),
            appearance: Appearance::none(),
            source_operation: None,
        }
    }

    /// Metadata for a part produced by an operation from a single source
    /// part (transform, finishing): copies the source's appearance unless
    /// `override_appearance` supplies one.
    pub fn derive_single(
        source: &PartMetadata,
        operation: impl Into<String>,
        override_appearance: Option<Appearance>,
    ) -> Self {
        Self {
            primitive_type: source.primitive_type.clone(),
            appearance: override_appearance.unwrap_or(source.appearance),
            source_operation: Some(operation.into()),
        }
    }

    /// Metadata for a part produced by a boolean or hull over several
    /// inputs: the first input's appearance wins, per the propagation
    /// rule for `union`/`difference`/`intersection`.
    pub fn derive_from_first(
        inputs: &[&PartMetadata],
        operation: impl Into<String>,
    ) -> Self {
        let appearance = inputs.first().map(|m| m.appearance).unwrap_or_default();
        Self {
            primitive_type: None,
            appearance,
            source_operation: Some(operation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_single_keeps_source_appearance_by_default() {
        let mut source = PartMetadata::new("box");
        source.appearance = Appearance {
            material: Some(tiacad_material::Material::new(
                tiacad_material::Color::WHITE,
                0.0,
                0.5,
                1.0,
            )),
        };
        let derived = PartMetadata::derive_single(&source, "transform", None);
        assert_eq!(derived.appearance, source.appearance);
    }

    #[test]
    fn derive_from_first_picks_first_inputs_appearance() {
        let mut a = PartMetadata::new("box");
        a.appearance.material = Some(Material::new(tiacad_material::Color::WHITE, 0.0, 0.5, 1.0));
        let b = PartMetadata::new("cylinder");
        let derived = PartMetadata::derive_from_first(&[&a, &b], "union");
        assert_eq!(derived.appearance, a.appearance);
    }
}
