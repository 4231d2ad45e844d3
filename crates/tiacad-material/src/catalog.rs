//! Built-in material catalog, plus user-defined catalog entries that may
//! extend a built-in one via `base:`.

use std::collections::HashMap;

use crate::color::Color;
use crate::error::{MaterialError, MaterialErrorKind, MaterialResult};
use crate::material::{Material, MaterialSpec};

const BUILTIN: &[(&str, Material)] = &[
    ("aluminum", Material::new(Color::rgb(0.91, 0.92, 0.92), 1.0, 0.35, 1.0)),
    ("stainless-steel", Material::new(Color::rgb(0.72, 0.73, 0.74), 1.0, 0.30, 1.0)),
    ("mild-steel", Material::new(Color::rgb(0.56, 0.57, 0.58), 1.0, 0.45, 1.0)),
    ("brass", Material::new(Color::rgb(0.78, 0.66, 0.28), 1.0, 0.30, 1.0)),
    ("bronze", Material::new(Color::rgb(0.65, 0.48, 0.25), 1.0, 0.35, 1.0)),
    ("copper", Material::new(Color::rgb(0.80, 0.45, 0.30), 1.0, 0.30, 1.0)),
    ("gold", Material::new(Color::rgb(1.0, 0.843, 0.0), 1.0, 0.20, 1.0)),
    ("silver", Material::new(Color::rgb(0.95, 0.94, 0.88), 1.0, 0.15, 1.0)),
    ("titanium", Material::new(Color::rgb(0.54, 0.52, 0.50), 1.0, 0.40, 1.0)),
    ("cast-iron", Material::new(Color::rgb(0.25, 0.25, 0.25), 0.9, 0.60, 1.0)),
    ("chrome", Material::new(Color::rgb(0.77, 0.78, 0.78), 1.0, 0.05, 1.0)),
    ("pla-plastic", Material::new(Color::rgb(0.85, 0.85, 0.85), 0.0, 0.55, 1.0)),
    ("abs-plastic", Material::new(Color::rgb(0.85, 0.85, 0.85), 0.0, 0.50, 1.0)),
    ("petg-plastic", Material::new(Color::rgb(0.85, 0.85, 0.85), 0.0, 0.35, 1.0)),
    ("nylon", Material::new(Color::rgb(0.90, 0.89, 0.85), 0.0, 0.60, 1.0)),
    ("polycarbonate", Material::new(Color::rgb(0.90, 0.92, 0.93), 0.0, 0.20, 0.85)),
    ("acrylic", Material::new(Color::rgb(0.92, 0.95, 0.97), 0.0, 0.10, 0.70)),
    ("rubber", Material::new(Color::rgb(0.10, 0.10, 0.10), 0.0, 0.90, 1.0)),
    ("silicone", Material::new(Color::rgb(0.80, 0.78, 0.75), 0.0, 0.70, 1.0)),
    ("glass", Material::new(Color::rgb(0.90, 0.95, 0.97), 0.0, 0.05, 0.20)),
    ("ceramic", Material::new(Color::rgb(0.93, 0.92, 0.89), 0.0, 0.25, 1.0)),
    ("oak", Material::new(Color::rgb(0.63, 0.49, 0.32), 0.0, 0.75, 1.0)),
    ("pine", Material::new(Color::rgb(0.80, 0.67, 0.45), 0.0, 0.75, 1.0)),
    ("walnut", Material::new(Color::rgb(0.36, 0.25, 0.18), 0.0, 0.70, 1.0)),
    ("mdf", Material::new(Color::rgb(0.76, 0.68, 0.55), 0.0, 0.85, 1.0)),
    ("plywood", Material::new(Color::rgb(0.78, 0.65, 0.44), 0.0, 0.80, 1.0)),
    ("concrete", Material::new(Color::rgb(0.60, 0.60, 0.58), 0.0, 0.95, 1.0)),
    ("cardboard", Material::new(Color::rgb(0.66, 0.53, 0.36), 0.0, 0.95, 1.0)),
    ("leather", Material::new(Color::rgb(0.40, 0.26, 0.18), 0.0, 0.65, 1.0)),
    ("fabric", Material::new(Color::rgb(0.70, 0.70, 0.70), 0.0, 0.95, 1.0)),
    ("carbon-fiber", Material::new(Color::rgb(0.08, 0.08, 0.09), 0.2, 0.30, 1.0)),
];

/// A catalog of named materials: the built-in set plus user-defined
/// extensions registered from a document's `materials:` block.
#[derive(Debug, Clone)]
pub struct Catalog {
    user: HashMap<String, Material>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            user: HashMap::new(),
        }
    }

    /// Look up a material by name, checking user-defined entries first so a
    /// document may shadow a built-in name.
    pub fn get(&self, name: &str) -> Option<Material> {
        self.user.get(name).copied().or_else(|| {
            BUILTIN
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, m)| *m)
        })
    }

    /// Resolve and register a user-defined material spec under `name`,
    /// which may itself extend any already-registered or built-in entry.
    pub fn define(&mut self, name: impl Into<String>, spec: &MaterialSpec) -> MaterialResult<()> {
        let material = spec.resolve(|base| self.get(base))?;
        self.user.insert(name.into(), material);
        Ok(())
    }

    /// Look up a material, producing an error with a "did you mean"
    /// suggestion if the name is close to a known one.
    pub fn require(&self, name: &str) -> MaterialResult<Material> {
        self.get(name).ok_or_else(|| {
            let suggestion = self.nearest_name(name);
            let hint = suggestion
                .map(|s| format!(" (did you mean '{s}'?)"))
                .unwrap_or_default();
            MaterialError::new(
                MaterialErrorKind::UnknownMaterial,
                format!("no material named '{name}'{hint}"),
            )
        })
    }

    fn nearest_name(&self, name: &str) -> Option<String> {
        let candidates = BUILTIN
            .iter()
            .map(|(n, _)| n.to_string())
            .chain(self.user.keys().cloned());
        candidates
            .map(|candidate| (levenshtein(name, &candidate), candidate))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, candidate)| candidate)
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for i in 1..=a.len() {
        let mut prev_diag = row[0];
        row[0] = i;
        for j in 1..=b.len() {
            let cur = row[j];
            row[j] = if a[i - 1] == b[j - 1] {
                prev_diag
            } else {
                1 + prev_diag.min(row[j]).min(row[j - 1])
            };
            prev_diag = cur;
        }
    }
    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorSpec;
    use crate::material::StructuredMaterialSpec;

    #[test]
    fn builtin_material_is_found() {
        let catalog = Catalog::new();
        let aluminum = catalog.get("aluminum").unwrap();
        assert_eq!(aluminum.metallic, 1.0);
    }

    #[test]
    fn user_material_can_extend_builtin() {
        let mut catalog = Catalog::new();
        let spec = MaterialSpec::Structured(StructuredMaterialSpec {
            base: Some("aluminum".into()),
            color: Some(ColorSpec::Triplet([0.1, 0.1, 0.1])),
            metallic: None,
            roughness: None,
            opacity: None,
        });
        catalog.define("anodized-aluminum", &spec).unwrap();
        let material = catalog.get("anodized-aluminum").unwrap();
        assert_eq!(material.metallic, 1.0);
        assert_eq!(material.base_color.r, 0.1);
    }

    #[test]
    fn user_material_can_shadow_builtin_name() {
        let mut catalog = Catalog::new();
        let spec = MaterialSpec::BareColor(ColorSpec::Triplet([0.0, 0.0, 0.0]));
        catalog.define("gold", &spec).unwrap();
        let material = catalog.get("gold").unwrap();
        assert_eq!(material.base_color.r, 0.0);
    }

    #[test]
    fn require_suggests_close_name() {
        let catalog = Catalog::new();
        let err = catalog.require("alumnium").unwrap_err();
        assert!(err.message.contains("aluminum"));
    }

    #[test]
    fn builtin_catalog_has_at_least_thirty_entries() {
        assert!(BUILTIN.len() >= 30);
    }
}
