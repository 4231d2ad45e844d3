//! PBR material definitions and their document-facing spec shape.

use serde::Deserialize;

use crate::color::{Color, ColorSpec};
use crate::error::{MaterialError, MaterialErrorKind, MaterialResult};

/// A fully resolved PBR material, ready to attach to a part or face group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub base_color: Color,
    pub metallic: f32,
    pub roughness: f32,
    pub opacity: f32,
}

impl Material {
    pub const fn new(base_color: Color, metallic: f32, roughness: f32, opacity: f32) -> Self {
        Self {
            base_color,
            metallic,
            roughness,
            opacity,
        }
    }

    fn validate(&self) -> MaterialResult<()> {
        for (name, value) in [
            ("metallic", self.metallic),
            ("roughness", self.roughness),
            ("opacity", self.opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MaterialError::new(
                    MaterialErrorKind::OutOfRange,
                    format!("{name} must be in [0, 1], got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// A material field as it appears in a document: either a bare color (which
/// becomes a fully diffuse, non-metallic material), or a structured material
/// possibly extending a catalog entry via `base`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MaterialSpec {
    BareColor(ColorSpec),
    Structured(StructuredMaterialSpec),
}

#[derive(Debug, Clone, Deserialize)]
pub struct StructuredMaterialSpec {
    pub base: Option<String>,
    pub color: Option<ColorSpec>,
    pub metallic: Option<f32>,
    pub roughness: Option<f32>,
    pub opacity: Option<f32>,
}

const DEFAULT_MATERIAL: Material = Material::new(Color::WHITE, 0.0, 0.5, 1.0);

impl MaterialSpec {
    /// Resolve this spec into a [`Material`], optionally extending a named
    /// catalog entry with `base: <name>` and overriding individual fields.
    pub fn resolve(&self, lookup: impl Fn(&str) -> Option<Material>) -> MaterialResult<Material> {
        match self {
            MaterialSpec::BareColor(spec) => {
                let color = spec.resolve()?;
                let material = Material {
                    base_color: color,
                    ..DEFAULT_MATERIAL
                };
                material.validate()?;
                Ok(material)
            }
            MaterialSpec::Structured(spec) => {
                let mut material = match &spec.base {
                    Some(name) => lookup(name).ok_or_else(|| {
                        MaterialError::new(
                            MaterialErrorKind::UnknownMaterial,
                            format!("no catalog material named '{name}'"),
                        )
                    })?,
                    None => DEFAULT_MATERIAL,
                };
                if let Some(color) = &spec.color {
                    material.base_color = color.resolve()?;
                }
                if let Some(metallic) = spec.metallic {
                    material.metallic = metallic;
                }
                if let Some(roughness) = spec.roughness {
                    material.roughness = roughness;
                }
                if let Some(opacity) = spec.opacity {
                    material.opacity = opacity;
                }
                material.validate()?;
                Ok(material)
            }
        }
    }
}
