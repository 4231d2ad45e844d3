//! The YAML document model and build orchestration crate for TiaCAD:
//! parses a document into [`model::RawDocument`], lowers its raw fields
//! into the types `tiacad-ops`/`tiacad-spatial` operate on, and runs the
//! five-phase compiler that produces a populated part registry.

pub mod compiler;
pub mod diagnostics;
pub mod error;
pub mod lower;
pub mod model;

pub use compiler::{compile_document, validate_document, BuildOutput};
pub use diagnostics::{Diagnostics, Warning};
pub use error::{BuildError, BuildErrorKind, BuildResult};
pub use model::RawDocument;

/// Parse a document's YAML source into its raw tree, ready for
/// [`compile_document`].
pub fn parse_document(source: &str) -> BuildResult<RawDocument> {
    serde_yaml::from_str(source).map_err(BuildError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiacad_geom::{GeometryBackend, TruckBackend};
    use tiacad_ops::FontRegistry;

    /// The "Simple box" end-to-end scenario: a centered box compiles to a
    /// registry whose single part's bounding box is symmetric about the
    /// origin.
    #[test]
    fn compiles_simple_centered_box() {
        let yaml = r#"
parts:
  box:
    primitive: box
    size: [100, 100, 10]
    origin: center
export:
  default_part: box
"#;
        let doc = parse_document(yaml).unwrap();
        let backend = TruckBackend;
        let fonts = FontRegistry::new(vec![], None);
        let output = compile_document(&doc, backend, &fonts).unwrap();

        assert_eq!(output.default_part, "box");
        let part = output.registry.get("box").unwrap();
        let bbox = output.backend.bounding_box(&part.solid).unwrap();
        assert!((bbox.min.x + 50.0).abs() < 1e-6);
        assert!((bbox.max.x - 50.0).abs() < 1e-6);
        assert!((bbox.min.z + 5.0).abs() < 1e-6);
        assert!((bbox.max.z - 5.0).abs() < 1e-6);
    }

    #[test]
    fn compiles_parametric_box_with_expression() {
        let yaml = r#"
parameters:
  width: 20
  half_width: "${width / 2}"
parts:
  box:
    primitive: box
    size: ["${width}", 10, 10]
    origin: corner
export:
  default_part: box
"#;
        let doc = parse_document(yaml).unwrap();
        let backend = TruckBackend;
        let fonts = FontRegistry::new(vec![], None);
        let output = compile_document(&doc, backend, &fonts).unwrap();
        let part = output.registry.get("box").unwrap();
        let bbox = output.backend.bounding_box(&part.solid).unwrap();
        assert!((bbox.max.x - 20.0).abs() < 1e-6);
    }

    #[test]
    fn unknown_material_reference_produces_build_error() {
        let yaml = r#"
parts:
  box:
    primitive: box
    size: [1, 1, 1]
    material: unobtainium
export:
  default_part: box
"#;
        let doc = parse_document(yaml).unwrap();
        let backend = TruckBackend;
        let fonts = FontRegistry::new(vec![], None);
        let err = compile_document(&doc, backend, &fonts).unwrap_err();
        assert_eq!(err.kind, BuildErrorKind::Material);
        assert!(err.location().contains("box"));
    }

    #[test]
    fn transform_then_union_chain_compiles_in_order() {
        let yaml = r#"
parts:
  base:
    primitive: box
    size: [10, 10, 10]
    origin: center
  arm:
    primitive: box
    size: [2, 2, 20]
    origin: center
operations:
  - type: transform
    name: arm_moved
    input: arm
    steps:
      - translate: [0, 0, 15]
  - type: union
    name: assembly
    inputs: [base, arm_moved]
export:
  default_part: assembly
"#;
        let doc = parse_document(yaml).unwrap();
        let backend = TruckBackend;
        let fonts = FontRegistry::new(vec![], None);
        let output = compile_document(&doc, backend, &fonts).unwrap();
        assert_eq!(output.default_part, "assembly");
        assert!(output.registry.contains("assembly"));
    }

    /// A `translate: {to: ...}` step naming a document-level `references:`
    /// entry resolves against it, not just against part names.
    #[test]
    fn transform_resolves_named_document_reference() {
        let yaml = r#"
references:
  anchor: [7, 2, 0]
parts:
  box:
    primitive: box
    size: [2, 2, 2]
    origin: center
operations:
  - type: transform
    name: moved
    input: box
    steps:
      - translate:
          to: anchor
export:
  default_part: moved
"#;
        let doc = parse_document(yaml).unwrap();
        let backend = TruckBackend;
        let fonts = FontRegistry::new(vec![], None);
        let output = compile_document(&doc, backend, &fonts).unwrap();
        let part = output.registry.get("moved").unwrap();
        let pos = part.current_position();
        assert!((pos.x - 7.0).abs() < 1e-6);
        assert!((pos.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn validate_document_catches_undefined_parameter_without_building_geometry() {
        let yaml = r#"
parameters:
  width: "${missing_name}"
parts:
  box:
    primitive: box
    size: [1, 1, 1]
export:
  default_part: box
"#;
        let doc = parse_document(yaml).unwrap();
        let err = validate_document(&doc).unwrap_err();
        assert_eq!(err.kind, BuildErrorKind::Parameter);
    }

    #[test]
    fn validate_document_accepts_well_formed_document() {
        let yaml = r#"
parameters:
  width: 20
parts:
  box:
    primitive: box
    size: ["${width}", 10, 10]
export:
  default_part: box
"#;
        let doc = parse_document(yaml).unwrap();
        assert!(validate_document(&doc).unwrap().is_clean());
    }
}
