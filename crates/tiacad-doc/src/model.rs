//! The raw, directly-`Deserialize`-able shape of a TiaCAD YAML document
//! (§6.1). Nothing here resolves parameters, references, or materials —
//! that is [`crate::lower`]'s job, run after `serde_yaml` has parsed the
//! tree into these types.

use indexmap::IndexMap;
use serde::Deserialize;

use tiacad_material::{ColorSpec, MaterialSpec};

/// A numeric field as it appears in a document: a literal, or a `${...}`
/// expression resolved against the parameter environment. Used for the
/// quantities a parametric document actually drives — primitive
/// dimensions, transform scalars, pattern spacing — not for spatial
/// reference literals, which stay plain `[f64; 3]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Number(f64),
    Expr(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawParamValue {
    Number(f64),
    /// A `${...}` expression body, still wearing its braces; [`crate::lower`]
    /// strips them before handing the source to `tiacad_param`.
    Expr(String),
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RawFaceAt {
    #[default]
    Center,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RawEdgeAt {
    #[default]
    Midpoint,
    Start,
    End,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawRefSpec {
    Array([f64; 3]),
    Name(String),
    Inline(Box<RawInlineSpec>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawInlineSpec {
    Point {
        value: Option<[f64; 3]>,
        from: Option<RawRefSpec>,
        offset: Option<[f64; 3]>,
    },
    Face {
        part: String,
        selector: Option<String>,
        #[serde(default)]
        at: RawFaceAt,
    },
    Edge {
        part: String,
        selector: Option<String>,
        #[serde(default)]
        at: RawEdgeAt,
    },
    Axis {
        from: [f64; 3],
        to: [f64; 3],
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAxisSpec {
    Named(String),
    Vector([f64; 3]),
}

impl Default for RawAxisSpec {
    fn default() -> Self {
        RawAxisSpec::Named("z".to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawOriginSpec {
    Named(String),
    Point([f64; 3]),
    Ref(RawRefSpec),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTranslateSpec {
    Vector([RawScalar; 3]),
    ToRef { to: RawRefSpec, offset: Option<[f64; 3]> },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawRotateSpec {
    AroundOrigin { angle_deg: RawScalar, axis: RawAxisSpec, origin: RawOriginSpec },
    AroundRef { angle_deg: RawScalar, around: RawRefSpec },
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAlignSpec {
    pub face: RawRefSpec,
    pub orientation: String,
    pub offset: Option<RawScalar>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawScaleSpec {
    Uniform(RawScalar),
    NonUniform([RawScalar; 3]),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTransformStep {
    Translate { translate: RawTranslateSpec },
    Rotate { rotate: RawRotateSpec },
    AlignToFace { align_to_face: RawAlignSpec },
    Scale { scale: RawScaleSpec },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSelector {
    Tag(String),
    Direction { direction: RawAxisSpec },
    ParallelTo { parallel_to: RawAxisSpec },
    PerpendicularTo { perpendicular_to: RawAxisSpec },
    Raw { selector: String },
}

impl Default for RawSelector {
    fn default() -> Self {
        RawSelector::Tag("all".to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLinearAxis {
    pub count: usize,
    pub spacing: RawScalar,
    pub direction: RawAxisSpec,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawOperation {
    Transform {
        name: String,
        input: String,
        steps: Vec<RawTransformStep>,
    },
    Union {
        name: String,
        inputs: Vec<String>,
    },
    Difference {
        name: String,
        base: String,
        #[serde(default)]
        subtract: Vec<String>,
    },
    Intersection {
        name: String,
        inputs: Vec<String>,
    },
    Linear {
        name: String,
        source: String,
        axes: Vec<RawLinearAxis>,
    },
    Circular {
        name: String,
        source: String,
        count: usize,
        radius: RawScalar,
        #[serde(default)]
        axis: RawAxisSpec,
        #[serde(default)]
        center: [f64; 3],
        #[serde(default = "default_zero_scalar")]
        start_angle_deg: RawScalar,
        #[serde(default = "default_sweep_angle")]
        sweep_angle_deg: RawScalar,
    },
    Grid {
        name: String,
        source: String,
        count_x: usize,
        count_y: usize,
        spacing_x: RawScalar,
        spacing_y: RawScalar,
    },
    Fillet {
        input: String,
        radius: RawScalar,
        #[serde(default)]
        edges: RawSelector,
    },
    Chamfer {
        input: String,
        distance: RawScalar,
        distance2: Option<RawScalar>,
        #[serde(default)]
        edges: RawSelector,
    },
    Shell {
        input: String,
        thickness: RawScalar,
        #[serde(default)]
        faces: RawSelector,
    },
    Hull {
        name: String,
        inputs: Vec<String>,
    },
    Gusset {
        name: String,
        face_a: RawRefSpec,
        face_b: RawRefSpec,
        thickness: RawScalar,
    },
    Extrude {
        name: String,
        profile: String,
        direction: [f64; 3],
    },
    Revolve {
        name: String,
        profile: String,
        #[serde(default)]
        origin: [f64; 3],
        axis: RawAxisSpec,
        angle_deg: RawScalar,
    },
    Sweep {
        name: String,
        profile: String,
        direction: [f64; 3],
    },
    Loft {
        name: String,
        profiles: Vec<String>,
    },
}

fn default_sweep_angle() -> RawScalar {
    RawScalar::Number(360.0)
}

fn default_zero_scalar() -> RawScalar {
    RawScalar::Number(0.0)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RawOriginMode {
    #[default]
    Corner,
    Center,
    Base,
    Explicit {
        explicit: [f64; 3],
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "primitive", rename_all = "kebab-case")]
pub enum RawPrimitiveSpec {
    Box { size: [RawScalar; 3] },
    Cylinder { radius: RawScalar, height: RawScalar },
    Sphere { radius: RawScalar },
    Cone { base_radius: RawScalar, top_radius: RawScalar, height: RawScalar },
    Torus { major_radius: RawScalar, minor_radius: RawScalar },
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPrimitivePart {
    #[serde(flatten)]
    pub shape: RawPrimitiveSpec,
    #[serde(default)]
    pub origin: RawOriginMode,
    pub color: Option<ColorSpec>,
    pub material: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RawPlane {
    #[default]
    Xy,
    Xz,
    Yz,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RawFontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RawHAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RawVAlign {
    #[default]
    Baseline,
    Middle,
    Top,
}

fn default_segments() -> usize {
    32
}

fn default_font_family() -> String {
    "sans".to_string()
}

fn default_zero_point2() -> [f64; 2] {
    [0.0, 0.0]
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RawProfileShape {
    Line {
        from: [f64; 2],
        to: [f64; 2],
    },
    Rectangle {
        width: RawScalar,
        height: RawScalar,
        #[serde(default = "default_zero_point2")]
        center: [f64; 2],
    },
    Circle {
        radius: RawScalar,
        #[serde(default = "default_zero_point2")]
        center: [f64; 2],
        #[serde(default = "default_segments")]
        segments: usize,
    },
    Polygon {
        points: Vec<[f64; 2]>,
    },
    Arc {
        radius: RawScalar,
        #[serde(default = "default_zero_point2")]
        center: [f64; 2],
        start_angle_deg: RawScalar,
        end_angle_deg: RawScalar,
        #[serde(default = "default_segments")]
        segments: usize,
    },
    Text {
        text: String,
        size: RawScalar,
        #[serde(default = "default_font_family")]
        font_family: String,
        #[serde(default)]
        style: RawFontStyle,
        #[serde(default)]
        halign: RawHAlign,
        #[serde(default)]
        valign: RawVAlign,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSketchSpec {
    #[serde(default)]
    pub plane: RawPlane,
    pub shapes: Vec<RawProfileShape>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSketchPart {
    pub sketch: RawSketchSpec,
}

/// A `parts:` entry: either an immediately-built solid primitive, or a
/// lazy sketch specification that stays unbuilt until an `extrude`/
/// `revolve`/`sweep`/`loft` operation consumes it (§4.5).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPart {
    Sketch(RawSketchPart),
    Primitive(RawPrimitivePart),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum RawExportFormat {
    Stl {
        path: String,
        tolerance: Option<f64>,
    },
    #[serde(rename = "3mf")]
    ThreeMf {
        path: String,
        tolerance: Option<f64>,
    },
    Step {
        path: String,
    },
    Obj {
        path: String,
        tolerance: Option<f64>,
        #[serde(default)]
        mtl: bool,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawExport {
    pub default_part: Option<String>,
    #[serde(default)]
    pub formats: Vec<RawExportFormat>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    pub schema_version: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_yaml::Mapping>,
    /// Document order matters: later parameters may reference earlier
    /// ones, and `ParamTable` only needs a dependency-correct evaluation
    /// order, but `colors`/`materials`/`parts` also rely on insertion
    /// order for deterministic build/export — hence `IndexMap` rather
    /// than `HashMap` throughout this document tree.
    #[serde(default)]
    pub parameters: IndexMap<String, RawParamValue>,
    #[serde(default)]
    pub colors: IndexMap<String, ColorSpec>,
    #[serde(default)]
    pub materials: IndexMap<String, MaterialSpec>,
    #[serde(default)]
    pub references: IndexMap<String, RawRefSpec>,
    pub parts: IndexMap<String, RawPart>,
    #[serde(default)]
    pub operations: Vec<RawOperation>,
    pub export: RawExport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_box_document() {
        let yaml = r#"
parts:
  box:
    primitive: box
    size: [100, 100, 10]
    origin: center
export:
  default_part: box
"#;
        let doc: RawDocument = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(doc.parts.len(), 1);
        assert_eq!(doc.export.default_part.as_deref(), Some("box"));
    }

    #[test]
    fn parses_operations_list_in_order() {
        let yaml = r#"
parts:
  base:
    primitive: box
    size: [10, 10, 10]
operations:
  - type: fillet
    input: base
    radius: 1.0
  - type: transform
    name: moved
    input: base
    steps:
      - translate: [0, 0, 5]
export:
  default_part: moved
"#;
        let doc: RawDocument = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(doc.operations.len(), 2);
        match &doc.operations[1] {
            RawOperation::Transform { name, .. } => assert_eq!(name, "moved"),
            _ => panic!("expected transform"),
        }
    }

    #[test]
    fn parses_sketch_part() {
        let yaml = r#"
parts:
  profile:
    sketch:
      plane: xy
      shapes:
        - shape: circle
          radius: 5
export:
  default_part: profile
"#;
        let doc: RawDocument = serde_yaml::from_str(yaml).unwrap();
        match doc.parts.get("profile").unwrap() {
            RawPart::Sketch(s) => assert_eq!(s.sketch.shapes.len(), 1),
            RawPart::Primitive(_) => panic!("expected sketch"),
        }
    }

    #[test]
    fn parses_expression_parameter() {
        let yaml = r#"
parameters:
  base: 4
  doubled: "${base * 2}"
parts:
  box:
    primitive: box
    size: [10, 10, 10]
export:
  default_part: box
"#;
        let doc: RawDocument = serde_yaml::from_str(yaml).unwrap();
        match doc.parameters.get("doubled").unwrap() {
            RawParamValue::Expr(src) => assert!(src.contains("base")),
            RawParamValue::Number(_) => panic!("expected expr"),
        }
    }

    #[test]
    fn parses_scalar_expression_in_primitive_size() {
        let yaml = r#"
parameters:
  width: 10
parts:
  box:
    primitive: box
    size: ["${width}", 10, 10]
export:
  default_part: box
"#;
        let doc: RawDocument = serde_yaml::from_str(yaml).unwrap();
        match doc.parts.get("box").unwrap() {
            RawPart::Primitive(p) => match &p.shape {
                RawPrimitiveSpec::Box { size } => match &size[0] {
                    RawScalar::Expr(e) => assert_eq!(e, "${width}"),
                    RawScalar::Number(_) => panic!("expected expr"),
                },
                _ => panic!("expected box"),
            },
            RawPart::Sketch(_) => panic!("expected primitive"),
        }
    }
}
