//! Converts the raw, `serde`-deserialized document tree ([`crate::model`])
//! into the typed spec values `tiacad-ops`/`tiacad-spatial` operate on,
//! resolving `${...}` scalar expressions against the parameter
//! environment along the way.

use tiacad_geom::{Point3, Vector3};
use tiacad_ops::{
    AlignOrientation, AxisSpec, FontStyle, HAlign, LinearAxis, OriginMode, OriginSpec,
    PatternSpec, PrimitiveSpec, ProfileShape, ScaleSpec, Selector, SketchPlane, TransformStep,
    VAlign,
};
use tiacad_param::eval::eval_str;
use tiacad_param::Environment;
use tiacad_spatial::{EdgeAt, FaceAt, InlineSpec, RefSpec};

use crate::error::{BuildError, BuildErrorKind, BuildResult};
use crate::model::{
    RawAlignSpec, RawAxisSpec, RawEdgeAt, RawFaceAt, RawFontStyle, RawHAlign, RawInlineSpec,
    RawLinearAxis, RawOriginMode, RawOriginSpec, RawPlane, RawPrimitiveSpec, RawProfileShape,
    RawRefSpec, RawRotateSpec, RawScalar, RawScaleSpec, RawSelector, RawTransformStep,
    RawTranslateSpec, RawVAlign,
};

/// Strip a `${...}` expression's braces, if present; a bare body (already
/// stripped, or never wrapped) passes through unchanged.
pub fn strip_expr(src: &str) -> &str {
    let trimmed = src.trim();
    match trimmed.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        Some(inner) => inner,
        None => trimmed,
    }
}

pub fn resolve_scalar(raw: &RawScalar, env: &Environment) -> BuildResult<f64> {
    match raw {
        RawScalar::Number(n) => Ok(*n),
        RawScalar::Expr(src) => Ok(eval_str(strip_expr(src), env)?),
    }
}

fn resolve_vec3(raw: &[RawScalar; 3], env: &Environment) -> BuildResult<Vector3> {
    Ok(Vector3::new(
        resolve_scalar(&raw[0], env)?,
        resolve_scalar(&raw[1], env)?,
        resolve_scalar(&raw[2], env)?,
    ))
}

fn point(p: [f64; 3]) -> Point3 {
    Point3::new(p[0], p[1], p[2])
}

fn vector(v: [f64; 3]) -> Vector3 {
    Vector3::new(v[0], v[1], v[2])
}

pub fn lower_ref_spec(raw: &RawRefSpec) -> RefSpec {
    match raw {
        RawRefSpec::Array(p) => RefSpec::Array(point(*p)),
        RawRefSpec::Name(name) => RefSpec::Name(name.clone()),
        RawRefSpec::Inline(inline) => RefSpec::Inline(lower_inline_spec(inline)),
    }
}

fn lower_face_at(raw: RawFaceAt) -> FaceAt {
    match raw {
        RawFaceAt::Center => FaceAt::Center,
    }
}

fn lower_edge_at(raw: RawEdgeAt) -> EdgeAt {
    match raw {
        RawEdgeAt::Midpoint => EdgeAt::Midpoint,
        RawEdgeAt::Start => EdgeAt::Start,
        RawEdgeAt::End => EdgeAt::End,
    }
}

fn lower_inline_spec(raw: &RawInlineSpec) -> InlineSpec {
    match raw {
        RawInlineSpec::Point { value, from, offset } => InlineSpec::Point {
            value: value.map(point),
            from: from.as_ref().map(|spec| Box::new(lower_ref_spec(spec))),
            offset: offset.map(vector),
        },
        RawInlineSpec::Face { part, selector, at } => InlineSpec::Face {
            part: part.clone(),
            selector: selector.clone(),
            at: lower_face_at(*at),
        },
        RawInlineSpec::Edge { part, selector, at } => InlineSpec::Edge {
            part: part.clone(),
            selector: selector.clone(),
            at: lower_edge_at(*at),
        },
        RawInlineSpec::Axis { from, to } => InlineSpec::Axis { from: point(*from), to: point(*to) },
    }
}

fn lower_axis_name(name: &str) -> BuildResult<Vector3> {
    match name.to_ascii_lowercase().as_str() {
        "x" => Ok(Vector3::new(1.0, 0.0, 0.0)),
        "y" => Ok(Vector3::new(0.0, 1.0, 0.0)),
        "z" => Ok(Vector3::new(0.0, 0.0, 1.0)),
        other => Err(BuildError::new(
            BuildErrorKind::Schema,
            format!("unknown axis '{other}'; expected 'x', 'y', 'z', or a [x, y, z] vector"),
        )),
    }
}

/// Lower a raw axis spec to a plain direction vector (patterns, gusset
/// selectors — anywhere the spec doesn't carry its own pivot).
pub fn lower_axis(raw: &RawAxisSpec) -> BuildResult<Vector3> {
    match raw {
        RawAxisSpec::Named(name) => lower_axis_name(name),
        RawAxisSpec::Vector(v) => Ok(vector(*v)),
    }
}

fn lower_axis_spec(raw: &RawAxisSpec) -> BuildResult<AxisSpec> {
    match raw {
        RawAxisSpec::Named(name) => match name.to_ascii_lowercase().as_str() {
            "x" => Ok(AxisSpec::X),
            "y" => Ok(AxisSpec::Y),
            "z" => Ok(AxisSpec::Z),
            other => Err(BuildError::new(
                BuildErrorKind::Schema,
                format!("unknown axis '{other}'; expected 'x', 'y', 'z', or a [x, y, z] vector"),
            )),
        },
        RawAxisSpec::Vector(v) => Ok(AxisSpec::Vector(vector(*v))),
    }
}

/// A bare string origin is either `"current"`/`"initial"`, or a named
/// reference — `RawOriginSpec::Named` is tried before `::Ref` by the
/// untagged deserializer, so both meanings land here and must be
/// disambiguated by value rather than by shape.
fn lower_origin_spec(raw: &RawOriginSpec) -> BuildResult<OriginSpec> {
    match raw {
        RawOriginSpec::Named(name) => match name.as_str() {
            "current" => Ok(OriginSpec::Current),
            "initial" => Ok(OriginSpec::Initial),
            other => Ok(OriginSpec::Ref(RefSpec::Name(other.to_string()))),
        },
        RawOriginSpec::Point(p) => Ok(OriginSpec::Point(point(*p))),
        RawOriginSpec::Ref(spec) => Ok(OriginSpec::Ref(lower_ref_spec(spec))),
    }
}

fn lower_translate(raw: &RawTranslateSpec, env: &Environment) -> BuildResult<TransformStep> {
    match raw {
        RawTranslateSpec::Vector(v) => Ok(TransformStep::Translate(resolve_vec3(v, env)?)),
        RawTranslateSpec::ToRef { to, offset } => Ok(TransformStep::TranslateTo {
            to: lower_ref_spec(to),
            offset: offset.map(vector),
        }),
    }
}

fn lower_rotate(raw: &RawRotateSpec, env: &Environment) -> BuildResult<TransformStep> {
    match raw {
        RawRotateSpec::AroundOrigin { angle_deg, axis, origin } => Ok(TransformStep::Rotate {
            angle_rad: resolve_scalar(angle_deg, env)?.to_radians(),
            axis: lower_axis_spec(axis)?,
            origin: lower_origin_spec(origin)?,
        }),
        RawRotateSpec::AroundRef { angle_deg, around } => Ok(TransformStep::RotateAround {
            angle_rad: resolve_scalar(angle_deg, env)?.to_radians(),
            around: lower_ref_spec(around),
        }),
    }
}

fn lower_align(raw: &RawAlignSpec, env: &Environment) -> BuildResult<TransformStep> {
    let orientation = match raw.orientation.as_str() {
        "normal" => AlignOrientation::Normal,
        "reverse" => AlignOrientation::Reverse,
        "tangent" => AlignOrientation::Tangent,
        other => {
            return Err(BuildError::new(
                BuildErrorKind::Schema,
                format!("unknown align_to_face orientation '{other}'; expected normal, reverse, or tangent"),
            ))
        }
    };
    let offset = match &raw.offset {
        Some(scalar) => resolve_scalar(scalar, env)?,
        None => 0.0,
    };
    Ok(TransformStep::AlignToFace { face: lower_ref_spec(&raw.face), orientation, offset })
}

fn lower_scale(raw: &RawScaleSpec, env: &Environment) -> BuildResult<TransformStep> {
    match raw {
        RawScaleSpec::Uniform(s) => Ok(TransformStep::Scale(ScaleSpec::Uniform(resolve_scalar(s, env)?))),
        RawScaleSpec::NonUniform(v) => Ok(TransformStep::Scale(ScaleSpec::NonUniform(resolve_vec3(v, env)?))),
    }
}

pub fn lower_transform_step(raw: &RawTransformStep, env: &Environment) -> BuildResult<TransformStep> {
    match raw {
        RawTransformStep::Translate { translate } => lower_translate(translate, env),
        RawTransformStep::Rotate { rotate } => lower_rotate(rotate, env),
        RawTransformStep::AlignToFace { align_to_face } => lower_align(align_to_face, env),
        RawTransformStep::Scale { scale } => lower_scale(scale, env),
    }
}

pub fn lower_selector(raw: &RawSelector) -> BuildResult<Selector> {
    match raw {
        RawSelector::Tag(tag) if tag == "all" => Ok(Selector::All),
        RawSelector::Tag(other) => Err(BuildError::new(
            BuildErrorKind::Schema,
            format!("unknown edge/face selector '{other}'; expected 'all'"),
        )),
        RawSelector::Direction { direction } => Ok(Selector::Direction(lower_axis(direction)?)),
        RawSelector::ParallelTo { parallel_to } => Ok(Selector::ParallelTo(lower_axis(parallel_to)?)),
        RawSelector::PerpendicularTo { perpendicular_to } => {
            Ok(Selector::PerpendicularTo(lower_axis(perpendicular_to)?))
        }
        RawSelector::Raw { selector } => Ok(Selector::Raw(selector.clone())),
    }
}

pub fn lower_primitive(raw: &RawPrimitiveSpec, env: &Environment) -> BuildResult<PrimitiveSpec> {
    Ok(match raw {
        RawPrimitiveSpec::Box { size } => PrimitiveSpec::Box {
            size_x: resolve_scalar(&size[0], env)?,
            size_y: resolve_scalar(&size[1], env)?,
            size_z: resolve_scalar(&size[2], env)?,
        },
        RawPrimitiveSpec::Cylinder { radius, height } => PrimitiveSpec::Cylinder {
            radius: resolve_scalar(radius, env)?,
            height: resolve_scalar(height, env)?,
        },
        RawPrimitiveSpec::Sphere { radius } => PrimitiveSpec::Sphere { radius: resolve_scalar(radius, env)? },
        RawPrimitiveSpec::Cone { base_radius, top_radius, height } => PrimitiveSpec::Cone {
            base_radius: resolve_scalar(base_radius, env)?,
            top_radius: resolve_scalar(top_radius, env)?,
            height: resolve_scalar(height, env)?,
        },
        RawPrimitiveSpec::Torus { major_radius, minor_radius } => PrimitiveSpec::Torus {
            major_radius: resolve_scalar(major_radius, env)?,
            minor_radius: resolve_scalar(minor_radius, env)?,
        },
    })
}

pub fn lower_origin_mode(raw: &RawOriginMode) -> OriginMode {
    match raw {
        RawOriginMode::Corner => OriginMode::Corner,
        RawOriginMode::Center => OriginMode::Center,
        RawOriginMode::Base => OriginMode::Base,
        RawOriginMode::Explicit { explicit } => OriginMode::Explicit(vector(*explicit)),
    }
}

pub fn lower_plane(raw: RawPlane) -> SketchPlane {
    match raw {
        RawPlane::Xy => SketchPlane::xy(),
        RawPlane::Xz => SketchPlane::xz(),
        RawPlane::Yz => SketchPlane::yz(),
    }
}

fn lower_font_style(raw: RawFontStyle) -> FontStyle {
    match raw {
        RawFontStyle::Regular => FontStyle::Regular,
        RawFontStyle::Bold => FontStyle::Bold,
        RawFontStyle::Italic => FontStyle::Italic,
        RawFontStyle::BoldItalic => FontStyle::BoldItalic,
    }
}

fn lower_halign(raw: RawHAlign) -> HAlign {
    match raw {
        RawHAlign::Left => HAlign::Left,
        RawHAlign::Center => HAlign::Center,
        RawHAlign::Right => HAlign::Right,
    }
}

fn lower_valign(raw: RawVAlign) -> VAlign {
    match raw {
        RawVAlign::Baseline => VAlign::Baseline,
        RawVAlign::Middle => VAlign::Middle,
        RawVAlign::Top => VAlign::Top,
    }
}

pub fn lower_profile_shape(raw: &RawProfileShape, env: &Environment) -> BuildResult<ProfileShape> {
    Ok(match raw {
        RawProfileShape::Line { from, to } => ProfileShape::Line { from: (from[0], from[1]), to: (to[0], to[1]) },
        RawProfileShape::Rectangle { width, height, center } => ProfileShape::Rectangle {
            width: resolve_scalar(width, env)?,
            height: resolve_scalar(height, env)?,
            center: (center[0], center[1]),
        },
        RawProfileShape::Circle { radius, center, segments } => ProfileShape::Circle {
            radius: resolve_scalar(radius, env)?,
            center: (center[0], center[1]),
            segments: *segments,
        },
        RawProfileShape::Polygon { points } => {
            ProfileShape::Polygon { points: points.iter().map(|p| (p[0], p[1])).collect() }
        }
        RawProfileShape::Arc { radius, center, start_angle_deg, end_angle_deg, segments } => ProfileShape::Arc {
            radius: resolve_scalar(radius, env)?,
            center: (center[0], center[1]),
            start_angle_deg: resolve_scalar(start_angle_deg, env)?,
            end_angle_deg: resolve_scalar(end_angle_deg, env)?,
            segments: *segments,
        },
        RawProfileShape::Text { text, size, font_family, style, halign, valign } => ProfileShape::Text {
            text: text.clone(),
            size: resolve_scalar(size, env)?,
            font_family: font_family.clone(),
            style: lower_font_style(*style),
            halign: lower_halign(*halign),
            valign: lower_valign(*valign),
        },
    })
}

pub fn lower_linear_axis(raw: &RawLinearAxis, env: &Environment) -> BuildResult<LinearAxis> {
    Ok(LinearAxis {
        count: raw.count,
        spacing: resolve_scalar(&raw.spacing, env)?,
        direction: lower_axis(&raw.direction)?,
    })
}

pub fn lower_linear_pattern(axes: &[RawLinearAxis], env: &Environment) -> BuildResult<PatternSpec> {
    let resolved = axes
        .iter()
        .map(|axis| lower_linear_axis(axis, env))
        .collect::<BuildResult<Vec<_>>>()?;
    Ok(PatternSpec::Linear(resolved))
}
