//! The `transform` operation: translate, rotate, scale, and align-to-face
//! steps applied in order, producing a new registered part.

use std::collections::HashMap;

use tiacad_geom::transform::{rotation_matrix, scale_matrix};
use tiacad_geom::{GeometryBackend, Point3, Solid, Vector3};
use tiacad_registry::{Part, PartMetadata, PartRegistry, RegistryView};
use tiacad_spatial::{PartSource, RefSpec, SpatialResolver};
use truck_modeling::{Matrix4, Transform};

use crate::error::{OpError, OpErrorKind, OpResult};

#[derive(Debug, Clone, Copy)]
pub enum AxisSpec {
    X,
    Y,
    Z,
    Vector(Vector3),
}

impl AxisSpec {
    fn resolve(self) -> Vector3 {
        match self {
            AxisSpec::X => Vector3::new(1.0, 0.0, 0.0),
            AxisSpec::Y => Vector3::new(0.0, 1.0, 0.0),
            AxisSpec::Z => Vector3::new(0.0, 0.0, 1.0),
            AxisSpec::Vector(v) => v,
        }
    }
}

#[derive(Debug, Clone)]
pub enum OriginSpec {
    Current,
    Initial,
    Point(Point3),
    Ref(RefSpec),
}

#[derive(Debug, Clone, Copy)]
pub enum ScaleSpec {
    Uniform(f64),
    NonUniform(Vector3),
}

#[derive(Debug, Clone, Copy)]
pub enum AlignOrientation {
    Normal,
    Reverse,
    Tangent,
}

#[derive(Debug, Clone)]
pub enum TransformStep {
    Translate(Vector3),
    TranslateTo { to: RefSpec, offset: Option<Vector3> },
    Rotate { angle_rad: f64, axis: AxisSpec, origin: OriginSpec },
    RotateAround { angle_rad: f64, around: RefSpec },
    AlignToFace { face: RefSpec, orientation: AlignOrientation, offset: f64 },
    Scale(ScaleSpec),
}

/// One geometric step, fully resolved against the registry's current
/// state: no more reference lookups are needed to apply it.
enum ResolvedStep {
    Translate(Vector3),
    Rotate { angle_rad: f64, axis: Vector3, origin: Point3 },
    Scale(Vector3),
}

/// Apply `steps` to `input`, registering the result as a new part named
/// `output_name`. `input` itself is left untouched.
///
/// `references` is the document's top-level `references:` block, already
/// lowered to [`RefSpec`]s; named steps (`to`, `around`, `face`) resolve
/// against it before falling back to a dotted part-local auto-reference.
pub fn apply_transform<B: GeometryBackend>(
    registry: &mut PartRegistry,
    backend: &B,
    input: &str,
    output_name: impl Into<String>,
    steps: &[TransformStep],
    references: &HashMap<String, RefSpec>,
) -> OpResult<()> {
    let output_name = output_name.into();
    log::debug!("transform '{input}' -> '{output_name}' ({} steps)", steps.len());

    let (initial_position, mut solid, kind, metadata, mut cumulative) = {
        let part = registry.get(input)?;
        (
            part.initial_position,
            part.solid.clone(),
            part.kind,
            PartMetadata::derive_single(&part.metadata, "transform", None),
            part.cumulative_transform,
        )
    };

    {
        let view = RegistryView::new(registry, backend);
        let mut resolver = SpatialResolver::new(&view);
        for (name, spec) in references {
            resolver.define(name.clone(), spec.clone());
        }
        for step in steps {
            let current_position = cumulative.transform_point(initial_position);
            for resolved in resolve_step(&resolver, step, current_position, initial_position)? {
                let (next_solid, step_matrix) =
                    apply_resolved_step(backend, &solid, cumulative, initial_position, resolved)?;
                solid = next_solid;
                cumulative = step_matrix * cumulative;
            }
        }
    }

    let mut part = Part::new(output_name, solid, kind, metadata);
    part.initial_position = initial_position;
    part.cumulative_transform = cumulative;
    registry.insert(part)?;
    Ok(())
}

fn resolve_step<S: PartSource>(
    resolver: &SpatialResolver<S>,
    step: &TransformStep,
    current_position: Point3,
    initial_position: Point3,
) -> OpResult<Vec<ResolvedStep>> {
    match step {
        TransformStep::Translate(v) => Ok(vec![ResolvedStep::Translate(*v)]),
        TransformStep::TranslateTo { to, offset } => {
            let target = resolver.resolve(to)?;
            let frame = tiacad_spatial::Frame::from_ref(&target);
            let offset = offset.unwrap_or(Vector3::new(0.0, 0.0, 0.0));
            let world_target = if target.orientation.is_some() || target.tangent.is_some() {
                frame.apply_offset(offset)
            } else {
                target.position + offset
            };
            Ok(vec![ResolvedStep::Translate(world_target - current_position)])
        }
        TransformStep::Rotate { angle_rad, axis, origin } => {
            let origin_point = resolve_origin(resolver, origin, current_position, initial_position)?;
            Ok(vec![ResolvedStep::Rotate {
                angle_rad: *angle_rad,
                axis: axis.resolve(),
                origin: origin_point,
            }])
        }
        TransformStep::RotateAround { angle_rad, around } => {
            let pivot = resolver.resolve(around)?;
            let axis = pivot.orientation.ok_or_else(|| {
                OpError::new(
                    OpErrorKind::InvalidSpec,
                    "'around' reference must carry an orientation",
                )
            })?;
            Ok(vec![ResolvedStep::Rotate {
                angle_rad: *angle_rad,
                axis,
                origin: pivot.position,
            }])
        }
        TransformStep::AlignToFace { face, orientation, offset } => {
            let face_ref = resolver.resolve(face)?;
            let normal = face_ref.orientation.ok_or_else(|| {
                OpError::new(OpErrorKind::InvalidSpec, "align_to_face target has no orientation")
            })?;
            let target_direction = match orientation {
                AlignOrientation::Normal => normal,
                AlignOrientation::Reverse => -normal,
                AlignOrientation::Tangent => face_ref.tangent.unwrap_or(normal),
            };
            // "Downward" local axis for this part family is -Z by convention.
            let from = Vector3::new(0.0, 0.0, -1.0);
            let (axis, angle_rad) = shortest_rotation(from, target_direction);
            let translate_target = face_ref.position + normal * *offset - current_position;
            Ok(vec![
                ResolvedStep::Rotate { angle_rad, axis, origin: current_position },
                ResolvedStep::Translate(translate_target),
            ])
        }
        TransformStep::Scale(spec) => match spec {
            ScaleSpec::Uniform(s) => Ok(vec![ResolvedStep::Scale(Vector3::new(*s, *s, *s))]),
            ScaleSpec::NonUniform(v) => Ok(vec![ResolvedStep::Scale(*v)]),
        },
    }
}

fn resolve_origin<S: PartSource>(
    resolver: &SpatialResolver<S>,
    origin: &OriginSpec,
    current_position: Point3,
    initial_position: Point3,
) -> OpResult<Point3> {
    match origin {
        OriginSpec::Current => Ok(current_position),
        OriginSpec::Initial => Ok(initial_position),
        OriginSpec::Point(p) => Ok(*p),
        OriginSpec::Ref(spec) => Ok(resolver.resolve(spec)?.position),
    }
}

/// The rotation that sends unit vector `from` to unit vector `to`, via
/// Rodrigues on their cross product; falls back to a 180° turn about an
/// arbitrary perpendicular when the vectors are anti-parallel.
fn shortest_rotation(from: Vector3, to: Vector3) -> (Vector3, f64) {
    use truck_modeling::InnerSpace;
    let cos_angle = from.dot(to).clamp(-1.0, 1.0);
    let angle = cos_angle.acos();
    let cross = from.cross(to);
    if cross.magnitude() > 1e-9 {
        (cross.normalize(), angle)
    } else if cos_angle > 0.0 {
        (Vector3::new(0.0, 0.0, 1.0), 0.0)
    } else {
        let fallback = if from.x.abs() < 0.9 {
            Vector3::new(1.0, 0.0, 0.0)
        } else {
            Vector3::new(0.0, 1.0, 0.0)
        };
        (from.cross(fallback).normalize(), std::f64::consts::PI)
    }
}

/// Apply one resolved step to `solid`, returning the new geometry and the
/// affine matrix it corresponds to, so the caller can fold it into the
/// part's cumulative transform.
fn apply_resolved_step<B: GeometryBackend>(
    backend: &B,
    solid: &Solid,
    cumulative: Matrix4,
    initial_position: Point3,
    step: ResolvedStep,
) -> OpResult<(Solid, Matrix4)> {
    match step {
        ResolvedStep::Translate(v) => {
            Ok((backend.translate(solid, v)?, Matrix4::from_translation(v)))
        }
        ResolvedStep::Rotate { angle_rad, axis, origin } => {
            let rotated = backend.rotate(solid, origin, axis, angle_rad)?;
            Ok((rotated, rotation_matrix(origin, axis, angle_rad)))
        }
        ResolvedStep::Scale(factors) => {
            // Scaling is about the part's own current position, so it
            // stays in place; only its geometry changes size.
            let position = cumulative.transform_point(initial_position);
            let scaled = backend.scale(solid, position, factors)?;
            Ok((scaled, scale_matrix(position, factors)))
        }
    }
}
