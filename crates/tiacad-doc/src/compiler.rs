//! `DocumentCompiler` — the five-phase pipeline (§4.7) that turns a parsed
//! [`RawDocument`] into a populated [`PartRegistry`] ready for export:
//! parameters, then colors/materials, then parts, then operations in
//! document order, then export-part selection.

use std::collections::HashMap;

use tiacad_geom::{GeometryBackend, Point3, Vector3};
use tiacad_material::{Catalog, Color, Material};
use tiacad_ops::{
    apply_transform, build_pattern, build_primitive, build_wires, chamfer, difference,
    extrude_wires, fillet, gusset, hull, intersection, shell, union, FontRegistry, PatternSpec,
    SketchPlane,
};
use tiacad_param::table::RawValue;
use tiacad_param::{Environment, ParamTable};
use tiacad_registry::{Appearance, Part, PartMetadata, PartRegistry};
use tiacad_spatial::{PartKind, RefSpec};
use truck_modeling::EuclideanSpace;

use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{BuildError, BuildErrorKind, BuildResult};
use crate::lower::{
    lower_axis, lower_linear_pattern, lower_origin_mode, lower_plane, lower_primitive,
    lower_profile_shape, lower_ref_spec, lower_selector, lower_transform_step, resolve_scalar,
};
use crate::model::{RawExport, RawOperation, RawPart, RawParamValue, RawSketchSpec, RawDocument};

/// The result of compiling a document: a populated registry plus
/// everything downstream export needs, but not the export itself — that
/// crosses into `tiacad-export`, which this crate does not depend on.
pub struct BuildOutput<B: GeometryBackend> {
    pub registry: PartRegistry,
    pub backend: B,
    pub catalog: Catalog,
    pub diagnostics: Diagnostics,
    pub export: RawExport,
    pub default_part: String,
}

fn point(p: [f64; 3]) -> Point3 {
    Point3::new(p[0], p[1], p[2])
}

fn vector(v: [f64; 3]) -> Vector3 {
    Vector3::new(v[0], v[1], v[2])
}

/// Compile `doc` against `backend`, resolving fonts through `fonts`.
pub fn compile_document<B: GeometryBackend>(
    doc: &RawDocument,
    backend: B,
    fonts: &FontRegistry,
) -> BuildResult<BuildOutput<B>> {
    let env = resolve_parameters(doc)?;
    let (palette, catalog, mut diagnostics) = resolve_appearance_inputs(doc)?;

    let mut registry = PartRegistry::new();
    let mut sketches: HashMap<String, RawSketchSpec> = HashMap::new();
    build_parts(doc, &env, &palette, &catalog, &backend, &mut registry, &mut sketches)?;

    let references: HashMap<String, RefSpec> = doc
        .references
        .iter()
        .map(|(name, raw)| (name.clone(), lower_ref_spec(raw)))
        .collect();

    for op in &doc.operations {
        apply_operation(op, &env, &sketches, fonts, &backend, &mut registry, &mut diagnostics, &references)
            .map_err(|e| e.push_frame(operation_label(op)).push_frame("operations"))?;
    }

    let default_part = select_default_part(doc, &registry)?;

    Ok(BuildOutput { registry, backend, catalog, diagnostics, export: doc.export.clone(), default_part })
}

/// Resolve `doc`'s parameters, colors, and materials without building any
/// part geometry or running operations — the `validate` CLI verb's
/// contract (§3 supplement: "parses and resolves parameters/references
/// without building geometry").
pub fn validate_document(doc: &RawDocument) -> BuildResult<Diagnostics> {
    resolve_parameters(doc)?;
    let (_, _, diagnostics) = resolve_appearance_inputs(doc)?;
    Ok(diagnostics)
}

fn resolve_parameters(doc: &RawDocument) -> BuildResult<Environment> {
    let mut table = ParamTable::new();
    for (name, raw) in &doc.parameters {
        let value = match raw {
            RawParamValue::Number(n) => RawValue::Number(*n),
            RawParamValue::Expr(src) => RawValue::Expr(crate::lower::strip_expr(src).to_string()),
        };
        table.define(name.clone(), value);
    }
    table.resolve_all().map_err(BuildError::from).map_err(|e| e.push_frame("parameters"))
}

fn resolve_appearance_inputs(doc: &RawDocument) -> BuildResult<(HashMap<String, Color>, Catalog, Diagnostics)> {
    let mut palette = HashMap::new();
    for (name, spec) in &doc.colors {
        let color = spec
            .resolve()
            .map_err(BuildError::from)
            .map_err(|e| e.push_frame(name.clone()).push_frame("colors"))?;
        palette.insert(name.clone(), color);
    }

    let mut catalog = Catalog::new();
    let mut diagnostics = Diagnostics::new();
    for (name, spec) in &doc.materials {
        if catalog.get(name).is_some() {
            diagnostics.warn(Warning::MaterialKeyCollision { name: name.clone() });
        }
        catalog
            .define(name.clone(), spec)
            .map_err(BuildError::from)
            .map_err(|e| e.push_frame(name.clone()).push_frame("materials"))?;
    }

    Ok((palette, catalog, diagnostics))
}

/// A bare `color:` string first checks the document's own palette (so a
/// document-defined swatch name works where a CSS name would), then falls
/// back to `ColorSpec`'s own hex/named/array parsing.
fn resolve_part_color(
    spec: &tiacad_material::ColorSpec,
    palette: &HashMap<String, Color>,
) -> tiacad_material::MaterialResult<Color> {
    if let tiacad_material::ColorSpec::Text(name) = spec {
        if let Some(color) = palette.get(name) {
            return Ok(*color);
        }
    }
    spec.resolve()
}

fn resolve_part_appearance(
    color: &Option<tiacad_material::ColorSpec>,
    material: &Option<String>,
    palette: &HashMap<String, Color>,
    catalog: &Catalog,
) -> BuildResult<Appearance> {
    if let Some(name) = material {
        let resolved = catalog.require(name).map_err(BuildError::from)?;
        return Ok(Appearance { material: Some(resolved) });
    }
    if let Some(spec) = color {
        let base_color = resolve_part_color(spec, palette).map_err(BuildError::from)?;
        let resolved = Material::new(base_color, 0.0, 0.5, 1.0);
        return Ok(Appearance { material: Some(resolved) });
    }
    Ok(Appearance::none())
}

fn build_parts<B: GeometryBackend>(
    doc: &RawDocument,
    env: &Environment,
    palette: &HashMap<String, Color>,
    catalog: &Catalog,
    backend: &B,
    registry: &mut PartRegistry,
    sketches: &mut HashMap<String, RawSketchSpec>,
) -> BuildResult<()> {
    for (part_name, raw_part) in &doc.parts {
        match raw_part {
            RawPart::Sketch(sketch_part) => {
                sketches.insert(part_name.clone(), sketch_part.sketch.clone());
            }
            RawPart::Primitive(primitive_part) => {
                let spec = lower_primitive(&primitive_part.shape, env)
                    .map_err(|e| e.push_frame(part_name.clone()).push_frame("parts"))?;
                let origin_mode = lower_origin_mode(&primitive_part.origin);
                build_primitive(registry, backend, part_name.clone(), spec, origin_mode)
                    .map_err(BuildError::from)
                    .map_err(|e| e.push_frame(part_name.clone()).push_frame("parts"))?;

                let appearance = resolve_part_appearance(
                    &primitive_part.color,
                    &primitive_part.material,
                    palette,
                    catalog,
                )
                .map_err(|e| e.push_frame(part_name.clone()).push_frame("parts"))?;
                registry.get_mut(part_name).map_err(BuildError::from)?.metadata.appearance = appearance;
            }
        }
    }
    Ok(())
}

fn operation_label(op: &RawOperation) -> String {
    operation_output_name(op).to_string()
}

/// The name an operation's result is known by afterward: its own `name`
/// for operations that produce a new part, or the mutated `input` for the
/// in-place finishing operations.
fn operation_output_name(op: &RawOperation) -> &str {
    match op {
        RawOperation::Transform { name, .. } => name,
        RawOperation::Union { name, .. } => name,
        RawOperation::Difference { name, .. } => name,
        RawOperation::Intersection { name, .. } => name,
        RawOperation::Linear { name, .. } => name,
        RawOperation::Circular { name, .. } => name,
        RawOperation::Grid { name, .. } => name,
        RawOperation::Fillet { input, .. } => input,
        RawOperation::Chamfer { input, .. } => input,
        RawOperation::Shell { input, .. } => input,
        RawOperation::Hull { name, .. } => name,
        RawOperation::Gusset { name, .. } => name,
        RawOperation::Extrude { name, .. } => name,
        RawOperation::Revolve { name, .. } => name,
        RawOperation::Sweep { name, .. } => name,
        RawOperation::Loft { name, .. } => name,
    }
}

fn collect_sketch_wires<B: GeometryBackend>(
    backend: &B,
    env: &Environment,
    fonts: &FontRegistry,
    sketch: &RawSketchSpec,
) -> BuildResult<(SketchPlane, Vec<tiacad_geom::Wire>)> {
    let plane = lower_plane(sketch.plane);
    let mut wires = Vec::new();
    for shape in &sketch.shapes {
        let profile_shape = lower_profile_shape(shape, env)?;
        let shape_wires = build_wires(backend, &plane, &profile_shape, Some(fonts)).map_err(BuildError::from)?;
        wires.extend(shape_wires);
    }
    Ok((plane, wires))
}

fn require_sketch<'a>(
    sketches: &'a HashMap<String, RawSketchSpec>,
    name: &str,
) -> BuildResult<&'a RawSketchSpec> {
    sketches.get(name).ok_or_else(|| {
        BuildError::new(BuildErrorKind::Operation, format!("no sketch part named '{name}'"))
    })
}

#[allow(clippy::too_many_arguments)]
fn apply_operation<B: GeometryBackend>(
    op: &RawOperation,
    env: &Environment,
    sketches: &HashMap<String, RawSketchSpec>,
    fonts: &FontRegistry,
    backend: &B,
    registry: &mut PartRegistry,
    diagnostics: &mut Diagnostics,
    references: &HashMap<String, RefSpec>,
) -> BuildResult<()> {
    match op {
        RawOperation::Transform { name, input, steps } => {
            let resolved: Vec<_> = steps
                .iter()
                .map(|step| lower_transform_step(step, env))
                .collect::<BuildResult<Vec<_>>>()?;
            apply_transform(registry, backend, input, name.clone(), &resolved, references)
                .map_err(BuildError::from)?;
        }
        RawOperation::Union { name, inputs } => {
            let refs: Vec<&str> = inputs.iter().map(String::as_str).collect();
            union(registry, backend, &refs, name.clone()).map_err(BuildError::from)?;
        }
        RawOperation::Difference { name, base, subtract } => {
            let refs: Vec<&str> = subtract.iter().map(String::as_str).collect();
            difference(registry, backend, base, &refs, name.clone()).map_err(BuildError::from)?;
        }
        RawOperation::Intersection { name, inputs } => {
            let refs: Vec<&str> = inputs.iter().map(String::as_str).collect();
            intersection(registry, backend, &refs, name.clone()).map_err(BuildError::from)?;
        }
        RawOperation::Linear { name, source, axes } => {
            let spec = lower_linear_pattern(axes, env)?;
            build_pattern(registry, backend, source, name, &spec).map_err(BuildError::from)?;
        }
        RawOperation::Circular { name, source, count, radius, axis, center, start_angle_deg, sweep_angle_deg } => {
            let spec = PatternSpec::Circular {
                count: *count,
                radius: resolve_scalar(radius, env)?,
                axis: lower_axis(axis)?,
                center: point(*center),
                start_angle_deg: resolve_scalar(start_angle_deg, env)?,
                sweep_angle_deg: resolve_scalar(sweep_angle_deg, env)?,
            };
            build_pattern(registry, backend, source, name, &spec).map_err(BuildError::from)?;
        }
        RawOperation::Grid { name, source, count_x, count_y, spacing_x, spacing_y } => {
            let spec = PatternSpec::Grid {
                count_x: *count_x,
                count_y: *count_y,
                spacing_x: resolve_scalar(spacing_x, env)?,
                spacing_y: resolve_scalar(spacing_y, env)?,
            };
            build_pattern(registry, backend, source, name, &spec).map_err(BuildError::from)?;
        }
        RawOperation::Fillet { input, radius, edges } => {
            let r = resolve_scalar(radius, env)?;
            let selector = lower_selector(edges)?;
            fillet(registry, backend, input, r, &selector).map_err(BuildError::from)?;
        }
        RawOperation::Chamfer { input, distance, distance2, edges } => {
            let d = resolve_scalar(distance, env)?;
            let d2 = distance2.as_ref().map(|s| resolve_scalar(s, env)).transpose()?;
            let selector = lower_selector(edges)?;
            chamfer(registry, backend, input, d, d2, &selector).map_err(BuildError::from)?;
        }
        RawOperation::Shell { input, thickness, faces } => {
            let t = resolve_scalar(thickness, env)?;
            let selector = lower_selector(faces)?;
            shell(registry, backend, input, t, &selector).map_err(BuildError::from)?;
        }
        RawOperation::Hull { name, inputs } => {
            let refs: Vec<&str> = inputs.iter().map(String::as_str).collect();
            hull(registry, backend, &refs, name.clone()).map_err(BuildError::from)?;
            let bbox = backend.bounding_box(&registry.get(name).map_err(BuildError::from)?.solid).map_err(BuildError::from)?;
            if is_degenerate(&bbox) {
                diagnostics.warn(Warning::CoplanarHull { output: name.clone() });
            }
        }
        RawOperation::Gusset { name, face_a, face_b, thickness } => {
            let a = lower_ref_spec(face_a);
            let b = lower_ref_spec(face_b);
            let t = resolve_scalar(thickness, env)?;
            gusset(registry, backend, &a, &b, t, name.clone(), references).map_err(BuildError::from)?;
        }
        RawOperation::Extrude { name, profile, direction } => {
            let sketch = require_sketch(sketches, profile)?;
            let (_, wires) = collect_sketch_wires(backend, env, fonts, sketch)?;
            let solid = extrude_wires(backend, &wires, vector(*direction)).map_err(BuildError::from)?;
            register_sketch_result(registry, name, solid)?;
        }
        RawOperation::Revolve { name, profile, origin, axis, angle_deg } => {
            let sketch = require_sketch(sketches, profile)?;
            let (_, wires) = collect_sketch_wires(backend, env, fonts, sketch)?;
            let origin_point = point(*origin);
            let axis_vector = lower_axis(axis)?;
            let angle_rad = resolve_scalar(angle_deg, env)?.to_radians();
            let mut solids = Vec::with_capacity(wires.len());
            for wire in &wires {
                let face = backend.planar_face(wire).map_err(BuildError::from)?;
                solids.push(backend.revolve(&face, origin_point, axis_vector, angle_rad).map_err(BuildError::from)?);
            }
            let solid = backend.union_many(&solids).map_err(BuildError::from)?;
            register_sketch_result(registry, name, solid)?;
        }
        RawOperation::Sweep { name, profile, direction } => {
            let sketch = require_sketch(sketches, profile)?;
            let (_, wires) = collect_sketch_wires(backend, env, fonts, sketch)?;
            let direction_vector = vector(*direction);
            let mut solids = Vec::with_capacity(wires.len());
            for wire in &wires {
                let face = backend.planar_face(wire).map_err(BuildError::from)?;
                solids.push(backend.sweep(&face, direction_vector).map_err(BuildError::from)?);
            }
            let solid = backend.union_many(&solids).map_err(BuildError::from)?;
            register_sketch_result(registry, name, solid)?;
        }
        RawOperation::Loft { name, profiles } => {
            let mut profile_wires = Vec::with_capacity(profiles.len());
            for profile_name in profiles {
                let sketch = require_sketch(sketches, profile_name)?;
                let (_, wires) = collect_sketch_wires(backend, env, fonts, sketch)?;
                let wire = wires.into_iter().next().ok_or_else(|| {
                    BuildError::new(
                        BuildErrorKind::Operation,
                        format!("sketch part '{profile_name}' produced no profile wire for loft"),
                    )
                })?;
                profile_wires.push(wire);
            }
            let solid = backend.loft(&profile_wires).map_err(BuildError::from)?;
            register_sketch_result(registry, name, solid)?;
        }
    }
    Ok(())
}

fn register_sketch_result(registry: &mut PartRegistry, name: &str, solid: tiacad_geom::Solid) -> BuildResult<()> {
    let metadata = PartMetadata::new("sketch-solid");
    let part = Part::new(name.to_string(), solid, PartKind::Other, metadata)
        .with_initial_position(Point3::origin());
    registry.insert(part).map_err(BuildError::from)?;
    Ok(())
}

fn is_degenerate(bbox: &tiacad_geom::BoundingBox) -> bool {
    let size = bbox.max - bbox.min;
    size.x.abs() < 1e-6 || size.y.abs() < 1e-6 || size.z.abs() < 1e-6
}

fn select_default_part(doc: &RawDocument, registry: &PartRegistry) -> BuildResult<String> {
    let candidate = doc
        .export
        .default_part
        .clone()
        .or_else(|| doc.operations.last().map(|op| operation_output_name(op).to_string()))
        .or_else(|| {
            let names: Vec<&str> = registry.names().collect();
            if names.len() == 1 {
                Some(names[0].to_string())
            } else {
                None
            }
        });

    let name = candidate.ok_or_else(|| {
        BuildError::new(
            BuildErrorKind::Export,
            "no export.default_part given, no operations produced an output, and the registry holds more than one part",
        )
    })?;
    registry.get(&name).map_err(BuildError::from).map_err(|e| e.push_frame("export"))?;
    Ok(name)
}
