//! The `linear`, `circular`, and `grid` pattern operations: copy a source
//! part across a lattice of world positions.

use tiacad_geom::{GeometryBackend, Point3, Vector3};
use tiacad_registry::{Part, PartMetadata, PartRegistry};

use crate::error::{OpError, OpErrorKind, OpResult};

/// One axis of a linear pattern: how many copies, how far apart, and in
/// which direction.
#[derive(Debug, Clone, Copy)]
pub struct LinearAxis {
    pub count: usize,
    pub spacing: f64,
    pub direction: Vector3,
}

#[derive(Debug, Clone)]
pub enum PatternSpec {
    /// 1-3 axes; naming follows the axis count (`{name}_{i}`,
    /// `{name}_{i}_{j}`, `{name}_{i}_{j}_{k}`).
    Linear(Vec<LinearAxis>),
    Circular {
        count: usize,
        radius: f64,
        axis: Vector3,
        center: Point3,
        start_angle_deg: f64,
        sweep_angle_deg: f64,
    },
    Grid {
        count_x: usize,
        count_y: usize,
        spacing_x: f64,
        spacing_y: f64,
    },
}

/// Apply `spec` to `source`, registering each generated copy.
pub fn build_pattern<B: GeometryBackend>(
    registry: &mut PartRegistry,
    backend: &B,
    source: &str,
    name: &str,
    spec: &PatternSpec,
) -> OpResult<()> {
    log::debug!("pattern '{source}' -> '{name}'");

    let (source_solid, source_kind, source_metadata, source_origin) = {
        let part = registry.get(source)?;
        (
            part.solid.clone(),
            part.kind,
            part.metadata.clone(),
            part.current_position(),
        )
    };

    match spec {
        PatternSpec::Linear(axes) => build_linear(
            registry,
            backend,
            name,
            &source_solid,
            source_kind,
            &source_metadata,
            source_origin,
            axes,
        ),
        PatternSpec::Circular { count, radius, axis, center, start_angle_deg, sweep_angle_deg } => {
            build_circular(
                registry,
                backend,
                name,
                &source_solid,
                source_kind,
                &source_metadata,
                *count,
                *radius,
                *axis,
                *center,
                *start_angle_deg,
                *sweep_angle_deg,
            )
        }
        PatternSpec::Grid { count_x, count_y, spacing_x, spacing_y } => build_grid(
            registry,
            backend,
            name,
            &source_solid,
            source_kind,
            &source_metadata,
            source_origin,
            *count_x,
            *count_y,
            *spacing_x,
            *spacing_y,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_linear<B: GeometryBackend>(
    registry: &mut PartRegistry,
    backend: &B,
    name: &str,
    source_solid: &tiacad_geom::Solid,
    kind: tiacad_spatial::PartKind,
    metadata: &PartMetadata,
    source_origin: Point3,
    axes: &[LinearAxis],
) -> OpResult<()> {
    if axes.is_empty() || axes.len() > 3 {
        return Err(OpError::new(
            OpErrorKind::InvalidSpec,
            "linear pattern requires 1 to 3 axes",
        ));
    }
    for axis in axes {
        if axis.count == 0 {
            return Err(OpError::new(OpErrorKind::InvalidSpec, "pattern axis count must be > 0"));
        }
    }

    match axes {
        [a] => {
            for i in 0..a.count {
                let offset = a.direction * (a.spacing * i as f64);
                place_copy(
                    registry,
                    backend,
                    source_solid,
                    kind,
                    metadata,
                    source_origin,
                    offset,
                    format!("{name}_{i}"),
                    "pattern_linear",
                )?;
            }
        }
        [a, b] => {
            for i in 0..a.count {
                for j in 0..b.count {
                    let offset = a.direction * (a.spacing * i as f64) + b.direction * (b.spacing * j as f64);
                    place_copy(
                        registry,
                        backend,
                        source_solid,
                        kind,
                        metadata,
                        source_origin,
                        offset,
                        format!("{name}_{i}_{j}"),
                        "pattern_linear",
                    )?;
                }
            }
        }
        [a, b, c] => {
            for i in 0..a.count {
                for j in 0..b.count {
                    for k in 0..c.count {
                        let offset = a.direction * (a.spacing * i as f64)
                            + b.direction * (b.spacing * j as f64)
                            + c.direction * (c.spacing * k as f64);
                        place_copy(
                            registry,
                            backend,
                            source_solid,
                            kind,
                            metadata,
                            source_origin,
                            offset,
                            format!("{name}_{i}_{j}_{k}"),
                            "pattern_linear",
                        )?;
                    }
                }
            }
        }
        _ => unreachable!("axis count already validated to 1..=3"),
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn build_circular<B: GeometryBackend>(
    registry: &mut PartRegistry,
    backend: &B,
    name: &str,
    source_solid: &tiacad_geom::Solid,
    kind: tiacad_spatial::PartKind,
    metadata: &PartMetadata,
    count: usize,
    radius: f64,
    axis: Vector3,
    center: Point3,
    start_angle_deg: f64,
    sweep_angle_deg: f64,
) -> OpResult<()> {
    if count == 0 {
        return Err(OpError::new(OpErrorKind::InvalidSpec, "circular pattern count must be > 0"));
    }
    use truck_modeling::EuclideanSpace;
    let (u, v) = orthonormal_basis(axis);
    let start = start_angle_deg.to_radians();
    let sweep = sweep_angle_deg.to_radians();
    let step = sweep / count as f64;

    for i in 0..count {
        let angle = start + step * i as f64;
        let point = center + u * (radius * angle.cos()) + v * (radius * angle.sin());
        let offset = point - center;
        place_copy(
            registry,
            backend,
            source_solid,
            kind,
            metadata,
            center,
            offset,
            format!("{name}_{i}"),
            "pattern_circular",
        )?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn build_grid<B: GeometryBackend>(
    registry: &mut PartRegistry,
    backend: &B,
    name: &str,
    source_solid: &tiacad_geom::Solid,
    kind: tiacad_spatial::PartKind,
    metadata: &PartMetadata,
    source_origin: Point3,
    count_x: usize,
    count_y: usize,
    spacing_x: f64,
    spacing_y: f64,
) -> OpResult<()> {
    if count_x == 0 || count_y == 0 {
        return Err(OpError::new(OpErrorKind::InvalidSpec, "grid pattern counts must be > 0"));
    }
    for i in 0..count_x {
        for j in 0..count_y {
            let offset = Vector3::new(spacing_x * i as f64, spacing_y * j as f64, 0.0);
            place_copy(
                registry,
                backend,
                source_solid,
                kind,
                metadata,
                source_origin,
                offset,
                format!("{name}_{i}_{j}"),
                "pattern_grid",
            )?;
        }
    }
    Ok(())
}

/// Build an arbitrary orthonormal basis perpendicular to `axis`, following
/// the same near-parallel fallback rule as a spatial frame's own basis
/// completion.
fn orthonormal_basis(axis: Vector3) -> (Vector3, Vector3) {
    use truck_modeling::InnerSpace;
    let z = axis.normalize();
    let world_z = Vector3::new(0.0, 0.0, 1.0);
    let seed = if z.dot(world_z).abs() >= 0.9 {
        Vector3::new(1.0, 0.0, 0.0)
    } else {
        world_z
    };
    let u = z.cross(seed).normalize();
    let v = z.cross(u).normalize();
    (u, v)
}

#[allow(clippy::too_many_arguments)]
fn place_copy<B: GeometryBackend>(
    registry: &mut PartRegistry,
    backend: &B,
    source_solid: &tiacad_geom::Solid,
    kind: tiacad_spatial::PartKind,
    metadata: &PartMetadata,
    source_origin: Point3,
    offset: Vector3,
    name: String,
    operation: &str,
) -> OpResult<()> {
    let solid = backend.translate(source_solid, offset)?;
    let copy_metadata = PartMetadata::derive_single(metadata, operation, None);
    let part = Part::new(name, solid, kind, copy_metadata).with_initial_position(source_origin + offset);
    registry.insert(part)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{build_primitive, OriginMode, PrimitiveSpec};
    use tiacad_geom::TruckBackend;

    fn single_box() -> (PartRegistry, TruckBackend) {
        let backend = TruckBackend;
        let mut registry = PartRegistry::new();
        build_primitive(
            &mut registry,
            &backend,
            "src",
            PrimitiveSpec::Box { size_x: 1.0, size_y: 1.0, size_z: 1.0 },
            OriginMode::Corner,
        )
        .unwrap();
        (registry, backend)
    }

    #[test]
    fn linear_1d_names_copies_sequentially() {
        let (mut registry, backend) = single_box();
        let axes = vec![LinearAxis { count: 3, spacing: 2.0, direction: Vector3::new(1.0, 0.0, 0.0) }];
        build_pattern(&mut registry, &backend, "src", "row", &PatternSpec::Linear(axes)).unwrap();
        assert!(registry.contains("row_0"));
        assert!(registry.contains("row_1"));
        assert!(registry.contains("row_2"));
        let p2 = registry.get("row_2").unwrap();
        assert!((p2.current_position().x - 4.0).abs() < 1e-9);
    }

    #[test]
    fn linear_2d_names_copies_with_double_index() {
        let (mut registry, backend) = single_box();
        let axes = vec![
            LinearAxis { count: 2, spacing: 1.0, direction: Vector3::new(1.0, 0.0, 0.0) },
            LinearAxis { count: 2, spacing: 1.0, direction: Vector3::new(0.0, 1.0, 0.0) },
        ];
        build_pattern(&mut registry, &backend, "src", "grid2d", &PatternSpec::Linear(axes)).unwrap();
        assert!(registry.contains("grid2d_1_1"));
    }

    #[test]
    fn circular_pattern_places_copies_on_circle() {
        let (mut registry, backend) = single_box();
        build_pattern(
            &mut registry,
            &backend,
            "src",
            "ring",
            &PatternSpec::Circular {
                count: 4,
                radius: 10.0,
                axis: Vector3::new(0.0, 0.0, 1.0),
                center: {
                    use truck_modeling::EuclideanSpace;
                    Point3::origin()
                },
                start_angle_deg: 0.0,
                sweep_angle_deg: 360.0,
            },
        )
        .unwrap();
        assert!(registry.contains("ring_0"));
        assert!(registry.contains("ring_3"));
    }

    #[test]
    fn grid_pattern_rejects_zero_count() {
        let (mut registry, backend) = single_box();
        let err = build_pattern(
            &mut registry,
            &backend,
            "src",
            "g",
            &PatternSpec::Grid { count_x: 0, count_y: 2, spacing_x: 1.0, spacing_y: 1.0 },
        )
        .unwrap_err();
        assert_eq!(err.kind, OpErrorKind::InvalidSpec);
    }
}
