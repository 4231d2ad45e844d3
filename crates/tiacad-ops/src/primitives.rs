//! Builds a primitive solid from its declared spec and registers it.

use tiacad_geom::{GeometryBackend, Point3, Vector3};
use tiacad_registry::{Part, PartMetadata, PartRegistry};
use tiacad_spatial::PartKind;

use crate::error::{OpError, OpErrorKind, OpResult};

/// The shape-specific dimensions of a primitive, already parameter-resolved.
#[derive(Debug, Clone, Copy)]
pub enum PrimitiveSpec {
    Box { size_x: f64, size_y: f64, size_z: f64 },
    Cylinder { radius: f64, height: f64 },
    Sphere { radius: f64 },
    Cone { base_radius: f64, top_radius: f64, height: f64 },
    Torus { major_radius: f64, minor_radius: f64 },
}

impl PrimitiveSpec {
    fn part_kind(&self) -> PartKind {
        match self {
            PrimitiveSpec::Box { .. } => PartKind::Box,
            PrimitiveSpec::Cylinder { .. } => PartKind::Cylinder,
            PrimitiveSpec::Sphere { .. } => PartKind::Sphere,
            PrimitiveSpec::Cone { .. } => PartKind::Cone,
            PrimitiveSpec::Torus { .. } => PartKind::Other,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PrimitiveSpec::Box { .. } => "box",
            PrimitiveSpec::Cylinder { .. } => "cylinder",
            PrimitiveSpec::Sphere { .. } => "sphere",
            PrimitiveSpec::Cone { .. } => "cone",
            PrimitiveSpec::Torus { .. } => "torus",
        }
    }
}

/// Where a primitive's tracked local origin sits inside the shape at
/// creation time.
#[derive(Debug, Clone, Copy)]
pub enum OriginMode {
    Center,
    Corner,
    Base,
    Explicit(Vector3),
}

/// Build `spec` via `backend`, place it according to `origin_mode`, and
/// register it under `name`.
pub fn build_primitive<B: GeometryBackend>(
    registry: &mut PartRegistry,
    backend: &B,
    name: impl Into<String>,
    spec: PrimitiveSpec,
    origin_mode: OriginMode,
) -> OpResult<()> {
    let name = name.into();
    log::debug!("building primitive '{name}' ({})", spec.label());

    let raw = match spec {
        PrimitiveSpec::Box { size_x, size_y, size_z } => {
            require_positive(&[("size_x", size_x), ("size_y", size_y), ("size_z", size_z)])?;
            backend.box_solid(size_x, size_y, size_z)?
        }
        PrimitiveSpec::Cylinder { radius, height } => {
            require_positive(&[("radius", radius), ("height", height)])?;
            backend.cylinder(radius, height)?
        }
        PrimitiveSpec::Sphere { radius } => {
            require_positive(&[("radius", radius)])?;
            backend.sphere(radius)?
        }
        PrimitiveSpec::Cone { base_radius, top_radius, height } => {
            require_positive(&[("base_radius", base_radius), ("height", height)])?;
            backend.cone(base_radius, top_radius, height)?
        }
        PrimitiveSpec::Torus { major_radius, minor_radius } => {
            require_positive(&[("major_radius", major_radius), ("minor_radius", minor_radius)])?;
            backend.torus(major_radius, minor_radius)?
        }
    };

    use truck_modeling::EuclideanSpace;
    let world_origin = Point3::origin();

    let bbox = backend.bounding_box(&raw)?;
    let offset = match origin_mode {
        OriginMode::Center => bbox.center() - world_origin,
        OriginMode::Corner => bbox.min - world_origin,
        OriginMode::Base => {
            let center = bbox.center();
            Vector3::new(center.x, center.y, bbox.min.z) - world_origin
        }
        OriginMode::Explicit(local) => local,
    };
    let placed = backend.translate(&raw, -offset)?;

    let metadata = PartMetadata::new(spec.label());
    let part = Part::new(name, placed, spec.part_kind(), metadata);
    registry.insert(part)?;
    Ok(())
}

fn require_positive(values: &[(&str, f64)]) -> OpResult<()> {
    for (name, value) in values {
        if *value <= 0.0 {
            return Err(OpError::new(
                OpErrorKind::InvalidSpec,
                format!("'{name}' must be positive, got {value}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiacad_geom::TruckBackend;

    #[test]
    fn box_at_center_has_symmetric_bounding_box() {
        let backend = TruckBackend;
        let mut registry = PartRegistry::new();
        build_primitive(
            &mut registry,
            &backend,
            "box",
            PrimitiveSpec::Box { size_x: 10.0, size_y: 10.0, size_z: 10.0 },
            OriginMode::Center,
        )
        .unwrap();
        let part = registry.get("box").unwrap();
        let bbox = backend.bounding_box(&part.solid).unwrap();
        assert!((bbox.min.x + 5.0).abs() < 1e-6);
        assert!((bbox.max.x - 5.0).abs() < 1e-6);
    }

    #[test]
    fn box_at_corner_starts_at_world_origin() {
        let backend = TruckBackend;
        let mut registry = PartRegistry::new();
        build_primitive(
            &mut registry,
            &backend,
            "box",
            PrimitiveSpec::Box { size_x: 4.0, size_y: 4.0, size_z: 4.0 },
            OriginMode::Corner,
        )
        .unwrap();
        let part = registry.get("box").unwrap();
        let bbox = backend.bounding_box(&part.solid).unwrap();
        assert!(bbox.min.x.abs() < 1e-6);
    }

    #[test]
    fn non_positive_dimension_rejected() {
        let backend = TruckBackend;
        let mut registry = PartRegistry::new();
        let err = build_primitive(
            &mut registry,
            &backend,
            "box",
            PrimitiveSpec::Box { size_x: 0.0, size_y: 4.0, size_z: 4.0 },
            OriginMode::Corner,
        )
        .unwrap_err();
        assert_eq!(err.kind, OpErrorKind::InvalidSpec);
    }
}
