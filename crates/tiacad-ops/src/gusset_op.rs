//! The `gusset` operation: a triangular reinforcing solid bridging two
//! face references.

use std::collections::HashMap;

use tiacad_geom::{GeometryBackend, Point3};
use tiacad_registry::{Part, PartMetadata, PartRegistry, RegistryView};
use tiacad_spatial::{PartKind, RefSpec, SpatialResolver};

use crate::error::{OpError, OpErrorKind, OpResult};

/// Bridge `face_a` and `face_b` with a triangular solid of the given
/// `thickness`, registered under `output_name`.
///
/// The triangle's third vertex is found by following `face_a`'s normal
/// until it meets the plane of `face_b`; the sketch is extruded along the
/// direction perpendicular to the resulting triangle by `thickness`.
/// `references` is the document's top-level `references:` block; `face_a`
/// and `face_b` may name an entry in it.
pub fn gusset<B: GeometryBackend>(
    registry: &mut PartRegistry,
    backend: &B,
    face_a: &RefSpec,
    face_b: &RefSpec,
    thickness: f64,
    output_name: impl Into<String>,
    references: &HashMap<String, RefSpec>,
) -> OpResult<()> {
    let output_name = output_name.into();
    log::debug!("gusset -> '{output_name}' thickness={thickness}");
    if thickness <= 0.0 {
        return Err(OpError::new(OpErrorKind::InvalidSpec, "gusset thickness must be positive"));
    }

    let (a, b) = {
        let view = RegistryView::new(registry, backend);
        let mut resolver = SpatialResolver::new(&view);
        for (name, spec) in references {
            resolver.define(name.clone(), spec.clone());
        }
        let a = resolver.resolve(face_a)?;
        let b = resolver.resolve(face_b)?;
        (a, b)
    };

    use truck_modeling::{EuclideanSpace, InnerSpace};

    let normal_a = a.orientation.ok_or_else(|| {
        OpError::new(OpErrorKind::InvalidSpec, "gusset face_a reference has no orientation")
    })?;
    let normal_b = b.orientation.ok_or_else(|| {
        OpError::new(OpErrorKind::InvalidSpec, "gusset face_b reference has no orientation")
    })?;

    let denom = normal_a.dot(normal_b);
    if denom.abs() < 1e-6 {
        return Err(OpError::new(
            OpErrorKind::DegenerateGeometry,
            "gusset faces are parallel; no corner to bridge",
        ));
    }
    let t = (b.position - a.position).dot(normal_b) / denom;
    let corner = a.position + normal_a * t;

    let ab = b.position - a.position;
    let ac = corner - a.position;
    let extrude_dir = ab.cross(ac);
    if extrude_dir.magnitude() < 1e-9 {
        return Err(OpError::new(
            OpErrorKind::DegenerateGeometry,
            "gusset triangle is degenerate (collinear points)",
        ));
    }
    let extrude_dir = extrude_dir.normalize() * thickness;

    let wire = tiacad_geom::sketch::polygon_wire(&[a.position, b.position, corner])?;
    let face = backend.planar_face(&wire)?;
    let solid = backend.extrude(&face, extrude_dir)?;

    let metadata = PartMetadata::new("gusset");
    let part =
        Part::new(output_name, solid, PartKind::Other, metadata).with_initial_position(corner);
    registry.insert(part)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{build_primitive, OriginMode, PrimitiveSpec};
    use tiacad_geom::TruckBackend;
    use tiacad_spatial::{FaceAt, InlineSpec};

    fn two_boxes() -> (PartRegistry, TruckBackend) {
        let backend = TruckBackend;
        let mut registry = PartRegistry::new();
        build_primitive(
            &mut registry,
            &backend,
            "wall",
            PrimitiveSpec::Box { size_x: 10.0, size_y: 1.0, size_z: 10.0 },
            OriginMode::Corner,
        )
        .unwrap();
        build_primitive(
            &mut registry,
            &backend,
            "floor",
            PrimitiveSpec::Box { size_x: 10.0, size_y: 10.0, size_z: 1.0 },
            OriginMode::Corner,
        )
        .unwrap();
        (registry, backend)
    }

    #[test]
    fn gusset_rejects_non_positive_thickness() {
        let (mut registry, backend) = two_boxes();
        let face_a = RefSpec::Inline(InlineSpec::Face {
            part: "wall".to_string(),
            selector: Some("face_top".to_string()),
            at: FaceAt::Center,
        });
        let face_b = RefSpec::Inline(InlineSpec::Face {
            part: "floor".to_string(),
            selector: Some("face_top".to_string()),
            at: FaceAt::Center,
        });
        let err =
            gusset(&mut registry, &backend, &face_a, &face_b, 0.0, "g", &HashMap::new()).unwrap_err();
        assert_eq!(err.kind, OpErrorKind::InvalidSpec);
    }
}
