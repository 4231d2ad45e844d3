//! The `fillet`, `chamfer`, and `shell` in-place finishing operations, and
//! the edge/face selector grammar they share with the operation spec.

use tiacad_geom::{GeometryBackend, Vector3};
use tiacad_registry::PartRegistry;

use crate::error::{OpError, OpErrorKind, OpResult};

/// How a finishing step picks which edges (or, for `shell`, faces) of a
/// part's current geometry to act on.
#[derive(Debug, Clone)]
pub enum Selector {
    All,
    Direction(Vector3),
    ParallelTo(Vector3),
    PerpendicularTo(Vector3),
    Raw(String),
}

impl Selector {
    fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

/// Round all edges matched by `edges` on `input` by `radius`, in place.
pub fn fillet<B: GeometryBackend>(
    registry: &mut PartRegistry,
    backend: &B,
    input: &str,
    radius: f64,
    edges: &Selector,
) -> OpResult<()> {
    log::debug!("fillet '{input}' radius={radius} edges={edges:?}");
    if radius <= 0.0 {
        return Err(OpError::new(OpErrorKind::InvalidSpec, "fillet radius must be positive"));
    }
    if !edges.is_all() {
        log::warn!("fillet on '{input}' requested a partial edge selector; the backend applies fillet to every edge uniformly");
    }
    let part = registry.get_mut(input)?;
    let filleted = backend.fillet(&part.solid, radius)?;
    part.replace_geometry(filleted);
    Ok(())
}

/// Bevel all edges matched by `edges` on `input` by `distance`, in place.
/// `distance2` is accepted for the asymmetric-chamfer case but the backend
/// only exposes a single-distance chamfer; when both are given the
/// smaller of the two is used (a conservative bound on the cut).
pub fn chamfer<B: GeometryBackend>(
    registry: &mut PartRegistry,
    backend: &B,
    input: &str,
    distance: f64,
    distance2: Option<f64>,
    edges: &Selector,
) -> OpResult<()> {
    log::debug!("chamfer '{input}' distance={distance} edges={edges:?}");
    if distance <= 0.0 {
        return Err(OpError::new(OpErrorKind::InvalidSpec, "chamfer distance must be positive"));
    }
    let effective = distance2.map(|d2| distance.min(d2)).unwrap_or(distance);
    if !edges.is_all() {
        log::warn!("chamfer on '{input}' requested a partial edge selector; the backend applies chamfer to every edge uniformly");
    }
    let part = registry.get_mut(input)?;
    let chamfered = backend.chamfer(&part.solid, effective)?;
    part.replace_geometry(chamfered);
    Ok(())
}

/// Hollow `input` into a constant-thickness shell matched by `faces`, in
/// place.
pub fn shell<B: GeometryBackend>(
    registry: &mut PartRegistry,
    backend: &B,
    input: &str,
    thickness: f64,
    faces: &Selector,
) -> OpResult<()> {
    log::debug!("shell '{input}' thickness={thickness} faces={faces:?}");
    if thickness <= 0.0 {
        return Err(OpError::new(OpErrorKind::InvalidSpec, "shell thickness must be positive"));
    }
    if !faces.is_all() {
        log::warn!("shell on '{input}' requested a partial face selector; the backend shells every face uniformly");
    }
    let part = registry.get_mut(input)?;
    let shelled = backend.shell(&part.solid, thickness)?;
    part.replace_geometry(shelled);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{build_primitive, OriginMode, PrimitiveSpec};
    use tiacad_geom::TruckBackend;

    fn cube_registry() -> (PartRegistry, TruckBackend) {
        let backend = TruckBackend;
        let mut registry = PartRegistry::new();
        build_primitive(
            &mut registry,
            &backend,
            "cube",
            PrimitiveSpec::Box { size_x: 5.0, size_y: 5.0, size_z: 5.0 },
            OriginMode::Center,
        )
        .unwrap();
        (registry, backend)
    }

    #[test]
    fn fillet_replaces_geometry_in_place() {
        let (mut registry, backend) = cube_registry();
        fillet(&mut registry, &backend, "cube", 0.5, &Selector::All).unwrap();
        assert!(registry.contains("cube"));
        assert!(!registry.contains("cube_filleted"));
    }

    #[test]
    fn fillet_rejects_non_positive_radius() {
        let (mut registry, backend) = cube_registry();
        let err = fillet(&mut registry, &backend, "cube", 0.0, &Selector::All).unwrap_err();
        assert_eq!(err.kind, OpErrorKind::InvalidSpec);
    }

    #[test]
    fn shell_rejects_non_positive_thickness() {
        let (mut registry, backend) = cube_registry();
        let err = shell(&mut registry, &backend, "cube", -1.0, &Selector::All).unwrap_err();
        assert_eq!(err.kind, OpErrorKind::InvalidSpec);
    }
}
