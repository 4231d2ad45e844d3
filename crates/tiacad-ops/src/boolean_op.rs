//! The `union`, `difference`, and `intersection` boolean operations.

use tiacad_geom::{GeometryBackend, Point3, Solid};
use tiacad_registry::{Part, PartMetadata, PartRegistry};
use tiacad_spatial::PartKind;

use crate::error::{OpError, OpErrorKind, OpResult};

struct Snapshot {
    solid: Solid,
    kind: PartKind,
    metadata: PartMetadata,
}

fn snapshot_all(registry: &PartRegistry, names: &[&str]) -> OpResult<Vec<Snapshot>> {
    names
        .iter()
        .map(|name| {
            let part = registry.get(name)?;
            Ok(Snapshot {
                solid: part.solid.clone(),
                kind: part.kind,
                metadata: part.metadata.clone(),
            })
        })
        .collect()
}

/// `union(inputs)` -> a single new part holding the union of all inputs.
pub fn union<B: GeometryBackend>(
    registry: &mut PartRegistry,
    backend: &B,
    inputs: &[&str],
    output_name: impl Into<String>,
) -> OpResult<()> {
    let output_name = output_name.into();
    log::debug!("union({inputs:?}) -> '{output_name}'");
    if inputs.is_empty() {
        return Err(OpError::new(OpErrorKind::EmptyInput, "union requires at least one input"));
    }

    let parts = snapshot_all(registry, inputs)?;
    let solids: Vec<_> = parts.iter().map(|p| p.solid.clone()).collect();
    let solid = backend.union_many(&solids)?;
    let metadata = PartMetadata::derive_from_first(
        &parts.iter().map(|p| &p.metadata).collect::<Vec<_>>(),
        "union",
    );
    let kind = parts[0].kind;

    let part = Part::new(output_name, solid, kind, metadata).with_initial_position(Point3::origin());
    registry.insert(part)?;
    Ok(())
}

/// `difference(base, subtract)` -> a new part containing `base \ union(subtract)`.
/// An empty `subtract` list returns a copy of `base`.
pub fn difference<B: GeometryBackend>(
    registry: &mut PartRegistry,
    backend: &B,
    base: &str,
    subtract: &[&str],
    output_name: impl Into<String>,
) -> OpResult<()> {
    let output_name = output_name.into();
    log::debug!("difference('{base}', {subtract:?}) -> '{output_name}'");

    let base_snapshot = {
        let part = registry.get(base)?;
        Snapshot {
            solid: part.solid.clone(),
            kind: part.kind,
            metadata: part.metadata.clone(),
        }
    };
    let metadata = PartMetadata::derive_single(&base_snapshot.metadata, "difference", None);

    let mut solid = base_snapshot.solid;
    if !subtract.is_empty() {
        let subtract_parts = snapshot_all(registry, subtract)?;
        for part in &subtract_parts {
            solid = backend.difference(&solid, &part.solid)?;
        }
    }

    let part =
        Part::new(output_name, solid, base_snapshot.kind, metadata).with_initial_position(Point3::origin());
    registry.insert(part)?;
    Ok(())
}

/// `intersection(inputs)` -> a new part containing the common volume of
/// all inputs.
pub fn intersection<B: GeometryBackend>(
    registry: &mut PartRegistry,
    backend: &B,
    inputs: &[&str],
    output_name: impl Into<String>,
) -> OpResult<()> {
    let output_name = output_name.into();
    log::debug!("intersection({inputs:?}) -> '{output_name}'");
    if inputs.len() < 2 {
        return Err(OpError::new(
            OpErrorKind::EmptyInput,
            "intersection requires at least two inputs",
        ));
    }

    let parts = snapshot_all(registry, inputs)?;
    let mut iter = parts.iter();
    let mut solid = iter.next().unwrap().solid.clone();
    for part in iter {
        solid = backend.intersection(&solid, &part.solid)?;
    }
    let metadata = PartMetadata::derive_from_first(
        &parts.iter().map(|p| &p.metadata).collect::<Vec<_>>(),
        "intersection",
    );
    let kind = parts[0].kind;

    let part = Part::new(output_name, solid, kind, metadata).with_initial_position(Point3::origin());
    registry.insert(part)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{build_primitive, OriginMode, PrimitiveSpec};
    use tiacad_geom::TruckBackend;

    fn two_boxes() -> (PartRegistry, TruckBackend) {
        let backend = TruckBackend;
        let mut registry = PartRegistry::new();
        build_primitive(
            &mut registry,
            &backend,
            "a",
            PrimitiveSpec::Box { size_x: 4.0, size_y: 4.0, size_z: 4.0 },
            OriginMode::Corner,
        )
        .unwrap();
        build_primitive(
            &mut registry,
            &backend,
            "b",
            PrimitiveSpec::Box { size_x: 2.0, size_y: 2.0, size_z: 2.0 },
            OriginMode::Corner,
        )
        .unwrap();
        (registry, backend)
    }

    #[test]
    fn union_registers_new_part() {
        let (mut registry, backend) = two_boxes();
        union(&mut registry, &backend, &["a", "b"], "u").unwrap();
        assert!(registry.contains("u"));
    }

    #[test]
    fn difference_with_empty_subtract_copies_base() {
        let (mut registry, backend) = two_boxes();
        difference(&mut registry, &backend, "a", &[], "copy").unwrap();
        let base = registry.get("a").unwrap();
        let copy = registry.get("copy").unwrap();
        let base_bbox = backend.bounding_box(&base.solid).unwrap();
        let copy_bbox = backend.bounding_box(&copy.solid).unwrap();
        assert!((base_bbox.max.x - copy_bbox.max.x).abs() < 1e-9);
    }

    #[test]
    fn union_rejects_empty_input() {
        let (mut registry, backend) = two_boxes();
        let err = union(&mut registry, &backend, &[], "u").unwrap_err();
        assert_eq!(err.kind, OpErrorKind::EmptyInput);
    }

    #[test]
    fn intersection_requires_two_inputs() {
        let (mut registry, backend) = two_boxes();
        let err = intersection(&mut registry, &backend, &["a"], "x").unwrap_err();
        assert_eq!(err.kind, OpErrorKind::EmptyInput);
    }
}
