//! The `hull` operation: the convex hull of the union of several parts'
//! tessellated vertices.

use tiacad_geom::{GeometryBackend, Point3};
use tiacad_registry::{Part, PartMetadata, PartRegistry};

use crate::error::{OpError, OpErrorKind, OpResult};

/// Compute the convex hull of `inputs`, registering the result under
/// `output_name`. A single input returns a copy of that input, per spec.
pub fn hull<B: GeometryBackend>(
    registry: &mut PartRegistry,
    backend: &B,
    inputs: &[&str],
    output_name: impl Into<String>,
) -> OpResult<()> {
    let output_name = output_name.into();
    log::debug!("hull({inputs:?}) -> '{output_name}'");
    if inputs.is_empty() {
        return Err(OpError::new(OpErrorKind::EmptyInput, "hull requires at least one input"));
    }

    let mut solids = Vec::with_capacity(inputs.len());
    let mut metadatas = Vec::with_capacity(inputs.len());
    for name in inputs {
        let part = registry.get(name)?;
        solids.push(part.solid.clone());
        metadatas.push(part.metadata.clone());
    }
    let kind = registry.get(inputs[0])?.kind;

    let solid = if solids.len() == 1 {
        solids.into_iter().next().unwrap()
    } else {
        backend.hull(&solids)?
    };

    let metadata_refs: Vec<&PartMetadata> = metadatas.iter().collect();
    let metadata = PartMetadata::derive_from_first(&metadata_refs, "hull");

    let part = Part::new(output_name, solid, kind, metadata).with_initial_position(Point3::origin());
    registry.insert(part)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{build_primitive, OriginMode, PrimitiveSpec};
    use tiacad_geom::TruckBackend;

    #[test]
    fn hull_rejects_empty_input() {
        let backend = TruckBackend;
        let mut registry = PartRegistry::new();
        let err = hull(&mut registry, &backend, &[], "h").unwrap_err();
        assert_eq!(err.kind, OpErrorKind::EmptyInput);
    }

    #[test]
    fn hull_of_single_input_registers_copy() {
        let backend = TruckBackend;
        let mut registry = PartRegistry::new();
        build_primitive(
            &mut registry,
            &backend,
            "a",
            PrimitiveSpec::Box { size_x: 2.0, size_y: 2.0, size_z: 2.0 },
            OriginMode::Center,
        )
        .unwrap();
        hull(&mut registry, &backend, &["a"], "h").unwrap();
        assert!(registry.contains("h"));
    }
}
