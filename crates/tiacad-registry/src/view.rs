//! Adapts a [`PartRegistry`] plus a geometry backend into the
//! [`tiacad_spatial::PartSource`] view the spatial resolver queries.

use tiacad_geom::{BoundingBox, GeometryBackend, Point3, Vector3};
use tiacad_spatial::{EdgeAt, PartKind, PartSource, SpatialError, SpatialErrorKind, SpatialResult};

use crate::registry::PartRegistry;

/// A read-only view pairing a registry with the backend needed to answer
/// geometric queries (bounding boxes, face/edge selection) against it.
pub struct RegistryView<'a, B: GeometryBackend> {
    pub registry: &'a PartRegistry,
    pub backend: &'a B,
}

impl<'a, B: GeometryBackend> RegistryView<'a, B> {
    pub fn new(registry: &'a PartRegistry, backend: &'a B) -> Self {
        Self { registry, backend }
    }
}

fn to_spatial_err(message: impl std::fmt::Display) -> SpatialError {
    SpatialError::new(SpatialErrorKind::UnknownPart, message.to_string())
}

impl<'a, B: GeometryBackend> PartSource for RegistryView<'a, B> {
    fn part_origin(&self, name: &str) -> SpatialResult<Point3> {
        let part = self.registry.get(name).map_err(to_spatial_err)?;
        Ok(part.current_position())
    }

    fn part_bounding_box(&self, name: &str) -> SpatialResult<BoundingBox> {
        let part = self.registry.get(name).map_err(to_spatial_err)?;
        self.backend
            .bounding_box(&part.solid)
            .map_err(|e| SpatialError::new(SpatialErrorKind::NoMatch, e.message))
    }

    fn part_kind(&self, name: &str) -> SpatialResult<PartKind> {
        let part = self.registry.get(name).map_err(to_spatial_err)?;
        Ok(part.kind)
    }

    fn select_face(&self, part: &str, selector: &str) -> SpatialResult<(Point3, Vector3)> {
        let entry = self.registry.get(part).map_err(to_spatial_err)?;
        let faces = self
            .backend
            .select_faces(&entry.solid, selector)
            .map_err(|e| SpatialError::new(SpatialErrorKind::InvalidSelector, e.message))?;
        let face = faces.first().ok_or_else(|| {
            SpatialError::new(
                SpatialErrorKind::NoMatch,
                format!("no face of '{part}' matched selector '{selector}'"),
            )
        })?;
        let center = self.backend.face_center(face);
        let normal = self
            .backend
            .face_normal(face)
            .map_err(|e| SpatialError::new(SpatialErrorKind::NoMatch, e.message))?;
        Ok((center, normal))
    }

    fn select_edge(
        &self,
        part: &str,
        selector: &str,
        at: EdgeAt,
    ) -> SpatialResult<(Point3, Vector3)> {
        let entry = self.registry.get(part).map_err(to_spatial_err)?;
        let edges = self
            .backend
            .select_edges(&entry.solid, selector)
            .map_err(|e| SpatialError::new(SpatialErrorKind::InvalidSelector, e.message))?;
        let edge = edges.first().ok_or_else(|| {
            SpatialError::new(
                SpatialErrorKind::NoMatch,
                format!("no edge of '{part}' matched selector '{selector}'"),
            )
        })?;
        let t = at.t();
        let point = self.backend.edge_point_at(edge, t);
        let tangent = self
            .backend
            .edge_tangent_at(edge, t)
            .map_err(|e| SpatialError::new(SpatialErrorKind::NoMatch, e.message))?;
        Ok((point, tangent))
    }
}
