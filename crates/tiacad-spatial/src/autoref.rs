//! Resolution of auto-generated part-local reference names
//! (`{part}.center`, `{part}.face_top`, `{part}.axis_z`, ...).

use tiacad_geom::Vector3;

use crate::error::{SpatialError, SpatialErrorKind, SpatialResult};
use crate::source::{PartKind, PartSource};
use crate::types::{RefType, SpatialRef};

/// Canonical selector strings for the six axis-aligned auto-faces, per the
/// fixed mapping `face_top ↔ ">Z"` etc.
fn face_selector(suffix: &str) -> Option<&'static str> {
    match suffix {
        "face_top" => Some(">Z"),
        "face_bottom" => Some("<Z"),
        "face_left" => Some("<X"),
        "face_right" => Some(">X"),
        "face_front" => Some(">Y"),
        "face_back" => Some("<Y"),
        _ => None,
    }
}

fn axis_vector(suffix: &str) -> Option<Vector3> {
    match suffix {
        "axis_x" => Some(Vector3::new(1.0, 0.0, 0.0)),
        "axis_y" => Some(Vector3::new(0.0, 1.0, 0.0)),
        "axis_z" => Some(Vector3::new(0.0, 0.0, 1.0)),
        _ => None,
    }
}

/// `true` if `part_kind` advertises the given auto-face suffix.
fn face_available(kind: PartKind, suffix: &str) -> bool {
    match kind {
        PartKind::Box | PartKind::Cone | PartKind::Other => true,
        PartKind::Cylinder => matches!(suffix, "face_top" | "face_bottom"),
        PartKind::Sphere => matches!(suffix, "face_top" | "face_bottom"),
    }
}

/// Resolve `{part}.{suffix}` against a [`PartSource`].
pub fn resolve_autoref(
    source: &dyn PartSource,
    part: &str,
    suffix: &str,
) -> SpatialResult<SpatialRef> {
    match suffix {
        "center" => {
            let bbox = source.part_bounding_box(part)?;
            Ok(SpatialRef::point(bbox.center()))
        }
        "origin" => {
            let origin = source.part_origin(part)?;
            Ok(SpatialRef::point(origin))
        }
        _ if axis_vector(suffix).is_some() => {
            let direction = axis_vector(suffix).expect("checked above");
            let bbox = source.part_bounding_box(part)?;
            SpatialRef::new(bbox.center(), Some(direction), None, RefType::Axis)
        }
        _ if face_selector(suffix).is_some() => {
            let kind = source.part_kind(part)?;
            if !face_available(kind, suffix) {
                return Err(SpatialError::new(
                    SpatialErrorKind::NoMatch,
                    format!("part of kind {kind:?} does not expose '{suffix}'"),
                ));
            }
            if let Some(normal) = sphere_pole(kind, suffix) {
                let bbox = source.part_bounding_box(part)?;
                let radius = bbox.size().z / 2.0;
                let position = bbox.center() + normal * radius;
                return SpatialRef::new(position, Some(normal), None, RefType::Face);
            }
            let selector = face_selector(suffix).expect("checked above");
            let (center, normal) = source.select_face(part, selector)?;
            SpatialRef::new(center, Some(normal), None, RefType::Face)
        }
        _ => Err(SpatialError::new(
            SpatialErrorKind::UnknownReference,
            format!("part '{part}' has no auto-reference named '{suffix}'"),
        )),
    }
}

/// Spheres expose `face_top`/`face_bottom` as polar points with `(0,0,±1)`
/// normals rather than a backend-selected face.
fn sphere_pole(kind: PartKind, suffix: &str) -> Option<Vector3> {
    if kind != PartKind::Sphere {
        return None;
    }
    match suffix {
        "face_top" => Some(Vector3::new(0.0, 0.0, 1.0)),
        "face_bottom" => Some(Vector3::new(0.0, 0.0, -1.0)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::PartKind;
    use tiacad_geom::{BoundingBox, Point3};

    struct FakeSource;

    impl PartSource for FakeSource {
        fn part_origin(&self, _name: &str) -> SpatialResult<Point3> {
            Ok(Point3::new(0.0, 0.0, 0.0))
        }
        fn part_bounding_box(&self, _name: &str) -> SpatialResult<BoundingBox> {
            Ok(BoundingBox {
                min: Point3::new(-5.0, -5.0, -5.0),
                max: Point3::new(5.0, 5.0, 5.0),
            })
        }
        fn part_kind(&self, _name: &str) -> SpatialResult<PartKind> {
            Ok(PartKind::Cylinder)
        }
        fn select_face(
            &self,
            _part: &str,
            _selector: &str,
        ) -> SpatialResult<(Point3, Vector3)> {
            Ok((Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 1.0)))
        }
        fn select_edge(
            &self,
            _part: &str,
            _selector: &str,
            _at: crate::spec::EdgeAt,
        ) -> SpatialResult<(Point3, Vector3)> {
            unimplemented!()
        }
    }

    #[test]
    fn cylinder_exposes_top_and_bottom_only() {
        let source = FakeSource;
        assert!(resolve_autoref(&source, "p", "face_top").is_ok());
        assert!(resolve_autoref(&source, "p", "face_left").is_err());
    }

    #[test]
    fn center_and_origin_resolve() {
        let source = FakeSource;
        let center = resolve_autoref(&source, "p", "center").unwrap();
        assert_eq!(center.position, Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn unknown_suffix_errors() {
        let source = FakeSource;
        let err = resolve_autoref(&source, "p", "not_a_ref").unwrap_err();
        assert_eq!(err.kind, SpatialErrorKind::UnknownReference);
    }
}
