//! Resolves [`RefSpec`] values — user-declared or inline — into
//! world-coordinate [`SpatialRef`]s, with reference-cycle detection and a
//! conservative whole-cache flush on registry mutation.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{SpatialError, SpatialErrorKind, SpatialResult};
use crate::source::PartSource;
use crate::spec::{split_dotted, InlineSpec, RefSpec};
use crate::types::{Frame, RefType, SpatialRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Resolves named and inline spatial references against a [`PartSource`].
pub struct SpatialResolver<'a, S: PartSource> {
    source: &'a S,
    references: HashMap<String, RefSpec>,
    cache: RefCell<HashMap<String, SpatialRef>>,
}

impl<'a, S: PartSource> SpatialResolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            references: HashMap::new(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Register a named entry from the document's `references:` block.
    pub fn define(&mut self, name: impl Into<String>, spec: RefSpec) {
        self.references.insert(name.into(), spec);
    }

    /// Flush the whole resolution cache. Call whenever the registry
    /// mutates a part's geometry or cumulative transform.
    pub fn invalidate_all(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Resolve a named reference: a user-declared entry if one exists by
    /// that exact name, otherwise a dotted `part[.suffix]` auto-reference.
    pub fn resolve_name(&self, name: &str) -> SpatialResult<SpatialRef> {
        if let Some(cached) = self.cache.borrow().get(name) {
            return Ok(*cached);
        }
        let mut stack = Vec::new();
        let result = self.resolve_name_tracked(name, &mut stack)?;
        self.cache
            .borrow_mut()
            .insert(name.to_string(), result);
        Ok(result)
    }

    /// Resolve an arbitrary (possibly inline, unnamed) spec.
    pub fn resolve(&self, spec: &RefSpec) -> SpatialResult<SpatialRef> {
        let mut stack = Vec::new();
        self.resolve_tracked(spec, &mut stack)
    }

    fn resolve_name_tracked(
        &self,
        name: &str,
        stack: &mut Vec<String>,
    ) -> SpatialResult<SpatialRef> {
        if let Some(cached) = self.cache.borrow().get(name) {
            return Ok(*cached);
        }
        if stack.iter().any(|n| n == name) {
            stack.push(name.to_string());
            let path = stack.join(" -> ");
            return Err(SpatialError::new(
                SpatialErrorKind::ReferenceCycle,
                format!("reference cycle detected: {path}"),
            ));
        }

        if let Some(spec) = self.references.get(name) {
            stack.push(name.to_string());
            let resolved = self.resolve_tracked(spec, stack)?;
            stack.pop();
            return Ok(resolved);
        }

        let (part, suffix) = split_dotted(name);
        match suffix {
            Some(suffix) => crate::autoref::resolve_autoref(self.source, part, suffix),
            None => {
                let origin = self.source.part_origin(part)?;
                Ok(SpatialRef::point(origin))
            }
        }
    }

    fn resolve_tracked(&self, spec: &RefSpec, stack: &mut Vec<String>) -> SpatialResult<SpatialRef> {
        match spec {
            RefSpec::Array(point) => Ok(SpatialRef::point(*point)),
            RefSpec::Name(name) => self.resolve_name_tracked(name, stack),
            RefSpec::Inline(inline) => self.resolve_inline(inline, stack),
        }
    }

    fn resolve_inline(
        &self,
        inline: &InlineSpec,
        stack: &mut Vec<String>,
    ) -> SpatialResult<SpatialRef> {
        match inline {
            InlineSpec::Point { value, from, offset } => match (value, from) {
                (Some(point), None) => Ok(SpatialRef::point(*point)),
                (None, Some(from_spec)) => {
                    let base = self.resolve_tracked(from_spec, stack)?;
                    let offset = offset.unwrap_or(tiacad_geom::Vector3::new(0.0, 0.0, 0.0));
                    let position = if base.orientation.is_some() || base.tangent.is_some() {
                        Frame::from_ref(&base).apply_offset(offset)
                    } else {
                        base.position + offset
                    };
                    Ok(SpatialRef::point(position))
                }
                _ => Err(SpatialError::new(
                    SpatialErrorKind::InvalidSpec,
                    "point reference needs exactly one of 'value' or 'from'",
                )),
            },
            InlineSpec::Face { part, selector, at: _ } => {
                let selector = selector.as_deref().unwrap_or("all");
                let (center, normal) = self.source.select_face(part, selector)?;
                SpatialRef::new(center, Some(normal), None, RefType::Face)
            }
            InlineSpec::Edge { part, selector, at } => {
                let selector = selector.as_deref().unwrap_or("all");
                let (point, tangent) = self.source.select_edge(part, selector, *at)?;
                SpatialRef::new(point, None, Some(tangent), RefType::Edge)
            }
            InlineSpec::Axis { from, to } => {
                use truck_modeling::InnerSpace;
                let direction = (*to - *from).normalize();
                SpatialRef::new(*from, Some(direction), None, RefType::Axis)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::PartKind;
    use crate::spec::EdgeAt;
    use tiacad_geom::{BoundingBox, Point3, Vector3};

    struct FakeSource;

    impl PartSource for FakeSource {
        fn part_origin(&self, _name: &str) -> SpatialResult<Point3> {
            Ok(Point3::new(1.0, 2.0, 3.0))
        }
        fn part_bounding_box(&self, _name: &str) -> SpatialResult<BoundingBox> {
            Ok(BoundingBox {
                min: Point3::new(-5.0, -5.0, -5.0),
                max: Point3::new(5.0, 5.0, 5.0),
            })
        }
        fn part_kind(&self, _name: &str) -> SpatialResult<PartKind> {
            Ok(PartKind::Box)
        }
        fn select_face(&self, _part: &str, _selector: &str) -> SpatialResult<(Point3, Vector3)> {
            Ok((Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 1.0)))
        }
        fn select_edge(
            &self,
            _part: &str,
            _selector: &str,
            _at: EdgeAt,
        ) -> SpatialResult<(Point3, Vector3)> {
            Ok((Point3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)))
        }
    }

    #[test]
    fn bare_part_name_resolves_to_origin() {
        let resolver = SpatialResolver::new(&FakeSource);
        let result = resolver.resolve_name("base").unwrap();
        assert_eq!(result.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn dotted_autoref_resolves() {
        let resolver = SpatialResolver::new(&FakeSource);
        let result = resolver.resolve_name("base.face_top").unwrap();
        assert_eq!(result.ref_type, RefType::Face);
    }

    #[test]
    fn detects_cycle_in_declared_references() {
        let mut resolver = SpatialResolver::new(&FakeSource);
        resolver.define(
            "a",
            RefSpec::Inline(InlineSpec::Point {
                value: None,
                from: Some(Box::new(RefSpec::Name("b".into()))),
                offset: Some(Vector3::new(1.0, 0.0, 0.0)),
            }),
        );
        resolver.define(
            "b",
            RefSpec::Inline(InlineSpec::Point {
                value: None,
                from: Some(Box::new(RefSpec::Name("a".into()))),
                offset: Some(Vector3::new(1.0, 0.0, 0.0)),
            }),
        );
        let err = resolver.resolve_name("a").unwrap_err();
        assert_eq!(err.kind, SpatialErrorKind::ReferenceCycle);
    }

    #[test]
    fn point_offset_uses_frame_when_base_has_orientation() {
        let mut resolver = SpatialResolver::new(&FakeSource);
        resolver.define(
            "top",
            RefSpec::Name("base.face_top".into()),
        );
        resolver.define(
            "offset_point",
            RefSpec::Inline(InlineSpec::Point {
                value: None,
                from: Some(Box::new(RefSpec::Name("top".into()))),
                offset: Some(Vector3::new(0.0, 0.0, 2.0)),
            }),
        );
        let result = resolver.resolve_name("offset_point").unwrap();
        // base.face_top is at z=5 with normal +Z; offsetting +2 along local z
        // (== world z here) should land at z=7.
        assert!((result.position.z - 7.0).abs() < 1e-9);
    }

    #[test]
    fn cache_hits_avoid_recomputation() {
        let resolver = SpatialResolver::new(&FakeSource);
        let first = resolver.resolve_name("base").unwrap();
        let second = resolver.resolve_name("base").unwrap();
        assert_eq!(first.position, second.position);
        resolver.invalidate_all();
        let third = resolver.resolve_name("base").unwrap();
        assert_eq!(first.position, third.position);
    }
}
