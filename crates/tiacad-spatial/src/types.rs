//! `SpatialRef` and `Frame`: world-coordinate references and the local
//! coordinate systems derived from them.

use tiacad_geom::{Point3, Vector3};

use crate::error::{SpatialError, SpatialErrorKind, SpatialResult};

/// What kind of thing a [`SpatialRef`] was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefType {
    Point,
    Face,
    Edge,
    Axis,
}

/// A spatial reference resolved to world coordinates.
///
/// Invariants (checked by [`SpatialRef::new`]): a `Face` or `Axis` ref
/// always carries a unit-length `orientation`; an `Edge` ref always carries
/// a unit-length `tangent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialRef {
    pub position: Point3,
    pub orientation: Option<Vector3>,
    pub tangent: Option<Vector3>,
    pub ref_type: RefType,
}

impl SpatialRef {
    pub fn new(
        position: Point3,
        orientation: Option<Vector3>,
        tangent: Option<Vector3>,
        ref_type: RefType,
    ) -> SpatialResult<Self> {
        use truck_modeling::InnerSpace;

        match ref_type {
            RefType::Face | RefType::Axis => {
                let normal = orientation.ok_or_else(|| {
                    SpatialError::new(
                        SpatialErrorKind::InvalidSpec,
                        "face/axis reference requires an orientation",
                    )
                })?;
                if (normal.magnitude() - 1.0).abs() > 1e-6 {
                    return Err(SpatialError::new(
                        SpatialErrorKind::InvalidSpec,
                        "orientation must be unit-length",
                    ));
                }
            }
            RefType::Edge => {
                let tan = tangent.ok_or_else(|| {
                    SpatialError::new(
                        SpatialErrorKind::InvalidSpec,
                        "edge reference requires a tangent",
                    )
                })?;
                if (tan.magnitude() - 1.0).abs() > 1e-6 {
                    return Err(SpatialError::new(
                        SpatialErrorKind::InvalidSpec,
                        "tangent must be unit-length",
                    ));
                }
            }
            RefType::Point => {}
        }

        Ok(Self {
            position,
            orientation,
            tangent,
            ref_type,
        })
    }

    pub fn point(position: Point3) -> Self {
        Self {
            position,
            orientation: None,
            tangent: None,
            ref_type: RefType::Point,
        }
    }
}

/// A right-handed orthonormal local coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub origin: Point3,
    pub x: Vector3,
    pub y: Vector3,
    pub z: Vector3,
}

impl Frame {
    /// Build the deterministic local frame attached to a [`SpatialRef`].
    ///
    /// If the reference carries an orientation, it becomes `z`; if it
    /// carries a tangent, that becomes `x`. Missing axes are completed by
    /// picking an arbitrary perpendicular: `z × world_z` unless `z` is
    /// nearly parallel to `world_z`, in which case `z × world_x`.
    pub fn from_ref(spatial: &SpatialRef) -> Self {
        use truck_modeling::InnerSpace;

        let world_z = Vector3::new(0.0, 0.0, 1.0);
        let world_x = Vector3::new(1.0, 0.0, 0.0);

        let z = spatial
            .orientation
            .or(spatial.tangent)
            .unwrap_or(world_z)
            .normalize();

        let x = if let Some(tangent) = spatial.tangent.filter(|_| spatial.orientation.is_some()) {
            let t = tangent.normalize();
            (t - z * z.dot(t)).normalize()
        } else if spatial.tangent.is_some() && spatial.orientation.is_none() {
            // tangent became z above; complete with a perpendicular.
            perpendicular(z, world_z, world_x)
        } else {
            perpendicular(z, world_z, world_x)
        };

        let y = z.cross(x);

        Self {
            origin: spatial.position,
            x,
            y,
            z,
        }
    }

    /// Interpret a local offset `(dx, dy, dz)` in this frame, returning a
    /// world-space point.
    pub fn apply_offset(&self, offset: Vector3) -> Point3 {
        self.origin + self.x * offset.x + self.y * offset.y + self.z * offset.z
    }
}

fn perpendicular(z: Vector3, world_z: Vector3, world_x: Vector3) -> Vector3 {
    use truck_modeling::InnerSpace;

    if z.dot(world_z).abs() < 0.9 {
        z.cross(world_z).normalize()
    } else {
        z.cross(world_x).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_ref_requires_unit_orientation() {
        let err = SpatialRef::new(
            Point3::new(0.0, 0.0, 0.0),
            Some(Vector3::new(2.0, 0.0, 0.0)),
            None,
            RefType::Face,
        )
        .unwrap_err();
        assert_eq!(err.kind, SpatialErrorKind::InvalidSpec);
    }

    #[test]
    fn frame_from_face_is_orthonormal() {
        let spatial = SpatialRef::new(
            Point3::new(1.0, 2.0, 3.0),
            Some(Vector3::new(0.0, 0.0, 1.0)),
            None,
            RefType::Face,
        )
        .unwrap();
        let frame = Frame::from_ref(&spatial);
        assert_orthonormal(&frame);
    }

    #[test]
    fn frame_from_tilted_face_is_orthonormal() {
        use truck_modeling::InnerSpace;
        let normal = Vector3::new(1.0, 1.0, 1.0).normalize();
        let spatial = SpatialRef::new(Point3::new(0.0, 0.0, 0.0), Some(normal), None, RefType::Face)
            .unwrap();
        let frame = Frame::from_ref(&spatial);
        assert_orthonormal(&frame);
    }

    #[test]
    fn frame_from_plain_point_defaults_to_world_axes() {
        let spatial = SpatialRef::point(Point3::new(0.0, 0.0, 0.0));
        let frame = Frame::from_ref(&spatial);
        assert_orthonormal(&frame);
        assert!((frame.z - Vector3::new(0.0, 0.0, 1.0)).magnitude() < 1e-9);
    }

    fn assert_orthonormal(frame: &Frame) {
        use truck_modeling::InnerSpace;
        assert!((frame.x.magnitude() - 1.0).abs() < 1e-9);
        assert!((frame.y.magnitude() - 1.0).abs() < 1e-9);
        assert!((frame.z.magnitude() - 1.0).abs() < 1e-9);
        assert!(frame.x.dot(frame.y).abs() < 1e-9);
        assert!(frame.y.dot(frame.z).abs() < 1e-9);
        assert!(frame.z.dot(frame.x).abs() < 1e-9);
        let det = frame.x.cross(frame.y).dot(frame.z);
        assert!((det - 1.0).abs() < 1e-6);
    }
}
