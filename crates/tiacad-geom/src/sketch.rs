//! Wire construction from raw point profiles, for sketch builders that sit
//! above this crate (`tiacad-ops`'s line/rectangle/polygon/gusset sketches)
//! and need a wire without reaching into truck themselves.

use truck_modeling::{builder, Point3};

use crate::error::{GeomError, GeomErrorKind, GeomResult};
use crate::types::Wire;

/// Build a closed wire of straight edges through `points`, in order, with a
/// final edge back from the last point to the first.
pub fn polygon_wire(points: &[Point3]) -> GeomResult<Wire> {
    if points.len() < 3 {
        return Err(GeomError::new(
            GeomErrorKind::InvalidInput,
            "a polygon wire needs at least 3 points",
        ));
    }
    let vertices: Vec<_> = points.iter().map(|p| builder::vertex(*p)).collect();
    let mut edges = Vec::with_capacity(vertices.len());
    for i in 0..vertices.len() {
        let next = (i + 1) % vertices.len();
        edges.push(builder::line(&vertices[i], &vertices[next]));
    }
    Ok(Wire::from_truck(truck_modeling::Wire::from(edges)))
}
