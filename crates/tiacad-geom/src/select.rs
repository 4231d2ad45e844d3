//! Face and edge selector grammar.
//!
//! A selector is a short keyword naming a direction (`+x`, `-y`, `+z`, ...)
//! or an axis-aligned side alias (`top`, `bottom`, `left`, `right`, `front`,
//! `back`), or `all`. Faces are matched by comparing their normal against
//! the requested direction within [`SELECTOR_ANGLE_TOLERANCE`]; edges are
//! matched by comparing their tangent against the requested axis.

use truck_modeling::InnerSpace;

use crate::error::{GeomError, GeomErrorKind, GeomResult};
use crate::query;
use crate::types::{TruckEdge, TruckFace, TruckSolid, Vector3};

/// Cosine-similarity threshold used when matching a face normal or edge
/// tangent against a requested direction (about 15 degrees of slack).
pub const SELECTOR_ANGLE_TOLERANCE: f64 = 0.96;

/// A parsed face or edge selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selector {
    All,
    Direction(Vector3),
}

/// Parse a selector string into its direction (or `All`).
///
/// Recognizes `all`, `+x`/`-x`/`+y`/`-y`/`+z`/`-z`, and the aliases `top`
/// (`+z`), `bottom` (`-z`), `right` (`+x`), `left` (`-x`), `front` (`-y`),
/// `back` (`+y`).
pub fn parse_selector(raw: &str) -> GeomResult<Selector> {
    let s = raw.trim().to_ascii_lowercase();
    let dir = match s.as_str() {
        "all" => return Ok(Selector::All),
        "+x" | "right" => Vector3::new(1.0, 0.0, 0.0),
        "-x" | "left" => Vector3::new(-1.0, 0.0, 0.0),
        "+y" | "back" => Vector3::new(0.0, 1.0, 0.0),
        "-y" | "front" => Vector3::new(0.0, -1.0, 0.0),
        "+z" | "top" => Vector3::new(0.0, 0.0, 1.0),
        "-z" | "bottom" => Vector3::new(0.0, 0.0, -1.0),
        _ => {
            return Err(GeomError::new(
                GeomErrorKind::SelectionFailed,
                format!("unrecognized selector '{raw}'"),
            ))
        }
    };
    Ok(Selector::Direction(dir))
}

/// Select faces of `solid` matching `selector`.
pub fn select_faces<'a>(solid: &'a TruckSolid, selector: &str) -> GeomResult<Vec<&'a TruckFace>> {
    let sel = parse_selector(selector)?;
    let faces: Vec<&TruckFace> = solid
        .boundaries()
        .iter()
        .flat_map(|shell| shell.face_iter())
        .collect();
    let matched: Vec<&TruckFace> = match sel {
        Selector::All => faces,
        Selector::Direction(dir) => faces
            .into_iter()
            .filter(|f| {
                query::face_normal(f)
                    .map(|n| n.dot(dir) >= SELECTOR_ANGLE_TOLERANCE)
                    .unwrap_or(false)
            })
            .collect(),
    };
    if matched.is_empty() {
        return Err(GeomError::new(
            GeomErrorKind::SelectionFailed,
            format!("selector '{selector}' matched no faces"),
        ));
    }
    Ok(matched)
}

/// Select edges of `solid` matching `selector`.
///
/// For edges, `Direction` matches the edge's tangent rather than a face
/// normal — e.g. `+z` selects vertical edges.
pub fn select_edges(solid: &TruckSolid, selector: &str) -> GeomResult<Vec<TruckEdge>> {
    let sel = parse_selector(selector)?;
    let all_edges: Vec<TruckEdge> = solid
        .boundaries()
        .iter()
        .flat_map(|shell| shell.face_iter())
        .flat_map(|f| f.boundaries())
        .flat_map(|w| w.edge_iter().cloned().collect::<Vec<_>>())
        .collect();
    let matched: Vec<TruckEdge> = match sel {
        Selector::All => all_edges,
        Selector::Direction(dir) => all_edges
            .into_iter()
            .filter(|e| {
                query::edge_tangent_at(e, 0.0)
                    .map(|t| t.dot(dir).abs() >= SELECTOR_ANGLE_TOLERANCE)
                    .unwrap_or(false)
            })
            .collect(),
    };
    if matched.is_empty() {
        return Err(GeomError::new(
            GeomErrorKind::SelectionFailed,
            format!("selector '{selector}' matched no edges"),
        ));
    }
    Ok(matched)
}
