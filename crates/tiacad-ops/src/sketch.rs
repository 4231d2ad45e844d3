//! Sketch profile builders: 2D shapes bound to a plane, consumed by
//! `extrude`/`revolve`/`sweep`/`loft`.

use tiacad_geom::{GeometryBackend, Point3, Solid, Vector3, Wire};

use crate::error::{OpError, OpErrorKind, OpResult};
use crate::fonts::{FontRegistry, FontStyle};

/// The plane a sketch's 2D coordinates are laid out on, as an origin plus
/// an orthonormal in-plane basis.
#[derive(Debug, Clone, Copy)]
pub struct SketchPlane {
    pub origin: Point3,
    pub u: Vector3,
    pub v: Vector3,
}

impl SketchPlane {
    pub fn xy() -> Self {
        Self::custom(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0))
    }

    pub fn xz() -> Self {
        Self::custom(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0))
    }

    pub fn yz() -> Self {
        Self::custom(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0), Vector3::new(0.0, 0.0, 1.0))
    }

    /// Build an arbitrary plane from an origin and a `(u, v)` basis, e.g.
    /// derived from a resolved face reference's frame.
    pub fn custom(origin: Point3, u: Vector3, v: Vector3) -> Self {
        Self { origin, u, v }
    }

    fn point(&self, x: f64, y: f64) -> Point3 {
        self.origin + self.u * x + self.v * y
    }
}

/// Text alignment relative to its own layout box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Baseline,
    Middle,
    Top,
}

/// A 2D sketch shape, in the coordinates of its [`SketchPlane`].
#[derive(Debug, Clone)]
pub enum ProfileShape {
    Line { from: (f64, f64), to: (f64, f64) },
    Rectangle { width: f64, height: f64, center: (f64, f64) },
    Circle { radius: f64, center: (f64, f64), segments: usize },
    Polygon { points: Vec<(f64, f64)> },
    Arc { radius: f64, center: (f64, f64), start_angle_deg: f64, end_angle_deg: f64, segments: usize },
    Text {
        text: String,
        size: f64,
        font_family: String,
        style: FontStyle,
        halign: HAlign,
        valign: VAlign,
    },
}

/// Build the wire(s) for `shape` laid out on `plane`. Most shapes produce
/// exactly one closed wire; `Text` produces one wire per glyph (glyphs are
/// not unioned into a single profile since each may need its own face).
pub fn build_wires<B: GeometryBackend>(
    backend: &B,
    plane: &SketchPlane,
    shape: &ProfileShape,
    fonts: Option<&FontRegistry>,
) -> OpResult<Vec<Wire>> {
    match shape {
        ProfileShape::Line { .. } => Err(OpError::new(
            OpErrorKind::InvalidSpec,
            "a bare line is not a closed profile; use it inside a polygon",
        )),
        ProfileShape::Rectangle { width, height, center } => {
            let (cx, cy) = *center;
            let (hw, hh) = (width / 2.0, height / 2.0);
            let points = [
                plane.point(cx - hw, cy - hh),
                plane.point(cx + hw, cy - hh),
                plane.point(cx + hw, cy + hh),
                plane.point(cx - hw, cy + hh),
            ];
            Ok(vec![tiacad_geom::sketch::polygon_wire(&points)?])
        }
        ProfileShape::Circle { radius, center, segments } => {
            Ok(vec![arc_wire(plane, *center, *radius, 0.0, 360.0, *segments)?])
        }
        ProfileShape::Polygon { points } => {
            if points.len() < 3 {
                return Err(OpError::new(OpErrorKind::InvalidSpec, "a polygon needs at least 3 points"));
            }
            let world_points: Vec<Point3> = points.iter().map(|(x, y)| plane.point(*x, *y)).collect();
            Ok(vec![tiacad_geom::sketch::polygon_wire(&world_points)?])
        }
        ProfileShape::Arc { radius, center, start_angle_deg, end_angle_deg, segments } => {
            Ok(vec![arc_wire(plane, *center, *radius, *start_angle_deg, *end_angle_deg, *segments)?])
        }
        ProfileShape::Text { text, size, font_family, style, halign, valign } => {
            let fonts = fonts.ok_or_else(|| {
                OpError::new(OpErrorKind::InvalidSpec, "text sketch shape requires a font registry")
            })?;
            build_text_wires(backend, plane, text, *size, font_family, *style, *halign, *valign, fonts)
        }
    }
}

/// A closed arc/circle wire: `start_angle_deg == 0.0 && end_angle_deg ==
/// 360.0` yields a full circle; otherwise the wire is closed with a
/// straight chord back to the start, matching a sketch "pie slice" arc.
fn arc_wire(
    plane: &SketchPlane,
    center: (f64, f64),
    radius: f64,
    start_angle_deg: f64,
    end_angle_deg: f64,
    segments: usize,
) -> OpResult<Wire> {
    if radius <= 0.0 {
        return Err(OpError::new(OpErrorKind::InvalidSpec, "arc/circle radius must be positive"));
    }
    if segments < 3 {
        return Err(OpError::new(OpErrorKind::InvalidSpec, "arc/circle needs at least 3 segments"));
    }
    let (cx, cy) = center;
    let start = start_angle_deg.to_radians();
    let end = end_angle_deg.to_radians();
    let full_circle = (end_angle_deg - start_angle_deg - 360.0).abs() < 1e-9;

    let mut points = Vec::with_capacity(segments + 1);
    let sample_count = if full_circle { segments } else { segments + 1 };
    for i in 0..sample_count {
        let t = start + (end - start) * (i as f64 / segments as f64);
        points.push(plane.point(cx + radius * t.cos(), cy + radius * t.sin()));
    }
    if !full_circle {
        points.push(plane.point(cx, cy));
    }
    Ok(tiacad_geom::sketch::polygon_wire(&points)?)
}

#[allow(clippy::too_many_arguments)]
fn build_text_wires<B: GeometryBackend>(
    _backend: &B,
    plane: &SketchPlane,
    text: &str,
    size: f64,
    font_family: &str,
    style: FontStyle,
    halign: HAlign,
    valign: VAlign,
    fonts: &FontRegistry,
) -> OpResult<Vec<Wire>> {
    use ab_glyph::{Font, FontArc, Glyph, PxScale, ScaleFont};

    let resolution = fonts.resolve_font(font_family, style)?;
    if resolution.used_fallback() {
        log::warn!("font '{font_family}' ({style}) not found; falling back to the default sans font");
    }
    let handle = resolution.handle();
    let font: &FontArc = &handle.font;
    let scale = PxScale::from(size as f32);
    let scaled = font.as_scaled(scale);

    // Pass 1: lay out glyphs in local (unshifted) 2D space, collecting one
    // contour's points per glyph plus the total advance width.
    let mut pen_x: f32 = 0.0;
    let mut glyph_contours: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut previous: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        if let Some(prev) = previous {
            pen_x += scaled.kern(prev, glyph_id);
        }
        let glyph: Glyph = glyph_id.with_scale_and_position(scale, ab_glyph::point(pen_x, 0.0));
        if let Some(outline) = font.outline_glyph(glyph) {
            let contour = largest_contour(&outline.outline().curves);
            if contour.len() >= 3 {
                glyph_contours.push(contour.iter().map(|p| (p.x as f64, -p.y as f64)).collect());
            }
        }
        pen_x += scaled.h_advance(glyph_id);
        previous = Some(glyph_id);
    }

    if glyph_contours.is_empty() {
        return Err(OpError::new(OpErrorKind::InvalidSpec, "text sketch produced no renderable glyphs"));
    }

    // Pass 2: shift every contour by the alignment offset, then map into
    // the sketch plane's world coordinates.
    let total_width = pen_x as f64;
    let (x_shift, y_shift) = alignment_shift(halign, valign, total_width, size);
    let mut glyph_wires = Vec::with_capacity(glyph_contours.len());
    for contour in &glyph_contours {
        let points: Vec<Point3> =
            contour.iter().map(|(x, y)| plane.point(x + x_shift, y + y_shift)).collect();
        glyph_wires.push(tiacad_geom::sketch::polygon_wire(&points)?);
    }
    Ok(glyph_wires)
}

fn alignment_shift(halign: HAlign, valign: VAlign, total_width: f64, size: f64) -> (f64, f64) {
    let x_shift = match halign {
        HAlign::Left => 0.0,
        HAlign::Center => -total_width / 2.0,
        HAlign::Right => -total_width,
    };
    let y_shift = match valign {
        VAlign::Baseline => 0.0,
        VAlign::Middle => size / 4.0,
        VAlign::Top => size / 2.0,
    };
    (x_shift, y_shift)
}

/// ab_glyph's outline curves run as a flat sequence of contours; pick the
/// contour with the largest sampled point count as the glyph's silhouette.
/// Interior contours (the hole in an "O" or "A") are dropped: the geometry
/// backend has no face-with-holes primitive to consume them.
fn largest_contour(curves: &[ab_glyph::OutlineCurve]) -> Vec<ab_glyph::Point> {
    use ab_glyph::OutlineCurve;

    let mut contours: Vec<Vec<ab_glyph::Point>> = Vec::new();
    let mut current: Vec<ab_glyph::Point> = Vec::new();

    for curve in curves {
        let (start, points) = tessellate_curve(curve);
        if let Some(last) = current.last() {
            if (last.x - start.x).abs() > 1e-3 || (last.y - start.y).abs() > 1e-3 {
                if current.len() >= 3 {
                    contours.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
        if current.is_empty() {
            current.push(start);
        }
        current.extend(points);
    }
    if current.len() >= 3 {
        contours.push(current);
    }

    contours.into_iter().max_by_key(|c| c.len()).unwrap_or_default()
}

/// Flatten one outline curve into line segments; returns the curve's start
/// point plus the sampled interior/end points.
fn tessellate_curve(curve: &ab_glyph::OutlineCurve) -> (ab_glyph::Point, Vec<ab_glyph::Point>) {
    use ab_glyph::OutlineCurve;
    const STEPS: usize = 8;

    match *curve {
        OutlineCurve::Line(p0, p1) => (p0, vec![p1]),
        OutlineCurve::Quad(p0, ctrl, p1) => {
            let mut points = Vec::with_capacity(STEPS);
            for i in 1..=STEPS {
                let t = i as f32 / STEPS as f32;
                let mt = 1.0 - t;
                let x = mt * mt * p0.x + 2.0 * mt * t * ctrl.x + t * t * p1.x;
                let y = mt * mt * p0.y + 2.0 * mt * t * ctrl.y + t * t * p1.y;
                points.push(ab_glyph::point(x, y));
            }
            (p0, points)
        }
        OutlineCurve::Cubic(p0, c0, c1, p1) => {
            let mut points = Vec::with_capacity(STEPS);
            for i in 1..=STEPS {
                let t = i as f32 / STEPS as f32;
                let mt = 1.0 - t;
                let x = mt * mt * mt * p0.x
                    + 3.0 * mt * mt * t * c0.x
                    + 3.0 * mt * t * t * c1.x
                    + t * t * t * p1.x;
                let y = mt * mt * mt * p0.y
                    + 3.0 * mt * mt * t * c0.y
                    + 3.0 * mt * t * t * c1.y
                    + t * t * t * p1.y;
                points.push(ab_glyph::point(x, y));
            }
            (p0, points)
        }
    }
}

/// Extrude each wire of `shapes` by `direction` and union the results into
/// one solid — the common path for sketch-to-solid operations whose source
/// may have produced more than one wire (text).
pub fn extrude_wires<B: GeometryBackend>(
    backend: &B,
    wires: &[Wire],
    direction: Vector3,
) -> OpResult<Solid> {
    let mut solids = Vec::with_capacity(wires.len());
    for wire in wires {
        let face = backend.planar_face(wire)?;
        solids.push(backend.extrude(&face, direction)?);
    }
    Ok(backend.union_many(&solids)?)
}
