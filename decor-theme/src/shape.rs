// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Decoration Shapes
//!
//! Outline geometry for decorated components whose sides may be painted in
//! full, as a thin line, or not at all.
//!
//! Shade, background and inner shade outlines are closed rounded rectangles.
//! The border outline is walked top, right, bottom, left and may be open:
//! an unpainted side breaks the path instead of being bridged.

use decor_core::geometry::{BezPath, Insets, Point, Rect};

use crate::sides::{Side, SideMask, Sides};

/// Which layer of a decoration an outline is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    /// Soft shade painted outside the component.
    OuterShade,
    /// Component background fill.
    Background,
    /// Shade painted inside the component.
    InnerShade,
    /// Border stroke.
    Border,
}

/// Numeric inputs of an outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeParams {
    /// Corner rounding, `<= 0` disables rounding.
    pub round: i32,
    /// Outer shade width.
    pub shade_width: i32,
    /// Border stroke width, floored to whole pixels for insets.
    pub border_width: f64,
}

impl ShapeParams {
    /// Create shape parameters.
    pub fn new(round: i32, shade_width: i32, border_width: f64) -> Self {
        Self {
            round,
            shade_width,
            border_width,
        }
    }
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self::new(0, 0, 1.0)
    }
}

/// A computed outline with the insets it leaves for content.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineShape {
    /// Outline path, possibly open for borders.
    pub path: BezPath,
    /// Insets of the decorated component.
    pub insets: Insets,
    /// Whether the path is a single closed loop.
    pub closed: bool,
}

impl OutlineShape {
    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }
}

/// Compute the outline of `shape_type` within `bounds`.
pub fn compute_outline(
    shape_type: ShapeType,
    bounds: Rect,
    mask: &SideMask,
    params: &ShapeParams,
) -> OutlineShape {
    let insets = border_insets(mask, params.shade_width, params.border_width);
    match shape_type {
        ShapeType::Border => {
            let (path, closed) = border_path(bounds, mask, params.round, params.shade_width);
            OutlineShape {
                path,
                insets,
                closed,
            }
        },
        _ => OutlineShape {
            path: fill_path(shape_type, bounds, &mask.sides, params.round, params.shade_width),
            insets,
            closed: true,
        },
    }
}

/// Insets of a decorated component.
///
/// A full side reserves shade and border, a line only the border.
pub fn border_insets(mask: &SideMask, shade_width: i32, border_width: f64) -> Insets {
    let border = border_width.max(0.0).floor();
    let spacing = f64::from(shade_width.max(0)) + border;
    let inset = |side: Side| {
        if mask.paints_side(side) {
            spacing
        } else if mask.paints_line(side) {
            border
        } else {
            0.0
        }
    };
    Insets::new(
        inset(Side::Top),
        inset(Side::Left),
        inset(Side::Bottom),
        inset(Side::Right),
    )
}

/// Whether a layer has anything to paint.
pub fn is_visible(shape_type: ShapeType, mask: &SideMask) -> bool {
    match shape_type {
        ShapeType::OuterShade => mask.is_any_side(),
        ShapeType::Border => mask.is_any_side() || mask.is_any_line(),
        ShapeType::Background | ShapeType::InnerShade => true,
    }
}

fn fill_path(shape_type: ShapeType, bounds: Rect, sides: &Sides, round: i32, shade: i32) -> BezPath {
    let (x, y, w, h) = (bounds.x0, bounds.y0, bounds.width(), bounds.height());
    let sw = f64::from(shade.max(0));
    // Far edges are pulled in by a pixel so strokes do not double up at open sides.
    let shear = if shape_type == ShapeType::Background { 0.0 } else { -1.0 };

    let left = x + if sides.left { sw } else { 0.0 };
    let top = y + if sides.top { sw } else { 0.0 };
    let right = x + (if sides.right { w - sw } else { w }) + shear;
    let bottom = y + (if sides.bottom { h - sw } else { h }) + shear;

    let corners = [
        Point::new(left, top),
        Point::new(right, top),
        Point::new(right, bottom),
        Point::new(left, bottom),
    ];
    let rounded = [
        sides.left && sides.top,
        sides.right && sides.top,
        sides.right && sides.bottom,
        sides.left && sides.bottom,
    ];

    // One extra pixel of rounding matches the anti-aliased stroke coverage.
    let round = if round > 0 { f64::from(round + 1) } else { 0.0 };
    rounded_polygon(round, &corners, &rounded)
}

/// Closed polygon through `corners` with quadratic rounding on the flagged ones.
pub fn rounded_polygon(round: f64, corners: &[Point], rounded: &[bool]) -> BezPath {
    let mut path = BezPath::new();
    let count = corners.len();
    if count == 0 {
        return path;
    }

    let is_rounded = |i: usize| round > 0.0 && rounded.get(i).copied().unwrap_or(false);
    // Point `round` away from corner `i` towards `towards`, never past the edge midpoint.
    let toward = |i: usize, towards: Point| {
        let corner = corners[i];
        let edge = towards - corner;
        let length = edge.hypot();
        if length == 0.0 {
            return corner;
        }
        let offset = round.min(length / 2.0);
        corner + edge * (offset / length)
    };
    let exit = |i: usize| {
        if is_rounded(i) {
            toward(i, corners[(i + 1) % count])
        } else {
            corners[i]
        }
    };

    path.move_to(exit(0));
    for step in 1..=count {
        let i = step % count;
        if is_rounded(i) {
            path.line_to(toward(i, corners[(i + count - 1) % count]));
            path.quad_to(corners[i], exit(i));
        } else if i != 0 {
            path.line_to(corners[i]);
        }
    }
    path.close_path();
    path
}

fn border_path(bounds: Rect, mask: &SideMask, round: i32, shade: i32) -> (BezPath, bool) {
    let (x, y, w, h) = (bounds.x0, bounds.y0, bounds.width(), bounds.height());
    let sw = f64::from(shade.max(0));
    let r = f64::from(round.max(0));

    let top = mask.paints(Side::Top);
    let right = mask.paints(Side::Right);
    let bottom = mask.paints(Side::Bottom);
    let left = mask.paints(Side::Left);

    // Line-only sides have no shade in front of them.
    let offset = |side: Side| if mask.paints_side(side) { sw } else { 0.0 };
    let top_y = y + offset(Side::Top);
    let right_x = x + w - offset(Side::Right) - 1.0;
    let bottom_y = y + h - offset(Side::Bottom) - 1.0;
    let left_x = x + offset(Side::Left);

    // Only joins between two full sides are rounded.
    let corner = |a: Side, b: Side| {
        if mask.paints_side(a) && mask.paints_side(b) {
            r
        } else {
            0.0
        }
    };
    let top_right = corner(Side::Top, Side::Right);
    let bottom_right = corner(Side::Bottom, Side::Right);
    let bottom_left = corner(Side::Bottom, Side::Left);
    let top_left = corner(Side::Top, Side::Left);

    let mut path = BezPath::new();
    let mut connect = false;
    let mut moved = false;
    let mut closed = false;

    if top {
        path.move_to((if left { left_x + top_left } else { x }, top_y));
        if right {
            path.line_to((right_x - top_right, top_y));
            join(&mut path, top_right, (right_x, top_y), (right_x, top_y + top_right));
        } else {
            path.line_to((x + w - 1.0, top_y));
        }
        connect = true;
    }

    if right {
        if !connect {
            path.move_to((right_x, if top { top_y + top_right } else { y }));
            moved = true;
        }
        if bottom {
            path.line_to((right_x, bottom_y - bottom_right));
            join(
                &mut path,
                bottom_right,
                (right_x, bottom_y),
                (right_x - bottom_right, bottom_y),
            );
        } else {
            path.line_to((right_x, y + h - 1.0));
        }
        connect = true;
    } else {
        connect = false;
    }

    if bottom {
        if !connect {
            path.move_to((if right { right_x - bottom_right } else { x + w - 1.0 }, bottom_y));
            moved = true;
        }
        if left {
            path.line_to((left_x + bottom_left, bottom_y));
            join(
                &mut path,
                bottom_left,
                (left_x, bottom_y),
                (left_x, bottom_y - bottom_left),
            );
        } else {
            path.line_to((x, bottom_y));
        }
        connect = true;
    } else {
        connect = false;
    }

    if left {
        if !connect {
            path.move_to((left_x, if bottom { bottom_y - bottom_left } else { y + h - 1.0 }));
            moved = true;
        }
        if top {
            path.line_to((left_x, top_y + top_left));
            join(&mut path, top_left, (left_x, top_y), (left_x + top_left, top_y));
            if !moved {
                path.close_path();
                closed = true;
            }
        } else {
            path.line_to((left_x, y));
        }
    }

    (path, closed)
}

/// Quarter turn around `corner`; the preceding line already ends there when unrounded.
fn join(path: &mut BezPath, radius: f64, corner: (f64, f64), end: (f64, f64)) {
    if radius > 0.0 {
        path.quad_to(corner, end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decor_core::geometry::PathEl;
    use decor_core::vg::kurbo::Shape;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 40.0)
    }

    fn count(path: &BezPath, pred: fn(&PathEl) -> bool) -> usize {
        path.elements().iter().filter(|el| pred(el)).count()
    }

    fn moves(path: &BezPath) -> usize {
        count(path, |el| matches!(el, PathEl::MoveTo(_)))
    }

    fn quads(path: &BezPath) -> usize {
        count(path, |el| matches!(el, PathEl::QuadTo(..)))
    }

    #[test]
    fn test_insets_per_side() {
        let mask = SideMask::parse(Some("1,0,0,0"), Some("0,1,0,0"));
        let insets = border_insets(&mask, 3, 1.7);
        assert_eq!(insets, Insets::new(4.0, 1.0, 0.0, 0.0));
    }

    #[test]
    fn test_insets_zero_without_side_or_line() {
        let token = |bits: u8| {
            (0..4)
                .map(|i| if bits & (1 << i) != 0 { "1" } else { "0" })
                .collect::<Vec<_>>()
                .join(",")
        };
        for side_bits in 0..16u8 {
            for line_bits in 0..16u8 {
                let (sides, lines) = (token(side_bits), token(line_bits));
                let mask = SideMask::parse(Some(&sides), Some(&lines));
                let insets = border_insets(&mask, 2, 1.0);
                for (side, value) in [
                    (Side::Top, insets.top),
                    (Side::Left, insets.left),
                    (Side::Bottom, insets.bottom),
                    (Side::Right, insets.right),
                ] {
                    if !mask.paints(side) {
                        assert_eq!(value, 0.0, "{:?} of {} / {}", side, sides, lines);
                    }
                }
            }
        }
    }

    #[test]
    fn test_full_border_is_closed_rounded_rect() {
        let outline = compute_outline(
            ShapeType::Border,
            bounds(),
            &SideMask::ALL,
            &ShapeParams::new(4, 2, 1.0),
        );
        assert!(outline.closed);
        assert_eq!(moves(&outline.path), 1);
        assert_eq!(quads(&outline.path), 4);
        assert!(matches!(outline.path.elements().last(), Some(PathEl::ClosePath)));
        assert_eq!(outline.insets, Insets::uniform(3.0));

        let first = outline.path.elements()[0];
        assert_eq!(first, PathEl::MoveTo(Point::new(6.0, 2.0)));
    }

    #[test]
    fn test_top_line_border() {
        let mask = SideMask::parse(Some("0,1,1,1"), Some("1,0,0,0"));
        let params = ShapeParams::new(4, 2, 1.0);
        let outline = compute_outline(ShapeType::Border, bounds(), &mask, &params);

        assert_eq!(outline.insets.top, 1.0);
        assert_eq!(outline.insets.left, 3.0);

        // The top line sits on the outer edge and joins its neighbours straight.
        let elements = outline.path.elements();
        assert_eq!(elements[0], PathEl::MoveTo(Point::new(2.0, 0.0)));
        assert_eq!(elements[1], PathEl::LineTo(Point::new(97.0, 0.0)));
        assert!(outline.closed);
        assert_eq!(quads(&outline.path), 2);
    }

    #[test]
    fn test_missing_side_breaks_border() {
        let mask = SideMask::parse(Some("1,1,0,1"), None);
        let outline = compute_outline(
            ShapeType::Border,
            bounds(),
            &mask,
            &ShapeParams::new(3, 0, 1.0),
        );
        assert!(!outline.closed);
        // Top, right and left: the left side starts a new sub-path.
        assert_eq!(moves(&outline.path), 2);
        assert_eq!(quads(&outline.path), 2);
        assert!(!outline
            .path
            .elements()
            .iter()
            .any(|el| matches!(el, PathEl::ClosePath)));
    }

    #[test]
    fn test_missing_top_is_open() {
        let mask = SideMask::parse(Some("0,1,1,1"), None);
        let outline = compute_outline(
            ShapeType::Border,
            bounds(),
            &mask,
            &ShapeParams::new(3, 0, 1.0),
        );
        assert!(!outline.closed);
        assert_eq!(moves(&outline.path), 1);
        assert_eq!(
            outline.path.elements()[0],
            PathEl::MoveTo(Point::new(99.0, 0.0))
        );
    }

    #[test]
    fn test_empty_border() {
        let mask = SideMask::parse(Some("0,0,0,0"), None);
        let outline = compute_outline(ShapeType::Border, bounds(), &mask, &ShapeParams::default());
        assert!(outline.is_empty());
        assert!(!outline.closed);
        assert!(!is_visible(ShapeType::Border, &mask));
        assert!(!is_visible(ShapeType::OuterShade, &mask));
        assert!(is_visible(ShapeType::Background, &mask));
        assert!(is_visible(ShapeType::InnerShade, &mask));
    }

    #[test]
    fn test_border_visible_with_line_only() {
        let mask = SideMask::parse(Some("0,0,0,0"), Some("0,0,1,0"));
        assert!(is_visible(ShapeType::Border, &mask));
        assert!(!is_visible(ShapeType::OuterShade, &mask));
    }

    #[test]
    fn test_zero_round_has_straight_joins() {
        let outline = compute_outline(
            ShapeType::Border,
            bounds(),
            &SideMask::ALL,
            &ShapeParams::new(0, 0, 1.0),
        );
        assert!(outline.closed);
        assert_eq!(quads(&outline.path), 0);

        let background = compute_outline(
            ShapeType::Background,
            bounds(),
            &SideMask::ALL,
            &ShapeParams::new(-2, 0, 1.0),
        );
        assert_eq!(quads(&background.path), 0);
    }

    #[test]
    fn test_background_is_not_sheared() {
        let params = ShapeParams::new(0, 2, 1.0);
        let background = compute_outline(ShapeType::Background, bounds(), &SideMask::ALL, &params);
        let shade = compute_outline(ShapeType::InnerShade, bounds(), &SideMask::ALL, &params);

        assert_eq!(background.path.bounding_box(), Rect::new(2.0, 2.0, 98.0, 38.0));
        assert_eq!(shade.path.bounding_box(), Rect::new(2.0, 2.0, 97.0, 37.0));
    }

    #[test]
    fn test_fill_rounds_only_between_full_sides() {
        let mask = SideMask::parse(Some("1,1,0,1"), None);
        let outline = compute_outline(
            ShapeType::Background,
            bounds(),
            &mask,
            &ShapeParams::new(4, 2, 1.0),
        );
        assert!(outline.closed);
        assert_eq!(quads(&outline.path), 2);
        // The open bottom side reaches the edge of the bounds.
        assert_eq!(outline.path.bounding_box().y1, 40.0);
    }

    #[test]
    fn test_rounded_polygon_starts_after_first_corner() {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let path = rounded_polygon(2.0, &corners, &[true; 4]);
        assert_eq!(path.elements()[0], PathEl::MoveTo(Point::new(2.0, 0.0)));
        assert_eq!(quads(&path), 4);
        assert!(rounded_polygon(2.0, &[], &[]).elements().is_empty());
    }
}
