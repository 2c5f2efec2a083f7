use crate::blend::{BlendMode, Surface};
use crate::color::PixelColor;
use crate::draw::{DrawCtx, GradDir, Painter, RectDsc, draw_rect};
use crate::foundation::core::{Area, Coord, OPA_COVER, OPA_MIN, Opa, Point};
use crate::mask::{LineMask, LineSide};

/// `128 / cos(θ)` bucketed by `minor * 32 / major`; widens skewed strokes so they look
/// as thick as straight ones.
const WIDTH_CORR: [i32; 33] = [
    128, 128, 128, 129, 129, 130, 130, 131, 132, 133, 134, 135, 137, 138, 140, 141, 143, 145,
    147, 149, 151, 153, 155, 158, 160, 162, 165, 167, 170, 173, 175, 178, 181,
];

/// Styling of a straight line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineDsc<C> {
    /// Stroke color.
    pub color: C,
    /// Stroke width in pixels.
    pub width: Coord,
    /// Stroke opacity.
    pub opa: Opa,
    /// Blend mode.
    pub blend_mode: BlendMode,
    /// Round cap at the first point.
    pub round_start: bool,
    /// Round cap at the second point.
    pub round_end: bool,
}

impl<C: PixelColor> Default for LineDsc<C> {
    fn default() -> Self {
        Self {
            color: C::black(),
            width: 1,
            opa: OPA_COVER,
            blend_mode: BlendMode::Normal,
            round_start: false,
            round_end: false,
        }
    }
}

/// Draw a line from `p1` to `p2`.
///
/// Straight lines become one rectangular fill; the end point is exclusive along the
/// line's direction. Skewed lines are cut from their bounding box by four line masks.
#[tracing::instrument(level = "trace", skip_all, fields(p1 = ?p1, p2 = ?p2, width = dsc.width))]
pub fn draw_line<C: PixelColor>(
    ctx: &mut DrawCtx,
    surf: &mut Surface<'_, C>,
    clip: &Area,
    p1: Point,
    p2: Point,
    dsc: &LineDsc<C>,
) {
    if dsc.width <= 0 || dsc.opa < OPA_MIN || p1 == p2 {
        return;
    }
    if p1.y == p2.y || p1.x == p2.x {
        draw_straight(ctx, surf, clip, p1, p2, dsc);
    } else {
        draw_skew(ctx, surf, clip, p1, p2, dsc);
    }

    if dsc.round_start || dsc.round_end {
        let cap = RectDsc {
            radius: Coord::MAX,
            bg_color: dsc.color,
            bg_grad_color: dsc.color,
            bg_grad_dir: GradDir::None,
            bg_opa: dsc.opa,
            blend_mode: dsc.blend_mode,
            ..RectDsc::default()
        };
        let r = dsc.width >> 1;
        // even widths have no center pixel
        let r_corr = if dsc.width & 1 == 1 { 0 } else { 1 };
        let cap_area = |p: Point| Area::new(p.x - r, p.y - r, p.x + r - r_corr, p.y + r - r_corr);
        if dsc.round_start {
            draw_rect(ctx, surf, clip, &cap_area(p1), &cap);
        }
        if dsc.round_end {
            draw_rect(ctx, surf, clip, &cap_area(p2), &cap);
        }
    }
}

fn draw_straight<C: PixelColor>(
    ctx: &mut DrawCtx,
    surf: &mut Surface<'_, C>,
    clip: &Area,
    p1: Point,
    p2: Point,
    dsc: &LineDsc<C>,
) {
    let w = dsc.width - 1;
    let w_half0 = w >> 1;
    let w_half1 = w_half0 + (w & 1);

    let area = if p1.y == p2.y {
        Area::new(
            p1.x.min(p2.x),
            p1.y - w_half1,
            p1.x.max(p2.x) - 1,
            p1.y + w_half0,
        )
    } else {
        Area::new(
            p1.x - w_half1,
            p1.y.min(p2.y),
            p1.x + w_half0,
            p1.y.max(p2.y) - 1,
        )
    };

    let Some(mut painter) = Painter::new(surf, clip, dsc.blend_mode) else {
        return;
    };
    let Some(draw) = area.intersect(&painter.clip) else {
        return;
    };
    let (masks, scratch) = ctx.parts();
    if masks.is_empty() {
        painter.fill(&draw, dsc.color, dsc.opa);
        return;
    }
    for y in draw.y1..=draw.y2 {
        painter.fill_row_masked(masks, scratch, (draw.x1, draw.x2, y), dsc.color, dsc.opa);
    }
}

fn draw_skew<C: PixelColor>(
    ctx: &mut DrawCtx,
    surf: &mut Surface<'_, C>,
    clip: &Area,
    p1: Point,
    p2: Point,
    dsc: &LineDsc<C>,
) {
    let (p1, p2) = if p1.y < p2.y { (p1, p2) } else { (p2, p1) };
    let xdiff = p2.x - p1.x;
    let ydiff = p2.y - p1.y;
    let flat = xdiff.abs() > ydiff.abs();

    let corr = if flat {
        (ydiff.abs() << 5) / xdiff.abs()
    } else {
        (xdiff.abs() << 5) / ydiff.abs()
    };
    // edges are continuous lines on pixel boundaries, `w` apart
    let w = ((dsc.width * WIDTH_CORR[corr as usize] + 63) >> 7).max(1);
    let w_half0 = w >> 1;
    let w_half1 = w - w_half0;

    let bbox = Area::new(
        p1.x.min(p2.x) - w,
        p1.y - w,
        p1.x.max(p2.x) + w,
        p2.y + w,
    );
    let Some(mut painter) = Painter::new(surf, clip, dsc.blend_mode) else {
        return;
    };
    let Some(draw) = bbox.intersect(&painter.clip) else {
        return;
    };

    let shifted = |dx: Coord, dy: Coord| {
        (
            Point::new(p1.x + dx, p1.y + dy),
            Point::new(p2.x + dx, p2.y + dy),
        )
    };
    let (edge_a, edge_b) = if flat {
        let (a1, a2) = shifted(0, -w_half0);
        let (b1, b2) = shifted(0, w_half1);
        (
            LineMask::from_points(a1, a2, LineSide::Bottom),
            LineMask::from_points(b1, b2, LineSide::Top),
        )
    } else {
        let (a1, a2) = shifted(-w_half0, 0);
        let (b1, b2) = shifted(w_half1, 0);
        (
            LineMask::from_points(a1, a2, LineSide::Right),
            LineMask::from_points(b1, b2, LineSide::Left),
        )
    };
    // caps are perpendicular to the line through each end point
    let normal = |p: Point| Point::new(p.x - ydiff, p.y + xdiff);
    let cap_start = LineMask::from_points(p1, normal(p1), LineSide::Bottom);
    let cap_end = LineMask::from_points(p2, normal(p2), LineSide::Top);

    let (masks, scratch) = ctx.parts();
    let mut scope = masks.scope();
    for m in [edge_a, edge_b, cap_start, cap_end] {
        if scope.add(m).is_none() {
            return;
        }
    }
    for y in draw.y1..=draw.y2 {
        painter.fill_row_masked(&scope, scratch, (draw.x1, draw.x2, y), dsc.color, dsc.opa);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/line.rs"]
mod tests;
