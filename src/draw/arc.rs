use crate::blend::{BlendMode, Surface};
use crate::color::PixelColor;
use crate::draw::{DrawCtx, GradDir, Painter, RectDsc, draw_rect};
use crate::foundation::core::{Area, Coord, OPA_COVER, OPA_MIN, Opa, Point};
use crate::foundation::math::{TRIG_SHIFT, trig_cos, trig_sin};
use crate::mask::{AngleMask, RadiusMask};

/// Styling of a circular arc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArcDsc<C> {
    /// Stroke color.
    pub color: C,
    /// Ring thickness, measured inward from the radius.
    pub width: Coord,
    /// Stroke opacity.
    pub opa: Opa,
    /// Round caps at both ends.
    pub rounded: bool,
    /// Blend mode.
    pub blend_mode: BlendMode,
}

impl<C: PixelColor> Default for ArcDsc<C> {
    fn default() -> Self {
        Self {
            color: C::black(),
            width: 1,
            opa: OPA_COVER,
            rounded: false,
            blend_mode: BlendMode::Normal,
        }
    }
}

/// Draw the part of the ring around `center` between `start` and `end` degrees
/// (clockwise from +x). Nothing is drawn when the mask registry has no room for the
/// ring's masks.
#[tracing::instrument(level = "trace", skip_all, fields(center = ?center, radius = radius, start = start, end = end))]
#[allow(clippy::too_many_arguments)]
pub fn draw_arc<C: PixelColor>(
    ctx: &mut DrawCtx,
    surf: &mut Surface<'_, C>,
    clip: &Area,
    center: Point,
    radius: Coord,
    start: i32,
    end: i32,
    dsc: &ArcDsc<C>,
) {
    if dsc.opa < OPA_MIN || dsc.width <= 0 || radius <= 0 || start == end {
        return;
    }
    let width = dsc.width.min(radius);
    let outer = Area::new(
        center.x - radius,
        center.y - radius,
        center.x + radius - 1,
        center.y + radius - 1,
    );
    let inner = outer.inflate(-width);

    {
        let Some(mut painter) = Painter::new(&mut *surf, clip, dsc.blend_mode) else {
            return;
        };
        let Some(draw) = outer.intersect(&painter.clip) else {
            return;
        };
        let (masks, scratch) = ctx.parts();
        let mut scope = masks.scope();
        if scope.add(RadiusMask::new(outer, radius, false)).is_none() {
            return;
        }
        if !inner.is_empty()
            && scope
                .add(RadiusMask::new(inner, radius - width, true))
                .is_none()
        {
            return;
        }
        if scope.add(AngleMask::new(center, start, end)).is_none() {
            return;
        }
        for y in draw.y1..=draw.y2 {
            painter.fill_row_masked(&scope, scratch, (draw.x1, draw.x2, y), dsc.color, dsc.opa);
        }
    }

    if dsc.rounded {
        let cap = RectDsc {
            radius: Coord::MAX,
            bg_color: dsc.color,
            bg_grad_color: dsc.color,
            bg_grad_dir: GradDir::None,
            bg_opa: dsc.opa,
            blend_mode: dsc.blend_mode,
            ..RectDsc::default()
        };
        for deg in [start, end] {
            let area = cap_area(center, radius, width, deg);
            draw_rect(ctx, surf, clip, &area, &cap);
        }
    }
}

/// Circle of diameter `width` centered on the ring at `deg`.
fn cap_area(center: Point, radius: Coord, width: Coord, deg: i32) -> Area {
    let half = width / 2;
    let mid = i64::from(radius - half);
    let x = ((mid * i64::from(trig_cos(deg))) >> TRIG_SHIFT) as Coord;
    let y = ((mid * i64::from(trig_sin(deg))) >> TRIG_SHIFT) as Coord;
    let r_corr = if width & 1 == 1 { 0 } else { 1 };
    Area::new(
        center.x + x - half,
        center.y + y - half,
        center.x + x + half - r_corr,
        center.y + y + half - r_corr,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/draw/arc.rs"]
mod tests;
