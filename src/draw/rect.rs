use serde::{Deserialize, Serialize};

use crate::blend::{BlendMode, Surface};
use crate::color::{PixelColor, mix};
use crate::draw::{DrawCtx, Painter, ShadowDsc, draw_shadow};
use crate::foundation::core::{Area, Coord, OPA_COVER, OPA_MIN, Opa};
use crate::mask::{MaskContext, RadiusMask};

/// Direction of a two-color background gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradDir {
    /// Plain `bg_color`.
    #[default]
    None,
    /// `bg_color` at the top row, `bg_grad_color` at the bottom row.
    Vertical,
    /// `bg_color` at the left column, `bg_grad_color` at the right column.
    Horizontal,
}

/// Styling of one rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectDsc<C> {
    /// Corner radius, clamped to half the shorter side.
    pub radius: Coord,
    /// Background color (gradient start).
    pub bg_color: C,
    /// Gradient end color.
    pub bg_grad_color: C,
    /// Gradient direction.
    pub bg_grad_dir: GradDir,
    /// Background opacity.
    pub bg_opa: Opa,
    /// Border thickness inward from the edge; `0` disables the border.
    pub border_width: Coord,
    /// Border color.
    pub border_color: C,
    /// Border opacity.
    pub border_opa: Opa,
    /// Optional drop shadow drawn below everything else.
    pub shadow: Option<ShadowDsc<C>>,
    /// Blend mode of background and border.
    pub blend_mode: BlendMode,
}

impl<C: PixelColor> Default for RectDsc<C> {
    fn default() -> Self {
        Self {
            radius: 0,
            bg_color: C::white(),
            bg_grad_color: C::white(),
            bg_grad_dir: GradDir::None,
            bg_opa: OPA_COVER,
            border_width: 0,
            border_color: C::black(),
            border_opa: OPA_COVER,
            shadow: None,
            blend_mode: BlendMode::Normal,
        }
    }
}

/// Color at `pos` of a `len` long gradient from `main` to `grad`.
fn grad_at<C: PixelColor>(main: C, grad: C, pos: Coord, len: Coord) -> C {
    if len <= 1 {
        return main;
    }
    let m = (pos.clamp(0, len - 1) * 255 / (len - 1)) as Opa;
    mix(grad, main, m)
}

/// Draw a rectangle: shadow, then background, then border. A rounded part is skipped when
/// the mask registry has no room for its radius mask.
#[tracing::instrument(level = "trace", skip_all, fields(coords = ?coords, radius = dsc.radius))]
pub fn draw_rect<C: PixelColor>(
    ctx: &mut DrawCtx,
    surf: &mut Surface<'_, C>,
    clip: &Area,
    coords: &Area,
    dsc: &RectDsc<C>,
) {
    if coords.is_empty() {
        return;
    }
    let r = dsc.radius.clamp(0, coords.short_side() / 2);
    if let Some(shadow) = &dsc.shadow {
        draw_shadow(ctx, surf, clip, coords, r, shadow);
    }
    draw_bg(ctx, surf, clip, coords, r, dsc);
    draw_border(ctx, surf, clip, coords, r, dsc);
}

fn draw_bg<C: PixelColor>(
    ctx: &mut DrawCtx,
    surf: &mut Surface<'_, C>,
    clip: &Area,
    coords: &Area,
    r: Coord,
    dsc: &RectDsc<C>,
) {
    if dsc.bg_opa < OPA_MIN {
        return;
    }
    let Some(mut painter) = Painter::new(surf, clip, dsc.blend_mode) else {
        return;
    };
    let Some(draw) = coords.intersect(&painter.clip) else {
        return;
    };
    let (masks, scratch) = ctx.parts();
    let external = !masks.is_empty();
    let dir = if dsc.bg_grad_color == dsc.bg_color {
        GradDir::None
    } else {
        dsc.bg_grad_dir
    };

    if !external && r == 0 && dir == GradDir::None {
        painter.fill(coords, dsc.bg_color, dsc.bg_opa);
        return;
    }

    let mut scope = masks.scope();
    if r > 0 && scope.add(RadiusMask::new(*coords, r, false)).is_none() {
        return;
    }

    if dir == GradDir::Horizontal {
        let row: Vec<C> = (0..coords.width())
            .map(|i| grad_at(dsc.bg_color, dsc.bg_grad_color, i, coords.width()))
            .collect();
        for y in draw.y1..=draw.y2 {
            painter.map_row_masked(&scope, scratch, (coords.x1, y), &row, None, dsc.bg_opa);
        }
        return;
    }

    // rows between the corner bands need no mask at all
    let straight = Area::new(coords.x1, coords.y1 + r, coords.x2, coords.y2 - r);
    if !external && dir == GradDir::None {
        painter.fill(&straight, dsc.bg_color, dsc.bg_opa);
    }

    let body_x1 = coords.x1 + r;
    let body_x2 = coords.x2 - r;
    for y in draw.y1..=draw.y2 {
        let is_straight = y >= straight.y1 && y <= straight.y2;
        if !external && dir == GradDir::None && is_straight {
            continue;
        }
        let color = match dir {
            GradDir::Vertical => {
                grad_at(dsc.bg_color, dsc.bg_grad_color, y - coords.y1, coords.height())
            }
            _ => dsc.bg_color,
        };
        let row = (coords.x1, coords.x2, y);
        if scope.is_empty() || (!external && is_straight) {
            painter.fill(&coords.row(y), color, dsc.bg_opa);
        } else if external {
            painter.fill_row_masked(&scope, scratch, row, color, dsc.bg_opa);
        } else {
            fill_corner_row(&mut painter, &scope, scratch, row, (body_x1, body_x2), color, dsc.bg_opa);
        }
    }
}

/// One row crossing a corner band: masked corners around an unmasked body.
fn fill_corner_row<C: PixelColor>(
    painter: &mut Painter<'_, '_, C>,
    masks: &MaskContext,
    scratch: &mut [Opa],
    (x1, x2, y): (Coord, Coord, Coord),
    (body_x1, body_x2): (Coord, Coord),
    color: C,
    opa: Opa,
) {
    painter.fill_row_masked(masks, scratch, (x1, body_x1 - 1, y), color, opa);
    if body_x1 <= body_x2 {
        painter.fill(&Area::new(body_x1, y, body_x2, y), color, opa);
    }
    painter.fill_row_masked(masks, scratch, (body_x2 + 1, x2, y), color, opa);
}

fn draw_border<C: PixelColor>(
    ctx: &mut DrawCtx,
    surf: &mut Surface<'_, C>,
    clip: &Area,
    coords: &Area,
    r: Coord,
    dsc: &RectDsc<C>,
) {
    if dsc.border_width <= 0 || dsc.border_opa < OPA_MIN {
        return;
    }
    let Some(mut painter) = Painter::new(surf, clip, dsc.blend_mode) else {
        return;
    };
    let Some(draw) = coords.intersect(&painter.clip) else {
        return;
    };
    let (masks, scratch) = ctx.parts();
    let external = !masks.is_empty();
    let inner = coords.inflate(-dsc.border_width);
    let r_in = (r - dsc.border_width).max(0);

    let mut scope = masks.scope();
    if r > 0 && scope.add(RadiusMask::new(*coords, r, false)).is_none() {
        return;
    }
    if inner.is_empty() {
        // border swallows the whole shape
        for y in draw.y1..=draw.y2 {
            if scope.is_empty() {
                painter.fill(&coords.row(y), dsc.border_color, dsc.border_opa);
            } else {
                let row = (coords.x1, coords.x2, y);
                painter.fill_row_masked(&scope, scratch, row, dsc.border_color, dsc.border_opa);
            }
        }
        return;
    }
    if scope.add(RadiusMask::new(inner, r_in, true)).is_none() {
        return;
    }

    let straight_y1 = inner.y1 + r_in;
    let straight_y2 = inner.y2 - r_in;
    for y in draw.y1..=draw.y2 {
        if !external && y >= straight_y1 && y <= straight_y2 {
            let left = Area::new(coords.x1, y, inner.x1 - 1, y);
            let right = Area::new(inner.x2 + 1, y, coords.x2, y);
            painter.fill(&left, dsc.border_color, dsc.border_opa);
            painter.fill(&right, dsc.border_color, dsc.border_opa);
        } else {
            let row = (coords.x1, coords.x2, y);
            painter.fill_row_masked(&scope, scratch, row, dsc.border_color, dsc.border_opa);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/rect.rs"]
mod tests;
