use crate::blend::{BlendMode, MaskRun, Surface, blend_px};
use crate::color::{PixelColor, mix_channels};
use crate::foundation::core::{Area, Coord, OPA_COVER, OPA_MAX, OPA_MIN, Opa};

/// Flood `fill_area ∩ clip` with `color`.
///
/// Pixels outside the intersection (and outside the surface) are never touched.
pub fn fill<C: PixelColor>(
    surf: &mut Surface<'_, C>,
    clip: &Area,
    fill_area: &Area,
    color: C,
    opa: Opa,
    mask: MaskRun<'_>,
    mode: BlendMode,
) {
    if opa < OPA_MIN {
        return;
    }
    let Some(mask_area) = fill_area.intersect(clip) else {
        return;
    };
    let Some(draw) = mask_area.intersect(&surf.area()) else {
        return;
    };
    let opa = if opa > OPA_MAX { OPA_COVER } else { opa };

    match mask {
        MaskRun::FullTransp => {}
        MaskRun::FullCover => fill_cover(surf, &draw, color, opa, mode),
        MaskRun::Changed(m) => {
            if m.len() < mask_area.size() {
                tracing::warn!(
                    need = mask_area.size(),
                    got = m.len(),
                    "fill mask shorter than its area, nothing drawn"
                );
                return;
            }
            fill_masked(surf, &draw, &mask_area, m, color, opa, mode);
        }
    }
}

fn fill_cover<C: PixelColor>(
    surf: &mut Surface<'_, C>,
    draw: &Area,
    color: C,
    opa: Opa,
    mode: BlendMode,
) {
    if mode == BlendMode::Normal && opa == OPA_COVER {
        surf.span_mut(draw.y1, draw.x1, draw.x2).fill(color);
        for y in draw.y1 + 1..=draw.y2 {
            surf.copy_span(draw.y1, y, draw.x1, draw.x2);
        }
        return;
    }

    // destination is usually uniform: reuse the last mix while it keeps matching
    let mut last: Option<(C, C)> = None;
    for y in draw.y1..=draw.y2 {
        for px in surf.span_mut(y, draw.x1, draw.x2) {
            let res = match last {
                Some((dest, res)) if dest == *px => res,
                _ => {
                    let res = blend_px(mode, color, *px, opa);
                    last = Some((*px, res));
                    res
                }
            };
            *px = res;
        }
    }
}

/// Scale a mask value by the call opacity.
#[inline]
pub(crate) fn masked_opa(m: Opa, opa: Opa) -> Opa {
    if m == OPA_COVER {
        opa
    } else if opa == OPA_COVER {
        m
    } else {
        ((u16::from(m) * u16::from(opa)) >> 8) as Opa
    }
}

fn fill_masked<C: PixelColor>(
    surf: &mut Surface<'_, C>,
    draw: &Area,
    mask_area: &Area,
    mask: &[Opa],
    color: C,
    opa: Opa,
    mode: BlendMode,
) {
    let mask_w = mask_area.width() as usize;
    let mut last: Option<(Opa, C, C)> = None;

    for y in draw.y1..=draw.y2 {
        let row_start = (y - mask_area.y1) as usize * mask_w + (draw.x1 - mask_area.x1) as usize;
        let mask_row = &mask[row_start..row_start + draw.width() as usize];
        for (px, &m) in surf.span_mut(y, draw.x1, draw.x2).iter_mut().zip(mask_row) {
            if m == 0 {
                continue;
            }
            let res = match last {
                Some((lm, dest, res)) if lm == m && dest == *px => res,
                _ => {
                    let eff = masked_opa(m, opa);
                    let res = if eff == OPA_COVER && mode == BlendMode::Normal {
                        color
                    } else {
                        blend_px(mode, color, *px, eff)
                    };
                    last = Some((m, *px, res));
                    res
                }
            };
            *px = res;
        }
    }
}

/// Blend one row of per-channel (`[r, g, b]`) coverage starting at `(x, y)`.
///
/// Used by sub-pixel glyph rendering; `cov` is already scaled by opacity and masks.
pub fn fill_subpx<C: PixelColor>(
    surf: &mut Surface<'_, C>,
    clip: &Area,
    x: Coord,
    y: Coord,
    cov: &[[Opa; 3]],
    color: C,
    mode: BlendMode,
) {
    if cov.is_empty() {
        return;
    }
    let run = Area::new(x, y, x + cov.len() as Coord - 1, y);
    let Some(draw) = run.intersect(clip).and_then(|a| a.intersect(&surf.area())) else {
        return;
    };
    let skip = (draw.x1 - x) as usize;
    let cov = &cov[skip..skip + draw.width() as usize];
    for (px, c) in surf.span_mut(y, draw.x1, draw.x2).iter_mut().zip(cov) {
        if *c == [0, 0, 0] {
            continue;
        }
        let fg = if mode == BlendMode::Normal {
            color
        } else {
            blend_px(mode, color, *px, OPA_COVER)
        };
        *px = mix_channels(fg, *px, *c);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/fill.rs"]
mod tests;
