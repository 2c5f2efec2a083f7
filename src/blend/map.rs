use crate::blend::fill::masked_opa;
use crate::blend::{BlendMode, MaskRun, Surface, blend_px};
use crate::color::PixelColor;
use crate::foundation::core::{Area, Coord, OPA_COVER, OPA_MAX, OPA_MIN, Opa};

/// Blend `src`, a row-major image covering `map_area`, into `map_area ∩ clip`.
pub fn map<C: PixelColor>(
    surf: &mut Surface<'_, C>,
    clip: &Area,
    map_area: &Area,
    src: &[C],
    opa: Opa,
    mask: MaskRun<'_>,
    mode: BlendMode,
) {
    if opa < OPA_MIN {
        return;
    }
    let Some(mask_area) = map_area.intersect(clip) else {
        return;
    };
    let Some(draw) = mask_area.intersect(&surf.area()) else {
        return;
    };
    if src.len() < map_area.size() {
        tracing::warn!(
            need = map_area.size(),
            got = src.len(),
            "map source shorter than its area, nothing drawn"
        );
        return;
    }
    let opa = if opa > OPA_MAX { OPA_COVER } else { opa };

    let draw_w = draw.width() as usize;

    match mask {
        MaskRun::FullTransp => {}
        MaskRun::FullCover => {
            for y in draw.y1..=draw.y2 {
                let dst = surf.span_mut(y, draw.x1, draw.x2);
                let s = src_row(src, map_area, &draw, y);
                if mode == BlendMode::Normal && opa == OPA_COVER {
                    dst.copy_from_slice(s);
                } else {
                    for (px, &c) in dst.iter_mut().zip(s) {
                        *px = blend_px(mode, c, *px, opa);
                    }
                }
            }
        }
        MaskRun::Changed(m) => {
            if m.len() < mask_area.size() {
                tracing::warn!(
                    need = mask_area.size(),
                    got = m.len(),
                    "map mask shorter than its area, nothing drawn"
                );
                return;
            }
            let mask_w = mask_area.width() as usize;
            for y in draw.y1..=draw.y2 {
                let mstart =
                    (y - mask_area.y1) as usize * mask_w + (draw.x1 - mask_area.x1) as usize;
                let mask_row = &m[mstart..mstart + draw_w];
                let s = src_row(src, map_area, &draw, y);
                let dst = surf.span_mut(y, draw.x1, draw.x2);
                for ((px, &c), &mv) in dst.iter_mut().zip(s).zip(mask_row) {
                    if mv == 0 {
                        continue;
                    }
                    let eff = masked_opa(mv, opa);
                    *px = if eff == OPA_COVER && mode == BlendMode::Normal {
                        c
                    } else {
                        blend_px(mode, c, *px, eff)
                    };
                }
            }
        }
    }
}

/// The part of `src` (laid out over `map_area`) that lands on row `y` of `draw`.
fn src_row<'s, C>(src: &'s [C], map_area: &Area, draw: &Area, y: Coord) -> &'s [C] {
    let src_w = map_area.width() as usize;
    let start = (y - map_area.y1) as usize * src_w + (draw.x1 - map_area.x1) as usize;
    &src[start..start + draw.width() as usize]
}

#[cfg(test)]
#[path = "../../tests/unit/blend/map.rs"]
mod tests;
