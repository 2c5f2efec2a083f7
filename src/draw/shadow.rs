use crate::blend::{self, BlendMode, MaskRun, Surface, masked_opa};
use crate::color::PixelColor;
use crate::draw::{DrawCtx, Painter};
use crate::foundation::core::{Area, Coord, OPA_COVER, OPA_MIN, Opa};
use crate::mask::{MaskContext, MaskGen, MaskResult, RadiusMask};

// fixed-point headroom between the two blur passes
const UPSCALE_SHIFT: u32 = 4;

/// Box-blurred drop shadow of a rounded rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShadowDsc<C> {
    /// Shadow color.
    pub color: C,
    /// Blur window in pixels; `0` gives a hard-edged shadow.
    pub width: Coord,
    /// Horizontal offset.
    pub ofs_x: Coord,
    /// Vertical offset.
    pub ofs_y: Coord,
    /// Grows the shape before blurring.
    pub spread: Coord,
    /// Overall opacity.
    pub opa: Opa,
}

/// Opacity of the top-right quadrant of a blurred rounded corner.
///
/// The buffer is `size * size` with `size = shadow_width + radius`; row 0 is the outermost
/// row, column `size - 1` the outermost column. The shape continues to the left and
/// downward. A `shadow_width <= 1` counts as 0: the buffer is the plain `radius * radius`
/// radius-mask coverage.
pub fn shadow_corner_buf(radius: Coord, shadow_width: Coord) -> Vec<Opa> {
    let sw = blur_width(shadow_width);
    let r = radius.max(0);
    let size = (sw + r).max(1);
    let half = sw / 2;

    // a rect far larger than the quadrant so only its top-right corner is seen
    let x2 = size - 1 - half;
    let rect = Area::new(x2 - 2 * size, half, x2, half + 2 * size);
    let mask = RadiusMask::new(rect, r, false);

    let n = size as usize;
    let mut coverage = vec![OPA_COVER; n * n];
    for (y, row) in coverage.chunks_exact_mut(n).enumerate() {
        if mask.apply(row, 0, y as Coord) == MaskResult::FullTransp {
            row.fill(0);
        }
    }
    if sw == 0 {
        return coverage;
    }

    let mut tmp = vec![0u16; n * n];
    let mut out = vec![0u16; n * n];
    horizontal_pass(&coverage, &mut tmp, n, sw as usize);
    vertical_pass(&tmp, &mut out, n, sw as usize);
    for (dst, &v) in coverage.iter_mut().zip(&out) {
        *dst = (v >> UPSCALE_SHIFT).min(255) as Opa;
    }
    coverage
}

/// Blur width actually applied; a single-sample box is no blur.
fn blur_width(shadow_width: Coord) -> Coord {
    if shadow_width > 1 { shadow_width } else { 0 }
}

/// Window `[x - left, x + right]` for a box of `sw` samples.
fn window(sw: usize) -> (usize, usize) {
    let right = sw / 2;
    let left = if sw % 2 == 0 { right - 1 } else { right };
    (left, right)
}

/// Sliding-window box blur of each row. Samples left of the row repeat column 0 (inside
/// the shape); samples right of it are 0 (outside).
fn horizontal_pass(src: &[Opa], dst: &mut [u16], size: usize, sw: usize) {
    let (left, right) = window(sw);
    let at = |row: &[Opa], i: isize| -> u32 {
        if i < 0 {
            u32::from(row[0])
        } else if (i as usize) < size {
            u32::from(row[i as usize])
        } else {
            0
        }
    };
    for (row, out) in src.chunks_exact(size).zip(dst.chunks_exact_mut(size)) {
        let mut sum: u32 = (-(left as isize)..=right as isize).map(|i| at(row, i)).sum();
        for x in 0..size {
            out[x] = ((sum << UPSCALE_SHIFT) / sw as u32) as u16;
            let x = x as isize;
            sum += at(row, x + right as isize + 1);
            sum -= at(row, x - left as isize);
        }
    }
}

/// Sliding-window box blur of each column. Samples above are 0 (outside); samples below
/// repeat the last row (inside).
fn vertical_pass(src: &[u16], dst: &mut [u16], size: usize, sw: usize) {
    let (left, right) = window(sw);
    let at = |x: usize, i: isize| -> u32 {
        if i < 0 {
            0
        } else {
            u32::from(src[(i as usize).min(size - 1) * size + x])
        }
    };
    for x in 0..size {
        let mut sum: u32 = (-(left as isize)..=right as isize).map(|i| at(x, i)).sum();
        for y in 0..size {
            dst[y * size + x] = (sum / sw as u32) as u16;
            let y = y as isize;
            sum += at(x, y + right as isize + 1);
            sum -= at(x, y - left as isize);
        }
    }
}

/// Quadrant lookup for a shadow outline, mirroring the corner buffer onto all four corners.
struct CornerMap<'a> {
    buf: &'a [Opa],
    size: Coord,
    outline: Area,
}

impl CornerMap<'_> {
    /// Buffer row for absolute `y`; row 0 is the outermost.
    fn row(&self, y: Coord) -> Coord {
        let d = (y - self.outline.y1).min(self.outline.y2 - y);
        d.min(self.size - 1)
    }

    /// Buffer column for absolute `x`; column `size - 1` is the outermost.
    fn col(&self, x: Coord) -> Coord {
        let d = (x - self.outline.x1).min(self.outline.x2 - x);
        (self.size - 1 - d).max(0)
    }

    fn at(&self, x: Coord, y: Coord) -> Opa {
        self.buf[(self.row(y) * self.size + self.col(x)) as usize]
    }

    fn is_inner_row(&self, y: Coord) -> bool {
        y - self.outline.y1 >= self.size && self.outline.y2 - y >= self.size
    }
}

/// Draw the shadow of the rounded rectangle `coords` with corner `radius`.
#[tracing::instrument(level = "trace", skip_all, fields(coords = ?coords, width = dsc.width))]
pub fn draw_shadow<C: PixelColor>(
    ctx: &mut DrawCtx,
    surf: &mut Surface<'_, C>,
    clip: &Area,
    coords: &Area,
    radius: Coord,
    dsc: &ShadowDsc<C>,
) {
    if dsc.opa < OPA_MIN {
        return;
    }
    if dsc.width <= 0 && dsc.spread == 0 && dsc.ofs_x == 0 && dsc.ofs_y == 0 {
        return;
    }
    let core = coords.translate(dsc.ofs_x, dsc.ofs_y).inflate(dsc.spread);
    if core.is_empty() {
        return;
    }
    let max_size = ctx.opts().shadow_max_size.max(1);
    // corner buffer side is sw + r <= max_size
    let sw = blur_width(dsc.width.clamp(0, max_size));
    let r = radius.clamp(0, core.short_side() / 2).min(max_size - sw);
    let outline = core.inflate(sw / 2);

    let Some(mut painter) = Painter::new(surf, clip, BlendMode::Normal) else {
        return;
    };
    let Some(draw) = outline.intersect(&painter.clip) else {
        return;
    };

    let corner_buf = shadow_corner_buf(r, sw);
    let corner = CornerMap {
        buf: &corner_buf,
        size: (sw + r).max(1),
        outline,
    };

    // columns between the left and right corner bands
    let mid_x1 = outline.x1 + corner.size;
    let mid_x2 = outline.x2 - corner.size;

    let (masks, scratch) = ctx.parts();
    for y in draw.y1..=draw.y2 {
        if masks.is_empty() && mid_x1 <= mid_x2 && corner.is_inner_row(y) {
            let mid_opa = masked_opa(corner.at(mid_x1, y), dsc.opa);
            let left = (draw.x1, (mid_x1 - 1).min(draw.x2), y);
            let right = ((mid_x2 + 1).max(draw.x1), draw.x2, y);
            shadow_span(&mut painter, masks, scratch, &corner, left, dsc);
            painter.fill(&Area::new(mid_x1, y, mid_x2, y), dsc.color, mid_opa);
            shadow_span(&mut painter, masks, scratch, &corner, right, dsc);
        } else {
            let row = (draw.x1, draw.x2, y);
            shadow_span(&mut painter, masks, scratch, &corner, row, dsc);
        }
    }
}

fn shadow_span<C: PixelColor>(
    painter: &mut Painter<'_, '_, C>,
    masks: &MaskContext,
    scratch: &mut [Opa],
    corner: &CornerMap<'_>,
    (x1, x2, y): (Coord, Coord, Coord),
    dsc: &ShadowDsc<C>,
) {
    let chunk = scratch.len() as Coord;
    let mut x = x1;
    while x <= x2 {
        let end = (x + chunk - 1).min(x2);
        let buf = &mut scratch[..(end - x + 1) as usize];
        for (i, v) in buf.iter_mut().enumerate() {
            *v = corner.at(x + i as Coord, y);
        }
        // the seeded corner coverage always has to be consulted
        let res = match masks.apply(buf, x, y) {
            MaskResult::FullTransp => MaskResult::FullTransp,
            _ => MaskResult::Changed,
        };
        blend::fill(
            painter.surf,
            &painter.clip,
            &Area::new(x, y, end, y),
            dsc.color,
            dsc.opa,
            MaskRun::new(res, buf),
            painter.mode,
        );
        x = end + 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/shadow.rs"]
mod tests;
