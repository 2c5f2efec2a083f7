use crate::blend::{self, BlendMode, MaskRun, Surface};
use crate::color::PixelColor;
use crate::draw::{DrawCtx, Painter};
use crate::foundation::core::{Area, Coord, OPA_COVER, OPA_MIN, Opa, Point};
use crate::foundation::error::{RasterError, RasterResult};
use crate::foundation::math::mul_div255;
use crate::mask::{MaskResult, mask_mix};

const BPP1_OPA: [Opa; 2] = [0, 255];
const BPP2_OPA: [Opa; 4] = [0, 85, 170, 255];
const BPP4_OPA: [Opa; 16] = [
    0, 17, 34, 51, 68, 85, 102, 119, 136, 153, 170, 187, 204, 221, 238, 255,
];

/// Geometry of one glyph bitmap, as handed over by a font.
///
/// The bitmap is a continuous bit stream (rows are not padded), most significant bits
/// first. With `subpixel` each row holds `3 * box_w` samples, one per color channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphDsc {
    /// Box width in destination pixels.
    pub box_w: Coord,
    /// Box height.
    pub box_h: Coord,
    /// Horizontal offset of the box from the pen position.
    pub ofs_x: Coord,
    /// Offset of the box bottom above the baseline.
    pub ofs_y: Coord,
    /// Bits per coverage sample: 1, 2, 4 or 8.
    pub bpp: u8,
    /// Per-channel (LCD) coverage.
    pub subpixel: bool,
}

impl GlyphDsc {
    fn samples_per_row(&self) -> usize {
        let w = self.box_w.max(0) as usize;
        if self.subpixel { w * 3 } else { w }
    }

    /// Bytes the bitmap must hold.
    pub fn bitmap_size(&self) -> usize {
        let bits = self.samples_per_row() * self.box_h.max(0) as usize * usize::from(self.bpp);
        bits.div_ceil(8)
    }

    /// Check bit depth, box size and that `bitmap_len` bytes cover the box.
    pub fn validate(&self, bitmap_len: usize) -> RasterResult<()> {
        if !matches!(self.bpp, 1 | 2 | 4 | 8) {
            return Err(RasterError::unsupported(format!(
                "glyph bpp {} (expected 1, 2, 4 or 8)",
                self.bpp
            )));
        }
        if self.box_w < 0 || self.box_h < 0 {
            return Err(RasterError::validation(format!(
                "glyph box {}x{} is negative",
                self.box_w, self.box_h
            )));
        }
        let need = self.bitmap_size();
        if bitmap_len < need {
            return Err(RasterError::validation(format!(
                "glyph bitmap needs {need} bytes, got {bitmap_len}"
            )));
        }
        Ok(())
    }
}

/// Vertical metrics of the font a glyph comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FontMetrics {
    /// Height of a text line.
    pub line_height: Coord,
    /// Distance of the baseline from the bottom of the line.
    pub base_line: Coord,
}

/// Coverage codes of a glyph bitmap expanded to opacity.
struct GlyphBits<'a> {
    bitmap: &'a [u8],
    bpp: usize,
    row_samples: usize,
    lut: [Opa; 256],
}

impl<'a> GlyphBits<'a> {
    fn new(bitmap: &'a [u8], glyph: &GlyphDsc, opa: Opa) -> Self {
        let table: &[Opa] = match glyph.bpp {
            1 => &BPP1_OPA,
            2 => &BPP2_OPA,
            4 => &BPP4_OPA,
            _ => &[],
        };
        let mut lut = [0; 256];
        for (code, v) in lut.iter_mut().enumerate() {
            let raw = table.get(code).copied().unwrap_or(code as Opa);
            *v = mul_div255(raw, opa);
        }
        Self {
            bitmap,
            bpp: usize::from(glyph.bpp),
            row_samples: glyph.samples_per_row(),
            lut,
        }
    }

    /// Opacity of sample `col` in glyph row `row`.
    fn at(&self, col: usize, row: usize) -> Opa {
        let bit = (row * self.row_samples + col) * self.bpp;
        let shift = 8 - self.bpp - bit % 8;
        let mask = ((1u16 << self.bpp) - 1) as u8;
        let code = (self.bitmap[bit / 8] >> shift) & mask;
        self.lut[usize::from(code)]
    }
}

/// Draw one glyph.
///
/// `pos` is the top-left of the text line the glyph sits on; the glyph box is placed
/// from `metrics` and the glyph offsets.
#[tracing::instrument(level = "trace", skip_all, fields(pos = ?pos, bpp = glyph.bpp))]
#[allow(clippy::too_many_arguments)]
pub fn draw_letter<C: PixelColor>(
    ctx: &mut DrawCtx,
    surf: &mut Surface<'_, C>,
    clip: &Area,
    pos: Point,
    glyph: &GlyphDsc,
    bitmap: &[u8],
    metrics: &FontMetrics,
    color: C,
    opa: Opa,
    mode: BlendMode,
) {
    if let Err(err) = glyph.validate(bitmap.len()) {
        tracing::warn!(%err, "glyph not drawn");
        return;
    }
    if opa < OPA_MIN || glyph.box_w == 0 || glyph.box_h == 0 {
        return;
    }
    let x = pos.x + glyph.ofs_x;
    let y = pos.y + (metrics.line_height - metrics.base_line) - glyph.box_h - glyph.ofs_y;
    let area = Area::from_size(x, y, glyph.box_w, glyph.box_h);

    let Some(mut painter) = Painter::new(surf, clip, mode) else {
        return;
    };
    let Some(draw) = area.intersect(&painter.clip) else {
        return;
    };
    let bits = GlyphBits::new(bitmap, glyph, opa);
    if glyph.subpixel {
        letter_subpx(ctx, &mut painter, &draw, &area, &bits, color);
    } else {
        letter_normal(ctx, &mut painter, &draw, &area, &bits, color);
    }
}

fn letter_normal<C: PixelColor>(
    ctx: &mut DrawCtx,
    painter: &mut Painter<'_, '_, C>,
    draw: &Area,
    area: &Area,
    bits: &GlyphBits<'_>,
    color: C,
) {
    let (masks, scratch) = ctx.parts();
    let chunk_w = (draw.width() as usize).min(scratch.len());

    let mut x = draw.x1;
    while x <= draw.x2 {
        let x_end = (x + chunk_w as Coord - 1).min(draw.x2);
        let w = (x_end - x + 1) as usize;
        let batch_rows = (scratch.len() / w).max(1) as Coord;

        let mut y = draw.y1;
        while y <= draw.y2 {
            let y_end = (y + batch_rows - 1).min(draw.y2);
            let batch = &mut scratch[..w * (y_end - y + 1) as usize];
            for (i, row) in batch.chunks_exact_mut(w).enumerate() {
                let abs_y = y + i as Coord;
                let gy = (abs_y - area.y1) as usize;
                let gx = (x - area.x1) as usize;
                for (j, v) in row.iter_mut().enumerate() {
                    *v = bits.at(gx + j, gy);
                }
                if !masks.is_empty() && masks.apply(row, x, abs_y) == MaskResult::FullTransp {
                    row.fill(0);
                }
            }
            blend::fill(
                painter.surf,
                &painter.clip,
                &Area::new(x, y, x_end, y_end),
                color,
                OPA_COVER,
                MaskRun::Changed(batch),
                painter.mode,
            );
            y = y_end + 1;
        }
        x = x_end + 1;
    }
}

fn letter_subpx<C: PixelColor>(
    ctx: &mut DrawCtx,
    painter: &mut Painter<'_, '_, C>,
    draw: &Area,
    area: &Area,
    bits: &GlyphBits<'_>,
    color: C,
) {
    let (masks, scratch) = ctx.parts();
    let chunk_w = (draw.width() as usize).min(scratch.len());
    let mut cov: Vec<[Opa; 3]> = Vec::with_capacity(chunk_w);

    for y in draw.y1..=draw.y2 {
        let gy = (y - area.y1) as usize;
        let mut x = draw.x1;
        while x <= draw.x2 {
            let x_end = (x + chunk_w as Coord - 1).min(draw.x2);
            let w = (x_end - x + 1) as usize;
            let gx = (x - area.x1) as usize;

            cov.clear();
            cov.extend((0..w).map(|j| {
                let s = (gx + j) * 3;
                [bits.at(s, gy), bits.at(s + 1, gy), bits.at(s + 2, gy)]
            }));

            if !masks.is_empty() {
                let m = &mut scratch[..w];
                m.fill(OPA_COVER);
                match masks.apply(m, x, y) {
                    MaskResult::FullTransp => cov.fill([0; 3]),
                    MaskResult::FullCover => {}
                    MaskResult::Changed => {
                        for (c, &mv) in cov.iter_mut().zip(m.iter()) {
                            *c = c.map(|v| mask_mix(v, mv));
                        }
                    }
                }
            }
            blend::fill_subpx(painter.surf, &painter.clip, x, y, &cov, color, painter.mode);
            x = x_end + 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/glyph.rs"]
mod tests;
