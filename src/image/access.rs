use crate::color::PixelColor;
use crate::foundation::core::{Coord, OPA_COVER, Opa};
use crate::foundation::error::{RasterError, RasterResult};
use crate::image::{ColorFormat, Image, PALETTE_ENTRY_SIZE};

const ALPHA2_OPA: [Opa; 4] = [0, 85, 170, 255];
const ALPHA4_OPA: [Opa; 16] = [
    0, 17, 34, 51, 68, 85, 102, 119, 136, 153, 170, 187, 204, 221, 238, 255,
];

/// Byte index and right-shift of a packed pixel.
fn packed_pos(row_start: usize, x: Coord, bits: u32) -> (usize, u32) {
    let bit = x as usize * bits as usize;
    (row_start + bit / 8, 8 - bits - (bit % 8) as u32)
}

impl<C: PixelColor, D: AsRef<[u8]>> Image<C, D> {
    fn clamp_xy(&self, x: Coord, y: Coord) -> (Coord, Coord) {
        let h = &self.header;
        if x < 0 || y < 0 || x >= h.w || y >= h.h {
            tracing::warn!(x, y, w = h.w, h = h.h, "pixel read outside image, clamped");
        }
        (x.clamp(0, h.w - 1), y.clamp(0, h.h - 1))
    }

    fn row_start(&self, y: Coord) -> usize {
        self.header.pixels_offset() + y as usize * self.header.row_bytes::<C>()
    }

    fn packed_value(&self, x: Coord, y: Coord, bits: u32) -> u8 {
        let (byte, shift) = packed_pos(self.row_start(y), x, bits);
        let mask = ((1u16 << bits) - 1) as u8;
        (self.data()[byte] >> shift) & mask
    }

    /// Native color bytes offset of pixel `(x, y)`; true-color formats only.
    pub(crate) fn native_offset(&self, x: Coord, y: Coord) -> usize {
        let px = match self.header.cf {
            ColorFormat::TrueColorAlpha => C::BYTES + 1,
            _ => C::BYTES,
        };
        self.row_start(y) + x as usize * px
    }

    /// Palette entry `id` as `0xAARRGGBB`, `None` if the format has no such entry.
    pub fn palette_entry(&self, id: usize) -> Option<u32> {
        if id >= self.header.cf.palette_len() {
            return None;
        }
        let off = id * PALETTE_ENTRY_SIZE;
        let b = &self.data()[off..off + PALETTE_ENTRY_SIZE];
        Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Palette index stored at `(x, y)`; `None` for non-indexed formats.
    pub fn px_index(&self, x: Coord, y: Coord) -> Option<u8> {
        let bits = self.header.cf.packed_bits()?;
        if !self.header.cf.is_indexed() {
            return None;
        }
        let (x, y) = self.clamp_xy(x, y);
        Some(self.packed_value(x, y, bits))
    }

    /// Color of pixel `(x, y)`.
    ///
    /// Indexed formats resolve through the palette. Alpha-only formats carry no color and
    /// return `tint`.
    pub fn px_color(&self, x: Coord, y: Coord, tint: C) -> C {
        let (x, y) = self.clamp_xy(x, y);
        let cf = self.header.cf;
        if cf.is_native() {
            let off = self.native_offset(x, y);
            return C::read_bytes(&self.data()[off..off + C::BYTES]);
        }
        if cf.is_alpha_only() {
            return tint;
        }
        self.px_index(x, y)
            .and_then(|id| self.palette_entry(usize::from(id)))
            .map_or(tint, C::from_argb32)
    }

    /// Opacity of pixel `(x, y)`; [`OPA_COVER`] for formats without alpha.
    pub fn px_alpha(&self, x: Coord, y: Coord) -> Opa {
        let (x, y) = self.clamp_xy(x, y);
        match self.header.cf {
            ColorFormat::TrueColorAlpha => {
                let off = self.native_offset(x, y) + C::BYTES;
                self.data()[off]
            }
            ColorFormat::Alpha1 => {
                if self.packed_value(x, y, 1) != 0 {
                    OPA_COVER
                } else {
                    0
                }
            }
            ColorFormat::Alpha2 => ALPHA2_OPA[usize::from(self.packed_value(x, y, 2))],
            ColorFormat::Alpha4 => ALPHA4_OPA[usize::from(self.packed_value(x, y, 4))],
            ColorFormat::Alpha8 => self.packed_value(x, y, 8),
            cf if cf.is_indexed() => self
                .px_index(x, y)
                .and_then(|id| self.palette_entry(usize::from(id)))
                .map_or(OPA_COVER, |argb| (argb >> 24) as Opa),
            _ => OPA_COVER,
        }
    }
}

impl<C: PixelColor, D: AsRef<[u8]> + AsMut<[u8]>> Image<C, D> {
    fn check_xy(&self, x: Coord, y: Coord) -> RasterResult<()> {
        let h = &self.header;
        if x < 0 || y < 0 || x >= h.w || y >= h.h {
            return Err(RasterError::out_of_bounds(format!(
                "pixel ({x}, {y}) outside {}x{} image",
                h.w, h.h
            )));
        }
        Ok(())
    }

    fn set_packed(&mut self, x: Coord, y: Coord, bits: u32, value: u8) {
        let (byte, shift) = packed_pos(self.row_start(y), x, bits);
        let mask = (((1u16 << bits) - 1) as u8) << shift;
        let b = &mut self.data.as_mut()[byte];
        *b = (*b & !mask) | ((value << shift) & mask);
    }

    /// Store color `c` at `(x, y)`; true-color formats only.
    pub fn set_px_color(&mut self, x: Coord, y: Coord, c: C) -> RasterResult<()> {
        self.check_xy(x, y)?;
        if !self.header.cf.is_native() {
            return Err(RasterError::unsupported(format!(
                "set_px_color on {:?}; use set_px_index or set_px_alpha",
                self.header.cf
            )));
        }
        let off = self.native_offset(x, y);
        c.write_bytes(&mut self.data.as_mut()[off..off + C::BYTES]);
        Ok(())
    }

    /// Store palette index `id` at `(x, y)`; indexed formats only.
    pub fn set_px_index(&mut self, x: Coord, y: Coord, id: u8) -> RasterResult<()> {
        self.check_xy(x, y)?;
        let cf = self.header.cf;
        let bits = cf
            .packed_bits()
            .filter(|_| cf.is_indexed())
            .ok_or_else(|| RasterError::unsupported(format!("set_px_index on {cf:?}")))?;
        if usize::from(id) >= cf.palette_len() {
            return Err(RasterError::out_of_bounds(format!(
                "palette index {id} on {cf:?}"
            )));
        }
        self.set_packed(x, y, bits, id);
        Ok(())
    }

    /// Store opacity `opa` at `(x, y)`, quantized to the format's bit depth.
    pub fn set_px_alpha(&mut self, x: Coord, y: Coord, opa: Opa) -> RasterResult<()> {
        self.check_xy(x, y)?;
        match self.header.cf {
            ColorFormat::TrueColorAlpha => {
                let off = self.native_offset(x, y) + C::BYTES;
                self.data.as_mut()[off] = opa;
            }
            cf if cf.is_alpha_only() => {
                let bits = cf.packed_bits().unwrap_or(8);
                self.set_packed(x, y, bits, opa >> (8 - bits));
            }
            cf => {
                return Err(RasterError::unsupported(format!("set_px_alpha on {cf:?}")));
            }
        }
        Ok(())
    }

    /// Set palette entry `id` to `0xAARRGGBB`.
    pub fn set_palette(&mut self, id: usize, argb: u32) -> RasterResult<()> {
        let cf = self.header.cf;
        if id >= cf.palette_len() {
            return Err(RasterError::out_of_bounds(format!(
                "palette entry {id} on {cf:?}"
            )));
        }
        let off = id * PALETTE_ENTRY_SIZE;
        self.data.as_mut()[off..off + PALETTE_ENTRY_SIZE].copy_from_slice(&argb.to_le_bytes());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/image/access.rs"]
mod tests;
