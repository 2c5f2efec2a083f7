//! Image descriptors, per-format pixel access and the rotation/zoom resampler.

mod access;
mod rotate;

pub use rotate::{RotateDsc, Sample, ZOOM_NONE, transformed_area};

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::color::PixelColor;
use crate::foundation::core::Coord;
use crate::foundation::error::{RasterError, RasterResult};

/// Pixel storage format of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorFormat {
    /// Native pixels.
    TrueColor,
    /// Native pixels each followed by one alpha byte.
    TrueColorAlpha,
    /// Native pixels; the chroma key color is transparent.
    TrueColorChromaKeyed,
    /// 1-bit palette indices (2 entries).
    Indexed1,
    /// 2-bit palette indices (4 entries).
    Indexed2,
    /// 4-bit palette indices (16 entries).
    Indexed4,
    /// 8-bit palette indices (256 entries).
    Indexed8,
    /// 1-bit alpha.
    Alpha1,
    /// 2-bit alpha.
    Alpha2,
    /// 4-bit alpha.
    Alpha4,
    /// 8-bit alpha.
    Alpha8,
}

impl ColorFormat {
    /// Bits per pixel of packed formats (indexed and alpha), `None` for true color.
    pub fn packed_bits(self) -> Option<u32> {
        match self {
            ColorFormat::Indexed1 | ColorFormat::Alpha1 => Some(1),
            ColorFormat::Indexed2 | ColorFormat::Alpha2 => Some(2),
            ColorFormat::Indexed4 | ColorFormat::Alpha4 => Some(4),
            ColorFormat::Indexed8 | ColorFormat::Alpha8 => Some(8),
            _ => None,
        }
    }

    /// Number of palette entries stored ahead of the pixels.
    pub fn palette_len(self) -> usize {
        match self {
            ColorFormat::Indexed1 => 2,
            ColorFormat::Indexed2 => 4,
            ColorFormat::Indexed4 => 16,
            ColorFormat::Indexed8 => 256,
            _ => 0,
        }
    }

    /// Palette-indexed format.
    pub fn is_indexed(self) -> bool {
        self.palette_len() > 0
    }

    /// Alpha-only format.
    pub fn is_alpha_only(self) -> bool {
        matches!(
            self,
            ColorFormat::Alpha1 | ColorFormat::Alpha2 | ColorFormat::Alpha4 | ColorFormat::Alpha8
        )
    }

    /// Pixels may be partially transparent.
    pub fn has_alpha(self) -> bool {
        self == ColorFormat::TrueColorAlpha || self.is_alpha_only() || self.is_indexed()
    }

    /// Stored at the destination depth (read by direct offset).
    pub fn is_native(self) -> bool {
        matches!(
            self,
            ColorFormat::TrueColor | ColorFormat::TrueColorAlpha | ColorFormat::TrueColorChromaKeyed
        )
    }
}

/// Bytes per palette entry (`0xAARRGGBB`, little endian).
pub const PALETTE_ENTRY_SIZE: usize = 4;

/// Color treated as transparent by [`ColorFormat::TrueColorChromaKeyed`].
pub fn chroma_key<C: PixelColor>() -> C {
    C::from_rgb8(0x00, 0xFF, 0x00)
}

/// Dimensions and format of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHeader {
    /// Width in pixels.
    pub w: Coord,
    /// Height in pixels.
    pub h: Coord,
    /// Storage format.
    pub cf: ColorFormat,
}

impl ImageHeader {
    /// Header for a `w` x `h` image.
    pub fn new(w: Coord, h: Coord, cf: ColorFormat) -> Self {
        Self { w, h, cf }
    }

    /// Bytes per pixel of true-color formats at depth `C`.
    fn px_bytes<C: PixelColor>(&self) -> usize {
        match self.cf {
            ColorFormat::TrueColorAlpha => C::BYTES + 1,
            _ => C::BYTES,
        }
    }

    /// Bytes per pixel row (packed rows are byte aligned).
    pub fn row_bytes<C: PixelColor>(&self) -> usize {
        let w = self.w.max(0) as usize;
        match self.cf.packed_bits() {
            Some(bits) => (w * bits as usize).div_ceil(8),
            None => w * self.px_bytes::<C>(),
        }
    }

    /// Byte offset of the first pixel row.
    pub fn pixels_offset(&self) -> usize {
        self.cf.palette_len() * PALETTE_ENTRY_SIZE
    }

    /// Total bytes needed for palette plus pixels at depth `C`.
    pub fn data_size<C: PixelColor>(&self) -> usize {
        self.pixels_offset() + self.row_bytes::<C>() * self.h.max(0) as usize
    }

    /// [`ImageHeader::data_size`], or `None` when it does not fit an allocation.
    pub fn checked_data_size<C: PixelColor>(&self) -> Option<usize> {
        let w = self.w.max(0) as usize;
        let row = match self.cf.packed_bits() {
            Some(bits) => w.checked_mul(bits as usize)?.div_ceil(8),
            None => w.checked_mul(self.px_bytes::<C>())?,
        };
        row.checked_mul(self.h.max(0) as usize)?
            .checked_add(self.pixels_offset())
            .filter(|&n| n <= isize::MAX as usize)
    }
}

/// An image of depth `C` over storage `D`.
///
/// Pixel data is not copied: [`ImageRef`] borrows it, [`ImageBuf`] owns it.
#[derive(Clone, Debug)]
pub struct Image<C, D> {
    header: ImageHeader,
    data: D,
    _color: PhantomData<C>,
}

/// Image borrowing caller-supplied bytes.
pub type ImageRef<'a, C> = Image<C, &'a [u8]>;
/// Image owning its bytes.
pub type ImageBuf<C> = Image<C, Vec<u8>>;

impl<C: PixelColor, D: AsRef<[u8]>> Image<C, D> {
    /// Wrap `data`, checking it is large enough for `header`.
    pub fn new(header: ImageHeader, data: D) -> RasterResult<Self> {
        if header.w <= 0 || header.h <= 0 {
            return Err(RasterError::validation(format!(
                "image size {}x{} is empty",
                header.w, header.h
            )));
        }
        let need = header
            .checked_data_size::<C>()
            .ok_or_else(|| RasterError::validation("image size overflow"))?;
        let got = data.as_ref().len();
        if got < need {
            return Err(RasterError::validation(format!(
                "{:?} image of {}x{} needs {need} bytes, got {got}",
                header.cf, header.w, header.h
            )));
        }
        Ok(Self {
            header,
            data,
            _color: PhantomData,
        })
    }

    /// Dimensions and format.
    pub fn header(&self) -> &ImageHeader {
        &self.header
    }

    /// Raw bytes (palette first, then pixel rows).
    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Borrowing view of this image.
    pub fn view(&self) -> ImageRef<'_, C> {
        Image {
            header: self.header,
            data: self.data.as_ref(),
            _color: PhantomData,
        }
    }
}

impl<C: PixelColor> ImageBuf<C> {
    /// Zeroed image; palette entries and pixels start at zero.
    pub fn alloc(w: Coord, h: Coord, cf: ColorFormat) -> RasterResult<Self> {
        let header = ImageHeader::new(w, h, cf);
        if w <= 0 || h <= 0 {
            return Err(RasterError::validation(format!("image size {w}x{h} is empty")));
        }
        let size = header
            .checked_data_size::<C>()
            .ok_or_else(|| RasterError::validation("image size overflow"))?;
        Self::new(header, vec![0u8; size])
    }

    /// Give back the owned bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
#[path = "../../tests/unit/image/format.rs"]
mod tests;
