use crate::color::PixelColor;
use crate::foundation::core::{Area, Coord, Point};
use crate::foundation::error::{RasterError, RasterResult};

/// Destination pixels with their absolute placement.
///
/// Pixel `(x, y)` of `area` lives at `(y - area.y1) * stride + (x - area.x1)`.
#[derive(Debug)]
pub struct Surface<'a, C> {
    buf: &'a mut [C],
    area: Area,
    stride: usize,
}

impl<'a, C: PixelColor> Surface<'a, C> {
    /// Tightly packed surface covering `area`.
    pub fn new(buf: &'a mut [C], area: Area) -> RasterResult<Self> {
        Self::with_stride(buf, area, area.width() as usize)
    }

    /// Surface covering `area` whose rows are `stride` pixels apart.
    pub fn with_stride(buf: &'a mut [C], area: Area, stride: usize) -> RasterResult<Self> {
        if area.is_empty() {
            return Err(RasterError::validation("surface area is empty"));
        }
        let w = area.width() as usize;
        let h = area.height() as usize;
        if stride < w {
            return Err(RasterError::validation(format!(
                "surface stride {stride} is smaller than its width {w}"
            )));
        }
        let needed = stride * (h - 1) + w;
        if buf.len() < needed {
            return Err(RasterError::validation(format!(
                "surface needs {needed} pixels, buffer holds {}",
                buf.len()
            )));
        }
        Ok(Self { buf, area, stride })
    }

    /// Absolute area covered by the surface.
    pub fn area(&self) -> Area {
        self.area
    }

    /// Distance between rows, in pixels.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel at absolute `(x, y)`, `None` outside the surface.
    pub fn px(&self, x: Coord, y: Coord) -> Option<C> {
        self.area
            .contains(Point::new(x, y))
            .then(|| self.buf[self.offset(x, y)])
    }

    /// Underlying pixel storage.
    pub fn pixels(&self) -> &[C] {
        self.buf
    }

    pub(crate) fn offset(&self, x: Coord, y: Coord) -> usize {
        (y - self.area.y1) as usize * self.stride + (x - self.area.x1) as usize
    }

    /// Pixels `x1..=x2` of row `y`; the span must lie inside the surface.
    pub(crate) fn span_mut(&mut self, y: Coord, x1: Coord, x2: Coord) -> &mut [C] {
        let start = self.offset(x1, y);
        let end = start + (x2 - x1 + 1) as usize;
        &mut self.buf[start..end]
    }

    /// Copy the span `x1..=x2` of row `src_y` onto row `dst_y`.
    pub(crate) fn copy_span(&mut self, src_y: Coord, dst_y: Coord, x1: Coord, x2: Coord) {
        let start = self.offset(x1, src_y);
        let end = start + (x2 - x1 + 1) as usize;
        let dst = self.offset(x1, dst_y);
        self.buf.copy_within(start..end, dst);
    }
}
