use std::sync::Arc;

use crate::foundation::core::{Area, Coord, Opa};
use crate::foundation::error::{RasterError, RasterResult};
use crate::mask::{MaskGen, MaskResult, mask_mix};

/// Arbitrary opacity bitmap covering `rect`, row-major with `rect.width()` stride.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitmapMask {
    rect: Area,
    map: Arc<[Opa]>,
}

impl BitmapMask {
    /// Wrap `map`; it must hold at least `rect.width() * rect.height()` values.
    pub fn new(rect: Area, map: impl Into<Arc<[Opa]>>) -> RasterResult<Self> {
        let map = map.into();
        if rect.is_empty() {
            return Err(RasterError::validation("bitmap mask area is empty"));
        }
        if map.len() < rect.size() {
            return Err(RasterError::validation(format!(
                "bitmap mask needs {} values, got {}",
                rect.size(),
                map.len()
            )));
        }
        Ok(Self { rect, map })
    }

    /// Covered area.
    pub fn rect(&self) -> Area {
        self.rect
    }
}

impl MaskGen for BitmapMask {
    fn apply(&self, buf: &mut [Opa], abs_x: Coord, abs_y: Coord) -> MaskResult {
        let len = buf.len() as Coord;
        let rect = self.rect;
        if abs_y < rect.y1 || abs_y > rect.y2 {
            return MaskResult::FullCover;
        }
        if abs_x > rect.x2 || abs_x + len <= rect.x1 {
            return MaskResult::FullCover;
        }

        let first = (rect.x1 - abs_x).max(0);
        let last = (rect.x2 - abs_x + 1).min(len);
        let stride = rect.width() as usize;
        let row = (abs_y - rect.y1) as usize * stride;
        let src_start = row + (abs_x + first - rect.x1) as usize;
        let n = (last - first) as usize;

        let src = &self.map[src_start..src_start + n];
        for (px, &m) in buf[first as usize..last as usize].iter_mut().zip(src) {
            *px = mask_mix(*px, m);
        }
        MaskResult::Changed
    }
}
