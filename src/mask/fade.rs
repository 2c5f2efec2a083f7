use crate::foundation::core::{Area, Coord, OPA_MAX, OPA_MIN, OPA_TRANSP, Opa};
use crate::mask::{MaskGen, MaskResult, mask_mix};

/// Vertical linear opacity ramp, active only inside `rect`.
///
/// Rows above `y_top` get `opa_top`, rows below `y_bottom` get `opa_bottom`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FadeMask {
    rect: Area,
    opa_top: Opa,
    y_top: Coord,
    opa_bottom: Opa,
    y_bottom: Coord,
}

impl FadeMask {
    /// Ramp from `opa_top` at `y_top` to `opa_bottom` at `y_bottom`, clipped to `rect`.
    pub fn new(rect: Area, opa_top: Opa, y_top: Coord, opa_bottom: Opa, y_bottom: Coord) -> Self {
        Self {
            rect,
            opa_top,
            y_top,
            opa_bottom,
            y_bottom,
        }
    }

    /// Opacity of row `y`.
    pub fn opa_at(&self, y: Coord) -> Opa {
        if y <= self.y_top {
            return self.opa_top;
        }
        if y >= self.y_bottom {
            return self.opa_bottom;
        }
        let top = i32::from(self.opa_top);
        let bottom = i32::from(self.opa_bottom);
        let span = self.y_bottom - self.y_top + 1;
        ((y - self.y_top) * (bottom - top) / span + top) as Opa
    }
}

impl MaskGen for FadeMask {
    fn apply(&self, buf: &mut [Opa], abs_x: Coord, abs_y: Coord) -> MaskResult {
        let len = buf.len() as Coord;
        if abs_y < self.rect.y1 || abs_y > self.rect.y2 {
            return MaskResult::FullCover;
        }
        if abs_x > self.rect.x2 || abs_x + len <= self.rect.x1 {
            return MaskResult::FullCover;
        }

        let first = (self.rect.x1 - abs_x).max(0) as usize;
        let last = (self.rect.x2 - abs_x + 1).min(len) as usize;

        let opa = self.opa_at(abs_y);
        if opa > OPA_MAX {
            return MaskResult::FullCover;
        }
        let run = &mut buf[first..last];
        if opa < OPA_MIN {
            run.fill(OPA_TRANSP);
        } else {
            for px in run {
                *px = mask_mix(*px, opa);
            }
        }
        MaskResult::Changed
    }
}
