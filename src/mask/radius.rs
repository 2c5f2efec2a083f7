use crate::foundation::core::{Area, Coord, OPA_COVER, OPA_TRANSP, Opa};
use crate::foundation::math::sqrt_q8;
use crate::mask::{MaskGen, MaskResult, mask_mix};

/// Rounded rectangle clip with anti-aliased circular corners.
///
/// With `inverted` the outside of the rounded rectangle is kept instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadiusMask {
    rect: Area,
    radius: Coord,
    inverted: bool,
}

impl RadiusMask {
    /// Rounded `rect`; `radius` is clamped to half of the shorter side.
    pub fn new(rect: Area, radius: Coord, inverted: bool) -> Self {
        let radius = radius.clamp(0, rect.short_side() / 2);
        Self {
            rect,
            radius,
            inverted,
        }
    }

    /// The rectangle being rounded.
    pub fn rect(&self) -> Area {
        self.rect
    }

    /// Effective (clamped) radius.
    pub fn radius(&self) -> Coord {
        self.radius
    }

    /// Rows away from the corners: plain horizontal clipping against the rectangle.
    fn apply_straight(&self, buf: &mut [Opa], abs_x: i64) -> MaskResult {
        let len = buf.len() as i64;
        let x1 = i64::from(self.rect.x1);
        let x2 = i64::from(self.rect.x2);
        if !self.inverted {
            let last = x1 - abs_x;
            if last > len {
                return MaskResult::FullTransp;
            }
            let first = x2 - abs_x + 1;
            if first <= 0 {
                return MaskResult::FullTransp;
            }
            if last <= 0 && first >= len {
                return MaskResult::FullCover;
            }
            if last > 0 {
                buf[..last as usize].fill(OPA_TRANSP);
            }
            if first < len {
                buf[first as usize..].fill(OPA_TRANSP);
            }
            MaskResult::Changed
        } else {
            let first = (x1 - abs_x).max(0);
            let last = (x2 - abs_x + 1).min(len);
            if first >= last {
                return MaskResult::FullCover;
            }
            buf[first as usize..last as usize].fill(OPA_TRANSP);
            MaskResult::Changed
        }
    }
}

/// Writes the same coverage at mirrored left/right positions of one row.
struct EdgeWriter<'a> {
    buf: &'a mut [Opa],
    inverted: bool,
}

impl EdgeWriter<'_> {
    fn put(&mut self, k: i64, m: i64) {
        let m = m.clamp(0, 255) as Opa;
        let m = if self.inverted { OPA_COVER - m } else { m };
        if k >= 0 && (k as usize) < self.buf.len() {
            let px = &mut self.buf[k as usize];
            *px = mask_mix(*px, m);
        }
    }

    fn put_pair(&mut self, kl: i64, kr: i64, m: i64) {
        self.put(kl, m);
        self.put(kr, m);
    }

    /// Clear `[0, kl)` and `[kr, len)`; outside of a non-inverted shape.
    fn clear_outside(&mut self, kl: i64, kr: i64) -> MaskResult {
        let len = self.buf.len() as i64;
        if kl > len {
            return MaskResult::FullTransp;
        }
        if kl > 0 {
            self.buf[..kl as usize].fill(OPA_TRANSP);
        }
        if kr < 0 {
            return MaskResult::FullTransp;
        }
        if kr < len {
            self.buf[kr as usize..].fill(OPA_TRANSP);
        }
        MaskResult::Changed
    }

    /// Clear `[first, last)` clipped to the row; inside of an inverted shape.
    fn clear_inside(&mut self, first: i64, last: i64) {
        let len = self.buf.len() as i64;
        let first = first.max(0);
        let last = last.min(len);
        if first < last {
            self.buf[first as usize..last as usize].fill(OPA_TRANSP);
        }
    }
}

impl MaskGen for RadiusMask {
    fn apply(&self, buf: &mut [Opa], abs_x: Coord, abs_y: Coord) -> MaskResult {
        let rect = self.rect;
        let radius = i64::from(self.radius);
        let abs_x = i64::from(abs_x);
        let abs_y = i64::from(abs_y);
        let len = buf.len() as i64;
        let (x1, y1, x2, y2) = (
            i64::from(rect.x1),
            i64::from(rect.y1),
            i64::from(rect.x2),
            i64::from(rect.y2),
        );

        if abs_y < y1 || abs_y > y2 {
            return if self.inverted {
                MaskResult::FullCover
            } else {
                MaskResult::FullTransp
            };
        }

        let between_corners = abs_x >= x1 + radius && abs_x + len <= x2 - radius;
        let straight_row = abs_y >= y1 + radius && abs_y <= y2 - radius;
        if between_corners || straight_row {
            return self.apply_straight(buf, abs_x);
        }

        let w = x2 - x1 + 1;
        let h = y2 - y1 + 1;
        let k = x1 - abs_x;
        let ry = abs_y - y1;
        let r2 = radius * radius;

        // distance (in rows) of this row's lower edge from the corner circle's center line
        let y = if ry < radius {
            radius - ry
        } else {
            radius - (h - ry) + 1
        };

        let x0 = sqrt_q8(r2 - y * y);
        let mut x1s = sqrt_q8(r2 - (y - 1) * (y - 1));
        let (x0i, x0f) = (i64::from(x0.int), i64::from(x0.frac));
        if x0i == i64::from(x1s.int) - 1 && x1s.frac == 0 {
            x1s.int -= 1;
            x1s.frac = 0xFF;
        }
        let (x1i, x1f) = (i64::from(x1s.int), i64::from(x1s.frac));

        let mut edge = EdgeWriter {
            buf,
            inverted: self.inverted,
        };

        if x0i == x1i {
            // the boundary crosses a single column in this row
            let m = (x0f + x1f) >> 1;
            let ofs = radius - x0i - 1;
            let kl = k + ofs;
            let kr = k + (w - ofs - 1);
            edge.put_pair(kl, kr, m);
            if !self.inverted {
                return edge.clear_outside(kl, kr + 1);
            }
            edge.clear_inside(kl + 1, kr);
            return MaskResult::Changed;
        }

        let ofs = radius - (x0i + 1);
        let mut kl = k + ofs;
        let mut kr = k + (w - ofs - 1);

        if self.inverted {
            edge.clear_inside(kl + 1, kr);
        }

        let mut i = x0i + 1;
        let yp = sqrt_q8(r2 - x0i * x0i);
        let (mut ypi, mut ypf) = (i64::from(yp.int), i64::from(yp.frac));
        if ypf == 0 {
            ypi -= 1;
            ypf = 0xFF;
        }

        // first column: the boundary enters through the bottom edge of the pixel
        if ypi >= y {
            let yn = sqrt_q8(r2 - i * i);
            let ynf = i64::from(yn.frac);
            let m = 255 - (((255 - x0f) * (255 - ynf)) >> 9);
            edge.put_pair(kl, kr, m);
            kl -= 1;
            kr += 1;
            ypf = ynf;
            i += 1;
        }

        // middle columns: boundary crosses the left and right edges
        while i <= x1i {
            let yn = sqrt_q8(r2 - i * i);
            let ynf = i64::from(yn.frac);
            let m = (ypf + ynf) >> 1;
            edge.put_pair(kl, kr, m);
            kl -= 1;
            kr += 1;
            ypf = ynf;
            i += 1;
        }

        // last column: the boundary leaves through the top edge of the pixel
        if ypf != 0 {
            let m = (ypf * x1f) >> 9;
            edge.put_pair(kl, kr, m);
            kl -= 1;
            kr += 1;
        }

        if !self.inverted {
            return edge.clear_outside(kl + 1, kr);
        }
        MaskResult::Changed
    }
}
