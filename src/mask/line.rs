use serde::{Deserialize, Serialize};

use crate::foundation::core::{Coord, OPA_COVER, OPA_TRANSP, Opa, Point};
use crate::foundation::math::{trig_cos, trig_sin};
use crate::mask::{MaskGen, MaskResult, mask_mix};

/// Which half-plane of a [`LineMask`] survives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineSide {
    /// Pixels with a smaller x than the line.
    Left,
    /// Pixels with a larger x than the line.
    Right,
    /// Pixels with a smaller y than the line.
    Top,
    /// Pixels with a larger y than the line.
    Bottom,
}

/// Anti-aliased half-plane bounded by an infinite line.
///
/// Slopes are kept in Q10: `yx_steep` is Δy per unit x, `xy_steep` Δx per unit y.
/// Internally every configuration reduces to "keep the left side" with an optional
/// inversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineMask {
    origin: Point,
    xy_steep: i64,
    yx_steep: i64,
    flat: bool,
    side: LineSide,
    inv: bool,
}

fn q10_ratio(num: i64, den: i64) -> i64 {
    if den == 0 {
        return 0;
    }
    ((1i64 << 20) / den * num) >> 10
}

impl LineMask {
    /// Line through `p1` and `p2`.
    pub fn from_points(p1: Point, p2: Point, side: LineSide) -> Self {
        let (p1, p2) = if p1.y > p2.y { (p2, p1) } else { (p1, p2) };
        let dx = i64::from(p2.x) - i64::from(p1.x);
        let dy = i64::from(p2.y) - i64::from(p1.y);

        let flat = dx.abs() > dy.abs();
        let yx_steep = q10_ratio(dy, dx);
        let xy_steep = q10_ratio(dx, dy);
        let steep = if flat { yx_steep } else { xy_steep };

        let inv = match side {
            LineSide::Left => false,
            LineSide::Right => true,
            LineSide::Top => steep > 0,
            LineSide::Bottom => steep <= 0,
        };

        Self {
            origin: p1,
            xy_steep,
            yx_steep,
            flat,
            side,
            inv,
        }
    }

    /// Line through `p` at `deg` degrees (clockwise from +x, y pointing down).
    ///
    /// `p` stays the origin, so rounding of the slope grows with distance from `p` only.
    pub fn from_angle(p: Point, deg: i32, side: LineSide) -> Self {
        // keep the helper point below `p` so `from_points` does not swap them
        let deg = deg.rem_euclid(180);
        let p2 = Point::new(p.x + (trig_cos(deg) >> 5), p.y + (trig_sin(deg) >> 5));
        Self::from_points(p, p2, side)
    }

    /// A point on the line.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Kept side.
    pub fn side(&self) -> LineSide {
        self.side
    }

    fn apply_horizontal(&self, ay: i64) -> MaskResult {
        let keep = match self.side {
            LineSide::Left | LineSide::Right => true,
            LineSide::Top => ay < 0,
            LineSide::Bottom => ay >= 0,
        };
        if keep {
            MaskResult::FullCover
        } else {
            MaskResult::FullTransp
        }
    }

    fn apply_vertical(&self, buf: &mut [Opa], ax: i64) -> MaskResult {
        let len = buf.len() as i64;
        // index of the line's column inside `buf`
        let k = -ax;
        match self.side {
            LineSide::Top | LineSide::Bottom => MaskResult::FullCover,
            LineSide::Left => {
                if k >= len {
                    MaskResult::FullCover
                } else if k <= 0 {
                    MaskResult::FullTransp
                } else {
                    buf[k as usize..].fill(OPA_TRANSP);
                    MaskResult::Changed
                }
            }
            LineSide::Right => {
                if k <= 0 {
                    MaskResult::FullCover
                } else if k >= len {
                    MaskResult::FullTransp
                } else {
                    buf[..k as usize].fill(OPA_TRANSP);
                    MaskResult::Changed
                }
            }
        }
    }

    /// Coverage (of the left side) of column `x` in row `ay`, both origin-relative.
    fn coverage(&self, x: i64, ay: i64) -> i64 {
        let c = if self.flat {
            // line y at the column center, Q8
            let yc = ((2 * x + 1) * self.yx_steep * 128) >> 10;
            if self.yx_steep > 0 {
                ((ay + 1) << 8) - yc
            } else {
                yc - (ay << 8)
            }
        } else {
            let xc = ((2 * ay + 1) * self.xy_steep * 128) >> 10;
            xc - (x << 8)
        };
        c.clamp(0, 255)
    }
}

impl MaskGen for LineMask {
    fn apply(&self, buf: &mut [Opa], abs_x: Coord, abs_y: Coord) -> MaskResult {
        let ax = i64::from(abs_x) - i64::from(self.origin.x);
        let ay = i64::from(abs_y) - i64::from(self.origin.y);
        let len = buf.len() as i64;

        if self.flat && self.yx_steep == 0 {
            return self.apply_horizontal(ay);
        }
        if !self.flat && self.xy_steep == 0 {
            return self.apply_vertical(buf, ax);
        }

        // Columns `lo..=hi` hold the transition band; everything left of it is kept.
        let (lo, hi) = if self.flat {
            let xa = (ay * self.xy_steep) >> 10;
            let xb = ((ay + 1) * self.xy_steep) >> 10;
            (xa.min(xb) - 1, xa.max(xb) + 1)
        } else {
            let xc = ((2 * ay + 1) * self.xy_steep * 128) >> 10;
            (xc >> 8, xc >> 8)
        };

        if hi < ax {
            return if self.inv {
                MaskResult::FullCover
            } else {
                MaskResult::FullTransp
            };
        }
        if lo >= ax + len {
            return if self.inv {
                MaskResult::FullTransp
            } else {
                MaskResult::FullCover
            };
        }

        let band_start = (lo - ax).clamp(0, len) as usize;
        let band_end = (hi - ax + 1).clamp(0, len) as usize;

        if self.inv {
            buf[..band_start].fill(OPA_TRANSP);
        } else {
            buf[band_end..].fill(OPA_TRANSP);
        }

        for (i, px) in buf[band_start..band_end].iter_mut().enumerate() {
            let x = ax + (band_start + i) as i64;
            let mut m = self.coverage(x, ay) as Opa;
            if self.inv {
                m = OPA_COVER - m;
            }
            *px = mask_mix(*px, m);
        }
        MaskResult::Changed
    }
}
