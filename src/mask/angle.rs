use crate::foundation::core::{Coord, OPA_COVER, OPA_TRANSP, Opa, Point};
use crate::foundation::math::{trig_cos, trig_sin};
use crate::mask::line::{LineMask, LineSide};
use crate::mask::{MaskGen, MaskResult, mask_mix};

const UNION_CHUNK: usize = 256;

/// Pie-slice clip around `vertex`, from `start` to `end` degrees.
///
/// Angles run clockwise from +x (y grows downward). A sweep up to 180° is the
/// intersection of two half-planes; a wider sweep is their union.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AngleMask {
    vertex: Point,
    start: i32,
    sweep: i32,
    start_line: LineMask,
    end_line: LineMask,
}

/// Half-plane bounded by the ray at `deg`, keeping the clockwise side when `keep_cw`.
fn half_plane(vertex: Point, deg: i32, keep_cw: bool) -> LineMask {
    let dx = trig_cos(deg);
    let dy = trig_sin(deg);
    let side = if dx.abs() > dy.abs() {
        if (dx > 0) == keep_cw {
            LineSide::Bottom
        } else {
            LineSide::Top
        }
    } else if (dy > 0) == keep_cw {
        LineSide::Left
    } else {
        LineSide::Right
    };
    LineMask::from_angle(vertex, deg, side)
}

impl AngleMask {
    /// Wedge from `start` to `end` degrees (clockwise). `end - start >= 360` is a full turn.
    pub fn new(vertex: Point, start: i32, end: i32) -> Self {
        let s = start.rem_euclid(360);
        let e = end.rem_euclid(360);
        let sweep = if i64::from(end) - i64::from(start) >= 360 {
            360
        } else if e >= s {
            e - s
        } else {
            360 - s + e
        };
        Self {
            vertex,
            start: s,
            sweep,
            start_line: half_plane(vertex, s, true),
            end_line: half_plane(vertex, e, false),
        }
    }

    /// Normalized start angle.
    pub fn start(&self) -> i32 {
        self.start
    }

    /// Swept angle, `0..=360`.
    pub fn sweep(&self) -> i32 {
        self.sweep
    }

    /// The vertex of the wedge.
    pub fn vertex(&self) -> Point {
        self.vertex
    }

    fn apply_intersection(&self, buf: &mut [Opa], abs_x: Coord, abs_y: Coord) -> MaskResult {
        let a = self.start_line.apply(buf, abs_x, abs_y);
        if a == MaskResult::FullTransp {
            return a;
        }
        let b = self.end_line.apply(buf, abs_x, abs_y);
        match (a, b) {
            (_, MaskResult::FullTransp) => MaskResult::FullTransp,
            (MaskResult::FullCover, MaskResult::FullCover) => MaskResult::FullCover,
            _ => MaskResult::Changed,
        }
    }

    fn apply_union(&self, buf: &mut [Opa], abs_x: Coord, abs_y: Coord) -> MaskResult {
        let mut all_cover = true;
        let mut all_transp = true;
        let mut x = abs_x;

        for chunk in buf.chunks_mut(UNION_CHUNK) {
            let n = chunk.len();
            let mut a = [OPA_COVER; UNION_CHUNK];
            let mut b = [OPA_COVER; UNION_CHUNK];
            let ra = self.start_line.apply(&mut a[..n], x, abs_y);
            let rb = if ra == MaskResult::FullCover {
                MaskResult::FullCover
            } else {
                self.end_line.apply(&mut b[..n], x, abs_y)
            };
            x += n as Coord;

            if ra == MaskResult::FullCover || rb == MaskResult::FullCover {
                all_transp = false;
                continue;
            }
            all_cover = false;
            if ra == MaskResult::FullTransp && rb == MaskResult::FullTransp {
                chunk.fill(OPA_TRANSP);
                continue;
            }
            all_transp = false;
            for (i, px) in chunk.iter_mut().enumerate() {
                let va = if ra == MaskResult::FullTransp { 0 } else { a[i] };
                let vb = if rb == MaskResult::FullTransp { 0 } else { b[i] };
                *px = mask_mix(*px, va.max(vb));
            }
        }

        if all_cover {
            MaskResult::FullCover
        } else if all_transp {
            MaskResult::FullTransp
        } else {
            MaskResult::Changed
        }
    }
}

impl MaskGen for AngleMask {
    fn apply(&self, buf: &mut [Opa], abs_x: Coord, abs_y: Coord) -> MaskResult {
        match self.sweep {
            0 => MaskResult::FullTransp,
            360 => MaskResult::FullCover,
            s if s <= 180 => self.apply_intersection(buf, abs_x, abs_y),
            _ => self.apply_union(buf, abs_x, abs_y),
        }
    }
}
