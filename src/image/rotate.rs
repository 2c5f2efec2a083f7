use crate::color::{PixelColor, mix};
use crate::foundation::core::{Area, Coord, OPA_COVER, Opa, Point};
use crate::foundation::math::{TRIG_SHIFT, trig_cos, trig_sin};
use crate::image::{ColorFormat, Image, chroma_key};

/// Zoom factor meaning "no zoom" (256 = 1.0).
pub const ZOOM_NONE: u16 = 256;

/// One resampled source pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sample<C> {
    /// Interpolated color.
    pub color: C,
    /// Interpolated opacity.
    pub opa: Opa,
}

/// Precomputed rotation/zoom of one image around `pivot`.
///
/// Destination pixel centers are mapped back into the source in Q8 fixed point; the
/// fractional part picks at most one neighbor per axis to blend with.
#[derive(Debug)]
pub struct RotateDsc<'i, C, D> {
    img: &'i Image<C, D>,
    pivot: Point,
    // Q15 sine/cosine of -angle, divided by the zoom
    sinma: i64,
    cosma: i64,
    tint: C,
    chroma_key: Option<C>,
}

impl<'i, C: PixelColor, D: AsRef<[u8]>> RotateDsc<'i, C, D> {
    /// Rotate by `angle` degrees (clockwise) and scale by `zoom / 256` around `pivot`
    /// (image-relative pixel). `tint` colors alpha-only formats.
    pub fn new(img: &'i Image<C, D>, angle: i32, zoom: u16, pivot: Point, tint: C) -> Self {
        let zoom = i64::from(zoom.max(1));
        let angle = angle.rem_euclid(360);
        let sinma = i64::from(trig_sin(-angle)) * i64::from(ZOOM_NONE) / zoom;
        let cosma = i64::from(trig_cos(-angle)) * i64::from(ZOOM_NONE) / zoom;
        let chroma_key =
            (img.header().cf == ColorFormat::TrueColorChromaKeyed).then(chroma_key::<C>);
        Self {
            img,
            pivot,
            sinma,
            cosma,
            tint,
            chroma_key,
        }
    }

    fn read(&self, x: Coord, y: Coord) -> (C, Opa) {
        let img = self.img;
        match img.header().cf {
            ColorFormat::TrueColor | ColorFormat::TrueColorChromaKeyed => {
                let off = img.native_offset(x, y);
                (C::read_bytes(&img.data()[off..]), OPA_COVER)
            }
            ColorFormat::TrueColorAlpha => {
                let off = img.native_offset(x, y);
                (C::read_bytes(&img.data()[off..]), img.data()[off + C::BYTES])
            }
            _ => (img.px_color(x, y, self.tint), img.px_alpha(x, y)),
        }
    }

    fn is_keyed(&self, c: C) -> bool {
        self.chroma_key == Some(c)
    }

    /// Blend `(c, a)` with the neighbor picked by the fraction `f` along one axis.
    fn blend_axis(&self, c: C, a: Opa, f: i64, neighbor: Option<(Coord, Coord)>) -> (C, Opa) {
        let ratio = if f < 0x70 {
            f + 0x80
        } else if f > 0x90 {
            0xFF - f + 0x80
        } else {
            return (c, a);
        };
        let Some((nx, ny)) = neighbor else {
            return (c, a);
        };
        let (nc, na) = self.read(nx, ny);
        if self.is_keyed(nc) {
            return (c, a);
        }
        let r = ratio as Opa;
        let opa = (i64::from(a) * ratio + i64::from(na) * (0xFF - ratio)) >> 8;
        (mix(c, nc, r), opa as Opa)
    }

    /// Sample for destination pixel `(x, y)`, image-relative. `None` when it maps outside
    /// the source or onto a chroma-keyed pixel.
    pub fn sample(&self, x: Coord, y: Coord) -> Option<Sample<C>> {
        let h = self.img.header();
        let xt = i64::from(x - self.pivot.x) << 8;
        let yt = i64::from(y - self.pivot.y) << 8;

        let xs = ((self.cosma * xt - self.sinma * yt) >> TRIG_SHIFT)
            + (i64::from(self.pivot.x) << 8)
            + 0x80;
        let ys = ((self.sinma * xt + self.cosma * yt) >> TRIG_SHIFT)
            + (i64::from(self.pivot.y) << 8)
            + 0x80;

        let xi = xs >> 8;
        let yi = ys >> 8;
        if xi < 0 || yi < 0 || xi >= i64::from(h.w) || yi >= i64::from(h.h) {
            return None;
        }
        let (xi, yi) = (xi as Coord, yi as Coord);
        let (xf, yf) = (xs & 0xFF, ys & 0xFF);

        let (c, a) = self.read(xi, yi);
        if self.is_keyed(c) {
            return None;
        }

        let in_x = |nx: Coord| (nx >= 0 && nx < h.w).then_some((nx, yi));
        let in_y = |ny: Coord| (ny >= 0 && ny < h.h).then_some((xi, ny));
        let step = |f: i64| if f < 0x70 { -1 } else { 1 };

        let (cx, ax) = self.blend_axis(c, a, xf, in_x(xi + step(xf)));
        let (cy, ay) = self.blend_axis(c, a, yf, in_y(yi + step(yf)));

        let opa = ((u16::from(ax) + u16::from(ay)) / 2) as Opa;
        Some(Sample {
            color: mix(cx, cy, 127),
            opa,
        })
    }
}

/// Bounding box (relative to the image's top-left) of a `w` x `h` image rotated by
/// `angle` and zoomed by `zoom / 256` around `pivot`.
pub fn transformed_area(w: Coord, h: Coord, angle: i32, zoom: u16, pivot: Point) -> Area {
    if angle.rem_euclid(360) == 0 && zoom == ZOOM_NONE {
        return Area::new(0, 0, w - 1, h - 1);
    }
    let zoom = i64::from(zoom.max(1));
    let sin = i64::from(trig_sin(angle)) * zoom / i64::from(ZOOM_NONE);
    let cos = i64::from(trig_cos(angle)) * zoom / i64::from(ZOOM_NONE);

    let corners = [(0, 0), (w, 0), (0, h), (w, h)];
    let mut out = Area::new(Coord::MAX, Coord::MAX, Coord::MIN, Coord::MIN);
    for (cx, cy) in corners {
        let dx = i64::from(cx - pivot.x);
        let dy = i64::from(cy - pivot.y);
        let x = ((cos * dx - sin * dy) >> TRIG_SHIFT) as Coord + pivot.x;
        let y = ((sin * dx + cos * dy) >> TRIG_SHIFT) as Coord + pivot.y;
        out.x1 = out.x1.min(x);
        out.y1 = out.y1.min(y);
        out.x2 = out.x2.max(x);
        out.y2 = out.y2.max(y);
    }
    // rounding margin
    out.inflate(1)
}

#[cfg(test)]
#[path = "../../tests/unit/image/rotate.rs"]
mod tests;
