use crate::blend::{BlendMode, Surface};
use crate::color::{PixelColor, mix};
use crate::draw::{DrawCtx, Painter};
use crate::foundation::core::{Area, Coord, OPA_COVER, OPA_MIN, OPA_TRANSP, Opa, Point};
use crate::image::{ColorFormat, Image, RotateDsc, ZOOM_NONE, chroma_key, transformed_area};

/// How an image is placed and tinted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImgDsc<C> {
    /// Overall opacity.
    pub opa: Opa,
    /// Clockwise rotation in degrees.
    pub angle: i32,
    /// Scale, 256 = 1.0.
    pub zoom: u16,
    /// Rotation/zoom center relative to the image; `None` is the image center.
    pub pivot: Option<Point>,
    /// Recolor target; also the color of alpha-only images.
    pub recolor: C,
    /// Strength of the recolor (`0` keeps the image colors).
    pub recolor_opa: Opa,
    /// Blend mode.
    pub blend_mode: BlendMode,
}

impl<C: PixelColor> Default for ImgDsc<C> {
    fn default() -> Self {
        Self {
            opa: OPA_COVER,
            angle: 0,
            zoom: ZOOM_NONE,
            pivot: None,
            recolor: C::black(),
            recolor_opa: OPA_TRANSP,
            blend_mode: BlendMode::Normal,
        }
    }
}

impl<C> ImgDsc<C> {
    fn is_transformed(&self) -> bool {
        self.angle.rem_euclid(360) != 0 || self.zoom != ZOOM_NONE
    }
}

/// Draw `img` with its top-left corner at `coords.x1, coords.y1`.
///
/// Untransformed images are also clipped to `coords`; a rotated or zoomed image covers
/// its transformed bounding box.
#[tracing::instrument(level = "trace", skip_all, fields(coords = ?coords, cf = ?img.header().cf))]
pub fn draw_img<C: PixelColor, D: AsRef<[u8]>>(
    ctx: &mut DrawCtx,
    surf: &mut Surface<'_, C>,
    clip: &Area,
    coords: &Area,
    img: &Image<C, D>,
    dsc: &ImgDsc<C>,
) {
    if dsc.opa < OPA_MIN || coords.is_empty() {
        return;
    }
    if dsc.zoom == 0 {
        tracing::warn!("image zoom of 0, nothing drawn");
        return;
    }
    let hdr = *img.header();
    let pivot = dsc.pivot.unwrap_or(Point::new(hdr.w / 2, hdr.h / 2));
    let transformed = dsc.is_transformed();
    let img_area = if transformed {
        transformed_area(hdr.w, hdr.h, dsc.angle, dsc.zoom, pivot).translate(coords.x1, coords.y1)
    } else {
        let Some(a) = Area::from_size(coords.x1, coords.y1, hdr.w, hdr.h).intersect(coords) else {
            return;
        };
        a
    };

    let Some(mut painter) = Painter::new(surf, clip, dsc.blend_mode) else {
        return;
    };
    let Some(draw) = img_area.intersect(&painter.clip) else {
        return;
    };

    let rot = transformed.then(|| RotateDsc::new(img, dsc.angle, dsc.zoom, pivot, dsc.recolor));
    let key = (hdr.cf == ColorFormat::TrueColorChromaKeyed).then(chroma_key::<C>);
    let recolor = dsc.recolor_opa >= OPA_MIN && !hdr.cf.is_alpha_only();
    let has_alpha = transformed || key.is_some() || hdr.cf.has_alpha();

    let w = draw.width() as usize;
    let mut colors = vec![C::default(); w];
    let mut alpha = vec![OPA_COVER; w];
    let (masks, scratch) = ctx.parts();

    for y in draw.y1..=draw.y2 {
        let iy = y - coords.y1;
        for (i, (c, a)) in colors.iter_mut().zip(alpha.iter_mut()).enumerate() {
            let ix = draw.x1 + i as Coord - coords.x1;
            let (mut px, opa) = match &rot {
                Some(rot) => rot
                    .sample(ix, iy)
                    .map_or((C::default(), OPA_TRANSP), |s| (s.color, s.opa)),
                None => {
                    let px = img.px_color(ix, iy, dsc.recolor);
                    let opa = match key {
                        Some(k) if k == px => OPA_TRANSP,
                        _ => img.px_alpha(ix, iy),
                    };
                    (px, opa)
                }
            };
            if recolor {
                px = mix(dsc.recolor, px, dsc.recolor_opa);
            }
            *c = px;
            *a = opa;
        }
        let alpha_row = has_alpha.then_some(alpha.as_slice());
        painter.map_row_masked(masks, scratch, (draw.x1, y), &colors, alpha_row, dsc.opa);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/img.rs"]
mod tests;
