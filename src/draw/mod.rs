//! Shape, glyph, line and image composers built on masks and the blend primitives.

mod arc;
mod glyph;
mod img;
mod line;
mod rect;
mod shadow;

pub use arc::{ArcDsc, draw_arc};
pub use glyph::{FontMetrics, GlyphDsc, draw_letter};
pub use img::{ImgDsc, draw_img};
pub use line::{LineDsc, draw_line};
pub use rect::{GradDir, RectDsc, draw_rect};
pub use shadow::{ShadowDsc, draw_shadow, shadow_corner_buf};

use crate::blend::{self, BlendMode, MaskRun, Surface};
use crate::color::PixelColor;
use crate::foundation::config::RasterOpts;
use crate::foundation::core::{Area, Coord, OPA_COVER, Opa};
use crate::mask::{MaskContext, MaskResult};

/// Per-renderer drawing state: the mask registry and reusable scratch rows.
#[derive(Debug)]
pub struct DrawCtx {
    masks: MaskContext,
    opa_buf: Vec<Opa>,
    opts: RasterOpts,
}

impl Default for DrawCtx {
    fn default() -> Self {
        Self::new(RasterOpts::default())
    }
}

impl DrawCtx {
    /// Context with an opacity scratch row of `opts.max_row_width`.
    pub fn new(opts: RasterOpts) -> Self {
        Self {
            masks: MaskContext::new(),
            opa_buf: vec![OPA_COVER; opts.max_row_width.max(1)],
            opts,
        }
    }

    /// Active masks.
    pub fn masks(&self) -> &MaskContext {
        &self.masks
    }

    /// Active masks, for registering clip shapes around several draw calls.
    pub fn masks_mut(&mut self) -> &mut MaskContext {
        &mut self.masks
    }

    /// Options this context was built with.
    pub fn opts(&self) -> &RasterOpts {
        &self.opts
    }

    /// Split borrow: registry plus scratch row.
    pub(crate) fn parts(&mut self) -> (&mut MaskContext, &mut [Opa]) {
        (&mut self.masks, &mut self.opa_buf)
    }
}

/// Destination plus clip and blend mode shared by the rows of one draw call.
pub(crate) struct Painter<'s, 'b, C> {
    pub(crate) surf: &'s mut Surface<'b, C>,
    pub(crate) clip: Area,
    pub(crate) mode: BlendMode,
}

impl<'s, 'b, C: PixelColor> Painter<'s, 'b, C> {
    /// Painter clipped to `clip ∩ surface`; `None` when nothing is visible.
    pub(crate) fn new(surf: &'s mut Surface<'b, C>, clip: &Area, mode: BlendMode) -> Option<Self> {
        let clip = clip.intersect(&surf.area())?;
        Some(Self { surf, clip, mode })
    }

    /// Unmasked fill of `area`.
    pub(crate) fn fill(&mut self, area: &Area, color: C, opa: Opa) {
        blend::fill(
            self.surf,
            &self.clip,
            area,
            color,
            opa,
            MaskRun::FullCover,
            self.mode,
        );
    }

    /// Fill `x1..=x2` of row `y` through every mask in `masks`, in scratch-sized chunks.
    pub(crate) fn fill_row_masked(
        &mut self,
        masks: &MaskContext,
        scratch: &mut [Opa],
        (x1, x2, y): (Coord, Coord, Coord),
        color: C,
        opa: Opa,
    ) {
        let Some(run) = Area::new(x1, y, x2, y).intersect(&self.clip) else {
            return;
        };
        let chunk = scratch.len() as Coord;
        let mut x = run.x1;
        while x <= run.x2 {
            let end = (x + chunk - 1).min(run.x2);
            let buf = &mut scratch[..(end - x + 1) as usize];
            buf.fill(OPA_COVER);
            let res = masks.apply(buf, x, y);
            blend::fill(
                self.surf,
                &self.clip,
                &Area::new(x, y, end, y),
                color,
                opa,
                MaskRun::new(res, buf),
                self.mode,
            );
            x = end + 1;
        }
    }

    /// Blend the row `src` starting at `(x1, y)` through `masks`.
    ///
    /// `alpha`, when given, is the per-pixel source opacity (same length as `src`) and
    /// seeds the mask buffer instead of [`OPA_COVER`].
    pub(crate) fn map_row_masked(
        &mut self,
        masks: &MaskContext,
        scratch: &mut [Opa],
        (x1, y): (Coord, Coord),
        src: &[C],
        alpha: Option<&[Opa]>,
        opa: Opa,
    ) {
        if src.is_empty() {
            return;
        }
        let row = Area::new(x1, y, x1 + src.len() as Coord - 1, y);
        let Some(run) = row.intersect(&self.clip) else {
            return;
        };
        let chunk = scratch.len() as Coord;
        let mut x = run.x1;
        while x <= run.x2 {
            let end = (x + chunk - 1).min(run.x2);
            let (s, e) = ((x - x1) as usize, (end - x1) as usize + 1);
            let buf = &mut scratch[..e - s];
            match alpha {
                Some(a) => buf.copy_from_slice(&a[s..e]),
                None => buf.fill(OPA_COVER),
            }
            let res = if masks.is_empty() {
                MaskResult::FullCover
            } else {
                masks.apply(buf, x, y)
            };
            // the seeded alpha still has to be consulted
            let res = match (res, alpha) {
                (MaskResult::FullCover, Some(_)) => MaskResult::Changed,
                (res, _) => res,
            };
            blend::map(
                self.surf,
                &self.clip,
                &Area::new(x, y, end, y),
                &src[s..e],
                opa,
                MaskRun::new(res, buf),
                self.mode,
            );
            x = end + 1;
        }
    }
}
