//! Software raster compositing: anti-aliased clip masks, masked fill/copy with blend
//! modes, per-format image access with rotation/zoom, and the shape, glyph, line and
//! image composers built on top of them.
//!
//! All drawing goes through a [`DrawCtx`] (mask registry plus scratch rows) into a
//! [`Surface`] window of the destination buffer.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod blend;
pub mod color;
pub mod draw;
pub mod foundation;
pub mod image;
pub mod mask;

pub use blend::{BlendMode, MaskRun, Surface, blend_px, fill, fill_subpx, map};
pub use color::{Color, Color8, Color16, Color32, PixelColor, mix};
pub use draw::{
    ArcDsc, DrawCtx, FontMetrics, GlyphDsc, GradDir, ImgDsc, LineDsc, RectDsc, ShadowDsc,
    draw_arc, draw_img, draw_letter, draw_line, draw_rect, draw_shadow, shadow_corner_buf,
};
pub use foundation::config::RasterOpts;
pub use foundation::core::{
    Area, Coord, MAX_MASKS, OPA_50, OPA_COVER, OPA_MAX, OPA_MIN, OPA_TRANSP, Opa, Point,
};
pub use foundation::error::{RasterError, RasterResult};
pub use image::{ColorFormat, Image, ImageBuf, ImageHeader, ImageRef, RotateDsc};
pub use mask::{
    AngleMask, BitmapMask, FadeMask, LineMask, LineSide, MaskContext, MaskGen, MaskId,
    MaskParam, MaskResult, MaskScope, OwnerTag, RadiusMask, mask_mix,
};
