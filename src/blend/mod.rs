//! Fill and copy primitives; the only code that writes destination pixels.

mod fill;
mod map;
mod surface;

pub use fill::{fill, fill_subpx};
pub(crate) use fill::masked_opa;
pub use map::map;
pub use surface::Surface;

use serde::{Deserialize, Serialize};

use crate::color::{PixelColor, mix};
use crate::foundation::core::{OPA_MAX, OPA_MIN, Opa};
use crate::mask::MaskResult;

/// How a source color combines with the destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Plain alpha mix.
    #[default]
    Normal,
    /// Channel-wise saturating `dst + src`.
    Additive,
    /// Channel-wise saturating `dst - src`.
    Subtractive,
}

/// A mask evaluation paired with its opacity buffer.
///
/// The buffer of [`MaskRun::Changed`] is laid out over `area ∩ clip` of the call it is
/// passed to, row-major, with that intersection's width as stride.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskRun<'m> {
    /// Nothing is drawn.
    FullTransp,
    /// No per-pixel masking.
    FullCover,
    /// Per-pixel opacities.
    Changed(&'m [Opa]),
}

impl<'m> MaskRun<'m> {
    /// Pair a [`MaskResult`] with the buffer it was computed into.
    pub fn new(res: MaskResult, buf: &'m [Opa]) -> Self {
        match res {
            MaskResult::FullTransp => MaskRun::FullTransp,
            MaskResult::FullCover => MaskRun::FullCover,
            MaskResult::Changed => MaskRun::Changed(buf),
        }
    }
}

/// Combine `fg` onto `bg` with opacity `opa` according to `mode`.
#[inline]
pub fn blend_px<C: PixelColor>(mode: BlendMode, fg: C, bg: C, opa: Opa) -> C {
    let res = match mode {
        BlendMode::Normal => return mix(fg, bg, opa),
        BlendMode::Additive => {
            let (f, b, max) = (fg.channels(), bg.channels(), C::CHANNEL_MAX);
            C::from_channels([
                f[0].saturating_add(b[0]).min(max[0]),
                f[1].saturating_add(b[1]).min(max[1]),
                f[2].saturating_add(b[2]).min(max[2]),
            ])
        }
        BlendMode::Subtractive => {
            let (f, b) = (fg.channels(), bg.channels());
            C::from_channels([
                b[0].saturating_sub(f[0]),
                b[1].saturating_sub(f[1]),
                b[2].saturating_sub(f[2]),
            ])
        }
    };
    if opa < OPA_MIN {
        return bg;
    }
    if opa > OPA_MAX {
        return res;
    }
    mix(res, bg, opa)
}

#[cfg(test)]
#[path = "../../tests/unit/blend/blend.rs"]
mod tests;
