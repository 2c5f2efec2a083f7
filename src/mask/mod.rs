//! Mask generators and the registry that folds them over pixel runs.

mod angle;
mod bitmap;
mod context;
mod fade;
mod line;
mod radius;

pub use angle::AngleMask;
pub use bitmap::BitmapMask;
pub use context::{MaskContext, MaskId, MaskScope, OwnerTag};
pub use fade::FadeMask;
pub use line::{LineMask, LineSide};
pub use radius::RadiusMask;

use crate::foundation::core::{Coord, OPA_MAX, OPA_MIN, Opa};

/// Outcome of evaluating masks over a pixel run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaskResult {
    /// Nothing in the run is visible.
    FullTransp,
    /// The run is untouched by masking.
    FullCover,
    /// The opacity buffer was written and must be consulted.
    Changed,
}

/// Multiply a mask value into an accumulated opacity.
///
/// Near-opaque values keep `act`, near-transparent ones clear it.
#[inline]
pub fn mask_mix(act: Opa, new: Opa) -> Opa {
    if new > OPA_MAX {
        return act;
    }
    if new < OPA_MIN {
        return 0;
    }
    ((u16::from(act) * u16::from(new)) >> 8) as Opa
}

/// A mask generator over one horizontal run.
pub trait MaskGen {
    /// Fold this mask into `buf`, the run starting at `(abs_x, abs_y)`.
    ///
    /// Implementations only ever lower values in `buf`. When returning
    /// [`MaskResult::FullTransp`] the buffer content is unspecified.
    fn apply(&self, buf: &mut [Opa], abs_x: Coord, abs_y: Coord) -> MaskResult;
}

/// Every mask kind the engine knows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaskParam {
    /// Half-plane.
    Line(LineMask),
    /// Rounded rectangle.
    Radius(RadiusMask),
    /// Pie slice.
    Angle(AngleMask),
    /// Vertical ramp.
    Fade(FadeMask),
    /// Opacity bitmap.
    Bitmap(BitmapMask),
}

impl MaskParam {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MaskParam::Line(_) => "line",
            MaskParam::Radius(_) => "radius",
            MaskParam::Angle(_) => "angle",
            MaskParam::Fade(_) => "fade",
            MaskParam::Bitmap(_) => "bitmap",
        }
    }
}

impl MaskGen for MaskParam {
    fn apply(&self, buf: &mut [Opa], abs_x: Coord, abs_y: Coord) -> MaskResult {
        match self {
            MaskParam::Line(m) => m.apply(buf, abs_x, abs_y),
            MaskParam::Radius(m) => m.apply(buf, abs_x, abs_y),
            MaskParam::Angle(m) => m.apply(buf, abs_x, abs_y),
            MaskParam::Fade(m) => m.apply(buf, abs_x, abs_y),
            MaskParam::Bitmap(m) => m.apply(buf, abs_x, abs_y),
        }
    }
}

impl From<LineMask> for MaskParam {
    fn from(m: LineMask) -> Self {
        MaskParam::Line(m)
    }
}

impl From<RadiusMask> for MaskParam {
    fn from(m: RadiusMask) -> Self {
        MaskParam::Radius(m)
    }
}

impl From<AngleMask> for MaskParam {
    fn from(m: AngleMask) -> Self {
        MaskParam::Angle(m)
    }
}

impl From<FadeMask> for MaskParam {
    fn from(m: FadeMask) -> Self {
        MaskParam::Fade(m)
    }
}

impl From<BitmapMask> for MaskParam {
    fn from(m: BitmapMask) -> Self {
        MaskParam::Bitmap(m)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/generators.rs"]
mod tests;
