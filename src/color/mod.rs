//! Packed pixel formats and the alpha mix.

mod pixel;

pub use pixel::{Color8, Color16, Color32, PixelColor, mix, mix_channels};

/// Default pixel format, chosen by the `color-depth-*` features (32-bit otherwise).
#[cfg(feature = "color-depth-8")]
pub type Color = Color8;
/// Default pixel format, chosen by the `color-depth-*` features (32-bit otherwise).
#[cfg(all(feature = "color-depth-16", not(feature = "color-depth-8")))]
pub type Color = Color16;
/// Default pixel format, chosen by the `color-depth-*` features (32-bit otherwise).
#[cfg(not(any(feature = "color-depth-8", feature = "color-depth-16")))]
pub type Color = Color32;
