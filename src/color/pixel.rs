use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Opa;

/// A packed destination pixel.
///
/// Every format exposes its red/green/blue channels at native depth so mixing and the
/// saturating blend modes can be written once. Alpha is not part of the pixel: it travels
/// separately as [`Opa`].
pub trait PixelColor: Copy + Debug + Default + PartialEq + Eq + Send + Sync + 'static {
    /// Bits per stored pixel.
    const BITS: u32;
    /// Bytes per stored pixel.
    const BYTES: usize;
    /// Largest value of each of the `[r, g, b]` channels.
    const CHANNEL_MAX: [u8; 3];

    /// Native-depth `[r, g, b]` channels.
    fn channels(self) -> [u8; 3];
    /// Build from native-depth channels; values above [`Self::CHANNEL_MAX`] are clamped.
    fn from_channels(ch: [u8; 3]) -> Self;
    /// Serialize into `out[..Self::BYTES]` (little endian).
    fn write_bytes(self, out: &mut [u8]);
    /// Deserialize from `bytes[..Self::BYTES]` (little endian).
    fn read_bytes(bytes: &[u8]) -> Self;

    /// Build from 8-bit channels.
    fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let max = Self::CHANNEL_MAX;
        Self::from_channels([
            narrow(r, max[0]),
            narrow(g, max[1]),
            narrow(b, max[2]),
        ])
    }

    /// Canonical 8-bit `[r, g, b]`.
    fn to_rgb8(self) -> [u8; 3] {
        let ch = self.channels();
        let max = Self::CHANNEL_MAX;
        [
            widen(ch[0], max[0]),
            widen(ch[1], max[1]),
            widen(ch[2], max[2]),
        ]
    }

    /// Canonical `0xAARRGGBB` with opaque alpha.
    fn to_argb32(self) -> u32 {
        let [r, g, b] = self.to_rgb8();
        0xFF00_0000 | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }

    /// Build from `0xAARRGGBB`, ignoring alpha.
    fn from_argb32(argb: u32) -> Self {
        Self::from_rgb8((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }

    /// Black.
    fn black() -> Self {
        Self::from_channels([0, 0, 0])
    }

    /// White.
    fn white() -> Self {
        Self::from_channels(Self::CHANNEL_MAX)
    }
}

fn narrow(v: u8, max: u8) -> u8 {
    ((u16::from(v) * u16::from(max) + 127) / 255) as u8
}

fn widen(v: u8, max: u8) -> u8 {
    let max = u16::from(max);
    ((u16::from(v.min(max as u8)) * 255 + max / 2) / max) as u8
}

/// Mix `c1` over `c2`: `mix == 255` yields `c1`, `0` yields `c2`.
///
/// This is the only alpha blend in the engine. `mix(c, c, a) == c` for every `a`.
#[inline]
pub fn mix<C: PixelColor>(c1: C, c2: C, mix: Opa) -> C {
    let a = c1.channels();
    let b = c2.channels();
    let m = u32::from(mix);
    let inv = 255 - m;
    let ch = |i: usize| ((u32::from(a[i]) * m + u32::from(b[i]) * inv + 127) / 255) as u8;
    C::from_channels([ch(0), ch(1), ch(2)])
}

/// Mix each channel with its own ratio (sub-pixel rendering).
#[inline]
pub fn mix_channels<C: PixelColor>(c1: C, c2: C, mix: [Opa; 3]) -> C {
    let a = c1.channels();
    let b = c2.channels();
    let ch = |i: usize| {
        let m = u32::from(mix[i]);
        ((u32::from(a[i]) * m + u32::from(b[i]) * (255 - m) + 127) / 255) as u8
    };
    C::from_channels([ch(0), ch(1), ch(2)])
}

/// 8-bit RGB332 pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Color8(pub u8);

impl PixelColor for Color8 {
    const BITS: u32 = 8;
    const BYTES: usize = 1;
    const CHANNEL_MAX: [u8; 3] = [7, 7, 3];

    fn channels(self) -> [u8; 3] {
        [self.0 >> 5, (self.0 >> 2) & 0x7, self.0 & 0x3]
    }

    fn from_channels(ch: [u8; 3]) -> Self {
        Self((ch[0].min(7) << 5) | (ch[1].min(7) << 2) | ch[2].min(3))
    }

    fn write_bytes(self, out: &mut [u8]) {
        out[0] = self.0;
    }

    fn read_bytes(bytes: &[u8]) -> Self {
        Self(bytes[0])
    }
}

/// 16-bit RGB565 pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Color16(pub u16);

impl PixelColor for Color16 {
    const BITS: u32 = 16;
    const BYTES: usize = 2;
    const CHANNEL_MAX: [u8; 3] = [31, 63, 31];

    fn channels(self) -> [u8; 3] {
        [
            (self.0 >> 11) as u8,
            ((self.0 >> 5) & 0x3F) as u8,
            (self.0 & 0x1F) as u8,
        ]
    }

    fn from_channels(ch: [u8; 3]) -> Self {
        let r = u16::from(ch[0].min(31));
        let g = u16::from(ch[1].min(63));
        let b = u16::from(ch[2].min(31));
        Self((r << 11) | (g << 5) | b)
    }

    fn write_bytes(self, out: &mut [u8]) {
        out[..2].copy_from_slice(&self.0.to_le_bytes());
    }

    fn read_bytes(bytes: &[u8]) -> Self {
        Self(u16::from_le_bytes([bytes[0], bytes[1]]))
    }
}

/// 32-bit ARGB8888 pixel. The alpha byte is always stored as `0xFF`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Color32(pub u32);

impl Default for Color32 {
    fn default() -> Self {
        Self(0xFF00_0000)
    }
}

impl PixelColor for Color32 {
    const BITS: u32 = 32;
    const BYTES: usize = 4;
    const CHANNEL_MAX: [u8; 3] = [255, 255, 255];

    fn channels(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    fn from_channels(ch: [u8; 3]) -> Self {
        Self(0xFF00_0000 | (u32::from(ch[0]) << 16) | (u32::from(ch[1]) << 8) | u32::from(ch[2]))
    }

    fn write_bytes(self, out: &mut [u8]) {
        out[..4].copy_from_slice(&self.0.to_le_bytes());
    }

    fn read_bytes(bytes: &[u8]) -> Self {
        Self(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0xFF]))
    }

    fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_channels([r, g, b])
    }

    fn to_rgb8(self) -> [u8; 3] {
        self.channels()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/pixel.rs"]
mod tests;
