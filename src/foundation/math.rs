//! Integer trigonometry, square roots and fixed-point helpers.

/// Fixed-point scale of [`trig_sin`] results (`1 << TRIG_SHIFT` is 1.0).
pub const TRIG_SHIFT: u32 = 15;

const SIN_TABLE: [i32; 91] = [
    0, 572, 1144, 1715, 2286, 2856, 3425, 3993, 4560, 5126, //
    5690, 6252, 6813, 7371, 7927, 8481, 9032, 9580, 10126, 10668, //
    11207, 11743, 12275, 12803, 13328, 13848, 14365, 14876, 15384, 15886, //
    16384, 16877, 17364, 17847, 18324, 18795, 19261, 19720, 20174, 20622, //
    21063, 21498, 21926, 22348, 22763, 23170, 23571, 23965, 24351, 24730, //
    25102, 25466, 25822, 26170, 26510, 26842, 27166, 27482, 27789, 28088, //
    28378, 28660, 28932, 29197, 29452, 29698, 29935, 30163, 30382, 30592, //
    30792, 30983, 31164, 31336, 31499, 31651, 31795, 31928, 32052, 32166, //
    32270, 32365, 32449, 32524, 32588, 32643, 32688, 32723, 32748, 32763, //
    32768,
];

/// Sine of `deg` degrees in Q15 fixed point (`-32768..=32768`).
pub fn trig_sin(deg: i32) -> i32 {
    let a = deg.rem_euclid(360) as usize;
    match a {
        0..=90 => SIN_TABLE[a],
        91..=180 => SIN_TABLE[180 - a],
        181..=270 => -SIN_TABLE[a - 180],
        _ => -SIN_TABLE[360 - a],
    }
}

/// Cosine of `deg` degrees in Q15 fixed point.
pub fn trig_cos(deg: i32) -> i32 {
    trig_sin(deg.rem_euclid(360) + 90)
}

/// Square root split into integer part and an 8-bit fraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SqrtQ8 {
    /// Integer part.
    pub int: i32,
    /// Fractional part, `0..=255`.
    pub frac: i32,
}

/// `sqrt(x)` with 8 fractional bits. Negative inputs are treated as zero.
pub fn sqrt_q8(x: i64) -> SqrtQ8 {
    let root = ((x.max(0) as u64) << 16).isqrt() as i64;
    SqrtQ8 {
        int: (root >> 8) as i32,
        frac: (root & 0xFF) as i32,
    }
}

/// `round(x * y / 255)`: scales an 8-bit value by an opacity, exact at 0 and 255.
pub fn mul_div255(x: u8, y: u8) -> u8 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
