use super::*;
use crate::color::{Color32, mix};
use crate::foundation::config::RasterOpts;
use crate::mask::FadeMask;

const BLACK: Color32 = Color32(0xFF00_0000);
const WHITE: Color32 = Color32(0xFFFF_FFFF);

/// Baseline sits 2 px above the line bottom, so a box with `ofs_y == 0` starts
/// `10 - box_h` px below the pen.
const METRICS: FontMetrics = FontMetrics {
    line_height: 12,
    base_line: 2,
};

fn glyph(w: Coord, h: Coord, bpp: u8) -> GlyphDsc {
    GlyphDsc {
        box_w: w,
        box_h: h,
        ofs_x: 0,
        ofs_y: 0,
        bpp,
        subpixel: false,
    }
}

fn render_with(ctx: &mut DrawCtx, pos: Point, g: &GlyphDsc, bitmap: &[u8], opa: Opa) -> Vec<Color32> {
    let mut px = vec![BLACK; 20 * 20];
    let area = Area::from_size(0, 0, 20, 20);
    let mut surf = Surface::new(&mut px, area).unwrap();
    draw_letter(ctx, &mut surf, &area, pos, g, bitmap, &METRICS, WHITE, opa, BlendMode::Normal);
    px
}

fn render(pos: Point, g: &GlyphDsc, bitmap: &[u8]) -> Vec<Color32> {
    render_with(&mut DrawCtx::default(), pos, g, bitmap, OPA_COVER)
}

fn at(px: &[Color32], x: Coord, y: Coord) -> Color32 {
    px[(y * 20 + x) as usize]
}

#[test]
fn bitmap_size_is_a_continuous_bit_stream() {
    assert_eq!(glyph(8, 8, 1).bitmap_size(), 8);
    assert_eq!(glyph(3, 3, 4).bitmap_size(), 5);
    assert_eq!(glyph(3, 2, 1).bitmap_size(), 1);
    let lcd = GlyphDsc {
        subpixel: true,
        ..glyph(2, 1, 8)
    };
    assert_eq!(lcd.bitmap_size(), 6);
}

#[test]
fn validate_rejects_bad_glyphs() {
    assert!(matches!(
        glyph(2, 2, 3).validate(16),
        Err(RasterError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        glyph(-1, 2, 1).validate(16),
        Err(RasterError::Validation(_))
    ));
    assert!(matches!(
        glyph(8, 8, 8).validate(63),
        Err(RasterError::Validation(_))
    ));
    assert!(glyph(8, 8, 8).validate(64).is_ok());
}

#[test]
fn glyph_is_placed_from_the_metrics() {
    let px = render(Point::new(5, 5), &glyph(1, 1, 1), &[0x80]);
    // y = 5 + (12 - 2) - 1 - 0
    assert_eq!(at(&px, 5, 14), WHITE);
    assert_eq!(px.iter().filter(|&&c| c != BLACK).count(), 1);

    let shifted = GlyphDsc {
        ofs_x: 2,
        ofs_y: 3,
        ..glyph(1, 1, 1)
    };
    let px = render(Point::new(5, 5), &shifted, &[0x80]);
    assert_eq!(at(&px, 7, 11), WHITE);
}

#[test]
fn rows_are_not_byte_padded() {
    // rows "101" and "011" back to back
    let px = render(Point::new(0, 0), &glyph(3, 2, 1), &[0b1010_1100]);
    let y0 = 8;
    let got: Vec<bool> = [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        .iter()
        .map(|&(x, y)| at(&px, x, y0 + y) == WHITE)
        .collect();
    assert_eq!(got, vec![true, false, true, false, true, true]);
}

#[test]
fn four_bpp_codes_expand_to_opacity() {
    let px = render(Point::new(0, 0), &glyph(2, 1, 4), &[0xF8]);
    assert_eq!(at(&px, 0, 9), WHITE);
    assert_eq!(at(&px, 1, 9), mix(WHITE, BLACK, 136));
}

#[test]
fn eight_bpp_codes_are_opacity() {
    let px = render(Point::new(0, 0), &glyph(2, 1, 8), &[0, 200]);
    assert_eq!(at(&px, 0, 9), BLACK);
    assert_eq!(at(&px, 1, 9), mix(WHITE, BLACK, 200));
}

#[test]
fn letter_opacity_scales_coverage() {
    let px = render_with(&mut DrawCtx::default(), Point::new(0, 0), &glyph(1, 1, 1), &[0x80], 128);
    assert_eq!(at(&px, 0, 9), mix(WHITE, BLACK, 128));
}

#[test]
fn invalid_glyph_draws_nothing() {
    let px = render(Point::new(0, 0), &glyph(8, 8, 1), &[0xFF; 4]);
    assert!(px.iter().all(|&c| c == BLACK));
    let px = render(Point::new(0, 0), &glyph(2, 2, 5), &[0xFF; 4]);
    assert!(px.iter().all(|&c| c == BLACK));
}

#[test]
fn glyph_is_clipped() {
    let mut px = vec![BLACK; 20 * 20];
    let area = Area::from_size(0, 0, 20, 20);
    let mut surf = Surface::new(&mut px, area).unwrap();
    let g = glyph(8, 1, 1);
    let clip = Area::new(0, 0, 3, 19);
    draw_letter(
        &mut DrawCtx::default(),
        &mut surf,
        &clip,
        Point::new(0, 0),
        &g,
        &[0xFF],
        &METRICS,
        WHITE,
        OPA_COVER,
        BlendMode::Normal,
    );
    assert!((0..4).all(|x| at(&px, x, 9) == WHITE));
    assert!((4..8).all(|x| at(&px, x, 9) == BLACK));
}

#[test]
fn narrow_scratch_row_gives_the_same_result() {
    let bitmap: Vec<u8> = (0..36u8).map(|i| i.wrapping_mul(37)).collect();
    let g = glyph(6, 6, 8);
    let wide = render(Point::new(3, 2), &g, &bitmap);
    let mut narrow_ctx = DrawCtx::new(RasterOpts::default().with_max_row_width(4));
    let narrow = render_with(&mut narrow_ctx, Point::new(3, 2), &g, &bitmap, OPA_COVER);
    assert_eq!(wide, narrow);
}

#[test]
fn masks_apply_to_glyphs() {
    let mut ctx = DrawCtx::default();
    ctx.masks_mut()
        .add(FadeMask::new(Area::new(0, 0, 19, 19), 128, 0, 128, 19), None);
    let px = render_with(&mut ctx, Point::new(0, 0), &glyph(1, 1, 1), &[0x80], OPA_COVER);
    assert_eq!(at(&px, 0, 9), mix(WHITE, BLACK, 127));
}

#[test]
fn subpixel_glyph_mixes_per_channel() {
    let lcd = GlyphDsc {
        subpixel: true,
        ..glyph(1, 1, 8)
    };
    let px = render(Point::new(0, 0), &lcd, &[255, 0, 128]);
    assert_eq!(at(&px, 0, 9), Color32::from_rgb8(255, 0, 128));
}
