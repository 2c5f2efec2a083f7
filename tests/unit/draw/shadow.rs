use super::*;
use crate::color::Color32;
use crate::foundation::config::RasterOpts;
use crate::mask::BitmapMask;

const BLACK: Color32 = Color32(0xFF00_0000);
const WHITE: Color32 = Color32(0xFFFF_FFFF);

fn shadow(width: Coord) -> ShadowDsc<Color32> {
    ShadowDsc {
        color: WHITE,
        width,
        ofs_x: 0,
        ofs_y: 0,
        spread: 0,
        opa: OPA_COVER,
    }
}

#[test]
fn unblurred_corner_is_the_radius_coverage() {
    let r = 6;
    let buf = shadow_corner_buf(r, 0);
    assert_eq!(buf.len(), (r * r) as usize);

    let mask = RadiusMask::new(Area::new(-50, 0, r - 1, 50), r, false);
    for y in 0..r {
        let mut want = vec![OPA_COVER; r as usize];
        if mask.apply(&mut want, 0, y) == MaskResult::FullTransp {
            want.fill(0);
        }
        let got = &buf[(y * r) as usize..((y + 1) * r) as usize];
        assert_eq!(got, &want[..], "row {y}");
    }
    assert_eq!(shadow_corner_buf(r, 1), buf);
}

#[test]
fn blurred_corner_fades_outward() {
    let (r, sw) = (4, 8);
    let n = (r + sw) as usize;
    let buf = shadow_corner_buf(r, sw);
    assert_eq!(buf.len(), n * n);
    // innermost sample is fully inside, outermost fully outside
    assert_eq!(buf[(n - 1) * n], 255);
    assert_eq!(buf[n - 1], 0);
    for y in 0..n {
        for x in 1..n {
            let (inner, outer) = (buf[y * n + x - 1], buf[y * n + x]);
            assert!(outer <= inner.saturating_add(3), "row {y} col {x}: {inner} -> {outer}");
        }
    }
    for x in 0..n {
        for y in 1..n {
            let (outer, inner) = (buf[(y - 1) * n + x], buf[y * n + x]);
            assert!(outer <= inner.saturating_add(3), "col {x} row {y}: {outer} -> {inner}");
        }
    }
}

#[test]
fn shadow_stays_inside_its_outline() {
    let mut px = vec![BLACK; 60 * 60];
    let area = Area::from_size(0, 0, 60, 60);
    let mut surf = Surface::new(&mut px, area).unwrap();
    let mut ctx = DrawCtx::default();
    let coords = Area::new(20, 20, 39, 39);
    draw_shadow(&mut ctx, &mut surf, &area, &coords, 5, &shadow(10));

    let outline = coords.inflate(5);
    for y in 0..60 {
        for x in 0..60 {
            if !outline.contains(crate::Point::new(x, y)) {
                assert_eq!(px[(y * 60 + x) as usize], BLACK, "({x},{y})");
            }
        }
    }
    assert_eq!(px[30 * 60 + 30], WHITE);
    assert_eq!(px[15 * 60 + 15], BLACK);
}

#[test]
fn hard_shadow_is_the_offset_shape() {
    let mut px = vec![BLACK; 30 * 30];
    let area = Area::from_size(0, 0, 30, 30);
    let mut surf = Surface::new(&mut px, area).unwrap();
    let mut ctx = DrawCtx::default();
    let dsc = ShadowDsc {
        ofs_x: 5,
        ofs_y: 5,
        ..shadow(0)
    };
    draw_shadow(&mut ctx, &mut surf, &area, &Area::new(10, 10, 19, 19), 0, &dsc);
    let painted = Area::new(15, 15, 24, 24);
    for y in 0..30 {
        for x in 0..30 {
            let want = if painted.contains(crate::Point::new(x, y)) { WHITE } else { BLACK };
            assert_eq!(px[(y * 30 + x) as usize], want, "({x},{y})");
        }
    }
}

#[test]
fn zero_width_shadow_without_offset_is_skipped() {
    let mut px = vec![BLACK; 100];
    let area = Area::from_size(0, 0, 10, 10);
    let mut surf = Surface::new(&mut px, area).unwrap();
    draw_shadow(&mut DrawCtx::default(), &mut surf, &area, &Area::new(2, 2, 7, 7), 0, &shadow(0));
    assert!(px.iter().all(|&c| c == BLACK));
}

#[test]
fn active_masks_clip_the_shadow() {
    let mut px = vec![BLACK; 40 * 40];
    let area = Area::from_size(0, 0, 40, 40);
    let mut surf = Surface::new(&mut px, area).unwrap();
    let mut ctx = DrawCtx::default();
    let block = BitmapMask::new(area, vec![0; 1600]).unwrap();
    ctx.masks_mut().add(block, None);
    draw_shadow(&mut ctx, &mut surf, &area, &Area::new(10, 10, 29, 29), 4, &shadow(6));
    assert!(px.iter().all(|&c| c == BLACK));
}

#[test]
fn single_pixel_blur_is_a_hard_shadow() {
    let render = |width| {
        let mut px = vec![BLACK; 30 * 30];
        let area = Area::from_size(0, 0, 30, 30);
        let mut surf = Surface::new(&mut px, area).unwrap();
        let dsc = ShadowDsc {
            ofs_x: 3,
            ofs_y: 2,
            ..shadow(width)
        };
        draw_shadow(&mut DrawCtx::default(), &mut surf, &area, &Area::new(5, 5, 20, 20), 4, &dsc);
        px
    };
    assert_eq!(render(1), render(0));
}

#[test]
fn oversized_corner_keeps_its_blur() {
    let mut px = vec![BLACK; 140 * 140];
    let area = Area::from_size(0, 0, 140, 140);
    let mut surf = Surface::new(&mut px, area).unwrap();
    let mut ctx = DrawCtx::new(RasterOpts::default().with_shadow_max_size(16));
    let coords = Area::new(20, 20, 119, 119);
    draw_shadow(&mut ctx, &mut surf, &area, &coords, 50, &shadow(10));

    assert_eq!(px[70 * 140 + 70], WHITE);
    // the left edge of the shape is half-faded, not hard
    let edge = px[70 * 140 + 20];
    assert_ne!(edge, WHITE);
    assert_ne!(edge, BLACK);
    let outline = coords.inflate(5);
    for y in 0..140 {
        for x in 0..140 {
            if !outline.contains(crate::Point::new(x, y)) {
                assert_eq!(px[(y * 140 + x) as usize], BLACK, "({x},{y})");
            }
        }
    }
}
