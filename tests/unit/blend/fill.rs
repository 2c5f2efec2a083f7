use super::*;
use crate::color::{Color32, mix};

const RED: Color32 = Color32(0xFFFF_0000);
const BLACK: Color32 = Color32(0xFF00_0000);

fn canvas(w: i32, h: i32) -> (Vec<Color32>, Area) {
    (vec![BLACK; (w * h) as usize], Area::from_size(0, 0, w, h))
}

#[test]
fn opaque_fill_covers_every_pixel() {
    let (mut px, area) = canvas(10, 10);
    let mut surf = Surface::new(&mut px, area).unwrap();
    fill(&mut surf, &area, &Area::new(0, 0, 9, 9), RED, OPA_COVER, MaskRun::FullCover, BlendMode::Normal);
    assert!(px.iter().all(|&c| c == RED));
}

#[test]
fn translucent_fill_matches_mix_everywhere() {
    let (mut px, area) = canvas(10, 10);
    let mut surf = Surface::new(&mut px, area).unwrap();
    fill(&mut surf, &area, &Area::new(0, 0, 9, 9), RED, 128, MaskRun::FullCover, BlendMode::Normal);
    let want = mix(RED, BLACK, 128);
    assert!(px.iter().all(|&c| c == want));
}

#[test]
fn fill_stays_inside_clip_and_surface() {
    let (mut px, area) = canvas(10, 10);
    let mut surf = Surface::new(&mut px, area).unwrap();
    let clip = Area::new(2, 2, 4, 4);
    fill(&mut surf, &clip, &Area::new(-5, -5, 20, 20), RED, OPA_COVER, MaskRun::FullCover, BlendMode::Normal);
    for y in 0..10 {
        for x in 0..10 {
            let inside = clip.contains(crate::Point::new(x, y));
            assert_eq!(px[(y * 10 + x) as usize] == RED, inside, "({x},{y})");
        }
    }
}

#[test]
fn nearly_transparent_or_masked_out_fill_is_a_noop() {
    let (mut px, area) = canvas(4, 4);
    let mut surf = Surface::new(&mut px, area).unwrap();
    fill(&mut surf, &area, &area, RED, OPA_MIN - 1, MaskRun::FullCover, BlendMode::Normal);
    fill(&mut surf, &area, &area, RED, OPA_COVER, MaskRun::FullTransp, BlendMode::Normal);
    assert!(px.iter().all(|&c| c == BLACK));
}

#[test]
fn masked_fill_scales_by_mask_and_skips_zero() {
    let (mut px, area) = canvas(4, 1);
    let mut surf = Surface::new(&mut px, area).unwrap();
    let mask = [0, 128, 255, 128];
    fill(&mut surf, &area, &area, RED, OPA_COVER, MaskRun::Changed(&mask), BlendMode::Normal);
    assert_eq!(px, vec![BLACK, mix(RED, BLACK, 128), RED, mix(RED, BLACK, 128)]);
}

#[test]
fn masked_fill_combines_mask_and_opacity() {
    let (mut px, area) = canvas(2, 1);
    let mut surf = Surface::new(&mut px, area).unwrap();
    let mask = [255, 128];
    fill(&mut surf, &area, &area, RED, 128, MaskRun::Changed(&mask), BlendMode::Normal);
    assert_eq!(px[0], mix(RED, BLACK, 128));
    assert_eq!(px[1], mix(RED, BLACK, 64));
}

#[test]
fn mask_is_laid_out_over_area_and_clip() {
    let (mut px, area) = canvas(6, 3);
    let mut surf = Surface::new(&mut px, area).unwrap();
    // area ∩ clip is (1,1)-(3,1), so the mask has one row of three
    let mask = [255, 0, 255];
    fill(
        &mut surf,
        &Area::new(1, 1, 3, 1),
        &Area::new(0, 0, 5, 2),
        RED,
        OPA_COVER,
        MaskRun::Changed(&mask),
        BlendMode::Normal,
    );
    let row: Vec<bool> = px[6..12].iter().map(|&c| c == RED).collect();
    assert_eq!(row, vec![false, true, false, true, false, false]);
    assert!(px[..6].iter().chain(&px[12..]).all(|&c| c == BLACK));
}

#[test]
fn short_mask_draws_nothing() {
    let (mut px, area) = canvas(4, 2);
    let mut surf = Surface::new(&mut px, area).unwrap();
    fill(&mut surf, &area, &area, RED, OPA_COVER, MaskRun::Changed(&[255; 5]), BlendMode::Normal);
    assert!(px.iter().all(|&c| c == BLACK));
}

#[test]
fn additive_fill_over_uniform_background() {
    let grey = Color32::from_rgb8(100, 100, 100);
    let mut px = vec![grey; 9];
    let area = Area::from_size(0, 0, 3, 3);
    let mut surf = Surface::new(&mut px, area).unwrap();
    let fg = Color32::from_rgb8(200, 50, 0);
    fill(&mut surf, &area, &area, fg, OPA_COVER, MaskRun::FullCover, BlendMode::Additive);
    assert!(px.iter().all(|&c| c == Color32::from_rgb8(255, 150, 100)));
}

#[test]
fn subpixel_fill_mixes_each_channel() {
    let (mut px, area) = canvas(4, 1);
    let mut surf = Surface::new(&mut px, area).unwrap();
    let white = Color32::from_rgb8(255, 255, 255);
    let cov = [[255, 0, 0], [0, 0, 0], [0, 255, 128], [255, 255, 255]];
    fill_subpx(&mut surf, &Area::new(0, 0, 2, 0), 0, 0, &cov, white, BlendMode::Normal);
    assert_eq!(px[0], Color32::from_rgb8(255, 0, 0));
    assert_eq!(px[1], BLACK);
    assert_eq!(px[2], Color32::from_rgb8(0, 255, 128));
    // clipped away
    assert_eq!(px[3], BLACK);
}

#[test]
fn subpixel_fill_clips_the_run_start() {
    let (mut px, area) = canvas(3, 1);
    let mut surf = Surface::new(&mut px, area).unwrap();
    let white = Color32::from_rgb8(255, 255, 255);
    let cov = [[0, 0, 0], [255, 255, 255], [255, 0, 0]];
    fill_subpx(&mut surf, &area, -1, 0, &cov, white, BlendMode::Normal);
    assert_eq!(px[0], white);
    assert_eq!(px[1], Color32::from_rgb8(255, 0, 0));
    assert_eq!(px[2], BLACK);
}

#[test]
fn surface_validates_its_buffer() {
    let mut px = vec![BLACK; 10];
    assert!(Surface::new(&mut px, Area::new(0, 0, -1, 0)).is_err());
    assert!(Surface::new(&mut px, Area::from_size(0, 0, 4, 3)).is_err());
    assert!(Surface::with_stride(&mut px, Area::from_size(0, 0, 4, 2), 3).is_err());
    // last row needs only its width
    let surf = Surface::with_stride(&mut px, Area::from_size(0, 0, 4, 2), 6).unwrap();
    assert_eq!(surf.stride(), 6);
}

#[test]
fn surface_uses_absolute_coordinates() {
    let mut px = vec![BLACK; 6];
    px[4] = RED;
    let surf = Surface::new(&mut px, Area::from_size(10, 20, 3, 2)).unwrap();
    assert_eq!(surf.px(11, 21), Some(RED));
    assert_eq!(surf.px(0, 0), None);
    assert_eq!(surf.area(), Area::new(10, 20, 12, 21));
}

#[test]
fn fill_on_an_offset_stride_surface() {
    let mut px = vec![BLACK; 12];
    let area = Area::from_size(5, 5, 2, 2);
    let mut surf = Surface::with_stride(&mut px, area, 6).unwrap();
    fill(&mut surf, &area, &area, RED, OPA_COVER, MaskRun::FullCover, BlendMode::Normal);
    let reds: Vec<usize> = px.iter().enumerate().filter(|(_, c)| **c == RED).map(|(i, _)| i).collect();
    assert_eq!(reds, vec![0, 1, 6, 7]);
}
