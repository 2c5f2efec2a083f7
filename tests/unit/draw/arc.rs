use super::*;
use crate::color::Color32;
use crate::foundation::core::MAX_MASKS;
use crate::mask::{LineMask, LineSide};

const BLACK: Color32 = Color32(0xFF00_0000);
const WHITE: Color32 = Color32(0xFFFF_FFFF);

fn ring(width: Coord, rounded: bool) -> ArcDsc<Color32> {
    ArcDsc {
        color: WHITE,
        width,
        rounded,
        ..ArcDsc::default()
    }
}

fn render(start: i32, end: i32, dsc: &ArcDsc<Color32>) -> Vec<Color32> {
    let mut px = vec![BLACK; 40 * 40];
    let area = Area::from_size(0, 0, 40, 40);
    let mut surf = Surface::new(&mut px, area).unwrap();
    draw_arc(&mut DrawCtx::default(), &mut surf, &area, Point::new(20, 20), 10, start, end, dsc);
    px
}

fn at(px: &[Color32], x: Coord, y: Coord) -> Color32 {
    px[(y * 40 + x) as usize]
}

#[test]
fn full_ring_leaves_the_hole_empty() {
    let px = render(0, 360, &ring(3, false));
    assert_eq!(at(&px, 20, 12), WHITE);
    assert_eq!(at(&px, 11, 20), WHITE);
    assert_eq!(at(&px, 20, 11), WHITE);
    assert_eq!(at(&px, 20, 20), BLACK);
    assert_eq!(at(&px, 20, 16), BLACK);
    // outside the outer circle
    assert_eq!(at(&px, 10, 10), BLACK);
    assert_eq!(at(&px, 20, 30), BLACK);
}

#[test]
fn half_arc_keeps_the_lower_half() {
    let px = render(0, 180, &ring(3, false));
    assert_eq!(at(&px, 20, 28), WHITE);
    assert_eq!(at(&px, 20, 11), BLACK);
    assert_eq!(at(&px, 20, 20), BLACK);
}

#[test]
fn empty_sweep_or_width_draws_nothing() {
    assert!(render(45, 45, &ring(3, false)).iter().all(|&c| c == BLACK));
    assert!(render(0, 90, &ring(0, false)).iter().all(|&c| c == BLACK));
}

#[test]
fn width_is_capped_by_the_radius() {
    let px = render(0, 360, &ring(50, false));
    assert_eq!(at(&px, 20, 20), WHITE);
    assert_eq!(at(&px, 20, 11), WHITE);
    assert_eq!(at(&px, 28, 20), WHITE);
}

#[test]
fn rounded_ends_add_caps() {
    let plain = render(0, 90, &ring(4, false));
    assert_eq!(at(&plain, 27, 19), BLACK);
    let capped = render(0, 90, &ring(4, true));
    assert_ne!(at(&capped, 27, 19), BLACK);
    assert_eq!(at(&capped, 20, 10), BLACK);
}

#[test]
fn cap_is_centered_on_the_ring() {
    assert_eq!(cap_area(Point::new(20, 20), 10, 4, 0), Area::new(26, 18, 29, 21));
    assert_eq!(cap_area(Point::new(20, 20), 10, 5, 90), Area::new(18, 26, 22, 30));
}

#[test]
fn full_registry_draws_nothing() {
    let mut ctx = DrawCtx::default();
    let keep_all = LineMask::from_points(
        Point::new(-100, 0),
        Point::new(-100, 10),
        LineSide::Right,
    );
    // the ring needs three slots
    for _ in 0..MAX_MASKS - 2 {
        ctx.masks_mut().add(keep_all, None).unwrap();
    }
    let mut px = vec![BLACK; 40 * 40];
    let area = Area::from_size(0, 0, 40, 40);
    let mut surf = Surface::new(&mut px, area).unwrap();
    draw_arc(&mut ctx, &mut surf, &area, Point::new(20, 20), 10, 0, 90, &ring(4, true));
    assert!(px.iter().all(|&c| c == BLACK));
    assert_eq!(ctx.masks().count(), MAX_MASKS - 2);
}
