use super::*;
use crate::color::{Color16, Color32};
use crate::image::{ImageBuf, ImageHeader};

#[test]
fn true_color_round_trip() {
    let mut img = ImageBuf::<Color16>::alloc(4, 3, ColorFormat::TrueColor).unwrap();
    let c = Color16::from_rgb8(200, 100, 50);
    img.set_px_color(3, 2, c).unwrap();
    assert_eq!(img.px_color(3, 2, Color16::black()), c);
    assert_eq!(img.px_color(0, 0, Color16::white()), Color16::default());
    assert_eq!(img.px_alpha(3, 2), OPA_COVER);
}

#[test]
fn true_color_alpha_keeps_color_and_alpha_apart() {
    let mut img = ImageBuf::<Color32>::alloc(2, 2, ColorFormat::TrueColorAlpha).unwrap();
    let c = Color32::from_rgb8(1, 2, 3);
    img.set_px_color(1, 1, c).unwrap();
    img.set_px_alpha(1, 1, 77).unwrap();
    assert_eq!(img.px_color(1, 1, Color32::black()), c);
    assert_eq!(img.px_alpha(1, 1), 77);
    assert_eq!(img.px_alpha(0, 1), 0);
}

#[test]
fn indexed_pixels_resolve_through_the_palette() {
    let mut img = ImageBuf::<Color32>::alloc(5, 2, ColorFormat::Indexed2).unwrap();
    img.set_palette(0, 0xFF00_0000).unwrap();
    img.set_palette(3, 0x80FF_8000).unwrap();
    img.set_px_index(4, 1, 3).unwrap();

    assert_eq!(img.px_index(4, 1), Some(3));
    assert_eq!(img.px_index(0, 0), Some(0));
    assert_eq!(img.palette_entry(3), Some(0x80FF_8000));
    assert_eq!(img.px_color(4, 1, Color32::black()), Color32::from_rgb8(0xFF, 0x80, 0));
    assert_eq!(img.px_alpha(4, 1), 0x80);
    assert_eq!(img.px_alpha(0, 0), 0xFF);
}

#[test]
fn indexed1_packs_msb_first() {
    let mut img = ImageBuf::<Color32>::alloc(10, 1, ColorFormat::Indexed1).unwrap();
    img.set_px_index(0, 0, 1).unwrap();
    img.set_px_index(9, 0, 1).unwrap();
    let px = &img.data()[img.header().pixels_offset()..];
    assert_eq!(px, &[0x80, 0x40]);
    img.set_px_index(0, 0, 0).unwrap();
    assert_eq!(img.data()[8], 0x00);
}

#[test]
fn alpha_formats_quantize() {
    let mut a1 = ImageBuf::<Color32>::alloc(2, 1, ColorFormat::Alpha1).unwrap();
    a1.set_px_alpha(0, 0, 200).unwrap();
    a1.set_px_alpha(1, 0, 100).unwrap();
    assert_eq!(a1.px_alpha(0, 0), OPA_COVER);
    assert_eq!(a1.px_alpha(1, 0), 0);

    let mut a2 = ImageBuf::<Color32>::alloc(3, 1, ColorFormat::Alpha2).unwrap();
    a2.set_px_alpha(2, 0, 170).unwrap();
    assert_eq!(a2.px_alpha(2, 0), 170);

    let mut a4 = ImageBuf::<Color32>::alloc(3, 1, ColorFormat::Alpha4).unwrap();
    a4.set_px_alpha(1, 0, 0x88).unwrap();
    assert_eq!(a4.px_alpha(1, 0), 136);

    let mut a8 = ImageBuf::<Color32>::alloc(3, 1, ColorFormat::Alpha8).unwrap();
    a8.set_px_alpha(1, 0, 123).unwrap();
    assert_eq!(a8.px_alpha(1, 0), 123);
}

#[test]
fn alpha_only_color_is_the_tint() {
    let img = ImageBuf::<Color32>::alloc(2, 2, ColorFormat::Alpha4).unwrap();
    let tint = Color32::from_rgb8(9, 8, 7);
    assert_eq!(img.px_color(1, 1, tint), tint);
    assert_eq!(img.px_index(1, 1), None);
}

#[test]
fn reads_outside_are_clamped() {
    let mut img = ImageBuf::<Color32>::alloc(3, 3, ColorFormat::TrueColor).unwrap();
    let corner = Color32::from_rgb8(50, 60, 70);
    img.set_px_color(2, 2, corner).unwrap();
    img.set_px_color(0, 0, Color32::white()).unwrap();
    assert_eq!(img.px_color(10, 10, Color32::black()), corner);
    assert_eq!(img.px_color(-4, 0, Color32::black()), Color32::white());
}

#[test]
fn writes_are_checked() {
    let mut tc = ImageBuf::<Color32>::alloc(2, 2, ColorFormat::TrueColor).unwrap();
    assert!(matches!(
        tc.set_px_color(2, 0, Color32::white()),
        Err(RasterError::OutOfBounds(_))
    ));
    assert!(matches!(
        tc.set_px_index(0, 0, 0),
        Err(RasterError::UnsupportedFormat(_))
    ));
    assert!(tc.set_px_alpha(0, 0, 10).is_err());
    assert!(tc.set_palette(0, 0).is_err());
    assert_eq!(tc.palette_entry(0), None);

    let mut ix = ImageBuf::<Color32>::alloc(2, 2, ColorFormat::Indexed1).unwrap();
    assert!(ix.set_px_color(0, 0, Color32::white()).is_err());
    assert!(matches!(ix.set_px_index(0, 0, 2), Err(RasterError::OutOfBounds(_))));
    assert!(ix.set_palette(2, 0).is_err());
}

#[test]
fn borrowed_images_read_caller_bytes() {
    let mut bytes = vec![0u8; 8];
    Color32::from_rgb8(10, 20, 30).write_bytes(&mut bytes[4..]);
    let img = Image::<Color32, _>::new(ImageHeader::new(2, 1, ColorFormat::TrueColor), &bytes[..]).unwrap();
    assert_eq!(img.px_color(1, 0, Color32::black()), Color32::from_rgb8(10, 20, 30));
}
