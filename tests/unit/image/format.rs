use super::*;
use crate::color::{Color16, Color32};

#[test]
fn packed_formats_report_their_depth() {
    assert_eq!(ColorFormat::Indexed1.packed_bits(), Some(1));
    assert_eq!(ColorFormat::Alpha4.packed_bits(), Some(4));
    assert_eq!(ColorFormat::Indexed8.packed_bits(), Some(8));
    assert_eq!(ColorFormat::TrueColorAlpha.packed_bits(), None);
}

#[test]
fn format_classification() {
    assert_eq!(ColorFormat::Indexed2.palette_len(), 4);
    assert_eq!(ColorFormat::Alpha2.palette_len(), 0);
    assert!(ColorFormat::Indexed8.is_indexed());
    assert!(ColorFormat::Alpha1.is_alpha_only());
    assert!(ColorFormat::Indexed1.has_alpha());
    assert!(!ColorFormat::TrueColor.has_alpha());
    assert!(!ColorFormat::TrueColorChromaKeyed.has_alpha());
    assert!(ColorFormat::TrueColorChromaKeyed.is_native());
    assert!(!ColorFormat::Alpha8.is_native());
}

#[test]
fn row_bytes_per_format() {
    let hdr = |cf| ImageHeader::new(3, 2, cf);
    assert_eq!(hdr(ColorFormat::TrueColor).row_bytes::<Color32>(), 12);
    assert_eq!(hdr(ColorFormat::TrueColorAlpha).row_bytes::<Color32>(), 15);
    assert_eq!(hdr(ColorFormat::TrueColorAlpha).row_bytes::<Color16>(), 9);
    assert_eq!(hdr(ColorFormat::Alpha4).row_bytes::<Color32>(), 2);
    assert_eq!(ImageHeader::new(10, 1, ColorFormat::Indexed1).row_bytes::<Color32>(), 2);
}

#[test]
fn data_size_includes_the_palette() {
    let hdr = ImageHeader::new(5, 2, ColorFormat::Indexed2);
    assert_eq!(hdr.pixels_offset(), 16);
    assert_eq!(hdr.data_size::<Color32>(), 16 + 2 * 2);
    assert_eq!(ImageHeader::new(4, 4, ColorFormat::Alpha8).data_size::<Color16>(), 16);
}

#[test]
fn new_rejects_empty_or_short_data() {
    let hdr = ImageHeader::new(0, 3, ColorFormat::TrueColor);
    assert!(Image::<Color32, _>::new(hdr, vec![0u8; 64]).is_err());

    let hdr = ImageHeader::new(2, 2, ColorFormat::TrueColor);
    let err = Image::<Color32, _>::new(hdr, &[0u8; 15][..]).unwrap_err();
    assert!(matches!(err, RasterError::Validation(_)));
    assert!(err.to_string().contains("16"), "{err}");

    assert!(Image::<Color32, _>::new(hdr, &[0u8; 16][..]).is_ok());
}

#[test]
fn alloc_sizes_and_zeroes() {
    let img = ImageBuf::<Color16>::alloc(3, 3, ColorFormat::Indexed4).unwrap();
    assert_eq!(img.data().len(), 16 * 4 + 2 * 3);
    assert!(img.data().iter().all(|&b| b == 0));
    assert_eq!(img.view().header(), img.header());
    assert_eq!(img.into_data().len(), 70);

    assert!(ImageBuf::<Color32>::alloc(-1, 3, ColorFormat::TrueColor).is_err());
}

#[test]
fn oversized_images_are_rejected() {
    let huge = ImageHeader::new(i32::MAX, i32::MAX, ColorFormat::TrueColorAlpha);
    assert_eq!(huge.checked_data_size::<Color32>(), None);
    assert!(matches!(
        ImageBuf::<Color32>::alloc(i32::MAX, i32::MAX, ColorFormat::TrueColorAlpha),
        Err(RasterError::Validation(_))
    ));
    assert!(matches!(
        ImageRef::<Color32>::new(huge, &[]),
        Err(RasterError::Validation(_))
    ));

    let small = ImageHeader::new(5, 2, ColorFormat::Indexed2);
    assert_eq!(small.checked_data_size::<Color32>(), Some(small.data_size::<Color32>()));
}

#[test]
fn chroma_key_is_pure_green() {
    assert_eq!(chroma_key::<Color32>(), Color32(0xFF00_FF00));
    assert_eq!(chroma_key::<Color16>(), Color16::from_rgb8(0, 255, 0));
}

#[test]
fn header_serializes_snake_case() {
    let hdr = ImageHeader::new(2, 3, ColorFormat::TrueColorAlpha);
    let json = serde_json::to_string(&hdr).unwrap();
    assert_eq!(json, r#"{"w":2,"h":3,"cf":"true_color_alpha"}"#);
}
