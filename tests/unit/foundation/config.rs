use super::*;

#[test]
fn defaults_are_valid() {
    let o = RasterOpts::default();
    assert_eq!(o.max_row_width, DEFAULT_MAX_ROW_WIDTH);
    assert_eq!(o.shadow_max_size, DEFAULT_SHADOW_MAX_SIZE);
    o.validate().unwrap();
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let o = RasterOpts::from_json(r#"{"max_row_width": 64}"#).unwrap();
    assert_eq!(o.max_row_width, 64);
    assert_eq!(o.shadow_max_size, DEFAULT_SHADOW_MAX_SIZE);
}

#[test]
fn json_rejects_zero_row_width_and_garbage() {
    let err = RasterOpts::from_json(r#"{"max_row_width": 0}"#).unwrap_err();
    assert!(matches!(err, RasterError::Validation(_)));
    assert!(RasterOpts::from_json("{not json").is_err());
}

#[test]
fn builders_override_fields() {
    let o = RasterOpts::default()
        .with_max_row_width(16)
        .with_shadow_max_size(32);
    assert_eq!(o.max_row_width, 16);
    assert_eq!(o.shadow_max_size, 32);
    assert!(RasterOpts::default().with_shadow_max_size(0).validate().is_err());
}
