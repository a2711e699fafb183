use super::*;

#[test]
fn defaults_match_dave2d_bring_up() {
    let cfg = UnitConfig::default();
    assert_eq!(cfg.unit_id, UnitId(4));
    assert_eq!(cfg.name, "DAVE2D");
    assert_eq!(cfg.watermark, 10);
    assert_eq!(cfg.worker_name, "dave2d");
    assert_eq!(cfg.execution, ExecutionModel::Worker);
    assert_eq!(cfg.flush, FlushPolicy::Batched);

    let dev = &cfg.device;
    assert_eq!(dev.blend_src, BlendFactor::Alpha);
    assert_eq!(dev.blend_dst, BlendFactor::OneMinusAlpha);
    assert_eq!(dev.alpha_mode, AlphaMode::Constant);
    assert_eq!(dev.alpha, 255);
    assert!(dev.antialiasing);
    assert_eq!(dev.line_cap, LineCap::Butt);
    assert_eq!(dev.line_join, LineJoin::Miter);
    assert_eq!(dev.dlist_block_size, 25);
    assert_eq!(dev.renderbuffer_initial, 20);
    assert_eq!(dev.renderbuffer_stride, 20);
    cfg.validate().unwrap();
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let cfg = UnitConfig::from_json_str(
        r#"{ "execution": "inline", "flush": "immediate", "watermark": 3,
             "device": { "antialiasing": false } }"#,
    )
    .unwrap();
    assert_eq!(cfg.execution, ExecutionModel::Inline);
    assert_eq!(cfg.flush, FlushPolicy::Immediate);
    assert_eq!(cfg.watermark, 3);
    assert!(!cfg.device.antialiasing);
    assert_eq!(cfg.device.dlist_block_size, 25);
    assert_eq!(cfg.name, "DAVE2D");
}

#[test]
fn json_errors_are_config_errors() {
    let err = UnitConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, Dave2dError::Config(_)));

    let err = UnitConfig::from_json_str(r#"{ "watermark": 0 }"#).unwrap_err();
    assert!(err.to_string().contains("watermark"));
}

#[test]
fn validate_rejects_out_of_range_values() {
    let base = UnitConfig::default();

    let mut c = base.clone();
    c.name.clear();
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.worker_name = "a\0b".to_string();
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.worker_stack_size = Some(0);
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.device.dlist_block_size = 0;
    assert!(c.validate().is_err());

    let mut c = base;
    c.device.renderbuffer_initial = 0;
    assert!(c.validate().unwrap_err().is_fatal());
}

#[test]
fn builders_replace_single_fields() {
    let cfg = UnitConfig::default()
        .with_execution(ExecutionModel::Inline)
        .with_flush(FlushPolicy::Immediate)
        .with_device_index(9);
    assert_eq!(cfg.execution, ExecutionModel::Inline);
    assert_eq!(cfg.flush, FlushPolicy::Immediate);
    assert_eq!(cfg.device_index, 9);
    assert_eq!(cfg.watermark, DEFAULT_WATERMARK);
}
