use super::*;

#[test]
fn defaults_match_product_page() {
    let cfg = ReelConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.sections.len(), 5);
    assert_eq!(cfg.fade, 0.02);
    assert_eq!(cfg.mobile_breakpoint, 768);
    assert_eq!(cfg.captions.len(), 7);
    assert_eq!(cfg.nav.len(), 5);

    let ai = cfg.section(SectionId::Ai).unwrap();
    assert_eq!(ai.placement, Placement::SmartScale);
    assert_eq!(ai.dir, "ai-sequence");
    assert_eq!((ai.start, ai.end), (0.8, 1.0));
    assert_eq!(
        cfg.section(SectionId::Camera).unwrap().placement,
        Placement::Rotate
    );
}

#[test]
fn frame_file_names_are_zero_padded() {
    let naming = FrameNaming::default();
    assert_eq!(naming.file_name(FrameNumber(57)), "frame-057.jpg");
    assert_eq!(naming.file_name(FrameNumber(240)), "frame-240.jpg");

    let ezgif = FrameNaming {
        prefix: "ezgif-frame-".to_string(),
        ..FrameNaming::default()
    };
    assert_eq!(ezgif.file_name(FrameNumber(1)), "ezgif-frame-001.jpg");
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = ReelConfig::from_json_str(r#"{ "max_fps": 30, "vignette": false }"#).unwrap();
    assert_eq!(cfg.max_fps, 30);
    assert!(!cfg.vignette);
    assert_eq!(cfg.sections, ReelConfig::default().sections);

    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(ReelConfig::from_json_str(&json).unwrap(), cfg);
}

#[test]
fn section_defaults_apply_per_entry() {
    let cfg = ReelConfig::from_json_str(
        r#"{ "sections": [ { "id": "hero", "dir": "only", "start": 0.0, "end": 1.0 } ] }"#,
    )
    .unwrap();
    assert_eq!(cfg.sections[0].frame_count, DEFAULT_FRAME_COUNT);
    assert_eq!(cfg.sections[0].placement, Placement::Rotate);
}

#[test]
fn invalid_values_are_rejected() {
    let mut cfg = ReelConfig::default();
    cfg.smart_scale_weight = 1.5;
    assert!(matches!(cfg.validate(), Err(ReelError::Validation(_))));

    let mut cfg = ReelConfig::default();
    cfg.track.height_vh = 0.0;
    assert!(matches!(cfg.validate(), Err(ReelError::Validation(_))));

    let mut cfg = ReelConfig::default();
    cfg.naming.extension.clear();
    assert!(matches!(cfg.validate(), Err(ReelError::Validation(_))));

    let mut cfg = ReelConfig::default();
    cfg.sections[1].start = 0.25;
    assert!(matches!(cfg.validate(), Err(ReelError::Validation(_))));
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        ReelConfig::from_json_str("{ not json"),
        Err(ReelError::Serde(_))
    ));
}

#[test]
fn missing_config_file_reports_path() {
    let err = ReelConfig::from_json_file(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("here.json"), "{err}");
}
