use tlc_core::annotation::{Modality, PlateId, Role};
use tlc_core::pipeline::config::{CalibrationConfig, DedupConfig, PipelineConfig};
use tlc_core::pipeline::PlateNote;

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[test]
fn test_modality_display() {
    assert_eq!(format!("{}", Modality::Uv), "UV");
    assert_eq!(format!("{}", Modality::Stain), "Stain");
}

#[test]
fn test_role_display() {
    assert_eq!(format!("{}", Role::Baseline), "baseline");
    assert_eq!(format!("{}", Role::SolventLine), "solvent line");
    assert_eq!(format!("{}", Role::Spots), "spots");
}

#[test]
fn test_plate_id_display() {
    assert_eq!(format!("{}", PlateId(7)), "Plate 7");
}

#[test]
fn test_dedup_display() {
    let s = format!("{}", DedupConfig::default());
    assert!(s.contains("2 px"), "got: {s}");
    assert!(s.contains("0.1 cm"), "got: {s}");
}

#[test]
fn test_plate_note_display() {
    let note = PlateNote::IncompleteSecondary {
        plate: PlateId(2),
        modality: Modality::Stain,
        missing: Role::SolventLine,
    };
    let s = format!("{}", note);
    assert!(s.contains("Plate 2"), "got: {s}");
    assert!(s.contains("solvent line"), "got: {s}");
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_default_pipeline_config() {
    let config = PipelineConfig::default();
    assert_eq!(config.primary, Modality::Uv);
    assert_eq!(config.secondary(), Modality::Stain);
    assert_eq!(config.calibration.pixels_to_cm(Modality::Uv), 0.046);
    assert_eq!(config.calibration.pixels_to_cm(Modality::Stain), 0.048);
    assert_eq!(config.dedup.pixel_tolerance, 2.0);
    assert_eq!(config.dedup.distance_tolerance_cm, 0.1);
    assert!(config.capture.plate_labels.is_empty());
}

#[test]
fn test_modality_other() {
    assert_eq!(Modality::Uv.other(), Modality::Stain);
    assert_eq!(Modality::Stain.other(), Modality::Uv);
}

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_partial_toml_fills_defaults() {
    let config: PipelineConfig = toml::from_str(
        r#"
primary = "stain"

[calibration]
stain = 0.05
"#,
    )
    .unwrap();
    assert_eq!(config.primary, Modality::Stain);
    assert_eq!(config.calibration.stain, 0.05);
    assert_eq!(config.calibration.uv, 0.046);
    assert_eq!(config.dedup, DedupConfig::default());
}

#[test]
fn test_empty_toml_is_default() {
    let config: PipelineConfig = toml::from_str("").unwrap();
    assert_eq!(config, PipelineConfig::default());
}

#[test]
fn test_default_config_survives_toml() {
    let config = PipelineConfig {
        calibration: CalibrationConfig {
            uv: 0.041,
            stain: 0.052,
        },
        ..Default::default()
    };
    let text = toml::to_string_pretty(&config).unwrap();
    assert!(text.contains("[calibration]"), "got: {text}");
    let back: PipelineConfig = toml::from_str(&text).unwrap();
    assert_eq!(back, config);
}
