use tlc_core::annotation::{AnnotationSet, Modality, PlateAnnotation, PlateId, PlateRecord, Point};

/// Annotation with one baseline point, one solvent-line point and spots
/// given by their y-coordinates.
pub fn annotation(baseline_y: f64, solvent_y: f64, spots: &[f64]) -> PlateAnnotation {
    PlateAnnotation {
        baseline: vec![Point::new(100.0, baseline_y)],
        solvent_line: vec![Point::new(100.0, solvent_y)],
        spots: spots.iter().map(|&y| Point::new(110.0, y)).collect(),
    }
}

pub fn uv_plate(id: u32, baseline_y: f64, solvent_y: f64, spots: &[f64]) -> PlateRecord {
    PlateRecord::new(PlateId(id), None)
        .with_annotation(Modality::Uv, annotation(baseline_y, solvent_y, spots))
}

pub fn set_of(plates: Vec<PlateRecord>) -> AnnotationSet {
    AnnotationSet { plates }
}
