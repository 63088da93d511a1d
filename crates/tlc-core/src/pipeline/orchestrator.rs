use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::annotation::{AnnotationSet, Modality, PlateRecord, Role};
use crate::calibration::{ModalityCalibration, ReferenceFrame};
use crate::consts::PARALLEL_PLATE_THRESHOLD;
use crate::error::{Result, TlcError};
use crate::reconcile::{dedup_spots, gather_candidates, SecondaryOutcome};
use crate::retention::{compute_components, PlateResult};

use super::config::{DedupConfig, PipelineConfig};
use super::types::{BatchReport, NoOpReporter, PlateAnalysis, PlateNote, ProgressReporter, SkippedPlate};

/// Per-plate engine with the configuration already validated.
#[derive(Clone, Debug)]
pub struct PlateAnalyzer {
    primary: Modality,
    calibration: ModalityCalibration,
    dedup: DedupConfig,
}

impl PlateAnalyzer {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        // Both factors must be valid even though only the primary one
        // converts distances.
        config.calibration.for_modality(config.secondary())?;
        Ok(Self {
            primary: config.primary,
            calibration: config.calibration.for_modality(config.primary)?,
            dedup: config.dedup.clone(),
        })
    }

    /// Compute the retention report of one plate.
    ///
    /// Fails with `MissingReferenceLine` when the primary annotation lacks a
    /// baseline or solvent line, and with `DegenerateCalibration` when its
    /// solvent front has zero length.
    pub fn analyze(&self, plate: &PlateRecord) -> Result<PlateAnalysis> {
        let annotation = plate
            .annotation(self.primary)
            .ok_or_else(|| TlcError::MissingReferenceLine {
                plate: plate.id,
                modality: self.primary,
                line: Role::Baseline,
            })?;
        let frame = ReferenceFrame::from_annotation(annotation, plate.id, self.primary)?;
        let solvent_front_px = frame.solvent_front_px();
        if solvent_front_px == 0.0 {
            return Err(TlcError::DegenerateCalibration {
                plate: plate.id,
                modality: self.primary,
            });
        }

        let reconciliation = gather_candidates(plate, self.primary, &frame);
        let secondary = self.primary.other();
        let mut notes = Vec::new();
        match reconciliation.secondary {
            SecondaryOutcome::Merged { scale, .. } if scale.fallback => {
                notes.push(PlateNote::ScaleFallback {
                    plate: plate.id,
                    modality: secondary,
                });
            }
            SecondaryOutcome::Incomplete { missing } => {
                notes.push(PlateNote::IncompleteSecondary {
                    plate: plate.id,
                    modality: secondary,
                    missing,
                });
            }
            _ => {}
        }

        let candidate_count = reconciliation.candidates.len();
        let unique = dedup_spots(reconciliation.candidates, self.dedup.pixel_tolerance);
        let components = compute_components(
            &unique,
            &frame,
            &self.calibration,
            self.dedup.distance_tolerance_cm,
        );
        debug!(
            plate = %plate.id,
            candidates = candidate_count,
            unique = unique.len(),
            components = components.len(),
            "Plate analyzed"
        );

        Ok(PlateAnalysis {
            result: PlateResult {
                plate: plate.id,
                label: plate.label.clone(),
                solvent_front_distance_cm: self.calibration.distance_cm(solvent_front_px),
                components,
            },
            notes,
        })
    }
}

/// Analyze every plate of `annotations`, reporting progress through
/// `reporter`.
///
/// Plate failures are collected in the report and never abort the batch.
/// Only an invalid configuration or a set with duplicate plate ids returns
/// `Err`.
pub fn run_batch_reported(
    annotations: &AnnotationSet,
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<BatchReport> {
    annotations.validate()?;
    let analyzer = PlateAnalyzer::new(config)?;
    let total = annotations.len();
    info!(plates = total, primary = %config.primary, "Analyzing plates");

    reporter.begin_batch(total);
    let done = AtomicUsize::new(0);
    let analyze = |plate: &PlateRecord| {
        let outcome = analyzer.analyze(plate);
        reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
        outcome
    };

    let outcomes: Vec<Result<PlateAnalysis>> = if total >= PARALLEL_PLATE_THRESHOLD {
        annotations.plates.par_iter().map(analyze).collect()
    } else {
        annotations.plates.iter().map(analyze).collect()
    };
    reporter.finish_batch();

    let mut report = BatchReport::default();
    for (plate, outcome) in annotations.iter().zip(outcomes) {
        match outcome {
            Ok(analysis) => {
                report.results.push(analysis.result);
                report.notes.extend(analysis.notes);
            }
            Err(reason) => {
                warn!(plate = %plate.id, %reason, "Plate skipped");
                report.skipped.push(SkippedPlate {
                    plate: plate.id,
                    label: plate.label.clone(),
                    reason,
                });
            }
        }
    }

    info!(
        computed = report.results.len(),
        skipped = report.skipped.len(),
        components = report.component_count(),
        "Batch complete"
    );
    Ok(report)
}

/// Analyze every plate of `annotations` without progress reporting.
pub fn run_batch(annotations: &AnnotationSet, config: &PipelineConfig) -> Result<BatchReport> {
    run_batch_reported(annotations, config, Arc::new(NoOpReporter))
}
