use std::fmt;

use serde::Serialize;

use crate::annotation::{Modality, PlateId, Role};
use crate::error::TlcError;
use crate::retention::PlateResult;

/// Non-fatal observation about a plate that still produced results.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum PlateNote {
    /// Secondary solvent front had zero length; spots were remapped with
    /// a scaling factor of 1.
    ScaleFallback { plate: PlateId, modality: Modality },
    /// Secondary annotation lacked a reference line; only primary spots
    /// were used.
    IncompleteSecondary {
        plate: PlateId,
        modality: Modality,
        missing: Role,
    },
}

impl fmt::Display for PlateNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScaleFallback { plate, modality } => write!(
                f,
                "{plate} {modality} solvent front has zero length, using scaling factor 1"
            ),
            Self::IncompleteSecondary {
                plate,
                modality,
                missing,
            } => write!(
                f,
                "{plate} {modality} image is missing its {missing}, {modality} spots ignored"
            ),
        }
    }
}

/// Result of one plate that made it through the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct PlateAnalysis {
    pub result: PlateResult,
    pub notes: Vec<PlateNote>,
}

/// A plate that produced no results.
#[derive(Debug)]
pub struct SkippedPlate {
    pub plate: PlateId,
    pub label: Option<String>,
    pub reason: TlcError,
}

impl fmt::Display for SkippedPlate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.reason)
    }
}

/// Everything a batch run produced, in plate order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<PlateResult>,
    pub skipped: Vec<SkippedPlate>,
    pub notes: Vec<PlateNote>,
}

impl BatchReport {
    pub fn result(&self, plate: PlateId) -> Option<&PlateResult> {
        self.results.iter().find(|r| r.plate == plate)
    }

    pub fn component_count(&self) -> usize {
        self.results.iter().map(|r| r.components.len()).sum()
    }
}

/// Thread-safe progress reporting for a batch run.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// The batch is starting with `total_plates` plates.
    fn begin_batch(&self, _total_plates: usize) {}

    /// One more plate finished; `plates_done` counts all finished so far.
    fn advance(&self, _plates_done: usize) {}

    fn finish_batch(&self) {}
}

/// No-op progress reporter, used when `run_batch` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
