use thiserror::Error;
use tracing::{debug, info};

use crate::annotation::{AnnotationSet, Modality, PlateId, PlateRecord, Point, Role};

use super::config::CaptureConfig;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    #[error("no active plate, start a plate first")]
    NoActivePlate,

    #[error("no annotation role selected for {0}")]
    NoActiveRole(PlateId),

    #[error("all {0} predefined plates have been annotated")]
    PlateLimitReached(usize),

    #[error("no more plates to revisit in the {0} pass")]
    NoRemainingPlates(Modality),

    #[error("cannot switch modality: {0}")]
    InvalidModalitySwitch(String),

    #[error("session already finished")]
    AlreadyFinished,
}

/// Where the operator is in the annotation workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    PlateStarted { plate: PlateId },
    Annotating { plate: PlateId, role: Role },
    Finished,
}

impl CaptureState {
    pub fn plate(&self) -> Option<PlateId> {
        match *self {
            Self::PlateStarted { plate } | Self::Annotating { plate, .. } => Some(plate),
            Self::Idle | Self::Finished => None,
        }
    }
}

/// Operator input driving a capture session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CaptureEvent {
    /// Begin the next plate of the active pass.
    StartPlate,
    SelectRole(Role),
    Click(Point),
    /// Leave the primary pass and revisit the plates in the other modality.
    SwitchModality,
    Finish,
}

/// Accumulates annotations for a set of plates, first in the primary
/// modality and then, optionally, in the secondary one.
///
/// Rejected events leave the session untouched.
#[derive(Clone, Debug)]
pub struct CaptureSession {
    state: CaptureState,
    primary: Modality,
    modality: Modality,
    /// Plates started in the active pass.
    cursor: usize,
    labels: Vec<String>,
    annotations: AnnotationSet,
}

impl CaptureSession {
    pub fn new(primary: Modality, config: &CaptureConfig) -> Self {
        Self {
            state: CaptureState::Idle,
            primary,
            modality: primary,
            cursor: 0,
            labels: config.plate_labels.clone(),
            annotations: AnnotationSet::new(),
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Modality of the active pass.
    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn into_annotations(self) -> AnnotationSet {
        self.annotations
    }

    pub fn is_finished(&self) -> bool {
        self.state == CaptureState::Finished
    }

    /// Apply one event and return the new state.
    pub fn apply(&mut self, event: CaptureEvent) -> Result<CaptureState, CaptureError> {
        if self.is_finished() {
            return Err(CaptureError::AlreadyFinished);
        }
        self.state = match event {
            CaptureEvent::StartPlate => CaptureState::PlateStarted {
                plate: self.start_plate()?,
            },
            CaptureEvent::SelectRole(role) => {
                let plate = self.state.plate().ok_or(CaptureError::NoActivePlate)?;
                debug!(%plate, %role, "Annotating");
                CaptureState::Annotating { plate, role }
            }
            CaptureEvent::Click(point) => {
                let (plate, role) = match self.state {
                    CaptureState::Annotating { plate, role } => (plate, role),
                    CaptureState::PlateStarted { plate } => {
                        return Err(CaptureError::NoActiveRole(plate))
                    }
                    _ => return Err(CaptureError::NoActivePlate),
                };
                self.record(plate, role, point)?;
                self.state
            }
            CaptureEvent::SwitchModality => {
                self.switch_modality()?;
                CaptureState::Idle
            }
            CaptureEvent::Finish => {
                info!(plates = self.annotations.len(), "Annotation finished");
                CaptureState::Finished
            }
        };
        Ok(self.state)
    }

    fn start_plate(&mut self) -> Result<PlateId, CaptureError> {
        let modality = self.modality;
        let plate = if modality == self.primary {
            if !self.labels.is_empty() && self.cursor >= self.labels.len() {
                return Err(CaptureError::PlateLimitReached(self.labels.len()));
            }
            let id = self.annotations.next_id();
            let mut record = PlateRecord::new(id, self.labels.get(self.cursor).cloned());
            record.annotation_mut(modality);
            self.annotations.plates.push(record);
            id
        } else {
            let record = self
                .annotations
                .plates
                .get_mut(self.cursor)
                .ok_or(CaptureError::NoRemainingPlates(modality))?;
            record.annotation_mut(modality);
            record.id
        };
        self.cursor += 1;
        info!(%plate, %modality, "Started plate");
        Ok(plate)
    }

    fn record(&mut self, plate: PlateId, role: Role, point: Point) -> Result<(), CaptureError> {
        let record = self
            .annotations
            .get_mut(plate)
            .ok_or(CaptureError::NoActivePlate)?;
        record.annotation_mut(self.modality).push(role, point);
        debug!(%plate, %role, x = point.x, y = point.y, "Point selected");
        Ok(())
    }

    fn switch_modality(&mut self) -> Result<(), CaptureError> {
        if self.modality != self.primary {
            return Err(CaptureError::InvalidModalitySwitch(format!(
                "already annotating {}",
                self.modality
            )));
        }
        if self.annotations.is_empty() {
            return Err(CaptureError::InvalidModalitySwitch(format!(
                "no plates annotated in {} yet",
                self.primary
            )));
        }
        self.modality = self.primary.other();
        self.cursor = 0;
        info!(modality = %self.modality, "Switched modality");
        Ok(())
    }
}
