use std::fmt;

use serde::{Deserialize, Serialize};

use crate::annotation::PlateId;
use crate::calibration::{round_to, ModalityCalibration, ReferenceFrame};
use crate::consts::{CV_DECIMALS, RF_DECIMALS};
use crate::reconcile::{dedup_greedy, Candidate};

/// Retention metrics of one spot, before numbering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotMetrics {
    pub distance_cm: f64,
    pub rf: f64,
    pub cv: f64,
}

/// One resolved chromatography spot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// 1-based position in ascending distance order.
    pub component: usize,
    pub distance_cm: f64,
    pub rf: f64,
    pub cv: f64,
}

impl Component {
    pub fn name(&self) -> String {
        format!("Component {}", self.component)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Distance: {:.1} cm, Rf: {:.2}, CV: {:.1}",
            self.name(),
            self.distance_cm,
            self.rf,
            self.cv
        )
    }
}

/// Computed retention report of one plate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlateResult {
    pub plate: PlateId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub solvent_front_distance_cm: f64,
    /// Sorted ascending by `distance_cm`.
    pub components: Vec<Component>,
}

impl PlateResult {
    pub fn display_name(&self) -> String {
        self.plate.display_name(self.label.as_deref())
    }
}

/// Inverse retention factor. Zero rf (spot on the baseline) yields the
/// sentinel 0 rather than infinity.
pub fn cv_from_rf(rf: f64) -> f64 {
    if rf != 0.0 {
        1.0 / rf
    } else {
        0.0
    }
}

/// Distance, Rf and CV of a spot at `spot_y`.
///
/// `frame` must have a non-zero solvent front; the batch driver rejects
/// degenerate plates before getting here.
pub fn spot_metrics(
    spot_y: f64,
    frame: &ReferenceFrame,
    calibration: &ModalityCalibration,
) -> SpotMetrics {
    let spot_px = frame.distance_from_baseline(spot_y);
    let rf = spot_px / frame.solvent_front_px();
    SpotMetrics {
        distance_cm: calibration.distance_cm(spot_px),
        rf: round_to(rf, RF_DECIMALS),
        cv: round_to(cv_from_rf(rf), CV_DECIMALS),
    }
}

/// Sort ascending by distance (stable) and number positionally from 1.
pub fn number_components(mut metrics: Vec<SpotMetrics>) -> Vec<Component> {
    metrics.sort_by(|a, b| a.distance_cm.total_cmp(&b.distance_cm));
    metrics
        .into_iter()
        .enumerate()
        .map(|(i, m)| Component {
            component: i + 1,
            distance_cm: m.distance_cm,
            rf: m.rf,
            cv: m.cv,
        })
        .collect()
}

/// Turn deduplicated spots into numbered components.
///
/// The centimeter-domain dedup pass runs after sorting and before
/// numbering, so numbering never has gaps.
pub fn compute_components(
    spots: &[Candidate],
    frame: &ReferenceFrame,
    calibration: &ModalityCalibration,
    distance_tolerance_cm: f64,
) -> Vec<Component> {
    let mut metrics: Vec<SpotMetrics> = spots
        .iter()
        .map(|c| spot_metrics(c.y, frame, calibration))
        .collect();
    metrics.sort_by(|a, b| a.distance_cm.total_cmp(&b.distance_cm));
    let metrics = dedup_greedy(metrics, distance_tolerance_cm, |m| m.distance_cm);
    number_components(metrics)
}
